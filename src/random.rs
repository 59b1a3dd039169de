// ABOUTME: Bounded random-value generators used to diversify generated relationships
// ABOUTME: All generators take an injected RNG so seeded runs are fully reproducible
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

//! Random-value generators.
//!
//! Every function draws from a caller-supplied [`Rng`], so a pipeline built on
//! a seeded `StdRng` produces the same data on every run.

use chrono::{DateTime, Duration, Timelike, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

/// Earliest hour (inclusive) a scheduled slot may fall on.
const SLOT_HOUR_MIN: u32 = 8;
/// Latest hour (exclusive) a scheduled slot may fall on.
const SLOT_HOUR_MAX: u32 = 22;

/// Returns a delivery slot 1-7 days after `now`, quantized to a whole hour
/// between 08:00 and 21:00 with minutes and seconds zeroed.
pub fn scheduled_slot(rng: &mut impl Rng, now: DateTime<Utc>) -> DateTime<Utc> {
    let days_ahead: i64 = rng.gen_range(1..=7);
    let hour: u32 = rng.gen_range(SLOT_HOUR_MIN..SLOT_HOUR_MAX);

    let day = now + Duration::days(days_ahead);
    day.with_hour(hour)
        .and_then(|d| d.with_minute(0))
        .and_then(|d| d.with_second(0))
        .and_then(|d| d.with_nanosecond(0))
        .unwrap_or(day)
}

/// Returns a moment up to `max_minutes` minutes before `now`, used for
/// last-seen snapshots.
pub fn recent_moment(rng: &mut impl Rng, now: DateTime<Utc>, max_minutes: i64) -> DateTime<Utc> {
    let minutes_ago: i64 = rng.gen_range(0..=max_minutes);
    now - Duration::minutes(minutes_ago)
}

/// Samples `k` distinct elements from `items` in randomized order.
///
/// When `k` exceeds the available element count the whole sequence is
/// returned (shuffled); the result never contains duplicates from the source.
pub fn sample_distinct<'a, T>(rng: &mut impl Rng, items: &'a [T], k: usize) -> Vec<&'a T> {
    items.choose_multiple(rng, k).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn scheduled_slot_stays_within_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let now = Utc::now();
        for _ in 0..500 {
            let slot = scheduled_slot(&mut rng, now);
            let ahead = slot - now;
            assert!(ahead > Duration::hours(0));
            assert!(ahead <= Duration::days(8));
            assert!((SLOT_HOUR_MIN..SLOT_HOUR_MAX).contains(&slot.hour()));
            assert_eq!(slot.minute(), 0);
            assert_eq!(slot.second(), 0);
        }
    }

    #[test]
    fn sample_distinct_returns_exactly_k_unique_elements() {
        let mut rng = StdRng::seed_from_u64(42);
        let items: Vec<u32> = (0..20).collect();
        for k in 0..=items.len() {
            let sample = sample_distinct(&mut rng, &items, k);
            assert_eq!(sample.len(), k);
            let unique: HashSet<_> = sample.iter().collect();
            assert_eq!(unique.len(), k);
        }
    }

    #[test]
    fn sample_distinct_clamps_oversized_requests() {
        let mut rng = StdRng::seed_from_u64(42);
        let items = [1, 2, 3];
        let sample = sample_distinct(&mut rng, &items, 10);
        assert_eq!(sample.len(), 3);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let now = Utc::now();
        let mut a = StdRng::seed_from_u64(9);
        let mut b = StdRng::seed_from_u64(9);
        assert_eq!(scheduled_slot(&mut a, now), scheduled_slot(&mut b, now));
    }
}
