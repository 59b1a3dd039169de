// ABOUTME: Subscription seeding phase linking customers to cooks
// ABOUTME: Upserts the (user, cook) pair; a target without a cook profile counts as not found
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

use tracing::{info, warn};

use super::RecordOutcome;
use crate::database::Database;
use crate::errors::SeedResult;
use crate::report::PhaseOutcome;
use crate::resolver::Resolver;

/// (subscriber email, cook email, notify on new dishes)
const SUBSCRIPTIONS: &[(&str, &str, bool)] = &[
    ("lena@example.com", "marco@trattoriaroma.it", true),
    ("david@example.com", "yuki@sakurakitchen.jp", true),
    ("sofia@example.com", "amira@beirutbites.com", true),
    ("priya@example.com", "marco@trattoriaroma.it", false),
    // lena has no cook profile, so this pair is skipped on every run
    ("tom@example.com", "lena@example.com", true),
];

/// Seed all demo subscriptions.
///
/// # Errors
///
/// Returns an error only for failures outside the per-record boundary.
pub async fn run(db: &Database) -> SeedResult<PhaseOutcome> {
    let resolver = Resolver::new(db);
    let mut outcome = PhaseOutcome::default();

    for (user_email, cook_email, notify) in SUBSCRIPTIONS {
        match seed_subscription(db, &resolver, user_email, cook_email, *notify).await {
            Ok(RecordOutcome::Seeded) => {
                info!("  subscription {user_email} -> {cook_email} seeded");
                outcome.success += 1;
            }
            Ok(RecordOutcome::Skipped) => outcome.skipped += 1,
            Err(err) => {
                warn!("  subscription {user_email} -> {cook_email} failed: {err}");
                outcome.failed += 1;
            }
        }
    }

    Ok(outcome)
}

async fn seed_subscription(
    db: &Database,
    resolver: &Resolver<'_>,
    user_email: &str,
    cook_email: &str,
    notify: bool,
) -> SeedResult<RecordOutcome> {
    let Some(user) = resolver.user(user_email).await? else {
        warn!("  subscription skipped: user {user_email} not found");
        return Ok(RecordOutcome::Skipped);
    };

    let Some(cook) = resolver.cook(cook_email).await? else {
        warn!("  subscription skipped: cook {cook_email} not found");
        return Ok(RecordOutcome::Skipped);
    };

    db.upsert_subscription(&user.id, &cook.cook_id, notify)
        .await?;
    Ok(RecordOutcome::Seeded)
}
