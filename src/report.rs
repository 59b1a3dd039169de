// ABOUTME: Per-phase outcome accumulators and the final run report
// ABOUTME: Replaces shared mutable counters with values returned by each seeder and merged explicitly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

//! Result reporting.
//!
//! Each seeder returns a [`PhaseOutcome`]; the orchestrator collects them into
//! a [`RunReport`] which is always rendered at the end of a run, even when a
//! phase failed fatally.

use std::time::Duration;

use tracing::{error, info};

use crate::errors::SeedError;

/// Counters for a single seeding phase.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PhaseOutcome {
    /// Records created or updated.
    pub success: u32,
    /// Records whose write failed.
    pub failed: u32,
    /// Records skipped because a required reference did not resolve.
    pub skipped: u32,
}

impl PhaseOutcome {
    /// Total number of records considered.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.success + self.failed + self.skipped
    }

    /// Fold another outcome into this one.
    pub fn merge(&mut self, other: Self) {
        self.success += other.success;
        self.failed += other.failed;
        self.skipped += other.skipped;
    }
}

/// Outcome and timing of one completed phase.
#[derive(Debug, Clone)]
pub struct PhaseReport {
    /// Phase name as shown in the summary.
    pub phase: &'static str,
    /// Aggregated counters.
    pub outcome: PhaseOutcome,
    /// Wall-clock time the phase took.
    pub elapsed: Duration,
}

/// Aggregated result of a whole seeding run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Reports for the phases that ran, in execution order.
    pub phases: Vec<PhaseReport>,
    /// Fatal error that aborted the run, if any.
    pub fatal: Option<SeedError>,
    /// Total wall-clock duration of the run.
    pub total_elapsed: Duration,
}

impl RunReport {
    /// Record one completed phase.
    pub fn record(&mut self, phase: &'static str, outcome: PhaseOutcome, elapsed: Duration) {
        self.phases.push(PhaseReport {
            phase,
            outcome,
            elapsed,
        });
    }

    /// Whether every phase completed without a fatal error.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.fatal.is_none()
    }

    /// Counters summed across all completed phases.
    #[must_use]
    pub fn totals(&self) -> PhaseOutcome {
        let mut totals = PhaseOutcome::default();
        for phase in &self.phases {
            totals.merge(phase.outcome);
        }
        totals
    }

    /// Render the final tally through the logging sink.
    pub fn log_summary(&self) {
        info!("=== Seeding Summary ===");
        for report in &self.phases {
            info!(
                "  {:<16} success={:<4} failed={:<4} skipped={:<4} ({}ms)",
                report.phase,
                report.outcome.success,
                report.outcome.failed,
                report.outcome.skipped,
                report.elapsed.as_millis()
            );
        }
        let totals = self.totals();
        info!(
            "  total: {} records ({} success, {} failed, {} skipped) in {}ms",
            totals.total(),
            totals.success,
            totals.failed,
            totals.skipped,
            self.total_elapsed.as_millis()
        );
        if let Some(fatal) = &self.fatal {
            error!("  run aborted: {fatal}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_adds_all_counters() {
        let mut a = PhaseOutcome {
            success: 3,
            failed: 1,
            skipped: 2,
        };
        a.merge(PhaseOutcome {
            success: 4,
            failed: 0,
            skipped: 1,
        });
        assert_eq!(a.success, 7);
        assert_eq!(a.failed, 1);
        assert_eq!(a.skipped, 3);
        assert_eq!(a.total(), 11);
    }

    #[test]
    fn report_totals_span_phases() {
        let mut report = RunReport::default();
        report.record(
            "users",
            PhaseOutcome {
                success: 5,
                failed: 0,
                skipped: 0,
            },
            Duration::from_millis(10),
        );
        report.record(
            "dishes",
            PhaseOutcome {
                success: 2,
                failed: 1,
                skipped: 1,
            },
            Duration::from_millis(5),
        );
        assert!(report.succeeded());
        assert_eq!(report.totals().total(), 9);
    }
}
