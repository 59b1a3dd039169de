// ABOUTME: Phase orchestrator running the seeders in fixed dependency order
// ABOUTME: Each phase is atomic; a phase-level error aborts the remaining phases
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

//! The seeding pipeline.
//!
//! Phases run strictly in sequence, each gated on the previous seeder
//! returning rather than throwing. Record-level problems stay inside the
//! seeders as counters; an error escaping a seeder aborts the run and is
//! surfaced on the final report.

use std::time::Instant;

use rand::rngs::StdRng;
use tracing::{error, info};

use crate::database::Database;
use crate::report::RunReport;
use crate::seed;

/// The seeding phases, in foreign-key dependency order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Accounts, profiles, cook profiles, presence.
    Users,
    /// Two-level cuisine tree.
    Categories,
    /// Flat dietary taxonomy.
    FoodTypes,
    /// Dishes and their taxonomy joins.
    Dishes,
    /// Per-customer carts and favorites.
    CartsAndFavorites,
    /// Order aggregates.
    Orders,
    /// Per-user notifications.
    Notifications,
    /// Conversations and messages.
    Conversations,
    /// Customer-to-cook subscriptions.
    Subscriptions,
}

impl Phase {
    /// All phases in execution order.
    pub const ALL: [Self; 9] = [
        Self::Users,
        Self::Categories,
        Self::FoodTypes,
        Self::Dishes,
        Self::CartsAndFavorites,
        Self::Orders,
        Self::Notifications,
        Self::Conversations,
        Self::Subscriptions,
    ];

    /// Phase name used in logs and the summary.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Categories => "categories",
            Self::FoodTypes => "food_types",
            Self::Dishes => "dishes",
            Self::CartsAndFavorites => "carts_favorites",
            Self::Orders => "orders",
            Self::Notifications => "notifications",
            Self::Conversations => "conversations",
            Self::Subscriptions => "subscriptions",
        }
    }
}

/// Run every phase in order and collect the results.
///
/// Always returns a report; a fatal phase error is recorded on it instead of
/// being propagated, so callers can render the partial tally before deciding
/// the process verdict.
pub async fn run(db: &Database, rng: &mut StdRng) -> RunReport {
    let run_started = Instant::now();
    let mut report = RunReport::default();

    for phase in Phase::ALL {
        info!("Phase: {}", phase.name());
        let phase_started = Instant::now();

        let result = match phase {
            Phase::Users => seed::users::run(db, rng).await,
            Phase::Categories => seed::categories::run(db).await,
            Phase::FoodTypes => seed::food_types::run(db).await,
            Phase::Dishes => seed::dishes::run(db).await,
            Phase::CartsAndFavorites => seed::carts::run(db, rng).await,
            Phase::Orders => seed::orders::run(db).await,
            Phase::Notifications => seed::notifications::run(db).await,
            Phase::Conversations => seed::conversations::run(db).await,
            Phase::Subscriptions => seed::subscriptions::run(db).await,
        };

        match result {
            Ok(outcome) => {
                info!(
                    "  {} done: success={} failed={} skipped={}",
                    phase.name(),
                    outcome.success,
                    outcome.failed,
                    outcome.skipped
                );
                report.record(phase.name(), outcome, phase_started.elapsed());
            }
            Err(err) => {
                let fatal = err.in_phase(phase.name());
                error!("{fatal}; aborting remaining phases");
                report.fatal = Some(fatal);
                break;
            }
        }
    }

    report.total_elapsed = run_started.elapsed();
    report
}
