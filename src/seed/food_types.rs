// ABOUTME: Food-type seeding phase for the flat dietary taxonomy
// ABOUTME: Slug-keyed upserts, no cross-entity references to resolve
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

use tracing::{info, warn};

use crate::database::Database;
use crate::errors::SeedResult;
use crate::report::PhaseOutcome;

const FOOD_TYPES: &[(&str, &str)] = &[
    ("vegetarian", "Vegetarian"),
    ("vegan", "Vegan"),
    ("gluten-free", "Gluten Free"),
    ("spicy", "Spicy"),
    ("halal", "Halal"),
];

/// Seed the flat food-type taxonomy.
///
/// # Errors
///
/// Returns an error only for failures outside the per-record boundary.
pub async fn run(db: &Database) -> SeedResult<PhaseOutcome> {
    let mut outcome = PhaseOutcome::default();

    for (slug, name) in FOOD_TYPES {
        match db.upsert_food_type(slug, name).await {
            Ok(_) => {
                info!("  food type {slug} seeded");
                outcome.success += 1;
            }
            Err(err) => {
                warn!("  food type {slug} failed: {err}");
                outcome.failed += 1;
            }
        }
    }

    Ok(outcome)
}
