// ABOUTME: Category seeding phase for the two-level cuisine tree
// ABOUTME: Upserts top-level cuisines first, then their subcategories against the returned parent id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

use tracing::{info, warn};

use crate::database::Database;
use crate::errors::SeedResult;
use crate::report::PhaseOutcome;

/// A top-level cuisine and its subcategories, all keyed by slug.
struct CategoryFixture {
    slug: &'static str,
    name: &'static str,
    children: &'static [(&'static str, &'static str)],
}

const CATEGORIES: &[CategoryFixture] = &[
    CategoryFixture {
        slug: "italian",
        name: "Italian",
        children: &[("pizza", "Pizza"), ("pasta", "Pasta")],
    },
    CategoryFixture {
        slug: "japanese",
        name: "Japanese",
        children: &[("sushi", "Sushi"), ("ramen", "Ramen")],
    },
    CategoryFixture {
        slug: "middle-eastern",
        name: "Middle Eastern",
        children: &[("mezze", "Mezze"), ("wraps", "Wraps")],
    },
    CategoryFixture {
        slug: "desserts",
        name: "Desserts",
        children: &[],
    },
];

/// Seed the category tree: parents first, children in the same pass.
///
/// # Errors
///
/// Returns an error only for failures outside the per-record boundary.
pub async fn run(db: &Database) -> SeedResult<PhaseOutcome> {
    let mut outcome = PhaseOutcome::default();

    for fixture in CATEGORIES {
        match db.upsert_category(fixture.slug, fixture.name, None).await {
            Ok(parent_id) => {
                info!("  category {} seeded", fixture.slug);
                outcome.success += 1;

                for (slug, name) in fixture.children {
                    match db.upsert_category(slug, name, Some(&parent_id)).await {
                        Ok(_) => outcome.success += 1,
                        Err(err) => {
                            warn!("  subcategory {slug} failed: {err}");
                            outcome.failed += 1;
                        }
                    }
                }
            }
            Err(err) => {
                // Children cannot resolve a parent that was never written
                warn!("  category {} failed: {err}", fixture.slug);
                outcome.failed += 1;
                outcome.skipped += fixture.children.len() as u32;
            }
        }
    }

    Ok(outcome)
}
