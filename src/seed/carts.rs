// ABOUTME: Cart and favorites seeding phase for non-privileged users
// ABOUTME: Atomically replaces each customer's cart items and favorites with random dish subsets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

use rand::Rng;
use tracing::{info, warn};

use crate::database::{CartItemUpdate, Database};
use crate::errors::SeedResult;
use crate::models::ResolvedDish;
use crate::random::{sample_distinct, scheduled_slot};
use crate::report::PhaseOutcome;

/// Cart size bounds per customer.
const CART_ITEMS_MIN: usize = 1;
const CART_ITEMS_MAX: usize = 3;
/// Favorites bounds per customer.
const FAVORITES_MIN: usize = 2;
const FAVORITES_MAX: usize = 5;

/// Seed carts and favorites for every non-chef, non-admin user.
///
/// # Errors
///
/// Returns an error only for failures outside the per-record boundary.
pub async fn run(db: &Database, rng: &mut impl Rng) -> SeedResult<PhaseOutcome> {
    let customers = db.list_customers().await?;
    let dishes = db.list_available_dishes().await?;
    let mut outcome = PhaseOutcome::default();

    if dishes.is_empty() {
        warn!("  no dishes available; skipping all carts");
        outcome.skipped = customers.len() as u32;
        return Ok(outcome);
    }

    for customer in &customers {
        match seed_customer(db, rng, &customer.id, &dishes).await {
            Ok(()) => {
                info!("  cart and favorites for {} replaced", customer.email);
                outcome.success += 1;
            }
            Err(err) => {
                warn!("  cart for {} failed: {err}", customer.email);
                outcome.failed += 1;
            }
        }
    }

    Ok(outcome)
}

async fn seed_customer(
    db: &Database,
    rng: &mut impl Rng,
    user_id: &str,
    dishes: &[ResolvedDish],
) -> SeedResult<()> {
    let now = chrono::Utc::now();

    let cart_count = rng.gen_range(CART_ITEMS_MIN..=CART_ITEMS_MAX);
    let mut items = Vec::with_capacity(cart_count);
    for dish in sample_distinct(rng, dishes, cart_count) {
        items.push(CartItemUpdate {
            dish_id: dish.id.clone(),
            quantity: rng.gen_range(1..=2),
            scheduled_for: scheduled_slot(rng, now),
        });
    }
    db.replace_cart(user_id, &items).await?;

    let favorite_count = rng.gen_range(FAVORITES_MIN..=FAVORITES_MAX);
    let favorite_ids: Vec<String> = sample_distinct(rng, dishes, favorite_count)
        .into_iter()
        .map(|dish| dish.id.clone())
        .collect();
    db.replace_favorites(user_id, &favorite_ids).await?;

    Ok(())
}
