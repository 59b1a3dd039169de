// ABOUTME: Dish seeding phase linking dishes to cooks and taxonomy
// ABOUTME: Requires the owning user to have a cook profile; taxonomy matches are linked, misses warned
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

use tracing::{info, warn};

use super::RecordOutcome;
use crate::database::{Database, DishUpdate};
use crate::errors::SeedResult;
use crate::report::PhaseOutcome;
use crate::resolver::Resolver;

/// Demo dish definition. Dish names are unique across the dataset so order
/// lines can resolve them without a cook qualifier.
struct DishFixture {
    cook_email: &'static str,
    name: &'static str,
    description: &'static str,
    price_cents: i64,
    prep_minutes: i64,
    categories: &'static [&'static str],
    food_types: &'static [&'static str],
}

const DISHES: &[DishFixture] = &[
    DishFixture {
        cook_email: "marco@trattoriaroma.it",
        name: "Margherita Pizza",
        description: "San Marzano tomatoes, fior di latte, basil",
        price_cents: 1599,
        prep_minutes: 20,
        categories: &["italian", "pizza"],
        food_types: &["vegetarian"],
    },
    DishFixture {
        cook_email: "marco@trattoriaroma.it",
        name: "Spaghetti Carbonara",
        description: "Guanciale, pecorino, egg yolk",
        price_cents: 1450,
        prep_minutes: 25,
        categories: &["italian", "pasta"],
        food_types: &[],
    },
    DishFixture {
        cook_email: "marco@trattoriaroma.it",
        name: "Tiramisu",
        description: "Espresso-soaked savoiardi, mascarpone",
        price_cents: 750,
        prep_minutes: 10,
        categories: &["italian", "desserts"],
        food_types: &["vegetarian"],
    },
    DishFixture {
        cook_email: "yuki@sakurakitchen.jp",
        name: "Salmon Nigiri Set",
        description: "Eight pieces, day-boat salmon",
        price_cents: 2200,
        prep_minutes: 30,
        categories: &["japanese", "sushi"],
        food_types: &["gluten-free"],
    },
    DishFixture {
        cook_email: "yuki@sakurakitchen.jp",
        name: "Tonkotsu Ramen",
        description: "18-hour pork broth, chashu, ajitama",
        price_cents: 1299,
        prep_minutes: 35,
        categories: &["japanese", "ramen"],
        food_types: &["spicy"],
    },
    DishFixture {
        cook_email: "yuki@sakurakitchen.jp",
        name: "Vegetable Gyoza",
        description: "Pan-fried, cabbage and shiitake filling",
        price_cents: 850,
        prep_minutes: 15,
        categories: &["japanese"],
        food_types: &["vegetarian", "vegan"],
    },
    DishFixture {
        cook_email: "amira@beirutbites.com",
        name: "Falafel Wrap",
        description: "Crispy falafel, pickles, tahini",
        price_cents: 950,
        prep_minutes: 15,
        categories: &["middle-eastern", "wraps"],
        food_types: &["vegetarian", "vegan", "halal"],
    },
    DishFixture {
        cook_email: "amira@beirutbites.com",
        name: "Chicken Shawarma Plate",
        description: "Marinated chicken, garlic sauce, rice",
        price_cents: 1450,
        prep_minutes: 25,
        categories: &["middle-eastern"],
        food_types: &["halal"],
    },
    DishFixture {
        cook_email: "amira@beirutbites.com",
        name: "Hummus Mezze",
        description: "Silky hummus, warm flatbread, olive oil",
        price_cents: 700,
        prep_minutes: 10,
        categories: &["middle-eastern", "mezze"],
        food_types: &["vegetarian", "vegan", "halal"],
    },
];

/// Seed all demo dishes with their taxonomy joins.
///
/// # Errors
///
/// Returns an error only for failures outside the per-record boundary.
pub async fn run(db: &Database) -> SeedResult<PhaseOutcome> {
    let resolver = Resolver::new(db);
    let mut outcome = PhaseOutcome::default();

    for fixture in DISHES {
        match seed_dish(db, &resolver, fixture).await {
            Ok(RecordOutcome::Seeded) => {
                info!("  dish {} seeded", fixture.name);
                outcome.success += 1;
            }
            Ok(RecordOutcome::Skipped) => outcome.skipped += 1,
            Err(err) => {
                warn!("  dish {} failed: {err}", fixture.name);
                outcome.failed += 1;
            }
        }
    }

    Ok(outcome)
}

async fn seed_dish(
    db: &Database,
    resolver: &Resolver<'_>,
    fixture: &DishFixture,
) -> SeedResult<RecordOutcome> {
    // A user without a cook profile is treated as "cook not found"
    let Some(cook) = resolver.cook(fixture.cook_email).await? else {
        warn!(
            "  dish {} skipped: cook {} not found",
            fixture.name, fixture.cook_email
        );
        return Ok(RecordOutcome::Skipped);
    };

    let category_ids = resolver.categories(fixture.categories).await?;
    if category_ids.len() != fixture.categories.len() {
        warn!(
            "  dish {}: only {}/{} categories resolved",
            fixture.name,
            category_ids.len(),
            fixture.categories.len()
        );
    }

    let food_type_ids = resolver.food_types(fixture.food_types).await?;
    if food_type_ids.len() != fixture.food_types.len() {
        warn!(
            "  dish {}: only {}/{} food types resolved",
            fixture.name,
            food_type_ids.len(),
            fixture.food_types.len()
        );
    }

    db.upsert_dish(
        &cook.cook_id,
        DishUpdate {
            name: fixture.name,
            description: fixture.description,
            price_cents: fixture.price_cents,
            prep_minutes: fixture.prep_minutes,
        },
        &category_ids,
        &food_type_ids,
    )
    .await?;

    Ok(RecordOutcome::Seeded)
}
