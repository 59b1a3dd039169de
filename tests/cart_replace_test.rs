// ABOUTME: Integration test for the atomicity of cart replacement
// ABOUTME: A reader on a second connection never observes a cleared-but-unrefilled cart
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::Utc;
use tempfile::TempDir;

use savora_seeder::database::{CartItemUpdate, Database, DishUpdate};

async fn db_pair() -> (TempDir, Database, Database) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}/test.db", dir.path().display());
    let writer = Database::new(&url).await.unwrap();
    let reader = Database::new(&url).await.unwrap();
    (dir, writer, reader)
}

fn cart_line(dish_id: &str) -> CartItemUpdate {
    CartItemUpdate {
        dish_id: dish_id.to_string(),
        quantity: 1,
        scheduled_for: Utc::now(),
    }
}

#[tokio::test]
async fn concurrent_reader_never_sees_a_half_replaced_cart() {
    let (_dir, writer, reader) = db_pair().await;

    let chef_id = writer
        .upsert_user("cook@example.com", "Cook", "$2b$04$hash", true, false)
        .await
        .unwrap();
    let cook_id = writer
        .upsert_cook_profile(&chef_id, "Test Kitchen", "testing", 4.0, 0)
        .await
        .unwrap();

    let mut dish_ids = Vec::new();
    for name in ["Dish One", "Dish Two", "Dish Three"] {
        let id = writer
            .upsert_dish(
                &cook_id,
                DishUpdate {
                    name,
                    description: "",
                    price_cents: 100,
                    prep_minutes: 5,
                },
                &[],
                &[],
            )
            .await
            .unwrap();
        dish_ids.push(id);
    }

    let user_id = writer
        .upsert_user("buyer@example.com", "Buyer", "$2b$04$hash", false, false)
        .await
        .unwrap();

    let small: Vec<CartItemUpdate> = dish_ids[..2].iter().map(|id| cart_line(id)).collect();
    let large: Vec<CartItemUpdate> = dish_ids.iter().map(|id| cart_line(id)).collect();

    writer.replace_cart(&user_id, &small).await.unwrap();

    // Flip the cart between the two sets while a second connection polls it.
    let writes = tokio::spawn(async move {
        for round in 0..40 {
            let items = if round % 2 == 0 { &large } else { &small };
            writer.replace_cart(&user_id, items).await.unwrap();
            tokio::task::yield_now().await;
        }
    });

    for _ in 0..200 {
        let (observed,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cart_items")
            .fetch_one(reader.pool())
            .await
            .unwrap();
        assert!(
            observed == 2 || observed == 3,
            "reader observed a half-replaced cart: {observed} items"
        );
        tokio::task::yield_now().await;
    }

    writes.await.unwrap();
}
