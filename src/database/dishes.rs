// ABOUTME: Dish database operations including taxonomy join records
// ABOUTME: Upserts keyed by (cook_id, name) with join rows written in the same transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

use chrono::Utc;
use sqlx::Row;
use uuid::Uuid;

use super::Database;
use crate::errors::SeedResult;
use crate::models::ResolvedDish;

/// Fields of a dish write, minus the resolved references.
#[derive(Debug, Clone, Copy)]
pub struct DishUpdate<'a> {
    /// Dish name, unique per cook.
    pub name: &'a str,
    /// Menu description.
    pub description: &'a str,
    /// Price in cents.
    pub price_cents: i64,
    /// Preparation time in minutes.
    pub prep_minutes: i64,
}

impl Database {
    /// Create dish and dish-taxonomy join tables.
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails.
    pub(super) async fn migrate_dishes(&self) -> SeedResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS dishes (
                id TEXT PRIMARY KEY,
                cook_id TEXT NOT NULL REFERENCES cook_profiles(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                description TEXT,
                price_cents INTEGER NOT NULL,
                prep_minutes INTEGER NOT NULL DEFAULT 30,
                is_available BOOLEAN NOT NULL DEFAULT 1,
                updated_at TEXT NOT NULL,
                UNIQUE(cook_id, name)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS dish_categories (
                dish_id TEXT NOT NULL REFERENCES dishes(id) ON DELETE CASCADE,
                category_id TEXT NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
                UNIQUE(dish_id, category_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS dish_food_types (
                dish_id TEXT NOT NULL REFERENCES dishes(id) ON DELETE CASCADE,
                food_type_id TEXT NOT NULL REFERENCES food_types(id) ON DELETE CASCADE,
                UNIQUE(dish_id, food_type_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_dishes_cook ON dishes(cook_id)")
            .execute(&self.pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_dishes_name ON dishes(name)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Create or update a dish keyed by `(cook_id, name)`, rewriting its
    /// taxonomy joins in the same transaction. Returns the dish id.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement in the transaction fails.
    pub async fn upsert_dish(
        &self,
        cook_id: &str,
        dish: DishUpdate<'_>,
        category_ids: &[String],
        food_type_ids: &[String],
    ) -> SeedResult<String> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"
            INSERT INTO dishes (id, cook_id, name, description, price_cents, prep_minutes, is_available, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, 1, ?)
            ON CONFLICT(cook_id, name) DO UPDATE SET
                description = excluded.description,
                price_cents = excluded.price_cents,
                prep_minutes = excluded.prep_minutes,
                is_available = excluded.is_available,
                updated_at = excluded.updated_at
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(cook_id)
        .bind(dish.name)
        .bind(dish.description)
        .bind(dish.price_cents)
        .bind(dish.prep_minutes)
        .bind(Utc::now().to_rfc3339())
        .execute(&mut *tx)
        .await?;

        let row = sqlx::query("SELECT id FROM dishes WHERE cook_id = ? AND name = ?")
            .bind(cook_id)
            .bind(dish.name)
            .fetch_one(&mut *tx)
            .await?;
        let dish_id: String = row.get("id");

        // Joins are rewritten so removed taxonomy links disappear on re-runs
        sqlx::query("DELETE FROM dish_categories WHERE dish_id = ?")
            .bind(&dish_id)
            .execute(&mut *tx)
            .await?;
        for category_id in category_ids {
            sqlx::query("INSERT INTO dish_categories (dish_id, category_id) VALUES (?, ?)")
                .bind(&dish_id)
                .bind(category_id)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query("DELETE FROM dish_food_types WHERE dish_id = ?")
            .bind(&dish_id)
            .execute(&mut *tx)
            .await?;
        for food_type_id in food_type_ids {
            sqlx::query("INSERT INTO dish_food_types (dish_id, food_type_id) VALUES (?, ?)")
                .bind(&dish_id)
                .bind(food_type_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(dish_id)
    }

    /// Look up a dish by name. Absence is a normal outcome.
    ///
    /// Seed dish names are unique across cooks, so the first match wins.
    ///
    /// # Errors
    ///
    /// Returns an error only if the query itself fails.
    pub async fn find_dish_by_name(&self, name: &str) -> SeedResult<Option<ResolvedDish>> {
        let row = sqlx::query(
            "SELECT id, cook_id, name, price_cents FROM dishes WHERE name = ? ORDER BY updated_at LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| ResolvedDish {
            id: row.get("id"),
            cook_id: row.get("cook_id"),
            name: row.get("name"),
            price_cents: row.get("price_cents"),
        }))
    }

    /// List all available dishes, used to diversify carts and favorites.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_available_dishes(&self) -> SeedResult<Vec<ResolvedDish>> {
        let rows = sqlx::query(
            "SELECT id, cook_id, name, price_cents FROM dishes WHERE is_available = 1 ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ResolvedDish {
                id: row.get("id"),
                cook_id: row.get("cook_id"),
                name: row.get("name"),
                price_cents: row.get("price_cents"),
            })
            .collect())
    }
}
