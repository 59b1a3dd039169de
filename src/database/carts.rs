// ABOUTME: Cart, cart-item, and favorite database operations
// ABOUTME: Clear-then-insert replacement runs inside one transaction per owner
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use super::Database;
use crate::errors::SeedResult;

/// One line of a replaced cart.
#[derive(Debug, Clone)]
pub struct CartItemUpdate {
    /// Dish the line refers to.
    pub dish_id: String,
    /// Quantity ordered.
    pub quantity: i64,
    /// Requested delivery slot.
    pub scheduled_for: DateTime<Utc>,
}

impl Database {
    /// Create cart, cart-item, and favorite tables.
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails.
    pub(super) async fn migrate_carts(&self) -> SeedResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS carts (
                id TEXT PRIMARY KEY,
                user_id TEXT UNIQUE NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS cart_items (
                id TEXT PRIMARY KEY,
                cart_id TEXT NOT NULL REFERENCES carts(id) ON DELETE CASCADE,
                dish_id TEXT NOT NULL REFERENCES dishes(id) ON DELETE CASCADE,
                quantity INTEGER NOT NULL DEFAULT 1,
                scheduled_for TEXT,
                UNIQUE(cart_id, dish_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_favorites (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                dish_id TEXT NOT NULL REFERENCES dishes(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL,
                UNIQUE(user_id, dish_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_cart_items_cart ON cart_items(cart_id)")
            .execute(&self.pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_user_favorites_user ON user_favorites(user_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Upsert the user's cart and replace its items in one transaction.
    ///
    /// A reader concurrent with this call sees either the old item set or the
    /// new one, never the cleared state in between. Returns the cart id.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement in the transaction fails.
    pub async fn replace_cart(
        &self,
        user_id: &str,
        items: &[CartItemUpdate],
    ) -> SeedResult<String> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"
            INSERT INTO carts (id, user_id, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET updated_at = excluded.updated_at
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_id)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        let row = sqlx::query("SELECT id FROM carts WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;
        let cart_id: String = row.get("id");

        sqlx::query("DELETE FROM cart_items WHERE cart_id = ?")
            .bind(&cart_id)
            .execute(&mut *tx)
            .await?;

        for item in items {
            sqlx::query(
                "INSERT INTO cart_items (id, cart_id, dish_id, quantity, scheduled_for) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&cart_id)
            .bind(&item.dish_id)
            .bind(item.quantity)
            .bind(item.scheduled_for.to_rfc3339())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(cart_id)
    }

    /// Replace the user's favorites in one transaction.
    ///
    /// The insert is duplicate-safe: a dish appearing twice in `dish_ids`
    /// produces a single row.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement in the transaction fails.
    pub async fn replace_favorites(&self, user_id: &str, dish_ids: &[String]) -> SeedResult<()> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM user_favorites WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        for dish_id in dish_ids {
            sqlx::query(
                r"
                INSERT INTO user_favorites (id, user_id, dish_id, created_at)
                VALUES (?, ?, ?, ?)
                ON CONFLICT(user_id, dish_id) DO NOTHING
                ",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(user_id)
            .bind(dish_id)
            .bind(&now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
