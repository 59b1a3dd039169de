// ABOUTME: Subscription database operations
// ABOUTME: Idempotent upserts keyed by the (user_id, cook_id) pair
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

use chrono::Utc;
use uuid::Uuid;

use super::Database;
use crate::errors::SeedResult;

impl Database {
    /// Create the subscriptions table.
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails.
    pub(super) async fn migrate_subscriptions(&self) -> SeedResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS subscriptions (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                cook_id TEXT NOT NULL REFERENCES cook_profiles(id) ON DELETE CASCADE,
                notify_new_dishes BOOLEAN NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                UNIQUE(user_id, cook_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_subscriptions_cook ON subscriptions(cook_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Create or refresh a subscription keyed by `(user_id, cook_id)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn upsert_subscription(
        &self,
        user_id: &str,
        cook_id: &str,
        notify_new_dishes: bool,
    ) -> SeedResult<()> {
        sqlx::query(
            r"
            INSERT INTO subscriptions (id, user_id, cook_id, notify_new_dishes, created_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(user_id, cook_id) DO UPDATE SET
                notify_new_dishes = excluded.notify_new_dishes
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_id)
        .bind(cook_id)
        .bind(i32::from(notify_new_dishes))
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
