// ABOUTME: Database management for the Savora seeder
// ABOUTME: Owns the SQLite pool, runs idempotent schema migrations, and exposes per-entity operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

//! # Database Management
//!
//! This module provides the sole I/O boundary of the seeder. It wraps a
//! `SqlitePool`, creates the schema on connect, and exposes the upsert /
//! create / find operations the per-entity seeders run against. Operations
//! are split across submodules by entity group, all as `impl Database`
//! blocks.

mod carts;
mod dishes;
mod messaging;
mod orders;
mod subscriptions;
mod taxonomy;
mod users;

pub use carts::CartItemUpdate;
pub use dishes::DishUpdate;
pub use orders::{NewOrder, NewOrderItem, NewPayment, NewReview};
pub use users::{AddressUpdate, ProfileUpdate};

use crate::errors::SeedResult;
use sqlx::{Pool, Sqlite, SqlitePool};
use tracing::debug;

/// Database handle for all seeding operations.
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Connect to the database and create the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or a
    /// migration statement fails.
    pub async fn new(database_url: &str) -> SeedResult<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };

        let pool = SqlitePool::connect(&connection_options).await?;
        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Get a reference to the underlying pool for direct queries.
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run all schema migrations. Every statement is idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index creation fails.
    pub async fn migrate(&self) -> SeedResult<()> {
        self.migrate_users().await?;
        self.migrate_taxonomy().await?;
        self.migrate_dishes().await?;
        self.migrate_carts().await?;
        self.migrate_orders().await?;
        self.migrate_messaging().await?;
        self.migrate_subscriptions().await?;
        debug!("schema migrations complete");
        Ok(())
    }

    /// Delete generated and derived rows so a fresh run starts clean.
    ///
    /// Deletion order respects foreign keys: children before parents.
    /// Hand-authored history (users, dishes, orders) is left in place.
    ///
    /// # Errors
    ///
    /// Returns an error if any delete fails.
    pub async fn reset_derived_data(&self) -> SeedResult<()> {
        for table in [
            "messages",
            "conversation_participants",
            "conversations",
            "notifications",
            "cart_items",
            "user_favorites",
        ] {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }

    /// Row counts per table for the post-run summary.
    ///
    /// Purely observational: callers must not let a failure here change the
    /// run verdict.
    ///
    /// # Errors
    ///
    /// Returns an error if any count query fails.
    pub async fn table_counts(&self) -> SeedResult<Vec<(&'static str, i64)>> {
        const TABLES: [(&str, &str); 15] = [
            ("Users", "users"),
            ("Cook Profiles", "cook_profiles"),
            ("Categories", "categories"),
            ("Food Types", "food_types"),
            ("Dishes", "dishes"),
            ("Carts", "carts"),
            ("Cart Items", "cart_items"),
            ("Favorites", "user_favorites"),
            ("Orders", "orders"),
            ("Payments", "payments"),
            ("Reviews", "reviews"),
            ("Notifications", "notifications"),
            ("Conversations", "conversations"),
            ("Messages", "messages"),
            ("Subscriptions", "subscriptions"),
        ];

        let mut counts = Vec::with_capacity(TABLES.len());
        for (label, table) in TABLES {
            let row: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
                .fetch_one(&self.pool)
                .await?;
            counts.push((label, row.0));
        }
        Ok(counts)
    }

    /// Close the pool. Safe to call on every exit path.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
