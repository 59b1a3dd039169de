// ABOUTME: Category and food-type database operations
// ABOUTME: Slug-keyed upserts for the two-level category tree and the flat food-type taxonomy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

use chrono::Utc;
use sqlx::Row;
use uuid::Uuid;

use super::Database;
use crate::errors::SeedResult;

impl Database {
    /// Create category and food-type tables.
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails.
    pub(super) async fn migrate_taxonomy(&self) -> SeedResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS categories (
                id TEXT PRIMARY KEY,
                slug TEXT UNIQUE NOT NULL,
                name TEXT NOT NULL,
                parent_id TEXT REFERENCES categories(id),
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS food_types (
                id TEXT PRIMARY KEY,
                slug TEXT UNIQUE NOT NULL,
                name TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_categories_parent ON categories(parent_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Create or update a category keyed by slug. Returns the category id.
    ///
    /// Top-level cuisines pass `parent_id = None`; their subcategories pass
    /// the id returned for the parent.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn upsert_category(
        &self,
        slug: &str,
        name: &str,
        parent_id: Option<&str>,
    ) -> SeedResult<String> {
        sqlx::query(
            r"
            INSERT INTO categories (id, slug, name, parent_id, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(slug) DO UPDATE SET
                name = excluded.name,
                parent_id = excluded.parent_id,
                updated_at = excluded.updated_at
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(slug)
        .bind(name)
        .bind(parent_id)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        let row = sqlx::query("SELECT id FROM categories WHERE slug = ?")
            .bind(slug)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("id"))
    }

    /// Look up a category id by slug. Absence is a normal outcome.
    ///
    /// # Errors
    ///
    /// Returns an error only if the query itself fails.
    pub async fn find_category_by_slug(&self, slug: &str) -> SeedResult<Option<String>> {
        let row = sqlx::query("SELECT id FROM categories WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|row| row.get("id")))
    }

    /// Create or update a food type keyed by slug. Returns the food-type id.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn upsert_food_type(&self, slug: &str, name: &str) -> SeedResult<String> {
        sqlx::query(
            r"
            INSERT INTO food_types (id, slug, name, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(slug) DO UPDATE SET
                name = excluded.name,
                updated_at = excluded.updated_at
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(slug)
        .bind(name)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        let row = sqlx::query("SELECT id FROM food_types WHERE slug = ?")
            .bind(slug)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("id"))
    }

    /// Look up a food-type id by slug. Absence is a normal outcome.
    ///
    /// # Errors
    ///
    /// Returns an error only if the query itself fails.
    pub async fn find_food_type_by_slug(&self, slug: &str) -> SeedResult<Option<String>> {
        let row = sqlx::query("SELECT id FROM food_types WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|row| row.get("id")))
    }
}
