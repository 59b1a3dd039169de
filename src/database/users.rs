// ABOUTME: User, profile, address, and cook-profile database operations
// ABOUTME: Upserts keyed by email plus wholesale replacement of owned collections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

use crate::errors::SeedResult;
use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use super::Database;
use crate::models::{OnlineStatus, Platform, ResolvedUser};

/// Profile fields replaced wholesale on every run.
#[derive(Debug, Clone, Copy)]
pub struct ProfileUpdate<'a> {
    /// Free-form biography.
    pub bio: &'a str,
    /// Contact phone number.
    pub phone: &'a str,
    /// Avatar image URL.
    pub avatar_url: Option<&'a str>,
}

/// One address row in a user's replaced address collection.
#[derive(Debug, Clone, Copy)]
pub struct AddressUpdate<'a> {
    /// Display label ("Home", "Work").
    pub label: &'a str,
    /// Street and house number.
    pub street: &'a str,
    /// City name.
    pub city: &'a str,
    /// Postal code.
    pub postal_code: &'a str,
    /// Whether this is the default delivery address.
    pub is_default: bool,
}

impl Database {
    /// Create users, profiles, addresses, and cook-profile tables.
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails.
    pub(super) async fn migrate_users(&self) -> SeedResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                display_name TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                is_chef BOOLEAN NOT NULL DEFAULT 0,
                is_admin BOOLEAN NOT NULL DEFAULT 0,
                online_status TEXT NOT NULL DEFAULT 'offline',
                last_seen_at TEXT,
                last_platform TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_profiles (
                user_id TEXT PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
                bio TEXT,
                phone TEXT,
                avatar_url TEXT,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_addresses (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                label TEXT NOT NULL,
                street TEXT NOT NULL,
                city TEXT NOT NULL,
                postal_code TEXT NOT NULL,
                is_default BOOLEAN NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS cook_profiles (
                id TEXT PRIMARY KEY,
                user_id TEXT UNIQUE NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                kitchen_name TEXT NOT NULL,
                speciality TEXT,
                rating REAL NOT NULL DEFAULT 0,
                delivery_fee_cents INTEGER NOT NULL DEFAULT 0,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)")
            .execute(&self.pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_user_addresses_user ON user_addresses(user_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Create or update a user keyed by email. Returns the user id.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn upsert_user(
        &self,
        email: &str,
        display_name: &str,
        password_hash: &str,
        is_chef: bool,
        is_admin: bool,
    ) -> SeedResult<String> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r"
            INSERT INTO users (id, email, display_name, password_hash, is_chef, is_admin, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(email) DO UPDATE SET
                display_name = excluded.display_name,
                password_hash = excluded.password_hash,
                is_chef = excluded.is_chef,
                is_admin = excluded.is_admin,
                updated_at = excluded.updated_at
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(email)
        .bind(display_name)
        .bind(password_hash)
        .bind(i32::from(is_chef))
        .bind(i32::from(is_admin))
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        let row = sqlx::query("SELECT id FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("id"))
    }

    /// Replace a user's profile and address collection wholesale.
    ///
    /// Delete and re-insert run in one transaction so readers never observe a
    /// partially cleared collection.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement in the transaction fails.
    pub async fn replace_user_details(
        &self,
        user_id: &str,
        profile: Option<ProfileUpdate<'_>>,
        addresses: &[AddressUpdate<'_>],
    ) -> SeedResult<()> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM user_profiles WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM user_addresses WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        if let Some(profile) = profile {
            sqlx::query(
                "INSERT INTO user_profiles (user_id, bio, phone, avatar_url, updated_at) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(user_id)
            .bind(profile.bio)
            .bind(profile.phone)
            .bind(profile.avatar_url)
            .bind(&now)
            .execute(&mut *tx)
            .await?;
        }

        for address in addresses {
            sqlx::query(
                "INSERT INTO user_addresses (id, user_id, label, street, city, postal_code, is_default) \
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(user_id)
            .bind(address.label)
            .bind(address.street)
            .bind(address.city)
            .bind(address.postal_code)
            .bind(i32::from(address.is_default))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Create or update a cook profile keyed by user id. Returns the cook id.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn upsert_cook_profile(
        &self,
        user_id: &str,
        kitchen_name: &str,
        speciality: &str,
        rating: f64,
        delivery_fee_cents: i64,
    ) -> SeedResult<String> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r"
            INSERT INTO cook_profiles (id, user_id, kitchen_name, speciality, rating, delivery_fee_cents, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET
                kitchen_name = excluded.kitchen_name,
                speciality = excluded.speciality,
                rating = excluded.rating,
                delivery_fee_cents = excluded.delivery_fee_cents,
                updated_at = excluded.updated_at
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_id)
        .bind(kitchen_name)
        .bind(speciality)
        .bind(rating)
        .bind(delivery_fee_cents)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        let row = sqlx::query("SELECT id FROM cook_profiles WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("id"))
    }

    /// Write the per-run online-status snapshot for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn update_presence(
        &self,
        user_id: &str,
        status: OnlineStatus,
        last_seen: DateTime<Utc>,
        platform: Platform,
    ) -> SeedResult<()> {
        sqlx::query(
            "UPDATE users SET online_status = ?, last_seen_at = ?, last_platform = ? WHERE id = ?",
        )
        .bind(status.as_str())
        .bind(last_seen.to_rfc3339())
        .bind(platform.as_str())
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Look up a user by email. Absence is a normal outcome.
    ///
    /// # Errors
    ///
    /// Returns an error only if the query itself fails.
    pub async fn find_user_by_email(&self, email: &str) -> SeedResult<Option<ResolvedUser>> {
        let row = sqlx::query(
            r"
            SELECT u.id, u.email, u.is_chef, u.is_admin, c.id AS cook_id
            FROM users u
            LEFT JOIN cook_profiles c ON c.user_id = u.id
            WHERE u.email = ?
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| ResolvedUser {
            id: row.get("id"),
            email: row.get("email"),
            is_chef: row.get::<i64, _>("is_chef") != 0,
            is_admin: row.get::<i64, _>("is_admin") != 0,
            cook_id: row.get("cook_id"),
        }))
    }

    /// List users that are neither chefs nor admins, in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_customers(&self) -> SeedResult<Vec<ResolvedUser>> {
        let rows = sqlx::query(
            r"
            SELECT u.id, u.email, u.is_chef, u.is_admin, c.id AS cook_id
            FROM users u
            LEFT JOIN cook_profiles c ON c.user_id = u.id
            WHERE u.is_chef = 0 AND u.is_admin = 0
            ORDER BY u.created_at, u.email
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ResolvedUser {
                id: row.get("id"),
                email: row.get("email"),
                is_chef: row.get::<i64, _>("is_chef") != 0,
                is_admin: row.get::<i64, _>("is_admin") != 0,
                cook_id: row.get("cook_id"),
            })
            .collect())
    }
}
