// ABOUTME: Natural-key resolver turning emails, slugs, and names into ownership handles
// ABOUTME: Absence is a normal outcome; callers decide whether a miss is skip-worthy or fatal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

//! Natural-key resolution.
//!
//! Seeders never carry surrogate ids across phases; they resolve each
//! cross-entity reference here, by the human-meaningful key the dataset uses
//! (email, slug, dish name), immediately before the dependent write. A lookup
//! that finds nothing returns `None` (or a shorter list for multi-key
//! lookups) rather than an error.

use crate::database::Database;
use crate::errors::SeedResult;
use crate::models::{ResolvedDish, ResolvedUser};

/// Reference to a user who owns a cook profile.
#[derive(Debug, Clone)]
pub struct ResolvedCook {
    /// The owning user's id.
    pub user_id: String,
    /// The cook-profile id dependents link against.
    pub cook_id: String,
}

/// Resolver over the seeding database.
pub struct Resolver<'a> {
    db: &'a Database,
}

impl<'a> Resolver<'a> {
    /// Create a resolver borrowing the database handle.
    #[must_use]
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Resolve a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error only if the underlying query fails.
    pub async fn user(&self, email: &str) -> SeedResult<Option<ResolvedUser>> {
        self.db.find_user_by_email(email).await
    }

    /// Resolve several users by email, returning only the matches found.
    ///
    /// Callers compare the result length against the request length to detect
    /// partially unresolved sets.
    ///
    /// # Errors
    ///
    /// Returns an error only if an underlying query fails.
    pub async fn users(&self, emails: &[&str]) -> SeedResult<Vec<ResolvedUser>> {
        let mut resolved = Vec::with_capacity(emails.len());
        for email in emails {
            if let Some(user) = self.db.find_user_by_email(email).await? {
                resolved.push(user);
            }
        }
        Ok(resolved)
    }

    /// Resolve a cook by the owning user's email.
    ///
    /// A user without a cook profile resolves to `None`: for dish ownership
    /// purposes such a user is indistinguishable from a missing one.
    ///
    /// # Errors
    ///
    /// Returns an error only if the underlying query fails.
    pub async fn cook(&self, email: &str) -> SeedResult<Option<ResolvedCook>> {
        let user = self.db.find_user_by_email(email).await?;
        Ok(user.and_then(|user| {
            user.cook_id.map(|cook_id| ResolvedCook {
                user_id: user.id,
                cook_id,
            })
        }))
    }

    /// Resolve a category id by slug.
    ///
    /// # Errors
    ///
    /// Returns an error only if the underlying query fails.
    pub async fn category(&self, slug: &str) -> SeedResult<Option<String>> {
        self.db.find_category_by_slug(slug).await
    }

    /// Resolve several category ids by slug, returning only the matches.
    ///
    /// # Errors
    ///
    /// Returns an error only if an underlying query fails.
    pub async fn categories(&self, slugs: &[&str]) -> SeedResult<Vec<String>> {
        let mut resolved = Vec::with_capacity(slugs.len());
        for slug in slugs {
            if let Some(id) = self.db.find_category_by_slug(slug).await? {
                resolved.push(id);
            }
        }
        Ok(resolved)
    }

    /// Resolve several food-type ids by slug, returning only the matches.
    ///
    /// # Errors
    ///
    /// Returns an error only if an underlying query fails.
    pub async fn food_types(&self, slugs: &[&str]) -> SeedResult<Vec<String>> {
        let mut resolved = Vec::with_capacity(slugs.len());
        for slug in slugs {
            if let Some(id) = self.db.find_food_type_by_slug(slug).await? {
                resolved.push(id);
            }
        }
        Ok(resolved)
    }

    /// Resolve a dish by name.
    ///
    /// # Errors
    ///
    /// Returns an error only if the underlying query fails.
    pub async fn dish(&self, name: &str) -> SeedResult<Option<ResolvedDish>> {
        self.db.find_dish_by_name(name).await
    }
}
