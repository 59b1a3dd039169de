// ABOUTME: Integration tests for natural-key resolution and record isolation
// ABOUTME: Misses resolve to None or a shorter list; dependent seeders skip instead of failing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use tempfile::TempDir;

use savora_seeder::database::Database;
use savora_seeder::resolver::Resolver;
use savora_seeder::seed;

async fn empty_db() -> (TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}/test.db", dir.path().display());
    let db = Database::new(&url).await.unwrap();
    (dir, db)
}

#[tokio::test]
async fn user_lookup_miss_is_none_not_error() {
    let (_dir, db) = empty_db().await;
    let resolver = Resolver::new(&db);

    let missing = resolver.user("nobody@example.com").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn user_without_cook_profile_does_not_resolve_as_cook() {
    let (_dir, db) = empty_db().await;

    let user_id = db
        .upsert_user("plain@example.com", "Plain", "$2b$04$hash", false, false)
        .await
        .unwrap();

    let resolver = Resolver::new(&db);
    assert!(resolver.cook("plain@example.com").await.unwrap().is_none());

    let cook_id = db
        .upsert_cook_profile(&user_id, "Plain Kitchen", "home cooking", 4.5, 250)
        .await
        .unwrap();
    let cook = resolver
        .cook("plain@example.com")
        .await
        .unwrap()
        .expect("cook should resolve after profile exists");
    assert_eq!(cook.user_id, user_id);
    assert_eq!(cook.cook_id, cook_id);
}

#[tokio::test]
async fn multi_user_lookup_returns_only_matches() {
    let (_dir, db) = empty_db().await;
    db.upsert_user("a@example.com", "A", "$2b$04$hash", false, false)
        .await
        .unwrap();

    let resolver = Resolver::new(&db);
    let resolved = resolver
        .users(&["a@example.com", "b@example.com"])
        .await
        .unwrap();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].email, "a@example.com");
}

#[tokio::test]
async fn category_upsert_converges_by_slug() {
    let (_dir, db) = empty_db().await;

    let first = db.upsert_category("italian", "Italian", None).await.unwrap();
    let second = db
        .upsert_category("italian", "Italian Cuisine", None)
        .await
        .unwrap();
    assert_eq!(first, second);

    let resolver = Resolver::new(&db);
    assert_eq!(resolver.category("italian").await.unwrap(), Some(first));
    assert!(resolver.category("martian").await.unwrap().is_none());

    let (name,): (String,) =
        sqlx::query_as("SELECT name FROM categories WHERE slug = 'italian'")
            .fetch_one(db.pool())
            .await
            .unwrap();
    assert_eq!(name, "Italian Cuisine");
}

#[tokio::test]
async fn dependent_phases_skip_everything_on_an_empty_database() {
    let (_dir, db) = empty_db().await;

    // No users exist, so every fixture reference misses; that must surface
    // as skips, never as an error.
    let notifications = seed::notifications::run(&db).await.unwrap();
    assert_eq!(notifications.success, 0);
    assert_eq!(notifications.failed, 0);
    assert_eq!(notifications.skipped, notifications.total());

    let conversations = seed::conversations::run(&db).await.unwrap();
    assert_eq!(conversations.success, 0);
    assert_eq!(conversations.skipped, conversations.total());

    let subscriptions = seed::subscriptions::run(&db).await.unwrap();
    assert_eq!(subscriptions.success, 0);
    assert_eq!(subscriptions.skipped, subscriptions.total());

    let dishes = seed::dishes::run(&db).await.unwrap();
    assert_eq!(dishes.success, 0);
    assert_eq!(dishes.skipped, dishes.total());

    let orders = seed::orders::run(&db).await.unwrap();
    assert_eq!(orders.success, 0);
    assert_eq!(orders.skipped, orders.total());
}
