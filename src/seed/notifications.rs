// ABOUTME: Notification seeding phase
// ABOUTME: Resolves the target user by email and skips with a warning when absent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

use serde::Serialize;
use tracing::{info, warn};

use super::RecordOutcome;
use crate::database::Database;
use crate::errors::SeedResult;
use crate::models::NotificationKind;
use crate::report::PhaseOutcome;
use crate::resolver::Resolver;

/// Structured notification payloads, stored as JSON text in the payload
/// column. Untagged: the kind column carries the type, not the JSON.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
enum NotificationPayload {
    OrderUpdate {
        order_reference: &'static str,
        status: &'static str,
    },
    Promotion {
        code: &'static str,
        percent_off: u32,
    },
    NewDish {
        kitchen: &'static str,
        dish: &'static str,
    },
    System {
        message: &'static str,
    },
}

/// Demo notification definition. The payload is opaque beyond its type tag.
struct NotificationFixture {
    user_email: &'static str,
    kind: NotificationKind,
    payload: NotificationPayload,
}

const NOTIFICATIONS: &[NotificationFixture] = &[
    NotificationFixture {
        user_email: "lena@example.com",
        kind: NotificationKind::OrderUpdate,
        payload: NotificationPayload::OrderUpdate {
            order_reference: "ORD-1001",
            status: "DELIVERED",
        },
    },
    NotificationFixture {
        user_email: "david@example.com",
        kind: NotificationKind::Promotion,
        payload: NotificationPayload::Promotion {
            code: "WELCOME10",
            percent_off: 10,
        },
    },
    NotificationFixture {
        user_email: "sofia@example.com",
        kind: NotificationKind::NewDish,
        payload: NotificationPayload::NewDish {
            kitchen: "Sakura Kitchen",
            dish: "Tonkotsu Ramen",
        },
    },
    // Deliberate dangling reference in the dataset: exercises the
    // skip-not-fail path on every run.
    NotificationFixture {
        user_email: "ghost@example.com",
        kind: NotificationKind::System,
        payload: NotificationPayload::System {
            message: "Welcome back",
        },
    },
    NotificationFixture {
        user_email: "tom@example.com",
        kind: NotificationKind::System,
        payload: NotificationPayload::System {
            message: "Our terms of service were updated",
        },
    },
];

/// Seed all demo notifications.
///
/// # Errors
///
/// Returns an error only for failures outside the per-record boundary.
pub async fn run(db: &Database) -> SeedResult<PhaseOutcome> {
    let resolver = Resolver::new(db);
    let mut outcome = PhaseOutcome::default();

    for fixture in NOTIFICATIONS {
        match seed_notification(db, &resolver, fixture).await {
            Ok(RecordOutcome::Seeded) => {
                info!("  notification for {} seeded", fixture.user_email);
                outcome.success += 1;
            }
            Ok(RecordOutcome::Skipped) => outcome.skipped += 1,
            Err(err) => {
                warn!("  notification for {} failed: {err}", fixture.user_email);
                outcome.failed += 1;
            }
        }
    }

    Ok(outcome)
}

async fn seed_notification(
    db: &Database,
    resolver: &Resolver<'_>,
    fixture: &NotificationFixture,
) -> SeedResult<RecordOutcome> {
    let Some(user) = resolver.user(fixture.user_email).await? else {
        warn!(
            "  notification skipped: user {} not found",
            fixture.user_email
        );
        return Ok(RecordOutcome::Skipped);
    };

    let payload = serde_json::to_string(&fixture.payload)?;
    db.create_notification(&user.id, fixture.kind, &payload)
        .await?;
    Ok(RecordOutcome::Seeded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payloads_serialize_without_a_variant_tag() {
        let json = serde_json::to_string(&NotificationPayload::Promotion {
            code: "WELCOME10",
            percent_off: 10,
        })
        .unwrap();
        assert_eq!(json, r#"{"code":"WELCOME10","percent_off":10}"#);

        let json = serde_json::to_string(&NotificationPayload::OrderUpdate {
            order_reference: "ORD-1001",
            status: "DELIVERED",
        })
        .unwrap();
        assert_eq!(json, r#"{"order_reference":"ORD-1001","status":"DELIVERED"}"#);
    }
}
