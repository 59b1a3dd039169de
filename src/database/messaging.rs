// ABOUTME: Notification, conversation, and message database operations
// ABOUTME: Plain creates; notification payloads are stored as opaque JSON with a type tag column
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::Database;
use crate::errors::SeedResult;
use crate::models::NotificationKind;

impl Database {
    /// Create notification, conversation, participant, and message tables.
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails.
    pub(super) async fn migrate_messaging(&self) -> SeedResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS notifications (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                kind TEXT NOT NULL,
                payload TEXT NOT NULL,
                is_read BOOLEAN NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS conversations (
                id TEXT PRIMARY KEY,
                topic TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS conversation_participants (
                conversation_id TEXT NOT NULL REFERENCES conversations(id) ON DELETE CASCADE,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                UNIQUE(conversation_id, user_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS messages (
                id TEXT PRIMARY KEY,
                conversation_id TEXT NOT NULL REFERENCES conversations(id) ON DELETE CASCADE,
                sender_id TEXT NOT NULL REFERENCES users(id),
                receiver_id TEXT NOT NULL REFERENCES users(id),
                body TEXT NOT NULL,
                sent_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_notifications_user ON notifications(user_id)")
            .execute(&self.pool)
            .await?;
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_messages_conversation ON messages(conversation_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create a notification for a resolved user.
    ///
    /// The payload is opaque to the seeder beyond its type tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_notification(
        &self,
        user_id: &str,
        kind: NotificationKind,
        payload_json: &str,
    ) -> SeedResult<()> {
        sqlx::query(
            "INSERT INTO notifications (id, user_id, kind, payload, is_read, created_at) \
             VALUES (?, ?, ?, ?, 0, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_id)
        .bind(kind.as_str())
        .bind(payload_json)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Create a conversation with its participant rows in one transaction.
    /// Returns the conversation id.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement in the transaction fails.
    pub async fn create_conversation(
        &self,
        topic: &str,
        participant_ids: &[String],
    ) -> SeedResult<String> {
        let conversation_id = Uuid::new_v4().to_string();
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO conversations (id, topic, created_at) VALUES (?, ?, ?)")
            .bind(&conversation_id)
            .bind(topic)
            .bind(Utc::now().to_rfc3339())
            .execute(&mut *tx)
            .await?;

        for user_id in participant_ids {
            sqlx::query(
                "INSERT INTO conversation_participants (conversation_id, user_id) VALUES (?, ?)",
            )
            .bind(&conversation_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(conversation_id)
    }

    /// Append a message to a conversation.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_message(
        &self,
        conversation_id: &str,
        sender_id: &str,
        receiver_id: &str,
        body: &str,
        sent_at: DateTime<Utc>,
    ) -> SeedResult<()> {
        sqlx::query(
            "INSERT INTO messages (id, conversation_id, sender_id, receiver_id, body, sent_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(conversation_id)
        .bind(sender_id)
        .bind(receiver_id)
        .bind(body)
        .bind(sent_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
