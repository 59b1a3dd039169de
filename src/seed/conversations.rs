// ABOUTME: Conversation and message seeding phase
// ABOUTME: Skips a conversation unless every participant resolves; messages skip on unresolved endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

use chrono::{Duration, Utc};
use tracing::{info, warn};

use super::RecordOutcome;
use crate::database::Database;
use crate::errors::SeedResult;
use crate::models::ResolvedUser;
use crate::report::PhaseOutcome;
use crate::resolver::Resolver;

/// Demo conversation definition with its message transcript.
struct ConversationFixture {
    topic: &'static str,
    participants: &'static [&'static str],
    /// (sender email, receiver email, body), oldest first.
    messages: &'static [(&'static str, &'static str, &'static str)],
}

const CONVERSATIONS: &[ConversationFixture] = &[
    ConversationFixture {
        topic: "Order ORD-1001 delivery",
        participants: &["lena@example.com", "marco@trattoriaroma.it"],
        messages: &[
            (
                "lena@example.com",
                "marco@trattoriaroma.it",
                "Could you ring the top bell? The street door is open.",
            ),
            (
                "marco@trattoriaroma.it",
                "lena@example.com",
                "Of course, the courier is five minutes away.",
            ),
            (
                "lena@example.com",
                "marco@trattoriaroma.it",
                "Arrived, thank you! The pizza is wonderful.",
            ),
        ],
    },
    ConversationFixture {
        topic: "Catering inquiry",
        participants: &["david@example.com", "amira@beirutbites.com"],
        messages: &[
            (
                "david@example.com",
                "amira@beirutbites.com",
                "Do you cater office lunches for around 20 people?",
            ),
            (
                "amira@beirutbites.com",
                "david@example.com",
                "We do! Mezze platters work best for groups, I'll send a menu.",
            ),
        ],
    },
    // One participant never resolves, so the whole conversation is skipped.
    ConversationFixture {
        topic: "Account question",
        participants: &["ghost@example.com", "admin@savora.app"],
        messages: &[(
            "ghost@example.com",
            "admin@savora.app",
            "I can't log in to my account.",
        )],
    },
];

/// Seed all demo conversations and their messages.
///
/// # Errors
///
/// Returns an error only for failures outside the per-record boundary.
pub async fn run(db: &Database) -> SeedResult<PhaseOutcome> {
    let resolver = Resolver::new(db);
    let mut outcome = PhaseOutcome::default();

    for fixture in CONVERSATIONS {
        match seed_conversation(db, &resolver, fixture).await {
            Ok(RecordOutcome::Seeded) => {
                info!("  conversation '{}' seeded", fixture.topic);
                outcome.success += 1;
            }
            Ok(RecordOutcome::Skipped) => outcome.skipped += 1,
            Err(err) => {
                warn!("  conversation '{}' failed: {err}", fixture.topic);
                outcome.failed += 1;
            }
        }
    }

    Ok(outcome)
}

async fn seed_conversation(
    db: &Database,
    resolver: &Resolver<'_>,
    fixture: &ConversationFixture,
) -> SeedResult<RecordOutcome> {
    let participants = resolver.users(fixture.participants).await?;
    if participants.len() != fixture.participants.len() {
        warn!(
            "  conversation '{}' skipped: {}/{} participants resolved",
            fixture.topic,
            participants.len(),
            fixture.participants.len()
        );
        return Ok(RecordOutcome::Skipped);
    }

    let participant_ids: Vec<String> = participants.iter().map(|user| user.id.clone()).collect();
    let conversation_id = db
        .create_conversation(fixture.topic, &participant_ids)
        .await?;

    // Space messages a minute apart so transcripts read in order
    let base = Utc::now() - Duration::minutes(fixture.messages.len() as i64);
    for (index, (sender_email, receiver_email, body)) in fixture.messages.iter().enumerate() {
        let (Some(sender), Some(receiver)) = (
            find_participant(&participants, sender_email),
            find_participant(&participants, receiver_email),
        ) else {
            warn!(
                "  conversation '{}': message {} skipped, endpoint not resolved",
                fixture.topic, index
            );
            continue;
        };

        db.create_message(
            &conversation_id,
            &sender.id,
            &receiver.id,
            body,
            base + Duration::minutes(index as i64),
        )
        .await?;
    }

    Ok(RecordOutcome::Seeded)
}

fn find_participant<'a>(participants: &'a [ResolvedUser], email: &str) -> Option<&'a ResolvedUser> {
    participants.iter().find(|user| user.email == email)
}
