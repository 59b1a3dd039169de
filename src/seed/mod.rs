// ABOUTME: Per-entity seeders consuming literal datasets
// ABOUTME: Each module resolves references by natural key, upserts idempotently, and counts outcomes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

//! Per-entity seeders.
//!
//! Each submodule owns one phase: a literal fixture dataset plus a `run`
//! function that processes the records one at a time. A record with a missing
//! required reference is skipped with a warning; a record whose write fails is
//! counted as failed; neither aborts the phase.

pub mod carts;
pub mod categories;
pub mod conversations;
pub mod dishes;
pub mod food_types;
pub mod notifications;
pub mod orders;
pub mod subscriptions;
pub mod users;

/// Default password for all demo users - allows login for testing.
/// Password: `SavoraDemo123!`
pub const DEMO_USER_PASSWORD: &str = "SavoraDemo123!";

/// Outcome of processing one fixture record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RecordOutcome {
    /// The record was created or updated.
    Seeded,
    /// A required reference did not resolve (or the record already converged).
    Skipped,
}
