// ABOUTME: Error taxonomy for the Savora demo data seeder
// ABOUTME: Separates fatal phase errors from record-level failures that are counted, not raised
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

//! Seeder error types.
//!
//! Record-level problems (an unresolved reference, a single failed write) are
//! handled inside the seeders by counting and continuing; only errors that
//! escape a record loop become a [`SeedError::Phase`] and abort the run.

use thiserror::Error;

/// Errors produced by the seeding pipeline.
#[derive(Error, Debug)]
pub enum SeedError {
    /// Underlying store operation failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing failed while preparing a user record.
    #[error("password hashing failed: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// A structured payload could not be serialized.
    #[error("payload serialization failed: {0}")]
    Payload(#[from] serde_json::Error),

    /// A whole phase failed; the orchestrator aborts the remaining phases.
    #[error("phase '{phase}' failed: {source}")]
    Phase {
        /// Name of the phase that failed.
        phase: &'static str,
        /// The error that escaped the phase's record loop.
        #[source]
        source: Box<SeedError>,
    },
}

impl SeedError {
    /// Wrap an error as a fatal failure of the named phase.
    #[must_use]
    pub fn in_phase(self, phase: &'static str) -> Self {
        Self::Phase {
            phase,
            source: Box::new(self),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type SeedResult<T> = Result<T, SeedError>;
