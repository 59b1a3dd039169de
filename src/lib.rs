// ABOUTME: Library entry point for the Savora demo data seeder
// ABOUTME: Exposes the database layer, natural-key resolver, seeders, and phase orchestrator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

#![deny(unsafe_code)]

//! # Savora Demo Data Seeder
//!
//! Populates the Savora food-delivery schema (users, menu taxonomy, dishes,
//! carts, orders, messaging, subscriptions) with a fixed, hand-authored
//! dataset so a development or test environment starts from a known,
//! referentially-consistent state.
//!
//! ## Design
//!
//! - **Natural keys**: cross-entity references are resolved by email, slug,
//!   or name immediately before each dependent write; surrogate ids never
//!   leak into the datasets.
//! - **Idempotent upserts**: entities with a natural key converge on re-runs
//!   instead of duplicating.
//! - **Record isolation**: a bad record is skipped or counted as failed,
//!   never aborting its phase; only an error escaping a record loop aborts
//!   the run.
//! - **Reproducibility**: all randomness flows through an injected `StdRng`,
//!   so a `--seed` flag replays a run exactly.
//!
//! ## Quick Start
//!
//! ```bash
//! cargo run --bin seed-demo-data -- --database-url sqlite:./data/savora.db
//! ```

pub mod database;
pub mod errors;
pub mod models;
pub mod pipeline;
pub mod random;
pub mod report;
pub mod resolver;
pub mod seed;
