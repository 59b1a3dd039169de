// ABOUTME: Demo data seeder binary for the Savora food-delivery platform
// ABOUTME: Connects, migrates, runs the seeding pipeline, and prints a per-table summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

//! Demo data seeder for Savora.
//!
//! This binary populates the database with a referentially-consistent demo
//! dataset for development and testing.
//!
//! Usage:
//! ```bash
//! # Seed with default settings (sqlite:./data/savora.db)
//! cargo run --bin seed-demo-data
//!
//! # Override the database URL
//! cargo run --bin seed-demo-data -- --database-url sqlite:./data/dev.db
//!
//! # Reset generated data (carts, favorites, notifications, messages) first
//! cargo run --bin seed-demo-data -- --reset
//!
//! # Reproducible run
//! cargo run --bin seed-demo-data -- --seed 42
//!
//! # Verbose output
//! cargo run --bin seed-demo-data -- -v
//! ```

use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use savora_seeder::database::Database;
use savora_seeder::pipeline;

#[derive(Parser)]
#[command(
    name = "seed-demo-data",
    about = "Savora Demo Data Seeder",
    long_about = "Populate the Savora database with a referentially-consistent demo dataset"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Reset generated data (carts, favorites, notifications, messages) before seeding
    #[arg(long)]
    reset: bool,

    /// Random seed for reproducible data (optional)
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    // Initialize logging; RUST_LOG takes precedence over the verbosity flag
    let fallback = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .init();

    info!("=== Savora Demo Data Seeder ===");

    // Load database URL: flag > environment > default
    let database_url = args
        .database_url
        .clone()
        .or_else(|| env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "sqlite:./data/savora.db".into());

    info!("Connecting to database: {}", database_url);
    let db = Database::new(&database_url).await?;

    // The pool is released on every exit path below
    let verdict = seed(&db, &args).await;

    db.close().await;

    verdict
}

/// Run the pipeline against an open database, always printing the tally.
async fn seed(db: &Database, args: &SeedArgs) -> Result<()> {
    if args.reset {
        info!("Resetting generated data...");
        if let Err(err) = db.reset_derived_data().await {
            warn!("reset failed, continuing with existing rows: {err}");
        }
    }

    // Log the seed so any run can be replayed with --seed
    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(12345)
    });
    info!("Random seed: {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let report = pipeline::run(db, &mut rng).await;

    // The tally is printed even when a phase failed. The summary is purely
    // observational: only a phase-level failure changes the verdict.
    info!("");
    info!("=== Seeding Complete ===");
    report.log_summary();
    match db.table_counts().await {
        Ok(counts) => {
            for (label, count) in counts {
                info!("{}: {}", label, count);
            }
        }
        Err(err) => warn!("table count summary failed: {err}"),
    }

    match report.fatal {
        None => Ok(()),
        Some(fatal) => Err(fatal.into()),
    }
}
