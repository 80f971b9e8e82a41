//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Catalog mutations (creates, updates, deletes)
//! - Populate runs (results, inserted/skipped candidates)
//! - Searches

use once_cell::sync::Lazy;
use prometheus::{IntCounter, IntCounterVec, Opts};

// =============================================================================
// Catalog Metrics
// =============================================================================

/// Games created through the single-record create operation.
pub static GAMES_CREATED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("gamedex_games_created_total", "Total games created").unwrap()
});

/// Games updated in place.
pub static GAMES_UPDATED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("gamedex_games_updated_total", "Total games updated").unwrap()
});

/// Games hard-deleted.
pub static GAMES_DELETED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("gamedex_games_deleted_total", "Total games deleted").unwrap()
});

/// Search operations executed.
pub static SEARCHES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("gamedex_searches_total", "Total catalog searches").unwrap()
});

// =============================================================================
// Populate Metrics
// =============================================================================

/// Populate runs by result.
pub static POPULATE_RUNS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("gamedex_populate_runs_total", "Total populate runs"),
        &["result"], // "success", "feed_error", "store_error"
    )
    .unwrap()
});

/// Candidates inserted by populate runs.
pub static POPULATE_GAMES_INSERTED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "gamedex_populate_games_inserted_total",
        "Total games inserted by populate runs",
    )
    .unwrap()
});

/// Candidates skipped as duplicates by populate runs.
pub static POPULATE_GAMES_SKIPPED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "gamedex_populate_games_skipped_total",
        "Total feed candidates skipped as duplicates",
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(GAMES_CREATED.clone()),
        Box::new(GAMES_UPDATED.clone()),
        Box::new(GAMES_DELETED.clone()),
        Box::new(SEARCHES_TOTAL.clone()),
        Box::new(POPULATE_RUNS.clone()),
        Box::new(POPULATE_GAMES_INSERTED.clone()),
        Box::new(POPULATE_GAMES_SKIPPED.clone()),
    ]
}
