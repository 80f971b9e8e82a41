//! Catalog population - idempotent merge of feed data into the store.
//!
//! Candidates are deduplicated by `storeId` against both the existing
//! catalog and earlier entries in the same batch; the first occurrence
//! wins and existing rows are never updated to match newer feed data.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::catalog::{GameDraft, GameStore, StoreError};
use crate::config::FeedsConfig;
use crate::feed::{self, FeedEntry, FeedError};
use crate::metrics::{POPULATE_GAMES_INSERTED, POPULATE_GAMES_SKIPPED, POPULATE_RUNS};

/// Errors for a populate run.
#[derive(Debug, Error)]
pub enum PopulateError {
    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Outcome of a populate run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulateSummary {
    /// Records actually inserted (never an estimate).
    pub inserted: usize,
    /// Candidates skipped as duplicates.
    pub skipped: usize,
}

/// Merges feed candidates into the catalog without creating duplicates.
pub struct Populator {
    store: Arc<dyn GameStore>,
    feeds: FeedsConfig,
}

impl Populator {
    pub fn new(store: Arc<dyn GameStore>, feeds: FeedsConfig) -> Self {
        Self { store, feeds }
    }

    /// Load both feed sources and merge them into the store.
    ///
    /// Feeds are parsed in full before any store mutation, so a malformed
    /// source leaves the catalog untouched. Running repeatedly with the
    /// same feed content inserts the full set once and nothing afterwards.
    pub fn run(&self) -> Result<PopulateSummary, PopulateError> {
        let candidates = match feed::load_catalog_feeds(&self.feeds) {
            Ok(candidates) => candidates,
            Err(e) => {
                POPULATE_RUNS.with_label_values(&["feed_error"]).inc();
                return Err(e.into());
            }
        };

        match self.merge(candidates) {
            Ok(summary) => {
                POPULATE_RUNS.with_label_values(&["success"]).inc();
                Ok(summary)
            }
            Err(e) => {
                POPULATE_RUNS.with_label_values(&["store_error"]).inc();
                Err(e.into())
            }
        }
    }

    /// Merge an already-loaded candidate sequence into the store.
    pub fn merge(&self, candidates: Vec<FeedEntry>) -> Result<PopulateSummary, StoreError> {
        let total = candidates.len();

        let store_ids: Vec<String> = candidates.iter().map(|c| c.store_id.clone()).collect();
        let mut seen = self.store.existing_store_ids(&store_ids)?;

        // First occurrence wins, both against the store and within the batch.
        let mut fresh = Vec::new();
        for candidate in candidates {
            if seen.contains(&candidate.store_id) {
                continue;
            }
            seen.insert(candidate.store_id.clone());

            // Appearing in a feed implies the game is published.
            fresh.push(GameDraft {
                publisher_id: candidate.publisher_id,
                name: candidate.name,
                platform: candidate.platform,
                store_id: candidate.store_id,
                bundle_id: candidate.bundle_id,
                app_version: candidate.app_version,
                is_published: true,
            });
        }

        let skipped = total - fresh.len();
        let inserted = if fresh.is_empty() {
            0
        } else {
            self.store.insert_many(&fresh)?.len()
        };

        POPULATE_GAMES_INSERTED.inc_by(inserted as u64);
        POPULATE_GAMES_SKIPPED.inc_by(skipped as u64);
        info!(candidates = total, inserted, skipped, "catalog populate finished");

        Ok(PopulateSummary { inserted, skipped })
    }
}
