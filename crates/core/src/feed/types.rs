//! Types for external game data feeds.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level shape of a feed source: a container with a `games` sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedDocument {
    pub games: Vec<FeedEntry>,
}

/// A candidate game descriptor from an external feed.
///
/// Carries the catalog field set minus the store-assigned id; the
/// publication flag is decided by the populator, not the feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedEntry {
    pub name: String,
    pub platform: String,
    pub publisher_id: String,
    pub store_id: String,
    pub bundle_id: String,
    pub app_version: String,
}

/// Errors for feed loading.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read feed '{name}': {source}")]
    Unreadable {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed feed '{name}': {detail}")]
    Malformed { name: String, detail: String },
}
