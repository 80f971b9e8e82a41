//! Feed loading - parsing external game data sources.
//!
//! Two named JSON sources (one per platform) are read and concatenated
//! into a single candidate sequence for the populator. Parsing happens
//! up front so a malformed source fails the whole run before any store
//! mutation.

mod types;

pub use types::*;

use std::path::Path;

use tracing::debug;

use crate::config::FeedsConfig;

/// Load and parse a single feed source.
pub fn load_feed(path: &Path, name: &str) -> Result<Vec<FeedEntry>, FeedError> {
    let raw = std::fs::read_to_string(path).map_err(|e| FeedError::Unreadable {
        name: name.to_string(),
        source: e,
    })?;

    let document: FeedDocument =
        serde_json::from_str(&raw).map_err(|e| FeedError::Malformed {
            name: name.to_string(),
            detail: e.to_string(),
        })?;

    debug!(feed = name, entries = document.games.len(), "loaded feed");
    Ok(document.games)
}

/// Load both configured feed sources into one ordered candidate sequence.
///
/// The android source's entries precede the ios source's.
pub fn load_catalog_feeds(feeds: &FeedsConfig) -> Result<Vec<FeedEntry>, FeedError> {
    let mut candidates = load_feed(&feeds.android, "android")?;
    candidates.extend(load_feed(&feeds.ios, "ios")?);
    Ok(candidates)
}
