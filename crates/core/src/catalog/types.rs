//! Types for the game catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A persisted catalog entry for a published mobile game.
///
/// Field names serialize in camelCase because the feed files and the
/// public API contract use that convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    /// Store-assigned identifier (SQLite rowid, monotonic).
    pub id: i64,
    /// Opaque publisher identifier.
    pub publisher_id: String,
    /// Display name.
    pub name: String,
    /// Platform category, e.g. "ios" or "android".
    pub platform: String,
    /// Marketplace listing identifier; the natural dedup key.
    pub store_id: String,
    /// App bundle/package identifier.
    pub bundle_id: String,
    /// Version string (semantic or free-form).
    pub app_version: String,
    /// Whether the game is currently published.
    pub is_published: bool,
    /// When the record was first persisted.
    pub created_at: DateTime<Utc>,
    /// When the record was last modified.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or fully replacing a game record.
///
/// Carries everything a [`GameRecord`] has except the store-assigned id
/// and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDraft {
    pub publisher_id: String,
    pub name: String,
    pub platform: String,
    pub store_id: String,
    pub bundle_id: String,
    pub app_version: String,
    #[serde(default)]
    pub is_published: bool,
}

impl GameDraft {
    /// Check that every required field is non-empty.
    ///
    /// Runs before any store call so malformed input never reaches the
    /// database.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("publisherId", &self.publisher_id),
            ("name", &self.name),
            ("platform", &self.platform),
            ("storeId", &self.store_id),
            ("bundleId", &self.bundle_id),
            ("appVersion", &self.app_version),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::EmptyField(field));
            }
        }
        Ok(())
    }
}

/// Filter for searching the catalog.
///
/// Criteria compose conjunctively; an empty filter matches all records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameFilter {
    /// Case-sensitive substring match against the name.
    pub name: Option<String>,
    /// Exact platform match.
    pub platform: Option<String>,
}

impl GameFilter {
    /// Create an empty filter (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the name to contain the given substring.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Require an exact platform match.
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    /// Whether any criterion is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.platform.is_none()
    }
}

/// Errors for catalog storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Game not found: {0}")]
    NotFound(i64),

    #[error("Constraint violation: {0}")]
    Conflict(String),
}

/// Rejected input on create/update, raised before any store call.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("required field is empty: {0}")]
    EmptyField(&'static str),
}
