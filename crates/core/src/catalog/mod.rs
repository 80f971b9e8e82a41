//! Game catalog - persistent storage for published mobile games.
//!
//! The catalog is the single source of state in the service: records are
//! created one at a time through the API or in bulk by the populator, and
//! queried through composable filters.

mod sqlite;
mod types;

pub use sqlite::SqliteGameStore;
pub use types::*;

use std::collections::HashSet;

/// Trait for game catalog storage.
pub trait GameStore: Send + Sync {
    /// List every record in insertion order.
    fn list(&self) -> Result<Vec<GameRecord>, StoreError>;

    /// Get a record by id.
    fn get(&self, id: i64) -> Result<GameRecord, StoreError>;

    /// Insert a single record.
    ///
    /// Fails with [`StoreError::Conflict`] when the draft's `store_id`
    /// already exists.
    fn create(&self, draft: &GameDraft) -> Result<GameRecord, StoreError>;

    /// Fully replace a record's fields. The id and `created_at` are kept.
    fn update(&self, id: i64, draft: &GameDraft) -> Result<GameRecord, StoreError>;

    /// Hard-delete a record. No tombstone is retained.
    fn delete(&self, id: i64) -> Result<(), StoreError>;

    /// Find records matching the filter.
    ///
    /// Name matches are case-sensitive substring, platform matches are
    /// exact, and both criteria apply conjunctively. An empty filter
    /// returns everything.
    fn search(&self, filter: &GameFilter) -> Result<Vec<GameRecord>, StoreError>;

    /// Project the subset of the given store ids that already exist.
    ///
    /// An existence check bounded to the candidate set, not a full fetch.
    fn existing_store_ids(&self, store_ids: &[String]) -> Result<HashSet<String>, StoreError>;

    /// Insert a batch of records in a single transaction.
    ///
    /// All-or-nothing: any row failing a constraint rolls back the whole
    /// batch.
    fn insert_many(&self, drafts: &[GameDraft]) -> Result<Vec<GameRecord>, StoreError>;

    /// Total number of records.
    fn count(&self) -> Result<u64, StoreError>;
}
