//! Mock game store for testing.

use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use chrono::Utc;

use crate::catalog::{GameDraft, GameFilter, GameRecord, GameStore, StoreError};

/// In-memory implementation of the [`GameStore`] trait.
///
/// Provides controllable behavior for testing:
/// - Mirrors the SQLite store's semantics (unique `store_id`, insertion
///   order, case-sensitive name matching)
/// - Can be armed to fail the next store call, to exercise error paths
pub struct MockGameStore {
    games: Mutex<Vec<GameRecord>>,
    next_id: AtomicI64,
    fail_next: Mutex<Option<String>>,
}

impl Default for MockGameStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGameStore {
    /// Create an empty mock store.
    pub fn new() -> Self {
        Self {
            games: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            fail_next: Mutex::new(None),
        }
    }

    /// Arm the store so its next operation fails with a database error.
    pub fn fail_next(&self, message: &str) {
        *self.fail_next.lock().unwrap() = Some(message.to_string());
    }

    fn check_fail(&self) -> Result<(), StoreError> {
        if let Some(message) = self.fail_next.lock().unwrap().take() {
            return Err(StoreError::Database(message));
        }
        Ok(())
    }

    fn build_record(&self, draft: &GameDraft) -> GameRecord {
        let now = Utc::now();
        GameRecord {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            publisher_id: draft.publisher_id.clone(),
            name: draft.name.clone(),
            platform: draft.platform.clone(),
            store_id: draft.store_id.clone(),
            bundle_id: draft.bundle_id.clone(),
            app_version: draft.app_version.clone(),
            is_published: draft.is_published,
            created_at: now,
            updated_at: now,
        }
    }
}

impl GameStore for MockGameStore {
    fn list(&self) -> Result<Vec<GameRecord>, StoreError> {
        self.check_fail()?;
        Ok(self.games.lock().unwrap().clone())
    }

    fn get(&self, id: i64) -> Result<GameRecord, StoreError> {
        self.check_fail()?;
        self.games
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn create(&self, draft: &GameDraft) -> Result<GameRecord, StoreError> {
        self.check_fail()?;
        let mut games = self.games.lock().unwrap();
        if games.iter().any(|g| g.store_id == draft.store_id) {
            return Err(StoreError::Conflict(format!(
                "store_id already exists: {}",
                draft.store_id
            )));
        }
        let record = self.build_record(draft);
        games.push(record.clone());
        Ok(record)
    }

    fn update(&self, id: i64, draft: &GameDraft) -> Result<GameRecord, StoreError> {
        self.check_fail()?;
        let mut games = self.games.lock().unwrap();
        let game = games
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(StoreError::NotFound(id))?;
        game.publisher_id = draft.publisher_id.clone();
        game.name = draft.name.clone();
        game.platform = draft.platform.clone();
        game.store_id = draft.store_id.clone();
        game.bundle_id = draft.bundle_id.clone();
        game.app_version = draft.app_version.clone();
        game.is_published = draft.is_published;
        game.updated_at = Utc::now();
        Ok(game.clone())
    }

    fn delete(&self, id: i64) -> Result<(), StoreError> {
        self.check_fail()?;
        let mut games = self.games.lock().unwrap();
        let before = games.len();
        games.retain(|g| g.id != id);
        if games.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn search(&self, filter: &GameFilter) -> Result<Vec<GameRecord>, StoreError> {
        self.check_fail()?;
        let games = self.games.lock().unwrap();
        Ok(games
            .iter()
            .filter(|g| {
                filter
                    .name
                    .as_ref()
                    .is_none_or(|name| g.name.contains(name.as_str()))
            })
            .filter(|g| {
                filter
                    .platform
                    .as_ref()
                    .is_none_or(|platform| &g.platform == platform)
            })
            .cloned()
            .collect())
    }

    fn existing_store_ids(&self, store_ids: &[String]) -> Result<HashSet<String>, StoreError> {
        self.check_fail()?;
        let games = self.games.lock().unwrap();
        Ok(games
            .iter()
            .filter(|g| store_ids.contains(&g.store_id))
            .map(|g| g.store_id.clone())
            .collect())
    }

    fn insert_many(&self, drafts: &[GameDraft]) -> Result<Vec<GameRecord>, StoreError> {
        self.check_fail()?;
        let mut games = self.games.lock().unwrap();

        // All-or-nothing, like the SQLite transaction.
        let mut batch_ids: HashSet<&str> = HashSet::new();
        for draft in drafts {
            let clashes = games.iter().any(|g| g.store_id == draft.store_id)
                || !batch_ids.insert(draft.store_id.as_str());
            if clashes {
                return Err(StoreError::Conflict(format!(
                    "store_id already exists: {}",
                    draft.store_id
                )));
            }
        }

        let mut created = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let record = self.build_record(draft);
            games.push(record.clone());
            created.push(record);
        }
        Ok(created)
    }

    fn count(&self) -> Result<u64, StoreError> {
        self.check_fail()?;
        Ok(self.games.lock().unwrap().len() as u64)
    }
}
