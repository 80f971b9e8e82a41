//! SQLite-backed game catalog implementation.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use super::{GameDraft, GameFilter, GameRecord, GameStore, StoreError};

const GAME_COLUMNS: &str =
    "id, publisher_id, name, platform, store_id, bundle_id, app_version, is_published, \
     created_at, updated_at";

/// SQLite-backed game catalog.
pub struct SqliteGameStore {
    conn: Mutex<Connection>,
}

impl SqliteGameStore {
    /// Create a new SQLite store, creating the database file and tables if needed.
    pub fn new(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|e| StoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite store (useful for testing).
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn =
            Connection::open_in_memory().map_err(|e| StoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            r#"
            -- Name search is pinned to case-sensitive substring matching.
            PRAGMA case_sensitive_like = ON;

            CREATE TABLE IF NOT EXISTS games (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                publisher_id TEXT NOT NULL,
                name TEXT NOT NULL,
                platform TEXT NOT NULL,
                store_id TEXT NOT NULL UNIQUE,
                bundle_id TEXT NOT NULL,
                app_version TEXT NOT NULL,
                is_published INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_games_name ON games(name);
            CREATE INDEX IF NOT EXISTS idx_games_platform ON games(platform);
            "#,
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    /// Convert a row to a GameRecord.
    fn row_to_game(row: &rusqlite::Row) -> rusqlite::Result<GameRecord> {
        let created_str: String = row.get(8)?;
        let updated_str: String = row.get(9)?;

        let created_at = DateTime::parse_from_rfc3339(&created_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        let updated_at = DateTime::parse_from_rfc3339(&updated_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Ok(GameRecord {
            id: row.get(0)?,
            publisher_id: row.get(1)?,
            name: row.get(2)?,
            platform: row.get(3)?,
            store_id: row.get(4)?,
            bundle_id: row.get(5)?,
            app_version: row.get(6)?,
            is_published: row.get(7)?,
            created_at,
            updated_at,
        })
    }

    fn fetch(conn: &Connection, id: i64) -> Result<GameRecord, StoreError> {
        conn.query_row(
            &format!("SELECT {} FROM games WHERE id = ?", GAME_COLUMNS),
            params![id],
            Self::row_to_game,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound(id),
            _ => StoreError::Database(e.to_string()),
        })
    }

    /// Map an insert failure, distinguishing uniqueness violations.
    fn map_write_err(e: rusqlite::Error) -> StoreError {
        match &e {
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                StoreError::Conflict(e.to_string())
            }
            _ => StoreError::Database(e.to_string()),
        }
    }
}

impl GameStore for SqliteGameStore {
    fn list(&self) -> Result<Vec<GameRecord>, StoreError> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn
            .prepare(&format!("SELECT {} FROM games ORDER BY id", GAME_COLUMNS))
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let rows = stmt
            .query_map([], Self::row_to_game)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut games = Vec::new();
        for row in rows {
            games.push(row.map_err(|e| StoreError::Database(e.to_string()))?);
        }
        Ok(games)
    }

    fn get(&self, id: i64) -> Result<GameRecord, StoreError> {
        let conn = self.conn.lock().unwrap();
        Self::fetch(&conn, id)
    }

    fn create(&self, draft: &GameDraft) -> Result<GameRecord, StoreError> {
        let conn = self.conn.lock().unwrap();
        let now = Utc::now();
        let now_str = now.to_rfc3339();

        conn.execute(
            "INSERT INTO games (publisher_id, name, platform, store_id, bundle_id, app_version, is_published, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                &draft.publisher_id,
                &draft.name,
                &draft.platform,
                &draft.store_id,
                &draft.bundle_id,
                &draft.app_version,
                draft.is_published,
                &now_str,
                &now_str,
            ],
        )
        .map_err(Self::map_write_err)?;

        Self::fetch(&conn, conn.last_insert_rowid())
    }

    fn update(&self, id: i64, draft: &GameDraft) -> Result<GameRecord, StoreError> {
        let conn = self.conn.lock().unwrap();
        let now_str = Utc::now().to_rfc3339();

        let rows_affected = conn
            .execute(
                "UPDATE games SET publisher_id = ?, name = ?, platform = ?, store_id = ?, bundle_id = ?, app_version = ?, is_published = ?, updated_at = ?
                 WHERE id = ?",
                params![
                    &draft.publisher_id,
                    &draft.name,
                    &draft.platform,
                    &draft.store_id,
                    &draft.bundle_id,
                    &draft.app_version,
                    draft.is_published,
                    &now_str,
                    id,
                ],
            )
            .map_err(Self::map_write_err)?;

        if rows_affected == 0 {
            return Err(StoreError::NotFound(id));
        }

        Self::fetch(&conn, id)
    }

    fn delete(&self, id: i64) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();

        let rows_affected = conn
            .execute("DELETE FROM games WHERE id = ?", params![id])
            .map_err(|e| StoreError::Database(e.to_string()))?;

        if rows_affected == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(())
    }

    fn search(&self, filter: &GameFilter) -> Result<Vec<GameRecord>, StoreError> {
        let conn = self.conn.lock().unwrap();

        let mut clauses = Vec::new();
        let mut args: Vec<String> = Vec::new();

        if let Some(name) = &filter.name {
            clauses.push("name LIKE ?");
            args.push(format!("%{}%", name));
        }
        if let Some(platform) = &filter.platform {
            clauses.push("platform = ?");
            args.push(platform.clone());
        }

        let mut sql = format!("SELECT {} FROM games", GAME_COLUMNS);
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY id");

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let rows = stmt
            .query_map(rusqlite::params_from_iter(args.iter()), Self::row_to_game)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut games = Vec::new();
        for row in rows {
            games.push(row.map_err(|e| StoreError::Database(e.to_string()))?);
        }
        Ok(games)
    }

    fn existing_store_ids(&self, store_ids: &[String]) -> Result<HashSet<String>, StoreError> {
        if store_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let conn = self.conn.lock().unwrap();

        let placeholders = vec!["?"; store_ids.len()].join(", ");
        let sql = format!(
            "SELECT store_id FROM games WHERE store_id IN ({})",
            placeholders
        );

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let rows = stmt
            .query_map(rusqlite::params_from_iter(store_ids.iter()), |row| {
                row.get::<_, String>(0)
            })
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut existing = HashSet::new();
        for row in rows {
            existing.insert(row.map_err(|e| StoreError::Database(e.to_string()))?);
        }
        Ok(existing)
    }

    fn insert_many(&self, drafts: &[GameDraft]) -> Result<Vec<GameRecord>, StoreError> {
        let mut conn = self.conn.lock().unwrap();
        let now = Utc::now();
        let now_str = now.to_rfc3339();

        let tx = conn
            .transaction()
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut created = Vec::with_capacity(drafts.len());
        for draft in drafts {
            tx.execute(
                "INSERT INTO games (publisher_id, name, platform, store_id, bundle_id, app_version, is_published, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    &draft.publisher_id,
                    &draft.name,
                    &draft.platform,
                    &draft.store_id,
                    &draft.bundle_id,
                    &draft.app_version,
                    draft.is_published,
                    &now_str,
                    &now_str,
                ],
            )
            .map_err(Self::map_write_err)?;

            created.push(GameRecord {
                id: tx.last_insert_rowid(),
                publisher_id: draft.publisher_id.clone(),
                name: draft.name.clone(),
                platform: draft.platform.clone(),
                store_id: draft.store_id.clone(),
                bundle_id: draft.bundle_id.clone(),
                app_version: draft.app_version.clone(),
                is_published: draft.is_published,
                created_at: now,
                updated_at: now,
            });
        }

        tx.commit()
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(created)
    }

    fn count(&self) -> Result<u64, StoreError> {
        let conn = self.conn.lock().unwrap();

        conn.query_row("SELECT COUNT(*) FROM games", [], |row| row.get(0))
            .map_err(|e| StoreError::Database(e.to_string()))
    }
}
