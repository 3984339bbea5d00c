//! SQLite-backed brochure store.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::schema::SCHEMA_SQL;
use crate::types::*;
use flipbook_core::{Error, Result};

/// SQLite store holding one row per brochure.
pub struct BrochureStore {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl BrochureStore {
    /// Open or create the store.
    ///
    /// `db_dir` is the directory (e.g., `data/db/`). The file will be `db_dir/flipbook.db`.
    pub fn open(db_dir: impl AsRef<Path>) -> Result<Self> {
        let db_dir = db_dir.as_ref();
        std::fs::create_dir_all(db_dir)?;
        let db_path = db_dir.join("flipbook.db");

        let conn = Self::create_connection(&db_path)?;
        Self::init_schema(&conn)?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path,
        };

        info!(
            "BrochureStore initialized: {} brochures, path={}",
            store.count()?,
            store.db_path.display()
        );

        Ok(store)
    }

    fn create_connection(db_path: &Path) -> Result<Connection> {
        let conn = Connection::open(db_path).map_err(|e| Error::Database(e.to_string()))?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(|e| Error::Database(e.to_string()))?;
        Ok(conn)
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| Error::Database(format!("Schema init failed: {}", e)))?;
        Ok(())
    }

    // ---------------------------------------------------------------
    // Brochure CRUD
    // ---------------------------------------------------------------

    /// Insert a brochure under a fresh UUID. Title and description are trimmed.
    pub fn create_brochure(&self, new: NewBrochure) -> Result<BrochureRecord> {
        let title = new.title.trim().to_string();
        if title.is_empty() {
            return Err(Error::InvalidRequest("title is required".into()));
        }

        let now = chrono::Utc::now().timestamp_millis();
        let record = BrochureRecord {
            id: uuid::Uuid::new_v4().to_string(),
            owner_id: new.owner_id,
            title,
            description: new.description.trim().to_string(),
            image_urls: new.image_urls.iter().map(|u| u.trim().to_string()).collect(),
            ai_response: new.ai_response,
            created_at: now,
            updated_at: now,
        };

        let urls_json = serde_json::to_string(&record.image_urls)?;
        let ai_json = record
            .ai_response
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let conn = self.conn.lock();
        conn.prepare_cached(
            "INSERT INTO brochures (id, owner_id, title, description, image_urls_json, ai_response_json, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .map_err(|e| Error::Database(e.to_string()))?
        .execute(params![
            record.id,
            record.owner_id,
            record.title,
            record.description,
            urls_json,
            ai_json,
            record.created_at,
            record.updated_at,
        ])
        .map_err(|e| Error::Database(e.to_string()))?;

        debug!("Stored brochure {} for owner {}", record.id, record.owner_id);
        Ok(record)
    }

    /// All brochures of an owner, newest first.
    pub fn list_for_owner(&self, owner_id: &str) -> Result<Vec<BrochureRecord>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached(
                "SELECT * FROM brochures WHERE owner_id = ?1 ORDER BY created_at DESC, rowid DESC",
            )
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map(params![owner_id], |row| Ok(Self::row_to_brochure(row)))
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    /// One brochure, only if it belongs to `owner_id`.
    pub fn get_brochure(&self, owner_id: &str, id: &str) -> Result<Option<BrochureRecord>> {
        let conn = self.conn.lock();
        let row = conn
            .prepare_cached("SELECT * FROM brochures WHERE id = ?1 AND owner_id = ?2")
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![id, owner_id], |row| Ok(Self::row_to_brochure(row)))
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(row)
    }

    /// Delete a brochure owned by `owner_id`. Returns whether a row was removed.
    pub fn delete_brochure(&self, owner_id: &str, id: &str) -> Result<bool> {
        let conn = self.conn.lock();
        let count = conn
            .execute(
                "DELETE FROM brochures WHERE id = ?1 AND owner_id = ?2",
                params![id, owner_id],
            )
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(count > 0)
    }

    /// Count all brochures.
    pub fn count(&self) -> Result<i64> {
        let conn = self.conn.lock();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM brochures", [], |row| row.get(0))
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(count)
    }

    pub fn get_stats(&self) -> Result<StoreStats> {
        let total_brochures = self.count()?;
        let db_size_mb = std::fs::metadata(&self.db_path)
            .map(|m| m.len() as f64 / (1024.0 * 1024.0))
            .unwrap_or(0.0);
        Ok(StoreStats {
            total_brochures,
            db_path: self.db_path.display().to_string(),
            db_size_mb: (db_size_mb * 100.0).round() / 100.0,
        })
    }

    fn row_to_brochure(row: &rusqlite::Row<'_>) -> BrochureRecord {
        BrochureRecord {
            id: row.get("id").unwrap_or_default(),
            owner_id: row.get("owner_id").unwrap_or_default(),
            title: row.get("title").unwrap_or_default(),
            description: row.get("description").unwrap_or_default(),
            image_urls: row
                .get::<_, String>("image_urls_json")
                .ok()
                .and_then(|s| serde_json::from_str(&s).ok())
                .unwrap_or_default(),
            ai_response: row
                .get::<_, Option<String>>("ai_response_json")
                .ok()
                .flatten()
                .and_then(|s| serde_json::from_str(&s).ok()),
            created_at: row.get("created_at").unwrap_or(0),
            updated_at: row.get("updated_at").unwrap_or(0),
        }
    }
}
