use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

use crate::models::ResumeRecord;

pub const RECORD_KEY: &str = "extractedResumeData";
pub const SOURCE_HTML_KEY: &str = "cleanedResumeHtml";

pub struct Database {
    conn: Connection,
    path: PathBuf,
}

impl Database {
    pub fn open_at(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create data directory: {}", parent.display())
                })?;
            }
        }
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        let db = Self {
            conn,
            path: path.to_path_buf(),
        };
        db.init()?;
        Ok(db)
    }

    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        let db = Self {
            conn: Connection::open_in_memory()?,
            path: PathBuf::from(":memory:"),
        };
        db.init()?;
        Ok(db)
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn init(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS snapshots (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            "#,
        )?;
        Ok(())
    }

    pub fn put(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO snapshots (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value],
        )?;
        tracing::debug!(key, bytes = value.len(), "snapshot written");
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let result = self.conn.query_row(
            "SELECT value FROM snapshots WHERE key = ?1",
            params![key],
            |row| row.get(0),
        );
        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    // When `key` was last written, as SQLite's `datetime('now')` text.
    pub fn updated_at(&self, key: &str) -> Result<Option<String>> {
        let result = self.conn.query_row(
            "SELECT updated_at FROM snapshots WHERE key = ?1",
            params![key],
            |row| row.get(0),
        );
        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save_record(&self, record: &ResumeRecord) -> Result<()> {
        let json = serde_json::to_string(record).context("Failed to serialize record")?;
        self.put(RECORD_KEY, &json)
    }

    pub fn latest_record(&self) -> Result<Option<ResumeRecord>> {
        match self.get(RECORD_KEY)? {
            Some(json) => {
                let record = serde_json::from_str(&json)
                    .context("Stored record is not valid; run `resdex extract` again")?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    pub fn save_source_html(&self, html: &str) -> Result<()> {
        self.put(SOURCE_HTML_KEY, html)
    }

    pub fn source_html(&self) -> Result<Option<String>> {
        self.get(SOURCE_HTML_KEY)
    }

    pub fn clear(&self) -> Result<usize> {
        let removed = self.conn.execute("DELETE FROM snapshots", [])?;
        Ok(removed)
    }
}
