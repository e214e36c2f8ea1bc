use async_trait::async_trait;
use nd_core::{EntryId, Error, NewLogEntry, Result, SummaryLog, SummaryLogEntry};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::path::{Path, PathBuf};
use tokio::sync::OnceCell;

pub const DEFAULT_DB_PATH: &str = "newsletter.db";

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS history (
        id INTEGER PRIMARY KEY,
        name TEXT,
        preferences TEXT,
        timestamp TEXT
    )
    "#,
    // Add future migrations here
];

/// Summary log kept in a single SQLite table.
///
/// Nothing touches the disk until the first call; the pool is opened and
/// the schema created exactly once even when several requests arrive
/// together. If that fails the next call tries again.
pub struct SQLiteSummaryLog {
    db_path: PathBuf,
    pool: OnceCell<SqlitePool>,
}

impl SQLiteSummaryLog {
    pub fn new_with_path(db_path: impl AsRef<Path>) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
            pool: OnceCell::new(),
        }
    }

    /// Opens the database right away instead of on first use.
    pub async fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let storage = Self::new_with_path(db_path);
        storage.pool().await?;
        Ok(storage)
    }

    pub fn get_db_path(&self) -> &Path {
        &self.db_path
    }

    async fn pool(&self) -> Result<&SqlitePool> {
        self.pool.get_or_try_init(|| connect(&self.db_path)).await
    }

    pub async fn try_list_all(&self) -> Result<Vec<SummaryLogEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, preferences, timestamp FROM history
            ORDER BY id DESC
            "#,
        )
        .fetch_all(self.pool().await?)
        .await
        .map_err(|e| storage_error("Failed to list summary log", e))?;

        rows.into_iter()
            .map(|row| -> Result<SummaryLogEntry> {
                Ok(SummaryLogEntry {
                    id: row.try_get("id").map_err(|e| storage_error("Bad id column", e))?,
                    name: text_column(&row, "name")?,
                    preferences: text_column(&row, "preferences")?,
                    timestamp: text_column(&row, "timestamp")?,
                })
            })
            .collect()
    }
}

async fn connect(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            Error::StorageUnavailable(format!("Failed to create database directory: {}", e))
        })?;
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(4)
        .connect_with(options)
        .await
        .map_err(|e| storage_error("Failed to connect to database", e))?;

    // Run migrations
    for (i, migration) in MIGRATIONS.iter().enumerate() {
        sqlx::query(migration)
            .execute(&pool)
            .await
            .map_err(|e| storage_error(&format!("Failed to run migration {}", i), e))?;
    }

    tracing::debug!("💾 Summary log ready at {}", db_path.display());
    Ok(pool)
}

fn text_column(row: &sqlx::sqlite::SqliteRow, column: &str) -> Result<String> {
    let value: Option<String> = row
        .try_get(column)
        .map_err(|e| storage_error(&format!("Bad {} column", column), e))?;
    Ok(value.unwrap_or_default())
}

fn storage_error(context: &str, e: sqlx::Error) -> Error {
    Error::StorageUnavailable(format!("{}: {}", context, e))
}

#[async_trait]
impl SummaryLog for SQLiteSummaryLog {
    async fn append(&self, name: &str, categories: &[String]) -> Result<EntryId> {
        let entry = NewLogEntry::new(name, categories);

        // The row id comes from SQLite itself, which keeps concurrent appends ordered
        let result = sqlx::query(
            r#"
            INSERT INTO history (name, preferences, timestamp)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&entry.name)
        .bind(&entry.preferences)
        .bind(&entry.timestamp)
        .execute(self.pool().await?)
        .await
        .map_err(|e| storage_error("Failed to append to summary log", e))?;

        Ok(result.last_insert_rowid())
    }

    async fn list_all(&self) -> Vec<SummaryLogEntry> {
        match self.try_list_all().await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Summary log unavailable, showing no entries: {}", e);
                Vec::new()
            }
        }
    }
}
