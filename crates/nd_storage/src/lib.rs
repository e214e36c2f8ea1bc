use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use nd_core::{Error, SummaryLog};

pub mod backends;

pub use backends::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    #[cfg(feature = "sqlite")]
    Sqlite,
    Memory,
}

impl Default for StorageKind {
    #[cfg(feature = "sqlite")]
    fn default() -> Self {
        StorageKind::Sqlite
    }

    #[cfg(not(feature = "sqlite"))]
    fn default() -> Self {
        StorageKind::Memory
    }
}

impl FromStr for StorageKind {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            #[cfg(feature = "sqlite")]
            "sqlite" => Ok(StorageKind::Sqlite),
            "memory" => Ok(StorageKind::Memory),
            other => Err(Error::Config(format!("Unknown storage backend: {}", other))),
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(feature = "sqlite")]
            StorageKind::Sqlite => f.write_str("sqlite"),
            StorageKind::Memory => f.write_str("memory"),
        }
    }
}

/// Builds the summary log for `kind`. The SQLite file at `db_path` is not
/// touched until the first append or listing.
#[cfg_attr(not(feature = "sqlite"), allow(unused_variables))]
pub fn create_summary_log(kind: StorageKind, db_path: Option<&Path>) -> Arc<dyn SummaryLog> {
    match kind {
        #[cfg(feature = "sqlite")]
        StorageKind::Sqlite => {
            let path = db_path.unwrap_or_else(|| Path::new(backends::sqlite::DEFAULT_DB_PATH));
            tracing::debug!("💾 Summary log will use SQLite at {}", path.display());
            Arc::new(SQLiteSummaryLog::new_with_path(path))
        }
        StorageKind::Memory => Arc::new(MemorySummaryLog::new()),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{create_summary_log, StorageKind};
}
