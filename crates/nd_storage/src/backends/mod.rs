pub mod memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use memory::MemorySummaryLog;

#[cfg(feature = "sqlite")]
pub use sqlite::SQLiteSummaryLog;
