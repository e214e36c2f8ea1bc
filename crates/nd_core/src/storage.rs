use async_trait::async_trait;
use crate::types::{EntryId, SummaryLogEntry};
use crate::Result;

#[async_trait]
pub trait SummaryLog: Send + Sync {
    /// Record one summary request. Blank names are stored as "Reader" and the
    /// categories are joined with ",".
    async fn append(&self, name: &str, categories: &[String]) -> Result<EntryId>;

    /// All entries, newest first. Storage failures yield an empty list.
    async fn list_all(&self) -> Vec<SummaryLogEntry>;
}
