use async_trait::async_trait;
use nd_core::{EntryId, NewLogEntry, Result, SummaryLog, SummaryLogEntry};
use tokio::sync::RwLock;

/// Summary log that lives for the life of the process.
#[derive(Debug, Default)]
pub struct MemorySummaryLog {
    entries: RwLock<Vec<SummaryLogEntry>>,
}

impl MemorySummaryLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SummaryLog for MemorySummaryLog {
    async fn append(&self, name: &str, categories: &[String]) -> Result<EntryId> {
        let entry = NewLogEntry::new(name, categories);
        let mut entries = self.entries.write().await;
        let id = entries.last().map_or(1, |e| e.id + 1);
        entries.push(entry.with_id(id));
        Ok(id)
    }

    async fn list_all(&self) -> Vec<SummaryLogEntry> {
        let entries = self.entries.read().await;
        entries.iter().rev().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_log() {
        let log = MemorySummaryLog::new();
        assert!(log.list_all().await.is_empty());

        let first = log.append("Ada", &["technology".to_string()]).await.unwrap();
        let second = log
            .append("  ", &["business".to_string(), "sports".to_string()])
            .await
            .unwrap();
        assert_eq!((first, second), (1, 2));

        let entries = log.list_all().await;
        assert_eq!(entries[0].id, 2);
        assert_eq!(entries[0].name, "Reader");
        assert_eq!(entries[0].preferences, "business,sports");
        assert_eq!(entries[1].name, "Ada");
    }
}
