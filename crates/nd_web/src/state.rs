use std::sync::Arc;
use nd_core::SummaryLog;
use nd_providers::NewsResolver;

pub struct AppState {
    pub resolver: NewsResolver,
    pub summary_log: Arc<dyn SummaryLog>,
    /// Articles shown per category in a generated summary
    pub summary_limit: usize,
}
