use async_trait::async_trait;
use crate::types::{Article, NewsRequest};
use crate::Result;

#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Whether the provider can serve `NewsRequest::Query` as a real search
    fn supports_search(&self) -> bool;

    /// Fetch the raw article list for a request, in upstream order
    async fn fetch(&self, request: &NewsRequest) -> Result<Vec<Article>>;
}
