use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use nd_core::{Article, Error, NewsConfig, NewsProvider, NewsRequest, Result};

use crate::logging::Logger;
use crate::providers::get_providers;

/// Drops articles with no usable title or marked `[Removed]` upstream.
/// Order is preserved.
pub fn filter_removed(articles: Vec<Article>) -> Vec<Article> {
    articles.into_iter().filter(|a| !a.is_removed()).collect()
}

/// Turns a [`NewsRequest`] into a filtered article list.
///
/// Providers are tried in order and the first success wins, so with the
/// default chain a request costs at most two upstream calls. Every call is
/// bounded by `timeout`. Failures are logged and absorbed: when nothing
/// answers the result is empty, which callers must read as "no results
/// right now".
#[derive(Clone)]
pub struct NewsResolver {
    providers: Vec<Arc<dyn NewsProvider>>,
    timeout: Duration,
}

impl NewsResolver {
    pub fn new(providers: Vec<Arc<dyn NewsProvider>>, timeout: Duration) -> Self {
        Self { providers, timeout }
    }

    /// The default chain: NewsAPI (when a key is set), then the mirror.
    pub fn from_config(config: &NewsConfig) -> Result<Self> {
        Ok(Self::new(get_providers(config)?, config.timeout))
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn resolve(&self, request: &NewsRequest) -> Vec<Article> {
        let logger = Logger::new().with_prefix("[resolver]");

        for provider in &self.providers {
            let logger = logger.clone().with_prefix(format!("[{}]", provider.name()));

            if request.is_query() && !provider.supports_search() {
                logger.info(&format!(
                    "cannot search, serving {} headlines for {}",
                    request.category_or_general(),
                    request
                ));
            }

            match self.fetch_from(provider.as_ref(), request).await {
                Ok(articles) => {
                    let total = articles.len();
                    let articles = filter_removed(articles);
                    logger.debug(&format!(
                        "{} articles for {} ({} filtered out)",
                        articles.len(),
                        request,
                        total - articles.len()
                    ));
                    return articles;
                }
                Err(e) => logger.warn(&format!("failed for {}: {}", request, e)),
            }
        }

        logger.error(&format!("no provider answered for {}, returning no articles", request));
        Vec::new()
    }

    async fn fetch_from(&self, provider: &dyn NewsProvider, request: &NewsRequest) -> Result<Vec<Article>> {
        let call = AssertUnwindSafe(provider.fetch(request)).catch_unwind();
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(Error::UpstreamUnavailable(format!(
                "{} panicked while fetching",
                provider.name()
            ))),
            Err(_) => Err(Error::UpstreamUnavailable(format!(
                "{} timed out after {:?}",
                provider.name(),
                self.timeout
            ))),
        }
    }
}
