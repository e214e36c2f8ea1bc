use async_trait::async_trait;
use nd_core::{Article, Category, NewsConfig, NewsProvider, NewsRequest, Result};
use reqwest::Client;
use url::Url;

use super::utils;

/// The backup source: a static mirror of cached top headlines, keyed only
/// by category and country. It cannot search, so queries are served from
/// `general`.
pub struct MirrorProvider {
    client: Client,
    base_url: String,
    country: String,
}

impl MirrorProvider {
    pub fn new(config: &NewsConfig) -> Result<Self> {
        Ok(Self {
            client: utils::build_client(config)?,
            base_url: config.fallback_base_url.clone(),
            country: config.country.clone(),
        })
    }

    pub fn endpoint(&self, category: Category) -> Result<Url> {
        let path = format!("top-headlines/category/{}/{}.json", category, self.country);
        Ok(Url::parse(&utils::base_url(&self.base_url, &path))?)
    }
}

#[async_trait]
impl NewsProvider for MirrorProvider {
    fn name(&self) -> &str {
        "mirror"
    }

    fn supports_search(&self) -> bool {
        false
    }

    async fn fetch(&self, request: &NewsRequest) -> Result<Vec<Article>> {
        let url = self.endpoint(request.category_or_general())?;
        utils::get_articles(&self.client, url, self.name()).await
    }
}
