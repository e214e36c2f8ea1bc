use async_trait::async_trait;
use nd_core::{Article, NewsConfig, NewsProvider, NewsRequest, Result};
use reqwest::Client;
use url::Url;

use super::utils;

/// The primary source: a NewsAPI-compatible live endpoint.
///
/// Category requests go to `/top-headlines`, searches to `/everything`
/// sorted by publication time.
pub struct NewsApiProvider {
    client: Client,
    base_url: String,
    api_key: String,
    country: String,
}

impl NewsApiProvider {
    pub fn new(config: &NewsConfig) -> Result<Self> {
        Ok(Self {
            client: utils::build_client(config)?,
            base_url: config.primary_base_url.clone(),
            api_key: config.api_key.clone(),
            country: config.country.clone(),
        })
    }

    pub fn endpoint(&self, request: &NewsRequest) -> Result<Url> {
        let url = match request {
            NewsRequest::Query(text) => Url::parse_with_params(
                &utils::base_url(&self.base_url, "everything"),
                &[
                    ("q", text.as_str()),
                    ("sortBy", "publishedAt"),
                    ("apiKey", self.api_key.as_str()),
                ],
            )?,
            NewsRequest::Category(category) => Url::parse_with_params(
                &utils::base_url(&self.base_url, "top-headlines"),
                &[
                    ("country", self.country.as_str()),
                    ("category", category.label()),
                    ("apiKey", self.api_key.as_str()),
                ],
            )?,
        };
        Ok(url)
    }
}

#[async_trait]
impl NewsProvider for NewsApiProvider {
    fn name(&self) -> &str {
        "newsapi"
    }

    fn supports_search(&self) -> bool {
        true
    }

    async fn fetch(&self, request: &NewsRequest) -> Result<Vec<Article>> {
        let url = self.endpoint(request)?;
        utils::get_articles(&self.client, url, self.name()).await
    }
}
