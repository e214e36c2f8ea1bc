use std::sync::Arc;

use nd_core::{NewsConfig, NewsProvider, Result};

pub mod mirror;
pub mod newsapi;

pub use mirror::MirrorProvider;
pub use newsapi::NewsApiProvider;

/// Builds the provider chain in fallback order.
///
/// The NewsAPI provider is only included when a real API key is configured;
/// the static mirror is always last.
pub fn get_providers(config: &NewsConfig) -> Result<Vec<Arc<dyn NewsProvider>>> {
    let mut providers: Vec<Arc<dyn NewsProvider>> = Vec::new();
    if config.has_api_key() {
        providers.push(Arc::new(NewsApiProvider::new(config)?));
    } else {
        tracing::info!("🔑 No API key configured, using the backup news source only");
    }
    providers.push(Arc::new(MirrorProvider::new(config)?));
    Ok(providers)
}

/// Common utilities for providers
pub(crate) mod utils {
    use nd_core::{Article, Error, NewsConfig, Result};
    use reqwest::Client;
    use serde::Deserialize;
    use url::Url;

    const USER_AGENT: &str = concat!("newsdesk/", env!("CARGO_PKG_VERSION"));

    #[derive(Debug, Deserialize)]
    struct ArticlesEnvelope {
        status: Option<String>,
        code: Option<String>,
        message: Option<String>,
        articles: Option<Vec<Article>>,
    }

    pub fn build_client(config: &NewsConfig) -> Result<Client> {
        Ok(Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?)
    }

    pub fn base_url(base: &str, path: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    /// GETs `url` and decodes an `{"articles": [...]}` body.
    pub async fn get_articles(client: &Client, url: Url, provider: &str) -> Result<Vec<Article>> {
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| upstream_error(provider, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamUnavailable(format!(
                "{} returned HTTP {}",
                provider, status
            )));
        }

        let body = response.text().await.map_err(|e| upstream_error(provider, e))?;
        parse_articles(&body)
    }

    fn upstream_error(provider: &str, e: reqwest::Error) -> Error {
        // Request URLs can carry the API key
        let e = e.without_url();
        if e.is_timeout() {
            Error::UpstreamUnavailable(format!("{} timed out", provider))
        } else {
            Error::UpstreamUnavailable(format!("{}: {}", provider, e))
        }
    }

    pub fn parse_articles(body: &str) -> Result<Vec<Article>> {
        let envelope: ArticlesEnvelope = serde_json::from_str(body)
            .map_err(|e| Error::MalformedResponse(format!("Invalid JSON body: {}", e)))?;

        if envelope.status.as_deref() == Some("error") {
            return Err(Error::UpstreamUnavailable(format!(
                "{}: {}",
                envelope.code.unwrap_or_else(|| "unknown".to_string()),
                envelope.message.unwrap_or_else(|| "Unknown error".to_string())
            )));
        }

        envelope
            .articles
            .ok_or_else(|| Error::MalformedResponse("Missing `articles` array".to_string()))
    }
}

#[cfg(test)]
pub(crate) mod test_server {
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};

    use axum::{extract::Request, http::StatusCode, response::IntoResponse, Router};

    /// A local stand-in for an upstream news API. Answers every request with
    /// the given status and body and records the path and query it was called with.
    pub struct StubUpstream {
        pub addr: SocketAddr,
        pub hits: Arc<Mutex<Vec<String>>>,
    }

    impl StubUpstream {
        pub async fn start(status: StatusCode, body: &'static str) -> Self {
            let hits = Arc::new(Mutex::new(Vec::new()));
            let recorded = hits.clone();
            let app = Router::new().fallback(move |request: Request| {
                let recorded = recorded.clone();
                async move {
                    let uri = request.uri();
                    let hit = match uri.query() {
                        Some(query) => format!("{}?{}", uri.path(), query),
                        None => uri.path().to_string(),
                    };
                    recorded.lock().unwrap().push(hit);
                    (status, body).into_response()
                }
            });

            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            Self { addr, hits }
        }

        pub fn url(&self) -> String {
            format!("http://{}", self.addr)
        }

        pub fn hits(&self) -> Vec<String> {
            self.hits.lock().unwrap().clone()
        }
    }

    pub const HEADLINES: &str = r#"{
        "status": "ok",
        "totalResults": 4,
        "articles": [
            {"source": {"id": null, "name": "Wire"}, "title": "First story", "url": "https://example.com/1", "publishedAt": "2024-05-01T10:00:00Z"},
            {"source": {"id": null, "name": "Wire"}, "title": "[Removed]", "url": "https://removed.com"},
            {"source": {"id": null, "name": "Wire"}, "title": null, "url": "https://example.com/untitled"},
            {"source": {"id": null, "name": "Wire"}, "title": "Second story", "url": "https://example.com/2", "urlToImage": "https://example.com/2.png"}
        ]
    }"#;
}

#[cfg(test)]
mod tests {
    use super::utils;
    use super::*;
    use nd_core::Error;

    #[test]
    fn test_base_url() {
        assert_eq!(utils::base_url("https://newsapi.org/v2/", "/everything"), "https://newsapi.org/v2/everything");
        assert_eq!(utils::base_url("https://newsapi.org/v2", "top-headlines"), "https://newsapi.org/v2/top-headlines");
    }

    #[test]
    fn test_parse_articles() {
        let articles = utils::parse_articles(test_server::HEADLINES).unwrap();
        assert_eq!(articles.len(), 4);
        assert_eq!(articles[0].title, "First story");

        let err = utils::parse_articles("<html>rate limited</html>").unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));

        let err = utils::parse_articles(r#"{"status": "ok"}"#).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));

        let err = utils::parse_articles(
            r#"{"status": "error", "code": "rateLimited", "message": "Too many requests"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::UpstreamUnavailable(ref m) if m.contains("rateLimited")));
    }

    #[test]
    fn test_get_providers() {
        let providers = get_providers(&NewsConfig::default()).unwrap();
        assert_eq!(providers.len(), 1);
        assert_eq!(providers[0].name(), "mirror");

        let config = NewsConfig::default().with_api_key("real-key");
        let providers = get_providers(&config).unwrap();
        let names: Vec<&str> = providers.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["newsapi", "mirror"]);
    }
}
