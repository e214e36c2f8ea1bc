use std::fmt;
use std::time::Duration;

use crate::{Error, Result};

/// Key shipped in the defaults. The primary provider is skipped while it is in use.
pub const DEFAULT_API_KEY: &str = "YOUR_API_KEY_HERE";
pub const DEFAULT_PRIMARY_URL: &str = "https://newsapi.org/v2";
pub const DEFAULT_FALLBACK_URL: &str = "https://saurav.tech/NewsAPI";
pub const DEFAULT_COUNTRY: &str = "us";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
/// Upper bound for any single upstream call.
pub const MAX_TIMEOUT: Duration = DEFAULT_TIMEOUT;
pub const DEFAULT_SUMMARY_LIMIT: usize = 3;

pub const ENV_API_KEY: &str = "NEWS_API_KEY";
pub const ENV_PRIMARY_URL: &str = "NEWS_PRIMARY_URL";
pub const ENV_FALLBACK_URL: &str = "NEWS_FALLBACK_URL";
pub const ENV_COUNTRY: &str = "NEWS_COUNTRY";
pub const ENV_TIMEOUT_SECS: &str = "NEWS_TIMEOUT_SECS";

#[derive(Clone, PartialEq, Eq)]
pub struct NewsConfig {
    pub api_key: String,
    pub primary_base_url: String,
    pub fallback_base_url: String,
    pub country: String,
    pub timeout: Duration,
    pub summary_limit: usize,
}

impl fmt::Debug for NewsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsConfig")
            .field("api_key", &"<redacted>")
            .field("primary_base_url", &self.primary_base_url)
            .field("fallback_base_url", &self.fallback_base_url)
            .field("country", &self.country)
            .field("timeout", &self.timeout)
            .field("summary_limit", &self.summary_limit)
            .finish()
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            api_key: DEFAULT_API_KEY.to_string(),
            primary_base_url: DEFAULT_PRIMARY_URL.to_string(),
            fallback_base_url: DEFAULT_FALLBACK_URL.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            timeout: DEFAULT_TIMEOUT,
            summary_limit: DEFAULT_SUMMARY_LIMIT,
        }
    }
}

impl NewsConfig {
    /// Defaults overridden by the `NEWS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = lookup(ENV_API_KEY) {
            config.api_key = key;
        }
        if let Some(url) = lookup(ENV_PRIMARY_URL) {
            config.primary_base_url = url;
        }
        if let Some(url) = lookup(ENV_FALLBACK_URL) {
            config.fallback_base_url = url;
        }
        if let Some(country) = lookup(ENV_COUNTRY) {
            config.country = country;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs = secs.trim().parse::<u64>().map_err(|e| {
                Error::Config(format!("{} must be a number of seconds: {}", ENV_TIMEOUT_SECS, e))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_primary_base_url(mut self, url: impl Into<String>) -> Self {
        self.primary_base_url = url.into();
        self
    }

    pub fn with_fallback_base_url(mut self, url: impl Into<String>) -> Self {
        self.fallback_base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_summary_limit(mut self, limit: usize) -> Self {
        self.summary_limit = limit;
        self
    }

    /// False while the key is blank or still the shipped placeholder.
    pub fn has_api_key(&self) -> bool {
        let key = self.api_key.trim();
        !key.is_empty() && key != DEFAULT_API_KEY
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be greater than zero".to_string()));
        }
        if self.timeout > MAX_TIMEOUT {
            return Err(Error::Config(format!(
                "timeout must be at most {}s, got {}s",
                MAX_TIMEOUT.as_secs(),
                self.timeout.as_secs_f64()
            )));
        }
        url::Url::parse(&self.primary_base_url)?;
        url::Url::parse(&self.fallback_base_url)?;
        Ok(())
    }
}
