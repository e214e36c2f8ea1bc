use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// True for failures that mean the provider could not be reached or
    /// refused the request (network, timeout, non-2xx).
    pub fn is_upstream(&self) -> bool {
        match self {
            Error::UpstreamUnavailable(_) => true,
            Error::Http(e) => !e.is_decode(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::UpstreamUnavailable("HTTP 500".to_string());
        assert_eq!(err.to_string(), "Upstream unavailable: HTTP 500");
        assert!(err.is_upstream());

        let err = Error::MalformedResponse("missing `articles`".to_string());
        assert_eq!(err.to_string(), "Malformed response: missing `articles`");
        assert!(!err.is_upstream());

        let err = Error::StorageUnavailable("disk full".to_string());
        assert!(!err.is_upstream());
    }

    #[test]
    fn test_from_conversions() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, Error::Serialization(_)));

        let err: Error = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, Error::InvalidUrl(_)));

        let err: Error = anyhow::anyhow!("boom").into();
        assert_eq!(err.to_string(), "External error: boom");
    }
}
