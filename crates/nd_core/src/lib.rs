pub mod config;
pub mod error;
pub mod provider;
pub mod storage;
pub mod types;

pub use config::NewsConfig;
pub use error::{Error, Result};
pub use provider::NewsProvider;
pub use storage::SummaryLog;
pub use types::{
    Article, ArticleSource, Category, EntryId, NewLogEntry, NewsRequest, SummaryLogEntry,
};
