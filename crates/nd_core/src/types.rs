use std::fmt;
use std::str::FromStr;

use chrono::Local;
use serde::{Deserialize, Deserializer, Serialize};

use crate::Error;

/// Title upstream providers put on articles that were taken down.
pub const REMOVED_TITLE: &str = "[Removed]";

/// Name recorded when a summary is requested without one.
pub const DEFAULT_READER_NAME: &str = "Reader";

pub const PREFERENCE_DELIMITER: &str = ",";

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub type EntryId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Business,
    Technology,
    Sports,
    Science,
    Health,
    Entertainment,
    #[default]
    General,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Business,
        Category::Technology,
        Category::Sports,
        Category::Science,
        Category::Health,
        Category::Entertainment,
        Category::General,
    ];

    /// Categories that get their own page; `general` is served as the home page.
    pub const BROWSABLE: [Category; 6] = [
        Category::Business,
        Category::Technology,
        Category::Sports,
        Category::Science,
        Category::Health,
        Category::Entertainment,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Business => "business",
            Category::Technology => "technology",
            Category::Sports => "sports",
            Category::Science => "science",
            Category::Health => "health",
            Category::Entertainment => "entertainment",
            Category::General => "general",
        }
    }

    /// Capitalized label, e.g. `Technology`.
    pub fn title(&self) -> String {
        let label = self.label();
        let mut chars = label.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Parses a label, falling back to `general` for anything unrecognized.
    pub fn parse_or_general(label: Option<&str>) -> Self {
        label.and_then(|l| l.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.label() == needle)
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

/// What the reader asked for: a category's headlines or a free-text search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsRequest {
    Category(Category),
    Query(String),
}

impl NewsRequest {
    pub fn category(label: Option<&str>) -> Self {
        NewsRequest::Category(Category::parse_or_general(label))
    }

    /// A search request. Blank text has nothing to search for and becomes
    /// the top headlines request instead.
    pub fn query(text: impl Into<String>) -> Self {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            NewsRequest::Category(Category::General)
        } else {
            NewsRequest::Query(trimmed.to_string())
        }
    }

    pub fn is_query(&self) -> bool {
        matches!(self, NewsRequest::Query(_))
    }

    /// The category to use with providers that cannot search.
    pub fn category_or_general(&self) -> Category {
        match self {
            NewsRequest::Category(category) => *category,
            NewsRequest::Query(_) => Category::General,
        }
    }
}

impl From<Category> for NewsRequest {
    fn from(category: Category) -> Self {
        NewsRequest::Category(category)
    }
}

impl fmt::Display for NewsRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NewsRequest::Category(category) => write!(f, "category:{}", category),
            NewsRequest::Query(text) => write!(f, "query:{:?}", text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSource {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    pub source: Option<ArticleSource>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "urlToImage")]
    pub image_url: Option<String>,
    pub published_at: Option<String>,
    pub content: Option<String>,
}

impl Article {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            source: None,
            author: None,
            description: None,
            url: None,
            image_url: None,
            published_at: None,
            content: None,
        }
    }

    /// Articles without a usable title, or marked removed upstream.
    pub fn is_removed(&self) -> bool {
        let title = self.title.trim();
        title.is_empty() || title == REMOVED_TITLE
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryLogEntry {
    pub id: EntryId,
    pub name: String,
    pub preferences: String,
    pub timestamp: String,
}

/// A log record before the store has assigned it an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLogEntry {
    pub name: String,
    pub preferences: String,
    pub timestamp: String,
}

impl NewLogEntry {
    pub fn new<S: AsRef<str>>(name: &str, categories: &[S]) -> Self {
        let name = name.trim();
        let name = if name.is_empty() { DEFAULT_READER_NAME } else { name };
        let preferences = categories
            .iter()
            .map(|c| c.as_ref())
            .collect::<Vec<_>>()
            .join(PREFERENCE_DELIMITER);

        Self {
            name: name.to_string(),
            preferences,
            timestamp: log_timestamp(),
        }
    }

    pub fn with_id(self, id: EntryId) -> SummaryLogEntry {
        SummaryLogEntry {
            id,
            name: self.name,
            preferences: self.preferences,
            timestamp: self.timestamp,
        }
    }
}

/// Current local wall-clock time in the log's text format.
pub fn log_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parsing() {
        assert_eq!("technology".parse::<Category>().unwrap(), Category::Technology);
        assert_eq!(" Health ".parse::<Category>().unwrap(), Category::Health);
        assert!("unknown-xyz".parse::<Category>().is_err());

        assert_eq!(Category::parse_or_general(Some("unknown-xyz")), Category::General);
        assert_eq!(Category::parse_or_general(None), Category::General);
        assert_eq!(Category::parse_or_general(Some("SPORTS")), Category::Sports);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::Technology.to_string(), "technology");
        assert_eq!(Category::Technology.title(), "Technology");
        assert_eq!(Category::General.title(), "General");
        assert!(!Category::BROWSABLE.contains(&Category::General));
    }

    #[test]
    fn test_news_request() {
        assert_eq!(
            NewsRequest::category(Some("unknown-xyz")),
            NewsRequest::Category(Category::General)
        );
        assert_eq!(NewsRequest::query("  rust  "), NewsRequest::Query("rust".to_string()));
        assert_eq!(NewsRequest::query("   "), NewsRequest::Category(Category::General));

        let request = NewsRequest::query("elections");
        assert!(request.is_query());
        assert_eq!(request.category_or_general(), Category::General);
        assert_eq!(
            NewsRequest::from(Category::Science).category_or_general(),
            Category::Science
        );
    }

    #[test]
    fn test_article_deserialization() {
        let json = r#"{
            "source": {"id": null, "name": "Example"},
            "author": null,
            "title": null,
            "description": "desc",
            "url": "https://example.com/a",
            "urlToImage": "https://example.com/a.png",
            "publishedAt": "2024-05-01T10:00:00Z",
            "content": null
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.title, "");
        assert!(article.is_removed());
        assert_eq!(article.image_url.as_deref(), Some("https://example.com/a.png"));
        assert_eq!(article.published_at.as_deref(), Some("2024-05-01T10:00:00Z"));
        assert_eq!(article.source.unwrap().name.as_deref(), Some("Example"));

        let article: Article = serde_json::from_str(r#"{"title": "Only a title"}"#).unwrap();
        assert!(!article.is_removed());
        assert!(article.url.is_none());
    }

    #[test]
    fn test_removed_articles() {
        assert!(Article::new(REMOVED_TITLE).is_removed());
        assert!(Article::new("  ").is_removed());
        assert!(!Article::new("Markets rally").is_removed());
    }

    #[test]
    fn test_new_log_entry() {
        let entry = NewLogEntry::new("", &["business", "sports"]);
        assert_eq!(entry.name, DEFAULT_READER_NAME);
        assert_eq!(entry.preferences, "business,sports");
        assert!(chrono::NaiveDateTime::parse_from_str(&entry.timestamp, TIMESTAMP_FORMAT).is_ok());

        let entry = NewLogEntry::new(" Ada ", &["technology".to_string()]).with_id(7);
        assert_eq!(entry.id, 7);
        assert_eq!(entry.name, "Ada");
        assert_eq!(entry.preferences, "technology");
    }
}
