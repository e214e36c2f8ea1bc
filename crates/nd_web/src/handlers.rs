use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::Form;
use futures::future::join_all;
use nd_core::types::{log_timestamp, DEFAULT_READER_NAME};
use nd_core::{Article, Category, NewsRequest, SummaryLogEntry};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::RequestResult;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HeadlinesPage {
    pub heading: String,
    pub articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SummaryForm {
    pub name: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummarySection {
    pub category: String,
    pub articles: Vec<Article>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryPage {
    pub name: String,
    pub timestamp: String,
    pub sections: Vec<SummarySection>,
}

pub async fn home(State(state): State<Arc<AppState>>) -> Json<HeadlinesPage> {
    let articles = state.resolver.resolve(&Category::General.into()).await;
    Json(HeadlinesPage {
        heading: "Top Headlines".to_string(),
        articles,
    })
}

pub async fn category_page(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Response {
    let category = match name.parse::<Category>() {
        Ok(category) if Category::BROWSABLE.contains(&category) => category,
        _ => return Redirect::to("/").into_response(),
    };

    let articles = state.resolver.resolve(&category.into()).await;
    Json(HeadlinesPage {
        heading: format!("{} News", category.title()),
        articles,
    })
    .into_response()
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let query = match params.q.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => q.to_string(),
        _ => return Redirect::to("/").into_response(),
    };

    let articles = state.resolver.resolve(&NewsRequest::query(query.as_str())).await;
    Json(HeadlinesPage {
        heading: format!("Results for \"{}\"", query),
        articles,
    })
    .into_response()
}

pub async fn generate_summary(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SummaryForm>,
) -> RequestResult<Json<SummaryPage>> {
    let categories = parse_categories(&form.categories)?;
    let labels: Vec<String> = categories.iter().map(|c| c.to_string()).collect();

    let name = form
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_READER_NAME)
        .to_string();

    // The log is diagnostic only; a failed write must not cost the reader their summary
    match state.summary_log.append(&name, &labels).await {
        Ok(id) => info!("📝 Logged summary #{} for {} ({})", id, name, labels.join(",")),
        Err(e) => warn!("Failed to log summary request for {}: {}", name, e),
    }
    let timestamp = log_timestamp();

    let resolves = categories.iter().map(|category| {
        let state = state.clone();
        let category = *category;
        async move {
            let mut articles = state.resolver.resolve(&category.into()).await;
            articles.truncate(state.summary_limit);
            SummarySection {
                category: category.title(),
                articles,
            }
        }
    });
    let sections = join_all(resolves).await;

    Ok(Json(SummaryPage {
        name,
        timestamp,
        sections,
    }))
}

pub async fn admin_panel(State(state): State<Arc<AppState>>) -> Json<Vec<SummaryLogEntry>> {
    Json(state.summary_log.list_all().await)
}

/// Validates the requested categories, keeping their order and dropping
/// repeats. Nothing selected means `general`.
fn parse_categories(raw: &[String]) -> RequestResult<Vec<Category>> {
    let mut categories = Vec::new();
    for label in raw {
        let category = label.parse::<Category>()?;
        if !categories.contains(&category) {
            categories.push(category);
        }
    }
    if categories.is_empty() {
        categories.push(Category::General);
    }
    Ok(categories)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_parse_categories() {
        assert_eq!(
            parse_categories(&labels(&["technology", "Health", "technology"])).unwrap(),
            vec![Category::Technology, Category::Health]
        );
        assert_eq!(parse_categories(&[]).unwrap(), vec![Category::General]);
        assert!(parse_categories(&labels(&["technology", "gossip"])).is_err());
    }
}
