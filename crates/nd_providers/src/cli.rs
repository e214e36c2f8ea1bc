use clap::Subcommand;
use nd_core::{Article, Category, NewsRequest, Result};

use crate::resolver::NewsResolver;

#[derive(Subcommand, Debug, Clone)]
pub enum NewsCommands {
    /// Print the current headlines for a category (defaults to general)
    Headlines {
        /// One of: business, technology, sports, science, health, entertainment, general
        category: Option<String>,
        /// Print at most this many articles
        #[arg(long, short)]
        limit: Option<usize>,
    },
    /// Search recent articles by free text
    Search {
        query: String,
        #[arg(long, short)]
        limit: Option<usize>,
    },
    /// List the known categories
    Categories,
}

pub async fn handle_command(command: NewsCommands, resolver: &NewsResolver) -> Result<()> {
    match command {
        NewsCommands::Headlines { category, limit } => {
            // Reject typos here instead of silently showing general news
            let category = match category {
                Some(label) => label.parse::<Category>()?,
                None => Category::General,
            };
            let articles = resolver.resolve(&category.into()).await;
            print_articles(&articles, limit);
        }
        NewsCommands::Search { query, limit } => {
            let articles = resolver.resolve(&NewsRequest::query(query)).await;
            print_articles(&articles, limit);
        }
        NewsCommands::Categories => {
            println!("Available categories:");
            for category in Category::ALL {
                println!("  {}", category);
            }
        }
    }
    Ok(())
}

fn print_articles(articles: &[Article], limit: Option<usize>) {
    let lines = render_articles(articles, limit);
    if lines.is_empty() {
        println!("No articles available right now.");
    }
    for line in lines {
        println!("{}", line);
    }
}

pub fn render_articles(articles: &[Article], limit: Option<usize>) -> Vec<String> {
    articles
        .iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|article| {
            let source = article
                .source
                .as_ref()
                .and_then(|s| s.name.as_deref())
                .map(|name| format!(" ({})", name))
                .unwrap_or_default();
            match &article.url {
                Some(url) => format!("📰 {}{} - {}", article.title, source, url),
                None => format!("📰 {}{}", article.title, source),
            }
        })
        .collect()
}
