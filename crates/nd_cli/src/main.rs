use clap::Parser;
use nd_core::{NewsConfig, Result, SummaryLog};
use nd_providers::{handle_command, init_logging, NewsCommands, NewsResolver};
use nd_storage::{create_summary_log, StorageKind};
use nd_web::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Pick news categories, read the headlines, keep a log", long_about = None)]
pub struct Cli {
    /// API key for the primary news provider (overrides the built-in default)
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Summary log backend: sqlite or memory
    #[arg(long, default_value = "sqlite")]
    storage: String,
    /// SQLite file for the summary log
    #[arg(long, default_value = "newsletter.db")]
    db: PathBuf,
    /// Upstream timeout in seconds (1 to 5)
    #[arg(long)]
    timeout: Option<u64>,
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, short)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the web front end
    Serve {
        #[arg(long, default_value = "127.0.0.1:5000")]
        bind: SocketAddr,
    },
    /// Print the summary log, newest first
    History,
    #[command(flatten)]
    News(NewsCommands),
}

fn build_config(cli: &Cli) -> Result<NewsConfig> {
    let mut config = NewsConfig::from_env()?;
    if let Some(api_key) = cli.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
        config = config.with_api_key(api_key);
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    config.validate()?;
    Ok(config)
}

async fn print_history(summary_log: &Arc<dyn SummaryLog>) {
    let entries = summary_log.list_all().await;
    if entries.is_empty() {
        println!("No summaries logged yet.");
        return;
    }
    println!("{:>5}  {:<20}  {:<40}  {}", "ID", "User", "Topics", "Time");
    for entry in entries {
        println!(
            "{:>5}  {:<20}  {:<40}  {}",
            entry.id, entry.name, entry.preferences, entry.timestamp
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = build_config(&cli)?;
    let resolver = NewsResolver::from_config(&config)?;
    info!(
        "📰 News providers ready: {} (timeout {:?})",
        resolver.provider_names().join(" → "),
        resolver.timeout()
    );

    let storage: StorageKind = cli.storage.parse()?;
    let summary_log = create_summary_log(storage, Some(cli.db.as_path()));

    match cli.command {
        Commands::Serve { bind } => {
            let app = nd_web::create_app(AppState {
                resolver,
                summary_log,
                summary_limit: config.summary_limit,
            });
            let listener = tokio::net::TcpListener::bind(bind).await?;
            info!("🌐 Listening on http://{} (summary log: {})", bind, storage);
            axum::serve(listener, app).await?;
        }
        Commands::History => print_history(&summary_log).await,
        Commands::News(command) => handle_command(command, &resolver).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["nd", "--storage", "memory", "headlines", "sports"]).unwrap();
        assert_eq!(cli.storage, "memory");
        assert!(matches!(
            cli.command,
            Commands::News(NewsCommands::Headlines { category: Some(ref c), .. }) if c == "sports"
        ));

        let cli = Cli::try_parse_from(["nd", "serve", "--bind", "0.0.0.0:8080"]).unwrap();
        assert!(matches!(cli.command, Commands::Serve { bind } if bind.port() == 8080));

        assert!(Cli::try_parse_from(["nd", "serve", "--bind", "nowhere"]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "nd",
            "--api-key",
            "from-flag",
            "--timeout",
            "2",
            "history",
        ])
        .unwrap();
        let config = build_config(&cli).unwrap();
        assert_eq!(config.api_key, "from-flag");
        assert_eq!(config.timeout, Duration::from_secs(2));

        let cli = Cli::try_parse_from(["nd", "--timeout", "0", "history"]).unwrap();
        assert!(build_config(&cli).is_err());

        let cli = Cli::try_parse_from(["nd", "--timeout", "3600", "history"]).unwrap();
        assert!(build_config(&cli).is_err());
    }
}
