mod prefs;
mod search;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use larder_core::{CachingClient, LarderConfig, SpoonacularClient};
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "larder")]
#[command(about = "Find recipes for the ingredients you have", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find recipes using the given ingredients
    Find {
        /// Ingredients to search with (at most LARDER_MAX_INGREDIENTS)
        #[arg(required = true)]
        ingredients: Vec<String>,
    },
    /// Suggest ingredient names for a partial query
    Suggest {
        /// Partial ingredient name; omit to list popular ingredients
        query: Option<String>,
        /// Browse the bundled catalog by name or category instead of asking the API
        #[arg(long)]
        browse: bool,
    },
    /// Manage saved recipes
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Show or switch the display theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
    /// Inspect or clear the HTTP response cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
pub enum FavoritesAction {
    /// List saved recipes
    List,
    /// Search with the given ingredients and save the recipe with this title
    Add {
        #[arg(required = true)]
        ingredients: Vec<String>,
        /// Title of the recipe to save
        #[arg(long)]
        title: String,
    },
    /// Remove a saved recipe by title
    Remove { title: String },
    /// Remove all saved recipes
    Clear,
}

#[derive(Subcommand)]
pub enum ThemeAction {
    Show,
    Toggle,
}

#[derive(Subcommand)]
enum CacheAction {
    Stats,
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = LarderConfig::from_env().context("Invalid configuration")?;

    let http = Arc::new(
        config
            .http_client_builder()
            .build()
            .context("Failed to build HTTP client")?,
    );

    match cli.command {
        Commands::Find { ingredients } => {
            let client = api_client(&http, &config);
            search::find(client, &config, &ingredients).await?;
        }
        Commands::Suggest { query, browse } => {
            if browse {
                search::print_suggestions(search::browse(query.as_deref()));
            } else {
                let client = api_client(&http, &config);
                search::suggest(client, query.as_deref()).await;
            }
        }
        Commands::Favorites { action } => {
            let client = api_client(&http, &config);
            prefs::favorites(client, &config, action).await?;
        }
        Commands::Theme { action } => {
            prefs::theme(&config, action);
        }
        Commands::Cache { action } => {
            cache(&http, action).await?;
        }
    }

    Ok(())
}

fn api_client(
    http: &Arc<CachingClient>,
    config: &LarderConfig,
) -> Arc<SpoonacularClient<CachingClient>> {
    Arc::new(SpoonacularClient::new(
        Arc::clone(http),
        &config.base_url,
        config.api_key.clone(),
    ))
}

async fn cache(http: &CachingClient, action: CacheAction) -> Result<()> {
    match action {
        CacheAction::Stats => {
            match http.cache_stats() {
                Some(stats) => {
                    println!("Fresh entries:   {}", stats.fresh);
                    println!("Expired entries: {}", stats.expired);
                }
                None => println!("HTTP cache disabled"),
            }
            println!("Requests today:  {}", http.requests_today().await);
        }
        CacheAction::Clear => {
            http.clear_cache().context("Failed to clear HTTP cache")?;
            println!("HTTP cache cleared");
        }
    }
    Ok(())
}
