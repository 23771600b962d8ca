//! Entry point: load configuration and token metadata, then run the scan
//! service.

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use eyre::Result;

use swoop::bot;
use swoop::config::Config;
use swoop::rates::http::HttpRateSource;
use swoop::tokens::TokenRegistry;
use swoop::utils::logger::setup_logger;

/// Command line interface.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Optional subcommand; defaults to scanning.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Run the periodic arbitrage scan
    Scan,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    setup_logger()?;

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let registry = TokenRegistry::from_json_file(&config.tokens_file)?;
    log::info!(
        "main: loaded {} tokens from {}",
        registry.len(),
        config.tokens_file
    );

    let source = HttpRateSource::new(config.quote_endpoint.clone())?;

    match cli.command {
        Some(Commands::Scan) | None => bot::start(&config, registry, source).await,
    }
}
