//! Certificate Tracker CLI
//!
//! Runs the HTTP server, or performs one-shot searches against the board.

use std::path::PathBuf;
use std::sync::Arc;

use certificate_tracker::{
    config,
    error::{AppError, Result},
    logging,
    models::Config,
    server::{
        self,
        response::{ApiResponse, SearchData},
    },
    services::{BoardSource, CertificateService, MondayClient, Normalizer},
};
use clap::{Parser, Subcommand};

/// Certificate Tracker - crew certificate search over a monday.com board
#[derive(Parser, Debug)]
#[command(
    name = "certificate-tracker",
    version,
    about = "Crew certificate search over a monday.com board"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API and static page server
    Serve {
        /// Override the listening port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Search certificates by owner name and print the results
    Search {
        /// Case-insensitive name fragment
        term: String,
    },

    /// Print the raw board snapshot
    Dump,

    /// Validate configuration files
    Validate,
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = config::load_config(&cli.config);
    logging::init(&config.logging, cli.verbose);

    tracing::info!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            validate(&config)?;
            server::serve(&config).await?;
        }

        Command::Search { term } => {
            let term = term.trim();
            if term.is_empty() {
                return Err(AppError::validation("search term must not be blank"));
            }
            validate(&config)?;

            let service = CertificateService::new(
                Arc::new(MondayClient::new(&config.monday)?),
                Normalizer::new(config.fallback_expiry.clone()),
            );
            let results = service.search(term).await?;
            let envelope = ApiResponse::new(SearchData::for_term(term, results));
            let json = serde_json::to_string_pretty(&envelope)?;
            println!("{json}");
        }

        Command::Dump => {
            validate(&config)?;
            let snapshot = MondayClient::new(&config.monday)?.fetch_board().await?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }

        Command::Validate => {
            tracing::info!("Validating configuration...");
            validate(&config)?;
            tracing::info!(
                "✓ Config OK (board {}, {:?} query, {} fallback subject(s))",
                config.monday.board_id,
                config.monday.query,
                config.fallback_expiry.len()
            );
        }
    }

    Ok(())
}

fn validate(config: &Config) -> Result<()> {
    config.validate().inspect_err(|e| {
        tracing::error!("Config validation failed: {}", e);
    })
}
