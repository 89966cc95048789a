#![forbid(unsafe_code)]

mod catalog;
mod config;
mod constants;
mod designs;
mod error;
mod layout;
mod report;
mod selection;
mod session;
mod shell;
mod types;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use tracing::{Level as TraceLevel, info};
use tracing_subscriber::FmtSubscriber;

use catalog::{CatalogFilter, CatalogStore, PriceRange, StyleFilter};
use config::Settings;
use error::GalleryError;
use session::Session;

#[derive(Debug, Parser)]
#[command(name = "gallery-wall", version, about = "Plan gallery walls from an artwork catalog")]
struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog document, overriding the configured one
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List catalog artworks
    Catalog {
        /// Exact style label, or "All"
        #[arg(long)]
        style: Option<String>,
        #[arg(long)]
        min_price: Option<f64>,
        #[arg(long)]
        max_price: Option<f64>,
    },
    /// List saved designs
    Designs,
    /// Describe one saved design by id or name
    ShowDesign { key: String },
    /// Start an interactive design session (default)
    Shell,
}

fn init_tracing() -> Result<()> {
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    // stdout carries command output
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn open_store(settings: &Settings) -> Result<CatalogStore, GalleryError> {
    let mut store = CatalogStore::new(&settings.database_path);
    store.load()?;
    Ok(store)
}

fn main() -> Result<()> {
    init_tracing()?;
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Settings::default_path);
    let mut settings = Settings::load_from(&config_path)?;
    if let Some(database) = cli.database {
        settings.database_path = database;
    }
    info!(database = %settings.database_path.display(), "Using catalog document");

    let mut stdout = io::stdout().lock();
    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Catalog {
            style,
            min_price,
            max_price,
        } => {
            let mut store = open_store(&settings)?;
            let catalog = store.load()?;
            let defaults = PriceRange::default();
            let filter = CatalogFilter {
                style: style.as_deref().map(StyleFilter::parse).unwrap_or_default(),
                price: PriceRange::new(
                    min_price.unwrap_or(defaults.min),
                    max_price.unwrap_or(defaults.max),
                ),
            };
            write!(stdout, "{}", report::catalog_listing(filter.apply(catalog.artworks())))?;
        }
        Commands::Designs => {
            let mut store = open_store(&settings)?;
            write!(stdout, "{}", report::design_listing(store.load()?.designs()))?;
        }
        Commands::ShowDesign { key } => {
            let mut store = open_store(&settings)?;
            let catalog = store.load()?;
            let design = designs::find(catalog.designs(), &key)
                .ok_or_else(|| GalleryError::design_not_found(&key))?;
            write!(stdout, "{}", report::design_summary(design))?;
        }
        Commands::Shell => {
            let mut session = Session::start(settings).context("Cannot start a design session")?;
            let stdin = io::stdin();
            let prompt = stdin.is_terminal();
            shell::run(&mut session, stdin.lock(), &mut stdout, prompt)?;
        }
    }

    Ok(())
}
