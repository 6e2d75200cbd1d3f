//! Catalog Sync - TCGplayer catalog mirror
//!
//! Runs one full synchronization pass: reference data, outdated-set
//! detection, then cards and SKUs for the outdated sets only.

use clap::Parser;
use rusqlite::Connection;
use std::path::PathBuf;

use catalog_sync::{database, CatalogRepository, SyncWorker, TcgPlayerClient};

/// TCGplayer catalog sync - mirrors card sets, cards and SKUs to SQLite
#[derive(Parser, Debug)]
#[command(name = "catalog_sync")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    #[arg(short, long, default_value_t = default_db_path())]
    database: String,

    /// TCGplayer category to sync (3 = Pokemon)
    #[arg(long, default_value_t = 3)]
    category: u32,
}

/// Returns the default database path: ~/.local/share/catalog_sync/catalog.db
fn default_db_path() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("catalog_sync")
        .join("catalog.db")
        .to_string_lossy()
        .to_string()
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let db_path = PathBuf::from(&args.database);

    log::info!("Starting catalog_sync...");
    log::info!("Database path: {}", db_path.display());

    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        if !parent.exists() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::error!("Failed to create database directory: {}", e);
                std::process::exit(1);
            }
            log::info!("Created directory: {}", parent.display());
        }
    }

    // Open database connection
    let mut conn = match Connection::open(&db_path) {
        Ok(conn) => {
            log::info!("Opened database: {}", db_path.display());
            conn
        }
        Err(e) => {
            log::error!("Failed to open database: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize database schema
    if let Err(e) = database::init_schema(&conn) {
        log::error!("Failed to initialize database schema: {}", e);
        std::process::exit(1);
    }

    let bearer_token = std::env::var("TCGPLAYER_BEARER_TOKEN").ok();
    if bearer_token.is_none() {
        log::warn!("TCGPLAYER_BEARER_TOKEN not set, requests go out unauthenticated");
    }

    let client = TcgPlayerClient::new(args.category, bearer_token);
    let worker = SyncWorker::new(CatalogRepository::new(client));

    match worker.run(&mut conn).await {
        Ok(summary) => {
            log::info!(
                "Sync completed: {} outdated sets, {} cards, {} skus",
                summary.outdated_sets,
                summary.cards,
                summary.skus
            );
        }
        Err(e) => {
            log::error!("Sync failed: {}", e);
            std::process::exit(1);
        }
    }
}
