use crate::cache::{CacheStore, Coordinator, MemoryStore};
use crate::config::cli::Command;
use crate::config::Config;
use crate::error::{Result, StatsError};
use crate::services::StatsService;
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

mod cache;
mod config;
mod domain;
mod error;
mod extract;
mod normalize;
mod services;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(e) = run().await {
        // Full diagnostic goes to the log; the caller gets a generic line.
        error!("Request failed: {e}");
        let message = if e.is_upstream() {
            "upstream unavailable"
        } else if matches!(e, StatsError::BadInput(_)) {
            "invalid input"
        } else {
            "internal error"
        };
        eprintln!("error: {message}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = Config::new()?;

    // The store is built before any request runs; nothing races a
    // half-initialized cache.
    let store: Arc<dyn CacheStore> = Arc::new(MemoryStore::new());
    let service = StatsService::new(&config, Coordinator::new(store))?;

    match &config.args.command {
        Command::Player { id } => print_json(&service.player_report(id).await?),
        Command::Matchups { id } => print_json(&service.matchups(id).await?),
        Command::Rating { id } => print_json(&service.highest_rating(id).await?),
        Command::Search { query } => print_json(&service.search(query).await?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
