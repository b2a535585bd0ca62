//! CLI entry point: wire up config, crawl, snapshot, persist, report.

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use eggwatch::application::{print_report, reconcile, BatchRunner};
use eggwatch::infrastructure::{
    logging, write_snapshot, AppConfig, CrawlSnapshot, HttpPageFetcher, RecordStore,
};

#[derive(Parser, Debug)]
#[command(name = "eggwatch", about = "Egg price crawler for New Zealand retail stores")]
struct Cli {
    /// Path for the JSON results file
    #[arg(long)]
    output: Option<PathBuf>,

    /// SQLite database path (falls back to EGGWATCH_DATABASE; persistence is
    /// skipped when neither is set)
    #[arg(long)]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging();
    let cli = Cli::parse();

    let mut config = AppConfig::default();
    if let Some(output) = cli.output {
        config.output_path = output;
    }
    config.database_path = cli
        .database
        .or_else(|| std::env::var("EGGWATCH_DATABASE").ok().map(PathBuf::from));

    run(config).await
}

async fn run(config: AppConfig) -> Result<()> {
    let fetcher = Arc::new(HttpPageFetcher::new(config.fetch.clone())?);
    let runner = BatchRunner::new(
        fetcher,
        Duration::from_millis(config.inter_source_delay_ms),
    );

    // An explicitly requested database that cannot open is a startup fault;
    // everything after the crawl is best-effort and never discards results.
    let store = match &config.database_path {
        Some(path) => Some(RecordStore::open(path).await?),
        None => {
            warn!("no database configured, skipping persistence");
            None
        }
    };

    let items = runner.crawl_all(&config.sources).await?;
    let now = Utc::now();

    let snapshot = CrawlSnapshot::new(items.clone(), now);
    if let Err(e) = write_snapshot(&snapshot, &config.output_path).await {
        warn!("failed to write results file: {e:#}");
    }

    if let Some(store) = &store {
        match persist(store, &items, now).await {
            Ok((applied, created, updated)) => {
                info!("processed {applied} products: {created} new, {updated} updated");
            }
            Err(e) => warn!("persistence failed, results still reported below: {e:#}"),
        }
    }

    let stores: Vec<&str> = config
        .sources
        .iter()
        .map(|profile| profile.store_name.as_str())
        .collect();
    print_report(&items, &stores);
    println!("Results saved to: {}\n", config.output_path.display());

    Ok(())
}

async fn persist(
    store: &RecordStore,
    items: &[eggwatch::domain::ExtractedItem],
    now: chrono::DateTime<Utc>,
) -> Result<(usize, usize, usize)> {
    let prior = store.load_snapshot().await?;
    let (operations, counts) = reconcile(items, &prior, now);
    let applied = store.apply(&operations).await?;
    Ok((applied, counts.created, counts.updated))
}
