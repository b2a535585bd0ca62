//! JSON results file: one object per run with crawl date and product list.

use crate::domain::ExtractedItem;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// On-disk shape of the results file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlSnapshot {
    pub crawl_date: DateTime<Utc>,
    pub total_products: usize,
    pub products: Vec<ExtractedItem>,
}

impl CrawlSnapshot {
    pub fn new(products: Vec<ExtractedItem>, crawl_date: DateTime<Utc>) -> Self {
        Self {
            crawl_date,
            total_products: products.len(),
            products,
        }
    }
}

/// Write the snapshot to `path`, pretty-printed, overwriting any prior run.
pub async fn write_snapshot(snapshot: &CrawlSnapshot, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("writing results to {}", path.display()))?;
    info!("results saved to {}", path.display());
    Ok(())
}
