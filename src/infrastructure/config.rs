//! Application configuration.
//!
//! Built explicitly in `main` and passed down; the core never reads the
//! environment or holds process-wide mutable state.

use crate::domain::SourceProfile;
use crate::infrastructure::fetch::FetchConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path the JSON results file is written to each run.
    pub output_path: PathBuf,
    /// SQLite database path; `None` skips persistence with a warning.
    pub database_path: Option<PathBuf>,
    /// Delay between source crawls in milliseconds.
    pub inter_source_delay_ms: u64,
    /// Fetcher behavior.
    pub fetch: FetchConfig,
    /// Retailer profiles, crawled in order.
    pub sources: Vec<SourceProfile>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("egg_prices.json"),
            database_path: None,
            inter_source_delay_ms: 2000,
            fetch: FetchConfig::default(),
            sources: SourceProfile::builtin(),
        }
    }
}
