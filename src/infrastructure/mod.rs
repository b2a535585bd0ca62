//! Infrastructure module - parsing, fetching, persistence, configuration.

pub mod config;
pub mod fetch;
pub mod logging;
pub mod parsing;
pub mod record_store;
pub mod snapshot;

pub use config::AppConfig;
pub use fetch::{FetchConfig, FetchOutcome, HttpPageFetcher, PageFetcher};
pub use record_store::RecordStore;
pub use snapshot::{write_snapshot, CrawlSnapshot};
