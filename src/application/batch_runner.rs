//! Batch runner: drives fetch, candidate selection and extraction per source
//! and aggregates results across all configured retailers.
//!
//! This is the only component that knows which sources exist. A source that
//! fails to fetch or yields nothing degrades to an empty result set; the
//! batch always continues to the next one.

use crate::domain::{ExtractedItem, SourceProfile};
use crate::infrastructure::fetch::{FetchOutcome, PageFetcher};
use crate::infrastructure::parsing::{extract_all, CandidateExtractor, ListingSelector};
use anyhow::Result;
use scraper::Html;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

pub struct BatchRunner {
    fetcher: Arc<dyn PageFetcher>,
    inter_source_delay: Duration,
}

impl BatchRunner {
    pub fn new(fetcher: Arc<dyn PageFetcher>, inter_source_delay: Duration) -> Self {
        Self {
            fetcher,
            inter_source_delay,
        }
    }

    /// Crawl every source in order, with a fixed delay in between.
    pub async fn crawl_all(&self, sources: &[SourceProfile]) -> Result<Vec<ExtractedItem>> {
        let mut all_items = Vec::new();
        for (i, profile) in sources.iter().enumerate() {
            if i > 0 {
                sleep(self.inter_source_delay).await;
            }
            let items = self.crawl_source(profile).await?;
            all_items.extend(items);
        }
        info!("total products found: {}", all_items.len());
        Ok(all_items)
    }

    /// Crawl one source. Only selector-cascade misconfiguration is an error;
    /// an unreachable or empty page is an empty result set.
    pub async fn crawl_source(&self, profile: &SourceProfile) -> Result<Vec<ExtractedItem>> {
        info!("starting {} crawl", profile.store_name);
        let selector = ListingSelector::for_profile(profile)?;
        let extractor = CandidateExtractor::new(profile.clone());

        let body = match self
            .fetcher
            .fetch_rendered_page(&profile.search_url, &profile.wait_selector)
            .await
        {
            FetchOutcome::Content(body) => body,
            FetchOutcome::TimedOut => {
                warn!("{} unavailable, skipping source", profile.store_name);
                return Ok(Vec::new());
            }
        };

        let page = Html::parse_document(&body);
        let candidates = selector.select_candidates(&page);
        let items = extract_all(&extractor, &candidates);

        if items.is_empty() {
            warn!(
                "no products extracted from {}; the page structure may have changed",
                profile.store_name
            );
        } else {
            info!(
                "{} crawl completed, found {} products",
                profile.store_name,
                items.len()
            );
        }
        Ok(items)
    }
}
