//! Page fetching with dynamic-content wait semantics.
//!
//! Retail search pages render listings client-side, so a bare GET may return
//! a shell. The fetcher polls a bounded number of times until the profile's
//! wait selector matches. Failure is never surfaced as an error to the core:
//! a source that cannot be fetched degrades to the [`FetchOutcome::TimedOut`]
//! sentinel, which the batch runner treats as zero candidates.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Result of a rendered-page fetch. Deliberately not a `Result`: timing out
/// on one source is expected operation, not a fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Content(String),
    TimedOut,
}

/// Fetch collaborator seam; the batch runner only knows this interface.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_rendered_page(&self, url: &str, wait_selector: &str) -> FetchOutcome;
}

/// Fetcher behavior knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
    /// How many times to re-fetch while waiting for content to render.
    pub wait_attempts: u32,
    /// Delay between wait attempts in milliseconds.
    pub wait_delay_ms: u64,
    /// User agent presented to the sites.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            wait_attempts: 3,
            wait_delay_ms: 3000,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
        }
    }
}

/// HTTP-backed fetcher.
pub struct HttpPageFetcher {
    client: Client,
    config: FetchConfig,
}

impl HttpPageFetcher {
    pub fn new(config: FetchConfig) -> anyhow::Result<Self> {
        let client = ClientBuilder::new()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .cookie_store(true)
            .build()?;
        Ok(Self { client, config })
    }

    async fn get_page(&self, url: &str) -> Option<String> {
        match self.client.get(url).send().await {
            Ok(response) if response.status().is_success() => response.text().await.ok(),
            Ok(response) => {
                warn!("fetch of {url} returned status {}", response.status());
                None
            }
            Err(e) => {
                warn!("fetch of {url} failed: {e}");
                None
            }
        }
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_rendered_page(&self, url: &str, wait_selector: &str) -> FetchOutcome {
        let wait = Selector::parse(wait_selector).ok();
        let mut last_body: Option<String> = None;

        for attempt in 0..self.config.wait_attempts.max(1) {
            if attempt > 0 {
                sleep(Duration::from_millis(self.config.wait_delay_ms)).await;
            }
            let Some(body) = self.get_page(url).await else {
                continue;
            };

            let rendered = match &wait {
                Some(selector) => Html::parse_document(&body).select(selector).next().is_some(),
                // unparseable wait selector: accept whatever came back
                None => true,
            };
            if rendered {
                debug!("page {url} rendered on attempt {}", attempt + 1);
                return FetchOutcome::Content(body);
            }
            debug!("wait selector not present on {url}, attempt {}", attempt + 1);
            last_body = Some(body);
        }

        // The selector never showed up. If we got any body at all, hand the
        // last one over and let extraction decide; otherwise signal timeout.
        match last_body {
            Some(body) => FetchOutcome::Content(body),
            None => {
                warn!("giving up on {url} after {} attempts", self.config.wait_attempts);
                FetchOutcome::TimedOut
            }
        }
    }
}
