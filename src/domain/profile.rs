//! Source profiles: the per-retailer configuration driving extraction.
//!
//! Each retailer differs only in thresholds, selector cascades, cleanup rules
//! and price strategy. Adding a store means adding a profile here, not a new
//! code path.

use serde::{Deserialize, Serialize};

/// How to pick the canonical unit price among the tokens found in a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PriceStrategy {
    /// Prefer the first token whose value falls inside the plausible
    /// unit-price band; fall back to the first token overall. Used where a
    /// listing commonly shows pack price and per-egg price side by side.
    UnitBand { min: f64, max: f64 },
    /// Accept the first token unconditionally.
    FirstFound,
}

/// A single end-anchored cleanup rule applied to a raw name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupRule {
    /// Regex pattern; must only ever match a suffix of the string.
    pub pattern: String,
}

impl CleanupRule {
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
        }
    }
}

/// Everything extraction needs to know about one retailer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceProfile {
    /// Store name emitted on every extracted item.
    pub store_name: String,
    /// Category search URL for this store.
    pub search_url: String,
    /// Selector the fetcher waits on before considering the page rendered.
    pub wait_selector: String,
    /// Structural selectors for candidate containers, tried in order.
    pub container_selectors: Vec<String>,
    /// Minimum acceptable item-name length, pre and post cleanup.
    pub min_name_length: usize,
    /// Ordered suffix-stripping rules for raw names.
    pub cleanup_rules: Vec<CleanupRule>,
    /// Unit-price selection strategy.
    pub price_strategy: PriceStrategy,
    /// Category keyword; drives the generic fallback scan and, when
    /// `require_keyword` is set, the final name post-filter.
    pub category_keyword: String,
    /// Whether the cleaned name must contain the category keyword.
    pub require_keyword: bool,
    /// Upper bound on candidates taken from one page.
    pub candidate_cap: usize,
}

impl SourceProfile {
    /// Woolworths NZ: listings decorate names with was/save banners and show
    /// a per-egg unit price next to the pack price.
    pub fn woolworths() -> Self {
        Self {
            store_name: "Woolworths".to_string(),
            search_url: "https://www.woolworths.co.nz/shop/searchproducts?search=Eggs".to_string(),
            wait_selector: "[class*='product'], [class*='Product'], [data-testid*='product']"
                .to_string(),
            container_selectors: vec![
                "div[class*='product']".to_string(),
                "div[class*='Product']".to_string(),
                "article[class*='product']".to_string(),
                "[data-testid*='product']".to_string(),
                ".product-tile".to_string(),
                ".product-item".to_string(),
            ],
            min_name_length: 5,
            cleanup_rules: vec![
                // "$X.XX / 1ea" tails
                CleanupRule::new(r"\$[\d,]+\.?\d{2}\s*/.*$"),
                CleanupRule::new(r"\s*Was\s*\$[\d,]+\.?\d{2}.*$"),
                CleanupRule::new(r"\s*Save\s*\$[\d,]+\.?\d{2}.*$"),
                // any remaining trailing price
                CleanupRule::new(r"\s*\$[\d,]+\.?\d{2}.*$"),
            ],
            price_strategy: PriceStrategy::UnitBand { min: 0.30, max: 2.00 },
            category_keyword: "egg".to_string(),
            require_keyword: true,
            candidate_cap: 30,
        }
    }

    /// Pak'nSave NZ: names carry trailing pack-size numbers; unit prices are
    /// not shown, so the first price on the tile is the one.
    pub fn paknsave() -> Self {
        Self {
            store_name: "Pak'nSave".to_string(),
            search_url: "https://www.paknsave.co.nz/shop/search?pg=1&q=egg".to_string(),
            wait_selector: "[class*='product'], [class*='Product'], [data-testid*='product']"
                .to_string(),
            container_selectors: vec![
                "div[class*='product']".to_string(),
                "div[class*='Product']".to_string(),
                "article[class*='product']".to_string(),
                "[data-testid*='product']".to_string(),
                ".product-tile".to_string(),
                ".product-item".to_string(),
                "li[class*='product']".to_string(),
            ],
            min_name_length: 5,
            cleanup_rules: vec![
                // trailing " - 6" style pack sizes
                CleanupRule::new(r"\s*-\s*\d+\s*$"),
            ],
            price_strategy: PriceStrategy::FirstFound,
            category_keyword: "egg".to_string(),
            require_keyword: true,
            candidate_cap: 30,
        }
    }

    /// All built-in retailer profiles, in crawl order.
    pub fn builtin() -> Vec<Self> {
        vec![Self::woolworths(), Self::paknsave()]
    }
}
