//! Candidate extractor: decide whether one candidate fragment is a valid
//! listing and derive its clean name and canonical unit price.
//!
//! One generic, profile-driven decision procedure covers every retailer; the
//! per-source differences live entirely in [`SourceProfile`]. Any internal
//! fault is converted to a [`Rejection`] locally — a single candidate's
//! failure never aborts the listing.

use scraper::ElementRef;
use tracing::{debug, trace};

use super::error::{ExtractResult, Rejection};
use super::fragment;
use super::name::{normalize, CompiledRules};
use super::price::{tokenize, PriceToken};
use crate::domain::{ExtractedItem, PriceStrategy, SourceProfile};

/// Heading tags considered when resolving a name structurally.
const HEADING_TAGS: &[&str] = &["h2", "h3", "h4"];
/// Tags the class-hinted first cascade step looks at.
const TITLE_TAGS: &[&str] = &["h2", "h3", "h4", "a"];
/// Class-attribute substrings suggesting title/name semantics.
const TITLE_CLASS_HINTS: &[&str] = &["title", "name", "heading"];
/// Generic labels too vague to accept as an item name.
const GENERIC_LABELS: &[&str] = &["special", "sale", "new"];
/// Minimum length for a keyword-bearing fallback text line.
const FALLBACK_LINE_MIN_LEN: usize = 10;

/// Profile-driven extractor for one retailer's candidate fragments.
pub struct CandidateExtractor {
    profile: SourceProfile,
    cleanup_rules: CompiledRules,
}

impl CandidateExtractor {
    pub fn new(profile: SourceProfile) -> Self {
        let cleanup_rules = CompiledRules::compile(&profile.cleanup_rules);
        Self {
            profile,
            cleanup_rules,
        }
    }

    pub fn profile(&self) -> &SourceProfile {
        &self.profile
    }

    /// Extract a validated item from one candidate fragment.
    pub fn extract(&self, candidate: ElementRef<'_>) -> ExtractResult<ExtractedItem> {
        let raw_name = self.resolve_name(candidate)?;
        let name = normalize(&raw_name, &self.cleanup_rules);
        if name.chars().count() < self.profile.min_name_length {
            return Err(Rejection::name_too_short(&name, self.profile.min_name_length));
        }

        let price = self.resolve_price(candidate)?;

        if self.profile.require_keyword {
            let keyword = self.profile.category_keyword.to_lowercase();
            if !name.to_lowercase().contains(&keyword) {
                return Err(Rejection::category_mismatch(&name, &keyword));
            }
        }

        Ok(ExtractedItem {
            store: self.profile.store_name.clone(),
            item_name: name,
            price: price.text,
        })
    }

    /// Ordered name-resolution cascade; stops at the first qualifying result.
    ///
    /// 1. class-hinted heading/anchor, 2. anchor with destination, 3. bare
    /// heading, 4. keyword-bearing text line. Step 4 also rescues structural
    /// hits that are too short or a generic label ("Special", "Sale", "New").
    fn resolve_name(&self, candidate: ElementRef<'_>) -> ExtractResult<String> {
        let structural = fragment::find_first(candidate, TITLE_TAGS, |el| {
            fragment::class_contains_any(el, TITLE_CLASS_HINTS)
        })
        .or_else(|| fragment::find_first(candidate, &["a"], |el| fragment::has_attr(el, "href")))
        .or_else(|| fragment::find_first(candidate, HEADING_TAGS, |_| true))
        .map(|el| fragment::text_content(el, true));

        let needs_rescue = match &structural {
            Some(name) => {
                name.chars().count() < self.profile.min_name_length
                    || GENERIC_LABELS.contains(&name.to_lowercase().as_str())
            }
            None => true,
        };

        let name = if needs_rescue {
            self.keyword_line(candidate).or(structural)
        } else {
            structural
        };

        match name {
            Some(name) if name.chars().count() >= self.profile.min_name_length => {
                trace!("resolved candidate name '{name}'");
                Ok(name)
            }
            _ => Err(Rejection::NoName),
        }
    }

    /// Fallback: first text line mentioning the category keyword and long
    /// enough to be a real product name rather than a label.
    fn keyword_line(&self, candidate: ElementRef<'_>) -> Option<String> {
        let keyword = self.profile.category_keyword.to_lowercase();
        fragment::text_lines(candidate)
            .into_iter()
            .find(|line| {
                line.to_lowercase().contains(&keyword)
                    && line.chars().count() > FALLBACK_LINE_MIN_LEN
            })
    }

    /// Tokenize the fragment's full text and apply the profile's strategy.
    fn resolve_price(&self, candidate: ElementRef<'_>) -> ExtractResult<PriceToken> {
        let full_text = fragment::text_content(candidate, false);
        let tokens = tokenize(&full_text);
        if tokens.is_empty() {
            return Err(Rejection::NoPrice);
        }

        let chosen = match self.profile.price_strategy {
            PriceStrategy::UnitBand { min, max } => tokens
                .iter()
                .find(|token| token.value >= min && token.value <= max)
                .or_else(|| tokens.first()),
            PriceStrategy::FirstFound => tokens.first(),
        };

        match chosen {
            Some(token) => Ok(token.clone()),
            // unreachable with a non-empty token list, but a strategy bug
            // must reject the candidate, not panic the listing
            None => Err(Rejection::malformed("price strategy selected no token")),
        }
    }
}

/// Run the extractor over a whole candidate list, logging rejections at debug
/// and keeping only accepted items.
pub fn extract_all(
    extractor: &CandidateExtractor,
    candidates: &[ElementRef<'_>],
) -> Vec<ExtractedItem> {
    let mut items = Vec::new();
    for (index, candidate) in candidates.iter().enumerate() {
        match extractor.extract(*candidate) {
            Ok(item) => {
                debug!(
                    "accepted candidate {index}: {} - {}",
                    item.item_name, item.price
                );
                items.push(item);
            }
            Err(rejection) => {
                debug!("rejected candidate {index}: {rejection}");
            }
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn extract_with(profile: SourceProfile, html: &str) -> ExtractResult<ExtractedItem> {
        let document = Html::parse_fragment(html);
        CandidateExtractor::new(profile).extract(document.root_element())
    }

    #[test]
    fn class_hinted_title_wins_over_plain_anchor() {
        let item = extract_with(
            SourceProfile::woolworths(),
            r#"<div>
                <a href="/shop/product/1">view</a>
                <h3 class="product-title">Free Range Eggs 12pk</h3>
                <span>$7.99</span>
            </div>"#,
        )
        .unwrap();
        assert_eq!(item.item_name, "Free Range Eggs 12pk");
        assert_eq!(item.price, "$7.99");
        assert_eq!(item.store, "Woolworths");
    }

    #[test]
    fn anchor_with_href_is_second_choice() {
        let item = extract_with(
            SourceProfile::woolworths(),
            r#"<div><a href="/p/2">Barn Laid Eggs 6pk</a><span>$5.49</span></div>"#,
        )
        .unwrap();
        assert_eq!(item.item_name, "Barn Laid Eggs 6pk");
    }

    #[test]
    fn bare_heading_is_third_choice() {
        let item = extract_with(
            SourceProfile::woolworths(),
            r#"<div><h2>Organic Eggs 10pk</h2><span>$11.49</span></div>"#,
        )
        .unwrap();
        assert_eq!(item.item_name, "Organic Eggs 10pk");
    }

    #[test]
    fn generic_label_is_rescued_by_keyword_line() {
        let item = extract_with(
            SourceProfile::woolworths(),
            "<div><h3>Sale</h3>\n<p>Size 7 Free Range Eggs 12 Pack</p>\n<span>$8.99</span></div>",
        )
        .unwrap();
        assert_eq!(item.item_name, "Size 7 Free Range Eggs 12 Pack");
    }

    #[test]
    fn generic_label_without_keyword_line_is_rejected() {
        let result = extract_with(
            SourceProfile::woolworths(),
            "<div><h3>Sale</h3>\n<span>$8.99</span></div>",
        );
        assert_eq!(result, Err(Rejection::NoName));
    }

    #[test]
    fn unit_band_prefers_small_price_over_first() {
        let item = extract_with(
            SourceProfile::woolworths(),
            r#"<div><h3 class="name">Free Range Eggs 12pk</h3>
                <span>$7.99</span><span>$0.67 / 1ea</span></div>"#,
        )
        .unwrap();
        assert_eq!(item.price, "$0.67");
    }

    #[test]
    fn unit_band_falls_back_to_first_token() {
        let item = extract_with(
            SourceProfile::woolworths(),
            r#"<div><h3 class="name">Free Range Eggs 12pk</h3>
                <span>$7.99</span><span>$9.50</span></div>"#,
        )
        .unwrap();
        assert_eq!(item.price, "$7.99");
    }

    #[test]
    fn first_found_ignores_the_band() {
        let item = extract_with(
            SourceProfile::paknsave(),
            r#"<div><h3 class="product-name">Mixed Grade Eggs 20pk</h3>
                <span>$12.89</span><span>$0.64</span></div>"#,
        )
        .unwrap();
        assert_eq!(item.price, "$12.89");
    }

    #[test]
    fn missing_price_rejects_instead_of_emitting_empty_field() {
        let result = extract_with(
            SourceProfile::woolworths(),
            r#"<div><h3 class="name">Free Range Eggs 12pk</h3></div>"#,
        );
        assert_eq!(result, Err(Rejection::NoPrice));
    }

    #[test]
    fn name_collapsing_under_cleanup_is_rejected() {
        let result = extract_with(
            SourceProfile::woolworths(),
            r#"<div><h3 class="name">$7.99 / 1ea</h3><span>$7.99</span></div>"#,
        );
        assert!(matches!(
            result,
            Err(Rejection::NameTooShortAfterCleanup { .. })
        ));
    }

    #[test]
    fn category_mismatch_is_rejected() {
        let result = extract_with(
            SourceProfile::woolworths(),
            r#"<div><h3 class="name">Chicken Breast 500g</h3><span>$9.99</span></div>"#,
        );
        assert!(matches!(result, Err(Rejection::CategoryMismatch { .. })));
    }

    #[test]
    fn keyword_filter_can_be_relaxed_per_profile() {
        let mut profile = SourceProfile::woolworths();
        profile.require_keyword = false;
        let item = extract_with(
            profile,
            r#"<div><h3 class="name">Chicken Breast 500g</h3><span>$9.99</span></div>"#,
        )
        .unwrap();
        assert_eq!(item.item_name, "Chicken Breast 500g");
    }

    #[test]
    fn pack_size_suffix_is_stripped_for_paknsave() {
        let item = extract_with(
            SourceProfile::paknsave(),
            r#"<div><h3 class="product-name">Barn Laid Eggs - 6</h3><span>$5.99</span></div>"#,
        )
        .unwrap();
        assert_eq!(item.item_name, "Barn Laid Eggs");
    }
}
