//! Listing selector: locate candidate fragments on a full listing page.
//!
//! The structural selectors are tried in order and the first one yielding any
//! match wins outright — later selectors are never unioned in. Only when the
//! whole cascade comes up empty does the keyword fallback scan the document
//! for generically-marked content blocks.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use super::fragment;
use crate::domain::SourceProfile;
use anyhow::{anyhow, Result};

/// Content-block tags the keyword fallback considers.
const FALLBACK_TAGS: &[&str] = &["div", "article", "li"];

/// Compiled selector cascade for one source's listing pages.
pub struct ListingSelector {
    selectors: Vec<Selector>,
    fallback_keyword: String,
    candidate_cap: usize,
}

impl ListingSelector {
    pub fn for_profile(profile: &SourceProfile) -> Result<Self> {
        Ok(Self {
            selectors: compile_selectors(&profile.container_selectors)?,
            fallback_keyword: profile.category_keyword.to_lowercase(),
            candidate_cap: profile.candidate_cap,
        })
    }

    /// Candidate fragments in document order, capped at the profile's limit.
    pub fn select_candidates<'a>(&self, page: &'a Html) -> Vec<ElementRef<'a>> {
        for (i, selector) in self.selectors.iter().enumerate() {
            let matches: Vec<ElementRef<'a>> = page.select(selector).collect();
            if !matches.is_empty() {
                debug!(
                    "found {} candidates with container selector #{i}",
                    matches.len()
                );
                return self.cap(matches);
            }
        }

        debug!("no structural selector matched, trying keyword fallback");
        let matches = fragment::find_all(page.root_element(), FALLBACK_TAGS, |el| {
            fragment::class_contains_any(el, &[self.fallback_keyword.as_str(), "product"])
        });
        self.cap(matches)
    }

    fn cap<'a>(&self, mut matches: Vec<ElementRef<'a>>) -> Vec<ElementRef<'a>> {
        if matches.len() > self.candidate_cap {
            debug!(
                "capping {} candidates to {}",
                matches.len(),
                self.candidate_cap
            );
            matches.truncate(self.candidate_cap);
        }
        matches
    }
}

/// Compile selector strings, warning about and skipping the invalid ones.
/// Fails only when nothing compiles at all.
fn compile_selectors(selector_strings: &[String]) -> Result<Vec<Selector>> {
    let mut selectors = Vec::new();
    let mut errors = Vec::new();

    for selector_str in selector_strings {
        match Selector::parse(selector_str) {
            Ok(selector) => selectors.push(selector),
            Err(e) => {
                warn!("failed to compile selector '{selector_str}': {e}");
                errors.push(selector_str.clone());
            }
        }
    }

    if selectors.is_empty() {
        return Err(anyhow!(
            "no valid container selectors compiled (invalid: {})",
            errors.join(", ")
        ));
    }

    Ok(selectors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector_for(selectors: &[&str], cap: usize) -> ListingSelector {
        let mut profile = SourceProfile::woolworths();
        profile.container_selectors = selectors.iter().map(|s| s.to_string()).collect();
        profile.candidate_cap = cap;
        ListingSelector::for_profile(&profile).unwrap()
    }

    #[test]
    fn first_matching_selector_wins_without_union() {
        let page = Html::parse_document(
            r#"<html><body>
                <section class="tile">a</section>
                <div class="listing-row">1</div>
                <div class="listing-row">2</div>
                <div class="listing-row">3</div>
            </body></html>"#,
        );
        // selector #1 matches nothing, #2 matches three rows, #3 would match
        // the section but must never be tried
        let selector = selector_for(&[".missing", ".listing-row", "section.tile"], 30);
        let candidates = selector.select_candidates(&page);
        assert_eq!(candidates.len(), 3);
        assert!(candidates
            .iter()
            .all(|el| el.value().attr("class") == Some("listing-row")));
    }

    #[test]
    fn keyword_fallback_scans_generic_blocks() {
        let page = Html::parse_document(
            r#"<html><body>
                <div class="egg-promo">Free Range Eggs $7.99</div>
                <li class="product-cell">Barn Eggs $6.49</li>
                <div class="news-item">unrelated</div>
            </body></html>"#,
        );
        let selector = selector_for(&[".does-not-exist"], 30);
        let candidates = selector.select_candidates(&page);
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn fallback_results_are_capped_in_document_order() {
        let blocks: String = (0..40)
            .map(|i| format!(r#"<div class="product-box">item {i}</div>"#))
            .collect();
        let page = Html::parse_document(&format!("<html><body>{blocks}</body></html>"));
        let selector = selector_for(&[".does-not-exist"], 20);
        let candidates = selector.select_candidates(&page);
        assert_eq!(candidates.len(), 20);
        assert_eq!(fragment::text_content(candidates[0], true), "item 0");
        assert_eq!(fragment::text_content(candidates[19], true), "item 19");
    }

    #[test]
    fn structural_results_are_capped_too() {
        let blocks: String = (0..40)
            .map(|i| format!(r#"<div class="listing-row">item {i}</div>"#))
            .collect();
        let page = Html::parse_document(&format!("<html><body>{blocks}</body></html>"));
        let selector = selector_for(&[".listing-row"], 25);
        assert_eq!(selector.select_candidates(&page).len(), 25);
    }

    #[test]
    fn all_invalid_selectors_is_a_startup_error() {
        let mut profile = SourceProfile::woolworths();
        profile.container_selectors = vec!["???bad".to_string()];
        assert!(ListingSelector::for_profile(&profile).is_err());
    }
}
