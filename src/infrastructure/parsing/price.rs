//! Price tokenizer: find every currency amount in a text blob, in order.

use once_cell::sync::Lazy;
use regex::Regex;

/// Currency symbol, comma-grouped digits, optional two-decimal fraction.
static PRICE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$[\d,]+\.?\d{2}").expect("price pattern is valid"));

/// Looser fallback: bare two-decimal number, optionally already prefixed.
static LOOSE_PRICE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$?\d+\.\d{2}").expect("loose price pattern is valid"));

/// A substring recognized as a currency amount.
///
/// `text` keeps the original formatting verbatim so output echoes the page
/// ("$1.99" stays "$1.99"); `value` is the parsed decimal amount.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceToken {
    pub text: String,
    pub value: f64,
}

/// Scan `text` for currency amounts, left to right.
///
/// Pure function. The primary pattern wins when it matches at all; only if it
/// finds nothing does the loose pattern run, synthesizing a `$`-prefixed token
/// from each bare number. A substring that fails numeric parsing after symbol
/// stripping is skipped, never an error.
pub fn tokenize(text: &str) -> Vec<PriceToken> {
    let primary: Vec<PriceToken> = PRICE_PATTERN
        .find_iter(text)
        .filter_map(|m| token_from_match(m.as_str(), m.as_str()))
        .collect();
    if !primary.is_empty() {
        return primary;
    }

    LOOSE_PRICE_PATTERN
        .find_iter(text)
        .filter_map(|m| {
            let bare = m.as_str().trim_start_matches('$');
            token_from_match(&format!("${bare}"), bare)
        })
        .collect()
}

fn token_from_match(display: &str, numeric: &str) -> Option<PriceToken> {
    let value: f64 = numeric.replace(['$', ','], "").parse().ok()?;
    Some(PriceToken {
        text: display.to_string(),
        value,
    })
}
