//! Tolerant field extraction over inconsistently marked-up listing pages.
//!
//! The pipeline: [`listing_selector`] locates candidate fragments on a page,
//! [`candidate`] decides per fragment whether it is a valid item, composing
//! the [`price`] tokenizer and [`name`] normalizer, with [`fragment`]
//! providing the narrow document-model helpers everything is written against.

pub mod candidate;
pub mod error;
pub mod fragment;
pub mod listing_selector;
pub mod name;
pub mod price;

pub use candidate::{extract_all, CandidateExtractor};
pub use error::{ExtractResult, Rejection};
pub use listing_selector::ListingSelector;
pub use name::{normalize, CompiledRules};
pub use price::{tokenize, PriceToken};
