//! eggwatch - egg price crawler for New Zealand retail stores.
//!
//! Extracts (store, item name, unit price) records from retail listing pages
//! using a tolerant, profile-driven heuristic cascade, then reconciles the
//! batch against a persisted store so repeated runs update rather than
//! duplicate records.

pub mod application;
pub mod domain;
pub mod infrastructure;
