//! Domain module - core entities and per-source configuration.

pub mod listing;
pub mod profile;

pub use listing::{identity_hash, ExtractedItem, PersistedRecord, ReconcileCounts, RecordOp};
pub use profile::{CleanupRule, PriceStrategy, SourceProfile};
