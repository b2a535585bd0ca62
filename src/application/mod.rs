//! Application module - crawl orchestration, reconciliation, reporting.

pub mod batch_runner;
pub mod reconcile;
pub mod report;

pub use batch_runner::BatchRunner;
pub use reconcile::reconcile;
pub use report::{print_report, render_report};
