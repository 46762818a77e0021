//! Analytics module for placement statistics
//!
//! Folds the raw per-student round records into company-level, round-level,
//! and cohort-level statistics for the placement dashboard.
//!
//! ## Architecture
//!
//! - **Aggregation**: a pure, deterministic fold over a `CohortSnapshot`
//! - **Reports**: derived views, rebuilt on demand, never patched in place
//! - **Data quality**: unresolvable entries are skipped and surfaced as
//!   warnings on the report, never a hard failure

mod types;


pub use types::*;

/// Calculator module for report computation
pub mod calculator;
