//! Summary statistics over freshly fetched entity collections.
//!
//! # Responsibility
//! - Pure, synchronous aggregation (counts, rates, means, modes, breakdowns).
//!
//! # Invariants
//! - No I/O and no error paths: empty input yields zero defaults.

pub mod aggregator;
pub mod frequency;

pub use aggregator::{
    average_package, count, placement_rate, status_breakdown, status_breakdown_with_total,
    top_branch, StatusBreakdown, StatusCount,
};
pub use frequency::FrequencyTable;
