//! Journey selection.
//!
//! The routing engine does the search; this module holds the limits a
//! request runs under and the ranking applied to whatever the engine
//! returns.

mod config;
mod rank;

pub use config::PlannerConfig;
pub use rank::{compare_journeys, filter_sort};
