//! Web layer for the trip planner.
//!
//! A thin JSON view over the pipeline plus health endpoints.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
