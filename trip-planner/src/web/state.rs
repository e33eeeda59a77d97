//! Application state for the web layer.

use std::sync::Arc;

use crate::pipeline::Pipeline;
use crate::planner::PlannerConfig;
use crate::routing::RoutingClient;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Request pipeline
    pub pipeline: Arc<Pipeline>,

    /// Routing client, for health reporting
    pub routing: RoutingClient,

    /// Limits used when a request does not override them
    pub config: Arc<PlannerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(pipeline: Pipeline, routing: RoutingClient, config: PlannerConfig) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            routing,
            config: Arc::new(config),
        }
    }
}
