//! Request orchestration.
//!
//! A query goes through four stages in a fixed order:
//!
//! 1. `IntentExtraction` - origin and destination names from free text
//! 2. `Geocoding` - both names to coordinates, looked up concurrently
//! 3. `RouteComputation` - journeys from the routing engine
//! 4. `ResponseFormatting` - rank, decode paths, write the answer
//!
//! Failures are recorded on the `RequestContext` rather than returned;
//! every run ends with a message for the user.

mod context;
mod stage;
mod stages;


use std::sync::Arc;

use tracing::{debug, info};

use crate::geocode::Geocoder;
use crate::llm::{IntentExtractor, ItineraryFormatter};
use crate::planner::PlannerConfig;
use crate::routing::RoutingClient;
use crate::stops::PathDecoder;

pub use context::{
    ErrorKind, FORMATTING_FAILED_MESSAGE, GEOCODING_FAILED_MESSAGE, NO_JOURNEYS_MESSAGE,
    RequestContext,
};
pub use stage::Stage;
pub use stages::{Geocoding, IntentExtraction, ResponseFormatting, RouteComputation};

/// Runs the stages over one request at a time.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// The standard four-stage pipeline.
    pub fn new(
        extractor: Arc<dyn IntentExtractor>,
        geocoder: Arc<dyn Geocoder>,
        routing: RoutingClient,
        formatter: Arc<dyn ItineraryFormatter>,
        decoder: PathDecoder,
    ) -> Self {
        Self::with_stages(vec![
            Box::new(IntentExtraction::new(extractor)),
            Box::new(Geocoding::new(geocoder)),
            Box::new(RouteComputation::new(routing)),
            Box::new(ResponseFormatting::new(formatter, decoder)),
        ])
    }

    pub fn with_stages(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// Run every stage over a fresh context for `query`.
    pub async fn run(&self, query: impl Into<String>, config: PlannerConfig) -> RequestContext {
        let mut ctx = RequestContext::new(query, config);

        for stage in &self.stages {
            debug!(stage = stage.name(), "running stage");
            stage.run(&mut ctx).await;
        }

        info!(
            error = ?ctx.error(),
            journeys = ctx.ranked_journeys.len(),
            "request finished"
        );
        ctx
    }
}
