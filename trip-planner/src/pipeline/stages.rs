//! The four stages a planning request goes through.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future;
use tracing::{debug, info, warn};

use crate::geocode::Geocoder;
use crate::llm::{IntentExtractor, ItineraryFormatter};
use crate::planner::filter_sort;
use crate::routing::RoutingClient;
use crate::stops::PathDecoder;

use super::context::{
    ErrorKind, FORMATTING_FAILED_MESSAGE, GEOCODING_FAILED_MESSAGE, NO_JOURNEYS_MESSAGE,
    RequestContext,
};
use super::stage::Stage;

/// Reads origin and destination out of the query.
pub struct IntentExtraction {
    extractor: Arc<dyn IntentExtractor>,
}

impl IntentExtraction {
    pub fn new(extractor: Arc<dyn IntentExtractor>) -> Self {
        Self { extractor }
    }
}

#[async_trait]
impl Stage for IntentExtraction {
    fn name(&self) -> &'static str {
        "intent"
    }

    async fn run(&self, ctx: &mut RequestContext) {
        if ctx.has_error() {
            debug!(stage = self.name(), "skipped");
            return;
        }

        let intent = self.extractor.extract(ctx.query()).await;
        let complete = intent.is_complete();
        ctx.origin = intent.origin;
        ctx.destination = intent.destination;

        if !complete {
            ctx.record_error(ErrorKind::ParseFailed);
            info!(
                stage = self.name(),
                error = %ErrorKind::ParseFailed,
                "could not read origin and destination"
            );
        }
    }
}

/// Resolves both place names to coordinates.
pub struct Geocoding {
    geocoder: Arc<dyn Geocoder>,
}

impl Geocoding {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self { geocoder }
    }
}

#[async_trait]
impl Stage for Geocoding {
    fn name(&self) -> &'static str {
        "geocode"
    }

    async fn run(&self, ctx: &mut RequestContext) {
        if ctx.has_error() {
            debug!(stage = self.name(), "skipped");
            return;
        }
        let (Some(origin), Some(destination)) = (ctx.origin.as_deref(), ctx.destination.as_deref())
        else {
            debug!(stage = self.name(), "no places to look up");
            return;
        };

        let (origin_result, destination_result) = future::join(
            self.geocoder.geocode(origin),
            self.geocoder.geocode(destination),
        )
        .await;

        match (origin_result, destination_result) {
            (Ok(origin), Ok(destination)) => {
                debug!(stage = self.name(), %origin, %destination, "places located");
                ctx.origin_coord = Some(origin);
                ctx.destination_coord = Some(destination);
            }
            (origin_result, destination_result) => {
                if let Err(e) = origin_result {
                    warn!(stage = self.name(), error = %e, "origin lookup failed");
                }
                if let Err(e) = destination_result {
                    warn!(stage = self.name(), error = %e, "destination lookup failed");
                }
                ctx.origin_coord = None;
                ctx.destination_coord = None;
                ctx.record_error(ErrorKind::GeocodingFailed);
                ctx.set_final_answer(GEOCODING_FAILED_MESSAGE);
            }
        }
    }
}

/// Asks the routing engine for journeys between the two coordinates.
pub struct RouteComputation {
    routing: RoutingClient,
}

impl RouteComputation {
    pub fn new(routing: RoutingClient) -> Self {
        Self { routing }
    }
}

#[async_trait]
impl Stage for RouteComputation {
    fn name(&self) -> &'static str {
        "route"
    }

    async fn run(&self, ctx: &mut RequestContext) {
        let Some((start, end)) = ctx.coords() else {
            if ctx.record_error(ErrorKind::MissingCoordinates) {
                info!(
                    stage = self.name(),
                    error = %ErrorKind::MissingCoordinates,
                    "no coordinates to route between"
                );
            } else {
                debug!(stage = self.name(), "skipped");
            }
            return;
        };
        if ctx.has_error() {
            debug!(stage = self.name(), "skipped");
            return;
        }

        match self.routing.find_route(start, end, ctx.config()).await {
            Ok(result) => {
                debug!(stage = self.name(), journeys = result.journey_count, "routes received");
                ctx.route_response = Some(result);
            }
            Err(e) => {
                warn!(stage = self.name(), error = %e, "routing failed");
                ctx.record_error(ErrorKind::RoutingFailed);
            }
        }
    }
}

/// Ranks, decodes and writes up the journeys, or explains what went wrong.
pub struct ResponseFormatting {
    formatter: Arc<dyn ItineraryFormatter>,
    decoder: PathDecoder,
}

impl ResponseFormatting {
    pub fn new(formatter: Arc<dyn ItineraryFormatter>, decoder: PathDecoder) -> Self {
        Self { formatter, decoder }
    }
}

#[async_trait]
impl Stage for ResponseFormatting {
    fn name(&self) -> &'static str {
        "format"
    }

    async fn run(&self, ctx: &mut RequestContext) {
        if let Some(kind) = ctx.error() {
            ctx.set_final_answer(kind.fallback_message());
            debug!(stage = self.name(), error = %kind, "answering with error message");
            return;
        }

        let journeys = ctx
            .route_response
            .as_ref()
            .map(|r| r.journeys.clone())
            .unwrap_or_default();

        let mut ranked = filter_sort(journeys, ctx.config().top_k);
        for journey in &mut ranked {
            journey.readable_path = Some(self.decoder.decode_path(&journey.path));
        }
        ctx.ranked_journeys = ranked;

        if ctx.ranked_journeys.is_empty() {
            debug!(stage = self.name(), "no journeys to present");
            ctx.set_final_answer(NO_JOURNEYS_MESSAGE);
            return;
        }

        let origin = ctx.origin.as_deref().unwrap_or_default();
        let destination = ctx.destination.as_deref().unwrap_or_default();
        let answer = match self
            .formatter
            .format(origin, destination, &ctx.ranked_journeys)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                warn!(stage = self.name(), error = %e, "formatting failed");
                FORMATTING_FAILED_MESSAGE.to_string()
            }
        };
        ctx.set_final_answer(answer);
    }
}
