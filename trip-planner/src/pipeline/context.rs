//! Per-request state shared by the pipeline stages.

use serde::Serialize;

use crate::domain::{Coord, Journey, RouteResult};
use crate::planner::PlannerConfig;

/// Shown when either place cannot be located.
pub const GEOCODING_FAILED_MESSAGE: &str = "تعذّر تحديد المواقع. جرّب أسماء أدق.";

/// Shown when routing succeeded but nothing survived ranking.
pub const NO_JOURNEYS_MESSAGE: &str = "مع الأسف مفيش رحلات مناسبة دلوقتي.";

/// Shown when the answer could not be written up.
pub const FORMATTING_FAILED_MESSAGE: &str = "حصلت مشكلة واحنا بنجهز الرحلات، جرب تاني.";

const PARSE_FAILED_MESSAGE: &str =
    "مقدرتش أفهم منين لفين. اكتب المكان اللي انت فيه والمكان اللي رايح له.";

const ROUTING_FAILED_MESSAGE: &str = "حصلت مشكلة في حساب الطريق، جرب تاني.";

/// Why a request stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Origin or destination could not be read from the query
    #[error("parse_failed")]
    ParseFailed,

    /// A place name could not be turned into coordinates
    #[error("geocoding_failed")]
    GeocodingFailed,

    /// Routing was reached without both coordinates
    #[error("missing_coordinates")]
    MissingCoordinates,

    /// The routing engine failed or reported an error
    #[error("routing_failed")]
    RoutingFailed,
}

impl ErrorKind {
    /// Message shown to the user when no stage produced one.
    pub fn fallback_message(self) -> &'static str {
        match self {
            ErrorKind::ParseFailed => PARSE_FAILED_MESSAGE,
            ErrorKind::GeocodingFailed | ErrorKind::MissingCoordinates => {
                GEOCODING_FAILED_MESSAGE
            }
            ErrorKind::RoutingFailed => ROUTING_FAILED_MESSAGE,
        }
    }
}

/// Everything known about one request.
///
/// The query and limits are fixed at creation. The error and the final
/// answer are write-once: the first value recorded sticks.
#[derive(Debug, Clone)]
pub struct RequestContext {
    query: String,
    config: PlannerConfig,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub origin_coord: Option<Coord>,
    pub destination_coord: Option<Coord>,
    pub route_response: Option<RouteResult>,
    pub ranked_journeys: Vec<Journey>,
    final_answer: Option<String>,
    error: Option<ErrorKind>,
}

impl RequestContext {
    pub fn new(query: impl Into<String>, config: PlannerConfig) -> Self {
        Self {
            query: query.into(),
            config,
            origin: None,
            destination: None,
            origin_coord: None,
            destination_coord: None,
            route_response: None,
            ranked_journeys: Vec::new(),
            final_answer: None,
            error: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn error(&self) -> Option<ErrorKind> {
        self.error
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Record `kind` unless an error is already set.
    ///
    /// Returns whether this call set it.
    pub fn record_error(&mut self, kind: ErrorKind) -> bool {
        if self.error.is_some() {
            return false;
        }
        self.error = Some(kind);
        true
    }

    pub fn final_answer(&self) -> Option<&str> {
        self.final_answer.as_deref()
    }

    /// Set the answer unless one is already set.
    pub fn set_final_answer(&mut self, answer: impl Into<String>) -> bool {
        if self.final_answer.is_some() {
            return false;
        }
        self.final_answer = Some(answer.into());
        true
    }

    /// Both coordinates, if both were resolved.
    pub fn coords(&self) -> Option<(Coord, Coord)> {
        self.origin_coord.zip(self.destination_coord)
    }
}
