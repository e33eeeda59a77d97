//! Journey types.
//!
//! A `Journey` is one candidate route returned by the routing engine,
//! normalized into typed legs plus the engine's aggregate summary.

use std::collections::BTreeSet;

use serde::Serialize;

use super::Leg;

/// Aggregate figures for a journey, as computed by the routing engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct JourneySummary {
    pub total_time_minutes: i64,
    pub total_distance_meters: i64,
    pub walking_distance_meters: i64,
    pub transfers: i64,
    pub cost: f64,
    pub modes: BTreeSet<String>,
}

/// A complete journey from origin to destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Journey {
    pub id: i64,
    pub legs: Vec<Leg>,
    pub summary: JourneySummary,
    pub text_summary: String,
    /// Opaque `<key>-<timestamp>` identifiers of the stops/trips visited.
    pub path: Vec<String>,
    /// Human-readable form of `path`, filled in after ranking.
    pub readable_path: Option<Vec<String>>,
}

/// Normalized result of one routing request.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RouteResult {
    pub journeys: Vec<Journey>,
    pub journey_count: usize,
    /// Candidate trips found near the origin (diagnostic only).
    pub start_trips_found: i64,
    /// Candidate trips found near the destination (diagnostic only).
    pub end_trips_found: i64,
    pub total_routes_found: i64,
    /// Detail attached by the engine to a "no route" outcome.
    pub message: Option<String>,
}

impl RouteResult {
    /// A successful result with no journeys.
    pub fn empty(message: Option<String>) -> Self {
        Self {
            message,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result() {
        let result = RouteResult::empty(Some("no suitable trips".into()));
        assert!(result.journeys.is_empty());
        assert_eq!(result.journey_count, 0);
        assert_eq!(result.message.as_deref(), Some("no suitable trips"));
    }
}
