//! Conversion from routing wire messages to domain types.
//!
//! The engine's wire contract is lenient: every scalar may be missing and
//! decodes as zero, nested stops may be absent, and a leg may carry an arm
//! this client does not know. None of these abort a conversion.

use tracing::debug;

use crate::domain::{
    Coord, Journey, JourneySummary, Leg, RouteResult, StopRef, TransferLeg, TripLeg, WalkLeg,
};

use super::error::RoutingError;
use super::proto;

/// Interpret the outcome of a `FindRoute` call.
///
/// - `NOT_FOUND` status: the engine's way of saying "no route"; a
///   successful, empty result.
/// - any other status: `RoutingError::Transport`.
/// - a response with a non-empty `error` field: `RoutingError::Engine`.
pub fn normalize_outcome(
    outcome: Result<proto::RouteResponse, tonic::Status>,
) -> Result<RouteResult, RoutingError> {
    match outcome {
        Ok(response) => convert_route_response(&response),
        Err(status) if status.code() == tonic::Code::NotFound => {
            debug!(detail = status.message(), "routing engine found no route");
            let message = Some(status.message().to_string()).filter(|m| !m.is_empty());
            Ok(RouteResult::empty(message))
        }
        Err(status) => Err(RoutingError::from(status)),
    }
}

/// Convert a `RouteResponse` into a normalized result.
pub fn convert_route_response(
    response: &proto::RouteResponse,
) -> Result<RouteResult, RoutingError> {
    if !response.error.is_empty() {
        return Err(RoutingError::Engine(response.error.clone()));
    }

    let journeys: Vec<Journey> = response.journeys.iter().map(convert_journey).collect();

    Ok(RouteResult {
        journey_count: journeys.len(),
        journeys,
        start_trips_found: i64::from(response.start_trips_found),
        end_trips_found: i64::from(response.end_trips_found),
        total_routes_found: i64::from(response.total_routes_found),
        message: None,
    })
}

/// Convert a single wire journey.
pub fn convert_journey(journey: &proto::Journey) -> Journey {
    let legs = journey
        .legs
        .iter()
        .enumerate()
        .filter_map(|(idx, leg)| {
            let converted = convert_leg(leg);
            if converted.is_none() {
                debug!(journey = journey.id, leg = idx, "skipping leg with no known variant");
            }
            converted
        })
        .collect();

    Journey {
        id: i64::from(journey.id),
        legs,
        summary: journey
            .summary
            .as_ref()
            .map(convert_summary)
            .unwrap_or_default(),
        text_summary: journey.text_summary.clone(),
        path: journey.path.clone(),
        readable_path: None,
    }
}

/// Convert a wire leg; `None` if no known arm is populated.
pub fn convert_leg(leg: &proto::Leg) -> Option<Leg> {
    let kind = leg.kind.as_ref()?;

    let converted = match kind {
        proto::leg::Kind::Walk(walk) => Leg::Walk(WalkLeg {
            distance_meters: i64::from(walk.distance_meters),
            duration_minutes: i64::from(walk.duration_minutes),
            path: convert_path(&walk.path),
        }),
        proto::leg::Kind::Trip(trip) => Leg::Trip(TripLeg {
            trip_id: trip.trip_id.clone(),
            mode: trip.mode.clone(),
            route_short_name: trip.route_short_name.clone(),
            headsign: trip.headsign.clone(),
            fare: trip.fare,
            duration_minutes: i64::from(trip.duration_minutes),
            from: convert_stop(trip.from.as_ref()),
            to: convert_stop(trip.to.as_ref()),
            path: convert_path(&trip.path),
        }),
        proto::leg::Kind::Transfer(transfer) => Leg::Transfer(TransferLeg {
            from_trip_id: transfer.from_trip_id.clone(),
            to_trip_id: transfer.to_trip_id.clone(),
            from_trip_name: transfer.from_trip_name.clone(),
            to_trip_name: transfer.to_trip_name.clone(),
            walking_distance_meters: i64::from(transfer.walking_distance_meters),
            duration_minutes: i64::from(transfer.duration_minutes),
            path: convert_path(&transfer.path),
        }),
    };

    Some(converted)
}

fn convert_summary(summary: &proto::JourneySummary) -> JourneySummary {
    JourneySummary {
        total_time_minutes: i64::from(summary.total_time_minutes),
        total_distance_meters: i64::from(summary.total_distance_meters),
        walking_distance_meters: i64::from(summary.walking_distance_meters),
        transfers: i64::from(summary.transfers),
        cost: summary.cost,
        modes: summary.modes.iter().cloned().collect(),
    }
}

/// A missing stop becomes an unnamed stop at `(0, 0)`.
fn convert_stop(stop: Option<&proto::Stop>) -> StopRef {
    match stop {
        Some(stop) => StopRef {
            stop_id: i64::from(stop.stop_id),
            name: stop.name.clone(),
            coord: stop.coord.as_ref().map(convert_point).unwrap_or_default(),
        },
        None => StopRef::default(),
    }
}

fn convert_point(point: &proto::Point) -> Coord {
    Coord::new(point.lat, point.lon)
}

fn convert_path(path: &[proto::Point]) -> Vec<Coord> {
    path.iter().map(convert_point).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lon: f64, lat: f64) -> proto::Point {
        proto::Point { lon, lat }
    }

    fn walk_leg(distance: i32, duration: i32) -> proto::Leg {
        proto::Leg {
            kind: Some(proto::leg::Kind::Walk(proto::WalkLeg {
                distance_meters: distance,
                duration_minutes: duration,
                path: vec![point(29.96, 31.22), point(29.95, 31.21)],
            })),
        }
    }

    fn trip_leg() -> proto::Leg {
        proto::Leg {
            kind: Some(proto::leg::Kind::Trip(proto::TripLeg {
                trip_id: "FUo5FExiKwUTpyTUJYA7R".into(),
                mode: "tram".into(),
                route_short_name: "2".into(),
                headsign: "Victoria".into(),
                fare: 7.5,
                duration_minutes: 23,
                from: Some(proto::Stop {
                    stop_id: 101,
                    name: "Sidi Gaber".into(),
                    coord: Some(point(29.94, 31.22)),
                }),
                to: Some(proto::Stop {
                    stop_id: 202,
                    name: "Misr Station".into(),
                    coord: Some(point(29.90, 31.19)),
                }),
                path: vec![point(29.94, 31.22)],
            })),
        }
    }

    fn transfer_leg() -> proto::Leg {
        proto::Leg {
            kind: Some(proto::leg::Kind::Transfer(proto::TransferLeg {
                from_trip_id: "A".into(),
                to_trip_id: "B".into(),
                from_trip_name: "Tram 2".into(),
                to_trip_name: "Bus 11".into(),
                walking_distance_meters: 120,
                duration_minutes: 4,
                path: vec![],
            })),
        }
    }

    fn journey(id: i32, legs: Vec<proto::Leg>) -> proto::Journey {
        proto::Journey {
            id,
            legs,
            summary: Some(proto::JourneySummary {
                total_time_minutes: 35,
                total_distance_meters: 5400,
                walking_distance_meters: 450,
                transfers: 0,
                cost: 7.5,
                modes: vec!["tram".into(), "walk".into()],
            }),
            text_summary: "Walk then tram 2".into(),
            path: vec!["FUo5FExiKwUTpyTUJYA7R-07:00:00".into()],
        }
    }

    fn response(journeys: Vec<proto::Journey>) -> proto::RouteResponse {
        proto::RouteResponse {
            num_journeys: journeys.len() as i32,
            journeys,
            start_trips_found: 12,
            end_trips_found: 9,
            total_routes_found: 40,
            error: String::new(),
        }
    }

    #[test]
    fn walk_and_trip_normalize_to_one_each() {
        let wire = journey(1, vec![walk_leg(450, 6), trip_leg()]);
        let converted = convert_journey(&wire);

        assert_eq!(converted.legs.len(), 2);

        match &converted.legs[0] {
            Leg::Walk(walk) => {
                let distance: i64 = walk.distance_meters;
                assert_eq!(distance, 450);
                assert_eq!(walk.duration_minutes, 6);
                assert_eq!(walk.path.len(), 2);
                assert_eq!(walk.path[0], Coord::new(31.22, 29.96));
            }
            other => panic!("expected walk, got {other:?}"),
        }

        match &converted.legs[1] {
            Leg::Trip(trip) => {
                let fare: f64 = trip.fare;
                assert_eq!(fare, 7.5);
                assert_eq!(trip.duration_minutes, 23);
                assert_eq!(trip.from.stop_id, 101);
                assert_eq!(trip.from.name, "Sidi Gaber");
                assert_eq!(trip.to.coord, Coord::new(31.19, 29.90));
                assert_eq!(trip.route_short_name, "2");
            }
            other => panic!("expected trip, got {other:?}"),
        }
    }

    #[test]
    fn transfer_fields_are_kept() {
        let converted = convert_journey(&journey(2, vec![transfer_leg()]));
        match &converted.legs[0] {
            Leg::Transfer(t) => {
                assert_eq!(t.from_trip_name, "Tram 2");
                assert_eq!(t.to_trip_name, "Bus 11");
                assert_eq!(t.walking_distance_meters, 120);
                assert_eq!(t.duration_minutes, 4);
            }
            other => panic!("expected transfer, got {other:?}"),
        }
    }

    #[test]
    fn empty_leg_is_skipped_not_fatal() {
        let wire = journey(3, vec![walk_leg(100, 2), proto::Leg { kind: None }, trip_leg()]);
        let converted = convert_journey(&wire);

        assert_eq!(converted.legs.len(), 2);
        assert!(matches!(converted.legs[0], Leg::Walk(_)));
        assert!(matches!(converted.legs[1], Leg::Trip(_)));
    }

    #[test]
    fn missing_stops_and_summary_default_to_zero() {
        let wire = proto::Journey {
            id: 4,
            legs: vec![proto::Leg {
                kind: Some(proto::leg::Kind::Trip(proto::TripLeg::default())),
            }],
            summary: None,
            text_summary: String::new(),
            path: vec![],
        };

        let converted = convert_journey(&wire);
        assert_eq!(converted.summary, JourneySummary::default());

        let Leg::Trip(trip) = &converted.legs[0] else {
            panic!("expected trip, got {:?}", converted.legs[0]);
        };
        assert_eq!(trip.from, StopRef::default());
        assert_eq!(trip.to.coord, Coord::new(0.0, 0.0));
        assert_eq!(trip.fare, 0.0);
    }

    #[test]
    fn summary_and_diagnostics_carried_over() {
        let result = convert_route_response(&response(vec![journey(7, vec![trip_leg()])])).unwrap();

        assert_eq!(result.journey_count, 1);
        assert_eq!(result.start_trips_found, 12);
        assert_eq!(result.end_trips_found, 9);
        assert_eq!(result.total_routes_found, 40);

        let summary = &result.journeys[0].summary;
        assert_eq!(summary.total_time_minutes, 35);
        assert_eq!(summary.walking_distance_meters, 450);
        assert_eq!(summary.cost, 7.5);
        assert!(summary.modes.contains("tram"));
        assert_eq!(result.journeys[0].path, vec!["FUo5FExiKwUTpyTUJYA7R-07:00:00"]);
        assert!(result.journeys[0].readable_path.is_none());
    }

    #[test]
    fn error_payload_is_engine_error() {
        let mut wire = response(vec![journey(1, vec![walk_leg(1, 1)])]);
        wire.error = "graph not loaded".into();

        let err = convert_route_response(&wire).unwrap_err();
        assert!(matches!(err, RoutingError::Engine(ref m) if m == "graph not loaded"));
    }

    #[test]
    fn not_found_status_is_empty_success() {
        let outcome = Err(tonic::Status::not_found("no suitable trips"));
        let result = normalize_outcome(outcome).unwrap();

        assert_eq!(result.journey_count, 0);
        assert!(result.journeys.is_empty());
        assert_eq!(result.message.as_deref(), Some("no suitable trips"));
    }

    #[test]
    fn other_status_is_transport_error() {
        let outcome = Err(tonic::Status::unavailable("connection refused"));
        let err = normalize_outcome(outcome).unwrap_err();

        assert!(matches!(
            err,
            RoutingError::Transport {
                code: tonic::Code::Unavailable,
                ..
            }
        ));
    }

    #[test]
    fn conversion_is_idempotent() {
        let wire = response(vec![
            journey(1, vec![walk_leg(450, 6), trip_leg()]),
            journey(2, vec![trip_leg(), transfer_leg(), trip_leg()]),
        ]);

        let first = convert_route_response(&wire).unwrap();
        let second = convert_route_response(&wire).unwrap();
        assert_eq!(first, second);
    }
}
