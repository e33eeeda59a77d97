//! Journey leg types.
//!
//! A `Leg` is exactly one of walking, riding a transit trip, or
//! transferring between trips. Distances and durations are whole
//! meters/minutes; fares and coordinates are floating point.

use serde::Serialize;

use super::Coord;

/// A walking segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalkLeg {
    pub distance_meters: i64,
    pub duration_minutes: i64,
    pub path: Vec<Coord>,
}

/// A stop at either end of a trip leg.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StopRef {
    pub stop_id: i64,
    pub name: String,
    pub coord: Coord,
}

/// A ride on a single transit trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripLeg {
    pub trip_id: String,
    /// Transport mode (e.g. "bus", "tram", "microbus")
    pub mode: String,
    pub route_short_name: String,
    pub headsign: String,
    pub fare: f64,
    pub duration_minutes: i64,
    pub from: StopRef,
    pub to: StopRef,
    pub path: Vec<Coord>,
}

/// A change from one trip to another, possibly with a short walk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferLeg {
    pub from_trip_id: String,
    pub to_trip_id: String,
    pub from_trip_name: String,
    pub to_trip_name: String,
    pub walking_distance_meters: i64,
    pub duration_minutes: i64,
    pub path: Vec<Coord>,
}

/// One segment of a journey.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Leg {
    Walk(WalkLeg),
    Trip(TripLeg),
    Transfer(TransferLeg),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip() -> TripLeg {
        TripLeg {
            trip_id: "T1".into(),
            mode: "tram".into(),
            route_short_name: "2".into(),
            headsign: "Victoria".into(),
            fare: 5.5,
            duration_minutes: 18,
            from: StopRef::default(),
            to: StopRef::default(),
            path: vec![],
        }
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(Leg::Trip(trip())).unwrap();
        assert_eq!(json["type"], "trip");
        assert_eq!(json["route_short_name"], "2");
        assert_eq!(json["fare"], 5.5);
    }
}
