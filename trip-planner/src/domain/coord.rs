//! Geographic coordinate type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate.
///
/// Geocoder failures are never represented as a `Coord`; a lookup either
/// yields a coordinate or an error, so `(0, 0)` is just another point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coord {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
}

impl Coord {
    /// Creates a coordinate without validation.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Creates a coordinate, rejecting non-finite or out-of-range values.
    ///
    /// # Examples
    ///
    /// ```
    /// use trip_planner::domain::Coord;
    ///
    /// assert!(Coord::checked(31.2, 29.9).is_some());
    /// assert!(Coord::checked(91.0, 29.9).is_none());
    /// assert!(Coord::checked(f64::NAN, 0.0).is_none());
    /// ```
    pub fn checked(lat: f64, lon: f64) -> Option<Self> {
        let coord = Self { lat, lon };
        coord.is_valid().then_some(coord)
    }

    /// Returns true if both components are finite and within range.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_accepts_boundaries() {
        assert!(Coord::checked(90.0, 180.0).is_some());
        assert!(Coord::checked(-90.0, -180.0).is_some());
        assert!(Coord::checked(0.0, 0.0).is_some());
    }

    #[test]
    fn checked_rejects_out_of_range() {
        assert!(Coord::checked(90.1, 0.0).is_none());
        assert!(Coord::checked(0.0, -180.5).is_none());
        assert!(Coord::checked(f64::INFINITY, 0.0).is_none());
    }

    #[test]
    fn display_format() {
        let c = Coord::new(31.229689, 29.961393);
        assert_eq!(c.to_string(), "(31.229689, 29.961393)");
    }
}
