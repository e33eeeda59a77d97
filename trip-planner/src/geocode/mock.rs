//! Static geocoder for tests and offline runs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::Coord;

use super::Geocoder;
use super::error::GeocodeError;

/// Geocoder that answers from a fixed table.
///
/// Unknown places fail with `NotFound`. Counts every lookup.
#[derive(Debug, Default)]
pub struct StaticGeocoder {
    places: HashMap<String, Coord>,
    calls: AtomicUsize,
}

impl StaticGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a known place.
    pub fn with_place(mut self, name: impl Into<String>, coord: Coord) -> Self {
        self.places.insert(name.into().trim().to_lowercase(), coord);
        self
    }

    /// Number of lookups so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn geocode(&self, place: &str) -> Result<Coord, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.places
            .get(&place.trim().to_lowercase())
            .copied()
            .ok_or_else(|| GeocodeError::NotFound {
                place: place.to_string(),
            })
    }
}
