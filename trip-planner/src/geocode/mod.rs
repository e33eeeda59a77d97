//! Place-name geocoding.
//!
//! Turns the free-text place names pulled out of a query into
//! coordinates. A failed lookup is always an `Err`, never a placeholder
//! coordinate.

mod cache;
mod error;
mod mock;
mod nominatim;

use async_trait::async_trait;

use crate::domain::Coord;

pub use cache::{CachedGeocoder, GeocodeCacheConfig};
pub use error::GeocodeError;
pub use mock::StaticGeocoder;
pub use nominatim::{GeocoderConfig, NominatimClient};

/// Resolves a place name to a coordinate.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, place: &str) -> Result<Coord, GeocodeError>;
}
