//! Caching layer in front of a geocoder.
//!
//! Place names repeat a lot within a session ("the station", the user's
//! home district), so successful lookups are kept for a while. Failures
//! are never cached.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::Coord;

use super::Geocoder;
use super::error::GeocodeError;

/// Configuration for the geocode cache.
#[derive(Debug, Clone)]
pub struct GeocodeCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for GeocodeCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Geocoder with caching.
///
/// Wraps any `Geocoder`; keys are trimmed, lower-cased place names.
pub struct CachedGeocoder {
    inner: Arc<dyn Geocoder>,
    places: MokaCache<String, Coord>,
}

impl CachedGeocoder {
    pub fn new(inner: Arc<dyn Geocoder>, config: &GeocodeCacheConfig) -> Self {
        let places = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, places }
    }
}

fn cache_key(place: &str) -> String {
    place.trim().to_lowercase()
}

#[async_trait]
impl Geocoder for CachedGeocoder {
    async fn geocode(&self, place: &str) -> Result<Coord, GeocodeError> {
        let key = cache_key(place);

        if let Some(coord) = self.places.get(&key).await {
            debug!(place, "geocode cache hit");
            return Ok(coord);
        }

        let coord = self.inner.geocode(place).await?;
        self.places.insert(key, coord).await;
        Ok(coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocode::StaticGeocoder;

    #[tokio::test]
    async fn repeated_lookups_hit_cache() {
        let inner = Arc::new(StaticGeocoder::new().with_place("Raml", Coord::new(31.2, 29.9)));
        let cached = CachedGeocoder::new(inner.clone(), &GeocodeCacheConfig::default());

        let first = cached.geocode("Raml").await.unwrap();
        let second = cached.geocode("  raml ").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(inner.calls(), 1);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let inner = Arc::new(StaticGeocoder::new());
        let cached = CachedGeocoder::new(inner.clone(), &GeocodeCacheConfig::default());

        assert!(cached.geocode("Atlantis").await.is_err());
        assert!(cached.geocode("Atlantis").await.is_err());

        assert_eq!(inner.calls(), 2);
    }
}
