//! Nominatim-compatible HTTP geocoder.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use tracing::debug;

use crate::domain::Coord;

use super::Geocoder;
use super::error::GeocodeError;

/// Default base URL (public OpenStreetMap instance).
const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim's usage policy requires an identifying user agent.
const DEFAULT_USER_AGENT: &str = concat!("trip-planner/", env!("CARGO_PKG_VERSION"));

/// Configuration for the geocoder client.
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    /// Base URL of the Nominatim-compatible service
    pub base_url: String,
    /// Restrict matches to these ISO country codes (comma separated)
    pub country_codes: Option<String>,
    /// User agent sent with every request
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GeocoderConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            country_codes: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Restrict matches to the given countries, e.g. `"eg"`.
    pub fn with_country_codes(mut self, codes: impl Into<String>) -> Self {
        self.country_codes = Some(codes.into());
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One search hit. Nominatim encodes coordinates as strings.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

/// Geocoder backed by the Nominatim `/search` endpoint.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: String,
    country_codes: Option<String>,
}

impl NominatimClient {
    pub fn new(config: GeocoderConfig) -> Result<Self, GeocodeError> {
        let mut headers = HeaderMap::new();
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|_| GeocodeError::NotConfigured("invalid user agent".to_string()))?;
        headers.insert(USER_AGENT, user_agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            country_codes: config.country_codes,
        })
    }
}

/// Pick the first hit and validate its coordinates.
fn first_coord(place: &str, hits: Vec<Place>) -> Result<Coord, GeocodeError> {
    let hit = hits.into_iter().next().ok_or_else(|| GeocodeError::NotFound {
        place: place.to_string(),
    })?;

    let invalid = || GeocodeError::InvalidCoordinates {
        lat: hit.lat.clone(),
        lon: hit.lon.clone(),
    };
    let lat: f64 = hit.lat.trim().parse().map_err(|_| invalid())?;
    let lon: f64 = hit.lon.trim().parse().map_err(|_| invalid())?;
    let coord = Coord::checked(lat, lon).ok_or_else(invalid)?;

    debug!(place, matched = hit.display_name.as_deref(), %coord, "geocoded");
    Ok(coord)
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn geocode(&self, place: &str) -> Result<Coord, GeocodeError> {
        let url = format!("{}/search", self.base_url);

        let mut query = vec![("q", place), ("format", "jsonv2"), ("limit", "1")];
        if let Some(codes) = &self.country_codes {
            query.push(("countrycodes", codes.as_str()));
        }

        let response = self.http.get(&url).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let hits: Vec<Place> = serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
            message: e.to_string(),
        })?;

        first_coord(place, hits)
    }
}
