//! Geocoder error types.

/// Errors from a geocoding lookup.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The geocoder answered with a non-success status
    #[error("geocoder error {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body was not what we expected
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The geocoder has no match for the place
    #[error("no location found for {place:?}")]
    NotFound { place: String },

    /// The geocoder returned coordinates outside the valid range
    #[error("geocoder returned invalid coordinates ({lat}, {lon})")]
    InvalidCoordinates { lat: String, lon: String },

    /// The client could not be constructed
    #[error("geocoder not configured: {0}")]
    NotConfigured(String),
}
