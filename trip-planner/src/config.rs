//! Process configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::geocode::GeocoderConfig;
use crate::llm::LlmConfig;
use crate::planner::PlannerConfig;
use crate::routing::RoutingConfig;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Errors in configuration values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A setting has a value that cannot be used
    #[error("invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub routing: RoutingConfig,
    pub geocoder: GeocoderConfig,
    pub llm: LlmConfig,
    /// Stops reference dataset; `None` means every path id decodes as unknown
    pub stops_dataset: Option<PathBuf>,
    /// Limits used when a request does not override them
    pub planner: PlannerConfig,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `BIND_ADDR` | `127.0.0.1:3000` |
    /// | `ROUTING_SERVER_ADDR` | `http://localhost:50051` |
    /// | `GEOCODER_URL` | public Nominatim |
    /// | `GEOCODER_COUNTRY_CODES` | unset |
    /// | `LLM_BASE_URL` | `https://api.openai.com/v1` |
    /// | `LLM_API_KEY` | empty |
    /// | `LLM_MODEL` | `gpt-4o-mini` |
    /// | `STOPS_DATASET` | unset |
    /// | `WALKING_CUTOFF_METERS` | `1000` |
    /// | `MAX_TRANSFERS` | `2` |
    /// | `TOP_K` | `5` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr = parse_value(
            "BIND_ADDR",
            &get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        )?;

        let routing = match get("ROUTING_SERVER_ADDR") {
            Some(address) => RoutingConfig::new(address),
            None => RoutingConfig::default(),
        };

        let mut geocoder = GeocoderConfig::new();
        if let Some(url) = get("GEOCODER_URL") {
            geocoder = geocoder.with_base_url(url);
        }
        if let Some(codes) = get("GEOCODER_COUNTRY_CODES") {
            geocoder = geocoder.with_country_codes(codes);
        }

        let mut llm = LlmConfig::new(get("LLM_API_KEY").unwrap_or_default());
        if let Some(url) = get("LLM_BASE_URL") {
            llm = llm.with_base_url(url);
        }
        if let Some(model) = get("LLM_MODEL") {
            llm = llm.with_model(model);
        }

        let defaults = PlannerConfig::default();
        let planner = PlannerConfig::new(
            get("WALKING_CUTOFF_METERS")
                .map(|v| parse_value("WALKING_CUTOFF_METERS", &v))
                .transpose()?
                .unwrap_or(defaults.walking_cutoff_meters),
            get("MAX_TRANSFERS")
                .map(|v| parse_value("MAX_TRANSFERS", &v))
                .transpose()?
                .unwrap_or(defaults.max_transfers),
            get("TOP_K")
                .map(|v| parse_value("TOP_K", &v))
                .transpose()?
                .unwrap_or(defaults.top_k),
        )?;

        Ok(Self {
            bind_addr,
            routing,
            geocoder,
            llm,
            stops_dataset: get("STOPS_DATASET").map(PathBuf::from),
            planner,
        })
    }
}

fn parse_value<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.routing.address, "http://localhost:50051");
        assert_eq!(config.geocoder.base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(config.llm.base_url, "https://api.openai.com/v1");
        assert!(config.stops_dataset.is_none());
        assert_eq!(config.planner, PlannerConfig::default());
    }

    #[test]
    fn overrides() {
        let config = config_from(&[
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("ROUTING_SERVER_ADDR", "http://routing_server:50051"),
            ("GEOCODER_URL", "http://nominatim:8080"),
            ("GEOCODER_COUNTRY_CODES", "eg"),
            ("LLM_BASE_URL", "http://ollama:11434/v1"),
            ("LLM_MODEL", "qwen2.5"),
            ("STOPS_DATASET", "/data/stops.json"),
            ("WALKING_CUTOFF_METERS", "750"),
            ("MAX_TRANSFERS", "1"),
            ("TOP_K", "3"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.routing.address, "http://routing_server:50051");
        assert_eq!(config.geocoder.country_codes.as_deref(), Some("eg"));
        assert_eq!(config.llm.model, "qwen2.5");
        assert_eq!(config.stops_dataset, Some(PathBuf::from("/data/stops.json")));
        assert_eq!(config.planner.walking_cutoff_meters, 750.0);
        assert_eq!(config.planner.max_transfers, 1);
        assert_eq!(config.planner.top_k, 3);
    }

    #[test]
    fn blank_values_use_defaults() {
        let config = config_from(&[("TOP_K", "  "), ("STOPS_DATASET", "")]).unwrap();
        assert_eq!(config.planner.top_k, 5);
        assert!(config.stops_dataset.is_none());
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = config_from(&[("MAX_TRANSFERS", "two")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: "MAX_TRANSFERS", .. }));

        let err = config_from(&[("TOP_K", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: "top_k", .. }));

        assert!(config_from(&[("BIND_ADDR", "localhost")]).is_err());
    }
}
