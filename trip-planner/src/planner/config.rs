//! Per-request planning limits.

use crate::config::ConfigError;

/// Limits applied to one planning request.
///
/// Immutable once a request starts; overrides build a new value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerConfig {
    /// Maximum walking distance the engine may use at either end (meters).
    pub walking_cutoff_meters: f64,

    /// Maximum number of vehicle changes.
    pub max_transfers: u32,

    /// Maximum number of journeys to keep after ranking.
    pub top_k: usize,
}

impl PlannerConfig {
    /// Create a validated configuration.
    pub fn new(
        walking_cutoff_meters: f64,
        max_transfers: u32,
        top_k: usize,
    ) -> Result<Self, ConfigError> {
        if !walking_cutoff_meters.is_finite() || walking_cutoff_meters < 0.0 {
            return Err(ConfigError::InvalidValue {
                name: "walking_cutoff_meters",
                value: walking_cutoff_meters.to_string(),
                reason: "must be a finite, non-negative distance".to_string(),
            });
        }
        if top_k == 0 {
            return Err(ConfigError::InvalidValue {
                name: "top_k",
                value: top_k.to_string(),
                reason: "must keep at least one journey".to_string(),
            });
        }

        Ok(Self {
            walking_cutoff_meters,
            max_transfers,
            top_k,
        })
    }

    /// Apply optional overrides on top of this configuration.
    pub fn with_overrides(
        &self,
        walking_cutoff_meters: Option<f64>,
        max_transfers: Option<u32>,
        top_k: Option<usize>,
    ) -> Result<Self, ConfigError> {
        Self::new(
            walking_cutoff_meters.unwrap_or(self.walking_cutoff_meters),
            max_transfers.unwrap_or(self.max_transfers),
            top_k.unwrap_or(self.top_k),
        )
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            walking_cutoff_meters: 1000.0,
            max_transfers: 2,
            top_k: 5,
        }
    }
}
