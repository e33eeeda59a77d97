//! Routing engine client.
//!
//! `RoutingClient` is what the pipeline talks to: it builds the wire
//! request from coordinates and per-request limits, calls the engine, and
//! hands the outcome to the adapter in `convert`. The engine itself sits
//! behind the `RouteEngine` trait so tests can substitute a mock.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tonic::transport::Endpoint;
use tracing::debug;

use crate::domain::{Coord, RouteResult};
use crate::planner::PlannerConfig;

use super::convert::normalize_outcome;
use super::error::RoutingError;
use super::proto::{self, RoutingServiceClient};

/// Default routing server address.
const DEFAULT_ADDRESS: &str = "http://localhost:50051";

/// Relative weights the engine applies when scoring candidate routes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutingWeights {
    pub time: f64,
    pub cost: f64,
    pub walk: f64,
    pub transfer: f64,
}

impl Default for RoutingWeights {
    fn default() -> Self {
        Self {
            time: 1.0,
            cost: 1.0,
            walk: 1.0,
            transfer: 1.0,
        }
    }
}

/// Configuration for the routing client.
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    /// gRPC endpoint, e.g. `http://routing_server:50051`
    pub address: String,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Transport modes the engine must not use
    pub restricted_modes: Vec<String>,
    /// Scoring weights; `None` leaves the engine's defaults in place
    pub weights: Option<RoutingWeights>,
}

impl RoutingConfig {
    /// Create a config for the given server address.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            connect_timeout_secs: 5,
            timeout_secs: 30,
            restricted_modes: Vec::new(),
            weights: None,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Exclude transport modes from routing.
    pub fn with_restricted_modes(mut self, modes: Vec<String>) -> Self {
        self.restricted_modes = modes;
        self
    }

    /// Set scoring weights.
    pub fn with_weights(mut self, weights: RoutingWeights) -> Self {
        self.weights = Some(weights);
        self
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESS)
    }
}

/// The remote routing engine.
#[async_trait]
pub trait RouteEngine: Send + Sync {
    /// Issue a `FindRoute` call.
    async fn find_route(
        &self,
        request: proto::RouteRequest,
    ) -> Result<proto::RouteResponse, tonic::Status>;

    /// Issue a `HealthCheck` call.
    async fn health_check(&self) -> Result<proto::HealthResponse, tonic::Status>;
}

/// `RouteEngine` backed by a gRPC channel.
#[derive(Debug, Clone)]
pub struct GrpcRouteEngine {
    client: RoutingServiceClient,
}

impl GrpcRouteEngine {
    /// Create an engine handle that connects on first use.
    ///
    /// Start-up does not require the routing server to be reachable;
    /// connection failures surface as `Unavailable` on the first call.
    pub fn connect_lazy(config: &RoutingConfig) -> Result<Self, RoutingError> {
        let endpoint = Endpoint::from_shared(config.address.clone()).map_err(|e| {
            RoutingError::InvalidAddress {
                address: config.address.clone(),
                message: e.to_string(),
            }
        })?;

        let channel = endpoint
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_lazy();

        Ok(Self {
            client: RoutingServiceClient::new(channel),
        })
    }
}

#[async_trait]
impl RouteEngine for GrpcRouteEngine {
    async fn find_route(
        &self,
        request: proto::RouteRequest,
    ) -> Result<proto::RouteResponse, tonic::Status> {
        let mut client = self.client.clone();
        client
            .find_route(request)
            .await
            .map(tonic::Response::into_inner)
    }

    async fn health_check(&self) -> Result<proto::HealthResponse, tonic::Status> {
        let mut client = self.client.clone();
        client
            .health_check(proto::HealthRequest {})
            .await
            .map(tonic::Response::into_inner)
    }
}

/// Health of the routing engine as seen from this client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

impl HealthStatus {
    /// Status reported when the engine cannot be reached.
    pub const UNREACHABLE: &'static str = "unreachable";
}

/// Routing client used by the pipeline.
#[derive(Clone)]
pub struct RoutingClient {
    engine: Arc<dyn RouteEngine>,
    config: RoutingConfig,
}

impl RoutingClient {
    /// Create a client talking gRPC to `config.address`.
    pub fn new(config: RoutingConfig) -> Result<Self, RoutingError> {
        let engine = GrpcRouteEngine::connect_lazy(&config)?;
        Ok(Self::with_engine(Arc::new(engine), config))
    }

    /// Create a client over any engine implementation.
    pub fn with_engine(engine: Arc<dyn RouteEngine>, config: RoutingConfig) -> Self {
        Self { engine, config }
    }

    /// Build the wire request for a trip between two coordinates.
    pub fn build_request(
        &self,
        start: Coord,
        end: Coord,
        limits: &PlannerConfig,
    ) -> proto::RouteRequest {
        proto::RouteRequest {
            start_lon: start.lon,
            start_lat: start.lat,
            end_lon: end.lon,
            end_lat: end.lat,
            max_transfers: i32::try_from(limits.max_transfers).unwrap_or(i32::MAX),
            walking_cutoff: limits.walking_cutoff_meters,
            restricted_modes: self.config.restricted_modes.clone(),
            weights: self.config.weights.map(|w| proto::RoutingWeights {
                time: w.time,
                cost: w.cost,
                walk: w.walk,
                transfer: w.transfer,
            }),
            top_k: i32::try_from(limits.top_k).unwrap_or(i32::MAX),
        }
    }

    /// Find routes between two coordinates.
    ///
    /// "No route" comes back as an empty `RouteResult`, not an error.
    pub async fn find_route(
        &self,
        start: Coord,
        end: Coord,
        limits: &PlannerConfig,
    ) -> Result<RouteResult, RoutingError> {
        let request = self.build_request(start, end, limits);
        debug!(%start, %end, max_transfers = request.max_transfers, "calling routing engine");

        let outcome = self.engine.find_route(request).await;
        let result = normalize_outcome(outcome);

        if let Ok(routes) = &result {
            debug!(
                journeys = routes.journey_count,
                start_trips = routes.start_trips_found,
                end_trips = routes.end_trips_found,
                "routing engine answered"
            );
        }

        result
    }

    /// Ask the engine for its health.
    ///
    /// Never fails: an unreachable engine is reported as status
    /// `"unreachable"` with the transport error as the message.
    pub async fn health_check(&self) -> HealthStatus {
        match self.engine.health_check().await {
            Ok(response) => HealthStatus {
                status: response.status,
                message: response.message,
            },
            Err(status) => HealthStatus {
                status: HealthStatus::UNREACHABLE.to_string(),
                message: status.message().to_string(),
            },
        }
    }
}
