//! Mock routing engine for testing without a running server.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::client::RouteEngine;
use super::proto::{HealthResponse, RouteRequest, RouteResponse};

/// Canned answer to `FindRoute`; errors are stored as code and message
/// because `tonic::Status` is not `Clone`.
type Outcome = Result<RouteResponse, (tonic::Code, String)>;

/// Routing engine that replays a fixed outcome and records its calls.
pub struct MockRouteEngine {
    outcome: Outcome,
    find_route_calls: AtomicUsize,
    last_request: Mutex<Option<RouteRequest>>,
}

impl MockRouteEngine {
    /// Answer every `FindRoute` with `response`.
    pub fn responding(response: RouteResponse) -> Self {
        Self::with_outcome(Ok(response))
    }

    /// Answer every call with an RPC failure.
    pub fn failing(code: tonic::Code, message: impl Into<String>) -> Self {
        Self::with_outcome(Err((code, message.into())))
    }

    /// Answer with a successful response carrying no journeys.
    pub fn empty() -> Self {
        Self::responding(RouteResponse::default())
    }

    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            find_route_calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// How many times `find_route` has been called.
    pub fn find_route_calls(&self) -> usize {
        self.find_route_calls.load(Ordering::SeqCst)
    }

    /// The most recent request seen by `find_route`.
    pub fn last_request(&self) -> Option<RouteRequest> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RouteEngine for MockRouteEngine {
    async fn find_route(&self, request: RouteRequest) -> Result<RouteResponse, tonic::Status> {
        self.find_route_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request);
        }

        match &self.outcome {
            Ok(response) => Ok(response.clone()),
            Err((code, message)) => Err(tonic::Status::new(*code, message.clone())),
        }
    }

    async fn health_check(&self) -> Result<HealthResponse, tonic::Status> {
        match &self.outcome {
            Ok(_) => Ok(HealthResponse {
                status: "SERVING".to_string(),
                message: "mock routing engine".to_string(),
            }),
            Err((code, message)) => Err(tonic::Status::new(*code, message.clone())),
        }
    }
}
