//! Routing engine client and protocol adapter.
//!
//! The routing engine is a separate service reached over gRPC
//! (`routing.RoutingService`, see `proto/routing.proto`). This module
//! provides:
//! - the wire types and a unary client (`proto`)
//! - `RoutingClient`, which builds requests and reports health
//! - the adapter that turns a raw response, or a failed call, into a
//!   plain `RouteResult`
//!
//! Points of note about the engine:
//! - `NOT_FOUND` means "no route between these points" and is reported
//!   as an empty result, not a failure
//! - legs arrive as a tagged union; legs with no populated arm are skipped
//! - missing numeric fields read as zero

mod client;
mod convert;
mod error;
mod mock;
pub mod proto;

pub use client::{
    GrpcRouteEngine, HealthStatus, RouteEngine, RoutingClient, RoutingConfig, RoutingWeights,
};
pub use convert::{convert_route_response, normalize_outcome};
pub use error::RoutingError;
pub use mock::MockRouteEngine;
