//! Wire types and gRPC client for the routing engine.
//!
//! Mirrors `proto/routing.proto`. The messages are declared directly with
//! prost derives so the crate builds without `protoc`; keep tags in sync
//! with the `.proto` file.

use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RoutingWeights {
    #[prost(double, tag = "1")]
    pub time: f64,
    #[prost(double, tag = "2")]
    pub cost: f64,
    #[prost(double, tag = "3")]
    pub walk: f64,
    #[prost(double, tag = "4")]
    pub transfer: f64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RouteRequest {
    #[prost(double, tag = "1")]
    pub start_lon: f64,
    #[prost(double, tag = "2")]
    pub start_lat: f64,
    #[prost(double, tag = "3")]
    pub end_lon: f64,
    #[prost(double, tag = "4")]
    pub end_lat: f64,
    #[prost(int32, tag = "5")]
    pub max_transfers: i32,
    #[prost(double, tag = "6")]
    pub walking_cutoff: f64,
    #[prost(string, repeated, tag = "7")]
    pub restricted_modes: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(message, optional, tag = "8")]
    pub weights: ::core::option::Option<RoutingWeights>,
    #[prost(int32, tag = "9")]
    pub top_k: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Point {
    #[prost(double, tag = "1")]
    pub lon: f64,
    #[prost(double, tag = "2")]
    pub lat: f64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Stop {
    #[prost(int32, tag = "1")]
    pub stop_id: i32,
    #[prost(string, tag = "2")]
    pub name: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "3")]
    pub coord: ::core::option::Option<Point>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct WalkLeg {
    #[prost(int32, tag = "1")]
    pub distance_meters: i32,
    #[prost(int32, tag = "2")]
    pub duration_minutes: i32,
    #[prost(message, repeated, tag = "3")]
    pub path: ::prost::alloc::vec::Vec<Point>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TripLeg {
    #[prost(string, tag = "1")]
    pub trip_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub mode: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub route_short_name: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub headsign: ::prost::alloc::string::String,
    #[prost(double, tag = "5")]
    pub fare: f64,
    #[prost(int32, tag = "6")]
    pub duration_minutes: i32,
    #[prost(message, optional, tag = "7")]
    pub from: ::core::option::Option<Stop>,
    #[prost(message, optional, tag = "8")]
    pub to: ::core::option::Option<Stop>,
    #[prost(message, repeated, tag = "9")]
    pub path: ::prost::alloc::vec::Vec<Point>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransferLeg {
    #[prost(string, tag = "1")]
    pub from_trip_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub to_trip_id: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub from_trip_name: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub to_trip_name: ::prost::alloc::string::String,
    #[prost(int32, tag = "5")]
    pub walking_distance_meters: i32,
    #[prost(int32, tag = "6")]
    pub duration_minutes: i32,
    #[prost(message, repeated, tag = "7")]
    pub path: ::prost::alloc::vec::Vec<Point>,
}

/// A journey leg; exactly one arm of `kind` is populated on the wire.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Leg {
    #[prost(oneof = "leg::Kind", tags = "1, 2, 3")]
    pub kind: ::core::option::Option<leg::Kind>,
}

/// Nested types for `Leg`.
pub mod leg {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Kind {
        #[prost(message, tag = "1")]
        Walk(super::WalkLeg),
        #[prost(message, tag = "2")]
        Trip(super::TripLeg),
        #[prost(message, tag = "3")]
        Transfer(super::TransferLeg),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct JourneySummary {
    #[prost(int32, tag = "1")]
    pub total_time_minutes: i32,
    #[prost(int32, tag = "2")]
    pub total_distance_meters: i32,
    #[prost(int32, tag = "3")]
    pub walking_distance_meters: i32,
    #[prost(int32, tag = "4")]
    pub transfers: i32,
    #[prost(double, tag = "5")]
    pub cost: f64,
    #[prost(string, repeated, tag = "6")]
    pub modes: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Journey {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(message, repeated, tag = "2")]
    pub legs: ::prost::alloc::vec::Vec<Leg>,
    #[prost(message, optional, tag = "3")]
    pub summary: ::core::option::Option<JourneySummary>,
    #[prost(string, tag = "4")]
    pub text_summary: ::prost::alloc::string::String,
    #[prost(string, repeated, tag = "5")]
    pub path: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RouteResponse {
    #[prost(int32, tag = "1")]
    pub num_journeys: i32,
    #[prost(message, repeated, tag = "2")]
    pub journeys: ::prost::alloc::vec::Vec<Journey>,
    #[prost(int32, tag = "3")]
    pub start_trips_found: i32,
    #[prost(int32, tag = "4")]
    pub end_trips_found: i32,
    #[prost(int32, tag = "5")]
    pub total_routes_found: i32,
    #[prost(string, tag = "6")]
    pub error: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HealthRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HealthResponse {
    #[prost(string, tag = "1")]
    pub status: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub message: ::prost::alloc::string::String,
}

const FIND_ROUTE_PATH: &str = "/routing.RoutingService/FindRoute";
const HEALTH_CHECK_PATH: &str = "/routing.RoutingService/HealthCheck";

/// Unary gRPC client for `routing.RoutingService`.
#[derive(Debug, Clone)]
pub struct RoutingServiceClient {
    inner: tonic::client::Grpc<Channel>,
}

impl RoutingServiceClient {
    /// Wrap an existing channel.
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    pub async fn find_route(
        &mut self,
        request: impl tonic::IntoRequest<RouteRequest>,
    ) -> Result<tonic::Response<RouteResponse>, tonic::Status> {
        self.ready().await?;
        let codec = tonic::codec::ProstCodec::default();
        let path = PathAndQuery::from_static(FIND_ROUTE_PATH);
        self.inner.unary(request.into_request(), path, codec).await
    }

    pub async fn health_check(
        &mut self,
        request: impl tonic::IntoRequest<HealthRequest>,
    ) -> Result<tonic::Response<HealthResponse>, tonic::Status> {
        self.ready().await?;
        let codec = tonic::codec::ProstCodec::default();
        let path = PathAndQuery::from_static(HEALTH_CHECK_PATH);
        self.inner.unary(request.into_request(), path, codec).await
    }

    async fn ready(&mut self) -> Result<(), tonic::Status> {
        self.inner.ready().await.map_err(|e| {
            tonic::Status::new(
                tonic::Code::Unavailable,
                format!("routing service was not ready: {e}"),
            )
        })
    }
}
