use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use trip_planner::config::AppConfig;
use trip_planner::geocode::{CachedGeocoder, GeocodeCacheConfig, NominatimClient};
use trip_planner::llm::{ChatClient, LlmFormatter, LlmIntentExtractor};
use trip_planner::pipeline::Pipeline;
use trip_planner::routing::RoutingClient;
use trip_planner::stops::{PathDecoder, StopDataset};
use trip_planner::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    if config.llm.api_key.is_empty() {
        warn!("LLM_API_KEY not set; requests to a hosted model will fail");
    }

    // Routing engine (connects on first use)
    let routing =
        RoutingClient::new(config.routing.clone()).expect("Invalid routing server address");

    // Geocoder with a cache in front
    let nominatim =
        NominatimClient::new(config.geocoder.clone()).expect("Failed to create geocoder");
    let geocoder = CachedGeocoder::new(Arc::new(nominatim), &GeocodeCacheConfig::default());

    // Chat model for intent extraction and answer writing
    let chat = ChatClient::new(config.llm.clone()).expect("Failed to create LLM client");

    // Stops reference data
    let dataset = match &config.stops_dataset {
        Some(path) => StopDataset::load(path).expect("Failed to load stops dataset"),
        None => {
            warn!("STOPS_DATASET not set; journey paths will not be decoded");
            StopDataset::empty()
        }
    };
    if config.stops_dataset.is_some() && dataset.is_empty() {
        warn!("stops dataset has no entries; journey paths will not be decoded");
    }

    let pipeline = Pipeline::new(
        Arc::new(LlmIntentExtractor::new(chat.clone())),
        Arc::new(geocoder),
        routing.clone(),
        Arc::new(LlmFormatter::new(chat)),
        PathDecoder::new(Arc::new(dataset)),
    );

    let state = AppState::new(pipeline, routing, config.planner);
    let app = create_router(state);

    info!(
        addr = %config.bind_addr,
        routing = %config.routing.address,
        "trip planner listening"
    );
    info!("endpoints: POST /plan, GET /health, GET /health/routing");

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind");
    axum::serve(listener, app).await.expect("Server error");
}
