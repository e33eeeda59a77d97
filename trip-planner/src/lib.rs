//! Conversational trip planner.
//!
//! Answers free-text questions like "how do I get from A to B?" by
//! extracting the two places, geocoding them, asking a remote routing
//! engine for journeys, ranking the results and writing them up.

pub mod config;
pub mod domain;
pub mod geocode;
pub mod llm;
pub mod pipeline;
pub mod planner;
pub mod routing;
pub mod stops;
pub mod web;
