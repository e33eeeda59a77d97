//! Chat-model collaborators.
//!
//! Two jobs go to a chat model: pulling origin and destination out of the
//! user's message, and writing the final answer from ranked journeys.
//! Both sit behind traits so the pipeline can run against canned versions.

mod client;
mod error;
mod format;
mod intent;
mod mock;

pub use client::{ChatClient, LlmConfig};
pub use error::LlmError;
pub use format::{FormatPayload, ItineraryFormatter, LlmFormatter};
pub use intent::{Intent, IntentExtractor, LlmIntentExtractor, extract_json, parse_intent};
pub use mock::{StaticFormatter, StaticIntentExtractor};
