//! Canned collaborators for tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::Journey;

use super::error::LlmError;
use super::format::ItineraryFormatter;
use super::intent::{Intent, IntentExtractor};

/// Returns the same `Intent` for every query.
#[derive(Debug)]
pub struct StaticIntentExtractor {
    intent: Intent,
    calls: AtomicUsize,
}

impl StaticIntentExtractor {
    pub fn new(intent: Intent) -> Self {
        Self {
            intent,
            calls: AtomicUsize::new(0),
        }
    }

    /// Extractor that finds both places.
    pub fn places(origin: &str, destination: &str) -> Self {
        Self::new(Intent::new(
            Some(origin.to_string()),
            Some(destination.to_string()),
        ))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IntentExtractor for StaticIntentExtractor {
    async fn extract(&self, _query: &str) -> Intent {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.intent.clone()
    }
}

/// Formatter with a fixed reply, or one that always fails.
#[derive(Debug)]
pub struct StaticFormatter {
    reply: Option<String>,
    calls: AtomicUsize,
    last_journeys: Mutex<Vec<Journey>>,
}

impl StaticFormatter {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            calls: AtomicUsize::new(0),
            last_journeys: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
            last_journeys: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Journeys passed to the most recent call.
    pub fn last_journeys(&self) -> Vec<Journey> {
        self.last_journeys
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ItineraryFormatter for StaticFormatter {
    async fn format(
        &self,
        _origin: &str,
        _destination: &str,
        journeys: &[Journey],
    ) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_journeys.lock() {
            *last = journeys.to_vec();
        }
        self.reply.clone().ok_or(LlmError::EmptyCompletion)
    }
}
