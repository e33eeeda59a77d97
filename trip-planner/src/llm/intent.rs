//! Origin/destination extraction from free text.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::client::ChatClient;

const INTENT_PROMPT: &str = r#"You are a routing NLU system.

Extract routing information from Egyptian Arabic text.

Output ONLY valid JSON using this schema:
{
    "intent": "find_route | plan_multistop_trip | chitchat",
    "stops": [
        { "type": "origin | destination", "place": string }
    ]
}

Rules:
- Do NOT explain
- Do NOT translate names
- Do NOT add text outside JSON
"#;

/// What the user asked for.
///
/// Either place may be missing; a blank name counts as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Intent {
    pub origin: Option<String>,
    pub destination: Option<String>,
    /// Intent label reported by the model, e.g. `find_route`
    pub label: Option<String>,
}

impl Intent {
    pub fn new(origin: Option<String>, destination: Option<String>) -> Self {
        Self {
            origin: non_blank(origin),
            destination: non_blank(destination),
            label: None,
        }
    }

    /// Nothing could be extracted.
    pub fn unparsed() -> Self {
        Self::default()
    }

    pub fn is_complete(&self) -> bool {
        self.origin.is_some() && self.destination.is_some()
    }
}

fn non_blank(place: Option<String>) -> Option<String> {
    place
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
}

/// Pulls origin and destination out of a query.
///
/// Never fails: anything that goes wrong yields missing places.
#[async_trait]
pub trait IntentExtractor: Send + Sync {
    async fn extract(&self, query: &str) -> Intent;
}

#[derive(Debug, Deserialize)]
struct ParsedIntent {
    #[serde(default)]
    intent: Option<String>,
    #[serde(default)]
    stops: Vec<ParsedStop>,
}

#[derive(Debug, Deserialize)]
struct ParsedStop {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    place: Option<String>,
}

/// Find the last JSON object in `text` that carries a `stops` field.
///
/// Models wrap their answer in prose or code fences often enough that the
/// reply cannot be parsed as a whole.
pub fn extract_json(text: &str) -> Option<Value> {
    text.char_indices()
        .rev()
        .filter(|&(_, c)| c == '{')
        .find_map(|(i, _)| {
            let mut stream = serde_json::Deserializer::from_str(&text[i..]).into_iter::<Value>();
            match stream.next() {
                Some(Ok(value)) if value.get("stops").is_some() => Some(value),
                _ => None,
            }
        })
}

/// Turn a model reply into an `Intent`.
pub fn parse_intent(reply: &str) -> Option<Intent> {
    let value = extract_json(reply)?;
    let parsed: ParsedIntent = serde_json::from_value(value).ok()?;

    // Later stops of the same kind override earlier ones.
    let last_place = |kind: &str| {
        parsed
            .stops
            .iter()
            .rev()
            .find(|s| s.kind.as_deref().map(str::trim) == Some(kind))
            .and_then(|s| s.place.clone())
    };

    let mut intent = Intent::new(last_place("origin"), last_place("destination"));
    intent.label = parsed.intent;
    Some(intent)
}

/// `IntentExtractor` backed by a chat model.
#[derive(Debug, Clone)]
pub struct LlmIntentExtractor {
    chat: ChatClient,
}

impl LlmIntentExtractor {
    pub fn new(chat: ChatClient) -> Self {
        Self { chat }
    }
}

#[async_trait]
impl IntentExtractor for LlmIntentExtractor {
    async fn extract(&self, query: &str) -> Intent {
        let reply = match self.chat.complete(INTENT_PROMPT, query).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "intent extraction request failed");
                return Intent::unparsed();
            }
        };

        match parse_intent(&reply) {
            Some(intent) => {
                debug!(
                    label = intent.label.as_deref(),
                    origin = intent.origin.as_deref(),
                    destination = intent.destination.as_deref(),
                    "extracted intent"
                );
                intent
            }
            None => {
                warn!(reply_len = reply.len(), "no routing JSON in model reply");
                Intent::unparsed()
            }
        }
    }
}
