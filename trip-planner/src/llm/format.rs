//! Turning ranked journeys into a chat answer.
//!
//! The model gets a trimmed view of each journey: coordinates and
//! geometry are dropped, stops are reduced to their names.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{Journey, Leg};

use super::client::ChatClient;
use super::error::LlmError;

const FORMAT_PROMPT: &str = r#"انت مساعد ذكي بتشرح رحلات مواصلات للناس بطريقة بسيطة ولطيفة.

المدخل JSON فيه:
- origin
- destination
- journeys: قائمة من البدائل

كل Journey فيها:
- summary: (وقت إجمالي بالدقايق، تكلفة تقريبية، مسافة مشي، عدد تحويلات، modes)
- legs: قائمة خطوات الرحلة
- readable_path: أسماء المحطات بالترتيب مع مواعيدها

كل Leg نوعه واحد من:
- walk: مشي (مسافة/وقت)
- trip: مواصلة (mode + route_short_name + من محطة/إلى محطة + وقت + fare)
- transfer: تحويل/مشي بين وسيلتين (وقت/مسافة)

المطلوب:
- اكتب بالعامية المصرية
- اشرح كل رحلة في فقرة منفصلة
- اذكر: الوقت الإجمالي، المشي، التكلفة/السعر لو موجود
- اشرح الخطوات بالترتيب (legs)
"#;

/// Writes the user-facing answer for a set of journeys.
#[async_trait]
pub trait ItineraryFormatter: Send + Sync {
    async fn format(
        &self,
        origin: &str,
        destination: &str,
        journeys: &[Journey],
    ) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
pub struct FormatPayload<'a> {
    pub origin: &'a str,
    pub destination: &'a str,
    pub journeys: Vec<CleanJourney<'a>>,
}

#[derive(Debug, Serialize)]
pub struct CleanJourney<'a> {
    pub id: i64,
    pub summary: CleanSummary<'a>,
    pub legs: Vec<CleanLeg<'a>>,
    pub text_summary: &'a str,
    pub readable_path: Option<&'a [String]>,
}

#[derive(Debug, Serialize)]
pub struct CleanSummary<'a> {
    pub total_time_minutes: i64,
    pub walking_distance_meters: i64,
    pub transfers: i64,
    pub cost: f64,
    pub modes: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CleanLeg<'a> {
    Walk {
        distance_meters: i64,
        duration_minutes: i64,
    },
    Trip {
        mode: &'a str,
        route_short_name: &'a str,
        headsign: &'a str,
        from: &'a str,
        to: &'a str,
        duration_minutes: i64,
        fare: f64,
    },
    Transfer {
        from_trip_name: &'a str,
        to_trip_name: &'a str,
        walking_distance_meters: i64,
        duration_minutes: i64,
    },
}

impl<'a> From<&'a Leg> for CleanLeg<'a> {
    fn from(leg: &'a Leg) -> Self {
        match leg {
            Leg::Walk(w) => CleanLeg::Walk {
                distance_meters: w.distance_meters,
                duration_minutes: w.duration_minutes,
            },
            Leg::Trip(t) => CleanLeg::Trip {
                mode: &t.mode,
                route_short_name: &t.route_short_name,
                headsign: &t.headsign,
                from: &t.from.name,
                to: &t.to.name,
                duration_minutes: t.duration_minutes,
                fare: t.fare,
            },
            Leg::Transfer(x) => CleanLeg::Transfer {
                from_trip_name: &x.from_trip_name,
                to_trip_name: &x.to_trip_name,
                walking_distance_meters: x.walking_distance_meters,
                duration_minutes: x.duration_minutes,
            },
        }
    }
}

impl<'a> From<&'a Journey> for CleanJourney<'a> {
    fn from(journey: &'a Journey) -> Self {
        let s = &journey.summary;
        CleanJourney {
            id: journey.id,
            summary: CleanSummary {
                total_time_minutes: s.total_time_minutes,
                walking_distance_meters: s.walking_distance_meters,
                transfers: s.transfers,
                cost: s.cost,
                modes: s.modes.iter().map(String::as_str).collect(),
            },
            legs: journey.legs.iter().map(CleanLeg::from).collect(),
            text_summary: &journey.text_summary,
            readable_path: journey.readable_path.as_deref(),
        }
    }
}

impl<'a> FormatPayload<'a> {
    pub fn new(origin: &'a str, destination: &'a str, journeys: &'a [Journey]) -> Self {
        Self {
            origin,
            destination,
            journeys: journeys.iter().map(CleanJourney::from).collect(),
        }
    }
}

/// `ItineraryFormatter` backed by a chat model.
#[derive(Debug, Clone)]
pub struct LlmFormatter {
    chat: ChatClient,
}

impl LlmFormatter {
    pub fn new(chat: ChatClient) -> Self {
        Self { chat }
    }
}

#[async_trait]
impl ItineraryFormatter for LlmFormatter {
    async fn format(
        &self,
        origin: &str,
        destination: &str,
        journeys: &[Journey],
    ) -> Result<String, LlmError> {
        let payload = FormatPayload::new(origin, destination, journeys);
        let input = serde_json::to_string(&payload)
            .map_err(|e| LlmError::InvalidResponse(format!("payload encoding failed: {e}")))?;

        self.chat.complete(FORMAT_PROMPT, &input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coord, JourneySummary, StopRef, TransferLeg, TripLeg, WalkLeg};

    fn sample_journey() -> Journey {
        let stop = |name: &str| StopRef {
            stop_id: 7,
            name: name.to_string(),
            coord: Coord::new(31.2, 29.9),
        };
        Journey {
            id: 3,
            legs: vec![
                Leg::Walk(WalkLeg {
                    distance_meters: 120,
                    duration_minutes: 2,
                    path: vec![Coord::new(31.2, 29.9)],
                }),
                Leg::Trip(TripLeg {
                    trip_id: "T1".into(),
                    mode: "tram".into(),
                    route_short_name: "2".into(),
                    headsign: "فيكتوريا".into(),
                    fare: 5.0,
                    duration_minutes: 25,
                    from: stop("الرمل"),
                    to: stop("سيدي جابر"),
                    path: vec![Coord::new(31.2, 29.9)],
                }),
                Leg::Transfer(TransferLeg {
                    from_trip_id: "T1".into(),
                    to_trip_id: "B4".into(),
                    from_trip_name: "ترام 2".into(),
                    to_trip_name: "ميكروباص".into(),
                    walking_distance_meters: 80,
                    duration_minutes: 3,
                    path: Vec::new(),
                }),
            ],
            summary: JourneySummary {
                total_time_minutes: 30,
                walking_distance_meters: 200,
                transfers: 1,
                cost: 5.0,
                modes: ["tram".to_string()].into_iter().collect(),
                ..JourneySummary::default()
            },
            text_summary: "walk, tram".into(),
            path: vec!["T1-07:00:00".into()],
            readable_path: Some(vec!["ترام 2 (07:00)".into()]),
        }
    }

    #[test]
    fn payload_drops_geometry() {
        let journeys = vec![sample_journey()];
        let payload = FormatPayload::new("الرمل", "سيدي جابر", &journeys);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["origin"], "الرمل");
        let journey = &json["journeys"][0];
        assert_eq!(journey["id"], 3);
        assert_eq!(journey["summary"]["modes"][0], "tram");
        assert_eq!(journey["readable_path"][0], "ترام 2 (07:00)");
        assert!(journey.get("path").is_none());

        let legs = journey["legs"].as_array().unwrap();
        assert_eq!(legs[0]["type"], "walk");
        assert_eq!(legs[0]["distance_meters"], 120);
        assert!(legs[0].get("path").is_none());

        assert_eq!(legs[1]["type"], "trip");
        assert_eq!(legs[1]["from"], "الرمل");
        assert_eq!(legs[1]["to"], "سيدي جابر");
        assert_eq!(legs[1]["fare"], 5.0);
        assert!(legs[1].get("trip_id").is_none());

        assert_eq!(legs[2]["type"], "transfer");
        assert_eq!(legs[2]["walking_distance_meters"], 80);
    }

    #[test]
    fn payload_keeps_arabic_unescaped() {
        let journeys = vec![sample_journey()];
        let text = serde_json::to_string(&FormatPayload::new("الرمل", "x", &journeys)).unwrap();
        assert!(text.contains("الرمل"));
    }
}
