//! Journey path decoding.
//!
//! Journey paths are lists of `<key>-<timestamp>` identifiers, e.g.
//! `FUo5FExiKwUTpyTUJYA7R-07:00:00`. Keys may themselves contain `-`, so
//! the split is at the last one.

use std::sync::Arc;

use chrono::NaiveTime;

use super::dataset::StopDataset;

/// Rendered in place of an identifier whose key is not in the dataset.
pub const UNKNOWN_STOP: &str = "محطة غير معروفة";

/// Split an identifier into its reference key and departure time.
///
/// The split only happens when the part after the last `-` is a time;
/// otherwise the whole identifier is treated as the key. Hours past 23
/// (services running after midnight) wrap around.
pub fn split_identifier(id: &str) -> (&str, Option<NaiveTime>) {
    match id.rsplit_once('-') {
        Some((key, suffix)) if !key.is_empty() => match parse_timestamp(suffix) {
            Some(time) => (key, Some(time)),
            None => (id, None),
        },
        _ => (id, None),
    }
}

fn parse_timestamp(s: &str) -> Option<NaiveTime> {
    let (hours, rest) = s.split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let normalized = format!("{:02}:{rest}", hours % 24);
    NaiveTime::parse_from_str(&normalized, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(&normalized, "%H:%M"))
        .ok()
}

/// Turns path identifiers into readable stop/trip names.
#[derive(Debug, Clone)]
pub struct PathDecoder {
    dataset: Arc<StopDataset>,
}

impl PathDecoder {
    pub fn new(dataset: Arc<StopDataset>) -> Self {
        Self { dataset }
    }

    /// Decode one identifier.
    pub fn decode_id(&self, id: &str) -> String {
        let (key, time) = split_identifier(id);
        match (self.dataset.name(key), time) {
            (Some(name), Some(time)) => format!("{name} ({})", time.format("%H:%M")),
            (Some(name), None) => name.to_string(),
            (None, _) => UNKNOWN_STOP.to_string(),
        }
    }

    /// Decode a whole path; output has the same length and order as `ids`.
    pub fn decode_path(&self, ids: &[String]) -> Vec<String> {
        ids.iter().map(|id| self.decode_id(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stops::Entry;

    fn decoder() -> PathDecoder {
        let dataset = StopDataset::from_entries(
            vec![Entry {
                id: "oL-cc2-4cc5VXM7r-ShUc".to_string(),
                name: "سيدي جابر".to_string(),
            }],
            vec![Entry {
                id: "FUo5FExiKwUTpyTUJYA7R".to_string(),
                name: "ترام 2".to_string(),
            }],
        );
        PathDecoder::new(Arc::new(dataset))
    }

    #[test]
    fn split_at_last_dash() {
        let (key, time) = split_identifier("oL-cc2-4cc5VXM7r-ShUc-07:00:00");
        assert_eq!(key, "oL-cc2-4cc5VXM7r-ShUc");
        assert_eq!(time, NaiveTime::from_hms_opt(7, 0, 0));
    }

    #[test]
    fn split_without_timestamp() {
        assert_eq!(split_identifier("ZBtB-FXg8HG9MZ8swYNuQ"), ("ZBtB-FXg8HG9MZ8swYNuQ", None));
        assert_eq!(split_identifier("plain"), ("plain", None));
        assert_eq!(split_identifier("-07:00:00"), ("-07:00:00", None));
    }

    #[test]
    fn hours_past_midnight_wrap() {
        let (_, time) = split_identifier("K-25:10:00");
        assert_eq!(time, NaiveTime::from_hms_opt(1, 10, 0));
    }

    #[test]
    fn decode_known_and_unknown() {
        let decoder = decoder();
        let path = vec![
            "FUo5FExiKwUTpyTUJYA7R-07:00:00".to_string(),
            "missing-08:15:00".to_string(),
            "oL-cc2-4cc5VXM7r-ShUc-07:30:00".to_string(),
        ];

        let readable = decoder.decode_path(&path);

        assert_eq!(
            readable,
            vec![
                "ترام 2 (07:00)".to_string(),
                UNKNOWN_STOP.to_string(),
                "سيدي جابر (07:30)".to_string(),
            ]
        );
    }

    #[test]
    fn known_key_without_time() {
        assert_eq!(decoder().decode_id("FUo5FExiKwUTpyTUJYA7R"), "ترام 2");
    }

    #[test]
    fn empty_path() {
        assert!(decoder().decode_path(&[]).is_empty());
    }
}
