//! Stops reference dataset.
//!
//! Maps the opaque keys the routing engine puts in journey paths to
//! display names. The file is JSON:
//!
//! ```json
//! {"stops": [{"id": "...", "name": "..."}], "trips": [{"id": "...", "name": "..."}]}
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::error::DatasetError;

#[derive(Debug, Deserialize)]
struct DatasetFile {
    #[serde(default)]
    stops: Vec<Entry>,
    #[serde(default)]
    trips: Vec<Entry>,
}

/// One `{id, name}` record.
#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    pub id: String,
    pub name: String,
}

/// Immutable key → name lookup, shared between requests.
#[derive(Debug, Clone, Default)]
pub struct StopDataset {
    trips: HashMap<String, String>,
    stops: HashMap<String, String>,
}

impl StopDataset {
    /// A dataset that resolves nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a dataset from stop and trip records.
    pub fn from_entries(
        stops: impl IntoIterator<Item = Entry>,
        trips: impl IntoIterator<Item = Entry>,
    ) -> Self {
        let collect = |entries: Vec<Entry>| -> HashMap<String, String> {
            entries.into_iter().map(|e| (e.id, e.name)).collect()
        };
        Self {
            stops: collect(stops.into_iter().collect()),
            trips: collect(trips.into_iter().collect()),
        }
    }

    /// Parse a dataset from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let file: DatasetFile = serde_json::from_str(json).map_err(|e| DatasetError::Json {
            message: e.to_string(),
        })?;
        Ok(Self::from_entries(file.stops, file.trips))
    }

    /// Load a dataset from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            entries = dataset.len(),
            trips = dataset.trips.len(),
            "loaded stops dataset"
        );
        Ok(dataset)
    }

    /// Look up a display name; trips are checked before stops.
    pub fn name(&self, key: &str) -> Option<&str> {
        self.trips
            .get(key)
            .or_else(|| self.stops.get(key))
            .map(String::as_str)
    }

    /// Total number of known keys.
    pub fn len(&self) -> usize {
        self.trips.len() + self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty() && self.stops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn entry(id: &str, name: &str) -> Entry {
        Entry {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stops.json");
        std::fs::write(
            &path,
            r#"{
                "stops": [{"id": "S1", "name": "محطة الرمل"}],
                "trips": [{"id": "FUo5FExiKwUTpyTUJYA7R", "name": "ترام 2"}]
            }"#,
        )
        .unwrap();

        let dataset = StopDataset::load(&path).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.name("S1"), Some("محطة الرمل"));
        assert_eq!(dataset.name("FUo5FExiKwUTpyTUJYA7R"), Some("ترام 2"));
        assert_eq!(dataset.name("nope"), None);
    }

    #[test]
    fn missing_sections_are_empty() {
        let dataset = StopDataset::from_json(r#"{"stops": [{"id": "A", "name": "a"}]}"#).unwrap();
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn trips_take_precedence() {
        let dataset = StopDataset::from_entries(
            vec![entry("X", "stop name")],
            vec![entry("X", "trip name")],
        );
        assert_eq!(dataset.name("X"), Some("trip name"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = StopDataset::load("/nonexistent/stops.json");
        assert!(matches!(result, Err(DatasetError::Io { .. })));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stops.json");
        std::fs::write(&path, "{\"stops\": 3}").unwrap();

        assert!(matches!(
            StopDataset::load(&path),
            Err(DatasetError::Json { .. })
        ));
    }

    #[test]
    fn empty_dataset() {
        let dataset = StopDataset::empty();
        assert!(dataset.is_empty());
        assert_eq!(dataset.name("anything"), None);
    }
}
