//! Reference dataset error types.

use std::path::PathBuf;

/// Errors that can occur when loading the stops reference dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The dataset file could not be read
    #[error("failed to read stops dataset {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset is not valid JSON of the expected shape
    #[error("invalid stops dataset: {message}")]
    Json { message: String },
}
