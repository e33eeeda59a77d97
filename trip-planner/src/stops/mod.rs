//! Stops reference data and path decoding.

mod dataset;
mod decode;
mod error;

pub use dataset::{Entry, StopDataset};
pub use decode::{PathDecoder, UNKNOWN_STOP, split_identifier};
pub use error::DatasetError;
