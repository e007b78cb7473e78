//! TRAJECT Snapshot Decoding
//!
//! Typed access to persisted particle checkpoints and reconstruction of
//! the in-memory particle state plus run context they describe.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dataset;
pub mod decoder;

pub use dataset::{Dataset, DatasetError, JsonDataset, MemoryDataset};
pub use decoder::SnapshotDecoder;
