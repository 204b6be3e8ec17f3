// file: src/dataset/mod.rs
// description: dataset loading and snapshot module exports
// reference: internal module structure

pub mod source;
pub mod store;

pub use source::{DatasetRecord, read_records};
pub use store::{Dataset, DatasetSnapshot, DatasetStatus, DatasetStore, LoadState};
