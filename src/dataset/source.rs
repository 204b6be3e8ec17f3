// file: src/dataset/source.rs
// description: file formats of the curated JSON datasets
// reference: https://docs.rs/serde_json

use crate::error::{ChatbotError, Result};
use crate::models::{LecturerDirectory, LecturerRecord, RectorRecord};
use crate::utils::Validator;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// A record type that can be loaded from a dataset file.
pub trait DatasetRecord: Clone + Send + Sync + 'static {
    /// File layout as it appears on disk.
    type Document: DeserializeOwned;

    /// Localized dataset name used in status messages ("dosen", "rektor").
    const LABEL: &'static str;

    fn into_records(document: Self::Document) -> Vec<Self>;
}

impl DatasetRecord for LecturerRecord {
    type Document = LecturerDirectory;
    const LABEL: &'static str = "dosen";

    fn into_records(document: LecturerDirectory) -> Vec<Self> {
        document.data_dosen
    }
}

impl DatasetRecord for RectorRecord {
    type Document = Vec<RectorRecord>;
    const LABEL: &'static str = "rektor";

    fn into_records(document: Vec<RectorRecord>) -> Vec<Self> {
        document
    }
}

/// Read and fully parse a dataset file.
pub fn read_records<R: DatasetRecord>(path: &Path) -> Result<Vec<R>> {
    Validator::validate_dataset_file(path).map_err(|e| ChatbotError::DatasetUnavailable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let raw = fs::read_to_string(path).map_err(|e| ChatbotError::DatasetUnavailable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let document: R::Document =
        serde_json::from_str(&raw).map_err(|e| ChatbotError::DatasetUnavailable {
            path: path.to_path_buf(),
            reason: format!("invalid JSON: {}", e),
        })?;

    Ok(R::into_records(document))
}
