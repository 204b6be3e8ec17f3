// file: src/models/lecturer.rs
// description: lecturer directory entry as stored in the lecturer dataset
// reference: dataset_dosen.json layout

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LecturerRecord {
    #[serde(rename = "nama_dosen", default)]
    pub name: String,

    /// Civil-service identification number (NIP).
    #[serde(rename = "nip", default)]
    pub id_number: String,
}

impl LecturerRecord {
    pub fn new(name: impl Into<String>, id_number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id_number: id_number.into(),
        }
    }

    /// True when the identification number appears verbatim in the
    /// already-lowercased query.
    pub fn id_mentioned_in(&self, query_lower: &str) -> bool {
        !self.id_number.is_empty() && query_lower.contains(&self.id_number.to_lowercase())
    }
}

/// Top-level shape of the lecturer dataset file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LecturerDirectory {
    pub data_dosen: Vec<LecturerRecord>,
}
