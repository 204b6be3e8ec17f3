// file: src/dataset/store.rs
// description: reloadable in-memory dataset snapshots
// reference: Arc snapshot swapped under a tokio RwLock

use crate::config::DatasetConfig;
use crate::dataset::source::{DatasetRecord, read_records};
use crate::error::Result;
use crate::models::{LecturerRecord, RectorRecord};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Immutable copy of one dataset file, replaced wholesale on reload.
#[derive(Debug, Clone)]
pub struct DatasetSnapshot<R> {
    pub records: Vec<R>,
    pub loaded_at: DateTime<Local>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    Loaded,
    NotLoaded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetStatus {
    pub status: LoadState,
    pub message: String,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

pub struct Dataset<R: DatasetRecord> {
    path: PathBuf,
    current: RwLock<Option<Arc<DatasetSnapshot<R>>>>,
}

impl<R: DatasetRecord> Dataset<R> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            current: RwLock::new(None),
        }
    }

    /// Build a dataset already holding `records`, without touching disk.
    pub fn with_records(path: impl Into<PathBuf>, records: Vec<R>) -> Self {
        let path = path.into();
        let snapshot = DatasetSnapshot {
            records,
            loaded_at: Local::now(),
        };
        Self {
            path,
            current: RwLock::new(Some(Arc::new(snapshot))),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the file and swap in a new snapshot. On failure the previous
    /// snapshot stays in place.
    pub async fn reload(&self) -> Result<usize> {
        let records = match read_records::<R>(&self.path) {
            Ok(records) => records,
            Err(e) => {
                warn!("Failed to load dataset {}: {}", R::LABEL, e);
                return Err(e);
            }
        };

        let count = records.len();
        let snapshot = Arc::new(DatasetSnapshot {
            records,
            loaded_at: Local::now(),
        });

        *self.current.write().await = Some(snapshot);
        info!(
            "Dataset {} loaded from {} ({} records)",
            R::LABEL,
            self.path.display(),
            count
        );
        Ok(count)
    }

    pub async fn snapshot(&self) -> Option<Arc<DatasetSnapshot<R>>> {
        self.current.read().await.clone()
    }

    pub async fn status(&self) -> DatasetStatus {
        match self.snapshot().await {
            Some(snapshot) if !snapshot.records.is_empty() => DatasetStatus {
                status: LoadState::Loaded,
                message: format!("Dataset {} berhasil dimuat", R::LABEL),
                count: snapshot.records.len(),
                last_updated: Some(snapshot.loaded_at.format("%Y-%m-%d %H:%M:%S").to_string()),
            },
            _ => DatasetStatus {
                status: LoadState::NotLoaded,
                message: format!("Dataset {} tidak tersedia", R::LABEL),
                count: 0,
                last_updated: None,
            },
        }
    }
}

/// Both datasets the router consults.
pub struct DatasetStore {
    pub lecturers: Dataset<LecturerRecord>,
    pub rectors: Dataset<RectorRecord>,
}

impl DatasetStore {
    pub fn new(config: &DatasetConfig) -> Self {
        Self {
            lecturers: Dataset::new(&config.lecturer_path),
            rectors: Dataset::new(&config.rector_path),
        }
    }

    pub fn from_records(lecturers: Vec<LecturerRecord>, rectors: Vec<RectorRecord>) -> Self {
        Self {
            lecturers: Dataset::with_records("dataset_dosen.json", lecturers),
            rectors: Dataset::with_records("dataset_rektor.json", rectors),
        }
    }

    /// Load both datasets, logging failures instead of returning them.
    pub async fn load_all(&self) {
        let _ = self.lecturers.reload().await;
        let _ = self.rectors.reload().await;
    }
}
