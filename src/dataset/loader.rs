//! Dataset loading
//!
//! Loading is the only operation that may run off the control thread. Every
//! load is issued with a [`LoadTicket`]; the session applies a result only if
//! its ticket is still the latest one, so a slow load for a dataset the user
//! already switched away from is discarded.

use super::{CATALOG, DataSource, find};
use crate::styles::{NormalizeError, NormalizeReport, Style, normalize_document};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;
use thiserror::Error;

/// Errors that can occur while fetching or interpreting a dataset
#[derive(Debug, Error)]
pub enum LoadError {
    /// Dataset id is not in the catalog
    #[error("Unknown dataset: {0}")]
    UnknownDataset(String),

    /// Dataset file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Dataset file is not valid JSON
    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// JSON does not contain a style list
    #[error("Invalid dataset: {0}")]
    Normalize(#[from] NormalizeError),

    /// Loader-specific failure
    #[error("{0}")]
    Other(String),
}

/// Source of raw dataset documents
pub trait DatasetLoader: Send + Sync {
    /// Fetch the raw JSON document for a catalog entry
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the document cannot be fetched or parsed as JSON.
    fn load(&self, source: &DataSource) -> Result<Value, LoadError>;
}

/// Reads dataset files from a directory
#[derive(Debug, Clone)]
pub struct FileLoader {
    data_dir: PathBuf,
}

impl FileLoader {
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path of a dataset's file
    #[must_use]
    pub fn path_for(&self, source: &DataSource) -> PathBuf {
        self.data_dir.join(source.file_ref)
    }

    /// Catalog entries whose file exists in the data directory
    #[must_use]
    pub fn available(&self) -> Vec<&'static DataSource> {
        CATALOG
            .iter()
            .filter(|source| self.path_for(source).is_file())
            .collect()
    }
}

impl DatasetLoader for FileLoader {
    fn load(&self, source: &DataSource) -> Result<Value, LoadError> {
        let path = self.path_for(source);
        tracing::debug!(dataset = source.id, path = %path.display(), "reading dataset file");
        let bytes = std::fs::read(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Serves documents held in memory, keyed by dataset id
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    documents: HashMap<String, Value>,
}

impl MemoryLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document for a dataset id
    #[must_use]
    pub fn with(mut self, dataset_id: impl Into<String>, document: Value) -> Self {
        self.documents.insert(dataset_id.into(), document);
        self
    }
}

impl DatasetLoader for MemoryLoader {
    fn load(&self, source: &DataSource) -> Result<Value, LoadError> {
        self.documents
            .get(source.id)
            .cloned()
            .ok_or_else(|| LoadError::Other(format!("No document registered for {}", source.id)))
    }
}

/// A normalized dataset ready to be applied
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub styles: Vec<Style>,
    pub report: NormalizeReport,
}

/// Resolve, fetch and normalize a dataset
///
/// # Errors
///
/// Returns `LoadError::UnknownDataset` for ids outside the catalog, and any
/// error raised by the loader or by normalization.
pub fn load_dataset(loader: &dyn DatasetLoader, dataset_id: &str) -> Result<LoadedDataset, LoadError> {
    let source = find(dataset_id).ok_or_else(|| LoadError::UnknownDataset(dataset_id.to_string()))?;
    let document = loader.load(source)?;
    let (styles, report) = normalize_document(&document)?;
    if report.skipped() > 0 {
        tracing::warn!(
            dataset = dataset_id,
            malformed = report.malformed,
            duplicates = report.duplicates,
            "skipped records while normalizing dataset"
        );
    }
    Ok(LoadedDataset { styles, report })
}

/// Identifies one load request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    /// Monotonic request number; only the latest may be applied
    pub generation: u64,
    pub dataset_id: String,
}

/// Result of a load together with the ticket it was issued for
#[derive(Debug)]
pub struct LoadMessage {
    pub ticket: LoadTicket,
    pub result: Result<LoadedDataset, LoadError>,
}

/// Loading status surfaced to the presentation layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A load is in flight
    Loading,
    /// The collection holds `count` styles
    Ready { count: usize },
    /// The last load failed; the collection is empty
    Failed(String),
}

impl LoadStatus {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Run a load on a worker thread
///
/// The result is sent over `sender` tagged with `ticket`. A closed channel is
/// not an error: the receiving session has simply gone away.
pub fn spawn_load(
    loader: Arc<dyn DatasetLoader>,
    ticket: LoadTicket,
    sender: Sender<LoadMessage>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        let result = load_dataset(loader.as_ref(), &ticket.dataset_id);
        if sender.send(LoadMessage { ticket, result }).is_err() {
            tracing::debug!("load finished after its session was dropped");
        }
    })
}
