//! File-backed endpoint store.
//!
//! # Responsibilities
//! - Persist the single endpoint record across restarts
//! - Keep reads cheap and tear-free via an in-process cache
//! - Treat a missing or corrupt file as "no saved endpoint"
//!
//! # Design Decisions
//! - `set` is the only mutation path, last-write-wins, no merge
//! - On-disk replace goes through a temp file and rename
//! - Reading never fails past this boundary

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use thiserror::Error;

use crate::config::StoreConfig;
use crate::store::record::EndpointRecord;

const RECORD_FILENAME: &str = "endpoint.json";

/// Errors from persisting a record. Reads never produce one.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store IO error: {0}")]
    Io(#[from] io::Error),

    #[error("store serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable store for the active endpoint record.
///
/// Clones share the same cache and file path.
#[derive(Debug, Clone)]
pub struct EndpointStore {
    path: PathBuf,
    current: Arc<ArcSwapOption<EndpointRecord>>,
}

impl EndpointStore {
    /// Open the store at `path`, loading any persisted record.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = Arc::new(ArcSwapOption::from(load_record(&path).map(Arc::new)));
        Self { path, current }
    }

    /// Open at the configured path, or the default location under the
    /// user's config directory.
    pub fn from_config(config: &StoreConfig) -> Self {
        match &config.path {
            Some(path) => Self::open(path.clone()),
            None => Self::open(default_path()),
        }
    }

    /// The current record, if any.
    pub fn get(&self) -> Option<EndpointRecord> {
        self.current.load_full().map(|record| (*record).clone())
    }

    /// Replace the record, durably.
    pub fn set(&self, record: EndpointRecord) -> Result<(), StoreError> {
        persist_record(&self.path, &record)?;
        self.current.store(Some(Arc::new(record)));
        Ok(())
    }

    /// Forget the record. Explicit operator action only.
    pub fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        self.current.store(None);
        Ok(())
    }

    /// Current base URL for outgoing requests; empty means same-origin.
    pub fn base_url(&self) -> String {
        self.get().and_then(|record| record.base_url).unwrap_or_default()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("backend-discovery")
        .join(RECORD_FILENAME)
}

fn load_record(path: &Path) -> Option<EndpointRecord> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), error = %e, "could not read endpoint record");
            }
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "discarding corrupt endpoint record");
            None
        }
    }
}

fn persist_record(path: &Path, record: &EndpointRecord) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serde_json::to_vec_pretty(record)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
