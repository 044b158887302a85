use chrono::{DateTime, Local};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use thiserror::Error;

const RECORD_EXTENSION: &str = "md";
// Sortable and free of characters that are awkward in file names (no ':' or spaces).
const RECORD_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.3f%z";

/// Identifier of one persisted diff report, derived from the wall-clock time it was produced.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(String);

impl RecordId {
    pub fn now() -> Self {
        Self::from_time(Local::now())
    }

    pub fn from_time(time: DateTime<Local>) -> Self {
        Self(time.format(RECORD_TIME_FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create report directory {path:?}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write report {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Destination for diff reports.
pub trait Store: Send + Sync + 'static {
    /// Persists `text` under `id` and returns where it ended up.
    fn persist(&self, id: &RecordId, text: &str) -> Result<PathBuf, StoreError>;
}

/// Writes each report to `<dir>/<record id>.md`, creating `dir` on demand.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, id: &RecordId) -> PathBuf {
        self.dir
            .join(format!("{}.{RECORD_EXTENSION}", id.as_str()))
    }
}

impl Store for FileStore {
    fn persist(&self, id: &RecordId, text: &str) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path_for(id);
        fs::write(&path, text).map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

/// Observes persistence failures. Never called on success.
pub type FailureHook = Arc<dyn Fn(&RecordId, &StoreError) + Send + Sync>;

/// Persists on a detached thread. The caller is not told about the outcome; failures only
/// reach `on_failure`, when one is installed.
pub fn persist_detached<S: Store>(
    store: Arc<S>,
    id: RecordId,
    text: String,
    on_failure: Option<FailureHook>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || match store.persist(&id, &text) {
        Ok(path) => {
            log::info!(target: "detect", "diff report written to {}", path.display());
        }
        Err(err) => {
            if let Some(hook) = on_failure {
                hook(&id, &err);
            }
        }
    })
}
