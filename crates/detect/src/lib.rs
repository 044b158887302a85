//! Change detection over successive normalized documents, plus the storage the reports go to.
mod detector;
mod store;

pub use crate::detector::{
    ChangeDetector, CycleOutcome, DetectorState, DiffHunk, DiffReport, HunkKind,
    PERSIST_THRESHOLD, build_report, diff_documents, diff_hunks,
};
pub use crate::store::{
    FailureHook, FileStore, RecordId, Store, StoreError, persist_detached,
};
