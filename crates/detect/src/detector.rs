//! Line-level change detection between consecutive normalized documents.
//!
//! Changes are counted per hunk, not per line: a run of three added lines is one unit. A report
//! is persisted only when the number of changed units exceeds the threshold. The previous
//! document is replaced on every observation, persisted or not.
use crate::store::{FailureHook, RecordId, Store, persist_detached};
use markup::LINE_BREAK;
use similar::{ChangeTag, TextDiff};
use std::sync::Arc;

pub const PERSIST_THRESHOLD: usize = 4;

const REPORT_BLOCK_END: &str = "\r\n";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HunkKind {
    Added,
    Removed,
    Unchanged,
}

impl HunkKind {
    fn from_tag(tag: ChangeTag) -> Self {
        match tag {
            ChangeTag::Insert => HunkKind::Added,
            ChangeTag::Delete => HunkKind::Removed,
            ChangeTag::Equal => HunkKind::Unchanged,
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            HunkKind::Added => "+ ",
            HunkKind::Removed => "- ",
            HunkKind::Unchanged => "~ ",
        }
    }

    pub fn is_change(self) -> bool {
        !matches!(self, HunkKind::Unchanged)
    }
}

/// A maximal run of identically classified lines. `text` keeps the lines' own terminators.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffHunk {
    pub kind: HunkKind,
    pub text: String,
}

impl DiffHunk {
    /// Lines split on the normalized line break, without the empty entry a trailing break
    /// leaves behind.
    pub fn lines(&self) -> Vec<&str> {
        let mut lines: Vec<&str> = self.text.split(LINE_BREAK).collect();
        if lines.last().is_some_and(|last| last.is_empty()) {
            lines.pop();
        }
        lines
    }

    fn write_block(&self, out: &mut String) {
        let marker = self.kind.marker();
        let prefixed: Vec<String> = self
            .lines()
            .into_iter()
            .map(|line| format!("{marker}{line}"))
            .collect();
        out.push_str(&prefixed.join(LINE_BREAK));
        out.push_str(REPORT_BLOCK_END);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiffReport {
    pub hunks: Vec<DiffHunk>,
    pub changed_units: usize,
    pub text: String,
}

pub fn diff_hunks(previous: &str, current: &str) -> Vec<DiffHunk> {
    let diff = TextDiff::from_lines(previous, current);
    let mut hunks: Vec<DiffHunk> = Vec::new();
    for change in diff.iter_all_changes() {
        let kind = HunkKind::from_tag(change.tag());
        match hunks.last_mut() {
            Some(hunk) if hunk.kind == kind => hunk.text.push_str(change.value()),
            _ => hunks.push(DiffHunk {
                kind,
                text: change.value().to_string(),
            }),
        }
    }
    hunks
}

/// Counts changed units and renders the prefixed report text.
pub fn build_report(hunks: Vec<DiffHunk>) -> DiffReport {
    let mut text = String::new();
    let mut changed_units = 0;
    for hunk in &hunks {
        if hunk.kind.is_change() {
            changed_units += 1;
        }
        hunk.write_block(&mut text);
    }
    DiffReport {
        hunks,
        changed_units,
        text,
    }
}

pub fn diff_documents(previous: &str, current: &str) -> DiffReport {
    build_report(diff_hunks(previous, current))
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DetectorState {
    previous: Option<String>,
}

impl DetectorState {
    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// Diffs `current` against the stored document (if any) and makes `current` the new
    /// baseline.
    pub fn advance(&mut self, current: String) -> Option<DiffReport> {
        let report = self
            .previous
            .as_deref()
            .map(|previous| diff_documents(previous, &current));
        self.previous = Some(current);
        report
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// First observation; nothing to compare against.
    Baseline,
    BelowThreshold(DiffReport),
    Significant { report: DiffReport, id: RecordId },
}

impl CycleOutcome {
    pub fn changed_units(&self) -> usize {
        match self {
            CycleOutcome::Baseline => 0,
            CycleOutcome::BelowThreshold(report) | CycleOutcome::Significant { report, .. } => {
                report.changed_units
            }
        }
    }
}

pub struct ChangeDetector<S: Store> {
    state: DetectorState,
    store: Arc<S>,
    threshold: usize,
    on_failure: Option<FailureHook>,
}

impl<S: Store> ChangeDetector<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            state: DetectorState::default(),
            store,
            threshold: PERSIST_THRESHOLD,
            on_failure: None,
        }
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_failure_hook(mut self, hook: FailureHook) -> Self {
        self.on_failure = Some(hook);
        self
    }

    pub fn state(&self) -> &DetectorState {
        &self.state
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Runs one detection step. Persistence, when triggered, is started on a detached thread
    /// and not waited for.
    pub fn observe(&mut self, current: String) -> CycleOutcome {
        let Some(report) = self.state.advance(current) else {
            log::info!(target: "detect", "baseline established");
            return CycleOutcome::Baseline;
        };
        if report.changed_units <= self.threshold {
            log::info!(
                target: "detect",
                "{} changed units (threshold {}), not persisted",
                report.changed_units,
                self.threshold
            );
            return CycleOutcome::BelowThreshold(report);
        }
        let id = RecordId::now();
        log::info!(
            target: "detect",
            "{} changed units (threshold {}), persisting report {id}",
            report.changed_units,
            self.threshold
        );
        persist_detached(
            Arc::clone(&self.store),
            id.clone(),
            report.text.clone(),
            self.on_failure.clone(),
        );
        CycleOutcome::Significant { report, id }
    }
}
