use std::sync::mpsc::Receiver;
use std::thread;

use bus::CoreEvent;
use core_types::CycleId;
use detect::{ChangeDetector, CycleOutcome, Store};
use markup::{TreeBuilderConfig, debug::outline};

const OUTLINE_CAP: usize = 200;

#[derive(Clone, Copy, Debug, Default)]
pub struct WatchConfig {
    pub tree: TreeBuilderConfig,
}

/// Parse, render and diff one retrieved document.
pub fn run_cycle<S: Store>(
    detector: &mut ChangeDetector<S>,
    raw: &str,
    config: WatchConfig,
) -> CycleOutcome {
    let parsed = markup::parse_with_config(raw, config.tree);
    if log::log_enabled!(target: "runtime_watch", log::Level::Trace) {
        for line in outline(&parsed.elements, OUTLINE_CAP) {
            log::trace!(target: "runtime_watch", "{line}");
        }
    }
    if !parsed.issues.is_empty() {
        log::debug!(
            target: "runtime_watch",
            "{} structure issues while building the tree",
            parsed.issues.len()
        );
    }
    let document = markup::render(&parsed.elements);
    detector.observe(document)
}

/// Consumes fetch events until the channel closes, running one cycle per retrieved document.
///
/// Events are handled in arrival order. When an older cycle's retrieval finishes after a newer
/// one, the older document still becomes the baseline; this is logged but not corrected.
pub fn start_watch_runtime<S: Store>(
    evt_rx: Receiver<CoreEvent>,
    config: WatchConfig,
    mut detector: ChangeDetector<S>,
) -> thread::JoinHandle<ChangeDetector<S>> {
    thread::spawn(move || {
        let mut newest: Option<CycleId> = None;

        while let Ok(evt) = evt_rx.recv() {
            match evt {
                CoreEvent::FetchDone {
                    cycle_id,
                    url,
                    status,
                    content_type,
                    body,
                    elapsed,
                } => {
                    log::debug!(
                        target: "runtime_watch",
                        "cycle {cycle_id}: {} bytes of {} from {url} (status {status:?}) in {elapsed:?}",
                        body.len(),
                        content_type.as_deref().unwrap_or("unknown content")
                    );
                    if newest.is_some_and(|newest| cycle_id < newest) {
                        log::warn!(
                            target: "runtime_watch",
                            "cycle {cycle_id} finished after a newer cycle; its document becomes the baseline"
                        );
                    }
                    newest = Some(newest.map_or(cycle_id, |newest| newest.max(cycle_id)));

                    let outcome = run_cycle(&mut detector, &body, config);
                    log::info!(
                        target: "runtime_watch",
                        "cycle {cycle_id}: {} changed units",
                        outcome.changed_units()
                    );
                }
                CoreEvent::FetchError {
                    cycle_id,
                    url,
                    error,
                } => {
                    log::warn!(target: "runtime_watch", "cycle {cycle_id}: failed to fetch {url}: {error}");
                }
            }
        }
        detector
    })
}
