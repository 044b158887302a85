// crates/runtime_net/src/lib.rs
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::time::Duration;

use bus::{CoreCommand, CoreEvent};
use net::{FetchResult, fetch_text};

/// Serves fetch commands until `Shutdown` or until every command sender is gone.
///
/// Each fetch runs on its own thread, so a slow retrieval never delays the next tick's request.
/// Events are sent in completion order, which is not necessarily tick order.
pub fn start_net_runtime(
    cmd_rx: Receiver<CoreCommand>,
    evt_tx: Sender<CoreEvent>,
    timeout: Duration,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                CoreCommand::Fetch { cycle_id, url } => {
                    log::debug!(target: "runtime_net", "cycle {cycle_id}: fetching {url}");
                    let evt_tx = evt_tx.clone();
                    fetch_text(
                        url,
                        timeout,
                        Arc::new(move |result: FetchResult| {
                            let _ = evt_tx.send(fetch_event(cycle_id, result));
                        }),
                    );
                }
                CoreCommand::Shutdown => break,
            }
        }
        log::debug!(target: "runtime_net", "net runtime stopped");
    })
}

fn fetch_event(cycle_id: core_types::CycleId, result: FetchResult) -> CoreEvent {
    if result.error.is_none() && !result.is_success_status() {
        log::debug!(
            target: "runtime_net",
            "cycle {cycle_id}: {} answered with status {:?}",
            result.url,
            result.status
        );
    }
    match result.error {
        Some(error) => CoreEvent::FetchError {
            cycle_id,
            url: result.requested_url,
            error,
        },
        None => CoreEvent::FetchDone {
            cycle_id,
            url: result.url,
            status: result.status,
            content_type: result.content_type,
            body: result.body,
            elapsed: Duration::from_millis(result.duration_ms as u64),
        },
    }
}
