use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use bus::CoreCommand;
use core_types::CycleId;

/// Hands out cycle ids in tick order, starting at 1.
#[derive(Debug, Default)]
pub struct CycleCounter {
    last: CycleId,
}

impl CycleCounter {
    pub fn next_id(&mut self) -> CycleId {
        self.last += 1;
        self.last
    }
}

/// Requests one retrieval per period until the command channel closes.
///
/// The first request goes out after one full period.
pub fn run_ticker(cmd_tx: &Sender<CoreCommand>, url: &str, period: Duration) {
    let mut cycles = CycleCounter::default();
    loop {
        thread::sleep(period);
        let cycle_id = cycles.next_id();
        log::debug!(target: "sitewatch", "tick {cycle_id}");
        let cmd = CoreCommand::Fetch {
            cycle_id,
            url: url.to_string(),
        };
        if cmd_tx.send(cmd).is_err() {
            log::warn!(target: "sitewatch", "net runtime is gone; stopping the ticker");
            break;
        }
    }
}
