use core_types::CycleId;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

#[derive(Debug)]
pub enum CoreCommand {
    // Ticker -> network
    Fetch { cycle_id: CycleId, url: String },
    Shutdown,
}

#[derive(Debug)]
pub enum CoreEvent {
    // Network -> watcher
    FetchDone {
        cycle_id: CycleId,
        url: String,
        status: Option<u16>,
        content_type: Option<String>,
        body: String,
        elapsed: Duration,
    },
    FetchError {
        cycle_id: CycleId,
        url: String,
        error: String,
    },
}

pub struct Bus {
    pub cmd_tx: Sender<CoreCommand>,
    pub cmd_rx: Receiver<CoreCommand>,
    pub evt_tx: Sender<CoreEvent>, // shareable for runtimes
    pub evt_rx: Receiver<CoreEvent>,
}

impl Bus {
    pub fn new() -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (evt_tx, evt_rx) = mpsc::channel();
        Self {
            cmd_tx,
            cmd_rx,
            evt_tx,
            evt_rx,
        }
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}
