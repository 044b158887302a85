use std::sync::Arc;

use anyhow::Result;
use bus::Bus;
use clap::Parser;
use detect::{ChangeDetector, FailureHook, FileStore, RecordId, StoreError};
use mimalloc::MiMalloc;
use runtime_net::start_net_runtime;
use runtime_watch::start_watch_runtime;

mod config;
mod ticker;

use crate::config::Config;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    let url = config.validated_url()?;

    log::info!(
        target: "sitewatch",
        "watching {url} every {}s, reports go to {}",
        config.interval,
        config.log_dir.display()
    );

    let Bus {
        cmd_tx,
        cmd_rx,
        evt_tx,
        evt_rx,
    } = Bus::new();

    // Both runtimes run detached; the ticker only returns once the net runtime has exited.
    start_net_runtime(cmd_rx, evt_tx, config.fetch_timeout());

    let on_failure: FailureHook = Arc::new(|id: &RecordId, err: &StoreError| {
        log::warn!(target: "sitewatch", "diff report {id} was not written: {err}");
    });
    let detector = ChangeDetector::new(Arc::new(FileStore::new(&config.log_dir)))
        .with_threshold(config.threshold)
        .with_failure_hook(on_failure);
    start_watch_runtime(evt_rx, config.watch_config(), detector);

    ticker::run_ticker(&cmd_tx, &url, config.interval());
    anyhow::bail!("net runtime stopped; no further cycles can run")
}
