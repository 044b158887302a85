use bus::CoreEvent;
use detect::{ChangeDetector, CycleOutcome, FileStore, RecordId, Store, StoreError};
use markup::{TagMatching, TreeBuilderConfig};
use runtime_watch::{WatchConfig, run_cycle, start_watch_runtime};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct ChannelStore {
    tx: Mutex<Sender<String>>,
}

impl Store for ChannelStore {
    fn persist(&self, id: &RecordId, text: &str) -> Result<PathBuf, StoreError> {
        let _ = self.tx.lock().unwrap().send(text.to_string());
        Ok(PathBuf::from(id.as_str()))
    }
}

fn channel_detector() -> (ChangeDetector<ChannelStore>, Receiver<String>) {
    let (tx, rx) = mpsc::channel();
    let store = Arc::new(ChannelStore { tx: Mutex::new(tx) });
    (ChangeDetector::new(store), rx)
}

fn done(cycle_id: u64, body: &str) -> CoreEvent {
    CoreEvent::FetchDone {
        cycle_id,
        url: "https://example.test/".to_string(),
        status: Some(200),
        content_type: Some("text/html".to_string()),
        body: body.to_string(),
        elapsed: Duration::from_millis(5),
    }
}

fn list_page(items: &[&str]) -> String {
    let mut out = String::from("<body><h1>Board</h1>");
    for item in items {
        out.push_str("<p>");
        out.push_str(item);
        out.push_str("</p><br/>");
    }
    out.push_str("</body>");
    out
}

#[test]
fn runtime_persists_only_significant_changes() {
    let (detector, reports) = channel_detector();
    let (evt_tx, evt_rx) = mpsc::channel();
    let handle = start_watch_runtime(evt_rx, WatchConfig::default(), detector);

    let first = list_page(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]);
    let minor = list_page(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "J"]);
    let major = list_page(&["A", "b", "C", "d", "E", "f", "G", "h", "I", "J"]);

    evt_tx.send(done(1, &first)).unwrap();
    evt_tx.send(done(2, &minor)).unwrap();
    evt_tx.send(done(3, &major)).unwrap();
    drop(evt_tx);

    let detector = handle.join().unwrap();
    let report = reports
        .recv_timeout(Duration::from_secs(5))
        .expect("major change should be persisted");
    assert!(report.contains("- a\r\n"), "{report:?}");
    assert!(report.contains("+ A\r\n"), "{report:?}");
    assert!(reports.recv_timeout(Duration::from_millis(200)).is_err());
    assert_eq!(
        detector.state().previous(),
        Some(markup::normalize(&major).as_str())
    );
}

#[test]
fn late_retrieval_becomes_the_baseline() {
    let (detector, _reports) = channel_detector();
    let (evt_tx, evt_rx) = mpsc::channel();
    let handle = start_watch_runtime(evt_rx, WatchConfig::default(), detector);

    let older = list_page(&["old"]);
    let newer = list_page(&["new"]);
    evt_tx.send(done(2, &newer)).unwrap();
    evt_tx.send(done(1, &older)).unwrap();
    drop(evt_tx);

    let detector = handle.join().unwrap();
    assert_eq!(
        detector.state().previous(),
        Some(markup::normalize(&older).as_str())
    );
}

#[test]
fn fetch_errors_leave_the_state_untouched() {
    let (detector, reports) = channel_detector();
    let (evt_tx, evt_rx) = mpsc::channel();
    let handle = start_watch_runtime(evt_rx, WatchConfig::default(), detector);

    evt_tx
        .send(CoreEvent::FetchError {
            cycle_id: 1,
            url: "https://example.test/".to_string(),
            error: "connection refused".to_string(),
        })
        .unwrap();
    drop(evt_tx);

    let detector = handle.join().unwrap();
    assert_eq!(detector.state().previous(), None);
    assert!(reports.recv_timeout(Duration::from_millis(200)).is_err());
}

#[test]
fn run_cycle_honours_tag_matching() {
    let input = "<div><h1>Head</h1><div>inner</div>tail</div>";
    let balanced = WatchConfig {
        tree: TreeBuilderConfig {
            matching: TagMatching::Balanced,
        },
    };

    let (mut detector, _reports) = channel_detector();
    assert_eq!(
        run_cycle(&mut detector, input, WatchConfig::default()),
        CycleOutcome::Baseline
    );
    let nearest = detector.state().previous().map(str::to_string);

    let (mut detector, _reports) = channel_detector();
    run_cycle(&mut detector, input, balanced);
    let stacked = detector.state().previous().map(str::to_string);

    // Nearest-forward matching closes the outer div at the inner </div>, losing nothing but
    // structure here; both render the same text.
    assert_eq!(nearest.as_deref(), Some(" \r\n# Head \r\ninnertail"));
    assert_eq!(stacked, nearest);
}

#[test]
fn file_store_receives_report_from_runtime() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("logs");
    let mut detector = ChangeDetector::new(Arc::new(FileStore::new(&dir))).with_threshold(0);
    run_cycle(&mut detector, &list_page(&["x"]), WatchConfig::default());
    let outcome = run_cycle(&mut detector, &list_page(&["y"]), WatchConfig::default());
    let CycleOutcome::Significant { id, report } = outcome else {
        panic!("threshold 0 should persist any change");
    };

    let path = dir.join(format!("{id}.md"));
    let deadline = std::time::Instant::now() + Duration::from_secs(5);
    while std::fs::read_to_string(&path).map_or(true, |text| text.is_empty()) {
        assert!(std::time::Instant::now() < deadline, "report never written");
        std::thread::sleep(Duration::from_millis(20));
    }
    assert_eq!(std::fs::read_to_string(&path).unwrap(), report.text);
}
