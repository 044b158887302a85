use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

const USER_AGENT: &str = "sitewatch/0.1";

pub struct FetchResult {
    pub url: String,           // final URL after redirects
    pub requested_url: String, // what we asked for
    pub status: Option<u16>,
    pub body: String,
    pub content_type: Option<String>,
    pub duration_ms: u128,
    pub error: Option<String>,
}

impl FetchResult {
    fn failed(requested_url: String, duration_ms: u128, error: String) -> Self {
        Self {
            url: requested_url.clone(),
            requested_url,
            status: None,
            body: String::new(),
            content_type: None,
            duration_ms,
            error: Some(error),
        }
    }

    pub fn is_success_status(&self) -> bool {
        matches!(self.status, Some(200..=299))
    }
}

pub type FetchCallback = Arc<dyn Fn(FetchResult) + Send + Sync>;

/// Retrieves `url` on a detached thread and hands the outcome to `cb`.
///
/// The body is decoded as text regardless of the status code. Transport failures are reported
/// through `FetchResult::error`; `cb` is called exactly once.
pub fn fetch_text(url: String, timeout: Duration, cb: FetchCallback) {
    thread::spawn(move || {
        let start = Instant::now();

        let client = match reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
        {
            Ok(c) => c,
            Err(e) => {
                cb(FetchResult::failed(url, 0, format!("client build error: {e}")));
                return;
            }
        };

        let result = (|| -> Result<FetchResult, String> {
            let resp = client.get(&url).send().map_err(|e| e.to_string())?;
            let status = resp.status().as_u16();
            let final_url = resp.url().to_string();
            let content_type = resp
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string());
            let body = resp.text().map_err(|e| e.to_string())?;

            Ok(FetchResult {
                requested_url: url.clone(),
                url: final_url,
                status: Some(status),
                body,
                content_type,
                duration_ms: start.elapsed().as_millis(),
                error: None,
            })
        })();

        match result {
            Ok(ok) => {
                log::debug!(target: "net", "fetched {} ({} bytes) in {} ms", ok.url, ok.body.len(), ok.duration_ms);
                cb(ok)
            }
            Err(err) => {
                let elapsed = start.elapsed().as_millis();
                cb(FetchResult::failed(url, elapsed, err))
            }
        }
    });
}
