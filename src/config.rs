use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use markup::{TagMatching, TreeBuilderConfig};
use runtime_watch::WatchConfig;

pub const DEFAULT_URL: &str = "https://ubicomp.net/sw/task1.php";

/// Watches a web page and writes a diff report whenever it changes noticeably.
#[derive(Parser, Debug, Clone)]
#[command(name = "sitewatch", version, about)]
pub struct Config {
    /// Page to watch
    #[arg(short, long, default_value = DEFAULT_URL)]
    pub url: String,

    /// Seconds between two retrievals
    #[arg(short, long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,

    /// Directory receiving the diff reports
    #[arg(short = 'o', long, default_value = "./logs")]
    pub log_dir: PathBuf,

    /// Number of changed units that must be exceeded before a report is written
    #[arg(long, default_value_t = detect::PERSIST_THRESHOLD)]
    pub threshold: usize,

    /// Retrieval timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub fetch_timeout: u64,

    /// Match closing tags against a stack of open tags instead of the nearest same-name tag
    #[arg(long)]
    pub balanced_tags: bool,
}

impl Config {
    /// Checks the watched URL and returns it in normalized form.
    pub fn validated_url(&self) -> Result<String> {
        let parsed = url::Url::parse(&self.url)
            .with_context(|| format!("invalid --url {:?}", self.url))?;
        match parsed.scheme() {
            "http" | "https" => Ok(parsed.into()),
            other => anyhow::bail!("unsupported scheme {other:?} in --url"),
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }

    pub fn watch_config(&self) -> WatchConfig {
        let matching = if self.balanced_tags {
            TagMatching::Balanced
        } else {
            TagMatching::NearestForward
        };
        WatchConfig {
            tree: TreeBuilderConfig { matching },
        }
    }
}
