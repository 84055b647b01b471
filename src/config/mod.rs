use std::path::PathBuf;
use std::time::Duration;

use crate::errors::{MirrorError, MirrorResult};

pub const DEFAULT_USER_AGENT: &str =
    "rss-feed-mirror/2.0 (https://github.com/your-handle; contact: you@example.com)";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings shared by every outgoing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub http: HttpSettings,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> MirrorResult<Self> {
        let exe_dir = Self::exe_dir();

        // Try to load .env from executable's directory first
        if let Some(ref dir) = exe_dir {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        // Default data_dir is relative to executable directory
        let data_dir = std::env::var("MIRROR_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                exe_dir
                    .map(|d| d.join("data"))
                    .unwrap_or_else(|| PathBuf::from("./data"))
            });

        let user_agent =
            std::env::var("MIRROR_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        let timeout_secs = match std::env::var("MIRROR_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout(&raw)?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            data_dir,
            http: HttpSettings {
                user_agent,
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }

    pub fn history_path(&self, slug: &str) -> PathBuf {
        self.data_dir.join(format!("{}_history.json", slug))
    }

    pub fn output_path(&self, slug: &str) -> PathBuf {
        self.data_dir.join(format!("{}.xml", slug))
    }
}

fn parse_timeout(raw: &str) -> MirrorResult<u64> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(MirrorError::Config(format!(
            "MIRROR_TIMEOUT_SECS must be a positive integer, got '{}'",
            raw
        ))),
    }
}
