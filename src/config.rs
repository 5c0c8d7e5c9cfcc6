//! Monitor configuration.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `MEDIAWARP_MONITOR_*` environment variables. Command-line flags are
//! applied on top by the binary.
//!
//! ```toml
//! base_url = "http://192.168.1.10:8080"
//! interval_ms = 5000
//! locale = "zh-CN"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::data::Locale;

/// Identifying header value sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; MediaWarp-Monitor/1.0)";

/// Environment variable prefix (`MEDIAWARP_MONITOR_BASE_URL`, ...).
pub const ENV_PREFIX: &str = "MEDIAWARP_MONITOR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Scheme, host and port of the MediaWarp server.
    pub base_url: String,
    /// Path of the monitor data endpoint.
    pub path: String,
    /// Polling interval in milliseconds.
    pub interval_ms: u64,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    pub user_agent: String,
    pub locale: Locale,
    /// Where to write logs while the TUI owns the terminal.
    pub log_file: Option<PathBuf>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            path: "/api/monitor/data".to_string(),
            interval_ms: 3000,
            timeout_ms: 10_000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            locale: Locale::default(),
            log_file: None,
        }
    }
}

impl MonitorConfig {
    /// Load configuration from an optional file plus the environment.
    ///
    /// A missing file is an error only when a path was given explicitly.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }
        let config = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let loaded: MonitorConfig = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject settings the poller cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            bail!("interval_ms must be greater than zero");
        }
        if self.timeout_ms == 0 {
            bail!("timeout_ms must be greater than zero");
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            bail!("base_url must start with http:// or https://, got {}", self.base_url);
        }
        Ok(())
    }

    /// Full URL of the monitor endpoint.
    pub fn endpoint_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.path.starts_with('/') {
            format!("{}{}", base, self.path)
        } else {
            format!("{}/{}", base, self.path)
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}
