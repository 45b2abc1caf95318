use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Application configuration, loaded once at startup and passed by
/// reference to everything that needs it. Every section has defaults
/// so a minimal (or empty) file works.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub cookie: CookieConfig,
    pub discovery: DiscoveryConfig,
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub log: LogConfig,
    pub schedule: ScheduleConfig,
    pub push: PushConfig,
    pub redirect: RedirectConfig,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    /// Admission-gate capacity for concurrent source fetches.
    pub max_workers: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_workers: 5,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct CookieConfig {
    /// Raw cookie header value for the upstream site.
    pub data: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub enable: bool,
    pub limit: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            enable: false,
            limit: 5,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SourceConfig {
    pub file: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("config/source.txt"),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub m3u: PathBuf,
    pub delimited: PathBuf,
    /// When set, raw listing API responses are dumped here.
    pub debug: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            m3u: PathBuf::from("output/live.m3u"),
            delimited: PathBuf::from("output/live.txt"),
            debug: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    pub dir: PathBuf,
    /// Also mirror log output to the terminal.
    pub terminal: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("logs"),
            terminal: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ScheduleConfig {
    pub enable: bool,
    pub interval_hours: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            enable: false,
            interval_hours: 24,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct PushConfig {
    pub bark: Option<BarkConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BarkConfig {
    pub host: String,
    pub key: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct RedirectConfig {
    pub enable: bool,
    pub from: PathBuf,
    pub to: PathBuf,
}
