use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graphing::CanvasGeometry;
use crate::stats::Timeframe;

pub static DEFAULT_PREFIX: &str = ">>";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub prefix: String,
    /// Overrides the public Testaustime server.
    pub api_host: Option<String>,
    pub leaderboard: String,
    pub refresh_interval_secs: u64,
    pub max_list_length: usize,
    pub leaderboard_page_size: usize,
    pub default_timeframe: Timeframe,
    pub log_level: String,
    pub canvas: CanvasGeometry,
    /// Channel that gets an "online" message on startup.
    pub status_channel: Option<u64>,
    pub revision_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            api_host: None,
            leaderboard: String::new(),
            refresh_interval_secs: 60,
            max_list_length: 15,
            leaderboard_page_size: 25,
            default_timeframe: Timeframe::Month,
            log_level: "info".to_string(),
            canvas: CanvasGeometry::default(),
            status_channel: None,
            revision_file: PathBuf::from("revision"),
        }
    }
}

impl Settings {
    /// Reads settings from a JSON file; a missing file gives the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        match File::open(path) {
            Ok(f) => serde_json::from_reader(f).map_err(Into::into),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.prefix.is_empty() {
            return Err(Error::Config("prefix must not be empty".to_string()));
        }
        if self.leaderboard.is_empty() {
            return Err(Error::Config("leaderboard name is required".to_string()));
        }
        if self.max_list_length == 0 || self.leaderboard_page_size == 0 {
            return Err(Error::Config("list lengths must be positive".to_string()));
        }
        if self.status_channel == Some(0) {
            return Err(Error::Config("status channel id must not be 0".to_string()));
        }

        Ok(())
    }

    /// Contents of the revision file, or `unknown` when it can't be read.
    pub fn revision(&self) -> String {
        std::fs::read_to_string(&self.revision_file)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Credentials read from the environment.
#[derive(Debug, Clone)]
pub struct Secrets {
    pub discord_token: String,
    pub testaustime_user: String,
    pub testaustime_pass: String,
}

impl Secrets {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::Config(format!("{} is not set", key)))
        };

        Ok(Self {
            discord_token: require("DISCORD_TOKEN")?,
            testaustime_user: require("TESTAUSTIME_USER")?,
            testaustime_pass: require("TESTAUSTIME_PASS")?,
        })
    }
}
