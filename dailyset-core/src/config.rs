//! Configuration loading and validation
//!
//! All settings have compiled defaults so the server starts with no config
//! file at all. A TOML file can override any of them, and the server binary
//! layers CLI/environment overrides on top.

use crate::{Error, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Server and generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root directory of the sampleable corpus
    pub corpus_root: PathBuf,
    /// Directory the daily set and its timestamp are persisted to
    pub output_dir: PathBuf,
    /// File name of the persisted daily set artifact
    pub artifact_name: String,
    /// Number of records in a full daily set (one per distinct source file)
    pub sample_size: usize,
    /// Hour of day (0-23, local to `timezone`) at which the set goes stale
    pub refresh_hour: u32,
    /// IANA time zone name anchoring the refresh boundary
    pub timezone: String,
    /// HTTP listen port
    pub port: u16,
    /// Request rate cap for the download endpoint
    pub rate_limit: RateLimitConfig,
}

/// Rate limiter settings for the download endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Length of the limiting window in seconds
    pub window_secs: u64,
    /// Maximum requests allowed per window
    pub max_requests: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus_root: PathBuf::from("./resources"),
            output_dir: PathBuf::from("./output"),
            artifact_name: "dailyset.json".to_string(),
            sample_size: 5,
            refresh_hour: 1,
            timezone: "America/New_York".to_string(),
            port: 3000,
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: 60,
            max_requests: 30,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate field ranges and the time zone name
    pub fn validate(&self) -> Result<()> {
        if self.refresh_hour > 23 {
            return Err(Error::Config(format!(
                "refresh_hour must be 0-23, got {}",
                self.refresh_hour
            )));
        }
        if self.sample_size == 0 {
            return Err(Error::Config("sample_size must be at least 1".to_string()));
        }
        if self.rate_limit.max_requests == 0 {
            return Err(Error::Config(
                "rate_limit.max_requests must be at least 1".to_string(),
            ));
        }
        if self.rate_limit.window_secs == 0 {
            return Err(Error::Config(
                "rate_limit.window_secs must be at least 1".to_string(),
            ));
        }
        self.timezone()?;
        Ok(())
    }

    /// Parse the configured time zone name
    pub fn timezone(&self) -> Result<Tz> {
        self.timezone
            .parse()
            .map_err(|_| Error::Config(format!("Unknown time zone: {}", self.timezone)))
    }
}
