//! Configuration file support for the estimator CLI tools

use bwe_io::{FileSink, DEFAULT_LOG_FILE_NAME};
use bwe_protocol::estimator::{
    DEFAULT_HISTORY_CAPACITY, DEFAULT_LOG_INTERVAL_PACKETS, DEFAULT_THROUGHPUT_BPS,
    MIN_BANDWIDTH_BPS,
};
use bwe_protocol::{DiagnosticSink, Estimator, EstimatorOptions, NullSink};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Estimator tuning section (`[estimator]`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Throughput reported before the first measurement (bps)
    #[serde(default = "default_throughput")]
    pub default_throughput_bps: u64,
    /// Floor for the bandwidth estimate (bps)
    #[serde(default = "default_min_bandwidth")]
    pub min_bandwidth_bps: u64,
    /// Periodic diagnostic every N packets (0 disables)
    #[serde(default = "default_log_interval")]
    pub log_interval_packets: u64,
    /// Packets retained for diagnostics
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

fn default_throughput() -> u64 {
    DEFAULT_THROUGHPUT_BPS
}

fn default_min_bandwidth() -> u64 {
    MIN_BANDWIDTH_BPS
}

fn default_log_interval() -> u64 {
    DEFAULT_LOG_INTERVAL_PACKETS
}

fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        EstimatorConfig {
            default_throughput_bps: default_throughput(),
            min_bandwidth_bps: default_min_bandwidth(),
            log_interval_packets: default_log_interval(),
            history_capacity: default_history_capacity(),
        }
    }
}

impl From<EstimatorConfig> for EstimatorOptions {
    fn from(config: EstimatorConfig) -> Self {
        EstimatorOptions {
            default_throughput_bps: config.default_throughput_bps,
            min_bandwidth_bps: config.min_bandwidth_bps,
            log_interval_packets: config.log_interval_packets,
            history_capacity: config.history_capacity,
        }
    }
}

/// Diagnostic log section (`[diagnostics]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// Write the diagnostic log at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Directory holding the log file
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Log file name
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

fn default_enabled() -> bool {
    true
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_file_name() -> String {
    DEFAULT_LOG_FILE_NAME.to_string()
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        DiagnosticsConfig {
            enabled: default_enabled(),
            output_dir: default_output_dir(),
            file_name: default_file_name(),
        }
    }
}

/// Combined configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Statistics interval in seconds
    #[serde(default = "default_stats_interval")]
    pub stats_interval_secs: u64,
    #[serde(default)]
    pub estimator: EstimatorConfig,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

fn default_stats_interval() -> u64 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Config {
            stats_interval_secs: default_stats_interval(),
            estimator: EstimatorConfig::default(),
            diagnostics: DiagnosticsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Create example configuration
    pub fn example() -> Self {
        Config {
            stats_interval_secs: 1,
            estimator: EstimatorConfig::default(),
            diagnostics: DiagnosticsConfig {
                enabled: true,
                output_dir: PathBuf::from("/tmp/bwe"),
                file_name: default_file_name(),
            },
        }
    }

    /// Reject settings the estimator cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.estimator.min_bandwidth_bps < MIN_BANDWIDTH_BPS {
            return Err(ConfigError::Invalid(format!(
                "estimator.min_bandwidth_bps must be at least {}",
                MIN_BANDWIDTH_BPS
            )));
        }
        if self.diagnostics.enabled && self.diagnostics.file_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "diagnostics.file_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Get statistics interval as Duration
    pub fn stats_interval(&self) -> Duration {
        Duration::from_secs(self.stats_interval_secs)
    }

    /// Build an estimator wired to the configured diagnostic sink
    pub fn build_estimator(&self) -> Estimator {
        let sink: Box<dyn DiagnosticSink> = if self.diagnostics.enabled {
            FileSink::open_or_null(&self.diagnostics.output_dir, &self.diagnostics.file_name)
        } else {
            Box::new(NullSink)
        };
        Estimator::with_sink(self.estimator.into(), sink)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
