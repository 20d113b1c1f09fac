//! Command-line options shared by the estimator binaries

use crate::config::{Config, ConfigError};
use clap::Args;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Configuration flags common to every tool
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory for the diagnostic log (overrides the config file)
    #[arg(long, env = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Do not write the diagnostic log
    #[arg(long)]
    pub no_diagnostics: bool,
}

impl ConfigArgs {
    /// Load the config file (or defaults) and apply flag overrides
    pub fn load(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(dir) = &self.output_dir {
            config.diagnostics.output_dir = dir.clone();
        }
        if self.no_diagnostics {
            config.diagnostics.enabled = false;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Install the stderr tracing subscriber (`RUST_LOG`, default `info`)
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
