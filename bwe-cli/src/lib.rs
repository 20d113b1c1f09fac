//! BWE CLI Library
//!
//! Shared functionality for the estimator command-line tools.

pub mod cli;
pub mod config;
pub mod listen;
pub mod stats;
pub mod trace;

pub use cli::{init_tracing, ConfigArgs};
pub use config::{Config, ConfigError, DiagnosticsConfig, EstimatorConfig};
pub use listen::{listen, ListenOptions, ListenSummary};
pub use stats::{compact_stats, display_summary, format_bandwidth, format_bytes, format_loss_rate};
pub use trace::{replay, TraceError};
