//! Receiver-Side Bandwidth Estimation Core
//!
//! This crate implements the per-flow receiver-side estimator: wrapping
//! 16-bit sequence numbers, packet arrival records, RTP header parsing,
//! loss tracking, whole-flow throughput measurement and the floor-clamped
//! bandwidth estimate.

pub mod diag;
pub mod estimator;
pub mod history;
pub mod loss;
pub mod record;
pub mod rtp;
pub mod sequence;
pub mod shared;
pub mod throughput;

pub use diag::{DiagnosticEvent, DiagnosticSink, NullSink};
pub use estimator::{Estimator, EstimatorOptions, EstimatorStats};
pub use history::PacketHistory;
pub use loss::LossTracker;
pub use record::{PacketRecord, RawRecord, RecordError};
pub use rtp::{RtpError, RtpHeader};
pub use sequence::{SeqNumber, SequenceError};
pub use shared::SharedEstimator;
pub use throughput::{Throughput, ThroughputMeter};
