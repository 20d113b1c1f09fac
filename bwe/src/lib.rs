//! Receiver-side bandwidth estimation
//!
//! Facade crate combining the estimator core with its I/O collaborators.

pub use bwe_io as io;
pub use bwe_protocol as protocol;

pub use bwe_io::{Clock, FileSink, MonotonicClock};
pub use bwe_protocol::{
    DiagnosticSink, Estimator, EstimatorOptions, EstimatorStats, PacketRecord, RawRecord,
    SeqNumber, SharedEstimator,
};
