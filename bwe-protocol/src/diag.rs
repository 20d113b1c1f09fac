//! Diagnostic side-channel
//!
//! The estimator reports notable events to a [`DiagnosticSink`]. Sinks are
//! best effort: they have no way to return an error, so a failing sink can
//! never disturb the estimate.

use crate::throughput::Throughput;
use std::fmt;

/// Events emitted by the estimator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiagnosticEvent {
    /// Emitted every `log_interval_packets` reports
    Periodic {
        arrival_time_ms: u64,
        loss_rate: f64,
        throughput_bps: u64,
    },
    /// Result of a throughput measurement
    Throughput(Throughput),
    /// The computed bandwidth was raised to the floor
    BandwidthClamped { computed_bps: u64, min_bps: u64 },
    /// Final value handed to the caller
    BandwidthReported { bps: u64 },
}

impl DiagnosticEvent {
    /// Whether a buffered sink should flush after this event
    pub fn is_flush_point(&self) -> bool {
        matches!(
            self,
            DiagnosticEvent::Periodic { .. } | DiagnosticEvent::BandwidthReported { .. }
        )
    }
}

impl fmt::Display for DiagnosticEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DiagnosticEvent::Periodic {
                arrival_time_ms,
                loss_rate,
                throughput_bps,
            } => write!(
                f,
                "Time: {}ms, Packet loss rate: {:.4}, Throughput: {} bps",
                arrival_time_ms, loss_rate, throughput_bps
            ),
            DiagnosticEvent::Throughput(Throughput::InsufficientTime { fallback_bps }) => write!(
                f,
                "Throughput calculation skipped: insufficient time data. Returning last valid: {} bps",
                fallback_bps
            ),
            DiagnosticEvent::Throughput(Throughput::Calculated {
                bps,
                total_bytes,
                duration_ms,
            }) => write!(
                f,
                "Throughput calculated: {} bps (bytes={}, duration={}ms)",
                bps, total_bytes, duration_ms
            ),
            DiagnosticEvent::Throughput(Throughput::Zero { fallback_bps }) => write!(
                f,
                "Throughput calculated as zero. Returning last valid: {} bps",
                fallback_bps
            ),
            DiagnosticEvent::BandwidthClamped {
                computed_bps,
                min_bps,
            } => write!(
                f,
                "Calculated bandwidth {} bps is below minimum threshold. Returning minimum: {} bps",
                computed_bps, min_bps
            ),
            DiagnosticEvent::BandwidthReported { bps } => {
                write!(f, "Estimated bandwidth reported: {} bps", bps)
            }
        }
    }
}

/// Receiver of diagnostic events
pub trait DiagnosticSink: Send {
    /// Record one event. Implementations must swallow their own failures.
    fn record(&mut self, event: &DiagnosticEvent);
}

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn record(&mut self, _event: &DiagnosticEvent) {}
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Box<S> {
    fn record(&mut self, event: &DiagnosticEvent) {
        (**self).record(event)
    }
}
