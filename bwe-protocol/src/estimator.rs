//! Receiver-side bandwidth estimator
//!
//! One [`Estimator`] tracks one flow. Packet reports feed the loss tracker,
//! the throughput meter and the bounded history; the bandwidth estimate is
//! the whole-flow throughput clamped below at a floor.

use crate::diag::{DiagnosticEvent, DiagnosticSink, NullSink};
use crate::history::PacketHistory;
use crate::loss::LossTracker;
use crate::record::PacketRecord;
use crate::sequence::SeqNumber;
use crate::throughput::ThroughputMeter;
use std::fmt;

/// Throughput reported before the first real measurement (bits per second)
pub const DEFAULT_THROUGHPUT_BPS: u64 = 300_000;

/// Lowest bandwidth estimate ever returned (bits per second)
pub const MIN_BANDWIDTH_BPS: u64 = 100_000;

/// Reports between periodic diagnostic lines
pub const DEFAULT_LOG_INTERVAL_PACKETS: u64 = 100;

/// Records retained for diagnostics
pub const DEFAULT_HISTORY_CAPACITY: usize = 1024;

/// Estimator tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimatorOptions {
    /// Initial "last valid" throughput
    pub default_throughput_bps: u64,
    /// Floor applied to the bandwidth estimate; values below
    /// [`MIN_BANDWIDTH_BPS`] are raised to it
    pub min_bandwidth_bps: u64,
    /// Emit a periodic diagnostic every N reports (0 disables)
    pub log_interval_packets: u64,
    /// Packet history size (0 disables retention)
    pub history_capacity: usize,
}

impl Default for EstimatorOptions {
    fn default() -> Self {
        EstimatorOptions {
            default_throughput_bps: DEFAULT_THROUGHPUT_BPS,
            min_bandwidth_bps: MIN_BANDWIDTH_BPS,
            log_interval_packets: DEFAULT_LOG_INTERVAL_PACKETS,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// Snapshot of the estimator counters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorStats {
    /// Packets received
    pub total_packets: u64,
    /// Packets presumed lost from sequence gaps
    pub missing_packets: u64,
    /// Payload bytes received
    pub total_bytes: u64,
    /// `missing / (total + missing)`
    pub loss_rate: f64,
    /// Last sequence number seen
    pub last_sequence_seen: Option<SeqNumber>,
    /// Arrival time of the first record
    pub start_time_ms: Option<u64>,
    /// Arrival time of the most recent record
    pub last_time_ms: Option<u64>,
    /// Cached last strictly positive throughput
    pub last_valid_throughput_bps: u64,
}

/// Per-flow receiver-side bandwidth estimator
///
/// Not internally synchronized; wrap it in a
/// [`SharedEstimator`](crate::shared::SharedEstimator) to report from
/// several threads.
pub struct Estimator {
    options: EstimatorOptions,
    loss: LossTracker,
    throughput: ThroughputMeter,
    history: PacketHistory,
    sink: Box<dyn DiagnosticSink>,
}

impl Estimator {
    /// Create an estimator with default options and no diagnostics
    pub fn new() -> Self {
        Self::with_options(EstimatorOptions::default())
    }

    /// Create an estimator with custom options and no diagnostics
    pub fn with_options(options: EstimatorOptions) -> Self {
        Self::with_sink(options, Box::new(NullSink))
    }

    /// Create an estimator that reports diagnostics to `sink`
    ///
    /// The sink is dropped together with the estimator.
    pub fn with_sink(options: EstimatorOptions, sink: Box<dyn DiagnosticSink>) -> Self {
        Estimator {
            options,
            loss: LossTracker::new(),
            throughput: ThroughputMeter::new(options.default_throughput_bps),
            history: PacketHistory::new(options.history_capacity),
            sink,
        }
    }

    /// Account for one received packet
    pub fn report_state(&mut self, record: &PacketRecord) {
        self.throughput
            .on_packet(record.arrival_time_ms, record.payload_size);
        self.loss.on_packet(record.sequence_number);
        self.history.push(*record);

        tracing::trace!(
            seq = record.sequence_number.as_raw(),
            arrival_ms = record.arrival_time_ms,
            size = record.payload_size,
            "packet reported"
        );

        let interval = self.options.log_interval_packets;
        if interval > 0 && self.loss.total_packets() % interval == 0 {
            let loss_rate = self.loss.loss_rate();
            let throughput_bps = self.throughput();
            self.sink.record(&DiagnosticEvent::Periodic {
                arrival_time_ms: record.arrival_time_ms,
                loss_rate,
                throughput_bps,
            });
        }
    }

    /// Current bandwidth estimate in bits per second
    ///
    /// Never below `min_bandwidth_bps` or [`MIN_BANDWIDTH_BPS`]. Repeated
    /// calls without intervening reports return the same value.
    pub fn estimated_bandwidth(&mut self) -> u64 {
        let computed = self.throughput();
        let min_bps = self.options.min_bandwidth_bps.max(MIN_BANDWIDTH_BPS);

        let bandwidth = if computed < min_bps {
            self.sink.record(&DiagnosticEvent::BandwidthClamped {
                computed_bps: computed,
                min_bps,
            });
            min_bps
        } else {
            computed
        };

        self.sink
            .record(&DiagnosticEvent::BandwidthReported { bps: bandwidth });
        bandwidth
    }

    /// Whole-flow throughput in bits per second, refreshing the cached value
    pub fn throughput(&mut self) -> u64 {
        let measurement = self.throughput.measure();
        self.sink.record(&DiagnosticEvent::Throughput(measurement));
        measurement.bps()
    }

    /// Fraction of packets presumed lost
    pub fn loss_rate(&self) -> f64 {
        self.loss.loss_rate()
    }

    pub fn missing_packets(&self) -> u64 {
        self.loss.missing_packets()
    }

    pub fn total_packets(&self) -> u64 {
        self.loss.total_packets()
    }

    pub fn total_bytes(&self) -> u64 {
        self.throughput.total_bytes()
    }

    pub fn last_sequence_seen(&self) -> Option<SeqNumber> {
        self.loss.last_seen()
    }

    /// Recently received records
    pub fn history(&self) -> &PacketHistory {
        &self.history
    }

    pub fn options(&self) -> &EstimatorOptions {
        &self.options
    }

    /// Snapshot the counters without refreshing the throughput cache
    pub fn stats(&self) -> EstimatorStats {
        EstimatorStats {
            total_packets: self.loss.total_packets(),
            missing_packets: self.loss.missing_packets(),
            total_bytes: self.throughput.total_bytes(),
            loss_rate: self.loss.loss_rate(),
            last_sequence_seen: self.loss.last_seen(),
            start_time_ms: self.throughput.start_time_ms(),
            last_time_ms: self.throughput.last_time_ms(),
            last_valid_throughput_bps: self.throughput.last_valid_bps(),
        }
    }
}

impl Default for Estimator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Estimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Estimator")
            .field("options", &self.options)
            .field("loss", &self.loss)
            .field("throughput", &self.throughput)
            .field("history_len", &self.history.len())
            .finish_non_exhaustive()
    }
}
