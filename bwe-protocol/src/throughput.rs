//! Whole-flow throughput measurement
//!
//! Throughput is total payload bits divided by the span between the first
//! and the most recent arrival. There is no sliding window: the rate is an
//! average over the entire flow. When the span is empty or the result is
//! zero the last strictly positive measurement is reported instead.

/// Outcome of a throughput measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Throughput {
    /// No usable time span yet; carries the last valid value
    InsufficientTime { fallback_bps: u64 },
    /// A fresh, strictly positive measurement
    Calculated {
        bps: u64,
        total_bytes: u64,
        duration_ms: u64,
    },
    /// The measurement came out as zero; carries the last valid value
    Zero { fallback_bps: u64 },
}

impl Throughput {
    /// Rate reported for this outcome (bits per second)
    pub fn bps(&self) -> u64 {
        match *self {
            Throughput::InsufficientTime { fallback_bps } => fallback_bps,
            Throughput::Calculated { bps, .. } => bps,
            Throughput::Zero { fallback_bps } => fallback_bps,
        }
    }
}

/// Byte and arrival-time accumulator for one flow
#[derive(Debug, Clone)]
pub struct ThroughputMeter {
    total_bytes: u64,
    start_time_ms: Option<u64>,
    last_time_ms: Option<u64>,
    last_valid_bps: u64,
}

impl ThroughputMeter {
    /// Create a meter that reports `initial_bps` until a real measurement exists
    pub fn new(initial_bps: u64) -> Self {
        ThroughputMeter {
            total_bytes: 0,
            start_time_ms: None,
            last_time_ms: None,
            last_valid_bps: initial_bps,
        }
    }

    /// Account for one arrival
    pub fn on_packet(&mut self, arrival_time_ms: u64, payload_size: u64) {
        if self.start_time_ms.is_none() {
            self.start_time_ms = Some(arrival_time_ms);
        }
        self.last_time_ms = Some(arrival_time_ms);
        self.total_bytes = self.total_bytes.saturating_add(payload_size);
    }

    /// Measure throughput, refreshing the cached last valid value
    pub fn measure(&mut self) -> Throughput {
        let duration_ms = match (self.start_time_ms, self.last_time_ms) {
            (Some(start), Some(last)) if last > start => last - start,
            _ => {
                return Throughput::InsufficientTime {
                    fallback_bps: self.last_valid_bps,
                }
            }
        };

        let bits_per_sec =
            u128::from(self.total_bytes) * 8 * 1000 / u128::from(duration_ms);
        let bps = u64::try_from(bits_per_sec).unwrap_or(u64::MAX);

        if bps > 0 {
            self.last_valid_bps = bps;
            Throughput::Calculated {
                bps,
                total_bytes: self.total_bytes,
                duration_ms,
            }
        } else {
            Throughput::Zero {
                fallback_bps: self.last_valid_bps,
            }
        }
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub fn start_time_ms(&self) -> Option<u64> {
        self.start_time_ms
    }

    pub fn last_time_ms(&self) -> Option<u64> {
        self.last_time_ms
    }

    /// Last strictly positive measurement (or the initial value)
    pub fn last_valid_bps(&self) -> u64 {
        self.last_valid_bps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_packets() {
        let mut meter = ThroughputMeter::new(300_000);
        assert_eq!(
            meter.measure(),
            Throughput::InsufficientTime {
                fallback_bps: 300_000
            }
        );
    }

    #[test]
    fn test_single_packet_has_no_span() {
        let mut meter = ThroughputMeter::new(300_000);
        meter.on_packet(1_000, 1_200);
        assert_eq!(meter.measure().bps(), 300_000);
    }

    #[test]
    fn test_exact_rate() {
        let mut meter = ThroughputMeter::new(300_000);
        meter.on_packet(0, 62_500);
        meter.on_packet(1_000, 62_500);

        assert_eq!(
            meter.measure(),
            Throughput::Calculated {
                bps: 1_000_000,
                total_bytes: 125_000,
                duration_ms: 1_000,
            }
        );
        assert_eq!(meter.last_valid_bps(), 1_000_000);
    }

    #[test]
    fn test_rate_is_floored() {
        let mut meter = ThroughputMeter::new(300_000);
        meter.on_packet(0, 1);
        meter.on_packet(3, 0);
        // 8000 / 3 = 2666.67
        assert_eq!(meter.measure().bps(), 2_666);
    }

    #[test]
    fn test_zero_bytes_keeps_last_valid() {
        let mut meter = ThroughputMeter::new(300_000);
        meter.on_packet(0, 0);
        meter.on_packet(500, 0);
        assert_eq!(
            meter.measure(),
            Throughput::Zero {
                fallback_bps: 300_000
            }
        );
    }

    #[test]
    fn test_out_of_order_arrival_falls_back() {
        let mut meter = ThroughputMeter::new(300_000);
        meter.on_packet(1_000, 500);
        meter.on_packet(2_000, 500);
        assert_eq!(meter.measure().bps(), 8_000);

        meter.on_packet(500, 500);
        assert_eq!(
            meter.measure(),
            Throughput::InsufficientTime { fallback_bps: 8_000 }
        );
    }

    #[test]
    fn test_large_totals_do_not_overflow() {
        let mut meter = ThroughputMeter::new(300_000);
        meter.on_packet(0, u64::MAX / 2);
        meter.on_packet(1, u64::MAX / 2);
        assert_eq!(meter.measure().bps(), u64::MAX);
    }
}
