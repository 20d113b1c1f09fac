//! Loss tracking
//!
//! Counts packets presumed lost from gaps in the 16-bit sequence space.
//! Any jump other than `last + 1` is treated as loss; there is no
//! reordering correction, so a regression counts as an almost full lap of
//! missing packets.

use crate::sequence::SeqNumber;

/// Cumulative received/missing counters for one flow
#[derive(Debug, Clone, Default)]
pub struct LossTracker {
    /// Last sequence number seen, regardless of order
    last_seen: Option<SeqNumber>,
    /// Estimated packets lost
    missing_packets: u64,
    /// Packets received
    total_packets: u64,
}

impl LossTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a received sequence number
    ///
    /// Returns the gap (number of packets presumed lost) detected before
    /// this packet, or 0 when it was the expected one or the first seen.
    pub fn on_packet(&mut self, seq: SeqNumber) -> u16 {
        let gap = match self.last_seen {
            None => 0,
            Some(last) => last.next().forward_distance_to(seq),
        };

        if gap > 0 {
            self.missing_packets += u64::from(gap);
            tracing::debug!(
                seq = seq.as_raw(),
                gap,
                missing = self.missing_packets,
                "sequence gap detected"
            );
        }

        self.last_seen = Some(seq);
        self.total_packets += 1;
        gap
    }

    /// Fraction of packets lost: `missing / (received + missing)`
    ///
    /// Defined as 0.0 before any packet has been seen.
    pub fn loss_rate(&self) -> f64 {
        let denominator = self.total_packets + self.missing_packets;
        if denominator == 0 {
            return 0.0;
        }
        self.missing_packets as f64 / denominator as f64
    }

    pub fn last_seen(&self) -> Option<SeqNumber> {
        self.last_seen
    }

    pub fn missing_packets(&self) -> u64 {
        self.missing_packets
    }

    pub fn total_packets(&self) -> u64 {
        self.total_packets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(tracker: &mut LossTracker, seqs: &[u16]) {
        for &seq in seqs {
            tracker.on_packet(SeqNumber::new(seq));
        }
    }

    #[test]
    fn test_consecutive_no_loss() {
        let mut tracker = LossTracker::new();
        feed(&mut tracker, &[10, 11, 12, 13]);

        assert_eq!(tracker.missing_packets(), 0);
        assert_eq!(tracker.total_packets(), 4);
        assert_eq!(tracker.loss_rate(), 0.0);
    }

    #[test]
    fn test_forward_gap() {
        let mut tracker = LossTracker::new();
        tracker.on_packet(SeqNumber::new(10));
        assert_eq!(tracker.on_packet(SeqNumber::new(15)), 4);

        assert_eq!(tracker.missing_packets(), 4);
        // 4 lost out of 2 received + 4 lost
        assert!((tracker.loss_rate() - 4.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_wrap_is_not_loss() {
        let mut tracker = LossTracker::new();
        feed(&mut tracker, &[65534, 65535, 0, 1]);
        assert_eq!(tracker.missing_packets(), 0);
    }

    #[test]
    fn test_gap_across_wrap() {
        let mut tracker = LossTracker::new();
        tracker.on_packet(SeqNumber::new(65534));
        assert_eq!(tracker.on_packet(SeqNumber::new(1)), 2);
    }

    #[test]
    fn test_duplicate_counts_full_lap() {
        let mut tracker = LossTracker::new();
        feed(&mut tracker, &[100, 100]);

        assert_eq!(tracker.missing_packets(), 65535);
        assert_eq!(tracker.last_seen(), Some(SeqNumber::new(100)));
    }

    #[test]
    fn test_regression_updates_last_seen() {
        let mut tracker = LossTracker::new();
        feed(&mut tracker, &[100, 90, 91]);

        // 90 is 65525 ahead of 101, then 91 follows 90 cleanly
        assert_eq!(tracker.missing_packets(), 65525);
        assert_eq!(tracker.last_seen(), Some(SeqNumber::new(91)));
    }

    #[test]
    fn test_empty_loss_rate() {
        assert_eq!(LossTracker::new().loss_rate(), 0.0);
    }
}
