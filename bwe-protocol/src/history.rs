//! Bounded packet retention
//!
//! Keeps the most recent records for diagnostics. Oldest records are
//! evicted once `capacity` is reached; a capacity of 0 retains nothing.

use crate::record::PacketRecord;
use crate::sequence::SeqNumber;
use std::collections::VecDeque;

/// Ring of recently received packet records, in arrival order
#[derive(Debug, Clone)]
pub struct PacketHistory {
    records: VecDeque<PacketRecord>,
    capacity: usize,
}

impl PacketHistory {
    /// Create a history holding at most `capacity` records
    pub fn new(capacity: usize) -> Self {
        PacketHistory {
            // Cap the up-front allocation; large rings grow on demand
            records: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Append a record, evicting the oldest if full
    pub fn push(&mut self, record: PacketRecord) {
        if self.capacity == 0 {
            return;
        }
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Most recent retained record with this sequence number
    pub fn get(&self, seq: SeqNumber) -> Option<&PacketRecord> {
        self.records
            .iter()
            .rev()
            .find(|record| record.sequence_number == seq)
    }

    /// Iterate oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &PacketRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(seq: u16, arrival: u64) -> PacketRecord {
        PacketRecord::new(SeqNumber::new(seq), arrival, 100)
    }

    #[test]
    fn test_evicts_oldest() {
        let mut history = PacketHistory::new(3);
        for seq in 0..5 {
            history.push(record(seq, u64::from(seq)));
        }

        assert_eq!(history.len(), 3);
        assert!(history.get(SeqNumber::new(1)).is_none());
        let seqs: Vec<u16> = history.iter().map(|r| r.sequence_number.as_raw()).collect();
        assert_eq!(seqs, vec![2, 3, 4]);
    }

    #[test]
    fn test_get_prefers_most_recent() {
        let mut history = PacketHistory::new(8);
        history.push(record(7, 10));
        history.push(record(8, 20));
        history.push(record(7, 30));

        assert_eq!(history.get(SeqNumber::new(7)).unwrap().arrival_time_ms, 30);
    }

    #[test]
    fn test_zero_capacity_retains_nothing() {
        let mut history = PacketHistory::new(0);
        history.push(record(1, 1));
        assert!(history.is_empty());
    }
}
