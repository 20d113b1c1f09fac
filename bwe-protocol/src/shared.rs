//! Thread-safe estimator handle
//!
//! Serializes access to one [`Estimator`] so each report updates the packet,
//! loss and byte counters together with respect to other callers.

use crate::estimator::{Estimator, EstimatorStats};
use crate::record::PacketRecord;
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle to an estimator behind a mutex
#[derive(Debug, Clone)]
pub struct SharedEstimator {
    inner: Arc<Mutex<Estimator>>,
}

impl SharedEstimator {
    pub fn new(estimator: Estimator) -> Self {
        SharedEstimator {
            inner: Arc::new(Mutex::new(estimator)),
        }
    }

    /// See [`Estimator::report_state`]
    pub fn report_state(&self, record: &PacketRecord) {
        self.inner.lock().report_state(record);
    }

    /// See [`Estimator::estimated_bandwidth`]
    pub fn estimated_bandwidth(&self) -> u64 {
        self.inner.lock().estimated_bandwidth()
    }

    pub fn stats(&self) -> EstimatorStats {
        self.inner.lock().stats()
    }

    /// Run `f` with exclusive access to the estimator
    pub fn with<R>(&self, f: impl FnOnce(&mut Estimator) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl From<Estimator> for SharedEstimator {
    fn from(estimator: Estimator) -> Self {
        Self::new(estimator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::SeqNumber;
    use std::thread;

    #[test]
    fn test_concurrent_reports_are_counted() {
        let shared = SharedEstimator::new(Estimator::new());

        let handles: Vec<_> = (0..4u64)
            .map(|worker| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..250u64 {
                        let seq = SeqNumber::new((worker * 250 + i) as u16);
                        shared.report_state(&PacketRecord::new(seq, i, 100));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let stats = shared.stats();
        assert_eq!(stats.total_packets, 1000);
        assert_eq!(stats.total_bytes, 100_000);
        assert!(shared.estimated_bandwidth() >= 100_000);
    }
}
