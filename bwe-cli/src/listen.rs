//! Live receive loop for `bwe-listen`
//!
//! Pulls datagrams from a receive function, stamps them with a [`Clock`]
//! and feeds RTP packets of the first SSRC seen into the estimator.

use crate::stats::compact_stats;
use bwe_io::{Clock, SocketError, Timer};
use bwe_protocol::{Estimator, PacketRecord};
use std::net::SocketAddr;
use std::time::{Duration, Instant};

/// Largest datagram accepted
pub const MAX_DATAGRAM_SIZE: usize = 65_536;

/// Receive loop settings
#[derive(Debug, Clone, Copy, Default)]
pub struct ListenOptions {
    /// Log compact statistics this often (`None` disables)
    pub stats_interval: Option<Duration>,
    /// Stop once this instant has passed
    pub deadline: Option<Instant>,
}

/// Counters for one receive loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenSummary {
    /// Datagrams received, including ones that were dropped
    pub datagrams: u64,
    /// Packets reported to the estimator
    pub reported: u64,
    /// SSRC of the tracked flow
    pub ssrc: Option<i64>,
}

/// Run the receive loop until the deadline passes or a receive fails
///
/// Timeouts are not errors. Any other receive error ends the loop and is
/// returned; the estimator keeps everything reported so far.
pub fn listen<C, R>(
    estimator: &mut Estimator,
    clock: &C,
    options: ListenOptions,
    mut recv: R,
) -> Result<ListenSummary, SocketError>
where
    C: Clock,
    R: FnMut(&mut [u8]) -> Result<(usize, SocketAddr), SocketError>,
{
    let mut stats_timer = options.stats_interval.map(Timer::new);
    let mut summary = ListenSummary::default();
    let mut buffer = vec![0u8; MAX_DATAGRAM_SIZE];

    loop {
        if options
            .deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
        {
            return Ok(summary);
        }

        if let Some(timer) = stats_timer.as_mut() {
            if timer.try_fire() {
                let estimate = estimator.estimated_bandwidth();
                tracing::info!("Stats: {}", compact_stats(&estimator.stats(), estimate));
            }
        }

        let (n, remote_addr) = match recv(&mut buffer) {
            Ok(result) => result,
            Err(SocketError::TimedOut) => continue,
            Err(e) => {
                tracing::error!("Receive error: {}", e);
                return Err(e);
            }
        };
        summary.datagrams += 1;

        // Raw RTP carries no sender wall-clock time; use the arrival stamp
        let arrival_ms = clock.now_ms();
        let record = match PacketRecord::from_rtp(&buffer[..n], arrival_ms, arrival_ms) {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!("Dropping datagram from {}: {}", remote_addr, e);
                continue;
            }
        };

        match summary.ssrc {
            None => {
                tracing::info!(
                    "Tracking flow ssrc={:#010x} from {}",
                    record.ssrc,
                    remote_addr
                );
                summary.ssrc = Some(record.ssrc);
            }
            Some(ssrc) if ssrc != record.ssrc => {
                tracing::debug!("Ignoring packet from other ssrc={:#010x}", record.ssrc);
                continue;
            }
            Some(_) => {}
        }

        estimator.report_state(&record);
        summary.reported += 1;
    }
}
