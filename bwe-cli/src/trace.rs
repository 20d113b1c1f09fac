//! JSON-lines trace replay
//!
//! A trace holds one packet report per line, using the same field names as
//! the live packet feed. Blank lines are skipped; any malformed line aborts
//! the replay with its line number.

use bwe_protocol::{Estimator, PacketRecord, RawRecord, RecordError};
use std::io::{self, BufRead};
use thiserror::Error;

/// Trace replay errors
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: malformed record: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: RecordError,
    },
}

/// Parse one trace line
pub fn parse_line(line: &str, line_number: usize) -> Result<PacketRecord, TraceError> {
    let raw: RawRecord = serde_json::from_str(line).map_err(|source| TraceError::Parse {
        line: line_number,
        source,
    })?;
    PacketRecord::try_from(raw).map_err(|source| TraceError::Record {
        line: line_number,
        source,
    })
}

/// Feed every record of a trace into `estimator`
///
/// Every `every` records (0 disables) `on_sample` is called with the arrival
/// time of the latest record and the current bandwidth estimate. Returns the
/// number of records reported.
pub fn replay<R: BufRead>(
    reader: R,
    estimator: &mut Estimator,
    every: u64,
    mut on_sample: impl FnMut(u64, u64),
) -> Result<u64, TraceError> {
    let mut reported = 0u64;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let record = parse_line(&line, index + 1)?;
        estimator.report_state(&record);
        reported += 1;

        if every > 0 && reported % every == 0 {
            on_sample(record.arrival_time_ms, estimator.estimated_bandwidth());
        }
    }

    tracing::debug!(reported, "trace replay finished");
    Ok(reported)
}
