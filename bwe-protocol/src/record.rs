//! Packet arrival records
//!
//! A [`PacketRecord`] is the per-packet report fed into the estimator. The
//! serde-facing [`RawRecord`] mirrors the wire form delivered by the packet
//! collaborator; every field is required, so a missing key fails to
//! deserialize instead of being defaulted.

use crate::rtp::{RtpError, RtpHeader};
use crate::sequence::{SeqNumber, SequenceError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Record validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Invalid sequence number: {0}")]
    Sequence(#[from] SequenceError),

    #[error("Invalid RTP packet: {0}")]
    Rtp(#[from] RtpError),
}

/// Unvalidated packet report as delivered on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub send_time_ms: u64,
    pub arrival_time_ms: u64,
    pub payload_type: i64,
    pub sequence_number: u64,
    pub ssrc: i64,
    pub padding_length: u64,
    pub header_length: u64,
    pub payload_size: u64,
}

/// Validated packet arrival record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketRecord {
    /// Sender timestamp (milliseconds)
    pub send_time_ms: u64,
    /// Local arrival timestamp (milliseconds)
    pub arrival_time_ms: u64,
    /// RTP payload type
    pub payload_type: i64,
    /// 16-bit RTP sequence number
    pub sequence_number: SeqNumber,
    /// Synchronization source identifier
    pub ssrc: i64,
    /// Padding bytes at the end of the packet
    pub padding_length: u64,
    /// RTP header length including CSRCs and extensions
    pub header_length: u64,
    /// Payload bytes, used for throughput
    pub payload_size: u64,
}

impl PacketRecord {
    /// Create a record carrying only the fields the estimator consumes
    ///
    /// Framing metadata is zeroed and the send time equals the arrival time.
    pub fn new(sequence_number: SeqNumber, arrival_time_ms: u64, payload_size: u64) -> Self {
        PacketRecord {
            send_time_ms: arrival_time_ms,
            arrival_time_ms,
            payload_type: 0,
            sequence_number,
            ssrc: 0,
            padding_length: 0,
            header_length: 0,
            payload_size,
        }
    }

    /// Build a record from a raw RTP datagram
    pub fn from_rtp(
        datagram: &[u8],
        send_time_ms: u64,
        arrival_time_ms: u64,
    ) -> Result<Self, RecordError> {
        let header = RtpHeader::parse(datagram)?;
        Ok(PacketRecord {
            send_time_ms,
            arrival_time_ms,
            payload_type: i64::from(header.payload_type),
            sequence_number: header.sequence_number,
            ssrc: i64::from(header.ssrc),
            padding_length: header.padding_length as u64,
            header_length: header.header_length as u64,
            payload_size: header.payload_size as u64,
        })
    }
}

impl TryFrom<RawRecord> for PacketRecord {
    type Error = RecordError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        Ok(PacketRecord {
            send_time_ms: raw.send_time_ms,
            arrival_time_ms: raw.arrival_time_ms,
            payload_type: raw.payload_type,
            sequence_number: SeqNumber::try_from(raw.sequence_number)?,
            ssrc: raw.ssrc,
            padding_length: raw.padding_length,
            header_length: raw.header_length,
            payload_size: raw.payload_size,
        })
    }
}

impl From<PacketRecord> for RawRecord {
    fn from(record: PacketRecord) -> Self {
        RawRecord {
            send_time_ms: record.send_time_ms,
            arrival_time_ms: record.arrival_time_ms,
            payload_type: record.payload_type,
            sequence_number: u64::from(record.sequence_number.as_raw()),
            ssrc: record.ssrc,
            padding_length: record.padding_length,
            header_length: record.header_length,
            payload_size: record.payload_size,
        }
    }
}
