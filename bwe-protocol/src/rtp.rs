//! RTP header parsing
//!
//! Decodes the fixed RTP header (RFC 3550 section 5.1) far enough to fill a
//! packet record: payload type, sequence number, SSRC and the framing sizes
//! (header, padding, payload). Header extension contents are skipped.

use crate::sequence::SeqNumber;
use bytes::Buf;
use thiserror::Error;

/// Size of the fixed RTP header in bytes
pub const FIXED_HEADER_SIZE: usize = 12;

/// The only RTP version in use
pub const RTP_VERSION: u8 = 2;

const PADDING_FLAG: u8 = 0x20;
const EXTENSION_FLAG: u8 = 0x10;
const CSRC_COUNT_MASK: u8 = 0x0F;
const MARKER_FLAG: u8 = 0x80;
const PAYLOAD_TYPE_MASK: u8 = 0x7F;

/// RTP parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RtpError {
    #[error("Insufficient data: expected {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },

    #[error("Unsupported RTP version {0}")]
    UnsupportedVersion(u8),

    #[error("Header length {header_length} exceeds packet length {actual}")]
    HeaderOverrun { header_length: usize, actual: usize },

    #[error("Invalid padding length {0}")]
    InvalidPadding(u8),
}

/// Decoded RTP header plus framing sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtpHeader {
    pub marker: bool,
    pub payload_type: u8,
    pub sequence_number: SeqNumber,
    pub timestamp: u32,
    pub ssrc: u32,
    /// Fixed header, CSRC list and header extension
    pub header_length: usize,
    /// Trailing padding bytes (0 when the P bit is clear)
    pub padding_length: usize,
    /// Bytes between the header and the padding
    pub payload_size: usize,
}

impl RtpHeader {
    /// Parse an RTP datagram (network byte order)
    pub fn parse(bytes: &[u8]) -> Result<Self, RtpError> {
        if bytes.len() < FIXED_HEADER_SIZE {
            return Err(RtpError::TooShort {
                expected: FIXED_HEADER_SIZE,
                actual: bytes.len(),
            });
        }

        let mut buf = bytes;
        let first = buf.get_u8();
        let second = buf.get_u8();

        let version = first >> 6;
        if version != RTP_VERSION {
            return Err(RtpError::UnsupportedVersion(version));
        }

        let sequence_number = SeqNumber::new(buf.get_u16());
        let timestamp = buf.get_u32();
        let ssrc = buf.get_u32();

        let csrc_count = (first & CSRC_COUNT_MASK) as usize;
        let mut header_length = FIXED_HEADER_SIZE + csrc_count * 4;

        if first & EXTENSION_FLAG != 0 {
            // Profile-defined word, then the extension length in 32-bit words
            let ext_start = header_length;
            if bytes.len() < ext_start + 4 {
                return Err(RtpError::TooShort {
                    expected: ext_start + 4,
                    actual: bytes.len(),
                });
            }
            let mut ext = &bytes[ext_start + 2..ext_start + 4];
            let words = ext.get_u16() as usize;
            header_length = ext_start + 4 + words * 4;
        }

        if header_length > bytes.len() {
            return Err(RtpError::HeaderOverrun {
                header_length,
                actual: bytes.len(),
            });
        }

        let padding_length = if first & PADDING_FLAG != 0 {
            let count = bytes[bytes.len() - 1];
            if count == 0 || header_length + count as usize > bytes.len() {
                return Err(RtpError::InvalidPadding(count));
            }
            count as usize
        } else {
            0
        };

        Ok(RtpHeader {
            marker: second & MARKER_FLAG != 0,
            payload_type: second & PAYLOAD_TYPE_MASK,
            sequence_number,
            timestamp,
            ssrc,
            header_length,
            padding_length,
            payload_size: bytes.len() - header_length - padding_length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::{BufMut, BytesMut};

    fn packet(first: u8, seq: u16, tail: &[u8]) -> BytesMut {
        let mut buf = BytesMut::new();
        buf.put_u8(first);
        buf.put_u8(0x80 | 96);
        buf.put_u16(seq);
        buf.put_u32(90_000);
        buf.put_u32(0xDEAD_BEEF);
        buf.put_slice(tail);
        buf
    }

    #[test]
    fn test_parse_plain() {
        let bytes = packet(0x80, 4242, &[0u8; 100]);
        let header = RtpHeader::parse(&bytes).unwrap();

        assert!(header.marker);
        assert_eq!(header.payload_type, 96);
        assert_eq!(header.sequence_number, SeqNumber::new(4242));
        assert_eq!(header.timestamp, 90_000);
        assert_eq!(header.ssrc, 0xDEAD_BEEF);
        assert_eq!(header.header_length, 12);
        assert_eq!(header.padding_length, 0);
        assert_eq!(header.payload_size, 100);
    }

    #[test]
    fn test_parse_csrc_extension_padding() {
        let mut tail = BytesMut::new();
        // One CSRC
        tail.put_u32(1);
        // Extension: profile 0xBEDE, one word
        tail.put_u16(0xBEDE);
        tail.put_u16(1);
        tail.put_u32(0);
        // 20 bytes payload, 4 bytes padding
        tail.put_slice(&[7u8; 20]);
        tail.put_slice(&[0, 0, 0, 4]);

        let bytes = packet(0x80 | PADDING_FLAG | EXTENSION_FLAG | 1, 1, &tail);
        let header = RtpHeader::parse(&bytes).unwrap();

        assert_eq!(header.header_length, 12 + 4 + 8);
        assert_eq!(header.padding_length, 4);
        assert_eq!(header.payload_size, 20);
    }

    #[test]
    fn test_too_short() {
        assert_eq!(
            RtpHeader::parse(&[0x80, 0, 0]),
            Err(RtpError::TooShort {
                expected: 12,
                actual: 3
            })
        );
    }

    #[test]
    fn test_wrong_version() {
        let bytes = packet(0x40, 1, &[]);
        assert_eq!(RtpHeader::parse(&bytes), Err(RtpError::UnsupportedVersion(1)));
    }

    #[test]
    fn test_csrc_overrun() {
        let bytes = packet(0x80 | 3, 1, &[0u8; 4]);
        assert!(matches!(
            RtpHeader::parse(&bytes),
            Err(RtpError::HeaderOverrun { header_length: 24, .. })
        ));
    }

    #[test]
    fn test_invalid_padding() {
        let bytes = packet(0x80 | PADDING_FLAG, 1, &[0, 0, 50]);
        assert_eq!(RtpHeader::parse(&bytes), Err(RtpError::InvalidPadding(50)));
    }
}
