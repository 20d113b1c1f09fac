//! Sequence Number Handling
//!
//! RTP uses 16-bit sequence numbers that wrap around modulo 65536. This
//! module provides a wrapped sequence number type whose arithmetic follows
//! the ring, plus the forward distance used for gap counting.

use std::fmt;
use std::ops::{Add, AddAssign, Sub};
use thiserror::Error;

/// Maximum sequence number value (16-bit: 0xFFFF)
pub const MAX_SEQ_NUMBER: u16 = u16::MAX;

/// Number of distinct sequence numbers in the ring
pub const SEQ_SPACE: u32 = MAX_SEQ_NUMBER as u32 + 1;

/// Sequence number conversion errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Sequence number {0} exceeds maximum {MAX_SEQ_NUMBER}")]
    OutOfRange(u64),
}

/// Sequence number with 16-bit wraparound semantics
///
/// Ordering comparisons (`lt`, `gt`) use half-space arithmetic so that a
/// number just past the wrap point compares as ahead of one just before it.
/// The derived `Ord` is the plain numeric order and is only meant for use
/// as a map key.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Default)]
pub struct SeqNumber(u16);

impl SeqNumber {
    /// Create a new sequence number
    #[inline]
    pub const fn new(value: u16) -> Self {
        SeqNumber(value)
    }

    /// Get the raw sequence number value
    #[inline]
    pub fn as_raw(self) -> u16 {
        self.0
    }

    /// Increment the sequence number by 1
    #[inline]
    pub fn increment(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }

    /// Get the next sequence number
    #[inline]
    pub fn next(self) -> Self {
        SeqNumber(self.0.wrapping_add(1))
    }

    /// Forward distance from this sequence number to `other` in the ring
    ///
    /// Always non-negative: `(other - self) mod 65536`. A sequence number
    /// that is numerically behind yields a large distance.
    #[inline]
    pub fn forward_distance_to(self, other: SeqNumber) -> u16 {
        other.0.wrapping_sub(self.0)
    }

    /// Signed distance from this sequence number to another
    ///
    /// Positive values mean `other` is ahead of `self`, negative means
    /// `other` is behind. Distances are folded into the half-open range
    /// `[-32768, 32767]`.
    #[inline]
    pub fn distance_to(self, other: SeqNumber) -> i32 {
        other.0.wrapping_sub(self.0) as i16 as i32
    }

    /// Check if this sequence number is less than another (accounting for wraparound)
    #[inline]
    pub fn lt(self, other: SeqNumber) -> bool {
        self.distance_to(other) > 0
    }

    /// Check if this sequence number is greater than another
    #[inline]
    pub fn gt(self, other: SeqNumber) -> bool {
        self.distance_to(other) < 0
    }
}

impl fmt::Debug for SeqNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SeqNumber({})", self.0)
    }
}

impl fmt::Display for SeqNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for SeqNumber {
    fn from(value: u16) -> Self {
        SeqNumber(value)
    }
}

impl From<SeqNumber> for u16 {
    fn from(seq: SeqNumber) -> u16 {
        seq.0
    }
}

impl TryFrom<u64> for SeqNumber {
    type Error = SequenceError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        u16::try_from(value)
            .map(SeqNumber)
            .map_err(|_| SequenceError::OutOfRange(value))
    }
}

impl Add<u16> for SeqNumber {
    type Output = SeqNumber;

    fn add(self, rhs: u16) -> SeqNumber {
        SeqNumber(self.0.wrapping_add(rhs))
    }
}

impl AddAssign<u16> for SeqNumber {
    fn add_assign(&mut self, rhs: u16) {
        self.0 = self.0.wrapping_add(rhs);
    }
}

impl Sub<u16> for SeqNumber {
    type Output = SeqNumber;

    fn sub(self, rhs: u16) -> SeqNumber {
        SeqNumber(self.0.wrapping_sub(rhs))
    }
}
