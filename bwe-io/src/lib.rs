//! BWE I/O and Platform Abstraction
//!
//! This crate provides the estimator's outer collaborators: the monotonic
//! clock used to stamp arrivals, the file-backed diagnostic sink and a UDP
//! socket wrapper for receiving RTP.

pub mod diag;
pub mod socket;
pub mod time;

pub use diag::{FileSink, DEFAULT_LOG_FILE_NAME};
pub use socket::{RtpSocket, SocketError};
pub use time::{Clock, ManualClock, MonotonicClock, Timer};
