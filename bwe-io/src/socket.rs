//! UDP socket wrapper for RTP reception
//!
//! Configures the socket through socket2, then receives through the
//! standard library socket.

use socket2::{Domain, Protocol, Socket, Type};
use std::io::{self, ErrorKind};
use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;
use thiserror::Error;

/// Socket configuration errors
#[derive(Error, Debug)]
pub enum SocketError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Receive timed out")]
    TimedOut,
}

/// Bound UDP socket carrying one RTP flow
pub struct RtpSocket {
    inner: UdpSocket,
}

impl RtpSocket {
    /// Create a socket bound to the given address
    ///
    /// `recv_buffer_size` is applied before binding when set. With a
    /// `read_timeout`, [`recv_from`](Self::recv_from) returns
    /// [`SocketError::TimedOut`] instead of blocking forever.
    pub fn bind(
        addr: SocketAddr,
        recv_buffer_size: Option<usize>,
        read_timeout: Option<Duration>,
    ) -> Result<Self, SocketError> {
        let domain = if addr.is_ipv4() {
            Domain::IPV4
        } else {
            Domain::IPV6
        };

        let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
        socket.set_reuse_address(true)?;
        if let Some(size) = recv_buffer_size {
            socket.set_recv_buffer_size(size)?;
        }
        socket.set_read_timeout(read_timeout)?;
        socket.bind(&addr.into())?;

        Ok(RtpSocket {
            inner: socket.into(),
        })
    }

    /// Get the local address this socket is bound to
    pub fn local_addr(&self) -> Result<SocketAddr, SocketError> {
        Ok(self.inner.local_addr()?)
    }

    /// Receive one datagram
    pub fn recv_from(&self, buf: &mut [u8]) -> Result<(usize, SocketAddr), SocketError> {
        match self.inner.recv_from(buf) {
            Ok(result) => Ok(result),
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                Err(SocketError::TimedOut)
            }
            Err(e) => Err(SocketError::Io(e)),
        }
    }

    /// Get a reference to the underlying socket
    pub fn as_udp_socket(&self) -> &UdpSocket {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loopback() -> SocketAddr {
        "127.0.0.1:0".parse().unwrap()
    }

    #[test]
    fn test_socket_creation() {
        let socket = RtpSocket::bind(loopback(), None, None).unwrap();
        let addr = socket.local_addr().unwrap();
        assert!(addr.port() > 0);
    }

    #[test]
    fn test_socket_send_recv() {
        let receiver =
            RtpSocket::bind(loopback(), Some(262_144), Some(Duration::from_secs(2))).unwrap();
        let sender = UdpSocket::bind(loopback()).unwrap();

        let data = b"\x80\x60\x00\x01rtp";
        sender.send_to(data, receiver.local_addr().unwrap()).unwrap();

        let mut buf = [0u8; 1500];
        let (n, from) = receiver.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..n], data);
        assert_eq!(from, sender.local_addr().unwrap());
    }

    #[test]
    fn test_socket_timeout() {
        let receiver =
            RtpSocket::bind(loopback(), None, Some(Duration::from_millis(20))).unwrap();
        let mut buf = [0u8; 64];
        assert!(matches!(
            receiver.recv_from(&mut buf),
            Err(SocketError::TimedOut)
        ));
    }
}
