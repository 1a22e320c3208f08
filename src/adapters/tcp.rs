//! embassy-net TCP connector
//!
//! This adapter implements the Connector trait with an embassy-net TCP
//! socket. The socket borrows the connector's buffers, so only one
//! connection can be open at a time. `disconnect` closes the socket
//! gracefully instead of aborting it.
//!
//! The network stack must already be up (link joined, address leased)
//! before the first `connect`.

use embassy_net::tcp::TcpSocket;
use embassy_net::{IpAddress, IpEndpoint, Ipv4Address, Stack};
use embassy_time::Duration;

use crate::config::NETWORK_TIMEOUT_SECS;
use crate::ports::reporter::NetworkError;
use crate::ports::transport::Connector;

/// TCP connector over an embassy-net stack
pub struct TcpConnector<'d, const RX: usize, const TX: usize> {
    stack: Stack<'d>,
    rx_buffer: [u8; RX],
    tx_buffer: [u8; TX],
    timeout: Duration,
}

impl<'d, const RX: usize, const TX: usize> TcpConnector<'d, RX, TX> {
    pub fn new(stack: Stack<'d>) -> Self {
        Self {
            stack,
            rx_buffer: [0; RX],
            tx_buffer: [0; TX],
            timeout: Duration::from_secs(NETWORK_TIMEOUT_SECS),
        }
    }

    /// Override the per-socket inactivity timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl<'d, const RX: usize, const TX: usize> Connector for TcpConnector<'d, RX, TX> {
    type Connection<'a>
        = TcpSocket<'a>
    where
        Self: 'a;

    async fn connect(&mut self, host: &str, port: u16) -> Result<TcpSocket<'_>, NetworkError> {
        let addr: Ipv4Address = host.parse().map_err(|_| NetworkError::InvalidUrl)?;

        let mut socket = TcpSocket::new(self.stack, &mut self.rx_buffer, &mut self.tx_buffer);
        socket.set_timeout(Some(self.timeout));

        debug!("connecting to {}:{}", host, port);
        socket
            .connect(IpEndpoint::new(IpAddress::Ipv4(addr), port))
            .await
            .map_err(|e| {
                warn!("tcp connect failed: {:?}", e);
                NetworkError::ConnectFailed
            })?;

        Ok(socket)
    }

    async fn disconnect<'a>(mut conn: TcpSocket<'a>)
    where
        Self: 'a,
    {
        // FIN, then wait for the peer to acknowledge what is still queued
        conn.close();
        if let Err(e) = conn.flush().await {
            debug!("tcp close: {:?}", e);
        }
    }
}
