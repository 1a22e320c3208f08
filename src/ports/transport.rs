//! Transport port - abstraction for opening a byte stream to the collector
//!
//! The HTTP reporter speaks HTTP/1.1 over whatever stream this port hands
//! back (embassy-net TCP socket, host TCP stream, in-memory mock). Each
//! connection is used for exactly one request and then dropped.

use embedded_io_async::{Read, Write};

use crate::ports::reporter::NetworkError;

/// Collector location parsed from an `http://host[:port]/path` URL
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Endpoint<'a> {
    pub host: &'a str,
    pub port: u16,
    pub path: &'a str,
}

impl<'a> Endpoint<'a> {
    /// Default port when the URL does not name one
    pub const HTTP_PORT: u16 = 80;

    /// Parse a plain-HTTP URL
    ///
    /// Only the `http` scheme is accepted. A missing path becomes `/`.
    pub fn parse(url: &'a str) -> Result<Self, NetworkError> {
        let rest = url.strip_prefix("http://").ok_or(NetworkError::InvalidUrl)?;

        let (authority, path) = match rest.find('/') {
            Some(idx) => (&rest[..idx], &rest[idx..]),
            None => (rest, "/"),
        };

        let (host, port) = match authority.rsplit_once(':') {
            Some((host, port)) => {
                let port = port.parse::<u16>().map_err(|_| NetworkError::InvalidUrl)?;
                (host, port)
            }
            None => (authority, Self::HTTP_PORT),
        };

        if host.is_empty() {
            return Err(NetworkError::InvalidUrl);
        }

        Ok(Self { host, port, path })
    }

    /// Same host and port, different path
    pub const fn with_path(&self, path: &'a str) -> Self {
        Self {
            host: self.host,
            port: self.port,
            path,
        }
    }
}

/// Port for opening connections to the collector
///
/// # Example Implementation
///
/// ```ignore
/// impl Connector for TcpConnector<'_> {
///     type Connection<'a> = TcpSocket<'a> where Self: 'a;
///
///     async fn connect(&mut self, host: &str, port: u16) -> Result<TcpSocket<'_>, NetworkError> {
///         let addr: Ipv4Addr = host.parse().map_err(|_| NetworkError::InvalidUrl)?;
///         let mut socket = TcpSocket::new(self.stack, &mut self.rx, &mut self.tx);
///         socket.connect((addr, port)).await.map_err(|_| NetworkError::ConnectFailed)?;
///         Ok(socket)
///     }
/// }
/// ```
pub trait Connector {
    /// An open byte stream; dropping it tears the connection down
    type Connection<'a>: Read + Write
    where
        Self: 'a;

    /// Open a connection to `host:port`
    fn connect(
        &mut self,
        host: &str,
        port: u16,
    ) -> impl core::future::Future<Output = Result<Self::Connection<'_>, NetworkError>>;

    /// Tear a connection down once the exchange is over
    ///
    /// The default just drops it.
    fn disconnect<'a>(conn: Self::Connection<'a>) -> impl core::future::Future<Output = ()>
    where
        Self: 'a,
    {
        async move { drop(conn) }
    }
}
