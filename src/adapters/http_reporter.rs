//! HTTP reporter adapter
//!
//! This adapter implements the ReportPort trait by sending each batch as a
//! single HTTP/1.1 POST over a fresh connection obtained from a Connector.
//! Every exchange runs under one deadline, and the connection is torn down
//! before `report` returns, on every path.

use core::fmt::Write as _;

use embassy_time::{with_timeout, Duration};
use embedded_io_async::{Read, Write};
use heapless::String;

use crate::config::NETWORK_TIMEOUT_SECS;
use crate::payload::{encode_samples, Payload};
use crate::ports::reporter::{NetworkError, ReportPort, StatusCode};
use crate::ports::transport::{Connector, Endpoint};

/// Request head capacity (request line and headers)
const MAX_HEAD_BYTES: usize = 256;

/// `HTTP/1.x NNN`
const STATUS_PREFIX_BYTES: usize = 12;

/// HTTP/1.1 reporter posting JSON batches to one fixed endpoint
pub struct HttpReporter<C: Connector> {
    connector: C,
    endpoint: Endpoint<'static>,
    timeout: Duration,
}

impl<C: Connector> HttpReporter<C> {
    /// Create a reporter for the collector at `url`
    pub fn new(connector: C, url: &'static str) -> Result<Self, NetworkError> {
        Ok(Self::with_endpoint(connector, Endpoint::parse(url)?))
    }

    /// Create with an already parsed endpoint
    pub fn with_endpoint(connector: C, endpoint: Endpoint<'static>) -> Self {
        Self {
            connector,
            endpoint,
            timeout: Duration::from_secs(NETWORK_TIMEOUT_SECS),
        }
    }

    /// Override the deadline for one whole exchange
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> Endpoint<'static> {
        self.endpoint
    }

    /// Get mutable access to the underlying connector
    pub fn connector_mut(&mut self) -> &mut C {
        &mut self.connector
    }

    /// Issue `GET /` against the collector host to check it is reachable
    pub async fn probe(&mut self) -> Result<StatusCode, NetworkError> {
        let endpoint = self.endpoint.with_path("/");
        let status = self.exchange("GET", endpoint, None, &[]).await;
        match status {
            Ok(code) => info!("HTTP GET Status = {}", code.as_u16()),
            Err(e) => warn!("HTTP GET request failed: {}", e),
        }
        status
    }

    /// One request/response round trip on a fresh connection
    async fn exchange(
        &mut self,
        method: &str,
        endpoint: Endpoint<'_>,
        content_type: Option<&str>,
        body: &[u8],
    ) -> Result<StatusCode, NetworkError> {
        let head = build_head(method, &endpoint, content_type, body.len())?;

        let timeout = self.timeout;
        let connector = &mut self.connector;
        let round_trip = async {
            let mut conn = connector.connect(endpoint.host, endpoint.port).await?;
            let status = send_request(&mut conn, head.as_bytes(), body).await;
            C::disconnect(conn).await;
            status
        };
        let status = with_timeout(timeout, round_trip)
            .await
            .map_err(|_| NetworkError::Timeout)??;

        if status.is_success() {
            Ok(status)
        } else {
            Err(NetworkError::Status(status.as_u16()))
        }
    }
}

impl<C: Connector> ReportPort for HttpReporter<C> {
    async fn report(&mut self, samples: &[f32]) -> Result<StatusCode, NetworkError> {
        let body: Payload = encode_samples(samples).ok_or(NetworkError::PayloadTooLarge)?;
        let endpoint = self.endpoint;
        let status = self
            .exchange("POST", endpoint, Some("application/json"), body.as_bytes())
            .await?;
        info!("Sent {} floats. Status = {}", samples.len(), status.as_u16());
        Ok(status)
    }
}

/// Build the request line and headers
fn build_head(
    method: &str,
    endpoint: &Endpoint<'_>,
    content_type: Option<&str>,
    content_length: usize,
) -> Result<String<MAX_HEAD_BYTES>, NetworkError> {
    let mut head = String::<MAX_HEAD_BYTES>::new();
    let overflow = |_| NetworkError::PayloadTooLarge;

    write!(
        head,
        "{} {} HTTP/1.1\r\nHost: {}:{}\r\n",
        method, endpoint.path, endpoint.host, endpoint.port
    )
    .map_err(overflow)?;
    if let Some(content_type) = content_type {
        write!(head, "Content-Type: {}\r\n", content_type).map_err(overflow)?;
    }
    write!(
        head,
        "Content-Length: {}\r\nConnection: close\r\n\r\n",
        content_length
    )
    .map_err(overflow)?;

    Ok(head)
}

/// Write head and body, then read back the status
async fn send_request<S: Read + Write>(
    conn: &mut S,
    head: &[u8],
    body: &[u8],
) -> Result<StatusCode, NetworkError> {
    conn.write_all(head).await.map_err(|_| NetworkError::WriteFailed)?;
    conn.write_all(body).await.map_err(|_| NetworkError::WriteFailed)?;
    conn.flush().await.map_err(|_| NetworkError::WriteFailed)?;
    read_status(conn).await
}

/// Read just enough of the response to parse its status code
///
/// Stops once the status prefix and the byte after it are buffered, or at
/// the first CRLF; the reason phrase, headers and body are left unread.
async fn read_status<R: Read>(conn: &mut R) -> Result<StatusCode, NetworkError> {
    let mut buf = [0u8; STATUS_PREFIX_BYTES + 1];
    let mut filled = 0;

    loop {
        if let Some(end) = buf[..filled].windows(2).position(|w| w == b"\r\n") {
            return parse_status_line(&buf[..end]);
        }
        if filled == buf.len() {
            // A fourth digit is not a status code
            if !matches!(buf[STATUS_PREFIX_BYTES], b' ' | b'\r') {
                return Err(NetworkError::MalformedResponse);
            }
            return parse_status_line(&buf[..STATUS_PREFIX_BYTES]);
        }
        let n = conn
            .read(&mut buf[filled..])
            .await
            .map_err(|_| NetworkError::ReadFailed)?;
        if n == 0 {
            // Peer closed before finishing the line
            return parse_status_line(&buf[..filled]);
        }
        filled += n;
    }
}

/// Parse `HTTP/1.x NNN [reason]`
///
/// The reason phrase may be missing or cut short.
fn parse_status_line(line: &[u8]) -> Result<StatusCode, NetworkError> {
    let line = core::str::from_utf8(line).map_err(|_| NetworkError::MalformedResponse)?;
    let mut parts = line.split(' ');

    let version = parts.next().unwrap_or("");
    if !version.starts_with("HTTP/1.") {
        return Err(NetworkError::MalformedResponse);
    }

    let code = parts.next().unwrap_or("");
    if code.len() != 3 {
        return Err(NetworkError::MalformedResponse);
    }
    code.parse::<u16>()
        .map(StatusCode)
        .map_err(|_| NetworkError::MalformedResponse)
}
