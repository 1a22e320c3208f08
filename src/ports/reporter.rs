//! Reporter port - abstraction for delivering a finished batch
//!
//! This trait allows the sampling loop to hand off a full batch without
//! knowing how it reaches the collector (HTTP POST, serial, mock).

/// Error type for report delivery
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NetworkError {
    /// Collector URL could not be parsed
    InvalidUrl,
    /// Could not open a connection
    ConnectFailed,
    /// Failed while sending the request
    WriteFailed,
    /// Failed while reading the response
    ReadFailed,
    /// Response did not start with a valid HTTP status line
    MalformedResponse,
    /// Collector answered with a non-2xx status
    Status(u16),
    /// Encoded batch does not fit the payload buffer
    PayloadTooLarge,
    /// Network operation did not finish within its deadline
    Timeout,
}

impl core::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            NetworkError::InvalidUrl => f.write_str("invalid collector url"),
            NetworkError::ConnectFailed => f.write_str("connect failed"),
            NetworkError::WriteFailed => f.write_str("request write failed"),
            NetworkError::ReadFailed => f.write_str("response read failed"),
            NetworkError::MalformedResponse => f.write_str("malformed http response"),
            NetworkError::Status(code) => write!(f, "http status {}", code),
            NetworkError::PayloadTooLarge => f.write_str("payload too large"),
            NetworkError::Timeout => f.write_str("network timeout"),
        }
    }
}

/// HTTP status code returned by the collector
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub const OK: StatusCode = StatusCode(200);

    pub const fn is_success(&self) -> bool {
        self.0 >= 200 && self.0 <= 299
    }

    pub const fn as_u16(&self) -> u16 {
        self.0
    }
}

/// Port for delivering batches to a collector
///
/// One call is one delivery attempt. Implementations never retry; the
/// caller decides what a failure means (the sampling loop logs it and moves
/// on to the next batch).
pub trait ReportPort {
    /// Deliver `samples` in order
    ///
    /// Returns the collector's status on a 2xx answer, `NetworkError`
    /// otherwise.
    fn report(
        &mut self,
        samples: &[f32],
    ) -> impl core::future::Future<Output = Result<StatusCode, NetworkError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(StatusCode(200).is_success());
        assert!(StatusCode(204).is_success());
        assert!(!StatusCode(199).is_success());
        assert!(!StatusCode(300).is_success());
        assert!(!StatusCode(500).is_success());
    }
}
