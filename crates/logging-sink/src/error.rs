//! crates/logging-sink/src/error.rs
//! Errors raised while dialing or writing to a syslog daemon.

use std::io;

use thiserror::Error;

/// Error returned by the syslog adapter.
#[derive(Debug, Error)]
pub enum SyslogError {
    /// No connection could be established.
    ///
    /// The process-wide log output is left untouched when dialing fails.
    #[error("failed to connect to syslog at {protocol}:{address}: {source}")]
    Connection {
        /// Transport that was requested (`tcp`, `udp`, `unix`, ... or empty for local).
        protocol: String,
        /// Address that was dialed.
        address: String,
        /// Underlying socket error.
        #[source]
        source: io::Error,
    },
    /// A raw priority that encodes no facility and severity pair.
    #[error("invalid syslog priority {0}: expected 0..=191")]
    InvalidPriority(i32),
    /// A record could not be delivered, even after reconnecting.
    #[error("syslog write failed: {0}")]
    Io(#[from] io::Error),
}

impl SyslogError {
    pub(crate) fn connection(protocol: &str, address: &str, source: io::Error) -> Self {
        Self::Connection {
            protocol: protocol.to_owned(),
            address: address.to_owned(),
            source,
        }
    }
}

impl From<SyslogError> for io::Error {
    fn from(error: SyslogError) -> Self {
        match error {
            SyslogError::Connection { source, .. } | SyslogError::Io(source) => source,
            SyslogError::InvalidPriority(_) => Self::new(io::ErrorKind::InvalidInput, error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_error_names_the_endpoint() {
        let error = SyslogError::connection(
            "tcp",
            "127.0.0.1:1",
            io::Error::from(io::ErrorKind::ConnectionRefused),
        );
        let rendered = error.to_string();
        assert!(rendered.starts_with("failed to connect to syslog at tcp:127.0.0.1:1: "));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn invalid_priority_reports_the_value() {
        let error = SyslogError::InvalidPriority(192);
        assert_eq!(error.to_string(), "invalid syslog priority 192: expected 0..=191");
    }

    #[test]
    fn converts_into_io_error_preserving_kind() {
        let error = SyslogError::connection(
            "udp",
            "[::1]:514",
            io::Error::from(io::ErrorKind::AddrNotAvailable),
        );
        assert_eq!(io::Error::from(error).kind(), io::ErrorKind::AddrNotAvailable);

        let error = io::Error::from(SyslogError::InvalidPriority(-1));
        assert_eq!(error.kind(), io::ErrorKind::InvalidInput);
    }
}
