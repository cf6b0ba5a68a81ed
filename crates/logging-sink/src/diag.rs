//! crates/logging-sink/src/diag.rs
//! Connection diagnostics, routed through `tracing` when enabled.

#[cfg(feature = "tracing")]
use tracing::debug;

/// Trace an established syslog connection.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn connected(protocol: &str, address: &str) {
    debug!(target: "goose::syslog", protocol, address, "connected");
}

/// Trace an established connection - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn connected(_protocol: &str, _address: &str) {}

/// Trace a write failure that triggers a reconnect.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn reconnecting(protocol: &str, address: &str, error: Option<&std::io::Error>) {
    match error {
        Some(error) => debug!(target: "goose::syslog", protocol, address, %error, "reconnecting"),
        None => debug!(target: "goose::syslog", protocol, address, "reconnecting"),
    }
}

/// Trace a reconnect - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn reconnecting(_protocol: &str, _address: &str, _error: Option<&std::io::Error>) {}
