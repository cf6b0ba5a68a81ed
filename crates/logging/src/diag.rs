//! crates/logging/src/diag.rs
//! Diagnostics for bulk configuration, routed through `tracing` when enabled.
//!
//! Skips are deliberate and never surface as errors; these events exist so an
//! operator can see why a document changed less than expected.

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

/// Trace a document entry naming a component the registry does not hold.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn unknown_component(component: &str) {
    trace!(target: "goose::config", component, "no registered component");
}

/// Trace a document entry naming an unknown component - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn unknown_component(_component: &str) {}

/// Trace a field left untouched by document configuration.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn skipped_field(component: &str, field: &str, reason: &'static str) {
    trace!(target: "goose::config", component, field, reason, "field skipped");
}

/// Trace a field left untouched - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn skipped_field(_component: &str, _field: &str, _reason: &'static str) {}

/// Trace an alert updated by bulk configuration.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn updated_field(component: &str, field: &str, level: u8) {
    debug!(target: "goose::config", component, field, level, "alert updated");
}

/// Trace an updated alert - no-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn updated_field(_component: &str, _field: &str, _level: u8) {}
