#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `goose` bundles the workspace crates behind one dependency:
//!
//! - [`logging`]: [`Alert`] thresholds, emission, call-site locators, the
//!   process-wide log output and bulk configuration through a [`Registry`].
//! - [`syslog`]: routing the log output to a syslog daemon.
//!
//! # Examples
//!
//! ```
//! use goose::{alert_log, impl_component, Alert, Registry};
//!
//! struct Worker {
//!     level: Alert,
//! }
//! impl_component!(Worker { level });
//!
//! let _output = goose::sink::redirect(std::io::sink(), goose::sink::Decoration::Plain);
//!
//! let worker = Worker { level: Alert::new(1) };
//! let mut registry = Registry::new();
//! registry.insert("worker", &worker);
//! registry.set_all(3);
//!
//! alert_log!(worker.level, 3, "picked up job {}", 17);
//! ```

pub use logging;
pub use logging::{
    Alert, ApplyReport, CallSite, Component, ConfigError, DOCUMENT_KEY, Document,
    FATAL_EXIT_STATUS, GATED_FATAL_EXIT_STATUS, LevelValue, Registry, alert_fatal, alert_format,
    alert_log, alert_print, disable_trace, enable_trace, impl_component, sink, trace,
    trace_enabled,
};
#[cfg(feature = "tracing")]
pub use logging::{AlertLayer, init_tracing, init_tracing_with_filter};

/// Syslog output.
pub mod syslog {
    pub use logging_sink::{
        Facility, LOCAL_SOCKET_PATHS, MAX_PRIORITY, Priority, Severity, SyslogError, SyslogWriter,
        program_name, use_network_syslog,
    };
}
