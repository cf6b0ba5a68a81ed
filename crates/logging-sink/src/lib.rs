#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` connects the process-wide log output of the [`logging`]
//! crate to a syslog daemon, over the network or through the local socket.
//!
//! # Design
//!
//! - [`Facility`], [`Severity`] and [`Priority`] model the `<PRI>` header.
//! - [`SyslogWriter`] is an [`std::io::Write`] implementor that turns each
//!   write into one framed record, reconnecting once when a write fails.
//! - [`use_network_syslog`] dials a daemon and installs the writer as the
//!   log output, with timestamps left to the daemon.
//!
//! # Errors
//!
//! Dialing reports [`SyslogError::Connection`]; raw priorities outside
//! `0..=191` report [`SyslogError::InvalidPriority`]; a record that cannot be
//! delivered after reconnecting reports [`SyslogError::Io`]. Once installed
//! as the log output, write errors are discarded by the emitting alert.
//!
//! # Examples
//!
//! ```no_run
//! use std::io::Write;
//!
//! use logging_sink::{Facility, Priority, Severity, SyslogWriter};
//!
//! let mut writer = SyslogWriter::dial("", "", Priority::new(Facility::User, Severity::Info), "")?;
//! writeln!(writer, "delivered through /dev/log")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod diag;
mod error;
mod host;
mod output;
mod priority;
mod writer;

pub use error::SyslogError;
pub use host::program_name;
pub use output::use_network_syslog;
pub use priority::{Facility, MAX_PRIORITY, Priority, Severity};
pub use writer::{LOCAL_SOCKET_PATHS, SyslogWriter};
