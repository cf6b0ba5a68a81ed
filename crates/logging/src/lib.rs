#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` is a leveled logging facility built around [`Alert`], a
//! one-byte numeric threshold owned by each component. A message declared at
//! level `L` is emitted through an alert holding `T` iff `T >= L`; callers
//! pick their own numbering, and larger thresholds are more verbose.
//!
//! # Design
//!
//! - [`Alert`] methods gate, render and deliver a message in one call:
//!   [`log`](Alert::log) writes a record to the process-wide
//!   [`sink`], [`print`](Alert::print) writes to standard output,
//!   [`format`](Alert::format) returns the text and
//!   [`fatal`](Alert::fatal) writes then terminates. The `deep_*` variants
//!   attribute the message to a caller further up the stack.
//! - When [`enable_trace`] is on, each message is prefixed with a locator
//!   `{package}[file]<function>(line): ` naming the code that emitted it.
//!   The emission macros fix the locator at compile time; direct method
//!   calls resolve it from the call stack.
//! - [`Registry`] collects named [`Component`]s so that every alert can be
//!   set at once, or configured from a JSON [`Document`].
//!
//! # Invariants
//!
//! - A gated-out message is never rendered, resolved or written.
//! - Every record written to the log output ends with exactly one newline.
//! - A fatal call always terminates the process, whether or not its message
//!   passed the gate.
//! - Document configuration never raises an alert that currently holds zero.
//!
//! # Errors
//!
//! Emission never fails: write errors from the log output are discarded. The
//! only fallible operation is [`Registry::configure`], which reports
//! [`ConfigError::MalformedDocument`] and leaves every alert unchanged.
//!
//! # Examples
//!
//! ```
//! use logging::{alert_log, impl_component, sink, Alert, Registry};
//!
//! struct Cache {
//!     level: Alert,
//! }
//! impl_component!(Cache { level });
//!
//! let _output = sink::redirect(Vec::new(), sink::Decoration::Plain);
//!
//! let cache = Cache { level: Alert::new(1) };
//! let mut registry = Registry::new();
//! registry.insert("cache", &cache);
//! registry.configure(br#"{"Goose": {"cache": {"level": 4}}}"#)?;
//!
//! alert_log!(cache.level, 4, "evicted {} entries", 12);
//! assert_eq!(cache.level.format(5, format_args!("too verbose")), "");
//! # Ok::<(), logging::ConfigError>(())
//! ```
//!
//! # See also
//!
//! - `logging-sink` routes the log output to a syslog daemon.

mod alert;
mod diag;
mod document;
mod emit;
mod error;
mod level;
mod macros;
mod registry;
pub mod sink;
pub mod trace;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use alert::Alert;
pub use document::{DOCUMENT_KEY, Document};
pub use emit::{FATAL_EXIT_STATUS, GATED_FATAL_EXIT_STATUS};
pub use error::ConfigError;
pub use level::LevelValue;
pub use registry::{ApplyReport, Component, Registry};
pub use trace::{CallSite, disable_trace, enable_trace, trace_enabled};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{AlertLayer, init_tracing, init_tracing_with_filter};
