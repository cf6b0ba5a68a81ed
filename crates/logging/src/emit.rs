//! crates/logging/src/emit.rs
//! Level-gated emission through an [`Alert`].
//!
//! Every entry point compares the message level against the alert, renders
//! the message (behind the call-site locator when tracing is on) and hands it
//! to its destination. The `deep_*` variants skip `depth` extra frames before
//! resolving the locator, for emitting calls wrapped by helper functions.
//!
//! The methods are `#[track_caller]` and hand their caller's [`Location`] to
//! the resolver, which counts on exactly one frame between itself and that
//! caller. The `*_at` methods take an [`Origin`] built by the emission macros
//! instead of resolving the stack.

use std::fmt;
use std::io::{self, Write};
use std::panic::Location;
use std::process;

use crate::alert::Alert;
use crate::sink;
use crate::trace::{self, CallSite, Origin};

/// Exit status of a fatal call whose message passed the gate and was written.
pub const FATAL_EXIT_STATUS: i32 = 1;

/// Exit status of a fatal call whose message was gated out.
pub const GATED_FATAL_EXIT_STATUS: i32 = 255;

impl Alert {
    /// Writes a record to the process-wide log output if `level` passes.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::{sink, Alert};
    ///
    /// let _guard = sink::redirect(std::io::sink(), sink::Decoration::Plain);
    /// let alert = Alert::new(2);
    /// alert.log(1, format_args!("listening on port {}", 8080));
    /// ```
    #[track_caller]
    #[inline(never)]
    pub fn log(&self, level: u8, args: fmt::Arguments<'_>) {
        if self.enabled(level) {
            sink::write_record(&render(trace::resolve_emitter(Location::caller(), 0), args));
        }
    }

    /// Writes the rendered message to standard output if `level` passes.
    ///
    /// No timestamp or newline is added.
    #[track_caller]
    #[inline(never)]
    pub fn print(&self, level: u8, args: fmt::Arguments<'_>) {
        if self.enabled(level) {
            write_stdout(&render(trace::resolve_emitter(Location::caller(), 0), args));
        }
    }

    /// Returns the rendered message if `level` passes, or an empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::Alert;
    ///
    /// let alert = Alert::new(3);
    /// assert_eq!(alert.format(3, format_args!("{} jobs", 4)), "4 jobs");
    /// assert_eq!(alert.format(4, format_args!("{} jobs", 4)), "");
    /// ```
    #[track_caller]
    #[inline(never)]
    pub fn format(&self, level: u8, args: fmt::Arguments<'_>) -> String {
        if self.enabled(level) {
            render(trace::resolve_emitter(Location::caller(), 0), args)
        } else {
            String::new()
        }
    }

    /// Writes a record if `level` passes, then terminates the process.
    ///
    /// Termination does not depend on the gate: a call site that reaches
    /// `fatal` always ends the process. The exit status is
    /// [`FATAL_EXIT_STATUS`] when the record was written and
    /// [`GATED_FATAL_EXIT_STATUS`] otherwise.
    #[track_caller]
    #[inline(never)]
    pub fn fatal(&self, level: u8, args: fmt::Arguments<'_>) -> ! {
        if self.enabled(level) {
            sink::write_record(&render(trace::resolve_emitter(Location::caller(), 0), args));
            terminate(FATAL_EXIT_STATUS);
        }
        terminate(GATED_FATAL_EXIT_STATUS)
    }

    /// [`log`](Self::log), with the locator taken `depth` frames further up.
    #[track_caller]
    #[inline(never)]
    pub fn deep_log(&self, depth: usize, level: u8, args: fmt::Arguments<'_>) {
        if self.enabled(level) {
            sink::write_record(&render(trace::resolve_emitter(Location::caller(), depth), args));
        }
    }

    /// [`print`](Self::print), with the locator taken `depth` frames further up.
    #[track_caller]
    #[inline(never)]
    pub fn deep_print(&self, depth: usize, level: u8, args: fmt::Arguments<'_>) {
        if self.enabled(level) {
            write_stdout(&render(trace::resolve_emitter(Location::caller(), depth), args));
        }
    }

    /// [`format`](Self::format), with the locator taken `depth` frames further up.
    #[track_caller]
    #[inline(never)]
    pub fn deep_format(&self, depth: usize, level: u8, args: fmt::Arguments<'_>) -> String {
        if self.enabled(level) {
            render(trace::resolve_emitter(Location::caller(), depth), args)
        } else {
            String::new()
        }
    }

    /// [`fatal`](Self::fatal), with the locator taken `depth` frames further up.
    #[track_caller]
    #[inline(never)]
    pub fn deep_fatal(&self, depth: usize, level: u8, args: fmt::Arguments<'_>) -> ! {
        if self.enabled(level) {
            sink::write_record(&render(trace::resolve_emitter(Location::caller(), depth), args));
            terminate(FATAL_EXIT_STATUS);
        }
        terminate(GATED_FATAL_EXIT_STATUS)
    }
    /// [`log`](Self::log), located at `origin` rather than on the stack.
    pub fn log_at(&self, origin: Origin, level: u8, args: fmt::Arguments<'_>) {
        if self.enabled(level) {
            sink::write_record(&render(trace::resolve_origin(&origin), args));
        }
    }

    /// [`print`](Self::print), located at `origin` rather than on the stack.
    pub fn print_at(&self, origin: Origin, level: u8, args: fmt::Arguments<'_>) {
        if self.enabled(level) {
            write_stdout(&render(trace::resolve_origin(&origin), args));
        }
    }

    /// [`format`](Self::format), located at `origin` rather than on the stack.
    pub fn format_at(&self, origin: Origin, level: u8, args: fmt::Arguments<'_>) -> String {
        if self.enabled(level) {
            render(trace::resolve_origin(&origin), args)
        } else {
            String::new()
        }
    }

    /// [`fatal`](Self::fatal), located at `origin` rather than on the stack.
    pub fn fatal_at(&self, origin: Origin, level: u8, args: fmt::Arguments<'_>) -> ! {
        if self.enabled(level) {
            sink::write_record(&render(trace::resolve_origin(&origin), args));
            terminate(FATAL_EXIT_STATUS);
        }
        terminate(GATED_FATAL_EXIT_STATUS)
    }
}

fn render(site: Option<CallSite>, args: fmt::Arguments<'_>) -> String {
    match site {
        Some(site) => format!("{site}{args}"),
        None => fmt::format(args),
    }
}

fn write_stdout(text: &str) {
    let mut stdout = io::stdout().lock();
    let _ = stdout.write_all(text.as_bytes());
    let _ = stdout.flush();
}

fn terminate(status: i32) -> ! {
    sink::flush_output();
    process::exit(status)
}
