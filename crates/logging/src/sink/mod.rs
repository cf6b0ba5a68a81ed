//! crates/logging/src/sink/mod.rs
//! Record rendering and the process-wide log output.
//!
//! [`LogSink`] owns a writer and renders each record in a reusable scratch
//! buffer before handing it to the writer in a single `write_all` call. One
//! record per call keeps datagram transports (syslog over UDP) aligned with
//! record boundaries.
//!
//! The process-wide sink starts out on standard error with
//! [`Decoration::Timestamp`]. [`set_output`], [`replace_output`] and
//! [`redirect`] swap its writer; [`set_decoration`] changes the prefix. These
//! are meant to be called during startup, before workers begin emitting.
//!
//! Timestamps use the local UTC offset read by the first call to
//! [`local_now`]. On Unix the offset can only be read while the process is
//! single-threaded; a first call made later falls back to UTC for the life of
//! the process, so applications that want local times call [`local_now`]
//! before spawning threads.

mod guard;
mod output;

pub use guard::OutputGuard;
pub use output::{decoration, redirect, replace_output, set_decoration, set_output};
pub(crate) use output::{flush_output, write_record};

use std::io::{self, Write};
use std::sync::OnceLock;

use time::{OffsetDateTime, UtcOffset};
use time::format_description::FormatItem;
use time::macros::format_description;

/// Timestamp layout used by [`Decoration::Timestamp`].
const RECORD_TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!(
    "[year]/[month padding:zero]/[day padding:zero] [hour padding:zero]:[minute padding:zero]:[second padding:zero]"
);

/// Prefix added in front of every record written through a [`LogSink`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Decoration {
    /// Prefix each record with the local date and time (`2024/01/31 13:05:09 `).
    #[default]
    Timestamp,
    /// Write records without any prefix.
    Plain,
}

impl Decoration {
    /// Reports whether the decoration adds a timestamp.
    #[must_use]
    pub const fn timestamps(self) -> bool {
        matches!(self, Self::Timestamp)
    }
}

/// Line-oriented sink that renders records into an [`io::Write`] target.
///
/// Every record ends with exactly one newline: one is appended unless the
/// text already ends with `'\n'`.
///
/// # Examples
///
/// ```
/// use logging::sink::{Decoration, LogSink};
///
/// let mut sink = LogSink::with_decoration(Vec::new(), Decoration::Plain);
/// sink.write_record("first")?;
/// sink.write_record("second\n")?;
///
/// assert_eq!(sink.into_inner(), b"first\nsecond\n".to_vec());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct LogSink<W> {
    writer: W,
    decoration: Decoration,
    scratch: String,
}

impl<W> LogSink<W> {
    /// Creates a sink that timestamps every record.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_decoration(writer, Decoration::Timestamp)
    }

    /// Creates a sink with the provided [`Decoration`].
    #[must_use]
    pub fn with_decoration(writer: W, decoration: Decoration) -> Self {
        Self {
            writer,
            decoration,
            scratch: String::new(),
        }
    }

    /// Returns the current [`Decoration`].
    #[must_use]
    pub const fn decoration(&self) -> Decoration {
        self.decoration
    }

    /// Updates the [`Decoration`] used for subsequent records.
    pub fn set_decoration(&mut self, decoration: Decoration) {
        self.decoration = decoration;
    }

    /// Borrows the underlying writer.
    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Replaces the writer, returning the previous one.
    pub fn replace_writer(&mut self, writer: W) -> W {
        std::mem::replace(&mut self.writer, writer)
    }

    /// Consumes the sink and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> LogSink<W>
where
    W: Write,
{
    /// Renders `text` as one record and writes it.
    pub fn write_record(&mut self, text: &str) -> io::Result<()> {
        self.scratch.clear();
        if self.decoration.timestamps() {
            push_timestamp(&mut self.scratch);
        }
        self.scratch.push_str(text);
        if !self.scratch.ends_with('\n') {
            self.scratch.push('\n');
        }
        self.writer.write_all(self.scratch.as_bytes())
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

static LOCAL_OFFSET: OnceLock<UtcOffset> = OnceLock::new();

/// Returns the current time in the local offset recorded on first use.
///
/// The offset is read once. When it cannot be determined (on Unix, once the
/// process has more than one thread) UTC is recorded instead.
pub fn local_now() -> OffsetDateTime {
    let offset = *LOCAL_OFFSET
        .get_or_init(|| UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC));
    OffsetDateTime::now_utc().to_offset(offset)
}

fn push_timestamp(buffer: &mut String) {
    if let Ok(stamp) = local_now().format(RECORD_TIMESTAMP_FORMAT) {
        buffer.push_str(&stamp);
        buffer.push(' ');
    }
}
