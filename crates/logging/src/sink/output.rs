//! crates/logging/src/sink/output.rs
//! The process-wide log output shared by every emitting alert.

use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use super::guard::OutputGuard;
use super::{Decoration, LogSink};

type BoxedWriter = Box<dyn Write + Send>;

fn output() -> MutexGuard<'static, LogSink<BoxedWriter>> {
    static OUTPUT: OnceLock<Mutex<LogSink<BoxedWriter>>> = OnceLock::new();
    OUTPUT
        .get_or_init(|| Mutex::new(LogSink::new(Box::new(io::stderr()))))
        .lock()
        // A panic while holding the lock leaves a usable sink behind.
        .unwrap_or_else(PoisonError::into_inner)
}

/// Routes subsequent log records to `writer`.
pub fn set_output<W>(writer: W)
where
    W: Write + Send + 'static,
{
    drop(replace_output(Box::new(writer)));
}

/// Routes subsequent log records to `writer` and returns the previous writer.
///
/// The previous writer is flushed before it is handed back.
pub fn replace_output(writer: BoxedWriter) -> BoxedWriter {
    let mut sink = output();
    let _ = sink.flush();
    sink.replace_writer(writer)
}

/// Sets the prefix added to every subsequent log record.
pub fn set_decoration(decoration: Decoration) {
    output().set_decoration(decoration);
}

/// Returns the prefix currently added to log records.
pub fn decoration() -> Decoration {
    output().decoration()
}

/// Temporarily routes log records to `writer` with the given decoration.
///
/// The previous writer and decoration come back when the returned guard is
/// dropped.
///
/// # Examples
///
/// ```
/// use logging::sink::{self, Decoration};
///
/// {
///     let _guard = sink::redirect(std::io::sink(), Decoration::Plain);
///     assert_eq!(sink::decoration(), Decoration::Plain);
/// }
/// assert_eq!(sink::decoration(), Decoration::Timestamp);
/// ```
pub fn redirect<W>(writer: W, decoration: Decoration) -> OutputGuard
where
    W: Write + Send + 'static,
{
    let mut sink = output();
    let _ = sink.flush();
    let previous_writer = sink.replace_writer(Box::new(writer));
    let previous_decoration = sink.decoration();
    sink.set_decoration(decoration);
    OutputGuard::new(previous_writer, previous_decoration)
}

pub(super) fn restore(writer: BoxedWriter, decoration: Decoration) {
    let mut sink = output();
    let _ = sink.flush();
    drop(sink.replace_writer(writer));
    sink.set_decoration(decoration);
}

/// Writes one record to the process-wide output.
///
/// Write errors are dropped: the emitting call has no error channel.
pub(crate) fn write_record(text: &str) {
    let _ = output().write_record(text);
}

/// Flushes the process-wide output.
pub(crate) fn flush_output() {
    let _ = output().flush();
}
