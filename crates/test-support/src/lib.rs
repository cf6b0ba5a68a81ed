//! Shared test utilities for the goose workspace.
//!
//! Logging state (the trace flag and the log output) is process-wide, while
//! the test harness runs tests on many threads. Tests that touch that state
//! hold [`serial`] for their whole body, and capture output through a
//! [`SharedBuffer`] or a [`log_file`].

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tempfile::NamedTempFile;

/// Serialises tests that mutate process-wide logging state.
///
/// A failed test poisons nothing: the guard is recovered from a poisoned
/// lock so later tests still run.
pub fn serial() -> MutexGuard<'static, ()> {
    static LOCK: Mutex<()> = Mutex::new(());
    LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A clonable in-memory writer; every clone appends to the same buffer.
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the captured bytes.
    pub fn bytes(&self) -> Vec<u8> {
        self.lock().clone()
    }

    /// Returns the captured bytes as UTF-8 text.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Returns the number of captured lines.
    pub fn line_count(&self) -> usize {
        self.contents().lines().count()
    }

    /// Discards everything captured so far.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.bytes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Creates a temporary file suitable as a log destination.
///
/// The file is removed when the returned handle is dropped.
pub fn log_file() -> io::Result<NamedTempFile> {
    tempfile::Builder::new()
        .prefix("goose-")
        .suffix(".log")
        .tempfile()
}
