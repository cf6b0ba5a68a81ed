//! crates/logging/src/sink/guard.rs
//! Scoped redirection of the process-wide log output.

use std::fmt;
use std::io::Write;

use super::Decoration;

/// RAII guard that restores the process-wide log output when dropped.
///
/// Created by [`redirect`](super::redirect). While the guard is alive, records
/// go to the writer passed to `redirect`; dropping it reinstates the writer
/// and [`Decoration`] that were active before.
#[must_use = "dropping the guard immediately restores the previous output"]
pub struct OutputGuard {
    previous: Option<(Box<dyn Write + Send>, Decoration)>,
}

impl OutputGuard {
    pub(super) fn new(writer: Box<dyn Write + Send>, decoration: Decoration) -> Self {
        Self {
            previous: Some((writer, decoration)),
        }
    }

    /// Returns the [`Decoration`] that will be restored when the guard is dropped.
    #[must_use]
    pub fn previous_decoration(&self) -> Option<Decoration> {
        self.previous.as_ref().map(|(_, decoration)| *decoration)
    }

    /// Consumes the guard without restoring the previous output.
    ///
    /// The redirected writer becomes the permanent output. The previous writer
    /// is returned so the caller can flush or close it.
    pub fn keep(mut self) -> Option<Box<dyn Write + Send>> {
        self.previous.take().map(|(writer, _)| writer)
    }
}

impl Drop for OutputGuard {
    fn drop(&mut self) {
        if let Some((writer, decoration)) = self.previous.take() {
            super::output::restore(writer, decoration);
        }
    }
}

impl fmt::Debug for OutputGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputGuard")
            .field("previous_decoration", &self.previous_decoration())
            .finish_non_exhaustive()
    }
}
