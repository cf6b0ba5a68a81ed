//! crates/logging-sink/src/output.rs
//! Routing the process-wide log output to syslog.

use logging::sink::{self, Decoration};

use crate::error::SyslogError;
use crate::host;
use crate::priority::Priority;
use crate::writer::SyslogWriter;

/// Sends every subsequent log record to a syslog daemon.
///
/// Dials `protocol`/`address` (see [`SyslogWriter::dial`]) with the program
/// name as tag. On success the writer becomes the process-wide log output and
/// record decoration is switched to [`Decoration::Plain`], since the daemon
/// stamps its own time. On failure the active output is left unchanged.
///
/// The connection stays open for the rest of the process.
///
/// # Examples
///
/// ```no_run
/// use logging::Alert;
/// use logging_sink::{use_network_syslog, Facility, Priority, Severity};
///
/// use_network_syslog("udp", "logs.example.net:514", Priority::new(Facility::Local3, Severity::Info))?;
///
/// let alert = Alert::new(1);
/// alert.log(1, format_args!("now logging to syslog"));
/// # Ok::<(), logging_sink::SyslogError>(())
/// ```
pub fn use_network_syslog(
    protocol: &str,
    address: &str,
    priority: Priority,
) -> Result<(), SyslogError> {
    let writer = SyslogWriter::dial(protocol, address, priority, &host::program_name())?;
    drop(sink::redirect(writer, Decoration::Plain).keep());
    Ok(())
}
