//! crates/logging-sink/src/priority.rs
//! Syslog facility, severity and the combined priority value.
//!
//! The numeric codes follow RFC 5424 and match the `LOG_*` constants of
//! `<syslog.h>`: a priority is `facility_code << 3 | severity`.

use std::fmt;

use crate::error::SyslogError;

/// Largest valid raw priority: `local7 | debug`.
pub const MAX_PRIORITY: i32 = (Facility::Local7.code() << 3) | Severity::Debug.code();

/// Syslog facility codes.
///
/// Names accepted by [`Facility::from_name`] follow the `syslog.conf`
/// conventions, case-insensitively.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[repr(i32)]
pub enum Facility {
    /// Kernel messages (`LOG_KERN`).
    Kern = 0,
    /// User-level messages (`LOG_USER`).
    #[default]
    User = 1,
    /// Mail system (`LOG_MAIL`).
    Mail = 2,
    /// System daemons (`LOG_DAEMON`).
    Daemon = 3,
    /// Security/authorization messages (`LOG_AUTH`).
    Auth = 4,
    /// Messages generated internally by syslogd (`LOG_SYSLOG`).
    Syslog = 5,
    /// Line printer subsystem (`LOG_LPR`).
    Lpr = 6,
    /// Network news subsystem (`LOG_NEWS`).
    News = 7,
    /// UUCP subsystem (`LOG_UUCP`).
    Uucp = 8,
    /// Clock daemon (`LOG_CRON`).
    Cron = 9,
    /// Private security/authorization messages (`LOG_AUTHPRIV`).
    Authpriv = 10,
    /// FTP daemon (`LOG_FTP`).
    Ftp = 11,
    /// NTP subsystem.
    Ntp = 12,
    /// Log audit.
    Audit = 13,
    /// Log alert.
    LogAlert = 14,
    /// Clock daemon (second code).
    Clock = 15,
    /// Reserved for local use (`LOG_LOCAL0`).
    Local0 = 16,
    /// Reserved for local use (`LOG_LOCAL1`).
    Local1 = 17,
    /// Reserved for local use (`LOG_LOCAL2`).
    Local2 = 18,
    /// Reserved for local use (`LOG_LOCAL3`).
    Local3 = 19,
    /// Reserved for local use (`LOG_LOCAL4`).
    Local4 = 20,
    /// Reserved for local use (`LOG_LOCAL5`).
    Local5 = 21,
    /// Reserved for local use (`LOG_LOCAL6`).
    Local6 = 22,
    /// Reserved for local use (`LOG_LOCAL7`).
    Local7 = 23,
}

impl Facility {
    const ALL: [Self; 24] = [
        Self::Kern,
        Self::User,
        Self::Mail,
        Self::Daemon,
        Self::Auth,
        Self::Syslog,
        Self::Lpr,
        Self::News,
        Self::Uucp,
        Self::Cron,
        Self::Authpriv,
        Self::Ftp,
        Self::Ntp,
        Self::Audit,
        Self::LogAlert,
        Self::Clock,
        Self::Local0,
        Self::Local1,
        Self::Local2,
        Self::Local3,
        Self::Local4,
        Self::Local5,
        Self::Local6,
        Self::Local7,
    ];

    /// Returns the facility code (before shifting into a priority).
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Returns the facility for a code in `0..=23`.
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }

    /// Parses a facility name.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging_sink::Facility;
    ///
    /// assert_eq!(Facility::from_name("daemon"), Some(Facility::Daemon));
    /// assert_eq!(Facility::from_name("LOCAL3"), Some(Facility::Local3));
    /// assert_eq!(Facility::from_name("unknown"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|facility| facility.as_str().eq_ignore_ascii_case(name))
            .or_else(|| name.eq_ignore_ascii_case("security").then_some(Self::Auth))
    }

    /// Returns the facility name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kern => "kern",
            Self::User => "user",
            Self::Mail => "mail",
            Self::Daemon => "daemon",
            Self::Auth => "auth",
            Self::Syslog => "syslog",
            Self::Lpr => "lpr",
            Self::News => "news",
            Self::Uucp => "uucp",
            Self::Cron => "cron",
            Self::Authpriv => "authpriv",
            Self::Ftp => "ftp",
            Self::Ntp => "ntp",
            Self::Audit => "audit",
            Self::LogAlert => "logalert",
            Self::Clock => "clock",
            Self::Local0 => "local0",
            Self::Local1 => "local1",
            Self::Local2 => "local2",
            Self::Local3 => "local3",
            Self::Local4 => "local4",
            Self::Local5 => "local5",
            Self::Local6 => "local6",
            Self::Local7 => "local7",
        }
    }
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Syslog severity levels, most severe first.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(i32)]
pub enum Severity {
    /// System is unusable (`LOG_EMERG`).
    Emergency = 0,
    /// Action must be taken immediately (`LOG_ALERT`).
    Alert = 1,
    /// Critical conditions (`LOG_CRIT`).
    Critical = 2,
    /// Error conditions (`LOG_ERR`).
    Error = 3,
    /// Warning conditions (`LOG_WARNING`).
    Warning = 4,
    /// Normal but significant condition (`LOG_NOTICE`).
    Notice = 5,
    /// Informational messages (`LOG_INFO`).
    #[default]
    Info = 6,
    /// Debug-level messages (`LOG_DEBUG`).
    Debug = 7,
}

impl Severity {
    const ALL: [Self; 8] = [
        Self::Emergency,
        Self::Alert,
        Self::Critical,
        Self::Error,
        Self::Warning,
        Self::Notice,
        Self::Info,
        Self::Debug,
    ];

    /// Returns the severity code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Returns the severity for a code in `0..=7`.
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }

    /// Parses a severity name; `error`, `warn` and `panic` are accepted as aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        match name.as_str() {
            "error" => Some(Self::Error),
            "warn" => Some(Self::Warning),
            "panic" => Some(Self::Emergency),
            other => Self::ALL
                .into_iter()
                .find(|severity| severity.as_str() == other),
        }
    }

    /// Returns the severity name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Emergency => "emerg",
            Self::Alert => "alert",
            Self::Critical => "crit",
            Self::Error => "err",
            Self::Warning => "warning",
            Self::Notice => "notice",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A facility and severity pair, as carried in the `<PRI>` record header.
///
/// # Examples
///
/// ```
/// use logging_sink::{Facility, Priority, Severity};
///
/// let priority = Priority::new(Facility::Local0, Severity::Warning);
/// assert_eq!(priority.raw(), 132);
/// assert_eq!(Priority::from_raw(132)?, priority);
/// assert!(Priority::from_raw(192).is_err());
/// # Ok::<(), logging_sink::SyslogError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Priority {
    facility: Facility,
    severity: Severity,
}

impl Priority {
    /// Combines a facility and a severity.
    #[must_use]
    pub const fn new(facility: Facility, severity: Severity) -> Self {
        Self { facility, severity }
    }

    /// Decodes a raw `facility << 3 | severity` value.
    pub fn from_raw(raw: i32) -> Result<Self, SyslogError> {
        if !(0..=MAX_PRIORITY).contains(&raw) {
            return Err(SyslogError::InvalidPriority(raw));
        }
        match (Facility::from_code(raw >> 3), Severity::from_code(raw & 7)) {
            (Some(facility), Some(severity)) => Ok(Self::new(facility, severity)),
            _ => Err(SyslogError::InvalidPriority(raw)),
        }
    }

    /// Returns the facility.
    #[must_use]
    pub const fn facility(self) -> Facility {
        self.facility
    }

    /// Returns the severity.
    #[must_use]
    pub const fn severity(self) -> Severity {
        self.severity
    }

    /// Returns the raw value written inside `<...>`.
    #[must_use]
    pub const fn raw(self) -> i32 {
        (self.facility.code() << 3) | self.severity.code()
    }
}

impl From<Facility> for Priority {
    fn from(facility: Facility) -> Self {
        Self::new(facility, Severity::default())
    }
}

impl TryFrom<i32> for Priority {
    type Error = SyslogError;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        Self::from_raw(raw)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.facility, self.severity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Facility tests ---

    #[test]
    fn from_name_recognises_every_facility() {
        for facility in Facility::ALL {
            assert_eq!(Facility::from_name(facility.as_str()), Some(facility));
            assert_eq!(
                Facility::from_name(&facility.as_str().to_ascii_uppercase()),
                Some(facility)
            );
        }
        assert_eq!(Facility::from_name("security"), Some(Facility::Auth));
    }

    #[test]
    fn from_name_rejects_unknown() {
        assert_eq!(Facility::from_name("unknown"), None);
        assert_eq!(Facility::from_name(""), None);
        assert_eq!(Facility::from_name("local8"), None);
        assert_eq!(Facility::from_name("LOG_DAEMON"), None);
    }

    #[test]
    fn facility_codes_are_dense() {
        for (index, facility) in Facility::ALL.into_iter().enumerate() {
            assert_eq!(facility.code(), index as i32);
            assert_eq!(Facility::from_code(facility.code()), Some(facility));
        }
        assert_eq!(Facility::from_code(24), None);
        assert_eq!(Facility::from_code(-1), None);
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", Facility::Local3), "local3");
        assert_eq!(format!("{}", Severity::Warning), "warning");
    }

    #[cfg(unix)]
    #[test]
    fn facility_values_match_libc_constants() {
        let shifted = |facility: Facility| facility.code() << 3;
        assert_eq!(shifted(Facility::Kern), libc::LOG_KERN);
        assert_eq!(shifted(Facility::User), libc::LOG_USER);
        assert_eq!(shifted(Facility::Mail), libc::LOG_MAIL);
        assert_eq!(shifted(Facility::Daemon), libc::LOG_DAEMON);
        assert_eq!(shifted(Facility::Auth), libc::LOG_AUTH);
        assert_eq!(shifted(Facility::Cron), libc::LOG_CRON);
        assert_eq!(shifted(Facility::Local0), libc::LOG_LOCAL0);
        assert_eq!(shifted(Facility::Local7), libc::LOG_LOCAL7);
    }

    // --- Severity tests ---

    #[test]
    fn severity_names_and_aliases() {
        for severity in Severity::ALL {
            assert_eq!(Severity::from_name(severity.as_str()), Some(severity));
        }
        assert_eq!(Severity::from_name("ERROR"), Some(Severity::Error));
        assert_eq!(Severity::from_name("warn"), Some(Severity::Warning));
        assert_eq!(Severity::from_name("panic"), Some(Severity::Emergency));
        assert_eq!(Severity::from_name("verbose"), None);
    }

    #[test]
    fn severities_order_most_severe_first() {
        assert!(Severity::Emergency < Severity::Debug);
        assert_eq!(Severity::from_code(8), None);
    }

    #[cfg(unix)]
    #[test]
    fn severity_values_match_libc_constants() {
        assert_eq!(Severity::Emergency.code(), libc::LOG_EMERG);
        assert_eq!(Severity::Alert.code(), libc::LOG_ALERT);
        assert_eq!(Severity::Critical.code(), libc::LOG_CRIT);
        assert_eq!(Severity::Error.code(), libc::LOG_ERR);
        assert_eq!(Severity::Warning.code(), libc::LOG_WARNING);
        assert_eq!(Severity::Notice.code(), libc::LOG_NOTICE);
        assert_eq!(Severity::Info.code(), libc::LOG_INFO);
        assert_eq!(Severity::Debug.code(), libc::LOG_DEBUG);
    }

    // --- Priority tests ---

    #[test]
    fn raw_priority_combines_facility_and_severity() {
        assert_eq!(Priority::new(Facility::Kern, Severity::Emergency).raw(), 0);
        assert_eq!(Priority::new(Facility::User, Severity::Info).raw(), 14);
        assert_eq!(Priority::new(Facility::Local7, Severity::Debug).raw(), MAX_PRIORITY);
        assert_eq!(MAX_PRIORITY, 191);
    }

    #[test]
    fn from_raw_accepts_the_full_range() {
        for raw in 0..=MAX_PRIORITY {
            let priority = Priority::from_raw(raw).expect("in range");
            assert_eq!(priority.raw(), raw);
        }
    }

    #[test]
    fn from_raw_rejects_out_of_range_values() {
        for raw in [-1, MAX_PRIORITY + 1, i32::MAX, i32::MIN] {
            assert!(matches!(
                Priority::from_raw(raw),
                Err(SyslogError::InvalidPriority(value)) if value == raw
            ));
        }
    }

    #[test]
    fn default_priority_is_user_info() {
        let priority = Priority::default();
        assert_eq!(priority.facility(), Facility::User);
        assert_eq!(priority.severity(), Severity::Info);
        assert_eq!(Priority::from(Facility::Daemon).severity(), Severity::Info);
        assert_eq!(priority.to_string(), "user.info");
    }
}
