//! crates/logging/src/alert.rs
//! The severity threshold carried by components.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::level::LevelValue;

/// A numeric severity threshold.
///
/// A message declared at level `L` passes the gate iff the stored ordinal is
/// at least `L`, so larger thresholds are more verbose. The type imposes no
/// named levels; callers choose their own numbering.
///
/// The ordinal lives in an [`AtomicU8`], which lets worker threads consult a
/// component's alert while a configuration reload rewrites it. Loads and
/// stores use relaxed ordering: an alert is a standalone value and never
/// publishes other memory.
///
/// # Examples
///
/// ```
/// use logging::Alert;
///
/// let alert = Alert::new(2);
/// assert!(alert.enabled(0));
/// assert!(alert.enabled(2));
/// assert!(!alert.enabled(3));
///
/// alert.set("5");
/// assert_eq!(alert.get(), 5);
/// alert.set("notanumber");
/// assert_eq!(alert.get(), 5);
/// ```
#[derive(Default)]
pub struct Alert(AtomicU8);

impl Alert {
    /// Creates an alert holding `level`.
    #[must_use]
    pub const fn new(level: u8) -> Self {
        Self(AtomicU8::new(level))
    }

    /// Returns the stored ordinal.
    #[inline]
    pub fn get(&self) -> u8 {
        self.0.load(Ordering::Relaxed)
    }

    /// Replaces the stored ordinal.
    #[inline]
    pub fn store(&self, level: u8) {
        self.0.store(level, Ordering::Relaxed);
    }

    /// Reports whether a message declared at `level` passes the gate.
    #[inline]
    pub fn enabled(&self, level: u8) -> bool {
        self.get() >= level
    }

    /// Assigns a level from any integer width or decimal text.
    ///
    /// Values that have no integer reading (malformed text, floats, ...)
    /// leave the alert unchanged without reporting an error.
    pub fn set<'a>(&self, value: impl Into<LevelValue<'a>>) {
        if let Some(level) = value.into().to_ordinal() {
            self.store(level);
        }
    }
}

impl Clone for Alert {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl PartialEq for Alert {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl Eq for Alert {}

impl PartialEq<u8> for Alert {
    fn eq(&self, other: &u8) -> bool {
        self.get() == *other
    }
}

impl From<u8> for Alert {
    fn from(level: u8) -> Self {
        Self::new(level)
    }
}

impl fmt::Debug for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Alert").field(&self.get()).finish()
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.get(), f)
    }
}

impl serde::Serialize for Alert {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.get())
    }
}

impl<'de> serde::Deserialize<'de> for Alert {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        u8::deserialize(deserializer).map(Self::new)
    }
}
