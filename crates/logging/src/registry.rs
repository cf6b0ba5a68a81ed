//! crates/logging/src/registry.rs
//! Bulk configuration of alerts spread across independent components.
//!
//! Components expose their [`Alert`] fields through the [`Component`] trait,
//! usually generated with [`impl_component!`](crate::impl_component). A
//! [`Registry`] names each component once; a single call then sets every
//! alert to one level ([`Registry::set_all`]) or applies a per-component
//! [`Document`] ([`Registry::configure`]).
//!
//! Document configuration only rewrites alerts that currently hold a non-zero
//! level. A zero alert is indistinguishable from one nobody configured, so it
//! is treated as not opted in and left at zero.

use std::collections::BTreeMap;
use std::fmt;

use crate::alert::Alert;
use crate::diag;
use crate::document::Document;
use crate::error::ConfigError;
use crate::level::LevelValue;

/// A value whose [`Alert`] fields can be enumerated by name.
///
/// # Examples
///
/// ```
/// use logging::{impl_component, Alert, Component};
///
/// #[derive(Default)]
/// struct Cache {
///     level: Alert,
///     evictions: Alert,
///     capacity: usize,
/// }
///
/// impl_component!(Cache { level, evictions });
///
/// let cache = Cache::default();
/// let mut names = Vec::new();
/// cache.visit_alerts(&mut |name, _| names.push(name.to_owned()));
/// assert_eq!(names, ["level", "evictions"]);
/// ```
pub trait Component {
    /// Calls `visit` once for every alert field, with the field's name.
    fn visit_alerts(&self, visit: &mut dyn FnMut(&str, &Alert));
}

/// A bare alert has no fields; registering one configures nothing.
impl Component for Alert {
    fn visit_alerts(&self, _visit: &mut dyn FnMut(&str, &Alert)) {}
}

impl<T> Component for std::sync::Arc<T>
where
    T: Component + ?Sized,
{
    fn visit_alerts(&self, visit: &mut dyn FnMut(&str, &Alert)) {
        (**self).visit_alerts(visit);
    }
}

/// Outcome of applying a [`Document`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ApplyReport {
    /// Alerts that received a new level.
    pub updated: usize,
    /// Document entries that matched no registered, non-zero alert.
    pub skipped: usize,
}

/// Named components whose alerts are configured together.
///
/// # Examples
///
/// ```
/// use logging::{impl_component, Alert, Registry};
///
/// struct Server {
///     level: Alert,
/// }
/// impl_component!(Server { level });
///
/// let server = Server { level: Alert::new(3) };
/// let mut registry = Registry::new();
/// registry.insert("server", &server);
///
/// registry.configure(br#"{"Goose": {"server": {"level": 9}}}"#)?;
/// assert_eq!(server.level.get(), 9);
///
/// registry.set_all(1);
/// assert_eq!(server.level.get(), 1);
/// # Ok::<(), logging::ConfigError>(())
/// ```
#[derive(Default)]
pub struct Registry<'a> {
    components: BTreeMap<String, &'a dyn Component>,
}

impl<'a> Registry<'a> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `component` under `name`, returning the component it replaces.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        component: &'a dyn Component,
    ) -> Option<&'a dyn Component> {
        self.components.insert(name.into(), component)
    }

    /// Removes the component registered under `name`.
    pub fn remove(&mut self, name: &str) -> Option<&'a dyn Component> {
        self.components.remove(name)
    }

    /// Returns the component registered under `name`.
    pub fn get(&self, name: &str) -> Option<&'a dyn Component> {
        self.components.get(name).copied()
    }

    /// Returns the registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    /// Returns the number of registered components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Reports whether no component is registered.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Sets every alert of every registered component to `level`.
    ///
    /// `level` may be any integer width or decimal text, coerced like
    /// [`Alert::set`]. A value with no integer reading changes nothing.
    /// Returns the number of alerts assigned.
    pub fn set_all<'v>(&self, level: impl Into<LevelValue<'v>>) -> usize {
        let Some(level) = level.into().to_ordinal() else {
            return 0;
        };

        let mut assigned = 0;
        for (name, component) in &self.components {
            component.visit_alerts(&mut |field, alert| {
                alert.store(level);
                diag::updated_field(name, field, level);
                assigned += 1;
            });
        }
        assigned
    }

    /// Parses `document` and applies it.
    ///
    /// Parsing completes before any alert is touched, so a malformed document
    /// leaves every component unchanged.
    pub fn configure(&self, document: &[u8]) -> Result<ApplyReport, ConfigError> {
        let document = Document::from_slice(document)?;
        Ok(self.apply(&document))
    }

    /// Applies the levels in `document` to the registered components.
    ///
    /// An alert is rewritten only when its component is registered, a field
    /// of that name exists, and the alert currently holds a non-zero level.
    /// Every other document entry is skipped silently.
    pub fn apply(&self, document: &Document) -> ApplyReport {
        let mut report = ApplyReport::default();

        for (name, fields) in document.components() {
            let Some(component) = self.components.get(name) else {
                diag::unknown_component(name);
                report.skipped += fields.len();
                continue;
            };

            for (field, &level) in fields {
                let mut outcome = Outcome::Missing;
                component.visit_alerts(&mut |candidate, alert| {
                    if candidate != field {
                        return;
                    }
                    if alert.get() == 0 {
                        outcome = Outcome::Zero;
                    } else {
                        alert.store(level);
                        outcome = Outcome::Updated;
                    }
                });

                match outcome {
                    Outcome::Updated => {
                        diag::updated_field(name, field, level);
                        report.updated += 1;
                    }
                    Outcome::Zero => {
                        diag::skipped_field(name, field, "alert is zero");
                        report.skipped += 1;
                    }
                    Outcome::Missing => {
                        diag::skipped_field(name, field, "no such alert");
                        report.skipped += 1;
                    }
                }
            }
        }

        report
    }
}

enum Outcome {
    Missing,
    Zero,
    Updated,
}

impl fmt::Debug for Registry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("components", &self.components.keys().collect::<Vec<_>>())
            .finish()
    }
}
