//! crates/logging/src/document.rs
//! The JSON document consumed by [`Registry::configure`](crate::Registry::configure).

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level key under which component levels are nested.
pub const DOCUMENT_KEY: &str = "Goose";

/// Per-component alert levels, keyed by component name then field name.
///
/// The JSON shape is:
///
/// ```json
/// {"Goose": {"<component>": {"<field>": <level>, ...}, ...}}
/// ```
///
/// Other top-level keys are ignored, and a document without the `Goose` key
/// configures nothing. Levels must be integers in `0..=255`.
///
/// # Examples
///
/// ```
/// use logging::Document;
///
/// let document: Document = r#"{"Goose": {"svc": {"level": 9}}}"#.parse()?;
/// assert_eq!(document.level("svc", "level"), Some(9));
/// assert_eq!(document.level("svc", "other"), None);
/// # Ok::<(), logging::ConfigError>(())
/// ```
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Document {
    #[serde(rename = "Goose", default)]
    components: BTreeMap<String, BTreeMap<String, u8>>,
}

impl Document {
    /// Parses a document from JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ConfigError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Returns every component with its field levels.
    pub fn components(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, u8>)> {
        self.components
            .iter()
            .map(|(name, fields)| (name.as_str(), fields))
    }

    /// Returns the level set for `field` of `component`, if any.
    pub fn level(&self, component: &str, field: &str) -> Option<u8> {
        self.components.get(component)?.get(field).copied()
    }

    /// Sets the level of `field` of `component`.
    pub fn insert(&mut self, component: impl Into<String>, field: impl Into<String>, level: u8) {
        self.components
            .entry(component.into())
            .or_default()
            .insert(field.into(), level);
    }

    /// Reports whether the document names no component.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl FromStr for Document {
    type Err = ConfigError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::from_slice(text.as_bytes())
    }
}
