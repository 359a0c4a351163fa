#![forbid(unsafe_code)]

//! Per-component style properties.

use im::OrdMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mapping of style property name to value (e.g. `backgroundColor -> gray`).
///
/// Updated by shallow merge: keys present in the update overwrite, all other
/// keys are preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Style {
    properties: OrdMap<String, String>,
}

impl Style {
    /// Create an empty style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    /// Set a single property, returning the previous value.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.properties.insert(property.into(), value.into())
    }

    /// Look up a property.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.properties.get(property).map(String::as_str)
    }

    /// Shallow-merge `update` into `self`.
    pub fn merge(&mut self, update: &Style) {
        for (property, value) in &update.properties {
            self.properties.insert(property.clone(), value.clone());
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterate properties in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(property, value)| (property.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Style {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut style = Self::new();
        for (property, value) in iter {
            style.set(property, value);
        }
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_overwrites_and_preserves() {
        let mut style = Style::new().with("color", "red").with("width", "10px");
        let update = Style::new().with("color", "blue").with("height", "4px");

        style.merge(&update);

        assert_eq!(style.get("color"), Some("blue"));
        assert_eq!(style.get("width"), Some("10px"));
        assert_eq!(style.get("height"), Some("4px"));
        assert_eq!(style.len(), 3);
    }

    #[test]
    fn merge_empty_is_identity() {
        let mut style = Style::new().with("color", "red");
        let before = style.clone();
        style.merge(&Style::new());
        assert_eq!(style, before);
    }

    #[test]
    fn collect_from_pairs() {
        let style: Style = [("a", "1"), ("b", "2")].into_iter().collect();
        let keys: Vec<_> = style.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
    }
}
