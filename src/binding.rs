//! Name-to-value mappings that supply concrete values for variables.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A binding context mapping variable names to numeric values.
///
/// Evaluation never consults ambient state: every call that may touch a
/// variable takes an `Option<&Bindings>`, where `None` means no context is
/// active. Distinct workers can therefore evaluate the same tree with
/// different bindings without coordination.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bindings {
    values: HashMap<String, f64>,
}

impl Bindings {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `value`, consuming and returning the context.
    pub fn with<S: Into<String>>(mut self, name: S, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    /// Binds `name` to `value`, returning the previous value if any.
    pub fn insert<S: Into<String>>(&mut self, name: S, value: f64) -> Option<f64> {
        self.values.insert(name.into(), value)
    }

    /// Removes the binding for `name`.
    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.values.remove(name)
    }

    /// Looks up the value bound to `name`.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(name, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut bindings = Self::new();
        bindings.extend(iter);
        bindings
    }
}

impl<S: Into<String>> Extend<(S, f64)> for Bindings {
    fn extend<I: IntoIterator<Item = (S, f64)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_and_iterator_construction_agree() {
        let built = Bindings::new().with("x", 3.0).with("y", -1.5);
        let collected: Bindings = [("x", 3.0), ("y", -1.5)].into_iter().collect();
        assert_eq!(built, collected);
        assert_eq!(built.get("x"), Some(3.0));
        assert!(built.get("z").is_none());
        assert_eq!(built.len(), 2);
    }

    #[test]
    fn rebinding_replaces_previous_value() {
        let mut bindings = Bindings::new().with("x", 1.0);
        assert_eq!(bindings.insert("x", 2.0), Some(1.0));
        assert_eq!(bindings.get("x"), Some(2.0));
        assert_eq!(bindings.remove("x"), Some(2.0));
        assert!(bindings.is_empty());
    }

    #[test]
    fn serializes_as_plain_map() {
        let bindings = Bindings::new().with("x", 3.0);
        let json = serde_json::to_string(&bindings).unwrap();
        assert_eq!(json, r#"{"x":3.0}"#);
        let back: Bindings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bindings);
    }
}
