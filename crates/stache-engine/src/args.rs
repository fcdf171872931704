/*
 * args.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Argument bindings for a single tag invocation.

use crate::value::Value;
use std::collections::HashMap;

static NULL: Value = Value::Null;

/// Resolved arguments for one tag invocation, keyed by parameter name.
///
/// Built fresh for every invocation. Reading an argument that was not
/// supplied yields [`Value::Null`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: HashMap<String, Value>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Whether the template supplied this argument at all. An argument bound
    /// to a variable that resolved to nothing still counts as supplied.
    pub fn is_supplied(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get(&self, name: &str) -> &Value {
        self.values.get(name).unwrap_or(&NULL)
    }

    /// The argument as an integer, or `None` if absent or not convertible.
    pub fn integer(&self, name: &str) -> Option<i64> {
        self.get(name).as_integer()
    }

    /// The argument rendered as text; absent arguments are empty.
    pub fn text(&self, name: &str) -> String {
        self.get(name).render()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Arguments::new();
        for (name, value) in iter {
            args.insert(name, value);
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_argument_reads_as_null() {
        let args = Arguments::new();
        assert!(args.get("missing").is_null());
        assert!(!args.is_supplied("missing"));
        assert_eq!(args.integer("missing"), None);
        assert_eq!(args.text("missing"), "");
    }

    #[test]
    fn test_supplied_null_is_distinguished() {
        let mut args = Arguments::new();
        args.insert("value", Value::Null);
        assert!(args.is_supplied("value"));
        assert!(args.get("value").is_null());
    }

    #[test]
    fn test_integer_conversion() {
        let args: Arguments = [
            ("count", Value::from("3")),
            ("bad", Value::from("three")),
        ]
        .into_iter()
        .collect();
        assert_eq!(args.integer("count"), Some(3));
        assert_eq!(args.integer("bad"), None);
        assert_eq!(args.len(), 2);
    }
}
