/*
 * scope.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Scope chains for variable resolution.
//!
//! A [`Scope`] is one frame of named values plus an optional positional
//! value (the current element of an enclosing loop). Frames link to their
//! parent by shared reference, so a child can read everything above it but
//! can never write to it.
//!
//! Rendering threads two independent chains through every call:
//!
//! - the **key scope**, which carries data and positional loop values;
//! - the **context scope**, which carries named bookkeeping values such as
//!   a loop's `index`.

use crate::value::Value;
use std::collections::HashMap;

/// A frame in a scope chain.
#[derive(Debug, Clone, Default)]
pub struct Scope<'p> {
    /// Names bound in this frame.
    values: HashMap<String, Value>,

    /// The current element when this frame was opened by an iteration.
    positional: Option<Value>,

    /// Enclosing frame, read-only.
    parent: Option<&'p Scope<'p>>,
}

impl<'p> Scope<'p> {
    /// Create an empty root scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a root scope whose positional value is `value`.
    ///
    /// When `value` is a map its fields resolve as names, so the data for a
    /// whole render can be installed this way.
    pub fn with_positional(value: Value) -> Self {
        Self {
            positional: Some(value),
            ..Self::default()
        }
    }

    /// Create a child scope with an empty local frame.
    pub fn child(&self) -> Scope<'_> {
        Scope {
            values: HashMap::new(),
            positional: None,
            parent: Some(self),
        }
    }

    /// Create a child scope that carries `value` as its positional value.
    pub fn child_with(&self, value: Value) -> Scope<'_> {
        Scope {
            values: HashMap::new(),
            positional: Some(value),
            parent: Some(self),
        }
    }

    /// Bind a name in this frame. Ancestor frames are never touched.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Resolve a single name, walking from this frame to the root.
    ///
    /// Within a frame, local names win over fields of the positional value.
    /// The name `.` resolves to the nearest positional value. Returns `None`
    /// when no frame binds the name.
    pub fn resolve(&self, name: &str) -> Option<&Value> {
        self.frames().find_map(|frame| frame.lookup_local(name))
    }

    /// Resolve a dotted path such as `employee.salary`.
    ///
    /// The first segment is resolved through the chain, the remaining
    /// segments descend into map fields.
    pub fn resolve_path(&self, path: &str) -> Option<&Value> {
        if path == "." {
            return self.positional();
        }
        let mut segments = path.split('.');
        let head = segments.next()?;
        let rest: Vec<&str> = segments.collect();
        self.resolve(head).and_then(|v| v.get_path(&rest))
    }

    /// The nearest positional value in the chain.
    pub fn positional(&self) -> Option<&Value> {
        self.frames().find_map(|frame| frame.positional.as_ref())
    }

    fn lookup_local(&self, name: &str) -> Option<&Value> {
        if name == "." {
            return self.positional.as_ref();
        }
        self.values.get(name).or_else(|| match &self.positional {
            Some(Value::Map(fields)) => fields.get(name),
            _ => None,
        })
    }

    fn frames(&self) -> impl Iterator<Item = &Scope<'p>> {
        std::iter::successors(Some(self), |scope| scope.parent)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Scope<'_> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut scope = Scope::new();
        for (name, value) in iter {
            scope.set(name, value);
        }
        scope
    }
}
