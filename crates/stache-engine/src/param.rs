/*
 * param.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Parameter descriptors declared by tag definitions.

/// How the renderer checks an argument before the tag sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    /// Any value is accepted.
    Any,
    /// The argument must convert to an integer (see [`Value::as_integer`]).
    ///
    /// [`Value::as_integer`]: crate::value::Value::as_integer
    Integer,
}

/// A named input a tag accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterDescriptor {
    pub name: &'static str,
    /// Required parameters must be supplied by the template; a missing one
    /// fails the render before the tag runs.
    pub required: bool,
    pub kind: ParameterKind,
}

impl ParameterDescriptor {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
            kind: ParameterKind::Any,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            kind: ParameterKind::Any,
        }
    }

    /// Mark this parameter as integer-valued.
    pub const fn integer(self) -> Self {
        Self {
            kind: ParameterKind::Integer,
            ..self
        }
    }
}
