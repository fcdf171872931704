/*
 * nested.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Nested rendering contexts.
//!
//! When a content tag opens its block it yields one [`NestedContext`] per
//! pass over its children: one for a transform like `upper`, many for a
//! loop, none for a loop with no iterations. Each context says where the
//! children render and which scopes they see.

use crate::scope::Scope;

/// Where a child render pass writes its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildSink {
    /// Straight into the sink the tag itself is writing to.
    Current,
    /// Into a fresh buffer owned by the pass. The buffer is flushed to the
    /// parent sink (after consolidation, if requested) and then dropped.
    Buffer(String),
}

/// Everything the renderer needs for one pass over a tag's children.
#[derive(Debug)]
pub struct NestedContext<'a> {
    pub target: ChildSink,
    pub key_scope: Scope<'a>,
    pub context_scope: Scope<'a>,
    /// Run the tag's `consolidate` over the buffered text before it is
    /// merged upward. Only meaningful with [`ChildSink::Buffer`].
    pub needs_consolidation: bool,
}

impl<'a> NestedContext<'a> {
    /// A pass that captures its output for consolidation.
    pub fn buffered(key_scope: Scope<'a>, context_scope: Scope<'a>) -> Self {
        Self {
            target: ChildSink::Buffer(String::new()),
            key_scope,
            context_scope,
            needs_consolidation: true,
        }
    }

    /// A pass that writes directly to the current sink.
    pub fn direct(key_scope: Scope<'a>, context_scope: Scope<'a>) -> Self {
        Self {
            target: ChildSink::Current,
            key_scope,
            context_scope,
            needs_consolidation: false,
        }
    }
}
