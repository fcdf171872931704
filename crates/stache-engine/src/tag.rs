/*
 * tag.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Tag definitions.
//!
//! A tag is a stateless, shareable unit of behavior. Every tag answers the
//! questions in [`TagInfo`] and then implements exactly one of three
//! evaluation strategies:
//!
//! - [`InlineTag`]: writes text directly to the current sink (`now`, `tab`).
//! - [`ContentTag`]: renders its children into nested contexts and, for
//!   transforms, rewrites the fully rendered text (`upper`, `md5`, `for`).
//! - [`ConditionTag`]: picks the primary or the else block (`eq`, `any`).
//!
//! The strategies are closed over by [`Tag`], which is what the registry
//! stores and the renderer dispatches on.

use crate::args::Arguments;
use crate::diagnostics::SoftFailures;
use crate::nested::NestedContext;
use crate::param::ParameterDescriptor;
use crate::scope::Scope;
use std::fmt;
use std::sync::Arc;

/// Metadata common to every tag.
pub trait TagInfo: Send + Sync {
    /// Unique name the tag is registered under.
    fn name(&self) -> &'static str;

    /// Parameters the tag accepts.
    fn parameters(&self) -> &'static [ParameterDescriptor] {
        &[]
    }

    /// Whether the output depends on ambient state (scopes, clock, random
    /// ids) rather than only on the tag's own arguments.
    fn is_context_sensitive(&self) -> bool {
        true
    }

    /// Parameters that must hold a value before child contexts can be
    /// opened. When one of them is null the block renders nothing.
    fn child_context_parameters(&self) -> &'static [ParameterDescriptor] {
        &[]
    }
}

/// A tag with no children that emits text in place.
pub trait InlineTag: TagInfo {
    /// Write this tag's output to `sink`. `scope` is the context scope.
    /// Unusable arguments are reported to `failures` and the tag writes its
    /// fallback output.
    fn emit_text(
        &self,
        sink: &mut dyn fmt::Write,
        arguments: &Arguments,
        scope: &Scope<'_>,
        failures: &mut SoftFailures,
    ) -> fmt::Result;
}

/// A tag that wraps a region of the template.
pub trait ContentTag: TagInfo {
    /// Open the contexts the tag's children render in, lazily.
    ///
    /// The iterator need not end on its own: the renderer stops pulling at
    /// its iteration cap and reports that it did. The default opens a single
    /// buffered context with fresh child scopes, which is what every text
    /// transform wants.
    fn open_child_contexts<'a>(
        &self,
        key_scope: &'a Scope<'a>,
        _arguments: &Arguments,
        context_scope: &'a Scope<'a>,
    ) -> Box<dyn Iterator<Item = NestedContext<'a>> + 'a> {
        Box::new(std::iter::once(NestedContext::buffered(
            key_scope.child(),
            context_scope.child(),
        )))
    }

    /// Turn the complete buffered output of one child pass into the text
    /// written to the parent sink. Soft failures go to `failures`.
    fn consolidate(
        &self,
        text: String,
        _arguments: &Arguments,
        _failures: &mut SoftFailures,
    ) -> String {
        text
    }
}

/// A tag that chooses between its primary block and its else block.
pub trait ConditionTag: TagInfo {
    fn should_render_primary(&self, arguments: &Arguments) -> bool;
}

/// A registered tag, tagged by evaluation strategy.
#[derive(Clone)]
pub enum Tag {
    Inline(Arc<dyn InlineTag>),
    Content(Arc<dyn ContentTag>),
    Condition(Arc<dyn ConditionTag>),
}

impl Tag {
    pub fn inline(tag: impl InlineTag + 'static) -> Self {
        Tag::Inline(Arc::new(tag))
    }

    pub fn content(tag: impl ContentTag + 'static) -> Self {
        Tag::Content(Arc::new(tag))
    }

    pub fn condition(tag: impl ConditionTag + 'static) -> Self {
        Tag::Condition(Arc::new(tag))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tag::Inline(t) => t.name(),
            Tag::Content(t) => t.name(),
            Tag::Condition(t) => t.name(),
        }
    }

    pub fn parameters(&self) -> &'static [ParameterDescriptor] {
        match self {
            Tag::Inline(t) => t.parameters(),
            Tag::Content(t) => t.parameters(),
            Tag::Condition(t) => t.parameters(),
        }
    }

    pub fn is_context_sensitive(&self) -> bool {
        match self {
            Tag::Inline(t) => t.is_context_sensitive(),
            Tag::Content(t) => t.is_context_sensitive(),
            Tag::Condition(t) => t.is_context_sensitive(),
        }
    }

    pub fn child_context_parameters(&self) -> &'static [ParameterDescriptor] {
        match self {
            Tag::Inline(t) => t.child_context_parameters(),
            Tag::Content(t) => t.child_context_parameters(),
            Tag::Condition(t) => t.child_context_parameters(),
        }
    }

    /// Short label for the evaluation strategy, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Tag::Inline(_) => "inline",
            Tag::Content(_) => "content",
            Tag::Condition(_) => "condition",
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tag")
            .field("kind", &self.kind())
            .field("name", &self.name())
            .finish()
    }
}
