/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Evaluation engine for stache tag templates.
//!
//! A template is a tree of literal text, variable references and tag nodes.
//! This crate walks that tree against a data value and writes the output in
//! document order. It supports:
//!
//! - Variable references resolved through a chain of scopes: `name`,
//!   `employee.salary`, `.` for the current element, `@index` for loop state
//! - Inline tags that write text in place: `now`, `guid`, `repeat`
//! - Content tags that render their children into a buffer and rewrite the
//!   result: `upper`, `trim`, `md5`, `formatnumber`
//! - Loop tags that render their children once per element: `for`, `each`
//! - Condition tags with an else block: `eq`, `lt`, `any`, `isnullorempty`
//!
//! # Architecture
//!
//! There is no surface syntax here. Templates are built in code or
//! deserialized from JSON ([`Template::from_json_str`]). Tags live in a
//! [`TagRegistry`]; custom tags implement [`TagInfo`] plus one of
//! [`InlineTag`], [`ContentTag`] or [`ConditionTag`].
//!
//! # Example
//!
//! ```ignore
//! use stache_engine::{TagNode, TagRegistry, Template, TemplateNode, Value};
//!
//! let registry = TagRegistry::with_builtins();
//! let template = Template::new(vec![
//!     TemplateNode::text("Hello, "),
//!     TagNode::new("upper")
//!         .children(vec![TemplateNode::variable("name")])
//!         .into(),
//! ]);
//!
//! let data = Value::from(serde_json::json!({"name": "World"}));
//! let output = template.render(&registry, &data)?;
//! assert_eq!(output, "Hello, WORLD");
//! ```

pub mod args;
pub mod ast;
pub mod diagnostics;
pub mod error;
pub mod evaluator;
pub mod nested;
pub mod options;
pub mod param;
pub mod registry;
pub mod scope;
pub mod tag;
pub mod tags;
pub mod value;

// Re-export main types at crate root
pub use args::Arguments;
pub use ast::{Argument, Literal, TagNode, Template, TemplateNode, VariableRef};
pub use diagnostics::{Diagnostic, DiagnosticCollector, SoftFailures};
pub use error::{RenderError, RenderResult};
pub use evaluator::Renderer;
pub use nested::{ChildSink, NestedContext};
pub use options::{LOOP_GUARD, RenderOptions};
pub use param::{ParameterDescriptor, ParameterKind};
pub use registry::TagRegistry;
pub use scope::Scope;
pub use tag::{ConditionTag, ContentTag, InlineTag, Tag, TagInfo};
pub use value::Value;
