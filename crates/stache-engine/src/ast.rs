/*
 * ast.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template tree types.
//!
//! A [`Template`] is a pre-built tree of literal text, variable references
//! and tag nodes. Trees are built in code with the constructors below or
//! deserialized from JSON:
//!
//! ```json
//! [
//!   {"type": "text", "text": "Hello, "},
//!   {"type": "tag", "name": "upper", "children": [
//!     {"type": "variable", "path": "name"}
//!   ]}
//! ]
//! ```

use crate::error::RenderResult;
use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A compiled template ready for evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Template {
    pub(crate) nodes: Vec<TemplateNode>,
}

impl Template {
    pub fn new(nodes: Vec<TemplateNode>) -> Self {
        Self { nodes }
    }

    /// Load a template tree from its JSON form.
    pub fn from_json_str(source: &str) -> RenderResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn nodes(&self) -> &[TemplateNode] {
        &self.nodes
    }
}

/// A node in the template tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TemplateNode {
    /// Literal text to be output as-is.
    Text(Literal),

    /// Variable interpolation.
    Variable(VariableRef),

    /// A tag invocation.
    Tag(TagNode),
}

impl TemplateNode {
    pub fn text(text: impl Into<String>) -> Self {
        TemplateNode::Text(Literal { text: text.into() })
    }

    pub fn variable(path: impl Into<String>) -> Self {
        TemplateNode::Variable(VariableRef::new(path))
    }
}

impl From<TagNode> for TemplateNode {
    fn from(node: TagNode) -> Self {
        TemplateNode::Tag(node)
    }
}

/// Literal text node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    pub text: String,
}

/// A reference to a variable.
///
/// `path` is dotted (`employee.salary`). A leading `@` resolves against the
/// context scope instead of the key scope (`@index`), and `.` is the
/// current positional value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableRef {
    pub path: String,
}

impl VariableRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Where a tag argument's value comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Argument {
    /// A literal value written in the template.
    Value(Value),
    /// A variable path resolved at render time, same syntax as
    /// [`VariableRef::path`].
    Var(String),
}

impl Argument {
    pub fn value(value: impl Into<Value>) -> Self {
        Argument::Value(value.into())
    }

    pub fn var(path: impl Into<String>) -> Self {
        Argument::Var(path.into())
    }
}

/// A tag invocation with its arguments and child blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagNode {
    pub name: String,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub arguments: IndexMap<String, Argument>,

    /// The primary block.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TemplateNode>,

    /// The else block; only condition tags render it.
    #[serde(default, rename = "else", skip_serializing_if = "Vec::is_empty")]
    pub else_children: Vec<TemplateNode>,
}

impl TagNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: IndexMap::new(),
            children: Vec::new(),
            else_children: Vec::new(),
        }
    }

    pub fn arg(mut self, name: impl Into<String>, argument: Argument) -> Self {
        self.arguments.insert(name.into(), argument);
        self
    }

    pub fn children(mut self, children: Vec<TemplateNode>) -> Self {
        self.children = children;
        self
    }

    pub fn otherwise(mut self, children: Vec<TemplateNode>) -> Self {
        self.else_children = children;
        self
    }
}
