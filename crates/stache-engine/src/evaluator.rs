/*
 * evaluator.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template evaluation engine.
//!
//! The [`Renderer`] walks a template tree depth-first in document order.
//! For each tag node it:
//!
//! 1. binds the node's arguments against the current scopes,
//! 2. dispatches on the tag's strategy,
//! 3. renders child blocks (content and condition tags),
//! 4. consolidates buffered output (content tags that ask for it),
//! 5. emits the result into the parent sink.
//!
//! Rendering is synchronous and single-threaded. A registry can be shared by
//! many renders at once; each render owns its scopes and buffers.

use crate::args::Arguments;
use crate::ast::{Argument, TagNode, Template, TemplateNode};
use crate::diagnostics::{
    ARGUMENT_CONVERSION, Diagnostic, DiagnosticCollector, ITERATION_CAP_REACHED,
    MISSING_CHILD_CONTEXT_PARAMETER, SoftFailures,
};
use crate::error::{RenderError, RenderResult};
use crate::nested::{ChildSink, NestedContext};
use crate::options::RenderOptions;
use crate::param::ParameterKind;
use crate::registry::TagRegistry;
use crate::scope::Scope;
use crate::tag::{ContentTag, Tag, TagInfo};
use crate::value::Value;
use std::fmt::Write;
use tracing::{debug, trace, warn};

impl Template {
    /// Render this template against `data` with the given registry and
    /// default options.
    pub fn render(&self, registry: &TagRegistry, data: &Value) -> RenderResult<String> {
        Renderer::new(registry).render(self, data)
    }
}

/// Renders templates using the tags of one registry.
#[derive(Debug, Clone)]
pub struct Renderer<'r> {
    registry: &'r TagRegistry,
    options: RenderOptions,
}

impl<'r> Renderer<'r> {
    pub fn new(registry: &'r TagRegistry) -> Self {
        Self {
            registry,
            options: RenderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Enable or disable strict mode.
    ///
    /// In strict mode, soft failures are treated as errors.
    pub fn with_strict_mode(mut self, strict: bool) -> Self {
        self.options.strict = strict;
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render to a string, discarding diagnostics.
    pub fn render(&self, template: &Template, data: &Value) -> RenderResult<String> {
        self.render_with_diagnostics(template, data)
            .map(|(output, _)| output)
    }

    /// Render to a string and return the diagnostics raised along the way.
    pub fn render_with_diagnostics(
        &self,
        template: &Template,
        data: &Value,
    ) -> RenderResult<(String, Vec<Diagnostic>)> {
        let mut output = String::new();
        let diagnostics = self.render_to(template, data, &mut output)?;
        Ok((output, diagnostics))
    }

    /// Render into `sink`.
    ///
    /// The whole tree is validated first, so unknown tags and missing
    /// required parameters fail before anything is written.
    pub fn render_to(
        &self,
        template: &Template,
        data: &Value,
        sink: &mut dyn Write,
    ) -> RenderResult<Vec<Diagnostic>> {
        self.validate(template)?;

        let key_scope = Scope::with_positional(data.clone());
        let context_scope = Scope::new();
        let mut state = EvalState::new(&self.options);

        self.render_nodes(&template.nodes, sink, &key_scope, &context_scope, &mut state)?;
        Ok(state.diagnostics.into_diagnostics())
    }

    /// Check that every tag in the tree is registered and is given all of
    /// its required parameters.
    pub fn validate(&self, template: &Template) -> RenderResult<()> {
        validate_nodes(self.registry, &template.nodes)
    }

    fn render_nodes(
        &self,
        nodes: &[TemplateNode],
        sink: &mut dyn Write,
        key_scope: &Scope<'_>,
        context_scope: &Scope<'_>,
        state: &mut EvalState<'_>,
    ) -> RenderResult<()> {
        for node in nodes {
            self.render_node(node, sink, key_scope, context_scope, state)?;
        }
        Ok(())
    }

    fn render_node(
        &self,
        node: &TemplateNode,
        sink: &mut dyn Write,
        key_scope: &Scope<'_>,
        context_scope: &Scope<'_>,
        state: &mut EvalState<'_>,
    ) -> RenderResult<()> {
        match node {
            TemplateNode::Text(literal) => sink.write_str(&literal.text)?,
            TemplateNode::Variable(var) => {
                if let Some(value) = resolve_reference(&var.path, key_scope, context_scope) {
                    sink.write_str(&value.render())?;
                }
            }
            TemplateNode::Tag(tag_node) => {
                self.render_tag(tag_node, sink, key_scope, context_scope, state)?
            }
        }
        Ok(())
    }

    fn render_tag(
        &self,
        node: &TagNode,
        sink: &mut dyn Write,
        key_scope: &Scope<'_>,
        context_scope: &Scope<'_>,
        state: &mut EvalState<'_>,
    ) -> RenderResult<()> {
        let tag = self
            .registry
            .get(&node.name)
            .ok_or_else(|| RenderError::UnknownTag {
                name: node.name.clone(),
            })?;

        let arguments = bind_arguments(tag, node, key_scope, context_scope, state)?;
        trace!(tag = tag.name(), "arguments resolved");

        if state.depth >= self.options.max_depth {
            return Err(RenderError::NestingTooDeep {
                tag: node.name.clone(),
                max_depth: self.options.max_depth,
            });
        }
        state.depth += 1;

        debug!(
            tag = tag.name(),
            kind = tag.kind(),
            context_sensitive = tag.is_context_sensitive(),
            "dispatching tag"
        );
        let result = match tag {
            Tag::Inline(inline) => {
                let mut failures = SoftFailures::new();
                inline.emit_text(sink, &arguments, context_scope, &mut failures)?;
                state.report(failures, tag.name())
            }
            Tag::Condition(condition) => {
                let primary = condition.should_render_primary(&arguments);
                trace!(tag = tag.name(), primary, "condition decided");
                let branch = if primary {
                    &node.children
                } else {
                    &node.else_children
                };
                self.render_nodes(branch, sink, key_scope, context_scope, state)
            }
            Tag::Content(content) => self.render_content(
                &**content,
                node,
                &arguments,
                sink,
                key_scope,
                context_scope,
                state,
            ),
        };

        state.depth -= 1;
        trace!(tag = tag.name(), "emitted");
        result
    }

    fn render_content(
        &self,
        tag: &dyn ContentTag,
        node: &TagNode,
        arguments: &Arguments,
        sink: &mut dyn Write,
        key_scope: &Scope<'_>,
        context_scope: &Scope<'_>,
        state: &mut EvalState<'_>,
    ) -> RenderResult<()> {
        for param in tag.child_context_parameters() {
            let value = arguments.get(param.name);
            if value.is_null() {
                return state.soft_fail(
                    MISSING_CHILD_CONTEXT_PARAMETER,
                    format!("parameter `{}` is null; block skipped", param.name),
                    tag.name(),
                );
            }
            // Already reported as a conversion failure when arguments were bound.
            if param.kind == ParameterKind::Integer && value.as_integer().is_none() {
                trace!(tag = tag.name(), param = param.name, "unusable loop bound");
                return Ok(());
            }
        }

        let cap = self.options.effective_iteration_cap();
        let mut passes: u64 = 0;

        for nested in tag.open_child_contexts(key_scope, arguments, context_scope) {
            if passes == cap {
                state.soft_fail(
                    ITERATION_CAP_REACHED,
                    format!("stopped after {cap} iterations"),
                    tag.name(),
                )?;
                break;
            }
            passes += 1;

            let NestedContext {
                target,
                key_scope: child_keys,
                context_scope: child_context,
                needs_consolidation,
            } = nested;

            match target {
                ChildSink::Current => {
                    self.render_nodes(&node.children, sink, &child_keys, &child_context, state)?
                }
                ChildSink::Buffer(mut buffer) => {
                    self.render_nodes(
                        &node.children,
                        &mut buffer,
                        &child_keys,
                        &child_context,
                        state,
                    )?;
                    trace!(tag = tag.name(), bytes = buffer.len(), "children rendered");
                    let text = if needs_consolidation {
                        let mut failures = SoftFailures::new();
                        let text = tag.consolidate(buffer, arguments, &mut failures);
                        state.report(failures, tag.name())?;
                        text
                    } else {
                        buffer
                    };
                    sink.write_str(&text)?;
                }
            }
        }

        trace!(tag = tag.name(), passes, "content rendered");
        Ok(())
    }
}

/// Per-render mutable state.
struct EvalState<'o> {
    options: &'o RenderOptions,
    diagnostics: DiagnosticCollector,
    depth: usize,
}

impl<'o> EvalState<'o> {
    fn new(options: &'o RenderOptions) -> Self {
        Self {
            options,
            diagnostics: DiagnosticCollector::new(),
            depth: 0,
        }
    }

    /// Record a soft failure, or fail the render in strict mode.
    fn soft_fail(&mut self, code: &'static str, message: String, tag: &str) -> RenderResult<()> {
        if self.options.strict {
            return Err(RenderError::Strict {
                tag: tag.to_string(),
                message,
            });
        }
        warn!(tag, code, "{}", message);
        self.diagnostics.warn_with_code(code, message, tag);
        Ok(())
    }

    /// Pass each failure a tag reported through [`Self::soft_fail`].
    fn report(&mut self, failures: SoftFailures, tag: &str) -> RenderResult<()> {
        for (code, message) in failures.into_reported() {
            self.soft_fail(code, message, tag)?;
        }
        Ok(())
    }
}

/// Resolve a variable path: `@name` against the context scope, anything else
/// against the key scope.
fn resolve_reference<'s>(
    path: &str,
    key_scope: &'s Scope<'_>,
    context_scope: &'s Scope<'_>,
) -> Option<&'s Value> {
    match path.strip_prefix('@') {
        Some(context_path) => context_scope.resolve_path(context_path),
        None => key_scope.resolve_path(path),
    }
}

fn bind_arguments(
    tag: &Tag,
    node: &TagNode,
    key_scope: &Scope<'_>,
    context_scope: &Scope<'_>,
    state: &mut EvalState<'_>,
) -> RenderResult<Arguments> {
    let mut arguments = Arguments::new();
    for (name, source) in &node.arguments {
        let value = match source {
            Argument::Value(value) => value.clone(),
            Argument::Var(path) => resolve_reference(path, key_scope, context_scope)
                .cloned()
                .unwrap_or_default(),
        };
        arguments.insert(name.clone(), value);
    }

    for param in tag.parameters() {
        if param.required && !arguments.is_supplied(param.name) {
            return Err(missing_parameter(tag, param.name));
        }
        let value = arguments.get(param.name);
        if param.kind == ParameterKind::Integer && !value.is_null() && value.as_integer().is_none()
        {
            state.soft_fail(
                ARGUMENT_CONVERSION,
                format!(
                    "argument `{}` is not an integer: {:?}",
                    param.name,
                    value.render()
                ),
                tag.name(),
            )?;
        }
    }

    Ok(arguments)
}

fn missing_parameter(tag: &Tag, parameter: &str) -> RenderError {
    RenderError::MissingParameter {
        tag: tag.name().to_string(),
        parameter: parameter.to_string(),
    }
}

fn validate_nodes(registry: &TagRegistry, nodes: &[TemplateNode]) -> RenderResult<()> {
    for node in nodes {
        if let TemplateNode::Tag(tag_node) = node {
            let tag = registry
                .get(&tag_node.name)
                .ok_or_else(|| RenderError::UnknownTag {
                    name: tag_node.name.clone(),
                })?;
            if let Some(param) = tag
                .parameters()
                .iter()
                .find(|p| p.required && !tag_node.arguments.contains_key(p.name))
            {
                return Err(missing_parameter(tag, param.name));
            }
            validate_nodes(registry, &tag_node.children)?;
            validate_nodes(registry, &tag_node.else_children)?;
        }
    }
    Ok(())
}
