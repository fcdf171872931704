/*
 * inline.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Inline tags: no children, output written in place.

use crate::args::Arguments;
use crate::diagnostics::{INVALID_FORMAT_INPUT, SoftFailures};
use crate::options::LOOP_GUARD;
use crate::param::ParameterDescriptor;
use crate::scope::Scope;
use crate::tag::{InlineTag, TagInfo};
use chrono::format::{Item, StrftimeItems};
use std::fmt;

/// Format used by `now` when none is given or the given one is invalid.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time, formatted with a strftime-style `format`.
pub struct NowTag;

impl TagInfo for NowTag {
    fn name(&self) -> &'static str {
        "now"
    }

    fn parameters(&self) -> &'static [ParameterDescriptor] {
        const PARAMS: &[ParameterDescriptor] = &[ParameterDescriptor::optional("format")];
        PARAMS
    }
}

impl InlineTag for NowTag {
    fn emit_text(
        &self,
        sink: &mut dyn fmt::Write,
        arguments: &Arguments,
        _scope: &Scope<'_>,
        failures: &mut SoftFailures,
    ) -> fmt::Result {
        let requested = arguments.text("format");
        let format = if requested.is_empty() {
            DEFAULT_TIMESTAMP_FORMAT
        } else if StrftimeItems::new(&requested).any(|item| matches!(item, Item::Error)) {
            failures.report(
                INVALID_FORMAT_INPUT,
                format!("invalid timestamp format {requested:?}; using the default"),
            );
            DEFAULT_TIMESTAMP_FORMAT
        } else {
            requested.as_str()
        };
        write!(sink, "{}", chrono::Local::now().format(format))
    }
}

/// A fresh random (v4) UUID.
pub struct GuidTag;

impl TagInfo for GuidTag {
    fn name(&self) -> &'static str {
        "guid"
    }
}

impl InlineTag for GuidTag {
    fn emit_text(
        &self,
        sink: &mut dyn fmt::Write,
        _arguments: &Arguments,
        _scope: &Scope<'_>,
        _failures: &mut SoftFailures,
    ) -> fmt::Result {
        write!(sink, "{}", uuid::Uuid::new_v4())
    }
}

/// A literal tab character.
pub struct TabTag;

impl TagInfo for TabTag {
    fn name(&self) -> &'static str {
        "tab"
    }

    fn is_context_sensitive(&self) -> bool {
        false
    }
}

impl InlineTag for TabTag {
    fn emit_text(
        &self,
        sink: &mut dyn fmt::Write,
        _arguments: &Arguments,
        _scope: &Scope<'_>,
        _failures: &mut SoftFailures,
    ) -> fmt::Result {
        sink.write_char('\t')
    }
}

/// A literal line break.
pub struct LineBreakTag;

impl TagInfo for LineBreakTag {
    fn name(&self) -> &'static str {
        "br"
    }

    fn is_context_sensitive(&self) -> bool {
        false
    }
}

impl InlineTag for LineBreakTag {
    fn emit_text(
        &self,
        sink: &mut dyn fmt::Write,
        _arguments: &Arguments,
        _scope: &Scope<'_>,
        _failures: &mut SoftFailures,
    ) -> fmt::Result {
        sink.write_char('\n')
    }
}

/// `text` repeated `count` times.
pub struct RepeatTag;

impl TagInfo for RepeatTag {
    fn name(&self) -> &'static str {
        "repeat"
    }

    fn parameters(&self) -> &'static [ParameterDescriptor] {
        const PARAMS: &[ParameterDescriptor] = &[
            ParameterDescriptor::required("count").integer(),
            ParameterDescriptor::required("text"),
        ];
        PARAMS
    }

    fn is_context_sensitive(&self) -> bool {
        false
    }
}

impl InlineTag for RepeatTag {
    fn emit_text(
        &self,
        sink: &mut dyn fmt::Write,
        arguments: &Arguments,
        _scope: &Scope<'_>,
        _failures: &mut SoftFailures,
    ) -> fmt::Result {
        let text = arguments.text("text");
        for _ in 0..repeat_count(arguments) {
            sink.write_str(&text)?;
        }
        Ok(())
    }
}

/// `count` spaces.
pub struct SpaceTag;

impl TagInfo for SpaceTag {
    fn name(&self) -> &'static str {
        "space"
    }

    fn parameters(&self) -> &'static [ParameterDescriptor] {
        const PARAMS: &[ParameterDescriptor] = &[ParameterDescriptor::required("count").integer()];
        PARAMS
    }

    fn is_context_sensitive(&self) -> bool {
        false
    }
}

impl InlineTag for SpaceTag {
    fn emit_text(
        &self,
        sink: &mut dyn fmt::Write,
        arguments: &Arguments,
        _scope: &Scope<'_>,
        _failures: &mut SoftFailures,
    ) -> fmt::Result {
        for _ in 0..repeat_count(arguments) {
            sink.write_char(' ')?;
        }
        Ok(())
    }
}

/// Non-positive and unconvertible counts emit nothing.
fn repeat_count(arguments: &Arguments) -> u64 {
    arguments
        .integer("count")
        .and_then(|n| u64::try_from(n).ok())
        .map_or(0, |n| n.min(LOOP_GUARD))
}

/// The `index` bound by the nearest enclosing loop, empty outside loops.
pub struct IndexTag;

impl TagInfo for IndexTag {
    fn name(&self) -> &'static str {
        "index"
    }
}

impl InlineTag for IndexTag {
    fn emit_text(
        &self,
        sink: &mut dyn fmt::Write,
        _arguments: &Arguments,
        scope: &Scope<'_>,
        _failures: &mut SoftFailures,
    ) -> fmt::Result {
        match scope.resolve("index") {
            Some(index) => sink.write_str(&index.render()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    fn emit(tag: &dyn InlineTag, arguments: &Arguments, scope: &Scope<'_>) -> String {
        emit_reporting(tag, arguments, scope).0
    }

    fn emit_reporting(
        tag: &dyn InlineTag,
        arguments: &Arguments,
        scope: &Scope<'_>,
    ) -> (String, Vec<(&'static str, String)>) {
        let mut out = String::new();
        let mut failures = SoftFailures::new();
        tag.emit_text(&mut out, arguments, scope, &mut failures).unwrap();
        (out, failures.into_reported())
    }

    #[test]
    fn test_literals() {
        let scope = Scope::new();
        assert_eq!(emit(&TabTag, &Arguments::new(), &scope), "\t");
        assert_eq!(emit(&LineBreakTag, &Arguments::new(), &scope), "\n");
    }

    #[test]
    fn test_repeat_and_space() {
        let scope = Scope::new();
        let args: Arguments = [("count", Value::from(3)), ("text", Value::from("ab"))]
            .into_iter()
            .collect();
        assert_eq!(emit(&RepeatTag, &args, &scope), "ababab");
        assert_eq!(emit(&SpaceTag, &args, &scope), "   ");
    }

    #[test]
    fn test_repeat_soft_fails_on_bad_count() {
        let scope = Scope::new();
        for count in [Value::from("lots"), Value::from(-2), Value::Null] {
            let args: Arguments = [("count", count), ("text", Value::from("x"))]
                .into_iter()
                .collect();
            assert_eq!(emit(&RepeatTag, &args, &scope), "");
        }
    }

    #[test]
    fn test_now_respects_format() {
        let scope = Scope::new();
        let args: Arguments = [("format", "%Y")].into_iter().collect();
        let year = emit(&NowTag, &args, &scope);
        assert_eq!(year.len(), 4);
        assert!(year.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_now_falls_back_on_invalid_format() {
        let scope = Scope::new();
        let args: Arguments = [("format", "%Q%")].into_iter().collect();
        let (out, failures) = emit_reporting(&NowTag, &args, &scope);
        // "YYYY-MM-DD HH:MM:SS"
        assert_eq!(out.len(), 19);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, INVALID_FORMAT_INPUT);
    }

    #[test]
    fn test_now_valid_format_reports_nothing() {
        let scope = Scope::new();
        let args: Arguments = [("format", "%H:%M")].into_iter().collect();
        let (out, failures) = emit_reporting(&NowTag, &args, &scope);
        assert_eq!(out.len(), 5);
        assert!(failures.is_empty());
    }

    #[test]
    fn test_guid_is_unique() {
        let scope = Scope::new();
        let a = emit(&GuidTag, &Arguments::new(), &scope);
        let b = emit(&GuidTag, &Arguments::new(), &scope);
        assert_eq!(a.len(), 36);
        assert_ne!(a, b);
    }

    #[test]
    fn test_index_reads_context_scope() {
        let root = Scope::new();
        assert_eq!(emit(&IndexTag, &Arguments::new(), &root), "");
        let mut scope = root.child();
        scope.set("index", 4);
        assert_eq!(emit(&IndexTag, &Arguments::new(), &scope), "4");
    }
}
