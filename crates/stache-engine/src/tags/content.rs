/*
 * content.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Content tags that transform the rendered text of their children.
//!
//! Each of these captures the complete output of its block into a buffer
//! and rewrites it in one go. None of them stream: `md5` or `trim` over a
//! partial fragment would be meaningless.

use crate::args::Arguments;
use crate::diagnostics::{ARGUMENT_CONVERSION, INVALID_FORMAT_INPUT, SoftFailures};
use crate::param::ParameterDescriptor;
use crate::tag::{ContentTag, TagInfo};

/// A content tag defined by a pure function of the buffered text.
pub struct TextTransformTag {
    name: &'static str,
    parameters: &'static [ParameterDescriptor],
    transform: fn(&str, &Arguments, &mut SoftFailures) -> String,
}

impl TextTransformTag {
    pub const fn new(
        name: &'static str,
        parameters: &'static [ParameterDescriptor],
        transform: fn(&str, &Arguments, &mut SoftFailures) -> String,
    ) -> Self {
        Self {
            name,
            parameters,
            transform,
        }
    }
}

impl TagInfo for TextTransformTag {
    fn name(&self) -> &'static str {
        self.name
    }

    fn parameters(&self) -> &'static [ParameterDescriptor] {
        self.parameters
    }
}

impl ContentTag for TextTransformTag {
    fn consolidate(
        &self,
        text: String,
        arguments: &Arguments,
        failures: &mut SoftFailures,
    ) -> String {
        (self.transform)(&text, arguments, failures)
    }
}

const NO_PARAMS: &[ParameterDescriptor] = &[];
const LENGTH: &[ParameterDescriptor] = &[ParameterDescriptor::required("length").integer()];
const START_LENGTH: &[ParameterDescriptor] = &[
    ParameterDescriptor::required("start").integer(),
    ParameterDescriptor::optional("length").integer(),
];
const DECIMALS: &[ParameterDescriptor] = &[ParameterDescriptor::optional("decimals").integer()];

/// Decimal places used by `formatnumber` when none are given.
pub const DEFAULT_DECIMALS: usize = 2;

/// The built-in text transforms.
pub fn transform_tags() -> Vec<TextTransformTag> {
    vec![
        TextTransformTag::new("raw", NO_PARAMS, |text, _, _| text.to_string()),
        TextTransformTag::new("upper", NO_PARAMS, |text, _, _| text.to_uppercase()),
        TextTransformTag::new("lower", NO_PARAMS, |text, _, _| text.to_lowercase()),
        TextTransformTag::new("capitalize", NO_PARAMS, |text, _, _| {
            stache_text::capitalize(text)
        }),
        TextTransformTag::new("trim", NO_PARAMS, |text, _, _| text.trim().to_string()),
        TextTransformTag::new("trimstart", NO_PARAMS, |text, _, _| {
            text.trim_start().to_string()
        }),
        TextTransformTag::new("trimend", NO_PARAMS, |text, _, _| text.trim_end().to_string()),
        TextTransformTag::new("left", LENGTH, left),
        TextTransformTag::new("right", LENGTH, right),
        TextTransformTag::new("mid", START_LENGTH, mid),
        TextTransformTag::new("htmldecode", NO_PARAMS, |text, _, _| {
            stache_text::html_decode(text)
        }),
        TextTransformTag::new("htmlencode", NO_PARAMS, |text, _, _| {
            stache_text::html_encode(text)
        }),
        TextTransformTag::new("urldecode", NO_PARAMS, |text, _, _| {
            stache_text::url_decode(text)
        }),
        TextTransformTag::new("urlencode", NO_PARAMS, |text, _, _| {
            stache_text::url_encode(text)
        }),
        TextTransformTag::new("md5", NO_PARAMS, |text, _, _| stache_text::md5_hex(text)),
        TextTransformTag::new("sha256", NO_PARAMS, |text, _, _| stache_text::sha256_hex(text)),
        TextTransformTag::new("formatnumber", DECIMALS, format_number),
        TextTransformTag::new("removeaccents", NO_PARAMS, |text, _, _| {
            stache_text::normalize_accents(text)
        }),
        TextTransformTag::new("removeblanklines", NO_PARAMS, |text, _, _| {
            stache_text::remove_blank_lines(text)
        }),
        TextTransformTag::new("removenonascii", NO_PARAMS, |text, _, _| {
            stache_text::remove_non_ascii(text)
        }),
    ]
}

/// A non-negative integer argument.
///
/// Values that are not integers were already reported when the arguments
/// were bound; a negative count is reported here.
fn char_count(arguments: &Arguments, name: &str, failures: &mut SoftFailures) -> Option<usize> {
    let n = arguments.integer(name)?;
    match usize::try_from(n) {
        Ok(count) => Some(count),
        Err(_) => {
            failures.report(
                ARGUMENT_CONVERSION,
                format!("parameter `{name}` must not be negative, got {n}"),
            );
            None
        }
    }
}

/// First `length` characters.
fn left(text: &str, arguments: &Arguments, failures: &mut SoftFailures) -> String {
    match char_count(arguments, "length", failures) {
        Some(length) => text.chars().take(length).collect(),
        None => String::new(),
    }
}

/// Last `length` characters.
fn right(text: &str, arguments: &Arguments, failures: &mut SoftFailures) -> String {
    match char_count(arguments, "length", failures) {
        Some(length) => {
            let total = text.chars().count();
            text.chars().skip(total.saturating_sub(length)).collect()
        }
        None => String::new(),
    }
}

/// `length` characters starting at the zero-based `start`, or everything
/// from `start` when no length is given.
fn mid(text: &str, arguments: &Arguments, failures: &mut SoftFailures) -> String {
    let Some(start) = char_count(arguments, "start", failures) else {
        return String::new();
    };
    let chars = text.chars().skip(start);
    if arguments.get("length").is_null() {
        return chars.collect();
    }
    match char_count(arguments, "length", failures) {
        Some(length) => chars.take(length).collect(),
        None => String::new(),
    }
}

fn format_number(text: &str, arguments: &Arguments, failures: &mut SoftFailures) -> String {
    let decimals = if arguments.get("decimals").is_null() {
        DEFAULT_DECIMALS
    } else {
        match char_count(arguments, "decimals", failures) {
            Some(decimals) if decimals <= stache_text::MAX_DECIMAL_PLACES => decimals,
            Some(decimals) => {
                failures.report(
                    ARGUMENT_CONVERSION,
                    format!(
                        "{decimals} decimal places requested, at most {} allowed",
                        stache_text::MAX_DECIMAL_PLACES
                    ),
                );
                return String::new();
            }
            None => return String::new(),
        }
    };
    match stache_text::try_format_number(text, decimals) {
        Some(formatted) => formatted,
        None => {
            failures.report(INVALID_FORMAT_INPUT, format!("{text:?} is not a number"));
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    fn tag(name: &str) -> TextTransformTag {
        transform_tags()
            .into_iter()
            .find(|t| t.name() == name)
            .unwrap_or_else(|| panic!("no transform named {name}"))
    }

    fn apply(name: &str, text: &str, args: &[(&str, Value)]) -> String {
        apply_reporting(name, text, args).0
    }

    /// Apply a transform and return its output with the codes it reported.
    fn apply_reporting(
        name: &str,
        text: &str,
        args: &[(&str, Value)],
    ) -> (String, Vec<&'static str>) {
        let arguments: Arguments = args.iter().cloned().collect();
        let mut failures = SoftFailures::new();
        let out = tag(name).consolidate(text.to_string(), &arguments, &mut failures);
        let codes = failures.into_reported().into_iter().map(|(code, _)| code).collect();
        (out, codes)
    }

    #[test]
    fn test_raw_is_identity() {
        assert_eq!(apply("raw", "abc", &[]), "abc");
        assert_eq!(apply("raw", "  spaced\n", &[]), "  spaced\n");
    }

    #[test]
    fn test_case_folding() {
        assert_eq!(apply("upper", "Straße", &[]), "STRASSE");
        assert_eq!(apply("lower", "ÀBC", &[]), "àbc");
        assert_eq!(apply("capitalize", "word", &[]), "Word");
    }

    #[test]
    fn test_trimming() {
        assert_eq!(apply("trim", "  x  ", &[]), "x");
        assert_eq!(apply("trimstart", "  x  ", &[]), "x  ");
        assert_eq!(apply("trimend", "  x  ", &[]), "  x");
    }

    #[test]
    fn test_substrings() {
        let len = |n: i64| vec![("length", Value::from(n))];
        assert_eq!(apply("left", "héllo", &len(2)), "hé");
        assert_eq!(apply("left", "abc", &len(10)), "abc");
        assert_eq!(apply("right", "héllo", &len(3)), "llo");
        assert_eq!(apply("right", "abc", &len(10)), "abc");
        assert_eq!(
            apply("mid", "abcdef", &[("start", Value::from(2)), ("length", Value::from(3))]),
            "cde"
        );
        assert_eq!(apply("mid", "abcdef", &[("start", Value::from(4))]), "ef");
        assert_eq!(apply("mid", "abc", &[("start", Value::from(9))]), "");
    }

    #[test]
    fn test_substrings_soft_fail() {
        assert_eq!(apply("left", "abc", &[("length", Value::from("two"))]), "");
        assert_eq!(apply("right", "abc", &[("length", Value::from(-1))]), "");
        assert_eq!(apply("mid", "abc", &[]), "");
        assert_eq!(
            apply("mid", "abc", &[("start", Value::from(0)), ("length", Value::from("x"))]),
            ""
        );
    }

    #[test]
    fn test_negative_lengths_are_reported() {
        assert_eq!(
            apply_reporting("right", "abc", &[("length", Value::from(-1))]),
            (String::new(), vec![ARGUMENT_CONVERSION])
        );
        assert_eq!(
            apply_reporting("mid", "abc", &[("start", Value::from(-2))]),
            (String::new(), vec![ARGUMENT_CONVERSION])
        );
        // Unconvertible values are reported when arguments are bound, not here.
        assert_eq!(
            apply_reporting("left", "abc", &[("length", Value::from("two"))]),
            (String::new(), vec![])
        );
    }

    #[test]
    fn test_encodings_and_digests() {
        assert_eq!(apply("htmldecode", "&lt;p&gt;", &[]), "<p>");
        assert_eq!(apply("htmlencode", "<p>", &[]), "&lt;p&gt;");
        assert_eq!(apply("urldecode", "a+b%21", &[]), "a b!");
        assert_eq!(apply("urlencode", "a b!", &[]), "a+b%21");
        assert_eq!(apply("md5", "abc", &[]), "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(apply("sha256", "abc", &[]).len(), 64);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(apply("formatnumber", "1234.5", &[]), "1,234.50");
        assert_eq!(
            apply("formatnumber", "1234.6", &[("decimals", Value::from(0))]),
            "1,235"
        );
        assert_eq!(
            apply("formatnumber", "1234.5", &[("decimals", Value::from("many"))]),
            ""
        );
        assert_eq!(apply_reporting("formatnumber", "-0.5", &[]).1, Vec::<&str>::new());
    }

    #[test]
    fn test_format_number_rejects_non_numeric_text() {
        assert_eq!(
            apply_reporting("formatnumber", "abc", &[]),
            (String::new(), vec![INVALID_FORMAT_INPUT])
        );
    }

    #[test]
    fn test_format_number_rejects_huge_decimals() {
        assert_eq!(
            apply_reporting("formatnumber", "1.5", &[("decimals", Value::from(70_000))]),
            (String::new(), vec![ARGUMENT_CONVERSION])
        );
        assert_eq!(
            apply_reporting("formatnumber", "1.5", &[("decimals", Value::from(-3))]),
            (String::new(), vec![ARGUMENT_CONVERSION])
        );
        let (out, codes) = apply_reporting(
            "formatnumber",
            "1",
            &[("decimals", Value::from(stache_text::MAX_DECIMAL_PLACES as i64))],
        );
        assert_eq!(out.len(), 2 + stache_text::MAX_DECIMAL_PLACES);
        assert!(codes.is_empty());
    }

    #[test]
    fn test_cleanup() {
        assert_eq!(apply("removeaccents", "déjà vu", &[]), "deja vu");
        assert_eq!(apply("removeblanklines", "a\n\nb", &[]), "a\nb");
        assert_eq!(apply("removenonascii", "a–b", &[]), "ab");
    }
}
