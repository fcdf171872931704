/*
 * condition.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Condition tags: choose between the primary block and the else block.

use crate::args::Arguments;
use crate::param::ParameterDescriptor;
use crate::tag::{ConditionTag, TagInfo};
use crate::value::Value;
use std::cmp::Ordering;

const LEFT_RIGHT: &[ParameterDescriptor] = &[
    ParameterDescriptor::required("left"),
    ParameterDescriptor::required("right"),
];
const REQUIRED_VALUE: &[ParameterDescriptor] = &[ParameterDescriptor::required("value")];
const OPTIONAL_VALUE: &[ParameterDescriptor] = &[ParameterDescriptor::optional("value")];

/// Template equality.
///
/// Two nulls are equal and a null never equals a non-null. Values of the same
/// variant compare structurally. Integers and floats compare numerically;
/// strings never equal numbers, even when they look numeric.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (a, b) if a.is_numeric() && b.is_numeric() => {
            compare_numeric(a, b) == Some(Ordering::Equal)
        }
        (a, b) if std::mem::discriminant(a) == std::mem::discriminant(b) => a == b,
        _ => false,
    }
}

/// Numeric ordering of two values, `None` unless both are numeric by type.
///
/// Mixed integer and float pairs compare exactly: an integer above 2^53 is
/// never rounded to meet a float.
pub fn compare_numeric(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        (Value::Integer(a), Value::Float(b)) => compare_integer_float(*a, *b),
        (Value::Float(a), Value::Integer(b)) => compare_integer_float(*b, *a).map(Ordering::reverse),
        _ => left.as_f64()?.partial_cmp(&right.as_f64()?),
    }
}

/// 2^63, the first float above every `i64`.
const I64_END: f64 = 9_223_372_036_854_775_808.0;

fn compare_integer_float(integer: i64, float: f64) -> Option<Ordering> {
    if float.is_nan() {
        return None;
    }
    if float >= I64_END {
        return Some(Ordering::Less);
    }
    if float < -I64_END {
        return Some(Ordering::Greater);
    }
    // In range, so the truncating casts below are exact.
    if float.fract() == 0.0 {
        return Some(integer.cmp(&(float as i64)));
    }
    if integer <= float.floor() as i64 {
        Some(Ordering::Less)
    } else {
        Some(Ordering::Greater)
    }
}

/// `left == right` under [`values_equal`].
pub struct EqTag;

impl TagInfo for EqTag {
    fn name(&self) -> &'static str {
        "eq"
    }

    fn parameters(&self) -> &'static [ParameterDescriptor] {
        LEFT_RIGHT
    }

    fn is_context_sensitive(&self) -> bool {
        false
    }
}

impl ConditionTag for EqTag {
    fn should_render_primary(&self, arguments: &Arguments) -> bool {
        values_equal(arguments.get("left"), arguments.get("right"))
    }
}

/// `left < right`; false when either side is not a number.
pub struct LtTag;

impl TagInfo for LtTag {
    fn name(&self) -> &'static str {
        "lt"
    }

    fn parameters(&self) -> &'static [ParameterDescriptor] {
        LEFT_RIGHT
    }

    fn is_context_sensitive(&self) -> bool {
        false
    }
}

impl ConditionTag for LtTag {
    fn should_render_primary(&self, arguments: &Arguments) -> bool {
        compare_numeric(arguments.get("left"), arguments.get("right")) == Some(Ordering::Less)
    }
}

/// `left > right`; false when either side is not a number.
pub struct GtTag;

impl TagInfo for GtTag {
    fn name(&self) -> &'static str {
        "gt"
    }

    fn parameters(&self) -> &'static [ParameterDescriptor] {
        LEFT_RIGHT
    }

    fn is_context_sensitive(&self) -> bool {
        false
    }
}

impl ConditionTag for GtTag {
    fn should_render_primary(&self, arguments: &Arguments) -> bool {
        compare_numeric(arguments.get("left"), arguments.get("right")) == Some(Ordering::Greater)
    }
}

/// True for a list or map with at least one element.
pub struct AnyTag;

impl TagInfo for AnyTag {
    fn name(&self) -> &'static str {
        "any"
    }

    fn parameters(&self) -> &'static [ParameterDescriptor] {
        OPTIONAL_VALUE
    }

    fn is_context_sensitive(&self) -> bool {
        false
    }
}

impl ConditionTag for AnyTag {
    fn should_render_primary(&self, arguments: &Arguments) -> bool {
        match arguments.get("value") {
            Value::List(items) => !items.is_empty(),
            Value::Map(fields) => !fields.is_empty(),
            _ => false,
        }
    }
}

/// True for null, absent or empty-string values.
pub struct IsNullOrEmptyTag;

impl TagInfo for IsNullOrEmptyTag {
    fn name(&self) -> &'static str {
        "isnullorempty"
    }

    fn parameters(&self) -> &'static [ParameterDescriptor] {
        OPTIONAL_VALUE
    }

    fn is_context_sensitive(&self) -> bool {
        false
    }
}

impl ConditionTag for IsNullOrEmptyTag {
    fn should_render_primary(&self, arguments: &Arguments) -> bool {
        match arguments.get("value") {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }
}

/// Truthiness of `value`.
pub struct IfTag;

impl TagInfo for IfTag {
    fn name(&self) -> &'static str {
        "if"
    }

    fn parameters(&self) -> &'static [ParameterDescriptor] {
        REQUIRED_VALUE
    }
}

impl ConditionTag for IfTag {
    fn should_render_primary(&self, arguments: &Arguments) -> bool {
        arguments.get("value").is_truthy()
    }
}

/// Negated truthiness of `value`.
pub struct NotTag;

impl TagInfo for NotTag {
    fn name(&self) -> &'static str {
        "not"
    }

    fn parameters(&self) -> &'static [ParameterDescriptor] {
        REQUIRED_VALUE
    }
}

impl ConditionTag for NotTag {
    fn should_render_primary(&self, arguments: &Arguments) -> bool {
        !arguments.get("value").is_truthy()
    }
}
