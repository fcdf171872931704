/*
 * loops.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Loop tags: content tags that open one child context per iteration.
//!
//! Children render straight into the current sink, one pass per element.
//! The contexts are produced lazily and without a cap; the renderer stops
//! pulling at its iteration cap, never above [`LOOP_GUARD`](crate::LOOP_GUARD).

use crate::args::Arguments;
use crate::nested::NestedContext;
use crate::param::ParameterDescriptor;
use crate::scope::Scope;
use crate::tag::{ContentTag, TagInfo};
use crate::value::Value;

/// The integer sequence walked by `for`.
///
/// A positive step walks forward while `start <= i <= end`, a negative step
/// walks backward while `start >= i >= end`. A step pointing away from `end`
/// yields nothing. A zero step never advances and never ends.
#[derive(Debug, Clone)]
pub struct StepRange {
    next: Option<i64>,
    start: i64,
    end: i64,
    step: i64,
}

impl StepRange {
    pub fn new(start: i64, end: i64, step: i64) -> Self {
        Self {
            next: Some(start),
            start,
            end,
            step,
        }
    }

    fn forward(&self) -> bool {
        self.step > 0 || (self.step == 0 && self.end >= self.start)
    }

    fn in_range(&self, i: i64) -> bool {
        if self.forward() {
            self.start <= i && i <= self.end
        } else {
            self.start >= i && i >= self.end
        }
    }
}

impl Iterator for StepRange {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let current = self.next.filter(|&i| self.in_range(i))?;
        // Overflow past i64 ends the walk.
        self.next = current.checked_add(self.step);
        Some(current)
    }

    // The walk is monotonic inside a convex range, so skipping is arithmetic.
    fn nth(&mut self, n: usize) -> Option<i64> {
        let current = self.next.filter(|&i| self.in_range(i))?;
        let target = i64::try_from(n)
            .ok()
            .and_then(|n| n.checked_mul(self.step))
            .and_then(|offset| current.checked_add(offset))
            .filter(|&i| self.in_range(i));
        self.next = target.and_then(|i| i.checked_add(self.step));
        target
    }
}

/// Numeric loop: `for(start, end, step)`.
///
/// Each pass sees the current value as the key scope's positional value
/// (`.`) and as `index` in the context scope (`@index`).
pub struct ForTag;

const FOR_PARAMS: &[ParameterDescriptor] = &[
    ParameterDescriptor::required("start").integer(),
    ParameterDescriptor::required("end").integer(),
    ParameterDescriptor::required("step").integer(),
];

impl TagInfo for ForTag {
    fn name(&self) -> &'static str {
        "for"
    }

    fn parameters(&self) -> &'static [ParameterDescriptor] {
        FOR_PARAMS
    }

    fn child_context_parameters(&self) -> &'static [ParameterDescriptor] {
        FOR_PARAMS
    }
}

impl ContentTag for ForTag {
    fn open_child_contexts<'a>(
        &self,
        key_scope: &'a Scope<'a>,
        arguments: &Arguments,
        context_scope: &'a Scope<'a>,
    ) -> Box<dyn Iterator<Item = NestedContext<'a>> + 'a> {
        let bounds = (
            arguments.integer("start"),
            arguments.integer("end"),
            arguments.integer("step"),
        );
        let (Some(start), Some(end), Some(step)) = bounds else {
            return Box::new(std::iter::empty());
        };

        Box::new(StepRange::new(start, end, step).map(move |i| {
            let mut context = context_scope.child();
            context.set("index", i);
            NestedContext::direct(key_scope.child_with(Value::Integer(i)), context)
        }))
    }
}

/// Collection loop: `each(items)`.
///
/// Lists iterate their elements, maps their values, any other truthy value
/// iterates once, and null or falsy values not at all. Each pass sees the
/// element as the positional value, so a map element's fields resolve as
/// names, and gets `index` (zero-based), `first` and `last` in the context
/// scope.
pub struct EachTag;

impl TagInfo for EachTag {
    fn name(&self) -> &'static str {
        "each"
    }

    fn parameters(&self) -> &'static [ParameterDescriptor] {
        const PARAMS: &[ParameterDescriptor] = &[ParameterDescriptor::required("items")];
        PARAMS
    }
}

impl ContentTag for EachTag {
    fn open_child_contexts<'a>(
        &self,
        key_scope: &'a Scope<'a>,
        arguments: &Arguments,
        context_scope: &'a Scope<'a>,
    ) -> Box<dyn Iterator<Item = NestedContext<'a>> + 'a> {
        let items: Vec<Value> = match arguments.get("items") {
            Value::List(items) => items.clone(),
            Value::Map(fields) => fields.values().cloned().collect(),
            other if other.is_truthy() => vec![other.clone()],
            _ => Vec::new(),
        };
        let count = items.len();

        Box::new(
            items
                .into_iter()
                .enumerate()
                .map(move |(index, item)| {
                    let mut context = context_scope.child();
                    context.set("index", index as i64);
                    context.set("first", index == 0);
                    context.set("last", index + 1 == count);
                    NestedContext::direct(key_scope.child_with(item), context)
                }),
        )
    }
}
