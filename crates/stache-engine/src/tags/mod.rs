/*
 * mod.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Built-in tags.

pub mod condition;
pub mod content;
pub mod inline;
pub mod loops;

use crate::tag::Tag;

/// Every built-in tag, one instance per name.
pub fn builtin_tags() -> Vec<Tag> {
    let mut tags = vec![
        Tag::inline(inline::NowTag),
        Tag::inline(inline::GuidTag),
        Tag::inline(inline::TabTag),
        Tag::inline(inline::LineBreakTag),
        Tag::inline(inline::RepeatTag),
        Tag::inline(inline::SpaceTag),
        Tag::inline(inline::IndexTag),
        Tag::content(loops::ForTag),
        Tag::content(loops::EachTag),
        Tag::condition(condition::EqTag),
        Tag::condition(condition::LtTag),
        Tag::condition(condition::GtTag),
        Tag::condition(condition::AnyTag),
        Tag::condition(condition::IsNullOrEmptyTag),
        Tag::condition(condition::IfTag),
        Tag::condition(condition::NotTag),
    ];
    tags.extend(content::transform_tags().into_iter().map(Tag::content));
    tags
}
