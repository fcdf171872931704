/*
 * tags.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! `stache tags`: list the built-in tags.

use anyhow::Result;
use stache_engine::{ParameterKind, Tag, TagRegistry};

/// Execute the tags command
pub fn execute() -> Result<()> {
    let registry = TagRegistry::with_builtins();
    for tag in registry.iter() {
        println!("{}", describe(tag));
    }
    Ok(())
}

/// One line per tag: `name (kind) param, param?`.
fn describe(tag: &Tag) -> String {
    let params: Vec<String> = tag
        .parameters()
        .iter()
        .map(|p| {
            let mut s = p.name.to_string();
            if p.kind == ParameterKind::Integer {
                s.push_str(": int");
            }
            if !p.required {
                s.push('?');
            }
            s
        })
        .collect();

    if params.is_empty() {
        format!("{} ({})", tag.name(), tag.kind())
    } else {
        format!("{} ({}) {}", tag.name(), tag.kind(), params.join(", "))
    }
}
