/*
 * registry.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Tag registry.

use crate::error::{RenderError, RenderResult};
use crate::tag::Tag;
use std::collections::BTreeMap;

/// The set of tags a template may use, keyed by unique name.
///
/// Registries are immutable once built and can be shared across threads;
/// every render allocates its own scopes and buffers.
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    tags: BTreeMap<&'static str, Tag>,
}

impl TagRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in tag.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for tag in crate::tags::builtin_tags() {
            // Built-in names are distinct, so this cannot collide.
            registry.tags.insert(tag.name(), tag);
        }
        registry
    }

    /// Register a tag. Fails if a tag with the same name is already present.
    pub fn register(&mut self, tag: Tag) -> RenderResult<()> {
        let name = tag.name();
        if self.tags.contains_key(name) {
            return Err(RenderError::DuplicateTag {
                name: name.to_string(),
            });
        }
        self.tags.insert(name, tag);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.tags.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    /// Registered tags in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.values()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::{InlineTag, TagInfo};
    use crate::{Arguments, Scope, SoftFailures};
    use std::fmt;

    struct Hello;

    impl TagInfo for Hello {
        fn name(&self) -> &'static str {
            "hello"
        }
    }

    impl InlineTag for Hello {
        fn emit_text(
            &self,
            sink: &mut dyn fmt::Write,
            _arguments: &Arguments,
            _scope: &Scope<'_>,
            _failures: &mut SoftFailures,
        ) -> fmt::Result {
            sink.write_str("hello")
        }
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = TagRegistry::new();
        assert!(registry.is_empty());
        registry.register(Tag::inline(Hello)).unwrap();
        assert!(registry.contains("hello"));
        assert_eq!(registry.get("hello").map(Tag::kind), Some("inline"));
        assert!(registry.get("goodbye").is_none());
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let mut registry = TagRegistry::new();
        registry.register(Tag::inline(Hello)).unwrap();
        let err = registry.register(Tag::inline(Hello)).unwrap_err();
        assert!(matches!(err, RenderError::DuplicateTag { name } if name == "hello"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_builtins_have_unique_names() {
        let builtins = crate::tags::builtin_tags();
        let registry = TagRegistry::with_builtins();
        assert_eq!(registry.len(), builtins.len());
        assert!(registry.contains("upper"));
        assert!(registry.contains("for"));
        assert!(registry.contains("eq"));
        assert!(registry.contains("now"));
    }
}
