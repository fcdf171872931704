/*
 * options.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Render configuration.

use crate::error::RenderResult;
use serde::Deserialize;

/// Hard cap on the number of child contexts any single tag may open.
///
/// The renderer stops pulling contexts here, and reports that it did, even
/// if a loop's bounds or step would run forever.
pub const LOOP_GUARD: u64 = i32::MAX as u64 - 1;

/// Default maximum tag nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options controlling a render.
///
/// ```toml
/// strict = true
/// max-depth = 32
/// loop-iteration-cap = 10000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct RenderOptions {
    /// Escalate soft failures (unconvertible arguments, null loop bounds,
    /// iteration cap reached, unusable format input) to errors.
    pub strict: bool,

    /// Maximum tag nesting depth before the render fails.
    pub max_depth: usize,

    /// Maximum number of child contexts a single tag invocation may open.
    /// Values above [`LOOP_GUARD`] are clamped to it.
    pub loop_iteration_cap: u64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            strict: false,
            max_depth: DEFAULT_MAX_DEPTH,
            loop_iteration_cap: LOOP_GUARD,
        }
    }
}

impl RenderOptions {
    /// Parse options from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> RenderResult<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn with_strict_mode(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_loop_iteration_cap(mut self, cap: u64) -> Self {
        self.loop_iteration_cap = cap;
        self
    }

    /// The cap actually applied: never above [`LOOP_GUARD`].
    pub fn effective_iteration_cap(&self) -> u64 {
        self.loop_iteration_cap.min(LOOP_GUARD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert!(!options.strict);
        assert_eq!(options.max_depth, 64);
        assert_eq!(options.effective_iteration_cap(), LOOP_GUARD);
    }

    #[test]
    fn test_from_toml() {
        let options = RenderOptions::from_toml_str("strict = true\nloop-iteration-cap = 10\n").unwrap();
        assert_eq!(
            options,
            RenderOptions {
                strict: true,
                max_depth: DEFAULT_MAX_DEPTH,
                loop_iteration_cap: 10,
            }
        );
    }

    #[test]
    fn test_from_toml_empty_is_default() {
        assert_eq!(RenderOptions::from_toml_str("").unwrap(), RenderOptions::default());
    }

    #[test]
    fn test_from_toml_rejects_unknown_keys() {
        assert!(RenderOptions::from_toml_str("stict = true").is_err());
    }

    #[test]
    fn test_cap_is_clamped() {
        let options = RenderOptions::default().with_loop_iteration_cap(u64::MAX);
        assert_eq!(options.effective_iteration_cap(), LOOP_GUARD);
    }
}
