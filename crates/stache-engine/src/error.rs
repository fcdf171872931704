/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for template evaluation.

use thiserror::Error;

/// Errors that can occur during template operations.
///
/// Only structural problems are errors. Missing data and arguments that fail
/// to convert are soft failures: they are reported as diagnostics and the
/// affected tag produces empty output (or a `false` condition), unless the
/// render runs in strict mode.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template references a tag that is not in the registry.
    #[error("Unknown tag: {name}")]
    UnknownTag { name: String },

    /// A tag was used without one of its required parameters.
    #[error("Missing required parameter `{parameter}` for tag `{tag}`")]
    MissingParameter { tag: String, parameter: String },

    /// A tag with the same name was already registered.
    #[error("Tag already registered: {name}")]
    DuplicateTag { name: String },

    /// Tag nesting exceeded the configured maximum depth.
    #[error("Tag nesting too deep (depth > {max_depth}) at tag `{tag}`")]
    NestingTooDeep { tag: String, max_depth: usize },

    /// A soft failure escalated because strict mode is enabled.
    #[error("Strict mode: {message} (tag `{tag}`)")]
    Strict { tag: String, message: String },

    /// A template tree could not be deserialized.
    #[error("Invalid template: {0}")]
    InvalidTemplate(#[from] serde_json::Error),

    /// Render options could not be parsed.
    #[error("Invalid render options: {0}")]
    InvalidOptions(#[from] toml::de::Error),

    /// The output sink rejected a write.
    #[error("Failed to write output")]
    Output(#[from] std::fmt::Error),
}

/// Result type for template operations.
pub type RenderResult<T> = Result<T, RenderError>;
