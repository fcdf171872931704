/*
 * diagnostics.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Diagnostics collected while rendering.
//!
//! Soft failures do not stop a render. They are recorded here so the caller
//! can see which tags produced empty or fallback output and why.

use std::fmt;

/// An argument could not be converted to the type its parameter declares,
/// or converted to a value outside the range the tag accepts.
pub const ARGUMENT_CONVERSION: &str = "S-1";
/// A parameter needed to open a tag's child contexts was null.
pub const MISSING_CHILD_CONTEXT_PARAMETER: &str = "S-2";
/// A tag yielded more child contexts than the iteration cap allows.
pub const ITERATION_CAP_REACHED: &str = "S-3";
/// Input a tag formats (numeric text, a timestamp format) was not usable.
pub const INVALID_FORMAT_INPUT: &str = "S-4";

/// A single soft-failure warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: &'static str,
    pub message: String,
    /// Name of the tag that raised it.
    pub tag: Option<String>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "warning[{}]: {}", self.code, self.message)?;
        if let Some(tag) = &self.tag {
            write!(f, " (tag `{tag}`)")?;
        }
        Ok(())
    }
}

/// Collector for diagnostic messages during template evaluation.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Add a warning with error code, attributed to `tag`.
    pub fn warn_with_code(&mut self, code: &'static str, message: impl Into<String>, tag: &str) {
        self.add(Diagnostic {
            code,
            message: message.into(),
            tag: Some(tag.to_string()),
        });
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consume the collector and return the diagnostics in the order they
    /// were raised, which is document order.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Soft failures a tag reports while producing its output.
///
/// Tags never see the render's options or collector. They report here and
/// the renderer decides, per failure, between a warning and a strict-mode
/// error.
#[derive(Debug, Default)]
pub struct SoftFailures {
    reported: Vec<(&'static str, String)>,
}

impl SoftFailures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, code: &'static str, message: impl Into<String>) {
        self.reported.push((code, message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.reported.is_empty()
    }

    /// Reported failures as `(code, message)`, in report order.
    pub fn into_reported(self) -> Vec<(&'static str, String)> {
        self.reported
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_collector_new() {
        let collector = DiagnosticCollector::new();
        assert!(collector.is_empty());
        assert!(collector.diagnostics().is_empty());
    }

    #[test]
    fn test_diagnostic_collector_warning() {
        let mut collector = DiagnosticCollector::new();
        collector.warn_with_code(ARGUMENT_CONVERSION, "not an integer", "left");

        assert!(!collector.is_empty());
        assert_eq!(collector.diagnostics()[0].code, "S-1");
        assert_eq!(collector.diagnostics()[0].tag.as_deref(), Some("left"));
        assert_eq!(collector.into_diagnostics().len(), 1);
    }

    #[test]
    fn test_display() {
        let diagnostic = Diagnostic {
            code: MISSING_CHILD_CONTEXT_PARAMETER,
            message: "parameter `end` is null".to_string(),
            tag: Some("for".to_string()),
        };
        assert_eq!(
            diagnostic.to_string(),
            "warning[S-2]: parameter `end` is null (tag `for`)"
        );
    }

    #[test]
    fn test_soft_failures_keep_report_order() {
        let mut failures = SoftFailures::new();
        assert!(failures.is_empty());
        failures.report(INVALID_FORMAT_INPUT, "first");
        failures.report(ARGUMENT_CONVERSION, "second");
        assert_eq!(
            failures.into_reported(),
            vec![
                (INVALID_FORMAT_INPUT, "first".to_string()),
                (ARGUMENT_CONVERSION, "second".to_string()),
            ]
        );
    }
}
