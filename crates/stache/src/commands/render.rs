/*
 * render.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Render command implementation
 */

//! Render command implementation.
//!
//! Loads a JSON template tree, optional JSON data and optional TOML render
//! options, renders with the built-in tags, and writes the result to a file
//! or stdout. Diagnostics are reported on stderr.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use stache_engine::{RenderOptions, Renderer, TagRegistry, Template, Value};

/// Arguments for the render command
#[derive(Debug)]
pub struct RenderArgs {
    /// Template tree (JSON)
    pub template: PathBuf,
    /// Data file (JSON); rendering against null when absent
    pub data: Option<PathBuf>,
    /// Render options (TOML)
    pub config: Option<PathBuf>,
    /// Escalate soft failures to errors
    pub strict: bool,
    /// Output file; stdout when absent
    pub output: Option<PathBuf>,
}

/// Execute the render command
pub fn execute(args: RenderArgs) -> Result<()> {
    let source = fs::read_to_string(&args.template)
        .with_context(|| format!("Failed to read template: {}", args.template.display()))?;
    let template = Template::from_json_str(&source)
        .with_context(|| format!("Invalid template: {}", args.template.display()))?;

    let data = match &args.data {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read data: {}", path.display()))?;
            let json: serde_json::Value = serde_json::from_str(&text)
                .with_context(|| format!("Invalid JSON data: {}", path.display()))?;
            Value::from(json)
        }
        None => Value::Null,
    };

    let mut options = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            RenderOptions::from_toml_str(&text)
                .with_context(|| format!("Invalid config: {}", path.display()))?
        }
        None => RenderOptions::default(),
    };
    if args.strict {
        options.strict = true;
    }
    debug!(?options, "render options");

    let registry = TagRegistry::with_builtins();
    let (output, diagnostics) = Renderer::new(&registry)
        .with_options(options)
        .render_with_diagnostics(&template, &data)
        .with_context(|| format!("Failed to render {}", args.template.display()))?;

    for diagnostic in &diagnostics {
        eprintln!("{diagnostic}");
    }

    match &args.output {
        Some(path) => {
            fs::write(path, &output)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            info!(output = %path.display(), bytes = output.len(), "rendered");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(output.as_bytes())
                .context("Failed to write to stdout")?;
            stdout.flush().context("Failed to flush stdout")?;
        }
    }

    Ok(())
}
