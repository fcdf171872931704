/*
 * integration_tests.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Integration tests for stache-engine using test fixtures.
 */

use pretty_assertions::assert_eq;
use stache_engine::diagnostics::ITERATION_CAP_REACHED;
use stache_engine::{
    Arguments, InlineTag, RenderError, RenderOptions, Renderer, Scope, SoftFailures, Tag, TagInfo,
    TagRegistry, Template, Value,
};
use std::fmt;
use std::path::Path;

/// Helper to get the path to test fixtures
fn fixture_path(name: &str) -> std::path::PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest_dir).join("test-fixtures").join(name)
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|_| panic!("Failed to read fixture: {}", name))
}

/// Helper to load a template from fixtures
fn load_template(name: &str) -> Template {
    Template::from_json_str(&read_fixture(name))
        .unwrap_or_else(|e| panic!("Failed to load template {}: {}", name, e))
}

fn load_data(name: &str) -> Value {
    let json: serde_json::Value =
        serde_json::from_str(&read_fixture(name)).expect("fixture data should be valid JSON");
    Value::from(json)
}

fn load_options(name: &str) -> RenderOptions {
    RenderOptions::from_toml_str(&read_fixture(name)).expect("fixture options should parse")
}

#[test]
fn test_greeting() {
    let template = load_template("greeting.json");
    let registry = TagRegistry::with_builtins();
    let data = Value::from(serde_json::json!({"name": "world"}));

    assert_eq!(template.render(&registry, &data).unwrap(), "Hello, World!");
}

#[test]
fn test_greeting_without_data() {
    let template = load_template("greeting.json");
    let registry = TagRegistry::with_builtins();

    assert_eq!(template.render(&registry, &Value::Null).unwrap(), "Hello, !");
}

#[test]
fn test_invoice() {
    let template = load_template("invoice.json");
    let data = load_data("invoice-data.json");
    let registry = TagRegistry::with_builtins();

    let (output, diagnostics) = Renderer::new(&registry)
        .render_with_diagnostics(&template, &data)
        .unwrap();

    assert_eq!(
        output,
        "Invoice for ACME CORP\n0. Consulting\t1,500.00\n1. Travel\t320.50\nNo notes."
    );
    assert!(diagnostics.is_empty());
}

#[test]
fn test_countdown() {
    let template = load_template("countdown.json");
    let registry = TagRegistry::with_builtins();
    let data = Value::from(serde_json::json!({"from": 3}));

    assert_eq!(
        template.render(&registry, &data).unwrap(),
        "3, 2, 1 liftoff"
    );
}

#[test]
fn test_runaway_loop_is_capped() {
    let template = load_template("runaway.json");
    let registry = TagRegistry::with_builtins();

    let (output, diagnostics) = Renderer::new(&registry)
        .with_options(load_options("lenient.toml"))
        .render_with_diagnostics(&template, &Value::Null)
        .unwrap();

    assert_eq!(output, ".....");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ITERATION_CAP_REACHED);
}

#[test]
fn test_runaway_loop_fails_in_strict_mode() {
    let template = load_template("runaway.json");
    let registry = TagRegistry::with_builtins();

    let result = Renderer::new(&registry)
        .with_options(load_options("strict.toml"))
        .render(&template, &Value::Null);

    assert!(matches!(result, Err(RenderError::Strict { .. })));
}

#[test]
fn test_invalid_template_json() {
    let result = Template::from_json_str(r#"[{"type": "bogus"}]"#);
    assert!(matches!(result, Err(RenderError::InvalidTemplate(_))));
}

#[test]
fn test_invalid_options() {
    let result = RenderOptions::from_toml_str("loop-cap = 3");
    assert!(matches!(result, Err(RenderError::InvalidOptions(_))));
}

struct Shout;

impl TagInfo for Shout {
    fn name(&self) -> &'static str {
        "shout"
    }
}

impl InlineTag for Shout {
    fn emit_text(
        &self,
        sink: &mut dyn fmt::Write,
        _arguments: &Arguments,
        _scope: &Scope<'_>,
        _failures: &mut SoftFailures,
    ) -> fmt::Result {
        sink.write_str("HEY")
    }
}

#[test]
fn test_custom_tag_alongside_builtins() {
    let mut registry = TagRegistry::with_builtins();
    registry.register(Tag::inline(Shout)).unwrap();

    let template = Template::from_json_str(
        r#"[{"type": "tag", "name": "lower", "children": [{"type": "tag", "name": "shout"}]}]"#,
    )
    .unwrap();

    assert_eq!(template.render(&registry, &Value::Null).unwrap(), "hey");
}

#[test]
fn test_registry_is_shared_across_threads() {
    let registry = TagRegistry::with_builtins();
    let template = load_template("countdown.json");

    std::thread::scope(|s| {
        let handles: Vec<_> = (1..=4)
            .map(|from| {
                let registry = &registry;
                let template = &template;
                s.spawn(move || {
                    let data = Value::from(serde_json::json!({"from": from}));
                    template.render(registry, &data).unwrap()
                })
            })
            .collect();

        let outputs: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(outputs[0], "1 liftoff");
        assert_eq!(outputs[3], "4, 3, 2, 1 liftoff");
    });
}
