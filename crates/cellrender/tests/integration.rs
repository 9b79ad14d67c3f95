//! Integration tests for cellrender.
//!
//! These cover the paths an application walks end to end: registering
//! custom renderers, rendering columns from a loaded configuration, and
//! validating configurations before they are saved.

use std::fs;
use std::sync::Arc;

use cellrender::{
    column_renderer, renderer_fn, CellValue, ColumnSet, ConfigError, DisplayValue,
    DuplicatePolicy, FieldDescriptor, FieldKind, RecordingEvents, Record, RegistryError,
    RenderConfig, RenderError, RenderEvent, Rendered, RendererRegistry, TagColor,
};
use serde_json::json;
use tempfile::TempDir;

fn recorded_builtins() -> (RendererRegistry, Arc<RecordingEvents>) {
    let events = Arc::new(RecordingEvents::new());
    let mut registry = RendererRegistry::new().with_events(events.clone());
    cellrender::renderers::register_builtins(&mut registry).unwrap();
    (registry, events)
}

fn row(value: serde_json::Value) -> Record {
    match CellValue::from(value) {
        CellValue::Map(fields) => fields,
        _ => panic!("Expected object"),
    }
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn overwrite_is_reported_once_and_keeps_position() {
    let (mut registry, events) = recorded_builtins();

    registry
        .register(
            "boolean",
            renderer_fn(|_, _, _| Ok(DisplayValue::text("custom"))).label("Custom"),
        )
        .unwrap();

    assert_eq!(
        events.events(),
        vec![RenderEvent::Overwritten {
            renderer: "boolean".into()
        }]
    );
    assert_eq!(registry.count(), 3);
    assert_eq!(
        registry.keys().collect::<Vec<_>>(),
        vec!["default", "boolean", "date"]
    );

    let shown = registry.apply(&CellValue::Bool(true), Some(&RenderConfig::new("boolean")), None);
    assert_eq!(shown.text(), "custom");
}

#[test]
fn reject_policy_keeps_the_first_renderer() {
    let mut registry = RendererRegistry::new().with_duplicate_policy(DuplicatePolicy::Reject);
    cellrender::renderers::register_builtins(&mut registry).unwrap();

    let err = registry
        .register("date", renderer_fn(|_, _, _| Ok(DisplayValue::text("x"))))
        .unwrap_err();
    assert_eq!(
        err,
        RegistryError::Duplicate {
            renderer: "date".into()
        }
    );

    let shown = registry.apply(&CellValue::from(0), Some(&RenderConfig::new("date")), None);
    assert_eq!(shown.text(), "01/01/1970 00:00");
}

#[test]
fn blank_type_is_rejected() {
    let mut registry = RendererRegistry::new();
    let err = registry
        .register("", renderer_fn(|_, _, _| Ok(DisplayValue::text("x"))))
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidRegistration { .. }));
    assert_eq!(registry.count(), 0);
}

#[test]
fn list_and_fields_describe_renderers_for_a_ui() {
    let mut registry = RendererRegistry::with_builtins();
    registry
        .register(
            "stars",
            renderer_fn(|_, _, _| Ok(DisplayValue::text("*")))
                .description("Shows a rating")
                .field(FieldDescriptor::new("max", "Maximum", FieldKind::Text).default_value(5)),
        )
        .unwrap();

    let listing = serde_json::to_value(registry.list()).unwrap();
    assert_eq!(listing[0]["value"], json!("default"));
    assert_eq!(listing[1]["label"], json!("Boolean"));
    assert_eq!(listing[3]["value"], json!("stars"));
    assert_eq!(listing[3]["label"], json!("stars"));
    assert_eq!(listing[3]["description"], json!("Shows a rating"));

    let fields = registry.fields("stars");
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].name, "max");
    assert!(registry.fields("unknown").is_empty());
    assert!(registry.default_config("unknown").is_empty());
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn unknown_type_falls_back_and_reports() {
    let (registry, events) = recorded_builtins();

    let shown = registry.apply(&CellValue::from(42), Some(&RenderConfig::new("money")), None);
    assert_eq!(shown, Rendered::Display(DisplayValue::text("42")));
    assert_eq!(
        events.events(),
        vec![RenderEvent::NotFound {
            renderer: "money".into(),
            fell_back: true
        }]
    );
}

#[test]
fn failing_renderer_degrades_to_default() {
    let (mut registry, events) = recorded_builtins();
    registry
        .register(
            "strict",
            renderer_fn(|_, _, _| Err(RenderError::Unparseable("no".into()))),
        )
        .unwrap();

    let shown = registry.apply(&CellValue::from("raw"), Some(&RenderConfig::new("strict")), None);
    assert_eq!(shown.text(), "raw");

    let failures: Vec<_> = events
        .events()
        .into_iter()
        .filter(|event| matches!(event, RenderEvent::Failed { .. }))
        .collect();
    assert_eq!(failures.len(), 1);
}

#[test]
fn record_reaches_custom_renderers() {
    let mut registry = RendererRegistry::with_builtins();
    registry
        .register(
            "full_name",
            renderer_fn(|value, _config, record| {
                let last = record
                    .and_then(|r| r.get("last"))
                    .map(CellValue::to_text)
                    .unwrap_or_default();
                Ok(DisplayValue::text(format!("{} {}", value.to_text(), last)))
            }),
        )
        .unwrap();

    let record = row(json!({"first": "Ada", "last": "Lovelace"}));
    let shown = registry.apply(
        &CellValue::from("Ada"),
        Some(&RenderConfig::new("full_name")),
        Some(&record),
    );
    assert_eq!(shown.text(), "Ada Lovelace");
}

#[test]
fn persisted_config_drives_rendering() {
    let registry = RendererRegistry::with_builtins();
    let config = RenderConfig::from_json(
        r#"{"type": "boolean", "config": {"trueText": "Active", "falseText": "Inactive", "falseColor": "gray"}}"#,
    )
    .unwrap();

    assert_eq!(
        registry.apply(&CellValue::from(0), Some(&config), None),
        Rendered::Display(DisplayValue::tag("Inactive", TagColor::Gray))
    );
    assert_eq!(
        registry.apply(&CellValue::from("TRUE"), Some(&config), None),
        Rendered::Display(DisplayValue::tag("Active", TagColor::Green))
    );
}

#[test]
fn column_callback_is_shareable_across_threads() {
    let registry = Arc::new(RendererRegistry::with_builtins());
    let render = column_renderer(
        registry,
        RenderConfig::new("date").with("format", "yyyy-MM-dd"),
    );

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let render = render.clone();
            std::thread::spawn(move || render(&CellValue::from("2024-06-01T12:00:00Z"), None, i).text())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "2024-06-01");
    }
}

// ============================================================================
// Column configuration files
// ============================================================================

const COLUMNS_YAML: &str = r#"
columns:
  - key: name
    title: Name
  - key: active
    title: Active
    render:
      type: boolean
      config:
        trueText: "Yes"
        falseText: "No"
        showAsTag: false
  - key: created
    render:
      type: date
      config:
        format: dd/MM/yyyy
"#;

#[test]
fn columns_load_from_yaml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("columns.yaml");
    fs::write(&path, COLUMNS_YAML).unwrap();

    let columns = ColumnSet::from_file(&path).unwrap();
    assert_eq!(columns.headers(), vec!["Name", "Active", "created"]);

    let registry = RendererRegistry::with_builtins();
    let cells: Vec<String> = columns
        .render_row(
            &registry,
            &row(json!({"name": "Ada", "active": true, "created": "2024-02-29"})),
        )
        .iter()
        .map(Rendered::text)
        .collect();
    assert_eq!(cells, vec!["Ada", "Yes", "29/02/2024"]);
}

#[test]
fn columns_load_from_json_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("columns.json");
    let source = ColumnSet::from_yaml(COLUMNS_YAML).unwrap();
    fs::write(&path, source.to_json().unwrap()).unwrap();

    assert_eq!(ColumnSet::from_file(&path).unwrap(), source);
}

#[test]
fn unsupported_extension_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("columns.toml");
    fs::write(&path, "columns = []").unwrap();

    assert!(matches!(
        ColumnSet::from_file(&path),
        Err(ConfigError::UnsupportedFormat { .. })
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        ColumnSet::from_file(dir.path().join("absent.yml")),
        Err(ConfigError::Io { .. })
    ));
}

#[test]
fn loaded_columns_are_validated_and_exported() {
    let registry = RendererRegistry::with_builtins();
    let mut columns = ColumnSet::from_yaml(COLUMNS_YAML).unwrap();
    assert!(columns.validate(&registry).is_empty());

    let records = vec![
        row(json!({"name": "Ada", "active": true, "created": 0})),
        row(json!({"name": "Bob", "active": false})),
    ];
    assert_eq!(
        columns.to_csv(&registry, &records).unwrap(),
        "Name,Active,created\nAda,Yes,01/01/1970\nBob,No,-\n"
    );

    columns.columns[2].render = Some(RenderConfig::new("date").with("format", ""));
    assert_eq!(
        columns.validate(&registry),
        vec!["created: date format is required"]
    );
}
