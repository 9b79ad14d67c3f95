//! Column-level rendering.
//!
//! [`column_renderer`] turns a fixed [`RenderConfig`] into the per-cell
//! callback a table component calls for every row. [`ColumnSet`] goes one
//! step further and holds the render configuration of every column of a
//! table, loaded from JSON or YAML:
//!
//! ```
//! use cellrender::{CellValue, ColumnSet, Record, RendererRegistry};
//!
//! let columns = ColumnSet::from_yaml(r#"
//! columns:
//!   - key: name
//!   - key: active
//!     title: Active
//!     render:
//!       type: boolean
//!       config:
//!         showAsTag: false
//! "#).unwrap();
//!
//! let registry = RendererRegistry::with_builtins();
//! let mut row = Record::new();
//! row.insert("name".into(), CellValue::from("Ada"));
//! row.insert("active".into(), CellValue::from(1));
//!
//! let cells: Vec<String> = columns
//!     .render_row(&registry, &row)
//!     .iter()
//!     .map(|cell| cell.text())
//!     .collect();
//! assert_eq!(cells, vec!["Ada", "Sim"]);
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::{self, RenderConfig};
use crate::display::Rendered;
use crate::error::ConfigError;
use crate::registry::RendererRegistry;
use crate::value::{CellValue, Record};

/// Per-cell callback: `(value, record, row_index) -> display`.
pub type CellRenderFn = Arc<dyn Fn(&CellValue, Option<&Record>, usize) -> Rendered + Send + Sync>;

/// Creates the cell callback for a column rendered with `config`.
///
/// The row index is accepted for table components that pass it, and ignored.
pub fn column_renderer(registry: Arc<RendererRegistry>, config: RenderConfig) -> CellRenderFn {
    Arc::new(
        move |value: &CellValue, record: Option<&Record>, _index: usize| {
            registry.apply(value, Some(&config), record)
        },
    )
}

/// One table column: which record field it shows and how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Record field shown in this column.
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// How to render the field. Absent uses the default renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render: Option<RenderConfig>,
}

impl ColumnConfig {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: None,
            render: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn render(mut self, render: RenderConfig) -> Self {
        self.render = Some(render);
        self
    }

    /// Header text: the title, or the key when there is none.
    pub fn header(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.key)
    }

    /// Renders this column's cell of `record`. Missing fields render as null.
    pub fn render_cell(&self, registry: &RendererRegistry, record: &Record) -> Rendered {
        let value = record.get(&self.key).unwrap_or(&CellValue::Null);
        registry.apply(value, self.render.as_ref(), Some(record))
    }

    /// Cell callback for this column.
    pub fn cell_renderer(&self, registry: Arc<RendererRegistry>) -> CellRenderFn {
        match &self.render {
            Some(render) => column_renderer(registry, render.clone()),
            None => Arc::new(
                move |value: &CellValue, record: Option<&Record>, _index: usize| {
                    registry.apply(value, None, record)
                },
            ),
        }
    }
}

/// The render configuration of a whole table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnSet {
    #[serde(default)]
    pub columns: Vec<ColumnConfig>,
}

impl ColumnSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column, builder style.
    pub fn column(mut self, column: ColumnConfig) -> Self {
        self.columns.push(column);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a `.json`, `.yaml` or `.yml` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        config::load_file(path.as_ref())
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(ColumnConfig::header).collect()
    }

    /// Renders every column of one record, in column order.
    pub fn render_row(&self, registry: &RendererRegistry, record: &Record) -> Vec<Rendered> {
        self.columns
            .iter()
            .map(|column| column.render_cell(registry, record))
            .collect()
    }

    /// Validates every column's render config.
    ///
    /// Messages are prefixed with the column key. Empty when all are valid.
    pub fn validate(&self, registry: &RendererRegistry) -> Vec<String> {
        self.columns
            .iter()
            .flat_map(|column| {
                registry
                    .validate(column.render.as_ref())
                    .errors
                    .into_iter()
                    .map(move |error| format!("{}: {}", column.key, error))
            })
            .collect()
    }

    /// Renders `records` as CSV text, one header row plus one row per record.
    ///
    /// Decorated cells contribute their text only.
    pub fn to_csv(
        &self,
        registry: &RendererRegistry,
        records: &[Record],
    ) -> Result<String, ConfigError> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.write_record(self.headers())
            .map_err(|e| ConfigError::Csv(e.to_string()))?;

        for record in records {
            let row: Vec<String> = self
                .render_row(registry, record)
                .iter()
                .map(Rendered::text)
                .collect();
            wtr.write_record(&row)
                .map_err(|e| ConfigError::Csv(e.to_string()))?;
        }

        let bytes = wtr
            .into_inner()
            .map_err(|e| ConfigError::Csv(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| ConfigError::Csv(e.to_string()))
    }
}
