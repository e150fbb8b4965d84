use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

use crate::scoring::{column_label_to_index, ResponseGrid, ScoringError};

/// Body of a Sheets v4 `values.get` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub major_dimension: Option<String>,
    /// Absent when the range is empty
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

/// A grid file is either a bare array of rows or a saved `values.get` response.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GridDocument {
    Rows(Vec<Vec<Value>>),
    Range(ValueRange),
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn rows_to_grid(rows: Vec<Vec<Value>>) -> ResponseGrid {
    ResponseGrid::new(
        rows.into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect(),
    )
}

impl From<ValueRange> for ResponseGrid {
    fn from(range: ValueRange) -> Self {
        rows_to_grid(range.values)
    }
}

pub fn parse_grid(json: &str) -> Result<ResponseGrid> {
    let document: GridDocument =
        serde_json::from_str(json).context("Grid must be an array of rows or a Sheets value range")?;
    Ok(match document {
        GridDocument::Rows(rows) => rows_to_grid(rows),
        GridDocument::Range(range) => range.into(),
    })
}

/// Load a response grid saved as JSON.
pub fn load_grid(path: &Path) -> Result<ResponseGrid> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read grid file at {}", path.display()))?;
    parse_grid(&json).with_context(|| format!("Invalid grid file {}", path.display()))
}

/// Respondent names from the given column, header and empty cells dropped.
pub fn project_members(grid: &ResponseGrid, column: &str) -> Result<Vec<String>, ScoringError> {
    let index = column_label_to_index(column)? - 1;
    Ok(grid
        .column_values(index)
        .into_iter()
        .filter(|name| !name.is_empty())
        .collect())
}
