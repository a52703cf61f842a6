//! CSV Export functionality
//!
//! Writes canonical records as a delimiter-separated table. The header row is
//! written as is; every data cell is quoted, whatever it contains. Rows are
//! separated by `\n` and the output has no trailing newline.

use std::io::Write;

use crate::error::{ExportError, ExportResult};
use crate::models::{CanonicalRecord, IDENTITY_COLUMNS};
use crate::services::RESERVED_COLUMNS;

/// One column of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Column {
    /// Identity field or attribute, looked up by name
    Field(String),
    /// The n-th path segment (1-based)
    PathLevel(usize),
}

impl Column {
    /// Header text of the column
    pub fn header(&self) -> String {
        match self {
            Self::Field(name) => name.clone(),
            Self::PathLevel(level) => format!("Level {}", level),
        }
    }

    fn cell(&self, record: &CanonicalRecord) -> String {
        match self {
            Self::Field(name) => record.field_text(name),
            Self::PathLevel(level) => record
                .path_segments()
                .get(level - 1)
                .map(|s| s.to_string())
                .unwrap_or_default(),
        }
    }
}

/// Ordered column list of a table export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    columns: Vec<Column>,
}

impl TableLayout {
    /// Use the given names as columns, unchanged
    pub fn from_names(names: &[String]) -> Self {
        Self {
            columns: names.iter().cloned().map(Column::Field).collect(),
        }
    }

    /// Identity columns, then `path_levels` level columns, then the selected
    /// attributes, then the composite columns not selected already
    pub fn for_selection(selected: &[String], path_levels: usize) -> Self {
        let mut names: Vec<String> = IDENTITY_COLUMNS.iter().map(|c| c.to_string()).collect();
        let mut columns: Vec<Column> = names.iter().cloned().map(Column::Field).collect();
        columns.extend((1..=path_levels).map(Column::PathLevel));

        let trailing = selected
            .iter()
            .cloned()
            .chain(RESERVED_COLUMNS.iter().map(|c| c.to_string()));
        for name in trailing {
            if !names.contains(&name) {
                names.push(name.clone());
                columns.push(Column::Field(name));
            }
        }

        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(Column::header).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Deepest path among the records, counted in non-empty segments
pub fn max_path_levels(records: &[CanonicalRecord]) -> usize {
    records
        .iter()
        .map(|r| r.path_segments().len())
        .max()
        .unwrap_or(0)
}

/// Serialize records under the given column names
pub fn serialize_table(records: &[CanonicalRecord], columns: &[String], delimiter: char) -> Vec<u8> {
    render_table(records, &TableLayout::from_names(columns), delimiter).into_bytes()
}

/// Render a table into a string
pub fn render_table(records: &[CanonicalRecord], layout: &TableLayout, delimiter: char) -> String {
    let separator = delimiter.to_string();

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(layout.headers().join(&separator));

    for record in records {
        let cells: Vec<String> = layout
            .columns()
            .iter()
            .map(|column| quote_cell(&column.cell(record)))
            .collect();
        lines.push(cells.join(&separator));
    }

    lines.join("\n")
}

/// Write a table to a writer
pub fn export_table<W: Write>(
    writer: &mut W,
    records: &[CanonicalRecord],
    layout: &TableLayout,
    delimiter: char,
) -> ExportResult<()> {
    writer
        .write_all(render_table(records, layout, delimiter).as_bytes())
        .map_err(|e| ExportError::Export(e.to_string()))
}

/// Quote a cell, doubling embedded quotes
fn quote_cell(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}
