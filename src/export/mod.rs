//! Export module for content export
//!
//! Turns canonical records into file payloads:
//! - CSV: one quoted row per record under a fixed column layout
//! - JSON: the rebuilt content tree, machine-readable
//! - YAML: the rebuilt content tree, human-readable

pub mod coordinator;
pub mod csv;
pub mod json;
pub mod tree;
pub mod yaml;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use coordinator::{
    export_data, export_data_at, export_filename, export_timestamp, run_export, DeliveredExport,
    ExportFailure, ExportOutcome, ExportRequest, ExportStats,
};
pub use csv::{max_path_levels, render_table, serialize_table, Column, TableLayout};
pub use json::{export_tree_json, import_tree_json};
pub use tree::{build_tree, parent_path, ReconstructedTree};
pub use yaml::{export_tree_yaml, import_tree_yaml};

/// Shape of the exported data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Flat table, one row per item
    #[default]
    Table,
    /// Nested tree rebuilt from paths
    Tree,
}

/// Text encoding of tree exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TreeEncoding {
    #[default]
    Json,
    Yaml,
}

/// File extension for a format and tree encoding
pub fn file_extension(format: ExportFormat, encoding: TreeEncoding) -> &'static str {
    match (format, encoding) {
        (ExportFormat::Table, _) => "csv",
        (ExportFormat::Tree, TreeEncoding::Json) => "json",
        (ExportFormat::Tree, TreeEncoding::Yaml) => "yaml",
    }
}
