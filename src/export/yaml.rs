//! YAML Export functionality
//!
//! Serializes a rebuilt tree as YAML for human-readable output.

use std::io::Write;

use crate::error::{ExportError, ExportResult};
use crate::models::TreeNode;

/// Write a tree as YAML, preceded by a short comment header
pub fn export_tree_yaml<W: Write>(tree: &TreeNode, writer: &mut W) -> ExportResult<()> {
    writeln!(writer, "# Content tree export")
        .map_err(|e| ExportError::Export(e.to_string()))?;
    writeln!(writer, "# Root: {}", tree.record.path())
        .map_err(|e| ExportError::Export(e.to_string()))?;
    writeln!(writer, "# Nodes: {}", tree.node_count())
        .map_err(|e| ExportError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, tree).map_err(|e| ExportError::Export(e.to_string()))?;

    Ok(())
}

/// Read a tree back from YAML
pub fn import_tree_yaml(yaml: &str) -> ExportResult<TreeNode> {
    serde_yaml::from_str(yaml).map_err(ExportError::from)
}
