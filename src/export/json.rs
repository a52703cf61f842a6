//! JSON Export functionality
//!
//! Serializes a rebuilt tree as nested JSON, two-space indented when pretty.

use std::io::Write;

use crate::error::{ExportError, ExportResult};
use crate::models::TreeNode;

/// Write a tree as JSON
pub fn export_tree_json<W: Write>(tree: &TreeNode, writer: &mut W, pretty: bool) -> ExportResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, tree)
    } else {
        serde_json::to_writer(writer, tree)
    }
    .map_err(|e| ExportError::Export(e.to_string()))?;

    Ok(())
}

/// Read a tree back from JSON
pub fn import_tree_json(json: &[u8]) -> ExportResult<TreeNode> {
    serde_json::from_slice(json).map_err(ExportError::from)
}
