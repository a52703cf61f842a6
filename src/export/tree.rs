//! Tree reconstruction from flat paths
//!
//! Descendants are attached below the node whose path is their own path up to
//! the last `/`. Sibling order follows the order of the input; descendants
//! whose parent is not part of the input are left out.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{ExportError, ExportResult};
use crate::models::{CanonicalRecord, TreeNode};

/// Result of rebuilding a tree
#[derive(Debug, Clone, PartialEq)]
pub struct ReconstructedTree {
    pub root: TreeNode,
    /// Paths of descendants whose parent path was not in the input
    pub orphans: Vec<String>,
}

impl ReconstructedTree {
    /// Nodes reachable from the root, root included
    pub fn attached(&self) -> usize {
        self.root.node_count()
    }
}

/// Path of the parent: everything before the last `/`
pub fn parent_path(path: &str) -> &str {
    path.rfind('/').map_or("", |i| &path[..i])
}

/// Rebuild the tree below `root`
///
/// # Errors
///
/// [`ExportError::MalformedInput`] when a node has no path.
pub fn build_tree(
    root: CanonicalRecord,
    descendants: Vec<CanonicalRecord>,
) -> ExportResult<ReconstructedTree> {
    for record in std::iter::once(&root).chain(&descendants) {
        if record.path().is_empty() {
            return Err(ExportError::malformed(
                record.uuid(),
                "node has no path and cannot be placed in the tree",
            ));
        }
    }

    let root_path = root.path().to_string();

    // First pass: one slot per distinct path, later duplicates replace earlier ones
    let mut slots: Vec<Option<CanonicalRecord>> = Vec::with_capacity(descendants.len() + 1);
    let mut slot_by_path: HashMap<String, usize> = HashMap::with_capacity(descendants.len() + 1);
    for record in std::iter::once(root).chain(descendants) {
        match slot_by_path.get(record.path()) {
            Some(&slot) => {
                warn!(path = record.path(), "duplicate path, keeping the last node");
                slots[slot] = Some(record);
            }
            None => {
                slot_by_path.insert(record.path().to_string(), slots.len());
                slots.push(Some(record));
            }
        }
    }

    let root_slot = *slot_by_path.get(&root_path).ok_or_else(|| {
        ExportError::Invariant(format!("root path {} missing from node map", root_path))
    })?;

    // Second pass: link every slot to its parent
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); slots.len()];
    for (slot, record) in slots.iter().enumerate() {
        if slot == root_slot {
            continue;
        }
        let path = record.as_ref().map(CanonicalRecord::path).unwrap_or_default();
        let parent = parent_path(path);
        match slot_by_path.get(parent) {
            Some(&parent_slot) if parent != path => children[parent_slot].push(slot),
            _ => debug!(path, parent, "parent not in result"),
        }
    }

    let root = assemble(root_slot, &mut slots, &children)?;

    // Whatever was not reached from the root hangs below a missing parent
    let orphans: Vec<String> = slots
        .into_iter()
        .flatten()
        .map(|record| record.path().to_string())
        .collect();
    if !orphans.is_empty() {
        warn!(count = orphans.len(), "descendants without a parent in the result were left out");
    }
    debug!(
        root = root_path.as_str(),
        attached = root.node_count(),
        orphans = orphans.len(),
        "tree rebuilt"
    );

    Ok(ReconstructedTree { root, orphans })
}

fn assemble(
    slot: usize,
    slots: &mut [Option<CanonicalRecord>],
    children: &[Vec<usize>],
) -> ExportResult<TreeNode> {
    let record = slots[slot]
        .take()
        .ok_or_else(|| ExportError::Invariant(format!("tree slot {} linked twice", slot)))?;

    let mut node = TreeNode::leaf(record);
    for &child in &children[slot] {
        node.children.push(assemble(child, slots, children)?);
    }
    Ok(node)
}
