//! Tree nodes produced by path-based reconstruction

use serde::{Deserialize, Serialize};

use super::record::CanonicalRecord;

/// A canonical record together with the nodes directly below it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    #[serde(flatten)]
    pub record: CanonicalRecord,

    #[serde(default)]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Wrap a record with no children
    pub fn leaf(record: CanonicalRecord) -> Self {
        Self {
            record,
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, itself included
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }

    /// Find a direct child by name
    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children.iter().find(|c| c.record.name() == name)
    }

    /// Depth-first pre-order walk
    pub fn walk(&self) -> Vec<&TreeNode> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.walk());
        }
        out
    }
}
