//! Repository context of an export
//!
//! Site, language and workspace are passed explicitly to every export
//! instead of being read from shared state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Repository workspace queried for content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Workspace {
    Edit,
    Live,
}

impl Workspace {
    /// Map a repository workspace name; only "default" is the edit workspace
    pub fn from_name(name: &str) -> Self {
        if name == "default" {
            Self::Edit
        } else {
            Self::Live
        }
    }
}

impl fmt::Display for Workspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Edit => write!(f, "EDIT"),
            Self::Live => write!(f, "LIVE"),
        }
    }
}

/// Site, language and workspace of one export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportContext {
    pub site_key: String,
    pub language: String,
    pub workspace: Workspace,
}

impl ExportContext {
    pub fn new(site_key: impl Into<String>, language: impl Into<String>, workspace: &str) -> Self {
        Self {
            site_key: site_key.into(),
            language: language.into(),
            workspace: Workspace::from_name(workspace),
        }
    }

    /// Repository path of the site root
    pub fn site_path(&self) -> String {
        format!("/sites/{}", self.site_key)
    }
}
