//! Retrieval of content from the repository
//!
//! The engine does not talk to the repository itself. A [`QuerySource`] hands
//! over content types, attribute schemas and fully materialized query results;
//! [`JsonDumpSource`] serves them from a JSON dump on disk.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ExportContext, Workspace};
use crate::error::{ExportError, ExportResult};
use crate::models::{AttributeSchema, ContentTypeDescriptor, RawContentNode, RawQueryResult};
use crate::storage::read_json_required;

/// Parameters of one content query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentQuery {
    /// Path of the root node
    pub path: String,
    pub language: String,
    /// Only descendants of this type are returned
    pub content_type: String,
    pub workspace: Workspace,
    /// Attribute names to fetch for each node
    pub properties: Vec<String>,
}

impl ContentQuery {
    /// Query the site root of `context` for one type
    pub fn new(
        context: &ExportContext,
        content_type: impl Into<String>,
        properties: Vec<String>,
    ) -> Self {
        Self {
            path: context.site_path(),
            language: context.language.clone(),
            content_type: content_type.into(),
            workspace: context.workspace,
            properties,
        }
    }
}

/// Supplies schema information and query results
pub trait QuerySource {
    /// Content types that can be exported
    fn content_types(&self) -> ExportResult<Vec<ContentTypeDescriptor>>;

    /// Attributes declared by a content type
    fn attributes(&self, content_type: &str) -> ExportResult<Vec<AttributeSchema>>;

    /// Run a content query; failures are reported as [`ExportError::Retrieval`]
    fn fetch(&self, query: &ContentQuery) -> ExportResult<RawQueryResult>;
}

/// On-disk snapshot of a repository
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryDump {
    #[serde(default)]
    pub content_types: Vec<ContentTypeDescriptor>,

    /// Attribute schemas keyed by content type name
    #[serde(default)]
    pub attributes: BTreeMap<String, Vec<AttributeSchema>>,

    /// Root node with its `descendants.nodes`
    #[serde(default)]
    pub result: Option<RawContentNode>,
}

/// Serves queries from a [`RepositoryDump`]
#[derive(Debug, Clone)]
pub struct JsonDumpSource {
    dump: RepositoryDump,
}

impl JsonDumpSource {
    /// Load a dump file
    pub fn open(path: impl AsRef<Path>) -> ExportResult<Self> {
        let dump: RepositoryDump = read_json_required(path.as_ref())
            .map_err(|e| ExportError::Retrieval(e.to_string()))?;
        Ok(Self::from_dump(dump))
    }

    pub fn from_dump(dump: RepositoryDump) -> Self {
        Self { dump }
    }
}

impl QuerySource for JsonDumpSource {
    fn content_types(&self) -> ExportResult<Vec<ContentTypeDescriptor>> {
        Ok(self.dump.content_types.clone())
    }

    fn attributes(&self, content_type: &str) -> ExportResult<Vec<AttributeSchema>> {
        self.dump
            .attributes
            .get(content_type)
            .cloned()
            .ok_or_else(|| ExportError::content_type_not_found(content_type))
    }

    fn fetch(&self, query: &ContentQuery) -> ExportResult<RawQueryResult> {
        let root = self
            .dump
            .result
            .as_ref()
            .ok_or_else(|| ExportError::Retrieval("Dump contains no query result".into()))?;

        if root.path.as_deref() != Some(query.path.as_str()) {
            return Err(ExportError::Retrieval(format!(
                "No node found at {}",
                query.path
            )));
        }

        let mut result = RawQueryResult::from_root(root.clone());
        let total = result.descendants.len();
        // Untyped nodes cannot be excluded by type and are kept
        result
            .descendants
            .retain(|node| node.type_name().map_or(true, |t| t == query.content_type));

        debug!(
            path = query.path.as_str(),
            content_type = query.content_type.as_str(),
            workspace = %query.workspace,
            kept = result.descendants.len(),
            total,
            "served query from dump"
        );

        Ok(result)
    }
}
