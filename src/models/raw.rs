//! Raw content nodes as delivered by the retrieval layer
//!
//! These types mirror the JSON shape of a repository query response. Every
//! optional part is optional here as well, so a sparse node still
//! deserializes; the normalizer decides what absence means.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// The type descriptor attached to a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNodeType {
    pub name: String,
}

/// Definition flags of a raw attribute
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    #[serde(default)]
    pub multiple: bool,
}

/// A named attribute of a raw node
///
/// Either `value` or `values` is authoritative, depending on
/// `definition.multiple`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAttribute {
    pub name: String,

    #[serde(default)]
    pub value: Option<Value>,

    #[serde(default)]
    pub values: Option<Vec<Value>>,

    #[serde(default)]
    pub definition: Option<AttributeDefinition>,
}

impl RawAttribute {
    /// Single-valued attribute
    pub fn single(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            values: None,
            definition: Some(AttributeDefinition { multiple: false }),
        }
    }

    /// Multi-valued attribute
    pub fn multiple<I, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            name: name.into(),
            value: None,
            values: Some(values.into_iter().map(Into::into).collect()),
            definition: Some(AttributeDefinition { multiple: true }),
        }
    }

    /// Whether the definition marks this attribute as multi-valued
    pub fn is_multiple(&self) -> bool {
        self.definition.as_ref().is_some_and(|d| d.multiple)
    }
}

/// A `{ "values": [...] }` holder used by relation attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawValues {
    #[serde(default)]
    pub values: Option<Vec<Value>>,
}

/// Tag list relation in either of its two known shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTagList {
    /// A list wrapping one values holder: `[{ "values": [...] }]`
    Wrapped(Vec<RawValues>),
    /// A values holder on its own: `{ "values": [...] }`
    Direct(RawValues),
}

/// A reference to a category node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCategoryRef {
    #[serde(default, rename = "displayName", alias = "label")]
    pub display_name: Option<String>,
}

/// Descendant list as nested under a root node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawNodeList {
    #[serde(default)]
    pub nodes: Vec<RawContentNode>,
}

/// One content node of the repository
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContentNode {
    #[serde(default)]
    pub uuid: Option<String>,

    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub primary_node_type: Option<RawNodeType>,

    #[serde(default, alias = "label")]
    pub display_name: Option<String>,

    /// Attribute list; `null` and absent both mean "no attributes"
    #[serde(default, deserialize_with = "lenient_list")]
    pub properties: Option<Vec<RawAttribute>>,

    #[serde(default, deserialize_with = "lenient")]
    pub tag_list: Option<RawTagList>,

    /// Category references; dangling (`null`) entries are dropped
    #[serde(default, deserialize_with = "lenient_list")]
    pub default_category: Option<Vec<RawCategoryRef>>,

    #[serde(default, deserialize_with = "lenient")]
    pub interests: Option<RawValues>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descendants: Option<RawNodeList>,
}

impl RawContentNode {
    /// Create a node with identity fields only
    pub fn new(uuid: impl Into<String>, path: impl Into<String>) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or_default().to_string();
        Self {
            uuid: Some(uuid.into()),
            path: Some(path),
            name: Some(name),
            ..Self::default()
        }
    }

    /// Set the primary node type
    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.primary_node_type = Some(RawNodeType {
            name: type_name.into(),
        });
        self
    }

    /// Append an attribute
    pub fn with_attribute(mut self, attribute: RawAttribute) -> Self {
        self.properties.get_or_insert_with(Vec::new).push(attribute);
        self
    }

    /// Type name, if a descriptor is present
    pub fn type_name(&self) -> Option<&str> {
        self.primary_node_type.as_ref().map(|t| t.name.as_str())
    }

    /// Attribute list, empty when absent
    pub fn attributes(&self) -> &[RawAttribute] {
        self.properties.as_deref().unwrap_or_default()
    }

    /// Identifier used in diagnostics: the path, else the uuid
    pub fn label_for_logs(&self) -> &str {
        self.path
            .as_deref()
            .filter(|p| !p.is_empty())
            .or(self.uuid.as_deref())
            .unwrap_or_default()
    }
}

/// Read an optional part of a node, degrading an unreadable one to `None`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(parse_or_warn(value)),
    }
}

/// Read an optional list, keeping the entries that parse
///
/// A value that is not a list at all is treated as absent.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => Ok(Some(
            items
                .into_iter()
                .filter(|item| !item.is_null())
                .filter_map(parse_or_warn)
                .collect(),
        )),
        Some(other) => {
            warn!(found = %other, "expected a list, ignoring the field");
            Ok(None)
        }
    }
}

fn parse_or_warn<T: DeserializeOwned>(value: Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!(error = %e, "unreadable optional node data, ignoring it");
            None
        }
    }
}

/// A fully materialized query response: root plus flat descendant list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawQueryResult {
    pub root: RawContentNode,
    pub descendants: Vec<RawContentNode>,
}

impl RawQueryResult {
    /// Split a root node carrying `descendants.nodes` into root and list
    pub fn from_root(mut root: RawContentNode) -> Self {
        let descendants = root.descendants.take().map(|d| d.nodes).unwrap_or_default();
        Self { root, descendants }
    }
}
