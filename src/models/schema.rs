//! Content type and attribute schema descriptors
//!
//! These come from the retrieval layer and drive the selection step: which
//! type to export and which of its attributes become columns.

use serde::{Deserialize, Serialize};

/// A content type offered for export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeDescriptor {
    /// Technical type name (e.g. "jnt:news")
    pub name: String,

    /// Localized label
    #[serde(default, alias = "displayName")]
    pub display_label: String,

    /// Icon location without extension
    #[serde(default, alias = "icon")]
    pub icon_ref: Option<String>,
}

/// An attribute declared by a content type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeSchema {
    pub name: String,

    #[serde(default, alias = "displayName")]
    pub display_label: String,

    #[serde(default)]
    pub hidden: bool,
}

/// Entry of the content type selection list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTypeOption {
    pub label: String,
    pub value: String,
    pub icon: Option<String>,
}

/// Build the selection list, sorted by label ignoring case
pub fn content_type_options(types: &[ContentTypeDescriptor]) -> Vec<ContentTypeOption> {
    let mut options: Vec<ContentTypeOption> = types
        .iter()
        .map(|t| ContentTypeOption {
            label: t.display_label.clone(),
            value: t.name.clone(),
            icon: t.icon_ref.as_ref().map(|icon| format!("{}.png", icon)),
        })
        .collect();

    options.sort_by_cached_key(|o| o.label.to_lowercase());
    options
}

/// Attributes a user may select, in declaration order
pub fn visible_attributes(attributes: &[AttributeSchema]) -> Vec<&AttributeSchema> {
    attributes.iter().filter(|a| !a.hidden).collect()
}
