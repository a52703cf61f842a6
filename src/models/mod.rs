//! Core data models for content export
//!
//! Raw nodes as the retrieval layer hands them over, the canonical records the
//! engine works on, schema descriptors used for selection, and tree nodes.

pub mod raw;
pub mod record;
pub mod schema;
pub mod tree;

pub use raw::{
    AttributeDefinition, RawAttribute, RawCategoryRef, RawContentNode, RawNodeList, RawNodeType,
    RawQueryResult, RawTagList, RawValues,
};
pub use record::{AttributeValue, Attributes, CanonicalRecord, Scalar, IDENTITY_COLUMNS};
pub use schema::{
    content_type_options, visible_attributes, AttributeSchema, ContentTypeDescriptor,
    ContentTypeOption,
};
pub use tree::TreeNode;
