//! Node normalization
//!
//! Turns raw repository nodes into canonical records. Normalization never
//! fails: absent or malformed optional data degrades to `null`.

use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{
    AttributeValue, Attributes, CanonicalRecord, RawAttribute, RawContentNode, RawQueryResult,
    RawTagList, RawValues, Scalar,
};

/// Attribute key holding the flattened tag list
pub const TAG_LIST_KEY: &str = "j:tagList";
/// Attribute key holding category display names
pub const DEFAULT_CATEGORY_KEY: &str = "j:defaultCategory";
/// Attribute key holding interest values
pub const INTERESTS_KEY: &str = "interests";

/// Composite keys, in the order they are appended to tables
pub const RESERVED_COLUMNS: [&str; 3] = [TAG_LIST_KEY, DEFAULT_CATEGORY_KEY, INTERESTS_KEY];

/// Root and descendants of one query result, normalized
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedResult {
    pub root: CanonicalRecord,
    pub descendants: Vec<CanonicalRecord>,
}

/// Normalize one raw node against the requested attribute names
pub fn normalize(node: &RawContentNode, requested: &[String]) -> CanonicalRecord {
    let mut attributes = Attributes::new();

    for name in requested {
        let value = find_attribute(node, name).and_then(attribute_value);
        attributes.insert(name.clone(), value);
    }

    if let Some(tags) = tag_values(node) {
        attributes.insert(TAG_LIST_KEY, Some(tags));
    }
    if let Some(categories) = category_names(node) {
        attributes.insert(DEFAULT_CATEGORY_KEY, Some(AttributeValue::strings(categories)));
    }
    if let Some(interests) = node.interests.as_ref().and_then(holder_sequence) {
        attributes.insert(INTERESTS_KEY, Some(interests));
    }

    CanonicalRecord::new(
        node.uuid.clone().unwrap_or_default(),
        node.path.clone().unwrap_or_default(),
        node.name.clone().unwrap_or_default(),
    )
    .with_type(node.type_name().map(str::to_string))
    .with_display_label(node.display_name.clone())
    .with_attributes(attributes)
}

/// Normalize a whole query result, keeping descendant order
pub fn normalize_result(result: &RawQueryResult, requested: &[String]) -> NormalizedResult {
    let root = normalize(&result.root, requested);
    let descendants: Vec<CanonicalRecord> = result
        .descendants
        .iter()
        .map(|node| normalize(node, requested))
        .collect();

    debug!(
        root = root.path(),
        descendants = descendants.len(),
        attributes = requested.len(),
        "normalized query result"
    );

    NormalizedResult { root, descendants }
}

/// First attribute with the given name; later duplicates are ignored
fn find_attribute<'a>(node: &'a RawContentNode, name: &str) -> Option<&'a RawAttribute> {
    let mut matches = node.attributes().iter().filter(|a| a.name == name);
    let first = matches.next();
    let extra = matches.count();
    if extra > 0 {
        warn!(
            node = node.label_for_logs(),
            attribute = name,
            duplicates = extra,
            "attribute appears more than once, keeping the first"
        );
    }
    first
}

/// Resolve the authoritative value, trusting `definition.multiple`
fn attribute_value(attribute: &RawAttribute) -> Option<AttributeValue> {
    if attribute.is_multiple() {
        if attribute.values.is_none() && attribute.value.is_some() {
            warn!(
                attribute = attribute.name.as_str(),
                "multi-valued attribute carries a single value only"
            );
        }
        Some(sequence(attribute.values.as_deref().unwrap_or_default()))
    } else {
        if attribute.value.is_none() && attribute.values.is_some() {
            warn!(
                attribute = attribute.name.as_str(),
                "single-valued attribute carries a value list only"
            );
        }
        attribute
            .value
            .as_ref()
            .and_then(Scalar::from_json)
            .map(AttributeValue::Single)
    }
}

fn tag_values(node: &RawContentNode) -> Option<AttributeValue> {
    match node.tag_list.as_ref()? {
        RawTagList::Direct(holder) => holder_sequence(holder),
        RawTagList::Wrapped(holders) => {
            if holders.len() > 1 {
                warn!(
                    node = node.label_for_logs(),
                    wrappers = holders.len(),
                    "tag list wraps several value holders, using the first"
                );
            }
            holders.first().and_then(holder_sequence)
        }
    }
}

fn category_names(node: &RawContentNode) -> Option<Vec<String>> {
    node.default_category.as_ref().map(|refs| {
        refs.iter()
            .filter_map(|category| category.display_name.clone())
            .collect()
    })
}

fn holder_sequence(holder: &RawValues) -> Option<AttributeValue> {
    holder.values.as_deref().map(sequence)
}

/// Copy a value list element by element; `null` elements keep their slot
fn sequence(values: &[Value]) -> AttributeValue {
    AttributeValue::Multiple(values.iter().map(Scalar::from_json).collect())
}
