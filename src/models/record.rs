//! Canonical records
//!
//! A canonical record is the schema-stable form of one content node: fixed
//! identity fields plus an ordered attribute mapping. Records are created by
//! the normalizer and only read afterwards.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Column name of the record uuid
pub const UUID_COLUMN: &str = "uuid";
/// Column name of the record path
pub const PATH_COLUMN: &str = "path";
/// Column name of the record name
pub const NAME_COLUMN: &str = "name";
/// Column name of the record type
pub const TYPE_COLUMN: &str = "primaryNodeType";
/// Column name of the display label
pub const DISPLAY_NAME_COLUMN: &str = "displayName";

/// Identity columns, always first in tabular output
pub const IDENTITY_COLUMNS: [&str; 5] = [
    UUID_COLUMN,
    PATH_COLUMN,
    NAME_COLUMN,
    TYPE_COLUMN,
    DISPLAY_NAME_COLUMN,
];

/// Separator used when a multi-valued attribute is flattened to text
pub const MULTI_VALUE_SEPARATOR: &str = ",";

/// A single attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Convert a raw JSON value; `null` has no scalar form
    ///
    /// Arrays and objects are kept as their compact JSON text.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Self::Boolean(*b)),
            Value::Number(n) => Some(match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => Self::Float(n.as_f64().unwrap_or_default()),
            }),
            Value::String(s) => Some(Self::Text(s.clone())),
            other => Some(Self::Text(other.to_string())),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Value of one attribute: a scalar or an ordered sequence of scalars
///
/// Sequence elements keep their position; a `null` element stays `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Multiple(Vec<Option<Scalar>>),
    Single(Scalar),
}

impl AttributeValue {
    /// Build a sequence value from strings
    pub fn strings<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Multiple(
            items
                .into_iter()
                .map(|s| Some(Scalar::Text(s.into())))
                .collect(),
        )
    }

    /// Text form used in table cells; sequences are joined with `,`
    pub fn render(&self) -> String {
        match self {
            Self::Single(scalar) => scalar.to_string(),
            Self::Multiple(items) => items
                .iter()
                .map(|item| item.as_ref().map(Scalar::to_string).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(MULTI_VALUE_SEPARATOR),
        }
    }
}

/// Insertion-ordered mapping from attribute name to value
///
/// `None` marks a requested attribute the node did not carry; it is kept so
/// every record of one export has the same keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    entries: Vec<(String, Option<AttributeValue>)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing an existing key in place
    pub fn insert(&mut self, name: impl Into<String>, value: Option<AttributeValue>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Look up a key; `Some(None)` means present but null
    pub fn get(&self, name: &str) -> Option<&Option<AttributeValue>> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Look up a non-null value
    pub fn value(&self, name: &str) -> Option<&AttributeValue> {
        self.get(name).and_then(Option::as_ref)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&AttributeValue>)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Attributes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AttributesVisitor;

        impl<'de> Visitor<'de> for AttributesVisitor {
            type Value = Attributes;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of attribute names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Attributes, A::Error> {
                let mut attributes = Attributes::new();
                while let Some((key, value)) =
                    access.next_entry::<String, Option<AttributeValue>>()?
                {
                    attributes.insert(key, value);
                }
                Ok(attributes)
            }
        }

        deserializer.deserialize_map(AttributesVisitor)
    }
}

/// Normalized, schema-stable representation of one content node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    uuid: String,
    path: String,
    name: String,
    #[serde(rename = "primaryNodeType")]
    type_name: Option<String>,
    #[serde(rename = "displayName")]
    display_label: Option<String>,
    attributes: Attributes,
}

impl CanonicalRecord {
    /// Create a record with identity fields and no attributes
    pub fn new(uuid: impl Into<String>, path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            path: path.into(),
            name: name.into(),
            type_name: None,
            display_label: None,
            attributes: Attributes::new(),
        }
    }

    pub fn with_type(mut self, type_name: Option<String>) -> Self {
        self.type_name = type_name;
        self
    }

    pub fn with_display_label(mut self, label: Option<String>) -> Self {
        self.display_label = label;
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    pub fn display_label(&self) -> Option<&str> {
        self.display_label.as_deref()
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Non-empty segments of the path
    pub fn path_segments(&self) -> Vec<&str> {
        self.path.split('/').filter(|s| !s.is_empty()).collect()
    }

    /// Text of one column; identity fields shadow attributes of the same name
    pub fn field_text(&self, column: &str) -> String {
        match column {
            UUID_COLUMN => self.uuid.clone(),
            PATH_COLUMN => self.path.clone(),
            NAME_COLUMN => self.name.clone(),
            TYPE_COLUMN => self.type_name.clone().unwrap_or_default(),
            DISPLAY_NAME_COLUMN => self.display_label.clone().unwrap_or_default(),
            _ => self
                .attributes
                .value(column)
                .map(AttributeValue::render)
                .unwrap_or_default(),
        }
    }
}
