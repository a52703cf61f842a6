//! Content type and attribute listings

use tabled::Tabled;

use super::render_rows;
use crate::models::{AttributeSchema, ContentTypeOption};

#[derive(Tabled)]
struct ContentTypeRow {
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Type")]
    value: String,
    #[tabled(rename = "Icon")]
    icon: String,
}

#[derive(Tabled)]
struct AttributeRow {
    #[tabled(rename = "Attribute")]
    name: String,
    #[tabled(rename = "Label")]
    label: String,
}

/// Format the content type selection list
pub fn format_content_types(options: &[ContentTypeOption]) -> String {
    if options.is_empty() {
        return "No content types found.".to_string();
    }

    let rows: Vec<ContentTypeRow> = options
        .iter()
        .map(|o| ContentTypeRow {
            label: o.label.clone(),
            value: o.value.clone(),
            icon: o.icon.clone().unwrap_or_default(),
        })
        .collect();

    render_rows(&rows)
}

/// Format the selectable attributes of a content type
pub fn format_attributes(attributes: &[&AttributeSchema]) -> String {
    if attributes.is_empty() {
        return "No selectable attributes.".to_string();
    }

    let rows: Vec<AttributeRow> = attributes
        .iter()
        .map(|a| AttributeRow {
            name: a.name.clone(),
            label: a.display_label.clone(),
        })
        .collect();

    render_rows(&rows)
}
