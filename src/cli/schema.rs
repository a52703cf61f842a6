//! Schema CLI commands
//!
//! Lists the content types a repository offers and the attributes each of
//! them declares.

use crate::display::{format_attributes, format_content_types};
use crate::error::ExportResult;
use crate::models::{content_type_options, visible_attributes};
use crate::services::QuerySource;

/// List the exportable content types
pub fn handle_types_command<S: QuerySource + ?Sized>(source: &S) -> ExportResult<()> {
    let types = source.content_types()?;
    let options = content_type_options(&types);
    println!("{}", format_content_types(&options));
    Ok(())
}

/// List the attributes of one content type
///
/// Hidden attributes are left out unless `show_hidden` is set.
pub fn handle_attributes_command<S: QuerySource + ?Sized>(
    source: &S,
    content_type: &str,
    show_hidden: bool,
) -> ExportResult<()> {
    let attributes = source.attributes(content_type)?;
    let listed = if show_hidden {
        attributes.iter().collect()
    } else {
        visible_attributes(&attributes)
    };

    println!("Attributes of {}:", content_type);
    println!("{}", format_attributes(&listed));
    Ok(())
}
