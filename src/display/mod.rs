//! Display formatting for terminal output
//!
//! Renders schema listings and export summaries as terminal tables.

pub mod export;
pub mod schema;

use tabled::{settings::Style, Table, Tabled};

pub use export::format_export_summary;
pub use schema::{format_attributes, format_content_types};

/// Render rows with the shared table style
pub fn render_rows<T: Tabled>(rows: &[T]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}
