//! Export summary formatting

use tabled::Tabled;

use super::render_rows;
use crate::export::{DeliveredExport, ExportFormat};

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// Format what a delivered export contains and where it went
pub fn format_export_summary(delivered: &DeliveredExport) -> String {
    let outcome = &delivered.outcome;
    let mut rows = vec![
        SummaryRow {
            metric: "File",
            value: delivered.location.display().to_string(),
        },
        SummaryRow {
            metric: "Type",
            value: outcome.mime_type().to_string(),
        },
        SummaryRow {
            metric: "Bytes",
            value: outcome.payload.len().to_string(),
        },
    ];

    match outcome.format {
        ExportFormat::Table => {
            rows.push(SummaryRow {
                metric: "Rows",
                value: outcome.stats.records.to_string(),
            });
            rows.push(SummaryRow {
                metric: "Columns",
                value: outcome.stats.columns.to_string(),
            });
        }
        ExportFormat::Tree => {
            rows.push(SummaryRow {
                metric: "Nodes",
                value: outcome.stats.records.to_string(),
            });
            rows.push(SummaryRow {
                metric: "Orphans",
                value: outcome.stats.orphans.to_string(),
            });
        }
    }

    render_rows(&rows)
}
