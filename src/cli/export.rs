//! CLI command for running an export
//!
//! Merges command-line flags over the saved settings, opens the repository
//! dump and hands everything to the export coordinator.

use std::path::PathBuf;

use chrono::Utc;
use clap::Args;
use tracing::{debug, warn};

use crate::config::{ExportPaths, Settings};
use crate::display::format_export_summary;
use crate::error::{ExportError, ExportResult};
use crate::export::{run_export, ExportFailure, ExportFormat, ExportRequest, TreeEncoding};
use crate::services::{JsonDumpSource, QuerySource};
use crate::storage::DirectoryDelivery;

/// Arguments of the `run` command
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Repository dump to read content from
    #[arg(short, long, env = "CONTENT_EXPORT_SOURCE")]
    pub source: PathBuf,

    /// Content type to export (e.g. "jnt:news")
    #[arg(short = 't', long = "type")]
    pub content_type: String,

    /// Attribute to export; repeat for more. Defaults to every visible attribute
    #[arg(short, long = "attr")]
    pub attributes: Vec<String>,

    /// Table or tree output
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Cell separator for tables
    #[arg(short, long)]
    pub delimiter: Option<char>,

    /// Encoding of tree output
    #[arg(short, long, value_enum)]
    pub encoding: Option<TreeEncoding>,

    /// Stem of the exported file name
    #[arg(long)]
    pub base_name: Option<String>,

    /// Directory the file is written to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Site key
    #[arg(long)]
    pub site: Option<String>,

    /// Content language
    #[arg(long)]
    pub language: Option<String>,

    /// Repository workspace ("default" or "live")
    #[arg(long)]
    pub workspace: Option<String>,

    /// Add one column per path level to tables
    #[arg(long)]
    pub path_levels: bool,

    /// Write JSON trees without indentation
    #[arg(long)]
    pub compact: bool,
}

impl RunArgs {
    /// Settings overlaid with the flags given on the command line
    fn request(&self, settings: &Settings, attributes: Vec<String>) -> ExportRequest {
        let mut request = ExportRequest::from_settings(settings, attributes);

        if let Some(format) = self.format {
            request.format = format;
        }
        if let Some(delimiter) = self.delimiter {
            request.delimiter = delimiter;
        }
        if let Some(encoding) = self.encoding {
            request.tree_encoding = encoding;
        }
        if let Some(base_name) = &self.base_name {
            request.base_name = base_name.clone();
        }
        if self.path_levels {
            request.include_path_levels = true;
        }
        if self.compact {
            request.pretty = false;
        }

        request
    }
}

/// Handle the `run` command
///
/// Any failure, including those before serialization starts, is reported
/// against the file name the export would have produced.
pub fn handle_run_command(
    paths: &ExportPaths,
    settings: &Settings,
    args: RunArgs,
) -> Result<(), ExportFailure> {
    let preliminary = args.request(settings, args.attributes.clone());
    let fail = |error: ExportError| ExportFailure {
        file_name: preliminary.file_name_at(Utc::now()),
        error,
    };

    let context = settings
        .context(args.site.clone(), args.language.clone(), args.workspace.clone())
        .map_err(fail)?;
    let source = JsonDumpSource::open(&args.source).map_err(fail)?;
    let attributes = selected_attributes(&source, &args).map_err(fail)?;

    let request = args.request(settings, attributes);
    let output_dir = args.output_dir.clone().unwrap_or_else(|| paths.output_dir());
    let delivery = DirectoryDelivery::new(output_dir);

    debug!(
        site = context.site_key.as_str(),
        content_type = args.content_type.as_str(),
        columns = request.attributes.len(),
        "starting export"
    );

    let delivered = run_export(&source, &delivery, &context, &args.content_type, &request)?;

    println!("Exported {}", delivered.outcome.file_name());
    println!("{}", format_export_summary(&delivered));

    Ok(())
}

/// Attributes named on the command line, or every visible one of the type
fn selected_attributes(source: &JsonDumpSource, args: &RunArgs) -> ExportResult<Vec<String>> {
    if !args.attributes.is_empty() {
        return Ok(args.attributes.clone());
    }

    match source.attributes(&args.content_type) {
        Ok(schema) => Ok(crate::models::visible_attributes(&schema)
            .into_iter()
            .map(|a| a.name.clone())
            .collect()),
        Err(e) if e.is_not_found() => {
            warn!(
                content_type = args.content_type.as_str(),
                "no attribute schema in dump, exporting identity columns only"
            );
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}
