//! Export coordination
//!
//! Picks the serializer for the requested format, names the output file and
//! reports a single outcome: a complete payload, or a failure carrying the
//! file name that was attempted.

use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;
use tracing::{debug, info};

use super::csv::{max_path_levels, render_table, TableLayout};
use super::json::export_tree_json;
use super::tree::build_tree;
use super::yaml::export_tree_yaml;
use super::{file_extension, ExportFormat, TreeEncoding};
use crate::config::{ExportContext, Settings};
use crate::error::{ExportError, ExportResult};
use crate::services::{normalize_result, ContentQuery, NormalizedResult, QuerySource};
use crate::storage::Delivery;

/// What to export and how to write it
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub format: ExportFormat,
    /// Attribute names selected by the user, in column order
    pub attributes: Vec<String>,
    pub delimiter: char,
    /// File name stem, before the timestamp
    pub base_name: String,
    pub tree_encoding: TreeEncoding,
    pub pretty: bool,
    pub include_path_levels: bool,
}

impl ExportRequest {
    /// A request using the user's saved preferences
    pub fn from_settings(settings: &Settings, attributes: Vec<String>) -> Self {
        Self {
            format: settings.default_format,
            attributes,
            delimiter: settings.separator,
            base_name: settings.base_name.clone(),
            tree_encoding: settings.tree_encoding,
            pretty: settings.pretty,
            include_path_levels: settings.include_path_levels,
        }
    }

    fn extension(&self) -> &'static str {
        file_extension(self.format, self.tree_encoding)
    }

    /// File name, with extension, of an export started at `now`
    pub fn file_name_at(&self, now: DateTime<Utc>) -> String {
        format!("{}.{}", export_filename(&self.base_name, now), self.extension())
    }
}

/// Counts describing a finished export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Rows written, or nodes attached to the tree
    pub records: usize,
    /// Table columns; zero for trees
    pub columns: usize,
    /// Descendants left out of the tree
    pub orphans: usize,
}

/// A complete export, ready for delivery
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOutcome {
    /// File name stem: `<base name>_<timestamp>`
    pub filename: String,
    pub payload: Vec<u8>,
    pub format: ExportFormat,
    pub tree_encoding: TreeEncoding,
    pub stats: ExportStats,
}

impl ExportOutcome {
    pub fn extension(&self) -> &'static str {
        file_extension(self.format, self.tree_encoding)
    }

    /// File name with extension
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.filename, self.extension())
    }

    pub fn mime_type(&self) -> &'static str {
        match (self.format, self.tree_encoding) {
            (ExportFormat::Table, _) => "text/csv;charset=utf-8",
            (ExportFormat::Tree, TreeEncoding::Json) => "application/json;charset=utf-8",
            (ExportFormat::Tree, TreeEncoding::Yaml) => "application/yaml;charset=utf-8",
        }
    }
}

/// A failed export attempt
#[derive(Debug, Error)]
#[error("{file_name} failed: {error}")]
pub struct ExportFailure {
    /// File name, with extension, the export would have produced
    pub file_name: String,
    #[source]
    pub error: ExportError,
}

/// An outcome that was handed to a delivery target
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveredExport {
    pub outcome: ExportOutcome,
    pub location: std::path::PathBuf,
}

/// Filesystem-safe, sortable rendering of an instant
pub fn export_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
        .chars()
        .filter(|c| !matches!(c, ':' | '.' | '-'))
        .collect()
}

/// `<base name>_<timestamp>`
pub fn export_filename(base_name: &str, now: DateTime<Utc>) -> String {
    format!("{}_{}", base_name, export_timestamp(now))
}

/// Export already normalized records
pub fn export_data(
    request: &ExportRequest,
    data: NormalizedResult,
) -> Result<ExportOutcome, ExportFailure> {
    export_data_at(request, data, Utc::now())
}

/// Export already normalized records, naming the file after `now`
pub fn export_data_at(
    request: &ExportRequest,
    data: NormalizedResult,
    now: DateTime<Utc>,
) -> Result<ExportOutcome, ExportFailure> {
    let filename = export_filename(&request.base_name, now);
    let fail = |error: ExportError| ExportFailure {
        file_name: request.file_name_at(now),
        error,
    };

    validate_base_name(&request.base_name).map_err(fail)?;

    let (payload, stats) = match request.format {
        ExportFormat::Table => serialize_records(request, &data.descendants),
        ExportFormat::Tree => serialize_tree(request, data),
    }
    .map_err(fail)?;

    debug!(
        filename = filename.as_str(),
        bytes = payload.len(),
        records = stats.records,
        "export serialized"
    );

    Ok(ExportOutcome {
        filename,
        payload,
        format: request.format,
        tree_encoding: request.tree_encoding,
        stats,
    })
}

/// Retrieve, normalize, serialize and deliver one export
///
/// Delivery only happens once the payload is complete.
pub fn run_export<S, D>(
    source: &S,
    delivery: &D,
    context: &ExportContext,
    content_type: &str,
    request: &ExportRequest,
) -> Result<DeliveredExport, ExportFailure>
where
    S: QuerySource + ?Sized,
    D: Delivery + ?Sized,
{
    let now = Utc::now();
    let attempted = request.file_name_at(now);

    let query = ContentQuery::new(context, content_type, request.attributes.clone());
    let raw = source.fetch(&query).map_err(|error| ExportFailure {
        file_name: attempted.clone(),
        error,
    })?;

    let normalized = normalize_result(&raw, &request.attributes);
    let outcome = export_data_at(request, normalized, now)?;

    let location = delivery.deliver(&outcome).map_err(|error| ExportFailure {
        file_name: attempted,
        error,
    })?;

    info!(
        file = %location.display(),
        records = outcome.stats.records,
        orphans = outcome.stats.orphans,
        "export delivered"
    );

    Ok(DeliveredExport { outcome, location })
}

fn validate_base_name(base_name: &str) -> ExportResult<()> {
    if base_name.trim().is_empty() {
        return Err(ExportError::Validation("Base name cannot be empty".into()));
    }
    if base_name.contains(|c: char| c == '/' || c == '\\') {
        return Err(ExportError::Validation(format!(
            "Base name cannot contain path separators: {}",
            base_name
        )));
    }
    Ok(())
}

fn serialize_records(
    request: &ExportRequest,
    records: &[crate::models::CanonicalRecord],
) -> ExportResult<(Vec<u8>, ExportStats)> {
    let levels = if request.include_path_levels {
        max_path_levels(records)
    } else {
        0
    };
    let layout = TableLayout::for_selection(&request.attributes, levels);
    let payload = render_table(records, &layout, request.delimiter).into_bytes();

    Ok((
        payload,
        ExportStats {
            records: records.len(),
            columns: layout.len(),
            orphans: 0,
        },
    ))
}

fn serialize_tree(
    request: &ExportRequest,
    data: NormalizedResult,
) -> ExportResult<(Vec<u8>, ExportStats)> {
    let tree = build_tree(data.root, data.descendants)?;

    let mut payload = Vec::new();
    match request.tree_encoding {
        TreeEncoding::Json => export_tree_json(&tree.root, &mut payload, request.pretty)?,
        TreeEncoding::Yaml => export_tree_yaml(&tree.root, &mut payload)?,
    }

    Ok((
        payload,
        ExportStats {
            records: tree.attached(),
            columns: 0,
            orphans: tree.orphans.len(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::json::import_tree_json;
    use crate::models::{CanonicalRecord, RawAttribute, RawContentNode};
    use crate::services::{JsonDumpSource, RepositoryDump};
    use crate::storage::DirectoryDelivery;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap()
    }

    fn request(format: ExportFormat) -> ExportRequest {
        ExportRequest {
            format,
            attributes: vec!["title".into()],
            delimiter: ';',
            base_name: "exported_content".into(),
            tree_encoding: TreeEncoding::Json,
            pretty: true,
            include_path_levels: false,
        }
    }

    fn data() -> NormalizedResult {
        NormalizedResult {
            root: CanonicalRecord::new("r", "/sites/s", "s"),
            descendants: vec![
                CanonicalRecord::new("a", "/sites/s/a", "a"),
                CanonicalRecord::new("b", "/sites/s/a/b", "b"),
                CanonicalRecord::new("c", "/sites/s/c", "c"),
            ],
        }
    }

    #[test]
    fn test_filename_timestamp() {
        assert_eq!(export_timestamp(instant()), "20240305T140709000Z");
        assert_eq!(
            export_filename("exported_content", instant()),
            "exported_content_20240305T140709000Z"
        );
    }

    #[test]
    fn test_table_export() {
        let outcome = export_data_at(&request(ExportFormat::Table), data(), instant()).unwrap();

        assert_eq!(outcome.file_name(), "exported_content_20240305T140709000Z.csv");
        assert_eq!(outcome.mime_type(), "text/csv;charset=utf-8");
        assert_eq!(outcome.stats.records, 3);
        assert_eq!(outcome.stats.columns, 9);

        let text = String::from_utf8(outcome.payload).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "uuid;path;name;primaryNodeType;displayName;title;j:tagList;j:defaultCategory;interests"
        );
        assert_eq!(
            lines.next().unwrap(),
            "\"a\";\"/sites/s/a\";\"a\";\"\";\"\";\"\";\"\";\"\";\"\""
        );
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_table_with_path_levels() {
        let mut req = request(ExportFormat::Table);
        req.include_path_levels = true;
        let outcome = export_data_at(&req, data(), instant()).unwrap();

        let text = String::from_utf8(outcome.payload).unwrap();
        assert!(text
            .lines()
            .next()
            .unwrap()
            .contains("displayName;Level 1;Level 2;Level 3;Level 4;title"));
    }

    #[test]
    fn test_tree_export() {
        let outcome = export_data_at(&request(ExportFormat::Tree), data(), instant()).unwrap();

        assert_eq!(outcome.file_name(), "exported_content_20240305T140709000Z.json");
        assert_eq!(outcome.mime_type(), "application/json;charset=utf-8");
        assert_eq!(outcome.stats.records, 4);

        let tree = import_tree_json(&outcome.payload).unwrap();
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.children.len(), 2);
    }

    #[test]
    fn test_yaml_tree_export() {
        let mut req = request(ExportFormat::Tree);
        req.tree_encoding = TreeEncoding::Yaml;
        let outcome = export_data_at(&req, data(), instant()).unwrap();

        assert_eq!(outcome.extension(), "yaml");
        assert!(String::from_utf8(outcome.payload)
            .unwrap()
            .starts_with("# Content tree export"));
    }

    #[test]
    fn test_malformed_tree_keeps_filename() {
        let mut broken = data();
        broken.descendants.push(CanonicalRecord::new("nopath", "", "x"));

        let failure = export_data_at(&request(ExportFormat::Tree), broken, instant()).unwrap_err();
        assert_eq!(failure.file_name, "exported_content_20240305T140709000Z.json");
        assert!(failure.error.is_malformed_input());
        assert!(failure.to_string().starts_with("exported_content_20240305T140709000Z.json failed"));
    }

    #[test]
    fn test_table_tolerates_missing_path() {
        let mut sparse = data();
        sparse.descendants.push(CanonicalRecord::new("nopath", "", "x"));
        let outcome = export_data_at(&request(ExportFormat::Table), sparse, instant()).unwrap();
        assert_eq!(outcome.stats.records, 4);
    }

    #[test]
    fn test_invalid_base_name() {
        let mut req = request(ExportFormat::Table);
        req.base_name = "../escape".into();
        let failure = export_data_at(&req, data(), instant()).unwrap_err();
        assert!(matches!(failure.error, ExportError::Validation(_)));
    }

    #[test]
    fn test_file_name_at() {
        let mut req = request(ExportFormat::Tree);
        req.tree_encoding = TreeEncoding::Yaml;
        assert_eq!(
            req.file_name_at(instant()),
            "exported_content_20240305T140709000Z.yaml"
        );
    }

    #[test]
    fn test_request_from_settings() {
        let settings = Settings {
            separator: '|',
            include_path_levels: true,
            ..Settings::default()
        };
        let req = ExportRequest::from_settings(&settings, vec!["title".into()]);
        assert_eq!(req.delimiter, '|');
        assert_eq!(req.format, ExportFormat::Table);
        assert!(req.include_path_levels);
    }

    fn dump_source() -> JsonDumpSource {
        let mut root = RawContentNode::new("r", "/sites/s");
        root.descendants = Some(crate::models::RawNodeList {
            nodes: vec![
                RawContentNode::new("a", "/sites/s/a")
                    .with_type("jnt:news")
                    .with_attribute(RawAttribute::single("title", "First")),
                RawContentNode::new("b", "/sites/s/b")
                    .with_type("jnt:news")
                    .with_attribute(RawAttribute::single("title", "Second")),
            ],
        });
        JsonDumpSource::from_dump(RepositoryDump {
            result: Some(root),
            ..RepositoryDump::default()
        })
    }

    #[test]
    fn test_run_export_delivers_file() {
        let temp_dir = TempDir::new().unwrap();
        let delivery = DirectoryDelivery::new(temp_dir.path());
        let context = ExportContext::new("s", "en", "default");

        let delivered = run_export(
            &dump_source(),
            &delivery,
            &context,
            "jnt:news",
            &request(ExportFormat::Table),
        )
        .unwrap();

        assert_eq!(delivered.location, temp_dir.path().join(delivered.outcome.file_name()));
        let written = std::fs::read_to_string(&delivered.location).unwrap();
        assert!(written.contains("\"First\""));
        assert!(written.contains("\"Second\""));
    }

    #[test]
    fn test_run_export_retrieval_failure_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let delivery = DirectoryDelivery::new(temp_dir.path().join("out"));
        let context = ExportContext::new("elsewhere", "en", "default");

        let failure = run_export(
            &dump_source(),
            &delivery,
            &context,
            "jnt:news",
            &request(ExportFormat::Table),
        )
        .unwrap_err();

        assert!(failure.error.is_retrieval());
        assert!(failure.file_name.ends_with(".csv"));
        assert!(!temp_dir.path().join("out").exists());
    }
}
