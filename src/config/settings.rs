//! User settings for content export
//!
//! Manages defaults for the separator, output naming, formats and the
//! repository context. Command-line flags override them per invocation.

use serde::{Deserialize, Serialize};

use super::context::ExportContext;
use super::paths::ExportPaths;
use crate::error::ExportError;
use crate::export::{ExportFormat, TreeEncoding};

/// Separators offered in the settings menu
pub const SEPARATOR_CHOICES: [char; 5] = [';', ',', '#', '|', '/'];

/// User settings for content export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Cell separator for tabular output
    #[serde(default = "default_separator")]
    pub separator: char,

    /// Stem of exported file names, before the timestamp
    #[serde(default = "default_base_name")]
    pub base_name: String,

    #[serde(default)]
    pub default_format: ExportFormat,

    #[serde(default)]
    pub tree_encoding: TreeEncoding,

    /// Indent JSON tree output
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Add one column per path level to tables
    #[serde(default)]
    pub include_path_levels: bool,

    /// Site to export from, when not given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_key: Option<String>,

    #[serde(default = "default_language")]
    pub language: String,

    /// Workspace name as known to the repository ("default" or "live")
    #[serde(default = "default_workspace")]
    pub workspace: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_separator() -> char {
    ';'
}

fn default_base_name() -> String {
    "exported_content".to_string()
}

fn default_pretty() -> bool {
    true
}

fn default_language() -> String {
    "en".to_string()
}

fn default_workspace() -> String {
    "default".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            separator: default_separator(),
            base_name: default_base_name(),
            default_format: ExportFormat::default(),
            tree_encoding: TreeEncoding::default(),
            pretty: default_pretty(),
            include_path_levels: false,
            site_key: None,
            language: default_language(),
            workspace: default_workspace(),
        }
    }
}

impl Settings {
    /// Whether the configured separator is one of the offered choices
    pub fn separator_is_offered(&self) -> bool {
        SEPARATOR_CHOICES.contains(&self.separator)
    }

    /// Build the repository context, letting explicit values win
    pub fn context(
        &self,
        site_key: Option<String>,
        language: Option<String>,
        workspace: Option<String>,
    ) -> Result<ExportContext, ExportError> {
        let site_key = site_key.or_else(|| self.site_key.clone()).ok_or_else(|| {
            ExportError::Config("No site key given and none configured".into())
        })?;

        Ok(ExportContext::new(
            site_key,
            language.unwrap_or_else(|| self.language.clone()),
            &workspace.unwrap_or_else(|| self.workspace.clone()),
        ))
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &ExportPaths) -> Result<Self, ExportError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| ExportError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ExportError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExportPaths) -> Result<(), ExportError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ExportError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ExportError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
