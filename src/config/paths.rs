//! Path management for content export
//!
//! ## Path Resolution Order
//!
//! 1. `CONTENT_EXPORT_DIR` environment variable (if set)
//! 2. The platform configuration directory for `content-export`

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::ExportError;

/// Environment variable overriding the base directory
pub const BASE_DIR_ENV: &str = "CONTENT_EXPORT_DIR";

/// Manages all paths used by content export
#[derive(Debug, Clone)]
pub struct ExportPaths {
    /// Base directory for settings and default output
    base_dir: PathBuf,
}

impl ExportPaths {
    /// Create a new ExportPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no platform configuration directory can be found.
    pub fn new() -> Result<Self, ExportError> {
        let base_dir = match std::env::var(BASE_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create ExportPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Default directory exported files are delivered to
    pub fn output_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Ensure the base and output directories exist
    pub fn ensure_directories(&self) -> Result<(), ExportError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ExportError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.output_dir())
            .map_err(|e| ExportError::Io(format!("Failed to create output directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, ExportError> {
    ProjectDirs::from("", "", "content-export")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| ExportError::Config("Could not determine a configuration directory".into()))
}
