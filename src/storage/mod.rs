//! Delivery of finished exports to the filesystem
//!
//! The engine only produces bytes; this layer hands a complete payload to the
//! filesystem and is never called with partial output.

pub mod file_io;

use std::path::{Path, PathBuf};

use crate::error::ExportResult;
use crate::export::ExportOutcome;

pub use file_io::{read_json_required, write_payload_atomic};

/// Receives finished export payloads
pub trait Delivery {
    /// Store the outcome, returning where it ended up
    fn deliver(&self, outcome: &ExportOutcome) -> ExportResult<PathBuf>;
}

/// Writes payloads into one directory
#[derive(Debug, Clone)]
pub struct DirectoryDelivery {
    dir: PathBuf,
}

impl DirectoryDelivery {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Delivery for DirectoryDelivery {
    fn deliver(&self, outcome: &ExportOutcome) -> ExportResult<PathBuf> {
        write_payload_atomic(&self.dir, &outcome.file_name(), &outcome.payload)
    }
}
