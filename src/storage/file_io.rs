//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't leave half-written exports behind.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::ExportError;

/// Read JSON from a file, returning an error if file doesn't exist
pub fn read_json_required<T, P>(path: P) -> Result<T, ExportError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Err(ExportError::Io(format!("File not found: {}", path.display())));
    }

    let file = File::open(path)
        .map_err(|e| ExportError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| ExportError::Json(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write a finished payload atomically (write to temp, then rename)
///
/// The target is either completely written or not created at all.
pub fn write_payload_atomic(
    dir: &Path,
    file_name: &str,
    payload: &[u8],
) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir).map_err(|e| {
        ExportError::Io(format!("Failed to create directory {}: {}", dir.display(), e))
    })?;

    let path = dir.join(file_name);
    // Temp file in the same directory keeps the rename atomic
    let temp_path = dir.join(format!(".{}.tmp", file_name));

    let file = File::create(&temp_path)
        .map_err(|e| ExportError::Io(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(payload)
        .map_err(|e| ExportError::Io(format!("Failed to write payload: {}", e)))?;

    writer
        .flush()
        .map_err(|e| ExportError::Io(format!("Failed to flush payload: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| ExportError::Io(format!("Failed to sync payload: {}", e)))?;

    fs::rename(&temp_path, &path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        ExportError::Io(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(path)
}
