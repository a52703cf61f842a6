//! Configuration module for content export
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence
//! - The explicit repository context of an export

pub mod context;
pub mod paths;
pub mod settings;

pub use context::{ExportContext, Workspace};
pub use paths::ExportPaths;
pub use settings::{Settings, SEPARATOR_CHOICES};
