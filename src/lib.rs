//! Content export - repository content as CSV tables or nested trees
//!
//! This library exports every item of one content type below a site root.
//! Raw query results are normalized into canonical records, which are then
//! written either as a fully quoted delimiter-separated table or as a tree
//! rebuilt from the items' paths and encoded as JSON or YAML.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Paths, user settings and the explicit repository context
//! - `error`: Custom error types
//! - `models`: Raw nodes, canonical records, schema descriptors, tree nodes
//! - `services`: Normalization and the retrieval interface
//! - `export`: Table and tree serializers, and the export coordinator
//! - `storage`: Delivery of finished payloads to disk
//! - `display`: Terminal tables
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use content_export::config::{ExportPaths, Settings};
//! use content_export::export::{run_export, ExportRequest};
//! use content_export::services::JsonDumpSource;
//! use content_export::storage::DirectoryDelivery;
//!
//! let paths = ExportPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let context = settings.context(Some("mysite".into()), None, None)?;
//!
//! let source = JsonDumpSource::open("dump.json")?;
//! let delivery = DirectoryDelivery::new(paths.output_dir());
//! let request = ExportRequest::from_settings(&settings, vec!["jcr:title".into()]);
//! let delivered = run_export(&source, &delivery, &context, "jnt:news", &request)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{ExportError, ExportResult};
