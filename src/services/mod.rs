//! Service layer for content export
//!
//! Normalization of raw nodes into canonical records, and the retrieval
//! interface that supplies raw nodes in the first place.

pub mod normalizer;
pub mod source;

pub use normalizer::{
    normalize, normalize_result, NormalizedResult, DEFAULT_CATEGORY_KEY, INTERESTS_KEY,
    RESERVED_COLUMNS, TAG_LIST_KEY,
};
pub use source::{ContentQuery, JsonDumpSource, QuerySource, RepositoryDump};
