//! Data module for querying and cleaning archive data
//!
//! This module provides the archive query builder, the TAP client and the
//! string cleaning applied to identifier columns.

pub mod archive;
pub mod cleaning;
pub mod query;

pub use archive::{ArchiveClient, ArchiveError};
pub use cleaning::{clean_field, STRING_COLUMNS};
pub use query::{flatten_query, ArchiveQuery, TARGET_COLUMNS};
