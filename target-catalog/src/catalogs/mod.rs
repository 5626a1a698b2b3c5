//! Target catalogs module
//!
//! This module provides the target record model, mission tagging and the
//! on-disk target list.

pub mod mission;
pub mod target;

pub use mission::{MissionSource, MISSION_KEYWORDS};
pub use target::{TargetCatalog, TargetRecord, MISSION_COLUMN};

use std::path::PathBuf;
use thiserror::Error;

/// Errors reading or writing a target list
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The target list file does not exist
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A column needed downstream is absent from the header
    #[error("Missing column: {0}")]
    MissingColumn(String),
}

/// Generic read access to a set of catalog entries
pub trait TargetSet {
    /// Entry type held by this set
    type Entry;

    /// All entries, in file order
    fn records(&self) -> &[Self::Entry];

    /// Get the number of entries
    fn len(&self) -> usize {
        self.records().len()
    }

    /// Check if the set is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
