//! Transiting-planet target list tooling.
//!
//! Two pipelines share this crate:
//!
//! - **generate_targets** queries the NASA Exoplanet Archive for every
//!   transiting planet, cleans identifier strings, tags each planet with its
//!   discovery mission and writes `ASTR502_Mega_Target_List.csv`.
//! - **target_stats** reads that list back, summarises literature ages and
//!   renders a four-panel statistics figure.
//!
//! The intermediate CSV is the only link between them.

pub mod catalogs;
pub mod config;
pub mod data;
pub mod pipeline;
pub mod stats;
pub mod viz;

pub use catalogs::{CatalogError, MissionSource, TargetCatalog, TargetRecord, TargetSet};
pub use config::{AnalysisConfig, ArchiveConfig};
