//! ADQL query construction for the Exoplanet Archive TAP service

use crate::config::ArchiveConfig;

/// Columns selected from the archive, in output order
pub const TARGET_COLUMNS: [&str; 30] = [
    "pl_name",
    "hostname",
    "gaia_dr3_id",
    "gaia_dr2_id",
    "tic_id",
    "hd_name",
    "ra",
    "dec",
    "sy_vmag",
    "sy_jmag",
    "sy_kmag",
    "sy_tmag",
    "sy_kepmag",
    "sy_gaiamag",
    "st_teff",
    "st_logg",
    "st_met",
    "st_mass",
    "st_rad",
    "st_spectype",
    "st_lum",
    "st_age",
    "st_ageerr1",
    "st_ageerr2",
    "st_rotp",
    "pl_orbper",
    "pl_rade",
    "pl_trandur",
    "disc_facility",
    "disc_year",
];

/// Planetary systems composite parameters table
pub const DEFAULT_TABLE: &str = "pscomppars";

/// Restrict to transiting planets
pub const DEFAULT_FILTER: &str = "tran_flag = 1";

/// Sort by right ascension
pub const DEFAULT_ORDER_BY: &str = "ra";

/// A `SELECT ... FROM ... WHERE ... ORDER BY ...` query against one table
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveQuery {
    pub columns: Vec<String>,
    pub table: String,
    pub filter: Option<String>,
    pub order_by: Option<String>,
}

impl ArchiveQuery {
    pub fn from_config(config: &ArchiveConfig) -> Self {
        Self {
            columns: config.columns.clone(),
            table: config.table.clone(),
            filter: Some(config.filter.clone()).filter(|f| !f.trim().is_empty()),
            order_by: Some(config.order_by.clone()).filter(|o| !o.trim().is_empty()),
        }
    }

    /// Render the query as a single-line ADQL string
    pub fn to_adql(&self) -> String {
        let mut query = format!(
            "SELECT {} FROM {}",
            self.columns.join(", "),
            self.table
        );
        if let Some(filter) = &self.filter {
            query.push_str(" WHERE ");
            query.push_str(filter);
        }
        if let Some(order_by) = &self.order_by {
            query.push_str(" ORDER BY ");
            query.push_str(order_by);
        }
        flatten_query(&query)
    }
}

impl Default for ArchiveQuery {
    fn default() -> Self {
        Self::from_config(&ArchiveConfig::default())
    }
}

/// Collapse all whitespace runs (including line breaks) into single spaces
pub fn flatten_query(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
