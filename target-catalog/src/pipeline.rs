//! End-to-end fetch and analysis steps used by the binaries

use crate::catalogs::{CatalogError, MissionSource, TargetCatalog, TargetSet};
use crate::config::{AnalysisConfig, ArchiveConfig};
use crate::data::{ArchiveClient, ArchiveError, ArchiveQuery};
use crate::stats::{aged_samples, AgeSummary};
use crate::viz::StatisticsPlotData;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Counts printed after a successful fetch
#[derive(Debug, Clone, PartialEq)]
pub struct FetchReport {
    pub output: PathBuf,
    pub planets: usize,
    pub unique_hosts: usize,
    pub breakdown: Vec<(MissionSource, usize)>,
}

impl FetchReport {
    pub fn new(catalog: &TargetCatalog, output: PathBuf) -> Self {
        Self {
            output,
            planets: catalog.len(),
            unique_hosts: catalog.unique_host_count(),
            breakdown: catalog.mission_breakdown(),
        }
    }
}

impl fmt::Display for FetchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(30);
        writeln!(f, "{rule}")?;
        writeln!(f, "Success! Data saved to {}", self.output.display())?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Total Planets found:      {}", self.planets)?;
        writeln!(f, "Total Unique Stars:       {}", self.unique_hosts)?;
        writeln!(f, "{rule}")?;
        write!(f, "Breakdown by Mission Source (Planets):")?;
        for (mission, count) in &self.breakdown {
            write!(f, "\n{:<10} {:>6}", mission.label(), count)?;
        }
        Ok(())
    }
}

/// Query the archive, clean and classify the rows, and write the target list.
///
/// The output file is only touched once the request and parse have succeeded.
pub fn fetch_target_list(config: &ArchiveConfig) -> Result<FetchReport, FetchError> {
    let client = ArchiveClient::from_config(config);
    let query = ArchiveQuery::from_config(config);

    let body = client.fetch_csv(&query)?;
    let catalog = TargetCatalog::from_archive_csv(&body)?;
    catalog.save(&config.output)?;

    Ok(FetchReport::new(&catalog, config.output.clone()))
}

/// Text statistics and plot inputs for one target list
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub summary: AgeSummary,
    pub plot_data: StatisticsPlotData,
}

pub fn analyze_target_list(catalog: &TargetCatalog, config: &AnalysisConfig) -> AnalysisReport {
    let samples = aged_samples(catalog);
    log::debug!("{} of {} targets have literature ages", samples.len(), catalog.len());

    AnalysisReport {
        summary: AgeSummary::new(catalog.len(), &samples, config),
        plot_data: StatisticsPlotData::new(catalog, &samples, config),
    }
}
