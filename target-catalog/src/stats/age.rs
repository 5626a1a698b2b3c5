//! Literature age statistics
//!
//! Restricts a target list to rows carrying a literature age, derives the
//! mean age uncertainty per row and counts the young and very young hosts.

use super::scan::fraction;
use crate::catalogs::{TargetRecord, TargetSet};
use crate::config::AnalysisConfig;
use std::fmt;

/// One aged target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeSample {
    /// Literature age, Gyr
    pub age: f64,
    /// `(err1 + |err2|) / 2` with missing bounds taken as 0, Gyr
    pub mean_age_err: f64,
    pub teff: Option<f64>,
    pub met: Option<f64>,
}

impl AgeSample {
    /// `None` when the record has no literature age
    pub fn from_record(record: &TargetRecord) -> Option<Self> {
        let age = record.st_age?;
        Some(Self {
            age,
            mean_age_err: mean_age_err(record.st_ageerr1, record.st_ageerr2),
            teff: record.st_teff,
            met: record.st_met,
        })
    }
}

/// Average of the upper bound and the magnitude of the lower bound
pub fn mean_age_err(upper: Option<f64>, lower: Option<f64>) -> f64 {
    (upper.unwrap_or(0.0) + lower.unwrap_or(0.0).abs()) / 2.0
}

/// Aged subset of a target list
pub fn aged_samples<C>(catalog: &C) -> Vec<AgeSample>
where
    C: TargetSet<Entry = TargetRecord>,
{
    catalog
        .records()
        .iter()
        .filter_map(AgeSample::from_record)
        .collect()
}

/// Human-readable age threshold: "1 Gyr", "2.5 Gyr", or "100 Myr" below 1 Gyr
pub fn age_label(gyr: f64) -> String {
    if gyr < 1.0 {
        // Whole kyr, so 0.1 prints as 100
        format!("{} Myr", (gyr * 1e9).round() / 1e6)
    } else {
        format!("{gyr} Gyr")
    }
}

/// Counts printed by the age report
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeSummary {
    pub total: usize,
    pub with_age: usize,
    pub young: usize,
    pub very_young: usize,
    /// Cut behind `young`, Gyr
    pub young_age_gyr: f64,
    /// Cut behind `very_young`, Gyr
    pub very_young_age_gyr: f64,
}

impl AgeSummary {
    pub fn new(total: usize, samples: &[AgeSample], config: &AnalysisConfig) -> Self {
        Self {
            total,
            with_age: samples.len(),
            young: samples
                .iter()
                .filter(|s| s.age < config.young_age_gyr)
                .count(),
            very_young: samples
                .iter()
                .filter(|s| s.age < config.very_young_age_gyr)
                .count(),
            young_age_gyr: config.young_age_gyr,
            very_young_age_gyr: config.very_young_age_gyr,
        }
    }

    /// Aged targets as a fraction of all targets
    pub fn with_age_fraction(&self) -> Option<f64> {
        fraction(self.with_age, self.total)
    }

    /// Young targets as a fraction of aged targets
    pub fn young_fraction(&self) -> Option<f64> {
        fraction(self.young, self.with_age)
    }
}

/// Render a fraction as a one-decimal percentage
fn percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}%", v * 100.0),
        None => "n/a".to_string(),
    }
}

impl fmt::Display for AgeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(40);
        writeln!(f, "{rule}")?;
        writeln!(f, "Total Targets in List:      {}", self.total)?;
        writeln!(f, "{rule}")?;
        writeln!(
            f,
            "Stars with Literature Ages: {} ({})",
            self.with_age,
            percent(self.with_age_fraction())
        )?;
        writeln!(
            f,
            "{:<28}{} ({} of aged stars)",
            format!("Stars < {}:", age_label(self.young_age_gyr)),
            self.young,
            percent(self.young_fraction())
        )?;
        writeln!(
            f,
            "{:<28}{}",
            format!("Stars < {}:", age_label(self.very_young_age_gyr)),
            self.very_young
        )?;
        write!(f, "{rule}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogs::TargetCatalog;
    use approx::assert_relative_eq;

    fn record(age: Option<f64>, err1: Option<f64>, err2: Option<f64>) -> TargetRecord {
        TargetRecord {
            st_age: age,
            st_ageerr1: err1,
            st_ageerr2: err2,
            ..TargetRecord::default()
        }
    }

    #[test]
    fn test_mean_age_err_with_missing_lower_bound() {
        let sample = AgeSample::from_record(&record(Some(0.5), Some(0.2), None)).unwrap();
        assert_relative_eq!(sample.mean_age_err, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_mean_age_err_uses_magnitude_of_lower_bound() {
        assert_relative_eq!(mean_age_err(Some(1.5), Some(-1.3)), 1.4, epsilon = 1e-12);
        assert_relative_eq!(mean_age_err(None, Some(-0.6)), 0.3, epsilon = 1e-12);
        assert_eq!(mean_age_err(None, None), 0.0);
    }

    #[test]
    fn test_unaged_rows_excluded() {
        assert!(AgeSample::from_record(&record(None, Some(1.0), Some(-1.0))).is_none());
    }

    #[test]
    fn test_summary_buckets() {
        let catalog = TargetCatalog::new(vec![
            record(Some(0.5), Some(0.2), None),
            record(Some(0.05), None, None),
            record(Some(4.6), Some(0.1), Some(-0.1)),
            record(None, None, None),
        ]);
        let samples = aged_samples(&catalog);
        let summary = AgeSummary::new(catalog.len(), &samples, &AnalysisConfig::default());

        assert_eq!(
            summary,
            AgeSummary {
                total: 4,
                with_age: 3,
                young: 2,
                very_young: 1,
                young_age_gyr: 1.0,
                very_young_age_gyr: 0.1,
            }
        );
        assert_relative_eq!(summary.with_age_fraction().unwrap(), 0.75);
        assert_relative_eq!(summary.young_fraction().unwrap(), 2.0 / 3.0);
    }

    #[test]
    fn test_half_gyr_is_young_not_very_young() {
        let samples = [AgeSample::from_record(&record(Some(0.5), Some(0.2), None)).unwrap()];
        let summary = AgeSummary::new(1, &samples, &AnalysisConfig::default());
        assert_eq!(summary.young, 1);
        assert_eq!(summary.very_young, 0);
    }

    #[test]
    fn test_report_text() {
        let summary = AgeSummary {
            total: 8,
            with_age: 3,
            young: 1,
            very_young: 0,
            young_age_gyr: 1.0,
            very_young_age_gyr: 0.1,
        };
        let text = summary.to_string();
        assert!(text.contains("Total Targets in List:      8"));
        assert!(text.contains("Stars with Literature Ages: 3 (37.5%)"));
        assert!(text.contains("Stars < 1 Gyr:              1 (33.3% of aged stars)"));
        assert!(text.contains("Stars < 100 Myr:            0"));
    }

    #[test]
    fn test_report_with_empty_catalog() {
        let summary = AgeSummary::new(0, &[], &AnalysisConfig::default());
        let text = summary.to_string();
        assert!(text.contains("Stars with Literature Ages: 0 (n/a)"));
        assert!(text.contains("(n/a of aged stars)"));
    }

    #[test]
    fn test_age_label() {
        assert_eq!(age_label(1.0), "1 Gyr");
        assert_eq!(age_label(2.5), "2.5 Gyr");
        assert_eq!(age_label(0.1), "100 Myr");
        assert_eq!(age_label(0.05), "50 Myr");
    }

    #[test]
    fn test_report_follows_configured_thresholds() {
        let config = AnalysisConfig {
            young_age_gyr: 2.0,
            very_young_age_gyr: 0.5,
            ..AnalysisConfig::default()
        };
        let samples = [AgeSample::from_record(&record(Some(1.5), None, None)).unwrap()];
        let text = AgeSummary::new(1, &samples, &config).to_string();

        assert!(text.contains("Stars < 2 Gyr:              1 (100.0% of aged stars)"));
        assert!(text.contains("Stars < 500 Myr:            0"));
        assert!(!text.contains("1 Gyr"));
    }
}
