//! Statistics over a loaded target list

pub mod age;
pub mod histogram;
pub mod scan;

pub use age::{age_label, aged_samples, mean_age_err, AgeSample, AgeSummary};
pub use histogram::{gaussian_kde, linspace, Histogram};
pub use scan::{fraction, SampleScan, StatsError};
