//! Descriptive statistics over a column sample
//!
//! Min, max and mean come from one pass; standard deviation takes a second
//! pass over the same slice. NaN values are rejected rather than skipped:
//! callers are expected to drop missing cells before scanning.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("NaN value encountered at index {0}")]
    NaNEncountered(usize),
    #[error("No data provided (empty slice)")]
    NoData,
}

/// Single-pass summary of a sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleScan {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub count: usize,
}

impl SampleScan {
    pub fn new(data: &[f64]) -> Result<Self, StatsError> {
        if let Some(index) = data.iter().position(|v| v.is_nan()) {
            return Err(StatsError::NaNEncountered(index));
        }
        if data.is_empty() {
            return Err(StatsError::NoData);
        }

        let (min, max, sum) = data.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), &v| (min.min(v), max.max(v), sum + v),
        );

        Ok(Self {
            min,
            max,
            mean: sum / data.len() as f64,
            count: data.len(),
        })
    }

    /// Sample standard deviation (n - 1 denominator), 0 for a single value
    pub fn std_dev(&self, data: &[f64]) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        let sum_sq: f64 = data.iter().map(|v| (v - self.mean).powi(2)).sum();
        (sum_sq / (self.count - 1) as f64).sqrt()
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Fraction `part / whole`, `None` when `whole` is zero
pub fn fraction(part: usize, whole: usize) -> Option<f64> {
    (whole > 0).then(|| part as f64 / whole as f64)
}
