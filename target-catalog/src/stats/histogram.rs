//! Equal-width histogram binning and kernel density estimation

use super::scan::SampleScan;

/// Equal-width histogram over the data's own range.
///
/// Bins are half-open `[lo, hi)` except the last, which also includes the
/// maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` bin edges, ascending
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width bins spanning their min..max.
    ///
    /// Non-finite values are ignored. If every value is equal the range is
    /// widened to one unit centred on that value. No finite values (or zero
    /// bins) yields an empty histogram.
    pub fn new(values: &[f64], bins: usize) -> Self {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let scan = match SampleScan::new(&finite) {
            Ok(scan) if bins > 0 => scan,
            _ => {
                return Self {
                    edges: Vec::new(),
                    counts: Vec::new(),
                }
            }
        };

        let (lo, hi) = if scan.range() > 0.0 {
            (scan.min, scan.max)
        } else {
            (scan.min - 0.5, scan.max + 0.5)
        };
        let width = (hi - lo) / bins as f64;

        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
        let mut counts = vec![0usize; bins];
        for v in finite {
            let index = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[index] += 1;
        }

        Self { edges, counts }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.get(1)) {
            (Some(a), Some(b)) => b - a,
            _ => 0.0,
        }
    }

    /// `(lo, hi)` covered by the bins
    pub fn range(&self) -> Option<(f64, f64)> {
        Some((*self.edges.first()?, *self.edges.last()?))
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// `(lo, hi, count)` for every bin
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(self.counts.iter())
            .map(|(edge, &count)| (edge[0], edge[1], count))
    }
}

/// Gaussian kernel density estimate evaluated at each point of `grid`.
///
/// Bandwidth follows Scott's rule, `σ · n^(-1/5)`. Returns zeros when the
/// sample has fewer than two points or no spread.
pub fn gaussian_kde(values: &[f64], grid: &[f64]) -> Vec<f64> {
    let sample: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let Ok(scan) = SampleScan::new(&sample) else {
        return vec![0.0; grid.len()];
    };
    let sigma = scan.std_dev(&sample);
    let n = sample.len() as f64;
    let bandwidth = sigma * n.powf(-0.2);
    if sample.len() < 2 || bandwidth <= 0.0 {
        return vec![0.0; grid.len()];
    }

    let norm = 1.0 / (n * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    grid.iter()
        .map(|&x| {
            let sum: f64 = sample
                .iter()
                .map(|&xi| {
                    let z = (x - xi) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum();
            sum * norm
        })
        .collect()
}

/// `points` evenly spaced values from `lo` to `hi` inclusive
pub fn linspace(lo: f64, hi: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (points - 1) as f64;
            (0..points).map(|i| lo + step * i as f64).collect()
        }
    }
}
