//! Chart data for probability plots
//!
//! Builds renderer-agnostic bar series for the p.m.f. and c.d.f. of a
//! distribution. Drawing the bars is left to the host.
//!
//! Bars follow entry order, so an unsorted support yields an unsorted
//! category axis, matching the p.m.f. table.

use crate::summary;
use serde::{Deserialize, Serialize};

/// One bar series: a category axis and a value per category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct ChartSeries {
    /// Plot title
    pub title: String,
    /// Bar positions (support values)
    pub categories: Vec<f64>,
    /// Bar heights
    pub values: Vec<f64>,
}

impl ChartSeries {
    /// Number of bars
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Check if the series has no bars
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Iterate (category, value) pairs
    pub fn bars(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.categories
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Tallest bar height, 0 for an empty series
    pub fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}

/// The pair of plots shown for a distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct Figure {
    /// P(X = x)
    pub pmf: ChartSeries,
    /// P(X <= x)
    pub cdf: ChartSeries,
}

/// Bar series of P(X = x)
///
/// `values` and `probs` must have the same length; mismatches panic in debug
/// builds. [`Distribution`](crate::Distribution) guarantees it.
pub fn build_pmf(values: &[f64], probs: &[f64]) -> ChartSeries {
    debug_assert_eq!(values.len(), probs.len(), "values and probs differ in length");
    let n = values.len().min(probs.len());
    ChartSeries {
        title: "p.m.f.".to_string(),
        categories: values[..n].to_vec(),
        values: probs[..n].to_vec(),
    }
}

/// Bar series of the running cumulative probability
///
/// Same length requirement as [`build_pmf`].
pub fn build_cdf(values: &[f64], probs: &[f64]) -> ChartSeries {
    debug_assert_eq!(values.len(), probs.len(), "values and probs differ in length");
    let n = values.len().min(probs.len());
    ChartSeries {
        title: "c.d.f.".to_string(),
        categories: values[..n].to_vec(),
        values: summary::cumulative(&probs[..n]),
    }
}

/// Both plots, titled for the named variable (e.g. `X` or `g(X)`)
pub fn build_figure(label: &str, values: &[f64], probs: &[f64]) -> Figure {
    let mut pmf = build_pmf(values, probs);
    let mut cdf = build_cdf(values, probs);
    pmf.title = format!("p.m.f. of {}", label);
    cdf.title = format!("c.d.f. of {}", label);
    Figure { pmf, cdf }
}
