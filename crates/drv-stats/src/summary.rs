//! Summary statistics for a probability mass function
//!
//! Provides the dashboard statistics for a discrete random variable given
//! its values and probabilities:
//! - Mean, variance, standard deviation
//! - Mode
//! - Quartiles (Q1, median, Q3) and interquartile range
//!
//! Quantiles pick the first index holding the largest cumulative probability
//! that does not exceed the quantile level, so they are always one of the
//! given values.

use crate::config::SummaryConfig;
use serde::{Deserialize, Serialize};

/// Quantile levels reported in a summary
pub const QUARTILES: [f64; 3] = [0.25, 0.5, 0.75];

/// Summary statistics for a discrete distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct SummaryStatistics {
    /// E(X)
    pub mean: f64,
    /// Var(X)
    pub variance: f64,
    /// Standard deviation
    pub std_dev: f64,
    /// Value with the largest probability (first on ties)
    pub mode: f64,
    /// First quartile
    pub q1: f64,
    /// Median (second quartile)
    pub median: f64,
    /// Third quartile
    pub q3: f64,
    /// Interquartile range (Q3 - Q1)
    pub iqr: f64,
}

impl SummaryStatistics {
    /// Compute summary statistics using the default configuration
    pub fn from_pmf(values: &[f64], probs: &[f64]) -> Self {
        Self::from_pmf_with(values, probs, &SummaryConfig::default())
    }

    /// Compute summary statistics
    ///
    /// `values` and `probs` must have the same length; use
    /// [`Distribution::summary_with`](crate::Distribution::summary_with) for
    /// checked input. Mismatched lengths panic in debug builds.
    pub fn from_pmf_with(values: &[f64], probs: &[f64], config: &SummaryConfig) -> Self {
        debug_assert_eq!(values.len(), probs.len(), "values and probs differ in length");
        let n = values.len().min(probs.len());
        if n == 0 {
            return Self::empty();
        }
        let (values, probs) = (&values[..n], &probs[..n]);

        let mean = mean(values, probs);
        let raw_variance = variance(values, probs);
        let variance = if config.clamp_negative_variance {
            raw_variance.max(0.0)
        } else {
            raw_variance
        };
        let std_dev = variance.max(0.0).sqrt();

        let mode = values[mode_index(probs)];

        let cdf = cumulative(probs);
        let [q1, median, q3] =
            QUARTILES.map(|q| values[quantile_index(&cdf, q, config.quantile_tolerance)]);

        Self {
            mean,
            variance,
            std_dev,
            mode,
            q1,
            median,
            q3,
            iqr: q3 - q1,
        }
    }

    /// Create empty statistics (all NaN)
    fn empty() -> Self {
        Self {
            mean: f64::NAN,
            variance: f64::NAN,
            std_dev: f64::NAN,
            mode: f64::NAN,
            q1: f64::NAN,
            median: f64::NAN,
            q3: f64::NAN,
            iqr: f64::NAN,
        }
    }

    /// Only the moments: mean, variance and standard deviation
    pub fn moments(&self) -> Moments {
        Moments {
            mean: self.mean,
            variance: self.variance,
            std_dev: self.std_dev,
        }
    }

    /// Labelled values in dashboard order
    pub fn entries(&self) -> [(&'static str, f64); 8] {
        [
            ("E(X)", self.mean),
            ("Var(X)", self.variance),
            ("S.D.", self.std_dev),
            ("Mode", self.mode),
            ("Q1", self.q1),
            ("Q2 (Median)", self.median),
            ("Q3", self.q3),
            ("IQR", self.iqr),
        ]
    }
}

/// Mean, variance and standard deviation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct Moments {
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
}

/// Direction of asymmetry of a distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum Skew {
    /// Long right tail
    Right,
    /// Long left tail
    Left,
    /// No measurable asymmetry
    Symmetric,
}

impl Skew {
    /// Classify a standardized skewness value
    ///
    /// A degenerate distribution (zero variance, NaN skewness) is symmetric.
    pub fn classify(skewness: f64, tolerance: f64) -> Self {
        if skewness > tolerance {
            Skew::Right
        } else if skewness < -tolerance {
            Skew::Left
        } else {
            Skew::Symmetric
        }
    }

    /// Human-readable description
    pub fn describe(&self) -> &'static str {
        match self {
            Skew::Right => "right-skewed (long right tail)",
            Skew::Left => "left-skewed (long left tail)",
            Skew::Symmetric => "symmetric",
        }
    }
}

/// E(X) = Σ x·p
pub fn mean(values: &[f64], probs: &[f64]) -> f64 {
    values.iter().zip(probs).map(|(x, p)| x * p).sum()
}

/// Var(X) = Σ x²·p − E(X)²
///
/// May come out slightly negative through cancellation.
pub fn variance(values: &[f64], probs: &[f64]) -> f64 {
    let second_moment: f64 = values.iter().zip(probs).map(|(x, p)| x * x * p).sum();
    second_moment - mean(values, probs).powi(2)
}

/// Var(X) = Σ (x − E(X))²·p
pub fn variance_about_mean(values: &[f64], probs: &[f64]) -> f64 {
    let mu = mean(values, probs);
    values
        .iter()
        .zip(probs)
        .map(|(x, p)| (x - mu).powi(2) * p)
        .sum()
}

/// Standardized third moment E[(X − μ)³] / σ³
///
/// NaN when the variance is zero.
pub fn skewness(values: &[f64], probs: &[f64]) -> f64 {
    let mu = mean(values, probs);
    let var = variance_about_mean(values, probs);
    if var <= 0.0 {
        return f64::NAN;
    }
    let third: f64 = values
        .iter()
        .zip(probs)
        .map(|(x, p)| (x - mu).powi(3) * p)
        .sum();
    third / var.powf(1.5)
}

/// Index of the largest probability, first index on ties
pub fn mode_index(probs: &[f64]) -> usize {
    let mut best = 0;
    for (i, &p) in probs.iter().enumerate().skip(1) {
        if p > probs[best] {
            best = i;
        }
    }
    best
}

/// Running sum of probabilities in entry order
pub fn cumulative(probs: &[f64]) -> Vec<f64> {
    probs
        .iter()
        .scan(0.0, |acc, &p| {
            *acc += p;
            Some(*acc)
        })
        .collect()
}

/// Index of the largest cumulative value `<= q + tolerance`, or 0 if there is none
///
/// A zero-probability entry repeats the previous cumulative value. Among
/// equal values the first index wins, so such an entry is never chosen over
/// the entry before it.
pub fn quantile_index(cdf: &[f64], q: f64, tolerance: f64) -> usize {
    let Some(last) = cdf.iter().rposition(|&c| c <= q + tolerance) else {
        return 0;
    };
    let target = cdf[last];
    cdf[..last].iter().position(|&c| c == target).unwrap_or(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-10
    }

    #[test]
    fn test_two_point_fair() {
        let stats = SummaryStatistics::from_pmf(&[1.0, 2.0], &[0.5, 0.5]);

        assert!(approx(stats.mean, 1.5));
        assert!(approx(stats.variance, 0.25));
        assert!(approx(stats.std_dev, 0.5));
        assert_eq!(stats.mode, 1.0);
        // C = [0.5, 1.0]
        assert_eq!(stats.q1, 1.0);
        assert_eq!(stats.median, 1.0);
        assert_eq!(stats.q3, 1.0);
        assert_eq!(stats.iqr, 0.0);
    }

    #[test]
    fn test_quartiles_spread() {
        // C = [0.1, 0.3, 0.6, 0.8, 1.0]
        let values = [10.0, 20.0, 30.0, 40.0, 50.0];
        let probs = [0.1, 0.2, 0.3, 0.2, 0.2];
        let stats = SummaryStatistics::from_pmf(&values, &probs);

        assert_eq!(stats.q1, 10.0);
        assert_eq!(stats.median, 20.0);
        assert_eq!(stats.q3, 30.0);
        assert_eq!(stats.iqr, 20.0);
        assert_eq!(stats.mode, 30.0);
    }

    #[test]
    fn test_mode_first_on_ties() {
        assert_eq!(mode_index(&[0.2, 0.4, 0.4]), 1);
        assert_eq!(mode_index(&[0.25, 0.25, 0.25, 0.25]), 0);
        assert_eq!(mode_index(&[0.1, 0.2, 0.7]), 2);
    }

    #[test]
    fn test_quantile_index_rules() {
        let cdf = [0.5, 1.0];
        // Nothing at or below 0.25: first index
        assert_eq!(quantile_index(&cdf, 0.25, 1e-7), 0);
        // Exactly at the level counts
        assert_eq!(quantile_index(&cdf, 0.5, 1e-7), 0);
        assert_eq!(quantile_index(&cdf, 1.0, 1e-7), 1);

        // Accumulated rounding just above the level still counts
        let cdf = [0.25, 0.5 + 1e-12, 0.75, 1.0];
        assert_eq!(quantile_index(&cdf, 0.5, 1e-7), 1);
    }

    #[test]
    fn test_quantile_skips_zero_probability_entries() {
        // C = [0.5, 0.5, 1.0]: value 2 never occurs
        let stats = SummaryStatistics::from_pmf(&[1.0, 2.0, 3.0], &[0.5, 0.0, 0.5]);
        assert_eq!(stats.q1, 1.0);
        assert_eq!(stats.median, 1.0);
        assert_eq!(stats.q3, 1.0);

        // C = [0.25, 0.25, 0.5, 1.0]
        let stats =
            SummaryStatistics::from_pmf(&[1.0, 2.0, 3.0, 4.0], &[0.25, 0.0, 0.25, 0.5]);
        assert_eq!(stats.q1, 1.0);
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.q3, 3.0);

        assert_eq!(quantile_index(&[0.5, 0.5, 0.5, 1.0], 0.6, 1e-7), 0);
        assert_eq!(quantile_index(&[0.2, 0.5, 0.5, 1.0], 0.6, 1e-7), 1);
    }

    #[test]
    fn test_cumulative() {
        let cdf = cumulative(&[0.25, 0.5, 0.25]);
        assert_eq!(cdf, vec![0.25, 0.75, 1.0]);
    }

    #[test]
    fn test_unsorted_support_uses_entry_order() {
        // C = [0.3, 0.6, 1.0] over values entered as 3, 1, 2
        let stats = SummaryStatistics::from_pmf(&[3.0, 1.0, 2.0], &[0.3, 0.3, 0.4]);
        assert_eq!(stats.q1, 3.0);
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.q3, 1.0);
        assert_eq!(stats.iqr, -2.0);
    }

    #[test]
    fn test_variance_forms_agree() {
        let values = [-3.0, 0.0, 2.0, 7.0];
        let probs = [0.1, 0.4, 0.3, 0.2];
        assert!(approx(
            variance(&values, &probs),
            variance_about_mean(&values, &probs)
        ));
    }

    #[test]
    fn test_degenerate_distribution() {
        let stats = SummaryStatistics::from_pmf(&[4.0], &[1.0]);
        assert_eq!(stats.mean, 4.0);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.median, 4.0);
        assert_eq!(stats.iqr, 0.0);
    }

    #[test]
    fn test_negative_variance_clamp() {
        // Constant values: Σx²p - mean² cancels to roughly zero, possibly below it
        let values = [0.1, 0.1, 0.1];
        let probs = [0.2, 0.3, 0.5];
        let raw = variance(&values, &probs);

        let clamped = SummaryStatistics::from_pmf(&values, &probs);
        assert!(clamped.variance >= 0.0);

        let config = SummaryConfig {
            clamp_negative_variance: false,
            ..SummaryConfig::default()
        };
        let unclamped = SummaryStatistics::from_pmf_with(&values, &probs, &config);
        assert_eq!(unclamped.variance, raw);
        assert!(unclamped.std_dev >= 0.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "differ in length")]
    fn test_mismatched_lengths_panic() {
        SummaryStatistics::from_pmf(&[1.0, 2.0, 3.0], &[0.5, 0.5]);
    }

    #[test]
    fn test_empty_is_nan() {
        let stats = SummaryStatistics::from_pmf(&[], &[]);
        assert!(stats.mean.is_nan());
        assert!(stats.median.is_nan());
    }

    #[test]
    fn test_skewness() {
        // Long right tail
        let s = skewness(&[0.0, 1.0, 10.0], &[0.45, 0.45, 0.1]);
        assert_eq!(Skew::classify(s, 1e-9), Skew::Right);

        // Mirror image
        let s = skewness(&[0.0, -1.0, -10.0], &[0.45, 0.45, 0.1]);
        assert_eq!(Skew::classify(s, 1e-9), Skew::Left);

        let s = skewness(&[1.0, 2.0, 3.0], &[0.25, 0.5, 0.25]);
        assert_eq!(Skew::classify(s, 1e-9), Skew::Symmetric);

        assert!(skewness(&[5.0], &[1.0]).is_nan());
        assert_eq!(Skew::classify(f64::NAN, 1e-9), Skew::Symmetric);
    }

    #[test]
    fn test_moments_subset() {
        let stats = SummaryStatistics::from_pmf(&[1.0, 3.0], &[0.5, 0.5]);
        let moments = stats.moments();
        assert_eq!(moments.mean, 2.0);
        assert_eq!(moments.variance, 1.0);
        assert_eq!(moments.std_dev, 1.0);
    }

    #[test]
    fn test_entries_order() {
        let stats = SummaryStatistics::from_pmf(&[1.0, 2.0], &[0.5, 0.5]);
        let labels: Vec<&str> = stats.entries().iter().map(|(l, _)| *l).collect();
        assert_eq!(
            labels,
            vec!["E(X)", "Var(X)", "S.D.", "Mode", "Q1", "Q2 (Median)", "Q3", "IQR"]
        );
    }
}
