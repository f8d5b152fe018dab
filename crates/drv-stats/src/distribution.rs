//! Validated discrete distributions

use crate::config::SummaryConfig;
use crate::error::{validation, DrvResult};
use crate::input::{ProbabilityVector, Support};
use crate::summary::{self, Skew, SummaryStatistics};
use serde::Serialize;

/// A discrete random variable: support values paired with their probabilities
///
/// Immutable once constructed; every derived quantity is recomputed on demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    support: Support,
    probabilities: ProbabilityVector,
}

impl Distribution {
    /// Pair a support with its probabilities (lengths must match)
    pub fn new(support: Support, probabilities: ProbabilityVector) -> DrvResult<Self> {
        validation::validate_cardinality(support.len(), probabilities.len())?;
        Ok(Self {
            support,
            probabilities,
        })
    }

    /// The support values
    pub fn support(&self) -> &Support {
        &self.support
    }

    /// The probabilities
    pub fn probabilities(&self) -> &ProbabilityVector {
        &self.probabilities
    }

    /// Support values as reals
    pub fn values(&self) -> Vec<f64> {
        self.support.to_f64()
    }

    /// Number of support values
    pub fn len(&self) -> usize {
        self.support.len()
    }

    /// Always false for a constructed distribution
    pub fn is_empty(&self) -> bool {
        self.support.is_empty()
    }

    /// Rows of the p.m.f. table: (x, P(X = x))
    pub fn rows(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.support
            .values()
            .iter()
            .copied()
            .zip(self.probabilities.values().iter().copied())
    }

    /// F(x) at each support value, in entry order
    pub fn cumulative(&self) -> Vec<f64> {
        summary::cumulative(self.probabilities.values())
    }

    /// Summary statistics with the default configuration
    pub fn summary(&self) -> SummaryStatistics {
        self.summary_with(&SummaryConfig::default())
    }

    /// Summary statistics
    pub fn summary_with(&self, config: &SummaryConfig) -> SummaryStatistics {
        SummaryStatistics::from_pmf_with(&self.values(), self.probabilities.values(), config)
    }

    /// Support value at quantile level `q`, using the same rule as the quartiles
    ///
    /// Returns `None` if `q` is outside [0, 1].
    pub fn quantile(&self, q: f64, config: &SummaryConfig) -> Option<i64> {
        if !(0.0..=1.0).contains(&q) {
            return None;
        }
        let index = summary::quantile_index(&self.cumulative(), q, config.quantile_tolerance);
        Some(self.support.values()[index])
    }

    /// Standardized skewness E[(X − μ)³] / σ³
    pub fn skewness(&self) -> f64 {
        summary::skewness(&self.values(), self.probabilities.values())
    }

    /// Direction of skew
    pub fn skew(&self, config: &SummaryConfig) -> Skew {
        Skew::classify(self.skewness(), config.skew_tolerance)
    }
}
