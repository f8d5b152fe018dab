//! Transformations g(X) of a discrete random variable
//!
//! The transformed variable keeps the original probabilities and entry
//! order; only the values change. Values that coincide after a
//! non-injective g are not merged.

use crate::chart::{self, Figure};
use crate::config::SummaryConfig;
use crate::distribution::Distribution;
use crate::error::DrvResult;
use crate::input::ProbabilityVector;
use crate::summary::{self, Skew, SummaryStatistics};
use drv_expr::Function1D;
use serde::Serialize;

/// Parse a transformation expression in `x`
pub fn parse_transform(expr: &str) -> DrvResult<Function1D> {
    Ok(Function1D::parse(expr)?)
}

/// One row of the transformation table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransformRow {
    /// Original value
    pub x: i64,
    /// Transformed value
    pub gx: f64,
    /// P(X = x)
    pub probability: f64,
}

/// Distribution of g(X)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformedDistribution {
    function: Function1D,
    original: Vec<i64>,
    values: Vec<f64>,
    probabilities: ProbabilityVector,
}

impl TransformedDistribution {
    /// The transformation applied
    pub fn function(&self) -> &Function1D {
        &self.function
    }

    /// g(x) for each support value, in entry order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The unchanged probabilities
    pub fn probabilities(&self) -> &ProbabilityVector {
        &self.probabilities
    }

    /// Rows of the table x, g(x), P(X = x)
    pub fn rows(&self) -> Vec<TransformRow> {
        self.original
            .iter()
            .zip(&self.values)
            .zip(self.probabilities.values())
            .map(|((&x, &gx), &probability)| TransformRow { x, gx, probability })
            .collect()
    }

    /// Summary statistics of g(X) with the default configuration
    pub fn summary(&self) -> SummaryStatistics {
        self.summary_with(&SummaryConfig::default())
    }

    /// Summary statistics of g(X)
    pub fn summary_with(&self, config: &SummaryConfig) -> SummaryStatistics {
        SummaryStatistics::from_pmf_with(&self.values, self.probabilities.values(), config)
    }

    /// Direction of skew of g(X)
    pub fn skew(&self, config: &SummaryConfig) -> Skew {
        let s = summary::skewness(&self.values, self.probabilities.values());
        Skew::classify(s, config.skew_tolerance)
    }

    /// p.m.f. and c.d.f. plots of g(X)
    pub fn figure(&self) -> Figure {
        chart::build_figure("g(X)", &self.values, self.probabilities.values())
    }
}

impl Distribution {
    /// Apply `g` to every support value
    ///
    /// Fails as a whole if `g` is undefined at any support value.
    pub fn transform(&self, g: &Function1D) -> DrvResult<TransformedDistribution> {
        let values = g.evaluate(&self.values())?;
        tracing::debug!(expression = %g, n = values.len(), "transformed distribution");

        Ok(TransformedDistribution {
            function: g.clone(),
            original: self.support().values().to_vec(),
            values,
            probabilities: self.probabilities().clone(),
        })
    }
}
