//! Interactive session state
//!
//! A session encapsulates:
//! - The configuration in effect
//! - The current distribution entered by the user
//!
//! Hosts keep one session per user; sessions share nothing.

use crate::chart::{self, Figure};
use crate::config::{ConfigError, DrvConfig};
use crate::distribution::Distribution;
use crate::error::{DrvError, DrvResult};
use crate::input;
use crate::summary::{Skew, SummaryStatistics};
use crate::transform::{self, TransformRow, TransformedDistribution};
use serde::Serialize;

/// Everything shown for the entered distribution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    /// The validated distribution
    pub distribution: Distribution,
    /// Summary statistics of X
    pub summary: SummaryStatistics,
    /// Direction of skew of X
    pub skew: Skew,
    /// p.m.f. and c.d.f. plots of X
    pub figure: Figure,
}

/// Everything shown for a transformation g(X)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformReport {
    /// The expression as entered
    pub expression: String,
    /// The expression in normalized form
    pub normalized: String,
    /// Table of x, g(x), P(X = x)
    pub rows: Vec<TransformRow>,
    /// Summary statistics of g(X)
    pub summary: SummaryStatistics,
    /// Summary statistics of X, for comparison
    pub original: SummaryStatistics,
    /// Direction of skew of g(X)
    pub skew: Skew,
    /// p.m.f. and c.d.f. plots of g(X)
    pub figure: Figure,
}

/// An interactive analysis session
#[derive(Debug, Clone)]
pub struct Session {
    /// Unique session identifier
    pub id: String,
    config: DrvConfig,
    distribution: Option<Distribution>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session with the default configuration
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            config: DrvConfig::default(),
            distribution: None,
        }
    }

    /// Create a session with a validated configuration
    pub fn with_config(config: DrvConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    /// The configuration in effect
    pub fn config(&self) -> &DrvConfig {
        &self.config
    }

    /// The current distribution, if one has been entered
    pub fn distribution(&self) -> Option<&Distribution> {
        self.distribution.as_ref()
    }

    /// Validate new input and make it the current distribution
    ///
    /// On failure the previous distribution is discarded, so nothing stale
    /// is shown next to the rejected input.
    pub fn set_input(
        &mut self,
        support_raw: &str,
        probabilities_raw: &str,
    ) -> DrvResult<&Distribution> {
        let parsed = input::parse_distribution(
            support_raw,
            probabilities_raw,
            self.config.input.normalization_tolerance,
        );

        match parsed {
            Ok(distribution) => {
                tracing::debug!(session = %self.id, n = distribution.len(), "distribution updated");
                Ok(&*self.distribution.insert(distribution))
            }
            Err(e) => {
                tracing::warn!(session = %self.id, kind = e.kind(), error = %e, "input rejected");
                self.distribution = None;
                Err(e)
            }
        }
    }

    /// Forget the current distribution
    pub fn clear(&mut self) {
        self.distribution = None;
    }

    /// Statistics and plots for the current distribution
    pub fn dashboard(&self) -> DrvResult<Dashboard> {
        let distribution = self.current()?;
        let summary_config = &self.config.summary;

        Ok(Dashboard {
            distribution: distribution.clone(),
            summary: distribution.summary_with(summary_config),
            skew: distribution.skew(summary_config),
            figure: chart::build_figure(
                "X",
                &distribution.values(),
                distribution.probabilities().values(),
            ),
        })
    }

    /// Apply a transformation to the current distribution
    pub fn transform(&self, expr: &str) -> DrvResult<TransformReport> {
        let distribution = self.current()?;
        let g = transform::parse_transform(expr).map_err(|e| {
            tracing::warn!(session = %self.id, error = %e, "expression rejected");
            e
        })?;
        let transformed = distribution.transform(&g)?;
        Ok(self.report(distribution, &transformed))
    }

    fn report(
        &self,
        distribution: &Distribution,
        transformed: &TransformedDistribution,
    ) -> TransformReport {
        let summary_config = &self.config.summary;
        TransformReport {
            expression: transformed.function().source().to_string(),
            normalized: transformed.function().to_string(),
            rows: transformed.rows(),
            summary: transformed.summary_with(summary_config),
            original: distribution.summary_with(summary_config),
            skew: transformed.skew(summary_config),
            figure: transformed.figure(),
        }
    }

    fn current(&self) -> DrvResult<&Distribution> {
        self.distribution.as_ref().ok_or(DrvError::NoDistribution)
    }
}
