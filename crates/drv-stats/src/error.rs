//! Error types for drv-stats
//!
//! Every failure is detected at the input boundary and returned to the
//! caller; nothing is retried and there is no partial success.

use thiserror::Error;

/// Main error type for drv operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DrvError {
    /// Malformed numeric or fractional token
    #[error("Cannot parse '{input}': {reason}")]
    Parse { input: String, reason: String },

    /// Probability count differs from support count
    #[error("Expected {expected} probability values (one per value of x), got {found}")]
    Cardinality { expected: usize, found: usize },

    /// Probabilities do not sum to 1 within tolerance
    #[error("Probabilities sum to {sum}, which differs from 1 by more than {tolerance:e}")]
    Normalization { sum: f64, tolerance: f64 },

    /// Malformed transformation expression
    #[error("Invalid expression: {0}")]
    ExpressionSyntax(#[from] drv_expr::ParseError),

    /// Transformation undefined at some input
    #[error("Cannot evaluate expression: {0}")]
    Evaluation(#[from] drv_expr::EvalError),

    /// Session used before any distribution was entered
    #[error("No distribution has been entered yet")]
    NoDistribution,
}

impl DrvError {
    /// Create a parse error for an input token
    pub fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        DrvError::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Short category name, useful for hosts that map errors to prompts
    pub fn kind(&self) -> &'static str {
        match self {
            DrvError::Parse { .. } => "parse",
            DrvError::Cardinality { .. } => "cardinality",
            DrvError::Normalization { .. } => "normalization",
            DrvError::ExpressionSyntax(_) => "expression-syntax",
            DrvError::Evaluation(_) => "evaluation",
            DrvError::NoDistribution => "no-distribution",
        }
    }
}

/// Result type alias for drv operations
pub type DrvResult<T> = Result<T, DrvError>;

/// Validation utilities
pub mod validation {
    use super::*;

    /// Validate that `found` probabilities match `expected` support values
    pub fn validate_cardinality(expected: usize, found: usize) -> DrvResult<()> {
        if expected == 0 || found != expected {
            return Err(DrvError::Cardinality { expected, found });
        }
        Ok(())
    }

    /// Validate that probabilities sum to 1 within `tolerance`
    pub fn validate_normalization(probs: &[f64], tolerance: f64) -> DrvResult<()> {
        let sum: f64 = probs.iter().sum();
        if (1.0 - sum).abs() > tolerance {
            return Err(DrvError::Normalization { sum, tolerance });
        }
        Ok(())
    }

    /// Validate a single probability value
    pub fn validate_probability(token: &str, value: f64) -> DrvResult<()> {
        if !value.is_finite() {
            return Err(DrvError::parse(token, "probability must be a finite number"));
        }
        if value < 0.0 {
            return Err(DrvError::parse(token, "probability must be non-negative"));
        }
        Ok(())
    }
}
