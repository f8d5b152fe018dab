//! Input parsing and validation
//!
//! Turns the raw text a user types into a validated [`Support`] and
//! [`ProbabilityVector`]:
//! - support values are whitespace-separated integers (`1 2 3`)
//! - probabilities are whitespace-separated decimals or fractions
//!   (`0.25 0.5 0.25`, `1/4 1/2 1/4`, or a mix)

use crate::config::InputConfig;
use crate::distribution::Distribution;
use crate::error::{validation, DrvError, DrvResult};
use nom::{
    branch::alt,
    character::complete::{char, i64 as integer, u64 as natural},
    combinator::{all_consuming, map},
    number::complete::double,
    sequence::separated_pair,
    IResult,
};
use serde::Serialize;

/// The possible values of X, in entry order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Support(Vec<i64>);

impl Support {
    /// Create a support from values (must be non-empty)
    pub fn new(values: Vec<i64>) -> DrvResult<Self> {
        if values.is_empty() {
            return Err(DrvError::parse("", "enter at least one value for x"));
        }
        Ok(Self(values))
    }

    /// The values in entry order
    pub fn values(&self) -> &[i64] {
        &self.0
    }

    /// The values as reals, for arithmetic
    pub fn to_f64(&self) -> Vec<f64> {
        self.0.iter().map(|&x| x as f64).collect()
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed support
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// P(X = x) for each support value, in the same order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbabilityVector(Vec<f64>);

impl ProbabilityVector {
    /// Create a probability vector, checking every value and the total
    pub fn new(values: Vec<f64>, tolerance: f64) -> DrvResult<Self> {
        for &p in &values {
            validation::validate_probability(&p.to_string(), p)?;
        }
        validation::validate_normalization(&values, tolerance)?;
        Ok(Self(values))
    }

    /// The probabilities in support order
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Number of probabilities
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no probabilities
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all probabilities
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }
}

/// Parse whitespace-separated integer support values
pub fn parse_support(raw: &str) -> DrvResult<Support> {
    let values = raw
        .split_whitespace()
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| DrvError::parse(token, "expected an integer"))
        })
        .collect::<DrvResult<Vec<i64>>>()?;

    Support::new(values)
}

/// Parse `n` probabilities using the default tolerance of 1e-7
pub fn parse_probabilities(raw: &str, n: usize) -> DrvResult<ProbabilityVector> {
    let tolerance = InputConfig::default().normalization_tolerance;
    parse_probabilities_with_tolerance(raw, n, tolerance)
}

/// Parse `n` probabilities, requiring them to sum to 1 within `tolerance`
///
/// Checks run in order: token count, then each token, then the total.
pub fn parse_probabilities_with_tolerance(
    raw: &str,
    n: usize,
    tolerance: f64,
) -> DrvResult<ProbabilityVector> {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    validation::validate_cardinality(n, tokens.len())?;

    let values = tokens
        .iter()
        .map(|token| parse_probability_token(token))
        .collect::<DrvResult<Vec<f64>>>()?;

    validation::validate_normalization(&values, tolerance)?;
    Ok(ProbabilityVector(values))
}

/// Parse both inputs into a distribution
pub fn parse_distribution(
    support_raw: &str,
    probabilities_raw: &str,
    tolerance: f64,
) -> DrvResult<Distribution> {
    let support = parse_support(support_raw)?;
    let probabilities =
        parse_probabilities_with_tolerance(probabilities_raw, support.len(), tolerance)?;
    Distribution::new(support, probabilities)
}

/// A probability literal as typed
#[derive(Debug, Clone, Copy, PartialEq)]
enum Literal {
    Fraction(i64, u64),
    Decimal(f64),
}

/// Parse `a/b` or a decimal literal
fn probability_literal(input: &str) -> IResult<&str, Literal> {
    alt((
        map(separated_pair(integer, char('/'), natural), |(n, d)| {
            Literal::Fraction(n, d)
        }),
        map(double, Literal::Decimal),
    ))(input)
}

/// Parse one probability token into a value in [0, ∞)
fn parse_probability_token(token: &str) -> DrvResult<f64> {
    let literal = match all_consuming(probability_literal)(token) {
        Ok((_, literal)) => literal,
        Err(_) => {
            return Err(DrvError::parse(
                token,
                "expected a decimal like 0.25 or a fraction like 1/4",
            ))
        }
    };

    let value = match literal {
        Literal::Fraction(_, 0) => return Err(DrvError::parse(token, "denominator is zero")),
        Literal::Fraction(n, d) => n as f64 / d as f64,
        Literal::Decimal(v) => v,
    };

    validation::validate_probability(token, value)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_support() {
        let support = parse_support("1 2 3").unwrap();
        assert_eq!(support.values(), &[1, 2, 3]);
    }

    #[test]
    fn test_parse_support_keeps_entry_order() {
        let support = parse_support("  5 -2\t0 ").unwrap();
        assert_eq!(support.values(), &[5, -2, 0]);
    }

    #[test]
    fn test_parse_support_errors() {
        assert!(matches!(parse_support(""), Err(DrvError::Parse { .. })));
        assert!(matches!(parse_support("   "), Err(DrvError::Parse { .. })));
        assert!(matches!(
            parse_support("1 2.5 3"),
            Err(DrvError::Parse { ref input, .. }) if input == "2.5"
        ));
        assert!(matches!(parse_support("1,2"), Err(DrvError::Parse { .. })));
    }

    #[test]
    fn test_parse_fractions_and_decimals() {
        let probs = parse_probabilities("1/4 0.5 1/4", 3).unwrap();
        assert_eq!(probs.values(), &[0.25, 0.5, 0.25]);

        let probs = parse_probabilities("1", 1).unwrap();
        assert_eq!(probs.values(), &[1.0]);

        let probs = parse_probabilities(".5 5e-1", 2).unwrap();
        assert_eq!(probs.values(), &[0.5, 0.5]);
    }

    #[test]
    fn test_parse_probability_thirds() {
        let probs = parse_probabilities("1/3 1/3 1/3", 3).unwrap();
        assert!((probs.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cardinality_checked_first() {
        assert_eq!(
            parse_probabilities("abc 0.5", 3),
            Err(DrvError::Cardinality {
                expected: 3,
                found: 2
            })
        );
        assert!(matches!(
            parse_probabilities("", 0),
            Err(DrvError::Cardinality { .. })
        ));
    }

    #[test]
    fn test_bad_tokens() {
        for raw in ["abc 0.5", "1/0 1", "-0.5 1.5", "1/-2 1", "0.5/2 0.5", "inf 0", "nan 1"] {
            assert!(
                matches!(parse_probabilities(raw, 2), Err(DrvError::Parse { .. })),
                "'{}' should fail to parse",
                raw
            );
        }
    }

    #[test]
    fn test_normalization_boundary() {
        assert!(matches!(
            parse_probabilities("0.5 0.499999", 2),
            Err(DrvError::Normalization { .. })
        ));
        assert!(parse_probabilities("0.5 0.49999991", 2).is_ok());
    }

    #[test]
    fn test_parse_distribution() {
        let dist = parse_distribution("1 2", "1/2 1/2", 1e-7).unwrap();
        assert_eq!(dist.support().values(), &[1, 2]);
        assert_eq!(dist.probabilities().values(), &[0.5, 0.5]);
    }

    #[test]
    fn test_probability_vector_new() {
        assert!(ProbabilityVector::new(vec![0.2, 0.8], 1e-7).is_ok());
        assert!(ProbabilityVector::new(vec![0.2, 0.7], 1e-7).is_err());
        assert!(ProbabilityVector::new(vec![-0.2, 1.2], 1e-7).is_err());
    }
}
