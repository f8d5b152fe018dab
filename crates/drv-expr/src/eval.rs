//! Expression evaluation
//!
//! Evaluates parsed expressions against symbol values, and provides the
//! validated single-variable [`Function1D`] used to transform random variables.

use crate::ast::*;
use crate::parser::{parse_expression, ParseError};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Evaluation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("Symbol not bound: {0}")]
    UnboundSymbol(String),

    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("{function}({input}) is undefined")]
    Domain { function: String, input: f64 },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Result is not a finite number: {0}")]
    NonFinite(String),

    #[error("g({input}) failed: {source}")]
    AtInput {
        index: usize,
        input: f64,
        #[source]
        source: Box<EvalError>,
    },
}

/// Result type for evaluation
pub type EvalResult<T> = Result<T, EvalError>;

/// Context for evaluation - provides symbol values
pub trait EvalContext {
    /// Get the value bound to a symbol
    fn symbol_value(&self, name: &str) -> Option<f64>;
}

/// Binds one variable to a value; named constants resolve as usual
#[derive(Debug, Clone, Copy)]
pub struct VariableBinding<'a> {
    pub name: &'a str,
    pub value: f64,
}

impl EvalContext for VariableBinding<'_> {
    fn symbol_value(&self, name: &str) -> Option<f64> {
        if name == self.name {
            Some(self.value)
        } else {
            Constant::from_name(name).map(|c| c.value())
        }
    }
}

/// Evaluator for expressions
pub struct Evaluator<'a, C: EvalContext> {
    context: &'a C,
}

impl<'a, C: EvalContext> Evaluator<'a, C> {
    /// Create a new evaluator
    pub fn new(context: &'a C) -> Self {
        Self { context }
    }

    /// Evaluate an expression to a finite number
    pub fn evaluate(&self, expr: &Expr) -> EvalResult<f64> {
        let value = match expr {
            Expr::Number(n) => *n,

            Expr::Symbol(name) => self
                .context
                .symbol_value(name)
                .ok_or_else(|| EvalError::UnboundSymbol(name.clone()))?,

            Expr::Neg(inner) => -self.evaluate(inner)?,

            Expr::Binary(op, lhs, rhs) => {
                let lhs = self.evaluate(lhs)?;
                let rhs = self.evaluate(rhs)?;
                op.apply(lhs, rhs).ok_or(EvalError::DivisionByZero)?
            }

            Expr::Call(call) => self.evaluate_call(call)?,
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::NonFinite(expr.to_string()))
        }
    }

    /// Evaluate a function call
    fn evaluate_call(&self, call: &FunctionCall) -> EvalResult<f64> {
        let builtin = Builtin::from_name(&call.name)
            .ok_or_else(|| EvalError::UnknownFunction(call.name.clone()))?;

        let arg = match call.args.as_slice() {
            [arg] => self.evaluate(arg)?,
            _ => {
                return Err(EvalError::InvalidArguments(format!(
                    "{} requires exactly one argument",
                    call.name
                )))
            }
        };

        builtin.apply(arg).ok_or_else(|| EvalError::Domain {
            function: call.name.clone(),
            input: arg,
        })
    }
}

/// A validated expression in exactly one free variable
///
/// Construction checks that every symbol is either the variable or a named
/// constant, and every call targets a whitelisted single-argument builtin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function1D {
    source: String,
    variable: String,
    expr: Expr,
}

impl Function1D {
    /// Conventional name of the free variable
    pub const DEFAULT_VARIABLE: &'static str = "x";

    /// Parse an expression in `x`
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_in(input, Self::DEFAULT_VARIABLE)
    }

    /// Parse an expression in the given variable
    pub fn parse_in(input: &str, variable: &str) -> Result<Self, ParseError> {
        let expr = parse_expression(input)?;

        for name in expr.symbols() {
            if name != variable && Constant::from_name(name).is_none() {
                return Err(ParseError::UnknownSymbol(name.to_string()));
            }
        }

        for call in expr.calls() {
            if Builtin::from_name(&call.name).is_none() {
                return Err(ParseError::UnknownFunction(call.name.clone()));
            }
            if call.args.len() != 1 {
                return Err(ParseError::Arity {
                    name: call.name.clone(),
                    expected: 1,
                    found: call.args.len(),
                });
            }
        }

        Ok(Self {
            source: input.trim().to_string(),
            variable: variable.to_string(),
            expr,
        })
    }

    /// The expression text as entered
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The free variable name
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// The parsed expression tree
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Evaluate at a single point
    pub fn evaluate_at(&self, x: f64) -> EvalResult<f64> {
        let binding = VariableBinding {
            name: &self.variable,
            value: x,
        };
        Evaluator::new(&binding).evaluate(&self.expr)
    }

    /// Evaluate elementwise, preserving order
    ///
    /// Fails as a whole on the first input where the expression is undefined.
    pub fn evaluate(&self, xs: &[f64]) -> EvalResult<Vec<f64>> {
        xs.iter()
            .enumerate()
            .map(|(index, &x)| {
                self.evaluate_at(x).map_err(|e| EvalError::AtInput {
                    index,
                    input: x,
                    source: Box::new(e),
                })
            })
            .collect()
    }
}

impl fmt::Display for Function1D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_evaluate_linear() {
        let g = Function1D::parse("2*x+1").unwrap();
        assert_eq!(g.evaluate(&[1.0, 2.0, 3.0]).unwrap(), vec![3.0, 5.0, 7.0]);
    }

    #[rstest]
    #[case("x**2", 3.0, 9.0)]
    #[case("x^2", -3.0, 9.0)]
    #[case("-x**2", 3.0, -9.0)]
    #[case("2**-1", 0.0, 0.5)]
    #[case("exp(x)", 0.0, 1.0)]
    #[case("log(x)", 1.0, 0.0)]
    #[case("sin(x)", 0.0, 0.0)]
    #[case("cos(x)", 0.0, 1.0)]
    #[case("tan(x)", 0.0, 0.0)]
    #[case("sqrt(x)", 16.0, 4.0)]
    #[case("abs(x)", -2.0, 2.0)]
    #[case("x/4", 2.0, 0.5)]
    #[case("(x + 1)*(x - 1)", 3.0, 8.0)]
    fn test_evaluate_cases(#[case] source: &str, #[case] x: f64, #[case] expected: f64) {
        let g = Function1D::parse(source).unwrap();
        let value = g.evaluate_at(x).unwrap();
        assert!(
            (value - expected).abs() < 1e-12,
            "{} at {} = {}, expected {}",
            source,
            x,
            value,
            expected
        );
    }

    #[test]
    fn test_constants() {
        let g = Function1D::parse("pi*x + E").unwrap();
        let value = g.evaluate_at(1.0).unwrap();
        assert!((value - (std::f64::consts::PI + std::f64::consts::E)).abs() < 1e-12);
    }

    #[test]
    fn test_log_of_zero_fails_batch() {
        let g = Function1D::parse("log(x)").unwrap();
        let err = g.evaluate(&[2.0, 0.0, 1.0]).unwrap_err();
        match err {
            EvalError::AtInput { index, input, source } => {
                assert_eq!(index, 1);
                assert_eq!(input, 0.0);
                assert!(matches!(*source, EvalError::Domain { ref function, .. } if function == "log"));
            }
            other => panic!("Expected AtInput, got {:?}", other),
        }
    }

    #[test]
    fn test_division_by_zero() {
        let g = Function1D::parse("1/x").unwrap();
        let err = g.evaluate_at(0.0).unwrap_err();
        assert_eq!(err, EvalError::DivisionByZero);
    }

    #[test]
    fn test_non_finite_result() {
        let g = Function1D::parse("exp(x)").unwrap();
        assert!(matches!(g.evaluate_at(1000.0), Err(EvalError::NonFinite(_))));

        // Fractional power of a negative base
        let g = Function1D::parse("x**0.5").unwrap();
        assert!(matches!(g.evaluate_at(-1.0), Err(EvalError::NonFinite(_))));
    }

    #[test]
    fn test_rejects_other_symbols() {
        assert_eq!(
            Function1D::parse("X + 1"),
            Err(ParseError::UnknownSymbol("X".to_string()))
        );
        assert_eq!(
            Function1D::parse("x*y"),
            Err(ParseError::UnknownSymbol("y".to_string()))
        );
    }

    #[test]
    fn test_rejects_unknown_function() {
        assert_eq!(
            Function1D::parse("eval(x)"),
            Err(ParseError::UnknownFunction("eval".to_string()))
        );
    }

    #[test]
    fn test_rejects_wrong_arity() {
        assert!(matches!(
            Function1D::parse("log(x, 10)"),
            Err(ParseError::Arity { found: 2, .. })
        ));
        assert!(matches!(
            Function1D::parse("sin()"),
            Err(ParseError::Arity { found: 0, .. })
        ));
    }

    #[test]
    fn test_custom_variable() {
        let g = Function1D::parse_in("t**2", "t").unwrap();
        assert_eq!(g.variable(), "t");
        assert_eq!(g.evaluate_at(3.0).unwrap(), 9.0);
        assert!(Function1D::parse_in("x**2", "t").is_err());
    }

    #[test]
    fn test_unbound_symbol_in_raw_ast() {
        let binding = VariableBinding {
            name: "x",
            value: 1.0,
        };
        let eval = Evaluator::new(&binding);
        assert_eq!(
            eval.evaluate(&Expr::symbol("y")),
            Err(EvalError::UnboundSymbol("y".to_string()))
        );
    }

    #[test]
    fn test_display_shows_normalized_form() {
        let g = Function1D::parse("2 *x+ 1").unwrap();
        assert_eq!(g.source(), "2 *x+ 1");
        assert_eq!(g.to_string(), "2*x + 1");
    }
}
