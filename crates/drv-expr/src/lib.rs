//! drv-expr - Expression grammar for random-variable transformations
//!
//! This crate parses and evaluates the single-variable expressions used to
//! transform a discrete random variable, `g(x)`. It is deliberately not a
//! computer-algebra system: only a whitelisted set of operators, functions and
//! constants is understood.
//!
//! # Expression Syntax
//!
//! - **Arithmetic**: `+`, `-`, `*`, `/`, `**` (or `^`), parentheses
//! - **Functions**: `sin`, `cos`, `tan`, `exp`, `log` (natural), `sqrt`, `abs`
//! - **Constants**: `pi`, `E`
//! - **Variable**: `x` (case-sensitive)
//!
//! # Examples
//!
//! ```ignore
//! use drv_expr::Function1D;
//!
//! let g = Function1D::parse("2*x + 1")?;
//! assert_eq!(g.evaluate(&[1.0, 2.0, 3.0])?, vec![3.0, 5.0, 7.0]);
//!
//! let g = Function1D::parse("exp(-x**2 / 2)")?;
//! ```

pub mod ast;
pub mod eval;
pub mod parser;

pub use ast::*;
pub use eval::*;
pub use parser::*;
