//! Expression grammar parser using nom
//!
//! Grammar:
//! ```text
//! expr      := term (('+' | '-') term)*
//! term      := unary (('*' | '/') unary)*
//! unary     := ('-' | '+') unary | power
//! power     := atom (('**' | '^') unary)?
//! atom      := number | call | symbol | '(' expr ')'
//! call      := ident '(' args ')'
//! args      := expr (',' expr)*
//! ```
//!
//! Exponentiation is right-associative and binds tighter than unary minus,
//! so `-x**2` parses as `-(x**2)` and `2**3**2` as `2**(3**2)`.

use crate::ast::*;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, digit0, digit1, multispace0, one_of},
    combinator::{map, map_res, not, opt, recognize, value},
    multi::{many0, separated_list0},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};
use thiserror::Error;

/// Parse errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Expression is empty")]
    Empty,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unknown symbol '{0}'")]
    UnknownSymbol(String),

    #[error("Unknown function '{0}'")]
    UnknownFunction(String),

    #[error("Function '{name}' takes {expected} argument(s), got {found}")]
    Arity {
        name: String,
        expected: usize,
        found: usize,
    },
}

/// Parse an expression from a string
///
/// Only the syntax is checked here; symbol and function names are checked
/// by [`crate::Function1D::parse`].
pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    match expr(input) {
        Ok(("", result)) => Ok(result),
        Ok((remaining, _)) => Err(ParseError::Parse(format!(
            "Unexpected characters at end: '{}'",
            remaining
        ))),
        Err(e) => Err(ParseError::Parse(format!("{:?}", e))),
    }
}

/// Parse whitespace
fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// Parse an expression (entry point)
fn expr(input: &str) -> IResult<&str, Expr> {
    let (input, first) = term(input)?;
    let (input, rest) = many0(pair(ws(additive_op), term))(input)?;

    let result = rest
        .into_iter()
        .fold(first, |acc, (op, e)| Expr::binary(op, acc, e));
    Ok((input, result))
}

/// Parse multiplication and division
fn term(input: &str) -> IResult<&str, Expr> {
    let (input, first) = unary(input)?;
    let (input, rest) = many0(pair(ws(multiplicative_op), unary))(input)?;

    let result = rest
        .into_iter()
        .fold(first, |acc, (op, e)| Expr::binary(op, acc, e));
    Ok((input, result))
}

/// Parse prefix signs
fn unary(input: &str) -> IResult<&str, Expr> {
    alt((
        map(preceded(ws(char('-')), unary), Expr::neg),
        preceded(ws(char('+')), unary),
        power,
    ))(input)
}

/// Parse exponentiation
fn power(input: &str) -> IResult<&str, Expr> {
    let (input, base) = atom(input)?;
    let (input, exponent) = opt(preceded(ws(power_op), unary))(input)?;

    let result = match exponent {
        Some(exponent) => Expr::binary(BinaryOp::Pow, base, exponent),
        None => base,
    };
    Ok((input, result))
}

fn additive_op(input: &str) -> IResult<&str, BinaryOp> {
    alt((
        value(BinaryOp::Add, char('+')),
        value(BinaryOp::Sub, char('-')),
    ))(input)
}

fn multiplicative_op(input: &str) -> IResult<&str, BinaryOp> {
    alt((
        value(BinaryOp::Mul, terminated(char('*'), not(char('*')))),
        value(BinaryOp::Div, char('/')),
    ))(input)
}

fn power_op(input: &str) -> IResult<&str, &str> {
    alt((tag("**"), tag("^")))(input)
}

/// Parse atomic expressions
fn atom(input: &str) -> IResult<&str, Expr> {
    ws(alt((
        // Number (must come before identifier)
        map(parse_number, Expr::Number),
        // Function call (must come before bare symbol)
        map(function_call, Expr::Call),
        // Variable or constant
        map(identifier, Expr::symbol),
        // Parenthesized expression
        delimited(char('('), expr, char(')')),
    )))(input)
}

/// Parse an unsigned decimal number (`3`, `2.5`, `.5`, `1e-3`)
///
/// Signs are handled by `unary`, so `2-3` is a subtraction.
fn parse_number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(pair(
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit0)))),
                recognize(pair(char('.'), digit1)),
            )),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        )),
        |s: &str| s.parse::<f64>(),
    )(input)
}

/// Parse an identifier (starts with letter or underscore, followed by alphanumeric or underscore)
fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_alphabetic() || c == '_'),
        take_while(|c: char| c.is_alphanumeric() || c == '_'),
    ))(input)
}

/// Parse a function call
fn function_call(input: &str) -> IResult<&str, FunctionCall> {
    let (input, name) = identifier(input)?;
    let (input, _) = multispace0(input)?;
    let (input, args) = delimited(
        char('('),
        separated_list0(ws(char(',')), expr),
        ws(char(')')),
    )(input)?;

    Ok((input, FunctionCall::new(name, args)))
}
