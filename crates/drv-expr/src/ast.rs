//! Abstract Syntax Tree for transformation expressions
//!
//! This module defines the AST produced by the parser, along with the
//! whitelisted builtin functions and named constants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An arithmetic expression in a single free variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// A numeric literal
    Number(f64),

    /// A symbol reference (the free variable or a named constant)
    Symbol(String),

    /// Arithmetic negation
    Neg(Box<Expr>),

    /// A binary operation
    Binary(BinaryOp, Box<Expr>, Box<Expr>),

    /// A function call
    Call(FunctionCall),
}

impl Expr {
    /// Create a binary expression
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    /// Create a negation
    pub fn neg(expr: Expr) -> Self {
        Expr::Neg(Box::new(expr))
    }

    /// Create a symbol reference
    pub fn symbol(name: impl Into<String>) -> Self {
        Expr::Symbol(name.into())
    }

    /// Create a single-argument function call
    pub fn call(name: impl Into<String>, arg: Expr) -> Self {
        Expr::Call(FunctionCall::new(name, vec![arg]))
    }

    /// Collect every symbol name referenced in the expression, in order of appearance
    pub fn symbols(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.visit(&mut |e| {
            if let Expr::Symbol(name) = e {
                out.push(name.as_str());
            }
        });
        out
    }

    /// Collect every function call in the expression, in order of appearance
    pub fn calls(&self) -> Vec<&FunctionCall> {
        let mut out = Vec::new();
        self.visit(&mut |e| {
            if let Expr::Call(call) = e {
                out.push(call);
            }
        });
        out
    }

    /// Pre-order traversal
    fn visit<'a>(&'a self, f: &mut impl FnMut(&'a Expr)) {
        f(self);
        match self {
            Expr::Number(_) | Expr::Symbol(_) => {}
            Expr::Neg(inner) => inner.visit(f),
            Expr::Binary(_, lhs, rhs) => {
                lhs.visit(f);
                rhs.visit(f);
            }
            Expr::Call(call) => {
                for arg in &call.args {
                    arg.visit(f);
                }
            }
        }
    }

    /// Binding strength used when printing
    fn precedence(&self) -> u8 {
        match self {
            Expr::Binary(op, _, _) => op.precedence(),
            Expr::Neg(_) => 3,
            Expr::Number(n) if n.is_sign_negative() => 3,
            _ => 5,
        }
    }

    fn fmt_child(&self, f: &mut fmt::Formatter<'_>, min_precedence: u8) -> fmt::Result {
        if self.precedence() < min_precedence {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{}", n),
            Expr::Symbol(name) => write!(f, "{}", name),
            Expr::Neg(inner) => {
                write!(f, "-")?;
                inner.fmt_child(f, 3)
            }
            Expr::Binary(op, lhs, rhs) => {
                let p = op.precedence();
                if *op == BinaryOp::Pow {
                    // Right-associative: the base must be atomic
                    lhs.fmt_child(f, 5)?;
                    write!(f, "{}", op.as_str())?;
                    rhs.fmt_child(f, 3)
                } else {
                    lhs.fmt_child(f, p)?;
                    write!(f, "{}", op.as_str())?;
                    rhs.fmt_child(f, p + 1)
                }
            }
            Expr::Call(call) => {
                write!(f, "{}(", call.name)?;
                for (i, arg) in call.args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Sub,
    /// Multiplication (*)
    Mul,
    /// Division (/)
    Div,
    /// Exponentiation (** or ^)
    Pow,
}

impl BinaryOp {
    /// Apply the operator to two values
    ///
    /// Returns `None` for division by zero.
    pub fn apply(&self, lhs: f64, rhs: f64) -> Option<f64> {
        match self {
            BinaryOp::Add => Some(lhs + rhs),
            BinaryOp::Sub => Some(lhs - rhs),
            BinaryOp::Mul => Some(lhs * rhs),
            BinaryOp::Div => (rhs != 0.0).then(|| lhs / rhs),
            BinaryOp::Pow => Some(lhs.powf(rhs)),
        }
    }

    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => " + ",
            BinaryOp::Sub => " - ",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "**",
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            BinaryOp::Add | BinaryOp::Sub => 1,
            BinaryOp::Mul | BinaryOp::Div => 2,
            BinaryOp::Pow => 4,
        }
    }
}

/// A function call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Function name
    pub name: String,
    /// Arguments
    pub args: Vec<Expr>,
}

impl FunctionCall {
    /// Create a new function call
    pub fn new(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// Whitelisted single-argument functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Builtin {
    Sin,
    Cos,
    Tan,
    Exp,
    /// Natural logarithm
    Log,
    Sqrt,
    Abs,
}

impl Builtin {
    pub const ALL: [Builtin; 7] = [
        Builtin::Sin,
        Builtin::Cos,
        Builtin::Tan,
        Builtin::Exp,
        Builtin::Log,
        Builtin::Sqrt,
        Builtin::Abs,
    ];

    /// Look up a builtin by its name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    /// The name used in expressions
    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Sin => "sin",
            Builtin::Cos => "cos",
            Builtin::Tan => "tan",
            Builtin::Exp => "exp",
            Builtin::Log => "log",
            Builtin::Sqrt => "sqrt",
            Builtin::Abs => "abs",
        }
    }

    /// Apply the function, returning `None` outside its real domain
    pub fn apply(&self, x: f64) -> Option<f64> {
        match self {
            Builtin::Sin => Some(x.sin()),
            Builtin::Cos => Some(x.cos()),
            Builtin::Tan => Some(x.tan()),
            Builtin::Exp => Some(x.exp()),
            Builtin::Log => (x > 0.0).then(|| x.ln()),
            Builtin::Sqrt => (x >= 0.0).then(|| x.sqrt()),
            Builtin::Abs => Some(x.abs()),
        }
    }
}

/// Named constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Constant {
    /// Ratio of circumference to diameter (`pi`)
    Pi,
    /// Euler's number (`E`)
    E,
}

impl Constant {
    /// Look up a constant by its name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pi" => Some(Constant::Pi),
            "E" => Some(Constant::E),
            _ => None,
        }
    }

    /// Numeric value
    pub fn value(&self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
        }
    }
}
