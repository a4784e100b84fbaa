//! Parsed expression tree

use super::rational::Rational;

/// An expression as written, before any simplification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Number(Rational),
    Symbol(String),
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Call { name: String, args: Vec<Expr> },
}

impl Expr {
    pub fn number(n: i64) -> Self {
        Expr::Number(Rational::integer(n))
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Expr::Symbol(name.into())
    }
}

/// Top-level parse result: a plain expression or a two-sided equation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formula {
    Expression(Expr),
    Equation { lhs: Expr, rhs: Expr },
}
