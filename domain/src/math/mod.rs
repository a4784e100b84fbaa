//! Symbolic math evaluation.
//!
//! Text is tokenized, parsed into an [`Expr`] tree, lowered into exact
//! rational functions and rendered back in a compact canonical form:
//!
//! - [`lexer`] / [`parser`]: text to [`Formula`]
//! - [`rational`]: exact fractions of arbitrary size
//! - [`polynomial`] / [`rational_expr`]: the normal form
//! - [`simplify`]: lowering, powers and radicals, equations
//!
//! Every failure is a [`MathError`]; nothing in here panics on user input.

pub mod error;
pub mod expr;
pub mod lexer;
pub mod parser;
pub mod polynomial;
pub mod rational;
pub mod rational_expr;
mod render;
pub mod simplify;

pub use error::MathError;
pub use expr::{Expr, Formula};
pub use parser::parse;
pub use rational::Rational;
pub use rational_expr::RationalExpr;
pub use simplify::{Simplified, simplify};

/// Prefix of a successful evaluation.
pub const MATH_RESULT_PREFIX: &str = "Math result: ";

/// Prefix of a failed evaluation.
pub const MATH_ERROR_PREFIX: &str = "Error evaluating math: ";

/// Parse and simplify `input`.
pub fn evaluate(input: &str) -> Result<Simplified, MathError> {
    simplify(&parse(input)?)
}

/// Evaluate `input` and format the outcome as user-facing text.
///
/// Never fails: errors become `Error evaluating math: {message}`.
pub fn evaluate_math(input: &str) -> String {
    match evaluate(input) {
        Ok(result) => format!("{}{}", MATH_RESULT_PREFIX, result),
        Err(e) => format!("{}{}", MATH_ERROR_PREFIX, e),
    }
}
