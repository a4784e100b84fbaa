//! Math engine errors

use thiserror::Error;

/// Errors raised while parsing or simplifying an expression.
///
/// The `Display` text is what users see after `Error evaluating math: `.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("empty expression")]
    EmptyExpression,

    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },

    #[error("unexpected token '{token}' at position {position}")]
    UnexpectedToken { token: String, position: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unclosed parenthesis opened at position {position}")]
    UnclosedParenthesis { position: usize },

    #[error("only one '=' is allowed (found another at position {position})")]
    ChainedEquality { position: usize },

    #[error("expression is nested too deeply")]
    TooDeeplyNested,

    #[error("expression is too long (limit is {limit} tokens)")]
    InputTooLong { limit: usize },

    #[error("number literal '{0}' is too large")]
    NumberTooLarge(String),

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("function '{name}' takes {expected} argument(s), got {found}")]
    WrongArity {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("exponent {0} is too large")]
    ExponentTooLarge(String),

    #[error("result is not a real number")]
    NotReal,

    #[error("number is too large")]
    Overflow,

    #[error("expression is too large to simplify")]
    ExpressionTooLarge,
}

impl MathError {
    /// Whether the failure happened while reading the text, as opposed to
    /// while simplifying an expression that parsed fine.
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self,
            MathError::EmptyExpression
                | MathError::UnexpectedCharacter { .. }
                | MathError::UnexpectedToken { .. }
                | MathError::UnexpectedEnd
                | MathError::UnclosedParenthesis { .. }
                | MathError::ChainedEquality { .. }
                | MathError::TooDeeplyNested
                | MathError::InputTooLong { .. }
                | MathError::NumberTooLarge(_)
        )
    }
}
