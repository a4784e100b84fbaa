//! Recursive-descent parser for math expressions.
//!
//! Grammar (lowest to highest precedence):
//!
//! ```text
//! formula := sum ( '=' sum )?
//! sum     := term ( ('+' | '-') term )*
//! term    := unary ( ('*' | '/') unary )*
//! unary   := ('-' | '+') unary | power
//! power   := primary ( '^' unary )?
//! primary := NUMBER | IDENT | IDENT '(' args ')' | '(' sum ')'
//! ```
//!
//! `-x^2` parses as `-(x^2)` and `2^3^2` as `2^(3^2)`.

use super::error::MathError;
use super::expr::{Expr, Formula};
use super::lexer::{Token, TokenKind, tokenize};

/// Nesting limit for parentheses, unary signs and exponents.
const MAX_DEPTH: usize = 200;

/// Token limit; keeps left-leaning operator chains shallow enough to walk recursively.
pub const MAX_TOKENS: usize = 512;

/// Parse `input` into a [`Formula`].
pub fn parse(input: &str) -> Result<Formula, MathError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(MathError::EmptyExpression);
    }
    if tokens.len() > MAX_TOKENS {
        return Err(MathError::InputTooLong { limit: MAX_TOKENS });
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    parser.formula()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn unexpected(token: Token) -> MathError {
        MathError::UnexpectedToken {
            token: token.kind.to_string(),
            position: token.position,
        }
    }

    fn enter(&mut self) -> Result<(), MathError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(MathError::TooDeeplyNested);
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn formula(&mut self) -> Result<Formula, MathError> {
        let lhs = self.sum()?;
        let formula = if self.eat(&TokenKind::Equals) {
            let rhs = self.sum()?;
            Formula::Equation { lhs, rhs }
        } else {
            Formula::Expression(lhs)
        };

        match self.advance() {
            None => Ok(formula),
            Some(Token {
                kind: TokenKind::Equals,
                position,
            }) => Err(MathError::ChainedEquality { position }),
            Some(token) => Err(Self::unexpected(token)),
        }
    }

    fn sum(&mut self) -> Result<Expr, MathError> {
        let mut lhs = self.term()?;
        loop {
            if self.eat(&TokenKind::Plus) {
                let rhs = self.term()?;
                lhs = Expr::Add(Box::new(lhs), Box::new(rhs));
            } else if self.eat(&TokenKind::Minus) {
                let rhs = self.term()?;
                lhs = Expr::Sub(Box::new(lhs), Box::new(rhs));
            } else {
                return Ok(lhs);
            }
        }
    }

    fn term(&mut self) -> Result<Expr, MathError> {
        let mut lhs = self.unary()?;
        loop {
            if self.eat(&TokenKind::Star) {
                let rhs = self.unary()?;
                lhs = Expr::Mul(Box::new(lhs), Box::new(rhs));
            } else if self.eat(&TokenKind::Slash) {
                let rhs = self.unary()?;
                lhs = Expr::Div(Box::new(lhs), Box::new(rhs));
            } else {
                return Ok(lhs);
            }
        }
    }

    fn unary(&mut self) -> Result<Expr, MathError> {
        self.enter()?;
        let result = if self.eat(&TokenKind::Minus) {
            self.unary().map(|e| Expr::Neg(Box::new(e)))
        } else if self.eat(&TokenKind::Plus) {
            self.unary()
        } else {
            self.power()
        };
        self.leave();
        result
    }

    fn power(&mut self) -> Result<Expr, MathError> {
        let base = self.primary()?;
        if self.eat(&TokenKind::Power) {
            let exponent = self.unary()?;
            Ok(Expr::Pow(Box::new(base), Box::new(exponent)))
        } else {
            Ok(base)
        }
    }

    fn primary(&mut self) -> Result<Expr, MathError> {
        let token = self.advance().ok_or(MathError::UnexpectedEnd)?;
        match token.kind {
            TokenKind::Number(n) => Ok(Expr::Number(n)),
            TokenKind::Ident(name) => {
                if self.eat(&TokenKind::LParen) {
                    let args = self.arguments(token.position)?;
                    Ok(Expr::Call { name, args })
                } else {
                    Ok(Expr::Symbol(name))
                }
            }
            TokenKind::LParen => {
                self.enter()?;
                let inner = self.sum()?;
                self.leave();
                self.close(token.position)?;
                Ok(inner)
            }
            _ => Err(Self::unexpected(token)),
        }
    }

    fn arguments(&mut self, open: usize) -> Result<Vec<Expr>, MathError> {
        self.enter()?;
        let mut args = Vec::new();
        if !self.eat(&TokenKind::RParen) {
            loop {
                args.push(self.sum()?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
            self.close(open)?;
        }
        self.leave();
        Ok(args)
    }

    fn close(&mut self, open: usize) -> Result<(), MathError> {
        match self.advance() {
            Some(Token {
                kind: TokenKind::RParen,
                ..
            }) => Ok(()),
            None => Err(MathError::UnclosedParenthesis { position: open }),
            Some(token) => Err(Self::unexpected(token)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr(input: &str) -> Expr {
        match parse(input).unwrap() {
            Formula::Expression(e) => e,
            other => panic!("Expected expression, got {:?}", other),
        }
    }

    #[test]
    fn test_precedence() {
        assert_eq!(
            expr("1 + 2 * x"),
            Expr::Add(
                Box::new(Expr::number(1)),
                Box::new(Expr::Mul(
                    Box::new(Expr::number(2)),
                    Box::new(Expr::symbol("x"))
                ))
            )
        );
    }

    #[test]
    fn test_unary_minus_binds_looser_than_power() {
        assert_eq!(
            expr("-x^2"),
            Expr::Neg(Box::new(Expr::Pow(
                Box::new(Expr::symbol("x")),
                Box::new(Expr::number(2))
            )))
        );
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_eq!(
            expr("2^3^2"),
            Expr::Pow(
                Box::new(Expr::number(2)),
                Box::new(Expr::Pow(
                    Box::new(Expr::number(3)),
                    Box::new(Expr::number(2))
                ))
            )
        );
    }

    #[test]
    fn test_negative_exponent() {
        assert_eq!(
            expr("2^-1"),
            Expr::Pow(
                Box::new(Expr::number(2)),
                Box::new(Expr::Neg(Box::new(Expr::number(1))))
            )
        );
    }

    #[test]
    fn test_function_call() {
        assert_eq!(
            expr("sqrt(4)"),
            Expr::Call {
                name: "sqrt".to_string(),
                args: vec![Expr::number(4)],
            }
        );
    }

    #[test]
    fn test_equation() {
        assert_eq!(
            parse("x = 2").unwrap(),
            Formula::Equation {
                lhs: Expr::symbol("x"),
                rhs: Expr::number(2),
            }
        );
    }

    #[test]
    fn test_chained_equality_rejected() {
        assert_eq!(
            parse("x = 1 = 2"),
            Err(MathError::ChainedEquality { position: 6 })
        );
    }

    #[test]
    fn test_sentence_is_rejected() {
        assert_eq!(
            parse("this is not math ("),
            Err(MathError::UnexpectedToken {
                token: "is".to_string(),
                position: 5,
            })
        );
    }

    #[test]
    fn test_implicit_multiplication_is_rejected() {
        assert!(matches!(
            parse("2x"),
            Err(MathError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn test_unclosed_parenthesis() {
        assert_eq!(
            parse("(1 + 2"),
            Err(MathError::UnclosedParenthesis { position: 0 })
        );
    }

    #[test]
    fn test_trailing_operator() {
        assert_eq!(parse("1 +"), Err(MathError::UnexpectedEnd));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse("   "), Err(MathError::EmptyExpression));
    }

    #[test]
    fn test_deep_nesting_is_an_error_not_a_crash() {
        let input = format!("{}1{}", "(".repeat(150), ")".repeat(150));
        assert_eq!(parse(&input), Err(MathError::TooDeeplyNested));

        let signs = format!("{}1", "-".repeat(300));
        assert_eq!(parse(&signs), Err(MathError::TooDeeplyNested));
    }

    #[test]
    fn test_long_input_rejected() {
        let input = vec!["1"; 400].join("+");
        assert_eq!(
            parse(&input),
            Err(MathError::InputTooLong { limit: MAX_TOKENS })
        );
    }
}
