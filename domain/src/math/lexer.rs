//! Tokenizer for math expressions.
//!
//! Positions are character offsets into the original text (0-based).

use super::error::MathError;
use super::rational::Rational;
use num_bigint::BigInt;

/// Longest number literal accepted, in digits.
pub const MAX_LITERAL_DIGITS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Number(Rational),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    /// `^` or `**`
    Power,
    LParen,
    RParen,
    Comma,
    Equals,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "{}", n),
            TokenKind::Ident(name) => write!(f, "{}", name),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Power => write!(f, "^"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Equals => write!(f, "="),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

/// Split `input` into tokens.
pub fn tokenize(input: &str) -> Result<Vec<Token>, MathError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let start = i;

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c.is_ascii_digit()
            || (c == '.' && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit()))
        {
            let (number, next) = read_number(&chars, i)?;
            tokens.push(Token {
                kind: TokenKind::Number(number),
                position: start,
            });
            i = next;
            continue;
        }

        if c.is_alphabetic() || c == '_' {
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            tokens.push(Token {
                kind: TokenKind::Ident(chars[start..i].iter().collect()),
                position: start,
            });
            continue;
        }

        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' if chars.get(i + 1) == Some(&'*') => {
                i += 1;
                TokenKind::Power
            }
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '^' => TokenKind::Power,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            '=' => TokenKind::Equals,
            other => {
                return Err(MathError::UnexpectedCharacter {
                    ch: other,
                    position: start,
                });
            }
        };
        tokens.push(Token {
            kind,
            position: start,
        });
        i += 1;
    }

    Ok(tokens)
}

/// Read an integer or decimal literal as an exact rational.
fn read_number(chars: &[char], start: usize) -> Result<(Rational, usize), MathError> {
    let mut i = start;
    let mut digits = String::new();
    let mut scale: usize = 0;
    let mut seen_dot = false;

    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_digit() {
            digits.push(c);
            if seen_dot {
                scale += 1;
            }
        } else if c == '.' && !seen_dot {
            seen_dot = true;
        } else {
            break;
        }
        i += 1;
    }

    let literal: String = chars[start..i].iter().collect();
    if digits.len() > MAX_LITERAL_DIGITS {
        return Err(MathError::NumberTooLarge(literal));
    }
    let too_large = || MathError::NumberTooLarge(literal.clone());
    let mantissa: BigInt = digits.parse().map_err(|_| too_large())?;
    let divisor = BigInt::from(10).pow(u32::try_from(scale).map_err(|_| too_large())?);
    let value = Rational::new(mantissa, divisor).map_err(|_| too_large())?;
    Ok((value, i))
}
