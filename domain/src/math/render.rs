//! Text rendering in the conventional computer-algebra style:
//! `x**2 + 2*x + 1`, `3*x/2`, `sqrt(2)`, `(x - 1)/(x + 1)`.

use super::polynomial::{Atom, Monomial, Polynomial};
use super::rational::Rational;
use super::rational_expr::RationalExpr;
use num_bigint::BigInt;
use num_traits::One;
use std::fmt;

/// True when `text` can stand next to `**` without parentheses.
fn is_atomic(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_alphanumeric() || c == '_')
}

fn wrap(text: &str) -> String {
    if is_atomic(text) {
        text.to_string()
    } else {
        format!("({})", text)
    }
}

fn exponent_text(e: &Rational) -> String {
    if e.is_integer() {
        e.to_string()
    } else {
        format!("({})", e)
    }
}

fn is_half(e: &Rational) -> bool {
    e.numer().is_one() && *e.denom() == BigInt::from(2)
}

/// One factor with a positive exponent, e.g. `x**2` or `sqrt(3)`.
fn factor_text(atom: &Atom, exponent: &Rational) -> String {
    let base = match atom {
        Atom::Radical(n) => n.to_string(),
        Atom::Symbol(name) => name.clone(),
        Atom::Power { base, exponent: inner } => {
            let power = if inner == "1/2" {
                format!("sqrt({})", base)
            } else {
                format!("{}**{}", wrap(base), wrap(inner))
            };
            return if exponent.is_one() {
                power
            } else {
                format!("({})**{}", power, exponent_text(exponent))
            };
        }
    };
    if exponent.is_one() {
        base
    } else if is_half(exponent) {
        format!("sqrt({})", base)
    } else {
        format!("{}**{}", base, exponent_text(exponent))
    }
}

/// Render the magnitude of `coefficient * monomial`; the sign is handled by the caller.
fn term_text(coefficient: &Rational, monomial: &Monomial) -> String {
    let mut upper = Vec::new();
    let mut lower = Vec::new();
    for (atom, exponent) in monomial.factors() {
        if exponent.is_negative() {
            lower.push(factor_text(atom, &-exponent));
        } else {
            upper.push(factor_text(atom, exponent));
        }
    }

    let magnitude = coefficient.numer().magnitude();
    if !magnitude.is_one() || upper.is_empty() {
        upper.insert(0, magnitude.to_string());
    }
    if !coefficient.denom().is_one() {
        lower.insert(0, coefficient.denom().to_string());
    }

    let numerator = upper.join("*");
    match lower.len() {
        0 => numerator,
        1 => format!("{}/{}", numerator, lower[0]),
        _ => format!("{}/({})", numerator, lower.join("*")),
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms = self.sorted_terms();
        if terms.is_empty() {
            return write!(f, "0");
        }
        for (i, (monomial, coefficient)) in terms.into_iter().enumerate() {
            let text = term_text(coefficient, monomial);
            match (i, coefficient.is_negative()) {
                (0, false) => write!(f, "{}", text)?,
                (0, true) => write!(f, "-{}", text)?,
                (_, false) => write!(f, " + {}", text)?,
                (_, true) => write!(f, " - {}", text)?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for RationalExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_polynomial() {
            return write!(f, "{}", self.numerator());
        }
        let group = |p: &Polynomial| {
            let text = p.to_string();
            if p.len() > 1 { format!("({})", text) } else { text }
        };
        write!(f, "{}/{}", group(self.numerator()), group(self.denominator()))
    }
}
