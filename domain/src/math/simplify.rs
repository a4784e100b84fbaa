//! Lowering of parsed formulas into simplified normal form.

use super::error::MathError;
use super::expr::{Expr, Formula};
use super::polynomial::{Atom, Monomial, Polynomial};
use super::rational::{Rational, integer_root};
use super::rational_expr::RationalExpr;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use std::fmt;

/// Largest whole exponent applied to a non-constant base.
pub const MAX_EXPONENT: u64 = 256;

/// Trial divisors used when pulling perfect powers out of a radical.
const RADICAL_TRIAL_LIMIT: u32 = 10_000;

/// The simplified form of a [`Formula`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Simplified {
    Expression(RationalExpr),
    /// An equation whose sides did not collapse to a constant difference.
    Equation { lhs: RationalExpr, rhs: RationalExpr },
    /// An equation that is identically true or false.
    Truth(bool),
}

impl fmt::Display for Simplified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Simplified::Expression(e) => write!(f, "{}", e),
            Simplified::Equation { lhs, rhs } => write!(f, "Eq({}, {})", lhs, rhs),
            Simplified::Truth(true) => write!(f, "True"),
            Simplified::Truth(false) => write!(f, "False"),
        }
    }
}

/// Simplify a parsed formula.
pub fn simplify(formula: &Formula) -> Result<Simplified, MathError> {
    match formula {
        Formula::Expression(expr) => Ok(Simplified::Expression(lower(expr)?)),
        Formula::Equation { lhs, rhs } => {
            let lhs = lower(lhs)?;
            let rhs = lower(rhs)?;
            let difference = lhs.sub(&rhs)?;
            if let Some(value) = difference.as_constant() {
                return Ok(Simplified::Truth(value.is_zero()));
            }
            // A non-zero constant over a non-constant denominator never vanishes.
            if !difference.is_polynomial() && difference.numerator().as_constant().is_some() {
                return Ok(Simplified::Truth(false));
            }
            Ok(Simplified::Equation { lhs, rhs })
        }
    }
}

fn lower(expr: &Expr) -> Result<RationalExpr, MathError> {
    match expr {
        Expr::Number(n) => Ok(RationalExpr::constant(n.clone())),
        Expr::Symbol(name) => Ok(RationalExpr::symbol(name.clone())),
        Expr::Neg(inner) => Ok(lower(inner)?.neg()),
        Expr::Add(a, b) => lower(a)?.add(&lower(b)?),
        Expr::Sub(a, b) => lower(a)?.sub(&lower(b)?),
        Expr::Mul(a, b) => lower(a)?.mul(&lower(b)?),
        Expr::Div(a, b) => lower(a)?.div(&lower(b)?),
        Expr::Pow(base, exponent) => power(&lower(base)?, &lower(exponent)?),
        Expr::Call { name, args } => call(name, args),
    }
}

fn call(name: &str, args: &[Expr]) -> Result<RationalExpr, MathError> {
    match name {
        "sqrt" => {
            let [arg] = args else {
                return Err(MathError::WrongArity {
                    name: name.to_string(),
                    expected: 1,
                    found: args.len(),
                });
            };
            let half = Rational::new(1, 2)?;
            power(&lower(arg)?, &RationalExpr::constant(half))
        }
        _ => Err(MathError::UnknownFunction(name.to_string())),
    }
}

fn power(base: &RationalExpr, exponent: &RationalExpr) -> Result<RationalExpr, MathError> {
    let Some(k) = exponent.as_constant() else {
        if base.as_constant().is_some_and(|c| c.is_one()) {
            return Ok(RationalExpr::constant(Rational::one()));
        }
        return Ok(opaque_power(base, &exponent.to_string()));
    };
    let too_large = || MathError::ExponentTooLarge(k.to_string());

    if k.is_integer() {
        if let Some(value) = base.as_constant() {
            return match k.to_i64() {
                Some(n) => Ok(RationalExpr::constant(value.pow(n)?)),
                None => unit_power(&value, &k).ok_or_else(too_large),
            };
        }
        let n = k
            .to_i64()
            .filter(|n| n.unsigned_abs() <= MAX_EXPONENT)
            .ok_or_else(too_large)?;
        return base.powi(n);
    }

    if let Some(value) = base.as_constant() {
        return rational_power(&value, &k);
    }
    if let Some(name) = base.as_symbol() {
        return Ok(RationalExpr::atom(Atom::Symbol(name.to_string()), k));
    }
    Ok(opaque_power(base, &k.to_string()))
}

/// `value^k` for an integer `k` too large for repeated multiplication,
/// when the result is still trivially known.
fn unit_power(value: &Rational, k: &Rational) -> Option<RationalExpr> {
    let result = if value.is_one() {
        Rational::one()
    } else if *value == Rational::integer(-1) {
        Rational::integer(if k.numer().is_even() { 1 } else { -1 })
    } else if value.is_zero() && !k.is_negative() {
        Rational::zero()
    } else {
        return None;
    };
    Some(RationalExpr::constant(result))
}

fn opaque_power(base: &RationalExpr, exponent: &str) -> RationalExpr {
    RationalExpr::atom(
        Atom::Power {
            base: base.to_string(),
            exponent: exponent.to_string(),
        },
        Rational::one(),
    )
}

/// `value^k` for a non-integer `k`.
fn rational_power(value: &Rational, k: &Rational) -> Result<RationalExpr, MathError> {
    if value.is_zero() {
        return if k.is_negative() {
            Err(MathError::DivisionByZero)
        } else {
            Ok(RationalExpr::constant(Rational::zero()))
        };
    }
    if value.is_negative() {
        return Err(MathError::NotReal);
    }
    let num = integer_power(value.numer(), k)?;
    if value.is_integer() {
        return Ok(num);
    }
    num.div(&integer_power(value.denom(), k)?)
}

/// `m^(p/q)` for a positive integer `m`, with perfect `q`-th powers pulled out.
fn integer_power(m: &BigInt, k: &Rational) -> Result<RationalExpr, MathError> {
    if m.is_one() {
        return Ok(RationalExpr::constant(Rational::one()));
    }
    let too_large = || MathError::ExponentTooLarge(k.to_string());
    let p = k.numer().to_i64().ok_or_else(too_large)?;
    let q = k.denom().to_u32().ok_or_else(too_large)?;

    let mut outside = BigInt::one();
    let mut inside = m.clone();
    for f in 2..=RADICAL_TRIAL_LIMIT {
        let f = BigInt::from(f);
        // f^q >= 2^((bits - 1) * q) already exceeds what is left.
        if (f.bits() - 1).saturating_mul(u64::from(q)) >= inside.bits() {
            break;
        }
        let fq = f.pow(q);
        while (&inside % &fq).is_zero() {
            inside /= &fq;
            outside *= &f;
        }
    }
    if let Some(root) = integer_root(&inside, q) {
        outside *= root;
        inside = BigInt::one();
    }

    let coefficient = Rational::integer(outside).pow(p)?;
    if inside.is_one() {
        return Ok(RationalExpr::constant(coefficient));
    }

    // 4^(1/4) is 2^(1/2): look for a smaller root of what is left.
    let mut base = inside.clone();
    let mut shrink: u32 = 1;
    for g in proper_divisors(q) {
        if let Some(root) = integer_root(&inside, g) {
            base = root;
            shrink = g;
            break;
        }
    }
    let exponent = Rational::new(BigInt::from(shrink) * BigInt::from(p), q)?;
    let (extra, monomial) = Monomial::atom(Atom::Radical(base), exponent).normalize()?;
    Ok(RationalExpr::from_polynomial(Polynomial::term(
        &coefficient * &extra,
        monomial,
    )))
}

/// Divisors of `q` strictly between `1` and `q`, largest first.
fn proper_divisors(q: u32) -> Vec<u32> {
    let mut divisors = Vec::new();
    let mut d: u32 = 2;
    while u64::from(d) * u64::from(d) <= u64::from(q) {
        if q % d == 0 {
            divisors.push(d);
            divisors.push(q / d);
        }
        d += 1;
    }
    divisors.sort_unstable_by(|a, b| b.cmp(a));
    divisors.dedup();
    divisors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::parser::parse;

    fn run(input: &str) -> Result<String, MathError> {
        simplify(&parse(input)?).map(|s| s.to_string())
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(run("2+2").unwrap(), "4");
        assert_eq!(run("2/4").unwrap(), "1/2");
        assert_eq!(run("0.1 + 0.2").unwrap(), "3/10");
        assert_eq!(run("2^10").unwrap(), "1024");
        assert_eq!(run("2^-3").unwrap(), "1/8");
    }

    #[test]
    fn test_polynomial_expansion() {
        assert_eq!(run("(x+1)^2").unwrap(), "x**2 + 2*x + 1");
        assert_eq!(run("x^2 + 2*x + 1").unwrap(), "x**2 + 2*x + 1");
        assert_eq!(run("x*x - x^2").unwrap(), "0");
    }

    #[test]
    fn test_rational_functions() {
        assert_eq!(run("(x^2 - 1)/(x - 1)").unwrap(), "x + 1");
        assert_eq!(run("1/(1/x + 1)").unwrap(), "x/(x + 1)");
    }

    #[test]
    fn test_radicals() {
        assert_eq!(run("sqrt(8)").unwrap(), "2*sqrt(2)");
        assert_eq!(run("sqrt(4)").unwrap(), "2");
        assert_eq!(run("1/sqrt(2)").unwrap(), "sqrt(2)/2");
        assert_eq!(run("sqrt(2)*sqrt(2)").unwrap(), "2");
        assert_eq!(run("4^(1/4)").unwrap(), "sqrt(2)");
        assert_eq!(run("8^(2/3)").unwrap(), "4");
        assert_eq!(run("sqrt(1/4)").unwrap(), "1/2");
        assert_eq!(run("sqrt(x)").unwrap(), "sqrt(x)");
        assert_eq!(run("sqrt(x)^2").unwrap(), "x");
    }

    #[test]
    fn test_opaque_powers() {
        assert_eq!(run("x^y").unwrap(), "x**y");
        assert_eq!(run("1^y").unwrap(), "1");
        assert_eq!(run("sqrt(x + 1)").unwrap(), "sqrt(x + 1)");
    }

    #[test]
    fn test_equations() {
        assert_eq!(run("x = x").unwrap(), "True");
        assert_eq!(run("1 = 2").unwrap(), "False");
        assert_eq!(run("x + 1 = 3").unwrap(), "Eq(x + 1, 3)");
        assert_eq!(run("1/(x+1) = 0").unwrap(), "False");
    }

    #[test]
    fn test_errors() {
        assert_eq!(run("1/0"), Err(MathError::DivisionByZero));
        assert_eq!(run("0^-1"), Err(MathError::DivisionByZero));
        assert_eq!(run("(-1)^(1/2)"), Err(MathError::NotReal));
        assert_eq!(run("sqrt(-4)"), Err(MathError::NotReal));
        assert_eq!(
            run("sin(x)"),
            Err(MathError::UnknownFunction("sin".to_string()))
        );
        assert_eq!(
            run("sqrt(1, 2)"),
            Err(MathError::WrongArity {
                name: "sqrt".to_string(),
                expected: 1,
                found: 2,
            })
        );
        assert_eq!(
            run("x^1000"),
            Err(MathError::ExponentTooLarge("1000".to_string()))
        );
        assert_eq!(run("2^100000"), Err(MathError::Overflow));
    }

    #[test]
    fn test_large_exact_numbers() {
        assert_eq!(
            run("2^200").unwrap(),
            "1606938044258990275541962092341162602522202993782792835301376"
        );
        assert_eq!(run("10^40").unwrap(), format!("1{}", "0".repeat(40)));
        assert_eq!(
            run("12345678901234567890123456789012345678901234567890 + 1").unwrap(),
            "12345678901234567890123456789012345678901234567891"
        );
        assert_eq!(run("(2^300)^(1/300)").unwrap(), "2");
        assert_eq!(run("1^(10^30)").unwrap(), "1");
        assert_eq!(run("(-1)^(10^30 + 1)").unwrap(), "-1");
    }

    #[test]
    fn test_huge_root_index() {
        assert_eq!(run("2^(1/1000000007)").unwrap(), "2**(1/1000000007)");
        assert_eq!(run("2^(1/4294967295)").unwrap(), "2**(1/4294967295)");
        assert_eq!(run("64^(1/6)").unwrap(), "2");
        assert_eq!(run("4^(1/6)").unwrap(), "2**(1/3)");
    }

    #[test]
    fn test_coprime_fractional_exponents() {
        assert_eq!(
            run("x^(1/100000000000000000003) * y^(1/100000000000000000009)").unwrap(),
            "x**(1/100000000000000000003)*y**(1/100000000000000000009)"
        );
    }
}
