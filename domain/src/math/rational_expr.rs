//! Quotients of polynomials, kept in lowest terms where it is cheap to do so.

use super::error::MathError;
use super::polynomial::{Atom, Monomial, Polynomial};
use super::rational::Rational;
use num_bigint::BigInt;
use num_integer::Integer;

/// `num / den`, where `den` is either `1` or has more than one term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RationalExpr {
    num: Polynomial,
    den: Polynomial,
}

impl RationalExpr {
    pub fn constant(value: Rational) -> Self {
        Self::from_polynomial(Polynomial::constant(value))
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Self::atom(Atom::Symbol(name.into()), Rational::one())
    }

    pub fn atom(atom: Atom, exponent: Rational) -> Self {
        Self::from_polynomial(Polynomial::term(
            Rational::one(),
            Monomial::atom(atom, exponent),
        ))
    }

    pub fn from_polynomial(num: Polynomial) -> Self {
        Self {
            num,
            den: Polynomial::constant(Rational::one()),
        }
    }

    /// Build `num / den` and bring it to normal form.
    pub fn quotient(num: Polynomial, den: Polynomial) -> Result<Self, MathError> {
        if den.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        if num.is_zero() {
            return Ok(Self::from_polynomial(Polynomial::zero()));
        }
        if let Some((monomial, coefficient)) = den.single_term() {
            let (split, inverse) = monomial.pow(&Rational::integer(-1))?;
            let factor = &coefficient.recip()? * &split;
            return Ok(Self::from_polynomial(num.mul_term(&factor, &inverse)?));
        }
        Self::reduce(num, den)
    }

    pub fn numerator(&self) -> &Polynomial {
        &self.num
    }

    pub fn denominator(&self) -> &Polynomial {
        &self.den
    }

    pub fn is_polynomial(&self) -> bool {
        self.den.as_constant().is_some_and(|c| c.is_one())
    }

    pub fn as_constant(&self) -> Option<Rational> {
        if self.is_polynomial() {
            self.num.as_constant()
        } else {
            None
        }
    }

    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    /// The symbol name if this is exactly a bare symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        if !self.is_polynomial() {
            return None;
        }
        let (monomial, coefficient) = self.num.single_term()?;
        if !coefficient.is_one() {
            return None;
        }
        let mut factors = monomial.factors();
        match (factors.next(), factors.next()) {
            (Some((Atom::Symbol(name), e)), None) if e.is_one() => Some(name),
            _ => None,
        }
    }

    pub fn add(&self, other: &Self) -> Result<Self, MathError> {
        if self.is_polynomial() && other.is_polynomial() {
            return Ok(Self::from_polynomial(self.num.add(&other.num)?));
        }
        if self.den == other.den {
            return Self::quotient(self.num.add(&other.num)?, self.den.clone());
        }
        let num = self
            .num
            .mul(&other.den)?
            .add(&other.num.mul(&self.den)?)?;
        Self::quotient(num, self.den.mul(&other.den)?)
    }

    pub fn neg(&self) -> Self {
        Self {
            num: self.num.neg(),
            den: self.den.clone(),
        }
    }

    pub fn sub(&self, other: &Self) -> Result<Self, MathError> {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Self) -> Result<Self, MathError> {
        if self.is_polynomial() && other.is_polynomial() {
            return Ok(Self::from_polynomial(self.num.mul(&other.num)?));
        }
        Self::quotient(self.num.mul(&other.num)?, self.den.mul(&other.den)?)
    }

    pub fn recip(&self) -> Result<Self, MathError> {
        Self::quotient(self.den.clone(), self.num.clone())
    }

    pub fn div(&self, other: &Self) -> Result<Self, MathError> {
        if other.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        self.mul(&other.recip()?)
    }

    /// Raise to a whole power.
    pub fn powi(&self, n: i64) -> Result<Self, MathError> {
        let magnitude = u32::try_from(n.unsigned_abs())
            .map_err(|_| MathError::ExponentTooLarge(n.to_string()))?;
        let raised = Self::quotient(self.num.pow(magnitude)?, self.den.pow(magnitude)?)?;
        if n < 0 { raised.recip() } else { Ok(raised) }
    }

    /// Normal form for a quotient with a multi-term denominator.
    fn reduce(num: Polynomial, den: Polynomial) -> Result<Self, MathError> {
        let (num, den) = clear_negative_exponents(num, den)?;

        if let Some(q) = num.exact_div(&den)? {
            return Ok(Self::from_polynomial(q));
        }
        if num.as_constant().is_none()
            && let Some(q) = den.exact_div(&num)?
        {
            return Self::quotient(Polynomial::constant(Rational::one()), q);
        }

        // Euclid only in one variable; hitting a size limit there just skips cancellation.
        let (num, den) = match univariate_gcd(&num, &den) {
            Ok(Some(g)) => match (num.exact_div(&g)?, den.exact_div(&g)?) {
                (Some(n), Some(d)) => (n, d),
                _ => (num, den),
            },
            _ => (num, den),
        };
        if let Some((monomial, coefficient)) = den.single_term() {
            // Cancellation may have left a single-term denominator.
            let single = Polynomial::term(coefficient.clone(), monomial.clone());
            return Self::quotient(num, single);
        }

        let (num, den) = integer_coefficients(num, den)?;
        Ok(Self { num, den })
    }
}

/// Multiply both sides so that no symbol has a negative exponent.
fn clear_negative_exponents(
    mut num: Polynomial,
    mut den: Polynomial,
) -> Result<(Polynomial, Polynomial), MathError> {
    let atoms = num.atoms().into_iter().chain(den.atoms());
    let mut shift = Monomial::one();
    for atom in atoms {
        if matches!(atom, Atom::Radical(_)) {
            continue;
        }
        let lowest = num.min_exponent(&atom).min(den.min_exponent(&atom));
        if lowest.is_negative() && shift.exponent(&atom).is_zero() {
            shift = shift.mul(&Monomial::atom(atom, -&lowest))?.1;
        }
    }
    if !shift.is_one() {
        num = num.mul_term(&Rational::one(), &shift)?;
        den = den.mul_term(&Rational::one(), &shift)?;
    }
    Ok((num, den))
}

/// Greatest common divisor of two polynomials in the same single variable.
fn univariate_gcd(a: &Polynomial, b: &Polynomial) -> Result<Option<Polynomial>, MathError> {
    match (a.univariate_symbol(), b.univariate_symbol()) {
        (Some(x), Some(y)) if x == y => {}
        _ => return Ok(None),
    }
    let (mut a, mut b) = (a.clone(), b.clone());
    while !b.is_zero() {
        let Some((_, remainder)) = a.div_rem(&b)? else {
            return Ok(None);
        };
        a = b;
        b = remainder;
    }
    if a.as_constant().is_some() {
        return Ok(None);
    }
    Ok(Some(a.monic()?))
}

/// Scale both sides so coefficients are coprime integers and the
/// denominator's leading coefficient is positive.
fn integer_coefficients(
    num: Polynomial,
    den: Polynomial,
) -> Result<(Polynomial, Polynomial), MathError> {
    let coefficients: Vec<&Rational> = num.terms().chain(den.terms()).map(|(_, c)| c).collect();

    let lcm = coefficients
        .iter()
        .fold(BigInt::from(1), |acc, c| acc.lcm(c.denom()));
    let content = coefficients
        .iter()
        .fold(BigInt::from(0), |acc, c| {
            acc.gcd(&(c.numer() * &lcm / c.denom()))
        });
    let mut factor = Rational::new(lcm, content)?;
    if den.leading_term().is_some_and(|(_, c)| c.is_negative()) {
        factor = -&factor;
    }
    Ok((num.scale(&factor)?, den.scale(&factor)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> RationalExpr {
        RationalExpr::symbol("x")
    }

    fn c(n: i128) -> RationalExpr {
        RationalExpr::constant(Rational::integer(n))
    }

    #[test]
    fn test_x_over_x_is_one() {
        let q = x().div(&x()).unwrap();
        assert_eq!(q.as_constant(), Some(Rational::one()));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(x().div(&c(0)), Err(MathError::DivisionByZero));
        let zero = x().sub(&x()).unwrap();
        assert_eq!(c(1).div(&zero), Err(MathError::DivisionByZero));
    }

    #[test]
    fn test_difference_of_squares_cancels() {
        let num = x().powi(2).unwrap().sub(&c(1)).unwrap();
        let den = x().sub(&c(1)).unwrap();
        let q = num.div(&den).unwrap();
        assert!(q.is_polynomial());
        assert_eq!(q, x().add(&c(1)).unwrap());
    }

    #[test]
    fn test_common_factor_cancels_via_gcd() {
        // (x^2 - 1) / (x^2 + 2x + 1) = (x - 1) / (x + 1)
        let num = x().powi(2).unwrap().sub(&c(1)).unwrap();
        let den = x().add(&c(1)).unwrap().powi(2).unwrap();
        let q = num.div(&den).unwrap();
        let expected = x()
            .sub(&c(1))
            .unwrap()
            .div(&x().add(&c(1)).unwrap())
            .unwrap();
        assert_eq!(q, expected);
        assert_eq!(q.denominator().len(), 2);
    }

    #[test]
    fn test_reciprocal_sum_clears_negative_exponents() {
        // 1 / (1/x + 1) = x / (x + 1)
        let inner = c(1).div(&x()).unwrap().add(&c(1)).unwrap();
        let q = c(1).div(&inner).unwrap();
        assert_eq!(q.numerator(), x().numerator());
        assert_eq!(q.denominator(), x().add(&c(1)).unwrap().numerator());
    }

    #[test]
    fn test_negative_power() {
        let q = c(2).powi(-3).unwrap();
        assert_eq!(q.as_constant(), Some(Rational::new(1, 8).unwrap()));
        assert_eq!(c(0).powi(-1), Err(MathError::DivisionByZero));
    }

    #[test]
    fn test_as_symbol() {
        assert_eq!(x().as_symbol(), Some("x"));
        assert_eq!(x().powi(2).unwrap().as_symbol(), None);
        assert_eq!(c(3).as_symbol(), None);
    }
}
