//! Exact rational numbers of arbitrary size.
//!
//! Sums and products never fail. Powers and the growth checks done by
//! [`Polynomial`](super::polynomial::Polynomial) keep numbers below
//! [`MAX_BITS`], so hostile input surfaces as [`MathError::Overflow`]
//! instead of exhausting memory.

use super::error::MathError;
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Largest numerator or denominator, in bits, a power may produce.
pub const MAX_BITS: u64 = 1 << 16;

/// A normalized fraction `num / den` with `den > 0` and `gcd(num, den) == 1`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rational(BigRational);

impl Rational {
    pub fn zero() -> Self {
        Self(BigRational::zero())
    }

    pub fn one() -> Self {
        Self(BigRational::one())
    }

    /// Build `num / den`, reducing to lowest terms.
    pub fn new(num: impl Into<BigInt>, den: impl Into<BigInt>) -> Result<Self, MathError> {
        let den = den.into();
        if den.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        Ok(Self(BigRational::new(num.into(), den)))
    }

    pub fn integer(n: impl Into<BigInt>) -> Self {
        Self(BigRational::from_integer(n.into()))
    }

    pub fn numer(&self) -> &BigInt {
        self.0.numer()
    }

    pub fn denom(&self) -> &BigInt {
        self.0.denom()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.0.is_one()
    }

    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Size of the larger of numerator and denominator, in bits.
    pub fn bits(&self) -> u64 {
        self.numer().bits().max(self.denom().bits())
    }

    pub fn recip(&self) -> Result<Self, MathError> {
        if self.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        Ok(Self(self.0.recip()))
    }

    pub fn checked_div(&self, other: &Self) -> Result<Self, MathError> {
        Ok(self * &other.recip()?)
    }

    /// Raise to an integer power. `0^0` is `1`; `0^-n` is a division by zero.
    pub fn pow(&self, exponent: i64) -> Result<Self, MathError> {
        let base = if exponent < 0 { self.recip()? } else { self.clone() };
        let e = u32::try_from(exponent.unsigned_abs())
            .map_err(|_| MathError::ExponentTooLarge(exponent.to_string()))?;
        // |n| >= 2^(bits - 1), so n^e has at least (bits - 1) * e + 1 bits.
        let grows_past = |n: &BigInt| n.bits().saturating_sub(1).saturating_mul(u64::from(e)) >= MAX_BITS;
        if grows_past(base.numer()) || grows_past(base.denom()) {
            return Err(MathError::Overflow);
        }
        // Powers of coprime integers stay coprime.
        Ok(Self(BigRational::new_raw(
            base.numer().pow(e),
            base.denom().pow(e),
        )))
    }

    /// Largest integer not greater than this value.
    pub fn floor(&self) -> BigInt {
        self.numer().div_floor(self.denom())
    }

    /// The value as an `i64` if it is a whole number in range.
    pub fn to_i64(&self) -> Option<i64> {
        if self.is_integer() {
            self.numer().to_i64()
        } else {
            None
        }
    }

    /// The value as a `u32` if it is a whole number in range.
    pub fn to_u32(&self) -> Option<u32> {
        if self.is_integer() {
            self.numer().to_u32()
        } else {
            None
        }
    }

    /// Exact `n`-th root if one exists among the rationals.
    pub fn exact_root(&self, n: u32) -> Option<Self> {
        if n == 0 {
            return None;
        }
        if self.is_negative() {
            if n % 2 == 0 {
                return None;
            }
            return Some(-&(-self).exact_root(n)?);
        }
        let num = integer_root(self.numer(), n)?;
        let den = integer_root(self.denom(), n)?;
        Some(Self(BigRational::new_raw(num, den)))
    }
}

/// Exact non-negative integer `n`-th root of `value`, if it exists.
pub(crate) fn integer_root(value: &BigInt, n: u32) -> Option<BigInt> {
    if value.is_negative() || n == 0 {
        return None;
    }
    if n == 1 || value <= &BigInt::one() {
        return Some(value.clone());
    }
    // A root of at least 2 needs value >= 2^n.
    if value.bits() <= u64::from(n) {
        return None;
    }
    let root = value.nth_root(n);
    if &root.pow(n) == value { Some(root) } else { None }
}

impl Add for &Rational {
    type Output = Rational;

    fn add(self, other: &Rational) -> Rational {
        Rational(&self.0 + &other.0)
    }
}

impl Sub for &Rational {
    type Output = Rational;

    fn sub(self, other: &Rational) -> Rational {
        Rational(&self.0 - &other.0)
    }
}

impl Mul for &Rational {
    type Output = Rational;

    fn mul(self, other: &Rational) -> Rational {
        Rational(&self.0 * &other.0)
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational(-&self.0)
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::integer(n)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numer())
        } else {
            write!(f, "{}/{}", self.numer(), self.denom())
        }
    }
}
