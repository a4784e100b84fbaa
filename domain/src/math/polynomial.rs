//! Sparse multivariate polynomials with exact rational coefficients.
//!
//! Exponents are rationals so that `sqrt(x)` and `x**(-1)` live in the same
//! representation as `x**2`. Numeric radicals such as `sqrt(2)` are atoms
//! whose exponent is kept in `(0, 1)`; whole powers fold into the coefficient.

use super::error::MathError;
use super::rational::{MAX_BITS, Rational};
use num_bigint::BigInt;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Upper bound on terms in any intermediate polynomial.
pub const MAX_TERMS: usize = 4096;

/// Upper bound on reduction steps in polynomial division.
const MAX_DIVISION_STEPS: usize = 10_000;

/// An indivisible factor of a monomial.
///
/// Variant order matters: it is the order factors are printed in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Atom {
    /// Integer base `>= 2` of a numeric radical, e.g. the `2` in `sqrt(2)`.
    Radical(BigInt),
    Symbol(String),
    /// A power that does not simplify further, kept as rendered text.
    Power { base: String, exponent: String },
}

/// A product of atoms raised to non-zero rational exponents.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Monomial(BTreeMap<Atom, Rational>);

impl Monomial {
    pub fn one() -> Self {
        Self::default()
    }

    pub fn atom(atom: Atom, exponent: Rational) -> Self {
        let mut factors = BTreeMap::new();
        if !exponent.is_zero() {
            factors.insert(atom, exponent);
        }
        Self(factors)
    }

    pub fn is_one(&self) -> bool {
        self.0.is_empty()
    }

    pub fn factors(&self) -> impl Iterator<Item = (&Atom, &Rational)> {
        self.0.iter()
    }

    pub fn exponent(&self, atom: &Atom) -> Rational {
        self.0.get(atom).cloned().unwrap_or_else(Rational::zero)
    }

    pub fn has_radicals(&self) -> bool {
        self.0.keys().any(|a| matches!(a, Atom::Radical(_)))
    }

    /// Total degree, ignoring numeric radicals.
    pub fn degree(&self) -> Rational {
        self.0
            .iter()
            .filter(|(atom, _)| !matches!(atom, Atom::Radical(_)))
            .fold(Rational::zero(), |acc, (_, e)| &acc + e)
    }

    /// Product of two monomials, normalized.
    ///
    /// Returns the numeric factor split off by radical normalization
    /// (`sqrt(2) * sqrt(2)` gives `(2, 1)`).
    pub fn mul(&self, other: &Self) -> Result<(Rational, Monomial), MathError> {
        let mut factors = self.0.clone();
        for (atom, exponent) in &other.0 {
            let combined = &self.exponent(atom) + exponent;
            if combined.is_zero() {
                factors.remove(atom);
            } else {
                factors.insert(atom.clone(), combined);
            }
        }
        Monomial(factors).normalize()
    }

    /// Every exponent multiplied by `k`, normalized.
    pub fn pow(&self, k: &Rational) -> Result<(Rational, Monomial), MathError> {
        if k.is_zero() {
            return Ok((Rational::one(), Monomial::one()));
        }
        let factors = self
            .0
            .iter()
            .map(|(atom, exponent)| (atom.clone(), exponent * k))
            .collect();
        Monomial(factors).normalize()
    }

    /// Move whole powers of numeric radicals into a coefficient.
    pub fn normalize(self) -> Result<(Rational, Monomial), MathError> {
        let mut coefficient = Rational::one();
        let mut factors = BTreeMap::new();
        for (atom, exponent) in self.0 {
            if let Atom::Radical(n) = &atom {
                let whole = Rational::integer(exponent.floor());
                let fraction = &exponent - &whole;
                let whole = whole
                    .to_i64()
                    .ok_or_else(|| MathError::ExponentTooLarge(exponent.to_string()))?;
                coefficient = &coefficient * &Rational::integer(n.clone()).pow(whole)?;
                if !fraction.is_zero() {
                    factors.insert(atom, fraction);
                }
            } else if !exponent.is_zero() {
                factors.insert(atom, exponent);
            }
        }
        Ok((coefficient, Monomial(factors)))
    }

    /// `self / divisor` when every exponent of `divisor` is covered by `self`.
    pub fn checked_div(&self, divisor: &Self) -> Option<Monomial> {
        let mut factors = self.0.clone();
        for (atom, exponent) in &divisor.0 {
            let have = self.exponent(atom);
            if &have < exponent {
                return None;
            }
            let left = &have - exponent;
            if left.is_zero() {
                factors.remove(atom);
            } else {
                factors.insert(atom.clone(), left);
            }
        }
        Some(Monomial(factors))
    }

    /// Graded order: higher degree first, then lexicographic on atoms.
    fn graded_cmp(&self, self_degree: &Rational, other: &Self, other_degree: &Rational) -> Ordering {
        self_degree.cmp(other_degree).then_with(|| {
            let atoms: BTreeSet<&Atom> = self.0.keys().chain(other.0.keys()).collect();
            atoms
                .into_iter()
                .map(|a| self.exponent(a).cmp(&other.exponent(a)))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        })
    }
}

/// Sum of monomials with non-zero rational coefficients.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Polynomial {
    terms: BTreeMap<Monomial, Rational>,
}

/// Reject coefficients that have grown past [`MAX_BITS`].
fn bounded(coefficient: Rational) -> Result<Rational, MathError> {
    if coefficient.bits() > MAX_BITS {
        Err(MathError::Overflow)
    } else {
        Ok(coefficient)
    }
}

impl Polynomial {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn constant(value: Rational) -> Self {
        Self::term(value, Monomial::one())
    }

    pub fn term(coefficient: Rational, monomial: Monomial) -> Self {
        let mut terms = BTreeMap::new();
        if !coefficient.is_zero() {
            terms.insert(monomial, coefficient);
        }
        Self { terms }
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> impl Iterator<Item = (&Monomial, &Rational)> {
        self.terms.iter()
    }

    /// The value if this polynomial has no atoms at all.
    pub fn as_constant(&self) -> Option<Rational> {
        match self.terms.len() {
            0 => Some(Rational::zero()),
            1 => self
                .terms
                .iter()
                .next()
                .filter(|(m, _)| m.is_one())
                .map(|(_, c)| c.clone()),
            _ => None,
        }
    }

    /// The only term, if there is exactly one.
    pub fn single_term(&self) -> Option<(&Monomial, &Rational)> {
        if self.terms.len() == 1 {
            self.terms.iter().next()
        } else {
            None
        }
    }

    pub fn has_radicals(&self) -> bool {
        self.terms.keys().any(Monomial::has_radicals)
    }

    fn add_term(&mut self, coefficient: Rational, monomial: Monomial) -> Result<(), MathError> {
        if coefficient.is_zero() {
            return Ok(());
        }
        let sum = match self.terms.get(&monomial) {
            Some(existing) => existing + &coefficient,
            None => coefficient,
        };
        if sum.is_zero() {
            self.terms.remove(&monomial);
        } else {
            self.terms.insert(monomial, bounded(sum)?);
        }
        if self.terms.len() > MAX_TERMS {
            return Err(MathError::ExpressionTooLarge);
        }
        Ok(())
    }

    pub fn add(&self, other: &Self) -> Result<Self, MathError> {
        let mut result = self.clone();
        for (monomial, coefficient) in &other.terms {
            result.add_term(coefficient.clone(), monomial.clone())?;
        }
        Ok(result)
    }

    pub fn neg(&self) -> Self {
        let terms = self
            .terms
            .iter()
            .map(|(monomial, coefficient)| (monomial.clone(), -coefficient))
            .collect();
        Self { terms }
    }

    pub fn sub(&self, other: &Self) -> Result<Self, MathError> {
        self.add(&other.neg())
    }

    pub fn scale(&self, factor: &Rational) -> Result<Self, MathError> {
        if factor.is_zero() {
            return Ok(Self::zero());
        }
        let mut terms = BTreeMap::new();
        for (monomial, coefficient) in &self.terms {
            terms.insert(monomial.clone(), bounded(coefficient * factor)?);
        }
        Ok(Self { terms })
    }

    pub fn mul_term(&self, coefficient: &Rational, monomial: &Monomial) -> Result<Self, MathError> {
        let mut result = Self::zero();
        for (m, c) in &self.terms {
            let (extra, product) = m.mul(monomial)?;
            result.add_term(&(c * coefficient) * &extra, product)?;
        }
        Ok(result)
    }

    pub fn mul(&self, other: &Self) -> Result<Self, MathError> {
        let mut result = Self::zero();
        for (m, c) in &other.terms {
            result = result.add(&self.mul_term(c, m)?)?;
        }
        Ok(result)
    }

    pub fn pow(&self, n: u32) -> Result<Self, MathError> {
        if let Some((monomial, coefficient)) = self.single_term() {
            let (extra, power) = monomial.pow(&Rational::integer(n))?;
            let coefficient = &coefficient.pow(i64::from(n))? * &extra;
            return Ok(Self::term(bounded(coefficient)?, power));
        }
        let mut result = Self::constant(Rational::one());
        for _ in 0..n {
            result = result.mul(self)?;
        }
        Ok(result)
    }

    /// Terms in display order: descending graded order.
    pub fn sorted_terms(&self) -> Vec<(&Monomial, &Rational)> {
        let mut keyed: Vec<_> = self
            .terms
            .iter()
            .map(|(m, c)| (m, c, m.degree()))
            .collect();
        keyed.sort_by(|(ma, _, da), (mb, _, db)| mb.graded_cmp(db, ma, da));
        keyed.into_iter().map(|(m, c, _)| (m, c)).collect()
    }

    pub fn leading_term(&self) -> Option<(Monomial, Rational)> {
        self.sorted_terms()
            .first()
            .map(|(m, c)| ((*m).clone(), (*c).clone()))
    }

    /// Multivariate division by a single divisor: `(quotient, remainder)`.
    ///
    /// Returns `None` when either side carries numeric radicals, whose
    /// normalization does not respect the monomial order.
    pub fn div_rem(&self, divisor: &Self) -> Result<Option<(Self, Self)>, MathError> {
        if self.has_radicals() || divisor.has_radicals() {
            return Ok(None);
        }
        let Some((lead_m, lead_c)) = divisor.leading_term() else {
            return Err(MathError::DivisionByZero);
        };

        let mut quotient = Self::zero();
        let mut remainder = Self::zero();
        let mut rest = self.clone();
        let mut steps = 0;

        while let Some((m, c)) = rest.leading_term() {
            steps += 1;
            if steps > MAX_DIVISION_STEPS {
                return Err(MathError::ExpressionTooLarge);
            }
            match m.checked_div(&lead_m) {
                Some(factor) => {
                    let coefficient = c.checked_div(&lead_c)?;
                    rest = rest.sub(&divisor.mul_term(&coefficient, &factor)?)?;
                    quotient.add_term(coefficient, factor)?;
                }
                None => {
                    rest.terms.remove(&m);
                    remainder.add_term(c, m)?;
                }
            }
        }
        Ok(Some((quotient, remainder)))
    }

    /// `self / divisor` if the division leaves no remainder.
    pub fn exact_div(&self, divisor: &Self) -> Result<Option<Self>, MathError> {
        Ok(self
            .div_rem(divisor)?
            .filter(|(_, r)| r.is_zero())
            .map(|(q, _)| q))
    }

    /// The single symbol this polynomial uses with whole non-negative exponents.
    pub fn univariate_symbol(&self) -> Option<&Atom> {
        let mut found: Option<&Atom> = None;
        for monomial in self.terms.keys() {
            for (atom, exponent) in monomial.factors() {
                if !matches!(atom, Atom::Symbol(_)) || !exponent.is_integer() || exponent.is_negative() {
                    return None;
                }
                match found {
                    Some(existing) if existing != atom => return None,
                    _ => found = Some(atom),
                }
            }
        }
        found
    }

    /// Smallest exponent of `atom` over all terms (zero when absent).
    pub fn min_exponent(&self, atom: &Atom) -> Rational {
        self.terms
            .keys()
            .map(|m| m.exponent(atom))
            .min()
            .unwrap_or_else(Rational::zero)
    }

    pub fn atoms(&self) -> BTreeSet<Atom> {
        self.terms
            .keys()
            .flat_map(|m| m.factors().map(|(a, _)| a.clone()))
            .collect()
    }

    /// Same polynomial with the leading coefficient scaled to one.
    pub fn monic(&self) -> Result<Self, MathError> {
        match self.leading_term() {
            Some((_, c)) => self.scale(&c.recip()?),
            None => Ok(Self::zero()),
        }
    }
}
