//! Closed-form potential profiles.
//!
//! A profile is an exact polynomial over the rationals. Profiles exist for
//! one purpose: deciding whether two synthetic potentials differ by a
//! uniform additive constant. The derivation engine never evaluates them.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

/// A potential given in closed form as a polynomial `c0 + c1 x + c2 x² + ...`
/// with exact rational coefficients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotentialProfile {
    /// `coeffs[k]` multiplies `x^k`. Trailing zeros are trimmed, so equal
    /// polynomials have equal coefficient vectors.
    coeffs: Vec<BigRational>,
}

impl PotentialProfile {
    /// Build a profile from rational coefficients, lowest degree first.
    pub fn new(mut coeffs: Vec<BigRational>) -> Self {
        while coeffs.last().is_some_and(Zero::is_zero) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    /// Build a profile from integer coefficients, lowest degree first.
    /// `&[0, 0, 1]` is `x²`; `&[1, 0, 2]` is `2x² + 1`.
    pub fn from_integer_coeffs(coeffs: &[i64]) -> Self {
        Self::new(
            coeffs
                .iter()
                .map(|&c| BigRational::from_integer(BigInt::from(c)))
                .collect(),
        )
    }

    /// The constant profile `c`.
    pub fn constant(c: BigRational) -> Self {
        Self::new(vec![c])
    }

    /// Evaluate at a rational point (Horner).
    pub fn eval(&self, x: &BigRational) -> BigRational {
        let mut acc = BigRational::zero();
        for c in self.coeffs.iter().rev() {
            acc = acc * x + c;
        }
        acc
    }

    /// The pointwise difference `self - other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        let mut coeffs = Vec::with_capacity(len);
        for k in 0..len {
            let a = self.coeffs.get(k).cloned().unwrap_or_else(BigRational::zero);
            let b = other
                .coeffs
                .get(k)
                .cloned()
                .unwrap_or_else(BigRational::zero);
            coeffs.push(a - b);
        }
        Self::new(coeffs)
    }

    /// Whether the profile is a constant function.
    pub fn is_constant(&self) -> bool {
        self.coeffs.len() <= 1
    }

    /// Exact decision of constant-shift equivalence: two profiles differ by
    /// a uniform constant iff their difference is a constant polynomial.
    pub fn shift_equivalent(&self, other: &Self) -> bool {
        self.difference(other).is_constant()
    }
}
