//! Linear expressions and constraints over real-valued atoms.

use num_rational::BigRational;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A linear expression: `c0 + c1*x1 + c2*x2 + ...` with exact rational
/// coefficients.
///
/// Atom indices are assigned by the caller. Atoms with a zero coefficient
/// are never stored, so structural equality coincides with mathematical
/// equality of linear forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearExpr {
    /// Constant term.
    pub constant: BigRational,
    /// Coefficients per atom index.
    pub coeffs: BTreeMap<usize, BigRational>,
}

impl LinearExpr {
    /// Create a constant linear expression.
    pub fn constant(c: BigRational) -> Self {
        Self {
            constant: c,
            coeffs: BTreeMap::new(),
        }
    }

    /// Create a single-atom expression with coefficient 1.
    pub fn var(idx: usize) -> Self {
        let mut coeffs = BTreeMap::new();
        coeffs.insert(idx, BigRational::one());
        Self {
            constant: BigRational::zero(),
            coeffs,
        }
    }

    /// Add two linear expressions.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.constant += &other.constant;
        for (&atom, coeff) in &other.coeffs {
            let entry = result.coeffs.entry(atom).or_insert_with(BigRational::zero);
            *entry += coeff;
            if entry.is_zero() {
                result.coeffs.remove(&atom);
            }
        }
        result
    }

    /// Subtract: `self - other`.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.scale(&-BigRational::one()))
    }

    /// Multiply by a scalar.
    #[must_use]
    pub fn scale(&self, k: &BigRational) -> Self {
        if k.is_zero() {
            return Self::constant(BigRational::zero());
        }
        let mut coeffs = BTreeMap::new();
        for (&atom, coeff) in &self.coeffs {
            coeffs.insert(atom, coeff * k);
        }
        Self {
            constant: &self.constant * k,
            coeffs,
        }
    }

    /// Check if this is a constant (no atoms).
    pub fn is_constant(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// All atom indices with a non-zero coefficient.
    pub fn atoms(&self) -> Vec<usize> {
        self.coeffs.keys().copied().collect()
    }
}

/// A linear constraint in solved form: `expr ≤ 0`, `expr < 0`, or `expr = 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinearConstraint {
    /// `expr ≤ 0`
    Le(LinearExpr),
    /// `expr < 0`
    Lt(LinearExpr),
    /// `expr = 0`
    Eq(LinearExpr),
}

impl LinearConstraint {
    /// Negate a constraint (for proof by contradiction).
    #[must_use]
    pub fn negate(&self) -> Self {
        let minus_one = -BigRational::one();
        match self {
            // ¬(e ≤ 0) ≡ e > 0 ≡ -e < 0
            LinearConstraint::Le(e) => LinearConstraint::Lt(e.scale(&minus_one)),
            // ¬(e < 0) ≡ e ≥ 0 ≡ -e ≤ 0
            LinearConstraint::Lt(e) => LinearConstraint::Le(e.scale(&minus_one)),
            // ¬(e = 0) is a disequality, which this oracle does not model;
            // callers split it into the two strict cases themselves.
            LinearConstraint::Eq(e) => LinearConstraint::Eq(e.clone()),
        }
    }

    /// The underlying linear expression.
    pub fn expr(&self) -> &LinearExpr {
        match self {
            LinearConstraint::Le(e) | LinearConstraint::Lt(e) | LinearConstraint::Eq(e) => e,
        }
    }

    /// Whether the constraint is strict.
    pub fn is_strict(&self) -> bool {
        matches!(self, LinearConstraint::Lt(_))
    }

    /// Check if the constraint is trivially satisfied (e.g. `-5 ≤ 0`).
    pub fn is_trivially_true(&self) -> bool {
        let e = self.expr();
        if !e.is_constant() {
            return false;
        }
        match self {
            LinearConstraint::Le(_) => e.constant <= BigRational::zero(),
            LinearConstraint::Lt(_) => e.constant < BigRational::zero(),
            LinearConstraint::Eq(_) => e.constant.is_zero(),
        }
    }

    /// Check if the constraint is trivially unsatisfiable (e.g. `5 ≤ 0`).
    pub fn is_trivially_false(&self) -> bool {
        let e = self.expr();
        if !e.is_constant() {
            return false;
        }
        match self {
            LinearConstraint::Le(_) => e.constant > BigRational::zero(),
            LinearConstraint::Lt(_) => e.constant >= BigRational::zero(),
            LinearConstraint::Eq(_) => !e.constant.is_zero(),
        }
    }
}
