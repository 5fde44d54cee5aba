//! The universal density functional `F`.
//!
//! `F(n)` is the infimum of the kinetic-interaction expectation over the
//! *fiber* of a density: the set of wavefunctions `ψ` with
//! `density_of(ψ) = n`. The fiber ranges over a type with no decidable
//! enumeration, so `F` is modeled as a specification - a property any
//! correct value must satisfy - and never as a computable function.
//!
//! Convention: the infimum of an empty fiber is `+∞`, which makes `F`
//! total. This is the usual `inf ∅` convention of extended-real analysis
//! and is relied on by [`FiberInfimum::is_lower_bound`].

use num_rational::BigRational;
use serde::{Deserialize, Serialize};
use std::fmt;

use hk_core::{DensityId, Environment, StateId};

use crate::error::TheoryError;

/// A real extended with `+∞`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtendedReal {
    /// An exact rational.
    Finite(BigRational),
    /// Positive infinity; the infimum of an empty set.
    PosInfinity,
}

impl ExtendedReal {
    /// Extended-real ordering: everything is `≤ +∞`, and `+∞` exceeds
    /// every finite value.
    pub fn le(&self, other: &ExtendedReal) -> bool {
        match (self, other) {
            (ExtendedReal::Finite(a), ExtendedReal::Finite(b)) => a <= b,
            (_, ExtendedReal::PosInfinity) => true,
            (ExtendedReal::PosInfinity, ExtendedReal::Finite(_)) => false,
        }
    }
}

impl fmt::Display for ExtendedReal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtendedReal::Finite(q) => write!(f, "{q}"),
            ExtendedReal::PosInfinity => write!(f, "+inf"),
        }
    }
}

/// The specification of `F(n)`: `inf { T[ψ] : density_of(ψ) = n }`.
///
/// This object characterizes the value; it cannot produce it. Callers
/// expecting a number get [`TheoryError::NotComputable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiberInfimum {
    density: DensityId,
}

/// `F(n)`, as a specification object.
pub fn universal_functional(n: DensityId) -> FiberInfimum {
    FiberInfimum { density: n }
}

impl FiberInfimum {
    /// The density whose fiber is quantified over.
    pub fn density(&self) -> DensityId {
        self.density
    }

    /// Fiber membership: whether `ψ` is bound to this density.
    pub fn contains(&self, env: &Environment, psi: StateId) -> bool {
        env.density_bound(psi) == Some(self.density)
    }

    /// The defining lower-bound property, checked against a finite set of
    /// sampled fiber members `(ψ, T[ψ])`. Samples outside the fiber are
    /// ignored. With no fiber samples, only `+∞` qualifies - the empty
    /// infimum convention.
    pub fn is_lower_bound(
        &self,
        env: &Environment,
        samples: &[(StateId, BigRational)],
        bound: &ExtendedReal,
    ) -> bool {
        samples
            .iter()
            .filter(|(psi, _)| self.contains(env, *psi))
            .all(|(_, t)| bound.le(&ExtendedReal::Finite(t.clone())))
    }

    /// The value of the empty-fiber infimum.
    pub fn empty_fiber_value() -> ExtendedReal {
        ExtendedReal::PosInfinity
    }

    /// `F` has no closed form; this always fails.
    pub fn compute(&self) -> Result<ExtendedReal, TheoryError> {
        Err(TheoryError::NotComputable {
            what: format!("universal functional F({})", self.density),
        })
    }
}
