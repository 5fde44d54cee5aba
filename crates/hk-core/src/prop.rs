//! Propositions.
//!
//! The logical layer above [`RealTerm`]: what the axioms state and what the
//! derivation engine manipulates.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::symbol::{DensityId, PotentialId, StateId};
use crate::term::RealTerm;

/// A proposition over the domain model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prop {
    /// Equality of two real-valued terms.
    Eq(RealTerm, RealTerm),
    /// Strict inequality `lhs > rhs` of two real-valued terms.
    Gt(RealTerm, RealTerm),
    /// Distinctness of two wavefunctions.
    StateNe(StateId, StateId),
    /// Equality of two densities.
    DensityEq(DensityId, DensityId),
    /// The two potentials do not differ by a uniform additive constant.
    NotShiftEquivalent(PotentialId, PotentialId),
    /// Falsehood; the conclusion of the contradiction chain.
    False,
}

impl Prop {
    /// The symmetric form of a symmetric proposition, `None` for
    /// propositions with no symmetry (`Gt`, `False`).
    pub fn symmetrized(&self) -> Option<Prop> {
        match self {
            Prop::Eq(a, b) => Some(Prop::Eq(b.clone(), a.clone())),
            Prop::StateNe(a, b) => Some(Prop::StateNe(*b, *a)),
            Prop::DensityEq(a, b) => Some(Prop::DensityEq(*b, *a)),
            Prop::NotShiftEquivalent(a, b) => Some(Prop::NotShiftEquivalent(*b, *a)),
            Prop::Gt(_, _) | Prop::False => None,
        }
    }

    /// Replace a term by structural equality on both sides of a term
    /// proposition. Leaves symbol-level propositions untouched.
    #[must_use]
    pub fn replace_term(&self, from: &RealTerm, to: &RealTerm) -> Prop {
        match self {
            Prop::Eq(a, b) => Prop::Eq(a.replace(from, to), b.replace(from, to)),
            Prop::Gt(a, b) => Prop::Gt(a.replace(from, to), b.replace(from, to)),
            _ => self.clone(),
        }
    }

    /// Rewrite integrals over density `from` into integrals over `to` on
    /// both sides of a term proposition.
    #[must_use]
    pub fn substitute_density(&self, from: DensityId, to: DensityId) -> Prop {
        match self {
            Prop::Eq(a, b) => Prop::Eq(
                a.substitute_density(from, to),
                b.substitute_density(from, to),
            ),
            Prop::Gt(a, b) => Prop::Gt(
                a.substitute_density(from, to),
                b.substitute_density(from, to),
            ),
            _ => self.clone(),
        }
    }
}

impl fmt::Display for Prop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prop::Eq(a, b) => write!(f, "(= {a} {b})"),
            Prop::Gt(a, b) => write!(f, "(> {a} {b})"),
            Prop::StateNe(a, b) => write!(f, "(distinct {a} {b})"),
            Prop::DensityEq(a, b) => write!(f, "(= {a} {b})"),
            Prop::NotShiftEquivalent(a, b) => write!(f, "(not (shift-equiv {a} {b}))"),
            Prop::False => write!(f, "false"),
        }
    }
}
