//! Real-valued terms.
//!
//! The term language the derivation manipulates. Every physical quantity
//! is an uninterpreted atom: kinetic expectations, potential-density
//! integrals, energies. The only structure is rational constants and
//! addition/subtraction, which is exactly what the linear-arithmetic
//! oracle understands.

use num_rational::BigRational;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::symbol::{DensityId, PotentialId, StateId};

/// A real-valued term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RealTerm {
    /// Kinetic plus interaction expectation `T[ψ]` of a wavefunction.
    Kinetic(StateId),
    /// The potential-density integral `∫ v·n`.
    Integral(PotentialId, DensityId),
    /// Energy expectation `E_v[ψ]`. Unfolds via the `energy_def` axiom.
    Energy(StateId, PotentialId),
    /// Ground energy `E₀(v)`. Unfolds via the `ground_energy_def` axiom.
    GroundEnergy(PotentialId),
    /// An exact rational constant.
    Const(BigRational),
    /// Sum of two terms.
    Add(Arc<RealTerm>, Arc<RealTerm>),
    /// Difference of two terms.
    Sub(Arc<RealTerm>, Arc<RealTerm>),
}

impl RealTerm {
    /// `T[ψ]`
    pub fn kinetic(psi: StateId) -> Self {
        RealTerm::Kinetic(psi)
    }

    /// `∫ v·n`
    pub fn integral(v: PotentialId, n: DensityId) -> Self {
        RealTerm::Integral(v, n)
    }

    /// `E_v[ψ]`
    pub fn energy(psi: StateId, v: PotentialId) -> Self {
        RealTerm::Energy(psi, v)
    }

    /// `E₀(v)`
    pub fn ground_energy(v: PotentialId) -> Self {
        RealTerm::GroundEnergy(v)
    }

    /// A rational constant.
    pub fn constant(c: BigRational) -> Self {
        RealTerm::Const(c)
    }

    /// `a + b`
    pub fn add(a: RealTerm, b: RealTerm) -> Self {
        RealTerm::Add(Arc::new(a), Arc::new(b))
    }

    /// `a - b`
    pub fn sub(a: RealTerm, b: RealTerm) -> Self {
        RealTerm::Sub(Arc::new(a), Arc::new(b))
    }

    /// Replace every occurrence of `from` (by structural equality) with
    /// `to`. Idempotent whenever `to` does not itself contain `from`.
    #[must_use]
    pub fn replace(&self, from: &RealTerm, to: &RealTerm) -> RealTerm {
        if self == from {
            return to.clone();
        }
        match self {
            RealTerm::Add(a, b) => {
                RealTerm::add(a.replace(from, to), b.replace(from, to))
            }
            RealTerm::Sub(a, b) => {
                RealTerm::sub(a.replace(from, to), b.replace(from, to))
            }
            _ => self.clone(),
        }
    }

    /// Rewrite every integral over density `from` into one over `to`.
    #[must_use]
    pub fn substitute_density(&self, from: DensityId, to: DensityId) -> RealTerm {
        match self {
            RealTerm::Integral(v, n) if *n == from => RealTerm::Integral(*v, to),
            RealTerm::Add(a, b) => RealTerm::add(
                a.substitute_density(from, to),
                b.substitute_density(from, to),
            ),
            RealTerm::Sub(a, b) => RealTerm::sub(
                a.substitute_density(from, to),
                b.substitute_density(from, to),
            ),
            _ => self.clone(),
        }
    }

    /// Whether `needle` occurs anywhere in this term.
    pub fn contains(&self, needle: &RealTerm) -> bool {
        if self == needle {
            return true;
        }
        match self {
            RealTerm::Add(a, b) | RealTerm::Sub(a, b) => {
                a.contains(needle) || b.contains(needle)
            }
            _ => false,
        }
    }

    /// Collect the opaque atoms (everything except constants and sums) in
    /// left-to-right order, with duplicates.
    pub fn atoms(&self) -> Vec<RealTerm> {
        let mut out = Vec::new();
        self.collect_atoms(&mut out);
        out
    }

    fn collect_atoms(&self, out: &mut Vec<RealTerm>) {
        match self {
            RealTerm::Const(_) => {}
            RealTerm::Add(a, b) | RealTerm::Sub(a, b) => {
                a.collect_atoms(out);
                b.collect_atoms(out);
            }
            _ => out.push(self.clone()),
        }
    }
}

impl fmt::Display for RealTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RealTerm::Kinetic(psi) => write!(f, "(T {psi})"),
            RealTerm::Integral(v, n) => write!(f, "(int {v} {n})"),
            RealTerm::Energy(psi, v) => write!(f, "(E {psi} {v})"),
            RealTerm::GroundEnergy(v) => write!(f, "(E0 {v})"),
            RealTerm::Const(c) => write!(f, "{c}"),
            RealTerm::Add(a, b) => write!(f, "(+ {a} {b})"),
            RealTerm::Sub(a, b) => write!(f, "(- {a} {b})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_is_structural() {
        let psi = StateId(0);
        let v = PotentialId(0);
        let n = DensityId(0);
        let e = RealTerm::energy(psi, v);
        let expanded = RealTerm::add(RealTerm::kinetic(psi), RealTerm::integral(v, n));

        let sum = RealTerm::add(e.clone(), RealTerm::ground_energy(v));
        let rewritten = sum.replace(&e, &expanded);
        assert_eq!(
            rewritten,
            RealTerm::add(expanded.clone(), RealTerm::ground_energy(v))
        );
        // Re-applying the rewrite changes nothing: the expansion does not
        // contain the folded form.
        assert_eq!(rewritten.replace(&e, &expanded), rewritten);
    }

    #[test]
    fn density_substitution_is_idempotent() {
        let v1 = PotentialId(0);
        let v2 = PotentialId(1);
        let n1 = DensityId(0);
        let n2 = DensityId(1);
        let term = RealTerm::add(
            RealTerm::integral(v1, n2),
            RealTerm::sub(RealTerm::integral(v2, n2), RealTerm::kinetic(StateId(0))),
        );

        let once = term.substitute_density(n2, n1);
        let twice = once.substitute_density(n2, n1);
        assert_eq!(once, twice);
        assert!(!once.contains(&RealTerm::integral(v1, n2)));
        assert!(once.contains(&RealTerm::integral(v1, n1)));
    }

    #[test]
    fn atoms_skip_constants() {
        use num_bigint::BigInt;
        let term = RealTerm::add(
            RealTerm::kinetic(StateId(1)),
            RealTerm::constant(BigRational::from_integer(BigInt::from(3))),
        );
        assert_eq!(term.atoms(), vec![RealTerm::kinetic(StateId(1))]);
    }

    #[test]
    fn display_prefix_form() {
        let t = RealTerm::add(
            RealTerm::kinetic(StateId(0)),
            RealTerm::integral(PotentialId(1), DensityId(2)),
        );
        assert_eq!(t.to_string(), "(+ (T psi0) (int v1 n2))");
    }
}
