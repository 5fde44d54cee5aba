//! Linearization of strict inequalities for the arithmetic oracle.
//!
//! Opaque real-valued atoms (kinetic terms, integrals, folded energies)
//! are interned to `usize` indices in first-seen order, so the engine and
//! the checker produce identical constraint systems for identical premise
//! lists.

use hashbrown::HashMap;

use hk_arith::{LinearConstraint, LinearExpr};
use hk_core::{Prop, RealTerm};

use crate::error::DeriveError;
use crate::proof::StepId;

#[derive(Default)]
struct AtomInterner {
    indices: HashMap<RealTerm, usize>,
}

impl AtomInterner {
    fn intern(&mut self, atom: &RealTerm) -> usize {
        if let Some(&idx) = self.indices.get(atom) {
            return idx;
        }
        let idx = self.indices.len();
        self.indices.insert(atom.clone(), idx);
        idx
    }
}

fn linearize(term: &RealTerm, atoms: &mut AtomInterner) -> LinearExpr {
    match term {
        RealTerm::Const(c) => LinearExpr::constant(c.clone()),
        RealTerm::Add(a, b) => linearize(a, atoms).add(&linearize(b, atoms)),
        RealTerm::Sub(a, b) => linearize(a, atoms).sub(&linearize(b, atoms)),
        atom => LinearExpr::var(atoms.intern(atom)),
    }
}

/// Translate strict inequalities `lhs > rhs` into oracle constraints
/// `rhs - lhs < 0`. Each `(id, prop)` pair must be a [`Prop::Gt`];
/// anything else is rejected.
pub(crate) fn constraints_from_strict(
    premises: &[(StepId, &Prop)],
) -> Result<Vec<LinearConstraint>, DeriveError> {
    let mut atoms = AtomInterner::default();
    let mut constraints = Vec::with_capacity(premises.len());
    for (id, prop) in premises {
        let Prop::Gt(lhs, rhs) = prop else {
            return Err(DeriveError::NotStrict {
                step: *id,
                prop: (*prop).clone(),
            });
        };
        let expr = linearize(rhs, &mut atoms).sub(&linearize(lhs, &mut atoms));
        constraints.push(LinearConstraint::Lt(expr));
    }
    Ok(constraints)
}
