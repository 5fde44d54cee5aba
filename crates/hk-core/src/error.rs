//! Error types for the domain model.

use thiserror::Error;

use crate::symbol::{PotentialId, StateId};

/// Domain-model errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A symbol with this name already exists in its kind.
    #[error("duplicate symbol name: {0}")]
    DuplicateSymbol(String),

    /// A reflexive wavefunction-distinctness hypothesis was asserted.
    #[error("cannot assume {0} distinct from itself")]
    ReflexiveDistinctness(StateId),

    /// Both potentials carry profiles witnessing constant-shift
    /// equivalence, contradicting the asserted hypothesis.
    #[error("potentials {v1} and {v2} provably differ by a constant; refusing the non-equivalence hypothesis")]
    ProfilesShiftEquivalent {
        /// First potential.
        v1: PotentialId,
        /// Second potential.
        v2: PotentialId,
    },
}
