//! Error types for axiom instantiation and the universal functional.

use thiserror::Error;

use hk_core::{AxiomId, CoreError, PotentialId, Prop};

/// Theory-layer errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TheoryError {
    /// An axiom was invoked without its precondition among the established
    /// facts. Rejected at construction time; nothing is produced.
    #[error("axiom {axiom} requires {needed}, which is not established")]
    PreconditionNotEstablished {
        /// The axiom that refused to fire.
        axiom: AxiomId,
        /// The missing precondition.
        needed: Prop,
    },

    /// `distinct_potentials_distinct_states` was invoked on potentials
    /// that are constant-shift equivalent (identical, or with profiles
    /// witnessing the shift).
    #[error("potentials {v1} and {v2} differ by a constant; distinct ground states are not implied")]
    ShiftEquivalentPotentials {
        /// First potential.
        v1: PotentialId,
        /// Second potential.
        v2: PotentialId,
    },

    /// A caller asked for a computed value of a quantity that is only
    /// specified, never computable (the universal functional).
    #[error("{what} is a specification, not a computable value")]
    NotComputable {
        /// What was asked for.
        what: String,
    },

    /// A domain-model error.
    #[error(transparent)]
    Core(#[from] CoreError),
}
