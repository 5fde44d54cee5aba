//! Error types for derivation and proof checking.

use thiserror::Error;

use hk_core::{CoreError, Prop};
use hk_theory::TheoryError;

use crate::proof::StepId;

/// Derivation and checking errors.
///
/// There is no recoverable failure path: any of these aborts the whole
/// construction (or rejects the whole proof) and nothing is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeriveError {
    /// A theorem input was not assumed in the environment.
    #[error("theorem hypothesis not assumed: {0}")]
    MissingHypothesis(Prop),

    /// An axiom refused to instantiate.
    #[error(transparent)]
    Theory(#[from] TheoryError),

    /// A domain-model error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A proposition with no symmetric form was handed to `symmetrize`.
    #[error("proposition has no symmetric form: {0}")]
    CannotSymmetrize(Prop),

    /// A step that needs a strict inequality premise got something else.
    #[error("step {step} is not a strict inequality: {prop}")]
    NotStrict {
        /// The offending step.
        step: StepId,
        /// Its proposition.
        prop: Prop,
    },

    /// A step referenced a premise that does not precede it.
    #[error("step reference {0} is out of range")]
    UnknownStep(StepId),

    /// The oracle failed to close the numeric contradiction.
    #[error("linear-arithmetic oracle did not close the contradiction")]
    ContradictionNotClosed,

    /// Replay of a proof step did not reproduce its recorded conclusion.
    #[error("step {step} does not replay: {reason}")]
    StepMismatch {
        /// The step that failed to replay.
        step: StepId,
        /// What went wrong.
        reason: String,
    },

    /// A recorded Farkas certificate does not validate against the
    /// premises it claims to refute.
    #[error("step {0} carries an invalid Farkas certificate")]
    InvalidCertificate(StepId),
}
