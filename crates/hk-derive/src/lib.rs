//! hk-derive - The derivation engine
//!
//! Combines the trusted axiom registry with the linear-arithmetic oracle
//! to derive the Hohenberg-Kohn uniqueness theorem: two potentials that do
//! not differ by a uniform additive constant cannot share the same
//! ground-state density.
//!
//! The derivation is a strictly linear chain of inference states:
//!
//! ```text
//! Hypotheses -> DistinctStates -> StrictInequalities -> ExpandedForm
//!            -> SubstitutedForm -> NumericContradiction -> False
//! ```
//!
//! Every step is recorded in a [`Proof`], and [`check`] replays a finished
//! proof against the environment without trusting the builder. Failure is
//! binary and total: either the whole chain composes into a proof of
//! `False`, or construction fails and nothing is produced.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod check;
mod engine;
mod error;
mod linearize;
mod proof;

pub use check::check;
pub use engine::{
    hohenberg_kohn_contradiction, hohenberg_kohn_uniqueness, Derivation, Theorem,
    UniquenessWitness,
};
pub use error::DeriveError;
pub use proof::{Proof, ProofStep, StepId};

/// Result type for derivation operations.
pub type DeriveResult<T> = Result<T, DeriveError>;
