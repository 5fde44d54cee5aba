//! hk-arith - Trusted linear real-arithmetic oracle
//!
//! This crate packages the ambient real-number reasoning that the derivation
//! layer relies on: linear expressions over opaque real-valued atoms, linear
//! equality/inequality constraints, and a certified refutation procedure.
//!
//! The oracle answers one question: does a conjunction of linear constraints
//! over the reals entail a numeric contradiction? When it does, the answer
//! comes with a [`FarkasCertificate`] - non-negative multipliers whose
//! combination of the inputs collapses to a constant contradiction - which
//! callers can revalidate independently of the search that found it.
//!
//! Atoms are opaque `usize` indices; assigning meaning to them (kinetic
//! terms, integrals, ...) is the caller's concern.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod linear;
mod refute;

pub use linear::{LinearConstraint, LinearExpr};
pub use refute::{refute, FarkasCertificate, Refutation};
