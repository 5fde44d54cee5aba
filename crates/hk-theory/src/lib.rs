//! hk-theory - The trusted theory of ground-state energetics
//!
//! Two things live here, both *trusted* rather than derived:
//!
//! - The axiom registry: one instantiation function per axiom in
//!   [`hk_core::AxiomId`]. Each function checks its preconditions against
//!   the established facts at construction time and returns a
//!   [`hk_core::Fact`] carrying axiom provenance. The registry never
//!   derives anything; it only instantiates schemas. This module is the
//!   entire trust boundary of the workspace - everything downstream is
//!   checked.
//!
//! - The universal density functional `F`, exposed as an infimum
//!   *specification* over the fiber of wavefunctions mapping to a density.
//!   `F` has no closed form and is deliberately not computable here; it
//!   exists as the witness that the theory supports a density-only energy
//!   functional.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod axioms;
mod error;
mod functional;

pub use axioms::{
    distinct_potentials_distinct_states, energy_def, ground_energy_def, integral_linearity,
    rayleigh_ritz_strict,
};
pub use error::TheoryError;
pub use functional::{universal_functional, ExtendedReal, FiberInfimum};

/// Result type for theory operations.
pub type TheoryResult<T> = Result<T, TheoryError>;
