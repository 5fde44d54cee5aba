//! hk-core - Domain model for the Hohenberg-Kohn derivation
//!
//! This crate provides the vocabulary shared across the workspace:
//! - Opaque symbols for wavefunctions, densities, and potentials
//! - Exact polynomial profiles for synthetic potentials
//! - The real-valued term AST (kinetic terms, integrals, energies)
//! - Propositions (equalities, strict inequalities, distinctness)
//! - Facts (propositions with provenance) and the axiom vocabulary
//! - The environment: symbol table, derived-state bindings, hypotheses
//!
//! All physical content is uninterpreted. A wavefunction is an identity
//! with decidable equality and nothing else; energies and integrals are
//! atoms of the term language, never evaluated. The only computation in
//! this crate is structural (substitution, equality) plus the exact
//! polynomial arithmetic used to decide constant-shift equivalence of
//! synthetic potential profiles.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod env;
mod error;
mod fact;
mod profile;
mod prop;
mod symbol;
mod term;

pub use env::Environment;
pub use error::CoreError;
pub use fact::{AxiomId, Fact, Justification};
pub use profile::PotentialProfile;
pub use prop::Prop;
pub use symbol::{DensityId, PotentialId, StateId, SymbolTable};
pub use term::RealTerm;

/// Result type for domain-model operations.
pub type CoreResult<T> = Result<T, CoreError>;
