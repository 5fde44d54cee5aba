//! Facts: propositions with provenance.
//!
//! Every proposition in flight during a derivation carries the reason it is
//! believed. Hypotheses and axiom instances are *trusted*; everything else
//! must name the operation that produced it, so a checker can replay the
//! derivation without trusting its builder.

use hk_arith::FarkasCertificate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::prop::Prop;

/// The fixed axiom vocabulary - the entire trust boundary of the theory.
///
/// These five facts are assumed, never derived. Anything not in this list
/// must be justified by an explicit inference step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxiomId {
    /// `E_v[ψ] = T[ψ] + ∫ v · density_of(ψ)` - a bidirectional rewrite.
    EnergyDef,
    /// `E₀(v) = E_v[ground_state(v)]`.
    GroundEnergyDef,
    /// `∫ v1·n - ∫ v2·n = ∫ (v1 - v2)·n`.
    IntegralLinearity,
    /// For `ψ ≠ ground_state(v)`: `E_v[ψ] > E₀(v)` (strict variational
    /// principle).
    RayleighRitzStrict,
    /// Potentials not differing by a uniform constant have distinct ground
    /// states.
    DistinctPotentialsDistinctStates,
}

impl fmt::Display for AxiomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AxiomId::EnergyDef => "energy_def",
            AxiomId::GroundEnergyDef => "ground_energy_def",
            AxiomId::IntegralLinearity => "integral_linearity",
            AxiomId::RayleighRitzStrict => "rayleigh_ritz_strict",
            AxiomId::DistinctPotentialsDistinctStates => "distinct_potentials_distinct_states",
        };
        write!(f, "{name}")
    }
}

/// Why a fact is believed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Justification {
    /// Assumed as a theorem input.
    Hypothesis,
    /// Instantiated from a trusted axiom schema.
    Axiom(AxiomId),
    /// Symmetry of an earlier fact.
    Symmetry,
    /// Equality substitution into an earlier fact.
    Substitution,
    /// Closed by the linear-arithmetic oracle, with its certificate.
    Linarith(FarkasCertificate),
}

/// A proposition together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    /// The proposition.
    pub prop: Prop,
    /// Why it is believed.
    pub justification: Justification,
}

impl Fact {
    /// Create a fact.
    pub fn new(prop: Prop, justification: Justification) -> Self {
        Self {
            prop,
            justification,
        }
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prop)
    }
}
