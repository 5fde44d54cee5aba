//! The axiom registry.
//!
//! One instantiation function per axiom. Definitional axioms
//! ([`energy_def`], [`ground_energy_def`], [`integral_linearity`]) are
//! unconditional and return equalities usable as rewrite rules in either
//! direction. Rule axioms ([`rayleigh_ritz_strict`],
//! [`distinct_potentials_distinct_states`]) have preconditions, checked
//! against the established facts before anything is produced.
//!
//! `context` is the caller's list of already-established propositions
//! (derived facts in flight); preconditions are satisfied by either a
//! hypothesis in the environment or an entry there.

use hk_core::{
    AxiomId, DensityId, Environment, Fact, Justification, PotentialId, Prop, RealTerm, StateId,
};

use crate::error::TheoryError;

fn established(env: &Environment, context: &[Prop], prop: &Prop) -> bool {
    env.has_hypothesis(prop) || context.contains(prop)
}

/// `energy_def`: `E_v[ψ] = T[ψ] + ∫ v · density_of(ψ)`.
///
/// Unconditional. The returned equality is the definition of the energy
/// expectation and may be applied as a rewrite in either direction.
pub fn energy_def(env: &mut Environment, psi: StateId, v: PotentialId) -> Fact {
    let n = env.density_of(psi);
    Fact::new(
        Prop::Eq(
            RealTerm::energy(psi, v),
            RealTerm::add(RealTerm::kinetic(psi), RealTerm::integral(v, n)),
        ),
        Justification::Axiom(AxiomId::EnergyDef),
    )
}

/// `ground_energy_def`: `E₀(v) = E_v[ground_state(v)]`.
///
/// Unconditional.
pub fn ground_energy_def(env: &mut Environment, v: PotentialId) -> Fact {
    let gs = env.ground_state(v);
    Fact::new(
        Prop::Eq(RealTerm::ground_energy(v), RealTerm::energy(gs, v)),
        Justification::Axiom(AxiomId::GroundEnergyDef),
    )
}

/// `integral_linearity`: `∫ v1·n - ∫ v2·n = ∫ (v1 - v2)·n`, where
/// `v1 - v2` is the pointwise-difference potential.
///
/// Unconditional.
pub fn integral_linearity(
    env: &mut Environment,
    v1: PotentialId,
    v2: PotentialId,
    n: DensityId,
) -> Fact {
    let d = env.difference_potential(v1, v2);
    Fact::new(
        Prop::Eq(
            RealTerm::sub(RealTerm::integral(v1, n), RealTerm::integral(v2, n)),
            RealTerm::integral(d, n),
        ),
        Justification::Axiom(AxiomId::IntegralLinearity),
    )
}

/// `rayleigh_ritz_strict`: for `ψ ≠ ground_state(v)`,
/// `E_v[ψ] > E₀(v)`.
///
/// Precondition: the distinctness `ψ ≠ ground_state(v)` must be
/// established, in either orientation. With `ψ = ground_state(v)` the
/// precondition is unsatisfiable and the axiom refuses; the definitional
/// axioms give equality there, never strict inequality.
pub fn rayleigh_ritz_strict(
    env: &mut Environment,
    context: &[Prop],
    v: PotentialId,
    psi: StateId,
) -> Result<Fact, TheoryError> {
    let gs = env.ground_state(v);
    let needed = Prop::StateNe(psi, gs);
    let flipped = Prop::StateNe(gs, psi);
    if !established(env, context, &needed) && !established(env, context, &flipped) {
        return Err(TheoryError::PreconditionNotEstablished {
            axiom: AxiomId::RayleighRitzStrict,
            needed,
        });
    }
    Ok(Fact::new(
        Prop::Gt(RealTerm::energy(psi, v), RealTerm::ground_energy(v)),
        Justification::Axiom(AxiomId::RayleighRitzStrict),
    ))
}

/// `distinct_potentials_distinct_states`: potentials that do not differ by
/// a uniform additive constant have distinct ground states.
///
/// Preconditions: the non-equivalence `¬(v1 ~ v2)` must be established (in
/// either orientation), and when both potentials carry closed-form
/// profiles, the profiles must actually witness non-equivalence. Potentials
/// that merely shift the energy scale share their ground state, so the
/// axiom refuses to fire on them.
pub fn distinct_potentials_distinct_states(
    env: &mut Environment,
    context: &[Prop],
    v1: PotentialId,
    v2: PotentialId,
) -> Result<Fact, TheoryError> {
    if v1 == v2 {
        return Err(TheoryError::ShiftEquivalentPotentials { v1, v2 });
    }
    if let (Some(p1), Some(p2)) = (env.profile(v1), env.profile(v2)) {
        if p1.shift_equivalent(p2) {
            return Err(TheoryError::ShiftEquivalentPotentials { v1, v2 });
        }
    }
    let needed = Prop::NotShiftEquivalent(v1, v2);
    let flipped = Prop::NotShiftEquivalent(v2, v1);
    if !established(env, context, &needed) && !established(env, context, &flipped) {
        return Err(TheoryError::PreconditionNotEstablished {
            axiom: AxiomId::DistinctPotentialsDistinctStates,
            needed,
        });
    }
    let gs1 = env.ground_state(v1);
    let gs2 = env.ground_state(v2);
    Ok(Fact::new(
        Prop::StateNe(gs1, gs2),
        Justification::Axiom(AxiomId::DistinctPotentialsDistinctStates),
    ))
}
