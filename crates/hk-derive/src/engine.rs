//! The derivation engine.
//!
//! [`Derivation`] accumulates facts and proof steps over a mutable
//! environment; [`hohenberg_kohn_contradiction`] runs the eight-step
//! uniqueness chain and [`hohenberg_kohn_uniqueness`] wraps it into the
//! contrapositive theorem.

use tracing::{debug, info};

use hk_arith::{refute, Refutation};
use hk_core::{
    AxiomId, CoreError, DensityId, Environment, Fact, Justification, PotentialId, Prop, StateId,
};
use hk_theory::{
    distinct_potentials_distinct_states, energy_def, ground_energy_def, integral_linearity,
    rayleigh_ritz_strict,
};

use crate::error::DeriveError;
use crate::linearize::constraints_from_strict;
use crate::proof::{Proof, ProofStep, StepId};

/// An in-progress derivation.
///
/// Facts and proof steps grow in lockstep: the fact at index `i` is the
/// conclusion of step `t_i`. Every method checks its preconditions before
/// recording anything; a failed step aborts the whole construction.
pub struct Derivation<'e> {
    env: &'e mut Environment,
    facts: Vec<Fact>,
    proof: Proof,
}

impl<'e> Derivation<'e> {
    /// Start a derivation over an environment.
    pub fn new(env: &'e mut Environment) -> Self {
        Self {
            env,
            facts: Vec::new(),
            proof: Proof::new(),
        }
    }

    /// The environment being derived over.
    pub fn env(&mut self) -> &mut Environment {
        self.env
    }

    /// The fact concluded by a step.
    pub fn fact(&self, id: StepId) -> Option<&Fact> {
        self.facts.get(id.0 as usize)
    }

    /// Consume the derivation, returning its proof.
    pub fn into_proof(self) -> Proof {
        self.proof
    }

    fn record(&mut self, fact: Fact, step: ProofStep) -> StepId {
        let rule = step.rule_name();
        let id = self.proof.push(step);
        debug!("step {id} [{rule}]: {}", fact.prop);
        self.facts.push(fact);
        id
    }

    fn established(&self) -> Vec<Prop> {
        self.facts.iter().map(|f| f.prop.clone()).collect()
    }

    fn find_step(&self, prop: &Prop) -> Option<StepId> {
        self.facts
            .iter()
            .position(|f| &f.prop == prop)
            .map(|idx| StepId(idx as u32))
    }

    fn prop_of(&self, id: StepId) -> Result<Prop, DeriveError> {
        self.fact(id)
            .map(|f| f.prop.clone())
            .ok_or(DeriveError::UnknownStep(id))
    }

    /// Bring a hypothesis from the environment into the derivation.
    pub fn use_hypothesis(&mut self, prop: Prop) -> Result<StepId, DeriveError> {
        if !self.env.has_hypothesis(&prop) {
            return Err(DeriveError::MissingHypothesis(prop));
        }
        let fact = Fact::new(prop.clone(), Justification::Hypothesis);
        Ok(self.record(fact, ProofStep::Assume { prop }))
    }

    /// Instantiate `distinct_potentials_distinct_states`, citing the
    /// non-equivalence premise.
    pub fn distinct_ground_states(
        &mut self,
        v1: PotentialId,
        v2: PotentialId,
    ) -> Result<StepId, DeriveError> {
        let context = self.established();
        let fact = distinct_potentials_distinct_states(self.env, &context, v1, v2)?;
        let premises = self
            .find_step(&Prop::NotShiftEquivalent(v1, v2))
            .or_else(|| self.find_step(&Prop::NotShiftEquivalent(v2, v1)))
            .into_iter()
            .collect();
        let concluded = fact.prop.clone();
        Ok(self.record(
            fact,
            ProofStep::Instantiate {
                axiom: AxiomId::DistinctPotentialsDistinctStates,
                premises,
                concluded,
            },
        ))
    }

    /// The symmetric form of an earlier step.
    pub fn symmetrize(&mut self, from: StepId) -> Result<StepId, DeriveError> {
        let prop = self.prop_of(from)?;
        let flipped = prop
            .symmetrized()
            .ok_or_else(|| DeriveError::CannotSymmetrize(prop.clone()))?;
        let fact = Fact::new(flipped.clone(), Justification::Symmetry);
        Ok(self.record(
            fact,
            ProofStep::Symmetrize {
                from,
                concluded: flipped,
            },
        ))
    }

    /// Instantiate the strict variational principle for `ψ` against the
    /// ground state of `v`, citing the distinctness premise.
    pub fn rayleigh_ritz(&mut self, v: PotentialId, psi: StateId) -> Result<StepId, DeriveError> {
        let context = self.established();
        let fact = rayleigh_ritz_strict(self.env, &context, v, psi)?;
        let gs = self.env.ground_state(v);
        let premises = self
            .find_step(&Prop::StateNe(psi, gs))
            .or_else(|| self.find_step(&Prop::StateNe(gs, psi)))
            .into_iter()
            .collect();
        let concluded = fact.prop.clone();
        Ok(self.record(
            fact,
            ProofStep::Instantiate {
                axiom: AxiomId::RayleighRitzStrict,
                premises,
                concluded,
            },
        ))
    }

    /// Record a definitional axiom instance (no preconditions).
    fn record_definition(&mut self, axiom: AxiomId, fact: Fact) -> StepId {
        let concluded = fact.prop.clone();
        self.record(
            fact,
            ProofStep::Instantiate {
                axiom,
                premises: Vec::new(),
                concluded,
            },
        )
    }

    /// Apply defining equalities left-to-right, in order, to the
    /// proposition of `from`.
    pub fn unfold(&mut self, from: StepId, using: &[StepId]) -> Result<StepId, DeriveError> {
        let mut prop = self.prop_of(from)?;
        for &def in using {
            match self.prop_of(def)? {
                Prop::Eq(lhs, rhs) => prop = prop.replace_term(&lhs, &rhs),
                other => {
                    return Err(DeriveError::StepMismatch {
                        step: def,
                        reason: format!("unfold premise is not an equality: {other}"),
                    })
                }
            }
        }
        let fact = Fact::new(prop.clone(), Justification::Substitution);
        Ok(self.record(
            fact,
            ProofStep::Unfold {
                from,
                using: using.to_vec(),
                concluded: prop,
            },
        ))
    }

    /// Record the integral-linearity axiom for a potential pair and
    /// density.
    pub fn linear_integral(
        &mut self,
        v1: PotentialId,
        v2: PotentialId,
        n: DensityId,
    ) -> StepId {
        let fact = integral_linearity(self.env, v1, v2, n);
        self.record_definition(AxiomId::IntegralLinearity, fact)
    }

    /// Unfold a strict inequality `E_v[ψ] > E₀(v)` into kinetic and
    /// integral terms, recording the three definitional instances it uses.
    pub fn unfold_energy(
        &mut self,
        from: StepId,
        psi: StateId,
        v: PotentialId,
    ) -> Result<StepId, DeriveError> {
        let f1 = energy_def(self.env, psi, v);
        let d1 = self.record_definition(AxiomId::EnergyDef, f1);
        let f2 = ground_energy_def(self.env, v);
        let d2 = self.record_definition(AxiomId::GroundEnergyDef, f2);
        let gs = self.env.ground_state(v);
        let f3 = energy_def(self.env, gs, v);
        let d3 = self.record_definition(AxiomId::EnergyDef, f3);
        self.unfold(from, &[d1, d2, d3])
    }

    /// Substitute densities using an equality step `n = m`: integrals over
    /// `m` in the proposition of `from` become integrals over `n`.
    pub fn substitute_density(
        &mut self,
        from: StepId,
        equality: StepId,
    ) -> Result<StepId, DeriveError> {
        let prop = self.prop_of(from)?;
        let (n, m) = match self.prop_of(equality)? {
            Prop::DensityEq(n, m) => (n, m),
            other => {
                return Err(DeriveError::StepMismatch {
                    step: equality,
                    reason: format!("substitution premise is not a density equality: {other}"),
                })
            }
        };
        let rewritten = prop.substitute_density(m, n);
        let fact = Fact::new(rewritten.clone(), Justification::Substitution);
        Ok(self.record(
            fact,
            ProofStep::SubstituteDensity {
                from,
                equality,
                concluded: rewritten,
            },
        ))
    }

    /// Combine strict inequalities through the arithmetic oracle. Succeeds
    /// only if the oracle closes a numeric contradiction, concluding
    /// `False`.
    pub fn close_linarith(&mut self, premises: &[StepId]) -> Result<StepId, DeriveError> {
        let props: Vec<(StepId, Prop)> = premises
            .iter()
            .map(|&id| self.prop_of(id).map(|p| (id, p)))
            .collect::<Result<_, _>>()?;
        let borrowed: Vec<(StepId, &Prop)> = props.iter().map(|(id, p)| (*id, p)).collect();
        let constraints = constraints_from_strict(&borrowed)?;

        let certificate = match refute(&constraints) {
            Refutation::Unsat(cert) => cert,
            Refutation::Sat | Refutation::Unknown => {
                return Err(DeriveError::ContradictionNotClosed)
            }
        };
        debug_assert!(certificate.validates(&constraints));
        debug!(
            "linarith closed with constant {} over {} premises",
            certificate.result_constant,
            premises.len()
        );
        let fact = Fact::new(Prop::False, Justification::Linarith(certificate.clone()));
        Ok(self.record(
            fact,
            ProofStep::LinarithClose {
                premises: premises.to_vec(),
                certificate,
            },
        ))
    }
}

/// Derive `False` from the hypotheses that `v1` and `v2` are not
/// constant-shift equivalent yet share their ground-state density.
///
/// Both hypotheses must already be assumed in the environment:
/// `NotShiftEquivalent(v1, v2)` and the equality of
/// `density_of(ground_state(v1))` with `density_of(ground_state(v2))`.
///
/// The chain, in order: distinct ground states; the strict variational
/// principle once per potential (a symmetric pair); definitional
/// unfolding; density substitution; Farkas combination into `0 > 0`.
pub fn hohenberg_kohn_contradiction(
    env: &mut Environment,
    v1: PotentialId,
    v2: PotentialId,
) -> Result<Proof, DeriveError> {
    let psi1 = env.ground_state(v1);
    let psi2 = env.ground_state(v2);
    let n1 = env.density_of(psi1);
    let n2 = env.density_of(psi2);

    let mut d = Derivation::new(env);

    let _h_distinct = d.use_hypothesis(Prop::NotShiftEquivalent(v1, v2))?;
    let h_density = d.use_hypothesis(Prop::DensityEq(n1, n2))?;

    let distinct = d.distinct_ground_states(v1, v2)?;
    let distinct_sym = d.symmetrize(distinct)?;
    debug_assert_eq!(
        d.fact(distinct_sym).map(|f| f.prop.clone()),
        Some(Prop::StateNe(psi2, psi1))
    );

    // The two variational steps are one sub-derivation applied twice,
    // with the roles of the potentials swapped.
    let strict1 = d.rayleigh_ritz(v1, psi2)?;
    let strict2 = d.rayleigh_ritz(v2, psi1)?;

    let expanded1 = d.unfold_energy(strict1, psi2, v1)?;
    let expanded2 = d.unfold_energy(strict2, psi1, v2)?;

    let substituted1 = d.substitute_density(expanded1, h_density)?;
    let substituted2 = d.substitute_density(expanded2, h_density)?;

    let falsum = d.close_linarith(&[substituted1, substituted2])?;
    debug_assert_eq!(d.fact(falsum).map(|f| f.prop.clone()), Some(Prop::False));

    let proof = d.into_proof();
    info!(
        "contradiction closed for {v1}, {v2} in {} steps",
        proof.len()
    );
    Ok(proof)
}

/// How the uniqueness conclusion was justified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniquenessWitness {
    /// Both potentials carry profiles that already differ by a uniform
    /// constant; the conclusion holds by decision.
    ProfileEquivalent,
    /// The distinctness assumption was refuted: assuming the potentials
    /// non-equivalent derives `False`, so by excluded middle they are
    /// equivalent.
    ByContradiction(Proof),
}

/// The Hohenberg-Kohn uniqueness theorem for a pair of potentials: a
/// shared ground-state density forces constant-shift equivalence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theorem {
    /// First potential.
    pub v1: PotentialId,
    /// Second potential.
    pub v2: PotentialId,
    /// How the conclusion was reached.
    pub witness: UniquenessWitness,
}

/// Prove the uniqueness theorem: given the hypothesis that
/// `ground_state(v1)` and `ground_state(v2)` share their density, conclude
/// that `v1` and `v2` differ by a uniform additive constant.
///
/// The shared-density hypothesis must already be assumed. The
/// non-equivalence assumption is scoped: it is pushed, refuted, and
/// discharged, leaving the environment's hypotheses as they were.
pub fn hohenberg_kohn_uniqueness(
    env: &mut Environment,
    v1: PotentialId,
    v2: PotentialId,
) -> Result<Theorem, DeriveError> {
    let psi1 = env.ground_state(v1);
    let psi2 = env.ground_state(v2);
    let n1 = env.density_of(psi1);
    let n2 = env.density_of(psi2);
    let shared = Prop::DensityEq(n1, n2);
    if !env.has_hypothesis(&shared) {
        return Err(DeriveError::MissingHypothesis(shared));
    }

    env.push_scope();
    match env.assume(Prop::NotShiftEquivalent(v1, v2)) {
        Err(CoreError::ProfilesShiftEquivalent { .. }) => {
            env.pop_scope();
            info!("{v1} and {v2} are shift-equivalent by profile; uniqueness holds by decision");
            Ok(Theorem {
                v1,
                v2,
                witness: UniquenessWitness::ProfileEquivalent,
            })
        }
        Err(other) => {
            env.pop_scope();
            Err(other.into())
        }
        Ok(_) => {
            let result = hohenberg_kohn_contradiction(env, v1, v2);
            env.pop_scope();
            let proof = result?;
            info!("uniqueness established for {v1}, {v2} by contradiction");
            Ok(Theorem {
                v1,
                v2,
                witness: UniquenessWitness::ByContradiction(proof),
            })
        }
    }
}
