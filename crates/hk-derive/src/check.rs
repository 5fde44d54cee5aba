//! Independent proof replay.
//!
//! [`check`] walks a finished [`Proof`] step by step and re-derives every
//! conclusion from the recorded premises, without trusting the builder:
//! axiom instances are re-instantiated against the environment, rewrites
//! are re-applied structurally, and Farkas certificates are revalidated
//! against freshly linearized premises. The proof is accepted atomically
//! or rejected at the first step that does not replay.

use hk_core::{AxiomId, Environment, Prop, RealTerm};
use hk_theory::{
    distinct_potentials_distinct_states, energy_def, ground_energy_def, integral_linearity,
    rayleigh_ritz_strict,
};

use crate::error::DeriveError;
use crate::linearize::constraints_from_strict;
use crate::proof::{Proof, ProofStep, StepId};

fn resolve(established: &[Prop], id: StepId) -> Result<&Prop, DeriveError> {
    established
        .get(id.0 as usize)
        .ok_or(DeriveError::UnknownStep(id))
}

fn mismatch(step: StepId, reason: impl Into<String>) -> DeriveError {
    DeriveError::StepMismatch {
        step,
        reason: reason.into(),
    }
}

/// Replay an axiom instantiation and return the proposition it must have
/// concluded.
fn replay_axiom(
    env: &mut Environment,
    axiom: AxiomId,
    context: &[Prop],
    concluded: &Prop,
    step: StepId,
) -> Result<Prop, DeriveError> {
    match axiom {
        AxiomId::EnergyDef => {
            let Prop::Eq(RealTerm::Energy(psi, v), _) = concluded else {
                return Err(mismatch(step, "energy_def must conclude an energy equality"));
            };
            Ok(energy_def(env, *psi, *v).prop)
        }
        AxiomId::GroundEnergyDef => {
            let Prop::Eq(RealTerm::GroundEnergy(v), _) = concluded else {
                return Err(mismatch(
                    step,
                    "ground_energy_def must conclude a ground-energy equality",
                ));
            };
            Ok(ground_energy_def(env, *v).prop)
        }
        AxiomId::IntegralLinearity => {
            let Prop::Eq(RealTerm::Sub(a, b), _) = concluded else {
                return Err(mismatch(
                    step,
                    "integral_linearity must conclude a difference equality",
                ));
            };
            let (RealTerm::Integral(v1, n1), RealTerm::Integral(v2, n2)) = (&**a, &**b) else {
                return Err(mismatch(step, "integral_linearity operands must be integrals"));
            };
            if n1 != n2 {
                return Err(mismatch(step, "integral_linearity densities must agree"));
            }
            Ok(integral_linearity(env, *v1, *v2, *n1).prop)
        }
        AxiomId::RayleighRitzStrict => {
            let Prop::Gt(RealTerm::Energy(psi, v), RealTerm::GroundEnergy(v2)) = concluded else {
                return Err(mismatch(
                    step,
                    "rayleigh_ritz_strict must conclude a strict energy inequality",
                ));
            };
            if v != v2 {
                return Err(mismatch(step, "rayleigh_ritz_strict potentials must agree"));
            }
            Ok(rayleigh_ritz_strict(env, context, *v, *psi)?.prop)
        }
        AxiomId::DistinctPotentialsDistinctStates => {
            let pair = context.iter().find_map(|p| match p {
                Prop::NotShiftEquivalent(v1, v2) => Some((*v1, *v2)),
                _ => None,
            });
            let Some((v1, v2)) = pair else {
                return Err(mismatch(
                    step,
                    "distinct_potentials_distinct_states cites no non-equivalence premise",
                ));
            };
            Ok(distinct_potentials_distinct_states(env, context, v1, v2)?.prop)
        }
    }
}

/// Check a proof against an environment.
///
/// The environment must hold the hypotheses the proof assumes (and the
/// symbol bindings it mentions). Accepts the full chain or rejects
/// atomically at the first invalid step.
pub fn check(proof: &Proof, env: &mut Environment) -> Result<(), DeriveError> {
    let mut established: Vec<Prop> = Vec::with_capacity(proof.len());

    for (idx, step) in proof.steps().iter().enumerate() {
        let id = StepId(idx as u32);
        let concluded = step.concluded();

        match step {
            ProofStep::Assume { prop } => {
                if !env.has_hypothesis(prop) {
                    return Err(mismatch(id, format!("hypothesis not in environment: {prop}")));
                }
            }
            ProofStep::Instantiate {
                axiom,
                premises,
                concluded,
            } => {
                let context: Vec<Prop> = premises
                    .iter()
                    .map(|&p| resolve(&established, p).cloned())
                    .collect::<Result<_, _>>()?;
                let expected = replay_axiom(env, *axiom, &context, concluded, id)?;
                if &expected != concluded {
                    return Err(mismatch(
                        id,
                        format!("axiom {axiom} instantiates to {expected}, not {concluded}"),
                    ));
                }
            }
            ProofStep::Symmetrize { from, concluded } => {
                let source = resolve(&established, *from)?;
                if source.symmetrized().as_ref() != Some(concluded) {
                    return Err(mismatch(id, "symmetric form does not match"));
                }
            }
            ProofStep::Unfold {
                from,
                using,
                concluded,
            } => {
                let mut prop = resolve(&established, *from)?.clone();
                for &def in using {
                    match resolve(&established, def)? {
                        Prop::Eq(lhs, rhs) => prop = prop.replace_term(lhs, rhs),
                        other => {
                            return Err(mismatch(
                                id,
                                format!("unfold premise {def} is not an equality: {other}"),
                            ))
                        }
                    }
                }
                if &prop != concluded {
                    return Err(mismatch(id, format!("unfold yields {prop}, not {concluded}")));
                }
            }
            ProofStep::SubstituteDensity {
                from,
                equality,
                concluded,
            } => {
                let source = resolve(&established, *from)?.clone();
                let Prop::DensityEq(n, m) = resolve(&established, *equality)? else {
                    return Err(mismatch(
                        id,
                        format!("premise {equality} is not a density equality"),
                    ));
                };
                let rewritten = source.substitute_density(*m, *n);
                if &rewritten != concluded {
                    return Err(mismatch(
                        id,
                        format!("substitution yields {rewritten}, not {concluded}"),
                    ));
                }
            }
            ProofStep::LinarithClose {
                premises,
                certificate,
            } => {
                let props: Vec<(StepId, &Prop)> = premises
                    .iter()
                    .map(|&p| resolve(&established, p).map(|prop| (p, prop)))
                    .collect::<Result<_, _>>()?;
                let constraints = constraints_from_strict(&props)?;
                if !certificate.validates(&constraints) {
                    return Err(DeriveError::InvalidCertificate(id));
                }
            }
        }

        established.push(concluded);
    }

    Ok(())
}
