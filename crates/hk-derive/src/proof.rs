//! Proof objects.
//!
//! A [`Proof`] is an ordered list of steps, each concluding one
//! proposition. Steps reference their premises by [`StepId`], so a checker
//! can replay the chain independently. The text form follows SMT-style
//! proof listings: `(assume t0 ...)` for hypotheses, `(step tN <prop>
//! :rule <name> :premises (...))` for everything else.

use serde::{Deserialize, Serialize};
use std::fmt;

use hk_arith::FarkasCertificate;
use hk_core::{AxiomId, Prop};

/// Index of a step within a proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StepId(pub u32);

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// A single inference step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProofStep {
    /// A hypothesis pulled from the environment.
    Assume {
        /// The assumed proposition.
        prop: Prop,
    },
    /// An instantiation of a trusted axiom schema. `premises` cite the
    /// steps establishing the axiom's preconditions (empty for the
    /// definitional axioms).
    Instantiate {
        /// The axiom instantiated.
        axiom: AxiomId,
        /// Precondition steps.
        premises: Vec<StepId>,
        /// The instantiated proposition.
        concluded: Prop,
    },
    /// The symmetric form of an earlier fact.
    Symmetrize {
        /// The step being flipped.
        from: StepId,
        /// The flipped proposition.
        concluded: Prop,
    },
    /// Definitional rewriting: the equalities in `using` applied
    /// left-to-right, in order, to the proposition of `from`.
    Unfold {
        /// The step being rewritten.
        from: StepId,
        /// Defining equalities, applied in order.
        using: Vec<StepId>,
        /// The rewritten proposition.
        concluded: Prop,
    },
    /// Density substitution: with `equality` concluding `n = m`, every
    /// integral over `m` in the proposition of `from` is rewritten to one
    /// over `n`.
    SubstituteDensity {
        /// The step being rewritten.
        from: StepId,
        /// The density equality used.
        equality: StepId,
        /// The rewritten proposition.
        concluded: Prop,
    },
    /// Farkas combination of strict inequalities into a numeric
    /// contradiction. Concludes `False`.
    LinarithClose {
        /// The strict inequalities combined.
        premises: Vec<StepId>,
        /// The certificate witnessing the contradiction.
        certificate: FarkasCertificate,
    },
}

impl ProofStep {
    /// The proposition this step concludes.
    pub fn concluded(&self) -> Prop {
        match self {
            ProofStep::Assume { prop } => prop.clone(),
            ProofStep::Instantiate { concluded, .. }
            | ProofStep::Symmetrize { concluded, .. }
            | ProofStep::Unfold { concluded, .. }
            | ProofStep::SubstituteDensity { concluded, .. } => concluded.clone(),
            ProofStep::LinarithClose { .. } => Prop::False,
        }
    }

    /// The rule name used in the text form.
    pub fn rule_name(&self) -> &'static str {
        match self {
            ProofStep::Assume { .. } => "assume",
            ProofStep::Instantiate { axiom, .. } => match axiom {
                AxiomId::EnergyDef => "energy_def",
                AxiomId::GroundEnergyDef => "ground_energy_def",
                AxiomId::IntegralLinearity => "integral_linearity",
                AxiomId::RayleighRitzStrict => "rayleigh_ritz_strict",
                AxiomId::DistinctPotentialsDistinctStates => "distinct_potentials_distinct_states",
            },
            ProofStep::Symmetrize { .. } => "symm",
            ProofStep::Unfold { .. } => "unfold",
            ProofStep::SubstituteDensity { .. } => "subst_density",
            ProofStep::LinarithClose { .. } => "linarith",
        }
    }

    fn premise_ids(&self) -> Vec<StepId> {
        match self {
            ProofStep::Assume { .. } => Vec::new(),
            ProofStep::Instantiate { premises, .. } => premises.clone(),
            ProofStep::Symmetrize { from, .. } => vec![*from],
            ProofStep::Unfold { from, using, .. } => {
                let mut ids = vec![*from];
                ids.extend(using.iter().copied());
                ids
            }
            ProofStep::SubstituteDensity { from, equality, .. } => vec![*from, *equality],
            ProofStep::LinarithClose { premises, .. } => premises.clone(),
        }
    }
}

/// An ordered derivation, concluding with the proposition of its last
/// step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    /// The steps, in derivation order.
    pub steps: Vec<ProofStep>,
}

impl Proof {
    /// An empty proof.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step, returning its id.
    pub(crate) fn push(&mut self, step: ProofStep) -> StepId {
        self.steps.push(step);
        StepId(self.steps.len() as u32 - 1)
    }

    /// All steps in order.
    pub fn steps(&self) -> &[ProofStep] {
        &self.steps
    }

    /// Look up a step.
    pub fn get(&self, id: StepId) -> Option<&ProofStep> {
        self.steps.get(id.0 as usize)
    }

    /// The proposition concluded by the final step.
    pub fn conclusion(&self) -> Option<Prop> {
        self.steps.last().map(ProofStep::concluded)
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the proof has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for Proof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, step) in self.steps.iter().enumerate() {
            let id = StepId(idx as u32);
            match step {
                ProofStep::Assume { prop } => writeln!(f, "(assume {id} {prop})")?,
                _ => {
                    let premises = step.premise_ids();
                    if premises.is_empty() {
                        writeln!(f, "(step {id} {} :rule {})", step.concluded(), step.rule_name())?;
                    } else {
                        let listed = premises
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join(" ");
                        writeln!(
                            f,
                            "(step {id} {} :rule {} :premises ({listed}))",
                            step.concluded(),
                            step.rule_name()
                        )?;
                    }
                }
            }
        }
        Ok(())
    }
}
