//! Integration tests for the Hohenberg-Kohn derivation.
//!
//! Two synthetic scenarios drive the theorem end to end: a pair of
//! potentials differing only by a constant (the derivation must refuse to
//! start) and a genuinely distinct pair with a forced shared-density
//! hypothesis (the derivation must close to `False` along the stated
//! chain). The finished proof is replayed by the independent checker, and
//! tampered proofs are rejected.

use hk_core::{AxiomId, DensityId, Environment, PotentialId, PotentialProfile, Prop, RealTerm, StateId};
use hk_derive::{
    check, hohenberg_kohn_contradiction, hohenberg_kohn_uniqueness, DeriveError, ProofStep,
    UniquenessWitness,
};

/// `v1(x) = x²` and `v2(x) = 2x²`: genuinely distinct potentials.
fn distinct_pair(env: &mut Environment) -> (PotentialId, PotentialId) {
    let v1 = env
        .declare_potential_with_profile("v1", PotentialProfile::from_integer_coeffs(&[0, 0, 1]))
        .unwrap();
    let v2 = env
        .declare_potential_with_profile("v2", PotentialProfile::from_integer_coeffs(&[0, 0, 2]))
        .unwrap();
    (v1, v2)
}

/// Bind ground states and densities, returning `(ψ1, ψ2, n1, n2)`.
fn bind(env: &mut Environment, v1: PotentialId, v2: PotentialId) -> (StateId, StateId, DensityId, DensityId) {
    let psi1 = env.ground_state(v1);
    let psi2 = env.ground_state(v2);
    let n1 = env.density_of(psi1);
    let n2 = env.density_of(psi2);
    (psi1, psi2, n1, n2)
}

#[test]
fn shifted_pair_cannot_enter_the_derivation() {
    // v1(x) = x², v2(x) = x² + 1: same physics up to the energy origin.
    let mut env = Environment::new();
    let v1 = env
        .declare_potential_with_profile("v1", PotentialProfile::from_integer_coeffs(&[0, 0, 1]))
        .unwrap();
    let v2 = env
        .declare_potential_with_profile("v2", PotentialProfile::from_integer_coeffs(&[1, 0, 1]))
        .unwrap();

    // The non-equivalence hypothesis is refused outright.
    assert!(env.assume(Prop::NotShiftEquivalent(v1, v2)).is_err());

    // Without it the contradiction chain cannot be invoked.
    let (_, _, n1, n2) = bind(&mut env, v1, v2);
    env.assume(Prop::DensityEq(n1, n2)).unwrap();
    let err = hohenberg_kohn_contradiction(&mut env, v1, v2).unwrap_err();
    assert_eq!(
        err,
        DeriveError::MissingHypothesis(Prop::NotShiftEquivalent(v1, v2))
    );

    // The uniqueness theorem still holds, by decision rather than by
    // contradiction.
    let theorem = hohenberg_kohn_uniqueness(&mut env, v1, v2).unwrap();
    assert_eq!(theorem.witness, UniquenessWitness::ProfileEquivalent);
}

#[test]
fn distinct_pair_closes_to_false() {
    let mut env = Environment::new();
    let (v1, v2) = distinct_pair(&mut env);
    let (psi1, psi2, n1, n2) = bind(&mut env, v1, v2);

    env.assume(Prop::NotShiftEquivalent(v1, v2)).unwrap();
    // The shared-density hypothesis is forced; physically it is the
    // assumption the theorem refutes.
    env.assume(Prop::DensityEq(n1, n2)).unwrap();

    let proof = hohenberg_kohn_contradiction(&mut env, v1, v2).unwrap();
    assert_eq!(proof.conclusion(), Some(Prop::False));

    // The chain has exactly the stated shape.
    let concluded: Vec<Prop> = proof.steps.iter().map(ProofStep::concluded).collect();
    let k1 = RealTerm::kinetic(psi1);
    let k2 = RealTerm::kinetic(psi2);

    assert_eq!(concluded[0], Prop::NotShiftEquivalent(v1, v2));
    assert_eq!(concluded[1], Prop::DensityEq(n1, n2));
    // Step 2: distinct ground states.
    assert_eq!(concluded[2], Prop::StateNe(psi1, psi2));
    assert_eq!(concluded[3], Prop::StateNe(psi2, psi1));
    // Steps 3-4: the strict variational principle, once per potential.
    assert_eq!(
        concluded[4],
        Prop::Gt(RealTerm::energy(psi2, v1), RealTerm::ground_energy(v1))
    );
    assert_eq!(
        concluded[5],
        Prop::Gt(RealTerm::energy(psi1, v2), RealTerm::ground_energy(v2))
    );
    // Step 5: both sides unfolded to kinetic + integral form.
    assert_eq!(
        concluded[9],
        Prop::Gt(
            RealTerm::add(k2.clone(), RealTerm::integral(v1, n2)),
            RealTerm::add(k1.clone(), RealTerm::integral(v1, n1)),
        )
    );
    assert_eq!(
        concluded[13],
        Prop::Gt(
            RealTerm::add(k1.clone(), RealTerm::integral(v2, n1)),
            RealTerm::add(k2.clone(), RealTerm::integral(v2, n2)),
        )
    );
    // Step 6: the shared density substituted on both inequalities.
    assert_eq!(
        concluded[14],
        Prop::Gt(
            RealTerm::add(k2.clone(), RealTerm::integral(v1, n1)),
            RealTerm::add(k1.clone(), RealTerm::integral(v1, n1)),
        )
    );
    assert_eq!(
        concluded[15],
        Prop::Gt(
            RealTerm::add(k1, RealTerm::integral(v2, n1)),
            RealTerm::add(k2, RealTerm::integral(v2, n1)),
        )
    );
    // Step 8: the numeric contradiction.
    assert_eq!(concluded[16], Prop::False);
    assert_eq!(proof.len(), 17);

    // The final step records a Farkas certificate summing the two strict
    // inequalities into 0 > 0.
    let ProofStep::LinarithClose { certificate, .. } = &proof.steps[16] else {
        panic!("final step must be a linarith closure");
    };
    assert!(num_traits::Zero::is_zero(&certificate.result_constant));
}

#[test]
fn finished_proofs_replay() {
    let mut env = Environment::new();
    let (v1, v2) = distinct_pair(&mut env);
    let (_, _, n1, n2) = bind(&mut env, v1, v2);
    env.assume(Prop::NotShiftEquivalent(v1, v2)).unwrap();
    env.assume(Prop::DensityEq(n1, n2)).unwrap();

    let proof = hohenberg_kohn_contradiction(&mut env, v1, v2).unwrap();
    check(&proof, &mut env).unwrap();
}

#[test]
fn tampered_certificate_is_rejected() {
    let mut env = Environment::new();
    let (v1, v2) = distinct_pair(&mut env);
    let (_, _, n1, n2) = bind(&mut env, v1, v2);
    env.assume(Prop::NotShiftEquivalent(v1, v2)).unwrap();
    env.assume(Prop::DensityEq(n1, n2)).unwrap();

    let mut proof = hohenberg_kohn_contradiction(&mut env, v1, v2).unwrap();
    let last = proof.steps.len() - 1;
    let ProofStep::LinarithClose { certificate, .. } = &mut proof.steps[last] else {
        panic!("final step must be a linarith closure");
    };
    certificate.coefficients[0] = -certificate.coefficients[0].clone()
        - num_rational::BigRational::from_integer(1.into());

    assert!(matches!(
        check(&proof, &mut env),
        Err(DeriveError::InvalidCertificate(_))
    ));
}

#[test]
fn forged_conclusions_are_rejected() {
    let mut env = Environment::new();
    let (v1, v2) = distinct_pair(&mut env);
    let (_, psi2, n1, n2) = bind(&mut env, v1, v2);
    env.assume(Prop::NotShiftEquivalent(v1, v2)).unwrap();
    env.assume(Prop::DensityEq(n1, n2)).unwrap();

    let mut proof = hohenberg_kohn_contradiction(&mut env, v1, v2).unwrap();
    // Flip the distinctness conclusion to a proposition the axiom never
    // produced.
    let ProofStep::Instantiate { concluded, .. } = &mut proof.steps[2] else {
        panic!("step 2 must be an axiom instantiation");
    };
    *concluded = Prop::StateNe(psi2, psi2);

    assert!(matches!(
        check(&proof, &mut env),
        Err(DeriveError::StepMismatch { .. })
    ));
}

#[test]
fn dropped_hypothesis_fails_replay() {
    let mut env = Environment::new();
    let (v1, v2) = distinct_pair(&mut env);
    let (_, _, n1, n2) = bind(&mut env, v1, v2);
    env.push_scope();
    env.assume(Prop::NotShiftEquivalent(v1, v2)).unwrap();
    env.assume(Prop::DensityEq(n1, n2)).unwrap();

    let proof = hohenberg_kohn_contradiction(&mut env, v1, v2).unwrap();

    // Discharging the hypotheses invalidates the proof's assumptions.
    env.pop_scope();
    assert!(matches!(
        check(&proof, &mut env),
        Err(DeriveError::StepMismatch { .. })
    ));
}

#[test]
fn uniqueness_by_contradiction_for_opaque_potentials() {
    let mut env = Environment::new();
    let v = env.declare_potential("v").unwrap();
    let w = env.declare_potential("w").unwrap();
    let (_, _, n1, n2) = bind(&mut env, v, w);
    env.assume(Prop::DensityEq(n1, n2)).unwrap();

    let theorem = hohenberg_kohn_uniqueness(&mut env, v, w).unwrap();
    let UniquenessWitness::ByContradiction(proof) = &theorem.witness else {
        panic!("opaque potentials admit the distinctness assumption");
    };
    assert_eq!(proof.conclusion(), Some(Prop::False));

    // The scoped distinctness assumption was discharged.
    assert!(!env.has_hypothesis(&Prop::NotShiftEquivalent(v, w)));
    assert!(env.has_hypothesis(&Prop::DensityEq(n1, n2)));
}

#[test]
fn uniqueness_requires_the_shared_density_hypothesis() {
    let mut env = Environment::new();
    let (v1, v2) = distinct_pair(&mut env);
    let err = hohenberg_kohn_uniqueness(&mut env, v1, v2).unwrap_err();
    assert!(matches!(err, DeriveError::MissingHypothesis(_)));
}

#[test]
fn unfolding_is_idempotent_under_replay() {
    let mut env = Environment::new();
    let (v1, v2) = distinct_pair(&mut env);
    let (_, _, n1, n2) = bind(&mut env, v1, v2);
    env.assume(Prop::NotShiftEquivalent(v1, v2)).unwrap();
    env.assume(Prop::DensityEq(n1, n2)).unwrap();

    let proof = hohenberg_kohn_contradiction(&mut env, v1, v2).unwrap();

    // Re-applying the definitional rewrites of the first unfold to its own
    // conclusion changes nothing: the expansions contain no folded forms.
    let ProofStep::Unfold { using, concluded, .. } = &proof.steps[9] else {
        panic!("step 9 must be the first unfold");
    };
    let mut again = concluded.clone();
    for def in using {
        let ProofStep::Instantiate { concluded: eq, .. } = &proof.steps[def.0 as usize] else {
            panic!("unfold premises are definitional instantiations");
        };
        let Prop::Eq(lhs, rhs) = eq else {
            panic!("definitional axioms conclude equalities");
        };
        again = again.replace_term(lhs, rhs);
    }
    assert_eq!(&again, concluded);
}

#[test]
fn proof_text_lists_the_rule_chain() {
    let mut env = Environment::new();
    let (v1, v2) = distinct_pair(&mut env);
    let (_, _, n1, n2) = bind(&mut env, v1, v2);
    env.assume(Prop::NotShiftEquivalent(v1, v2)).unwrap();
    env.assume(Prop::DensityEq(n1, n2)).unwrap();

    let proof = hohenberg_kohn_contradiction(&mut env, v1, v2).unwrap();
    let text = proof.to_string();
    assert!(text.contains(":rule distinct_potentials_distinct_states"));
    assert!(text.contains(":rule rayleigh_ritz_strict"));
    assert!(text.contains(":rule energy_def"));
    assert!(text.contains(":rule ground_energy_def"));
    assert!(text.contains(":rule subst_density"));
    assert!(text.contains(":rule linarith"));
    assert!(text.lines().last().unwrap().contains("false"));
}

#[test]
fn manual_integral_linearity_replays() {
    let mut env = Environment::new();
    let (v1, v2) = distinct_pair(&mut env);
    let n = env.declare_density("n").unwrap();

    let mut d = hk_derive::Derivation::new(&mut env);
    let step = d.linear_integral(v1, v2, n);
    let fact = d.fact(step).unwrap().clone();
    let proof = d.into_proof();

    // The axiom names the pointwise-difference potential.
    let diff = env.difference_potential(v1, v2);
    assert_eq!(
        fact.prop,
        Prop::Eq(
            RealTerm::sub(RealTerm::integral(v1, n), RealTerm::integral(v2, n)),
            RealTerm::integral(diff, n),
        )
    );
    check(&proof, &mut env).unwrap();
}

#[test]
fn axiom_ids_enumerate_the_trust_boundary() {
    // Every rule name in a finished proof maps back to the fixed axiom
    // vocabulary or to a checked derivation step.
    let mut env = Environment::new();
    let (v1, v2) = distinct_pair(&mut env);
    let (_, _, n1, n2) = bind(&mut env, v1, v2);
    env.assume(Prop::NotShiftEquivalent(v1, v2)).unwrap();
    env.assume(Prop::DensityEq(n1, n2)).unwrap();
    let proof = hohenberg_kohn_contradiction(&mut env, v1, v2).unwrap();

    for step in &proof.steps {
        if let ProofStep::Instantiate { axiom, .. } = step {
            assert!(matches!(
                axiom,
                AxiomId::EnergyDef
                    | AxiomId::GroundEnergyDef
                    | AxiomId::IntegralLinearity
                    | AxiomId::RayleighRitzStrict
                    | AxiomId::DistinctPotentialsDistinctStates
            ));
        }
    }
}
