//! Derive the uniqueness theorem for a synthetic pair of potentials and
//! print the refutation chain.
//!
//! Run with `cargo run --example uniqueness`.

use hk_core::{Environment, PotentialProfile, Prop};
use hk_derive::{hohenberg_kohn_uniqueness, UniquenessWitness};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut env = Environment::new();
    // v1(x) = x² and v2(x) = 2x²: not related by a constant shift.
    let v1 = env
        .declare_potential_with_profile("v1", PotentialProfile::from_integer_coeffs(&[0, 0, 1]))?;
    let v2 = env
        .declare_potential_with_profile("v2", PotentialProfile::from_integer_coeffs(&[0, 0, 2]))?;

    // Hypothesize that their ground states share a density.
    let psi1 = env.ground_state(v1);
    let psi2 = env.ground_state(v2);
    let n1 = env.density_of(psi1);
    let n2 = env.density_of(psi2);
    env.assume(Prop::DensityEq(n1, n2))?;

    let theorem = hohenberg_kohn_uniqueness(&mut env, v1, v2)?;
    match &theorem.witness {
        UniquenessWitness::ProfileEquivalent => {
            println!("; {v1} and {v2} already differ by a constant");
        }
        UniquenessWitness::ByContradiction(proof) => {
            println!("; a shared ground-state density forces {v1} ~ {v2}");
            println!("; refutation of the distinctness assumption:");
            print!("{proof}");
        }
    }
    Ok(())
}
