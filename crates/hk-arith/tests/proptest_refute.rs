//! Property-based tests for the refutation oracle.
//!
//! Two properties, cross-checked against a concrete witness point:
//! systems constructed to be satisfiable at a known rational point must
//! never be refuted (soundness), and whenever the oracle refutes an
//! arbitrary system, the returned Farkas certificate must revalidate.

use hk_arith::{refute, LinearConstraint, LinearExpr, Refutation};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use proptest::prelude::*;

const NUM_ATOMS: usize = 3;

fn rat(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

/// Evaluate a linear expression at an integer point.
fn eval(expr: &LinearExpr, point: &[i64]) -> BigRational {
    let mut acc = expr.constant.clone();
    for (&atom, coeff) in &expr.coeffs {
        acc += coeff * rat(point[atom]);
    }
    acc
}

fn coeff_row() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-3i64..=3, NUM_ATOMS)
}

fn expr_from_coeffs(coeffs: &[i64], constant: BigRational) -> LinearExpr {
    let mut expr = LinearExpr::constant(constant);
    for (atom, &c) in coeffs.iter().enumerate() {
        if c != 0 {
            expr = expr.add(&LinearExpr::var(atom).scale(&rat(c)));
        }
    }
    expr
}

proptest! {
    /// A system built to hold at a concrete point is never refuted: each
    /// constraint's constant is chosen from the row's value at the point,
    /// minus a slack (strictly positive for strict constraints).
    #[test]
    fn satisfiable_systems_are_not_refuted(
        point in prop::collection::vec(-5i64..=5, NUM_ATOMS),
        rows in prop::collection::vec((coeff_row(), 0u8..3, 0i64..3), 1..6),
    ) {
        let constraints: Vec<LinearConstraint> = rows
            .into_iter()
            .map(|(coeffs, kind, slack)| {
                let row_value = eval(&expr_from_coeffs(&coeffs, BigRational::zero()), &point);
                match kind {
                    0 => LinearConstraint::Le(expr_from_coeffs(&coeffs, -&row_value - rat(slack))),
                    1 => {
                        LinearConstraint::Lt(expr_from_coeffs(&coeffs, -&row_value - rat(slack + 1)))
                    }
                    _ => LinearConstraint::Eq(expr_from_coeffs(&coeffs, -row_value)),
                }
            })
            .collect();

        prop_assert_eq!(refute(&constraints), Refutation::Sat);
    }

    /// Whatever the oracle refutes, the certificate revalidates.
    #[test]
    fn refutations_carry_valid_certificates(
        rows in prop::collection::vec((coeff_row(), -4i64..=4, 0u8..3), 1..6),
    ) {
        let constraints: Vec<LinearConstraint> = rows
            .into_iter()
            .map(|(coeffs, constant, kind)| {
                let expr = expr_from_coeffs(&coeffs, rat(constant));
                match kind {
                    0 => LinearConstraint::Le(expr),
                    1 => LinearConstraint::Lt(expr),
                    _ => LinearConstraint::Eq(expr),
                }
            })
            .collect();

        if let Refutation::Unsat(cert) = refute(&constraints) {
            prop_assert!(cert.validates(&constraints));
        }
    }
}
