//! Certified refutation of linear constraint systems.
//!
//! Fourier-Motzkin elimination over the rationals. When the system is
//! infeasible the eliminator also produces a [`FarkasCertificate`]: by
//! Farkas' lemma, an infeasible system of linear constraints admits
//! multipliers (non-negative on inequalities, any sign on equalities) whose
//! weighted sum of the inputs is a constant contradiction such as `1 ≤ 0`
//! or `0 < 0`. The certificate can be revalidated without re-running the
//! elimination.

use num_rational::BigRational;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::linear::{LinearConstraint, LinearExpr};

/// Outcome of a refutation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refutation {
    /// The constraints are satisfiable over the reals.
    Sat,
    /// The constraints are unsatisfiable, with a certificate.
    Unsat(FarkasCertificate),
    /// The oracle could not decide. Fourier-Motzkin over `≤`/`<`/`=`
    /// real constraints never produces this, but callers must treat it
    /// as a failure to close.
    Unknown,
}

/// Multipliers witnessing the infeasibility of a constraint system.
///
/// `coefficients[i]` is the multiplier for input constraint `i`. The
/// weighted sum of the input expressions must collapse to the constant
/// `result_constant`, and the combined constraint must be unsatisfiable on
/// its own: either `result_constant > 0`, or `result_constant = 0` with a
/// strict input weighted positively (the `0 < 0` case).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarkasCertificate {
    /// Multiplier per input constraint. Inequality multipliers are
    /// non-negative; equality multipliers may take either sign.
    pub coefficients: Vec<BigRational>,
    /// The constant the combination collapses to.
    pub result_constant: BigRational,
}

impl FarkasCertificate {
    /// Scale every multiplier by a positive factor. Preserves validity.
    #[must_use]
    pub fn scale(&self, factor: &BigRational) -> Self {
        Self {
            coefficients: self.coefficients.iter().map(|c| c * factor).collect(),
            result_constant: &self.result_constant * factor,
        }
    }

    /// Revalidate the certificate against the constraints it claims to
    /// refute. Recomputes the weighted sum from scratch; does not trust
    /// `result_constant` until it has been checked against the sum.
    pub fn validates(&self, constraints: &[LinearConstraint]) -> bool {
        if self.coefficients.len() != constraints.len() {
            return false;
        }

        let mut combo = LinearExpr::constant(BigRational::zero());
        let mut strict_used = false;
        for (coeff, constraint) in self.coefficients.iter().zip(constraints) {
            match constraint {
                LinearConstraint::Le(_) | LinearConstraint::Lt(_) => {
                    if coeff < &BigRational::zero() {
                        return false;
                    }
                }
                // Equality rows may be weighted with either sign.
                LinearConstraint::Eq(_) => {}
            }
            if constraint.is_strict() && coeff > &BigRational::zero() {
                strict_used = true;
            }
            combo = combo.add(&constraint.expr().scale(coeff));
        }

        if !combo.is_constant() || combo.constant != self.result_constant {
            return false;
        }

        combo.constant > BigRational::zero() || (combo.constant.is_zero() && strict_used)
    }
}

/// A working constraint during elimination: `expr ≤ 0` (or `< 0` when
/// `strict`), together with the signed multipliers over the original
/// constraints that produced it.
#[derive(Debug, Clone)]
struct Tracked {
    strict: bool,
    expr: LinearExpr,
    multipliers: Vec<BigRational>,
}

impl Tracked {
    fn contradiction(&self) -> Option<FarkasCertificate> {
        if !self.expr.is_constant() {
            return None;
        }
        let c = &self.expr.constant;
        let closed = c > &BigRational::zero() || (c.is_zero() && self.strict);
        closed.then(|| FarkasCertificate {
            coefficients: self.multipliers.clone(),
            result_constant: c.clone(),
        })
    }
}

fn unit(len: usize, idx: usize, sign: i64) -> Vec<BigRational> {
    let mut v = vec![BigRational::zero(); len];
    v[idx] = BigRational::from_integer(sign.into());
    v
}

fn combine_multipliers(
    a: &[BigRational],
    ka: &BigRational,
    b: &[BigRational],
    kb: &BigRational,
) -> Vec<BigRational> {
    a.iter().zip(b).map(|(x, y)| x * ka + y * kb).collect()
}

/// Eliminate one atom from the system, pairing lower and upper bounds.
fn eliminate(tracked: Vec<Tracked>, atom: usize) -> Vec<Tracked> {
    let mut lowers: Vec<Tracked> = Vec::new(); // negative coefficient on `atom`
    let mut uppers: Vec<Tracked> = Vec::new(); // positive coefficient on `atom`
    let mut rest: Vec<Tracked> = Vec::new();

    for t in tracked {
        let sign = match t.expr.coeffs.get(&atom) {
            None => 0i8,
            Some(c) if c > &BigRational::zero() => 1,
            Some(_) => -1,
        };
        match sign {
            0 => rest.push(t),
            1 => uppers.push(t),
            _ => lowers.push(t),
        }
    }

    // Each (lower, upper) pair combines with positive scalars chosen to
    // cancel the eliminated atom exactly.
    for lower in &lowers {
        for upper in &uppers {
            let a = upper.expr.coeffs[&atom].clone(); // > 0
            let b = -lower.expr.coeffs[&atom].clone(); // > 0
            let expr = lower.expr.scale(&a).add(&upper.expr.scale(&b));
            debug_assert!(!expr.coeffs.contains_key(&atom));
            rest.push(Tracked {
                strict: lower.strict || upper.strict,
                expr,
                multipliers: combine_multipliers(
                    &lower.multipliers,
                    &a,
                    &upper.multipliers,
                    &b,
                ),
            });
        }
    }

    rest
}

/// Decide whether a conjunction of linear constraints is satisfiable over
/// the reals.
///
/// Returns [`Refutation::Unsat`] with a validated [`FarkasCertificate`]
/// when the system is infeasible, [`Refutation::Sat`] otherwise.
pub fn refute(constraints: &[LinearConstraint]) -> Refutation {
    if constraints.is_empty() {
        return Refutation::Sat;
    }

    let n = constraints.len();
    let mut tracked: Vec<Tracked> = Vec::with_capacity(n);
    for (i, c) in constraints.iter().enumerate() {
        match c {
            LinearConstraint::Le(e) => tracked.push(Tracked {
                strict: false,
                expr: e.clone(),
                multipliers: unit(n, i, 1),
            }),
            LinearConstraint::Lt(e) => tracked.push(Tracked {
                strict: true,
                expr: e.clone(),
                multipliers: unit(n, i, 1),
            }),
            // e = 0 contributes both e ≤ 0 and -e ≤ 0; the negative branch
            // carries a negative multiplier, which is legal on equalities.
            LinearConstraint::Eq(e) => {
                tracked.push(Tracked {
                    strict: false,
                    expr: e.clone(),
                    multipliers: unit(n, i, 1),
                });
                tracked.push(Tracked {
                    strict: false,
                    expr: e.scale(&BigRational::from_integer((-1).into())),
                    multipliers: unit(n, i, -1),
                });
            }
        }
    }

    let mut atoms: Vec<usize> = Vec::new();
    for t in &tracked {
        for atom in t.expr.atoms() {
            if !atoms.contains(&atom) {
                atoms.push(atom);
            }
        }
    }
    atoms.sort_unstable();

    for atom in atoms {
        for t in &tracked {
            if let Some(cert) = t.contradiction() {
                return Refutation::Unsat(cert);
            }
        }
        tracked = eliminate(tracked, atom);
    }

    for t in &tracked {
        if let Some(cert) = t.contradiction() {
            return Refutation::Unsat(cert);
        }
    }

    Refutation::Sat
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn rat(n: i64) -> BigRational {
        BigRational::from_integer(BigInt::from(n))
    }

    /// `a + x > b + x` and `b + y > a + y` combine termwise to `0 > 0`.
    #[test]
    fn symmetric_strict_pair_refutes() {
        // Encode `lhs > rhs` as `rhs - lhs < 0`.
        let a = LinearExpr::var(0);
        let b = LinearExpr::var(1);
        let c1 = LinearConstraint::Lt(b.sub(&a)); // a > b
        let c2 = LinearConstraint::Lt(a.sub(&b)); // b > a

        let constraints = vec![c1, c2];
        match refute(&constraints) {
            Refutation::Unsat(cert) => {
                assert!(cert.validates(&constraints));
                assert!(cert.result_constant.is_zero());
            }
            other => panic!("expected Unsat, got {other:?}"),
        }
    }

    #[test]
    fn satisfiable_chain_is_sat() {
        // x ≤ 0, x - 1 < 0 is satisfied by x = 0.
        let x = LinearExpr::var(0);
        let constraints = vec![
            LinearConstraint::Le(x.clone()),
            LinearConstraint::Lt(x.sub(&LinearExpr::constant(rat(1)))),
        ];
        assert_eq!(refute(&constraints), Refutation::Sat);
    }

    #[test]
    fn trivially_false_constant_refutes() {
        let constraints = vec![LinearConstraint::Le(LinearExpr::constant(rat(1)))];
        match refute(&constraints) {
            Refutation::Unsat(cert) => {
                assert!(cert.validates(&constraints));
                assert_eq!(cert.result_constant, rat(1));
            }
            other => panic!("expected Unsat, got {other:?}"),
        }
    }

    #[test]
    fn equality_against_strict_refutes() {
        // x = 0 together with x < 0.
        let x = LinearExpr::var(0);
        let constraints = vec![
            LinearConstraint::Eq(x.clone()),
            LinearConstraint::Lt(x.clone()),
        ];
        match refute(&constraints) {
            Refutation::Unsat(cert) => assert!(cert.validates(&constraints)),
            other => panic!("expected Unsat, got {other:?}"),
        }
    }

    #[test]
    fn certificate_scaling_preserves_validity() {
        let a = LinearExpr::var(0);
        let b = LinearExpr::var(1);
        let constraints = vec![
            LinearConstraint::Lt(b.sub(&a)),
            LinearConstraint::Lt(a.sub(&b)),
        ];
        let Refutation::Unsat(cert) = refute(&constraints) else {
            panic!("expected Unsat");
        };
        let scaled = cert.scale(&rat(7));
        assert!(scaled.validates(&constraints));
    }

    #[test]
    fn tampered_certificate_rejected() {
        let a = LinearExpr::var(0);
        let b = LinearExpr::var(1);
        let constraints = vec![
            LinearConstraint::Lt(b.sub(&a)),
            LinearConstraint::Lt(a.sub(&b)),
        ];
        let Refutation::Unsat(mut cert) = refute(&constraints) else {
            panic!("expected Unsat");
        };
        cert.coefficients[0] = rat(-1);
        assert!(!cert.validates(&constraints));
    }

    #[test]
    fn three_way_cycle_refutes() {
        // x < y, y < z, z < x
        let x = LinearExpr::var(0);
        let y = LinearExpr::var(1);
        let z = LinearExpr::var(2);
        let constraints = vec![
            LinearConstraint::Lt(x.sub(&y)),
            LinearConstraint::Lt(y.sub(&z)),
            LinearConstraint::Lt(z.sub(&x)),
        ];
        match refute(&constraints) {
            Refutation::Unsat(cert) => assert!(cert.validates(&constraints)),
            other => panic!("expected Unsat, got {other:?}"),
        }
    }
}
