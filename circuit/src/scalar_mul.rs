//! GLV scalar multiplication on G2.
//!
//! A scalar known when the circuit is built is split natively and drives a
//! table lookup with constant indices. A witness scalar goes through the
//! decomposition hint and a sign-select loop whose shape does not depend on
//! the scalar's value.

use ark_ff::PrimeField;
use frontend::{Builder, Variable};
use num_bigint::{BigInt, BigUint};
use num_traits::{Signed, Zero};
use tracing::{debug, instrument};

use crate::config::{AlgebraConfig, AlgebraOption};
use crate::error::CircuitError;
use crate::fields_e2::CircuitFp2;
use crate::inner::{inner_curve_config, InnerCurveConfig};
use crate::point_ops::CircuitPoint;
use crate::scalar_decomposition::decompose_scalar;

/// A scalar, tagged by whether its value is fixed at build time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scalar<F: PrimeField> {
    Constant(BigUint),
    Variable(Variable<F>),
}

impl<F: PrimeField> Scalar<F> {
    pub fn classify(b: &Builder<F>, s: Variable<F>) -> Self {
        match b.constant_value(&s) {
            Some(value) => Scalar::Constant(value),
            None => Scalar::Variable(s),
        }
    }
}

/// `p + q` with the formula selected by `algebra`.
pub(crate) fn add_with<F: PrimeField>(
    b: &mut Builder<F>,
    algebra: AlgebraConfig,
    p: &CircuitPoint<F>,
    q: &CircuitPoint<F>,
) -> CircuitPoint<F> {
    if algebra.complete_arithmetic {
        p.add_unified(b, q)
    } else {
        p.add(b, q)
    }
}

/// `[s]q`.
///
/// Without [`AlgebraOption::CompleteArithmetic`], `q` must not be the
/// identity, and a witness scalar must not be `0` or `λ`; those two scalars
/// leave the circuit unsatisfiable.
#[instrument(skip_all, level = "debug")]
pub fn scalar_mul<F: PrimeField>(
    b: &mut Builder<F>,
    q: &CircuitPoint<F>,
    s: Variable<F>,
    options: &[AlgebraOption],
) -> Result<CircuitPoint<F>, CircuitError> {
    let algebra = AlgebraConfig::new(options)?;
    let config = inner_curve_config(&b.field_modulus())?;

    let start = b.num_gates();
    let result = match Scalar::classify(b, s) {
        Scalar::Constant(value) => scalar_mul_const(b, config, q, &value, algebra),
        Scalar::Variable(v) => scalar_mul_var(b, config, q, v, algebra)?,
    };
    debug!(
        gates = b.num_gates() - start,
        complete = algebra.complete_arithmetic,
        "scalar multiplication"
    );
    Ok(result)
}

fn scalar_mul_var<F: PrimeField>(
    b: &mut Builder<F>,
    config: &'static InnerCurveConfig,
    q: &CircuitPoint<F>,
    s: Variable<F>,
    algebra: AlgebraConfig,
) -> Result<CircuitPoint<F>, CircuitError> {
    // Under complete arithmetic the identity is swapped for a dummy point so
    // that the incomplete steps below stay well defined; the result is masked.
    let (q, q_is_identity) = if algebra.complete_arithmetic {
        let is_identity = q.is_identity(b);
        let dummy = CircuitPoint {
            x: CircuitFp2::one(),
            y: CircuitFp2::one(),
        };
        (CircuitPoint::select(b, is_identity, &dummy, q), Some(is_identity))
    } else {
        (*q, None)
    };

    let d = decompose_scalar(b, config, s)?;
    let n = d.s1_bits.len();

    let phi_q = q.phi(b, config);
    let neg_q = q.neg(b);
    let neg_phi_q = phi_q.neg(b);
    let signed_q = |b: &mut Builder<F>, bit| CircuitPoint {
        x: q.x,
        y: CircuitFp2::select(b, bit, &q.y, &neg_q.y),
    };
    let signed_phi_q = |b: &mut Builder<F>, bit| CircuitPoint {
        x: phi_q.x,
        y: CircuitFp2::select(b, bit, &phi_q.y, &neg_phi_q.y),
    };

    let mut acc = q.add(b, &phi_q);

    // The two top bits of both halves are set, so these steps never hit equal x.
    for i in [n - 1, n - 2] {
        let t = signed_q(b, d.s1_bits[i]);
        acc = acc.double_and_add(b, &t);
        let t = signed_phi_q(b, d.s2_bits[i]);
        acc = acc.add(b, &t);
    }

    for i in (1..n - 2).rev() {
        let t1 = signed_q(b, d.s1_bits[i]);
        let t2 = signed_phi_q(b, d.s2_bits[i]);
        let t = t1.add(b, &t2);
        acc = acc.double_and_add(b, &t);
    }

    let corrected = add_with(b, algebra, &neg_q, &acc);
    acc = CircuitPoint::select(b, d.s1_bits[0], &acc, &corrected);
    let corrected = add_with(b, algebra, &neg_phi_q, &acc);
    acc = CircuitPoint::select(b, d.s2_bits[0], &acc, &corrected);

    if let Some(is_identity) = q_is_identity {
        acc = CircuitPoint::select(b, is_identity, &CircuitPoint::identity(), &acc);
    }
    Ok(acc)
}

fn scalar_mul_const<F: PrimeField>(
    b: &mut Builder<F>,
    config: &InnerCurveConfig,
    q: &CircuitPoint<F>,
    s: &BigUint,
    algebra: AlgebraConfig,
) -> CircuitPoint<F> {
    let s = s % &config.fr;
    if s.is_zero() {
        return CircuitPoint::identity();
    }

    let [k0, k1] = config.glv_basis.split(&BigInt::from(s));
    let mut q = *q;
    let mut phi_q = q.phi(b, config);
    if k0.is_negative() {
        q = q.neg(b);
    }
    if k1.is_negative() {
        phi_q = phi_q.neg(b);
    }
    let (k0, k1) = (k0.magnitude(), k1.magnitude());

    let neg_q = q.neg(b);
    let neg_phi_q = phi_q.neg(b);
    // table[b0 + 2·b1] = (-1)^(1-b0)·q + (-1)^(1-b1)·phi(q)
    let table = [
        add_with(b, algebra, &neg_q, &neg_phi_q),
        add_with(b, algebra, &q, &neg_phi_q),
        add_with(b, algebra, &neg_q, &phi_q),
        add_with(b, algebra, &q, &phi_q),
    ];

    let mut n = k0.bits().max(k1.bits());
    let mut acc = table[3];
    // 2·acc + acc is outside the domain of double_and_add.
    if n > 1 && k0.bit(n - 1) && k1.bit(n - 1) {
        let doubled = if algebra.complete_arithmetic {
            acc.add_unified(b, &acc)
        } else {
            acc.double(b)
        };
        acc = add_with(b, algebra, &doubled, &table[3]);
        n -= 1;
    }

    for i in (1..n).rev() {
        let index = usize::from(k0.bit(i)) + 2 * usize::from(k1.bit(i));
        acc = if algebra.complete_arithmetic {
            let doubled = acc.add_unified(b, &acc);
            doubled.add_unified(b, &table[index])
        } else {
            acc.double_and_add(b, &table[index])
        };
    }

    if !k0.bit(0) {
        acc = add_with(b, algebra, &neg_q, &acc);
    }
    if !k1.bit(0) {
        acc = add_with(b, algebra, &neg_phi_q, &acc);
    }
    acc
}
