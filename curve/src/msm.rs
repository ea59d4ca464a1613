use ark_ec::AffineRepr;
use ark_ff::Zero;
use num_bigint::BigUint;

use crate::{Affine, Projective};

/// Compute `a * P + b * Q` with Shamir's trick over a four-entry table.
pub fn double_scalar_mul(a: &BigUint, p: &Affine, b: &BigUint, q: &Affine) -> Projective {
    let table = [
        Projective::zero(),
        p.into_group(),
        q.into_group(),
        *p + *q,
    ];

    let bits = a.bits().max(b.bits());
    let mut result = Projective::zero();
    for i in (0..bits).rev() {
        result = result + result;
        let window = usize::from(a.bit(i)) | (usize::from(b.bit(i)) << 1);
        if window != 0 {
            result += table[window];
        }
    }
    result
}
