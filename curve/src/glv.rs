//! GLV scalar splitting for BLS12-377 G2.
//!
//! G2 carries the endomorphism `phi(x, y) = (ω·x, y)` which acts as `[λ]` on the
//! prime-order subgroup, with `λ = x₀² - 1` for the BLS seed `x₀`. Because
//! `λ² + λ + 1 = r`, the lattice `{(a, b) : a + λ·b ≡ 0 (mod r)}` has a basis of
//! vectors of length about `√r`, and Babai rounding against it splits any scalar
//! `s` into `(s1, s2)` with `s1 + λ·s2 ≡ s (mod r)` and `|s1|, |s2| <= λ`.

use std::sync::OnceLock;

use ark_bls12_377::{Fq, Fr};
use ark_ff::{BigInteger, PrimeField};
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::endomorphism::phi;
use crate::msm::double_scalar_mul;
use crate::{Affine, Projective, ScalarField};

/// BLS12-377 seed `x₀`.
pub const SEED: u64 = 0x8508_c000_0000_0001;

/// Eigenvalue of `phi` on G2: `λ = x₀² - 1`.
pub fn lambda() -> BigUint {
    let seed = BigUint::from(SEED);
    &seed * &seed - 1u32
}

/// Order `r` of G2 (the BLS12-377 scalar field modulus).
pub fn scalar_modulus() -> BigUint {
    BigUint::from_bytes_le(&Fr::MODULUS.to_bytes_le())
}

/// Modulus of the coordinate base field `Fq`.
pub fn base_modulus() -> BigUint {
    BigUint::from_bytes_le(&Fq::MODULUS.to_bytes_le())
}

/// Canonical integer value of a scalar.
pub fn scalar_to_biguint(scalar: &ScalarField) -> BigUint {
    BigUint::from_bytes_le(&scalar.into_bigint().to_bytes_le())
}

/// Short basis of the GLV lattice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lattice {
    pub v1: [BigInt; 2],
    pub v2: [BigInt; 2],
    pub det: BigInt,
}

impl Lattice {
    /// Runs the extended Euclidean algorithm on `(r, λ)` and stops at the first
    /// remainder below `√r`; that row and the shorter of its neighbours form the
    /// basis.
    pub fn precompute(r: &BigUint, lambda: &BigUint) -> Self {
        let sqrt = BigInt::from(r.sqrt());

        // (remainder, t) with remainder ≡ t·λ (mod r)
        let mut prev = (BigInt::from(r.clone()), BigInt::zero());
        let mut cur = (BigInt::from(lambda.clone()), BigInt::one());
        while cur.0 >= sqrt {
            let next = euclid_step(&prev, &cur);
            prev = std::mem::replace(&mut cur, next);
        }

        let v1 = [cur.0.clone(), -&cur.1];
        let next = euclid_step(&prev, &cur);
        let norm = |row: &(BigInt, BigInt)| &row.0 * &row.0 + &row.1 * &row.1;
        let v2 = if norm(&prev) < norm(&next) {
            [prev.0.clone(), -&prev.1]
        } else {
            [next.0.clone(), -&next.1]
        };

        let det = &v1[0] * &v2[1] - &v1[1] * &v2[0];
        Self { v1, v2, det }
    }

    /// Splits `s` into `[s1, s2]` with `s1 + λ·s2 ≡ s (mod r)`.
    ///
    /// The halves may be negative; the caller normalizes signs.
    pub fn split(&self, s: &BigInt) -> [BigInt; 2] {
        let c1 = round_div(&(s * &self.v2[1]), &self.det);
        let c2 = round_div(&-(s * &self.v1[1]), &self.det);

        let s1 = s - &c1 * &self.v1[0] - &c2 * &self.v2[0];
        let s2 = -(&c1 * &self.v1[1]) - &c2 * &self.v2[1];
        [s1, s2]
    }
}

fn euclid_step(prev: &(BigInt, BigInt), cur: &(BigInt, BigInt)) -> (BigInt, BigInt) {
    let q = &prev.0 / &cur.0;
    (&prev.0 - &q * &cur.0, &prev.1 - &q * &cur.1)
}

/// Nearest integer to `num / den`, ties rounded up.
fn round_div(num: &BigInt, den: &BigInt) -> BigInt {
    let (num, den) = if den.is_negative() {
        (-num, -den)
    } else {
        (num.clone(), den.clone())
    };
    let num: BigInt = num * 2 + &den;
    num.div_floor(&(den * 2))
}

/// Lattice for `(r, λ)` of G2, built on first use.
pub fn lattice() -> &'static Lattice {
    static LATTICE: OnceLock<Lattice> = OnceLock::new();
    LATTICE.get_or_init(|| Lattice::precompute(&scalar_modulus(), &lambda()))
}

/// Splits a scalar against the G2 lattice.
pub fn split_scalar(scalar: &BigUint) -> [BigInt; 2] {
    lattice().split(&BigInt::from(scalar.clone()))
}

/// `[s]P` computed as `[s1]P + [s2]phi(P)` with Shamir's trick.
pub fn mul_glv(point: &Affine, scalar: &ScalarField) -> Projective {
    let [s1, s2] = split_scalar(&scalar_to_biguint(scalar));

    let mut p = *point;
    let mut phi_p = phi(point);
    if s1.is_negative() {
        p = -p;
    }
    if s2.is_negative() {
        phi_p = -phi_p;
    }
    double_scalar_mul(s1.magnitude(), &p, s2.magnitude(), &phi_p)
}
