//! Precomputed multiples of the G2 generator.

use std::sync::OnceLock;

use ark_bls12_377::Fr;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{BigInteger, PrimeField};

use crate::{Affine, Projective};

/// Number of doublings of the generator stored in the table.
pub const GENERATOR_TABLE_BITS: usize = Fr::MODULUS_BIT_SIZE as usize;

/// Affine multiples of the generator used by fixed-base scalar multiplication.
#[derive(Clone, Debug)]
pub struct GeneratorTable {
    powers: Vec<Affine>,
    odd_multiples: [Affine; 4],
}

impl GeneratorTable {
    fn build() -> Self {
        let g = Affine::generator();

        let mut doublings = Vec::with_capacity(GENERATOR_TABLE_BITS);
        let mut acc = g.into_group();
        for _ in 0..GENERATOR_TABLE_BITS {
            doublings.push(acc);
            acc = acc + acc;
        }
        let powers = Projective::normalize_batch(&doublings);

        let g2 = g + g;
        let odd = [g.into_group(), g2 + g, g2 + g2 + g, g2 + g2 + g2 + g];
        let odd = Projective::normalize_batch(&odd);

        Self {
            powers,
            odd_multiples: [odd[0], odd[1], odd[2], odd[3]],
        }
    }

    /// `2^i * G` for `i` in `0..GENERATOR_TABLE_BITS`.
    pub fn powers(&self) -> &[Affine] {
        &self.powers
    }

    /// `[G, 3G, 5G, 7G]`
    pub fn odd_multiples(&self) -> &[Affine; 4] {
        &self.odd_multiples
    }
}

/// Returns the process-wide generator table, building it on first use.
pub fn generator_table() -> &'static GeneratorTable {
    static TABLE: OnceLock<GeneratorTable> = OnceLock::new();
    TABLE.get_or_init(GeneratorTable::build)
}

/// Computes `scalar * G` by summing table entries for the set bits.
pub fn mul_generator_affine(scalar: &Fr) -> Affine {
    let bits = scalar.into_bigint();
    let mut result = Projective::default();
    for (i, power) in generator_table().powers().iter().enumerate() {
        if bits.get_bit(i) {
            result += power;
        }
    }
    result.into_affine()
}
