use ark_ec::AffineRepr;
use ark_ec::CurveGroup;
use ark_ff::PrimeField;
use rand::Rng;

use crate::{from_coeffs, Affine, BaseField, Fq, ScalarField};

/// Helper trait for sampling random field elements.
pub trait RandomField: Sized {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

// 16 extra bytes keep the bias of the modular reduction negligible.
fn random_prime_field<F: PrimeField, R: Rng + ?Sized>(rng: &mut R) -> F {
    let mut bytes = vec![0u8; (F::MODULUS_BIT_SIZE as usize).div_ceil(8) + 16];
    rng.fill(&mut bytes[..]);
    F::from_le_bytes_mod_order(&bytes)
}

impl RandomField for ScalarField {
    #[inline]
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        random_prime_field(rng)
    }
}

impl RandomField for Fq {
    #[inline]
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        random_prime_field(rng)
    }
}

impl RandomField for BaseField {
    #[inline]
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        from_coeffs([Fq::random(rng), Fq::random(rng)])
    }
}

/// Uniform point of the prime-order subgroup.
pub fn random_point<R: Rng + ?Sized>(rng: &mut R) -> Affine {
    (Affine::generator() * ScalarField::random(rng)).into_affine()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sampling_is_seeded() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(ScalarField::random(&mut a), ScalarField::random(&mut b));
        assert_eq!(BaseField::random(&mut a), BaseField::random(&mut b));
        assert_ne!(ScalarField::random(&mut a), ScalarField::random(&mut a));
    }

    #[test]
    fn test_random_point_in_subgroup() {
        let mut rng = StdRng::seed_from_u64(42);
        let p = random_point(&mut rng);
        assert!(p.is_on_curve());
        assert!(p.is_in_correct_subgroup_assuming_on_curve());
    }
}
