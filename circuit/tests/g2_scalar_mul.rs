use std::sync::Arc;

use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::PrimeField;
use circuit::{
    inner_curve_config, scalar_mul, scalar_mul_base, AlgebraOption, Builder, CircuitError,
    CircuitPoint, ConfigError, DecomposeScalarG2, FrontendError, NativeField,
};
use curve::{base_modulus, random_point, scalar_modulus, scalar_to_biguint, Affine, RandomField, ScalarField};
use frontend::{from_biguint, Hint, HintId};
use num_bigint::{BigInt, BigUint};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

type N = NativeField;

const COMPLETE: &[AlgebraOption] = &[AlgebraOption::CompleteArithmetic];

fn native(p: &Affine, s: &BigUint) -> Affine {
    (*p * ScalarField::from_le_bytes_mod_order(&s.to_bytes_le())).into_affine()
}

fn mul_variable(p: &Affine, s: &BigUint, options: &[AlgebraOption]) -> (Option<Affine>, Builder<N>) {
    let mut b = Builder::<N>::new();
    let q = CircuitPoint::assign(&mut b, p);
    let sv = b.witness(from_biguint(s));
    let r = scalar_mul(&mut b, &q, sv, options).unwrap();
    (r.value(), b)
}

fn mul_constant(p: &Affine, s: &BigUint, options: &[AlgebraOption]) -> (Option<Affine>, Builder<N>) {
    let mut b = Builder::<N>::new();
    let q = CircuitPoint::assign(&mut b, p);
    let sv = b.constant(from_biguint(s));
    let r = scalar_mul(&mut b, &q, sv, options).unwrap();
    (r.value(), b)
}

/// Decomposition hint that perturbs one output of the honest split.
struct TamperedDecomposition {
    honest: DecomposeScalarG2,
    tamper: fn(&mut [BigInt]),
}

impl Hint for TamperedDecomposition {
    fn id(&self) -> HintId {
        DecomposeScalarG2::ID
    }

    fn arity(&self) -> (usize, usize) {
        self.honest.arity()
    }

    fn execute(&self, modulus: &BigUint, inputs: &[BigUint], outputs: &mut [BigInt]) -> Result<(), FrontendError> {
        self.honest.execute(modulus, inputs, outputs)?;
        (self.tamper)(outputs);
        Ok(())
    }
}

fn tampered(tamper: fn(&mut [BigInt])) -> Arc<dyn Hint> {
    let config = inner_curve_config(&base_modulus()).unwrap();
    Arc::new(TamperedDecomposition {
        honest: DecomposeScalarG2::new(config),
        tamper,
    })
}

#[test]
fn test_random_points_and_scalars_match_native() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..3 {
        let p = random_point(&mut rng);
        let s = scalar_to_biguint(&ScalarField::random(&mut rng));
        let expected = native(&p, &s);
        for options in [&[][..], COMPLETE] {
            let (r, b) = mul_variable(&p, &s, options);
            assert_eq!(r, Some(expected));
            assert!(b.check().is_ok());

            let (r, b) = mul_constant(&p, &s, options);
            assert_eq!(r, Some(expected));
            assert!(b.check().is_ok());
        }
    }
}

#[test]
fn test_generator_times_five() {
    let g = Affine::generator();
    let five = BigUint::from(5u32);
    let expected = native(&g, &five);
    for options in [&[][..], COMPLETE] {
        let (r, b) = mul_variable(&g, &five, options);
        assert_eq!(r, Some(expected));
        assert!(b.check().is_ok());

        let (r, b) = mul_constant(&g, &five, options);
        assert_eq!(r, Some(expected));
        assert!(b.check().is_ok());
    }
}

#[test]
fn test_zero_scalar_gives_identity() {
    let g = Affine::generator();
    let zero = BigUint::from(0u32);

    let (r, b) = mul_constant(&g, &zero, &[]);
    assert_eq!(r, Some(Affine::identity()));
    assert!(b.check().is_ok());

    let (r, b) = mul_variable(&g, &zero, COMPLETE);
    assert_eq!(r, Some(Affine::identity()));
    assert!(b.check().is_ok());
}

#[test]
fn test_largest_scalar() {
    let mut rng = StdRng::seed_from_u64(42);
    let p = random_point(&mut rng);
    let s = scalar_modulus() - 1u32;
    let expected = -p;
    for options in [&[][..], COMPLETE] {
        let (r, b) = mul_variable(&p, &s, options);
        assert_eq!(r, Some(expected));
        assert!(b.check().is_ok());

        let (r, b) = mul_constant(&p, &s, options);
        assert_eq!(r, Some(expected));
        assert!(b.check().is_ok());
    }

    let mut b = Builder::<N>::new();
    let sv = b.witness(from_biguint(&s));
    let r = scalar_mul_base(&mut b, sv, COMPLETE).unwrap();
    assert_eq!(r.value(), Some(-Affine::generator()));
    assert!(b.check().is_ok());
}

#[test]
fn test_incomplete_exceptional_scalars_are_unsatisfiable() {
    let mut rng = StdRng::seed_from_u64(42);
    let p = random_point(&mut rng);
    let lambda = curve::lambda();
    let fr = scalar_modulus();

    for s in [BigUint::from(0u32), lambda.clone()] {
        let (_, b) = mul_variable(&p, &s, &[]);
        assert!(matches!(b.check(), Err(FrontendError::Unsatisfied { .. })));
    }

    // The constant path skips the correction for a set low bit at build time.
    let (r, b) = mul_constant(&p, &lambda, &[]);
    assert_eq!(r, Some(curve::phi(&p)));
    assert!(b.check().is_ok());

    for s in [BigUint::from(0u32), BigUint::from(1u32), &fr - 1u32] {
        let mut b = Builder::<N>::new();
        let sv = b.witness(from_biguint(&s));
        scalar_mul_base(&mut b, sv, &[]).unwrap();
        assert!(matches!(b.check(), Err(FrontendError::Unsatisfied { .. })));
    }
}

#[test]
fn test_fixed_base_matches_generator_scalar_mul() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..3 {
        let s = scalar_to_biguint(&ScalarField::random(&mut rng));
        let mut b = Builder::<N>::new();
        let sv = b.witness(from_biguint(&s));
        let base = scalar_mul_base(&mut b, sv, &[]).unwrap();
        let g = CircuitPoint::constant(&Affine::generator());
        let general = scalar_mul(&mut b, &g, sv, &[]).unwrap();

        assert_eq!(base.value(), general.value());
        base.assert_is_equal(&mut b, &general);
        assert!(b.check().is_ok());
    }
}

#[test]
fn test_group_law_identities() {
    let mut rng = StdRng::seed_from_u64(42);
    let p = random_point(&mut rng);
    let q = random_point(&mut rng);

    let mut b = Builder::<N>::new();
    let pv = CircuitPoint::assign(&mut b, &p);
    let qv = CircuitPoint::assign(&mut b, &q);
    let o = CircuitPoint::assign(&mut b, &Affine::identity());

    let neg_p = pv.neg(&mut b);
    assert_eq!(pv.add_unified(&mut b, &neg_p).value(), Some(Affine::identity()));
    assert_eq!(o.add_unified(&mut b, &qv).value(), Some(q));
    assert_eq!(pv.add_unified(&mut b, &o).value(), Some(p));

    let doubled = pv.double(&mut b);
    assert_eq!(doubled.value(), pv.add_unified(&mut b, &pv).value());
    assert_eq!(doubled.value(), Some((p + p).into_affine()));

    let fused = pv.double_and_add(&mut b, &qv);
    let unfused = doubled.add(&mut b, &qv);
    assert_eq!(fused.value(), unfused.value());
    fused.assert_is_equal(&mut b, &unfused);

    assert!(b.check().is_ok());
}

#[test]
fn test_gate_count_does_not_depend_on_scalar() {
    let mut rng = StdRng::seed_from_u64(42);
    let p = random_point(&mut rng);
    let s1 = scalar_to_biguint(&ScalarField::random(&mut rng));
    let s2 = BigUint::from(5u32);

    for options in [&[][..], COMPLETE] {
        let (_, b1) = mul_variable(&p, &s1, options);
        let (_, b2) = mul_variable(&p, &s2, options);

        let mut shape = Builder::<N>::compile_only();
        let q = CircuitPoint::assign(&mut shape, &p);
        let sv = shape.witness(N::from(0u64));
        let r = scalar_mul(&mut shape, &q, sv, options).unwrap();

        assert_eq!(b1.num_gates(), b2.num_gates());
        assert_eq!(b1.num_gates(), shape.num_gates());
        assert_eq!(b1.num_wires(), shape.num_wires());
        assert!(!shape.has_witness());
        assert_eq!(r.value(), None);
    }
}

#[test]
fn test_tampered_half_scalar_is_rejected() {
    let mut rng = StdRng::seed_from_u64(42);
    let p = random_point(&mut rng);
    let s = scalar_to_biguint(&ScalarField::random(&mut rng));

    let mut b = Builder::<N>::new();
    b.override_hint(DecomposeScalarG2::ID, tampered(|out| out[0] += 1u32));
    let q = CircuitPoint::assign(&mut b, &p);
    let sv = b.witness(from_biguint(&s));
    scalar_mul(&mut b, &q, sv, &[]).unwrap();

    assert!(matches!(b.check(), Err(FrontendError::Unsatisfied { .. })));
}

#[test]
fn test_wide_half_scalar_is_rejected() {
    // Adding r to s1 and one to k keeps the linear relation but breaks the bound.
    let mut rng = StdRng::seed_from_u64(42);
    let p = random_point(&mut rng);
    let s = scalar_to_biguint(&ScalarField::random(&mut rng));

    let mut b = Builder::<N>::new();
    b.override_hint(
        DecomposeScalarG2::ID,
        tampered(|out| {
            out[0] += BigInt::from(scalar_modulus());
            out[2] += 1u32;
        }),
    );
    let q = CircuitPoint::assign(&mut b, &p);
    let sv = b.witness(from_biguint(&s));
    scalar_mul(&mut b, &q, sv, &[]).unwrap();

    assert!(matches!(b.check(), Err(FrontendError::Unsatisfied { .. })));
}

#[test]
fn test_hint_arity_mismatch() {
    let config = inner_curve_config(&base_modulus()).unwrap();
    let mut b = Builder::<N>::new();
    let s = b.witness(N::from(7u64));
    let err = b.new_hint(&DecomposeScalarG2::new(config), &[s, s], 3).unwrap_err();
    assert_eq!(
        err,
        FrontendError::HintArity {
            id: DecomposeScalarG2::ID,
            expected_inputs: 1,
            expected_outputs: 3,
            inputs: 2,
            outputs: 3,
        }
    );
}

#[test]
fn test_duplicate_option_fails_before_building() {
    let mut b = Builder::<N>::new();
    let sv = b.witness(N::from(3u64));
    let options = [AlgebraOption::CompleteArithmetic, AlgebraOption::CompleteArithmetic];

    let err = scalar_mul_base(&mut b, sv, &options).unwrap_err();
    assert!(matches!(
        err,
        CircuitError::Config(ConfigError::DuplicateOption(AlgebraOption::CompleteArithmetic))
    ));
    assert_eq!(b.num_gates(), 0);
}

#[test]
fn test_unsupported_native_field() {
    let mut b = Builder::<ScalarField>::new();
    let sv = b.witness(ScalarField::from(3u64));
    let q = CircuitPoint::<ScalarField>::identity();

    let err = scalar_mul(&mut b, &q, sv, &[]).unwrap_err();
    assert!(matches!(err, CircuitError::UnsupportedField(ref m) if *m == scalar_modulus()));
    assert!(matches!(
        scalar_mul_base(&mut b, sv, &[]),
        Err(CircuitError::UnsupportedField(_))
    ));
}

#[test]
fn test_subgroup_check_on_scalar_mul_output() {
    let config = inner_curve_config(&base_modulus()).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let p = random_point(&mut rng);
    let s = scalar_to_biguint(&ScalarField::random(&mut rng));

    let mut b = Builder::<N>::new();
    let q = CircuitPoint::assign(&mut b, &p);
    let sv = b.witness(from_biguint(&s));
    let r = scalar_mul(&mut b, &q, sv, &[]).unwrap();
    r.assert_is_on_g2(&mut b, config);
    assert!(b.check().is_ok());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_decomposition_relation(bytes in proptest::array::uniform32(any::<u8>())) {
        let config = inner_curve_config(&base_modulus()).unwrap();
        let s = BigUint::from_bytes_le(&bytes) % scalar_modulus();
        let [s1, s2, k] = DecomposeScalarG2::new(config).decompose(&s);

        let lambda = BigInt::from(config.lambda.clone());
        prop_assert_eq!(&s1 + &lambda * &s2, BigInt::from(s) + BigInt::from(config.fr.clone()) * k);
        prop_assert!(s1.bits() <= lambda.bits() + 1);
        prop_assert!(s2.bits() <= lambda.bits() + 1);
    }
}
