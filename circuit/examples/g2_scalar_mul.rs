//! Builds and checks G2 scalar multiplication circuits, reporting their size.
//!
//! Run with `RUST_LOG=circuit=debug` to see per-gadget gate counts.

use ark_ec::{AffineRepr, CurveGroup};
use circuit::{scalar_mul, scalar_mul_base, AlgebraOption, Builder, CircuitPoint, NativeField};
use curve::{random_point, scalar_to_biguint, Affine, RandomField, ScalarField};
use frontend::from_biguint;
use rand::rng;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut rng = rng();
    let point = random_point(&mut rng);
    let scalar = ScalarField::random(&mut rng);
    let s = scalar_to_biguint(&scalar);
    let expected = (point * scalar).into_affine();
    let expected_base = (Affine::generator() * scalar).into_affine();

    for (name, options) in [
        ("incomplete", &[][..]),
        ("complete", &[AlgebraOption::CompleteArithmetic][..]),
    ] {
        let start = Instant::now();
        let mut b = Builder::<NativeField>::new();
        let q = CircuitPoint::assign(&mut b, &point);
        let sv = b.witness(from_biguint(&s));
        let r = scalar_mul(&mut b, &q, sv, options).expect("scalar_mul");
        let build_time = start.elapsed();
        assert_eq!(r.value(), Some(expected));
        b.check().expect("check");

        println!("Variable scalar ({name}): {} gates, {} wires, built in {:?}", b.num_gates(), b.num_wires(), build_time);

        let mut b = Builder::<NativeField>::new();
        let q = CircuitPoint::assign(&mut b, &point);
        let sv = b.constant(from_biguint(&s));
        let r = scalar_mul(&mut b, &q, sv, options).expect("scalar_mul");
        assert_eq!(r.value(), Some(expected));
        b.check().expect("check");

        println!("Constant scalar ({name}): {} gates", b.num_gates());

        let mut b = Builder::<NativeField>::new();
        let sv = b.witness(from_biguint(&s));
        let r = scalar_mul_base(&mut b, sv, options).expect("scalar_mul_base");
        assert_eq!(r.value(), Some(expected_base));
        b.check().expect("check");

        println!("Fixed base ({name}): {} gates", b.num_gates());
    }
    println!("All circuits satisfied.");
}
