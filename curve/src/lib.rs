//! BLS12-377 G2, the inner curve whose arithmetic the `circuit` crate proves.
//!
//! The group law comes from arkworks. This crate adds what the gadgets need on
//! the native side: the GLV lattice and scalar splitting, the `phi` and `psi`
//! endomorphisms, a process-wide table of generator multiples, point encodings
//! and seeded sampling helpers.

mod basefield;
mod encoding;
mod endomorphism;
mod error;
mod generator_table;
mod glv;
mod msm;
mod random;

pub use ark_bls12_377::{Fq, Fr as ScalarField, G2Affine as Affine, G2Projective as Projective};
pub use basefield::{conjugate, from_coeffs, mul_by_fp, twist_b, BaseField, NONRESIDUE};
pub use encoding::{decode_point, encode_point, read_points, write_points, EncodedPoint, PointEncoding};
pub use endomorphism::{phi, psi, OMEGA, PSI_COEFF_X, PSI_COEFF_Y};
pub use error::CurveError;
pub use generator_table::{generator_table, mul_generator_affine, GeneratorTable, GENERATOR_TABLE_BITS};
pub use glv::{
    base_modulus, lambda, lattice, mul_glv, scalar_modulus, scalar_to_biguint, split_scalar, Lattice,
    SEED,
};
pub use msm::double_scalar_mul;
pub use random::{random_point, RandomField};
