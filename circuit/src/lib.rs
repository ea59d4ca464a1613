//! # BLS12-377 G2 Arithmetic Gadgets
//!
//! In-circuit group law and scalar multiplication for BLS12-377 G2, written
//! for circuits whose native field is the BLS12-377 base field `Fq` (the
//! BW6-761 scalar field). G2 lives on a twist over `Fq2`, so every coordinate
//! is a pair of native variables.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use circuit::{scalar_mul, AlgebraOption, Builder, CircuitPoint, NativeField};
//! use curve::{random_point, scalar_to_biguint, RandomField, ScalarField};
//! use frontend::from_biguint;
//!
//! let mut rng = rand::rng();
//! let point = random_point(&mut rng);
//! let scalar = scalar_to_biguint(&ScalarField::random(&mut rng));
//!
//! let mut b = Builder::<NativeField>::new();
//! let q = CircuitPoint::assign(&mut b, &point);
//! let s = b.witness(from_biguint(&scalar));
//! let r = scalar_mul(&mut b, &q, s, &[AlgebraOption::CompleteArithmetic])?;
//!
//! b.check()?;
//! ```
//!
//! See `examples/g2_scalar_mul.rs` for a run that also reports gate counts.
//!
//! ## Scalar Multiplication
//!
//! [`scalar_mul`] dispatches on whether the scalar is a build-time constant:
//!
//! - **Witness scalar**: the GLV split `s = s1 + λ·s2 (mod r)` is computed by
//!   the [`DecomposeScalarG2`] hint and checked by one native equation
//!   `s1 + λ·s2 = s + r·k`. Both halves are bit-decomposed and consumed two at
//!   a time with `phi`. The gate count does not depend on the scalar.
//! - **Constant scalar**: the split runs natively while the circuit is built
//!   and the loop indexes a four-entry table `±q ± phi(q)` with known indices.
//!
//! [`scalar_mul_base`] multiplies the generator using the precomputed table of
//! its doublings and needs no decomposition.
//!
//! ## Completeness
//!
//! By default the incomplete addition formulas are used. They assume neither
//! operand is the identity and the operands have distinct x coordinates; a
//! violation leaves the circuit unsatisfiable rather than producing a wrong
//! point. Passing [`AlgebraOption::CompleteArithmetic`] switches to unified
//! addition where an operand may degenerate, and makes the identity `(0, 0)`
//! a valid input.
//!
//! ## Modules
//!
//! - `fields_e2`: [`CircuitFp2`], `Fq2` arithmetic over native variables
//! - `point_ops`: [`CircuitPoint`], the group law, `phi`, `psi`, G2 membership
//! - `scalar_decomposition`: the GLV hint and its constraint
//! - `scalar_mul`: variable and constant scalar multiplication
//! - `fixed_base`: generator multiplication
//! - `config`: [`AlgebraOption`] and [`AlgebraConfig`]
//! - `inner`: [`InnerCurveConfig`], curve constants keyed by native modulus

mod config;
mod error;
mod fields_e2;
mod fixed_base;
mod inner;
mod point_ops;
mod scalar_decomposition;
mod scalar_mul;

pub use config::{AlgebraConfig, AlgebraOption};
pub use error::{CircuitError, ConfigError};
pub use fields_e2::CircuitFp2;
pub use fixed_base::scalar_mul_base;
pub use frontend::{Builder, FrontendError, Variable};
pub use inner::{inner_curve_config, InnerCurveConfig};
pub use point_ops::CircuitPoint;
pub use scalar_decomposition::{decompose_scalar, DecomposeScalarG2, DecomposedScalar};
pub use scalar_mul::{scalar_mul, Scalar};

/// Native field of the circuits these gadgets target.
pub type NativeField = curve::Fq;
