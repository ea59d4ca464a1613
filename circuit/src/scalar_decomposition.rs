//! GLV decomposition of a witness scalar.
//!
//! The split itself runs as a hint. Its outputs `(s1, s2, k)` are untrusted
//! until the circuit checks `s1 + λ·s2 = s + r·k` and bounds both halves by
//! decomposing them into `bitlength(λ) + 1` bits.
//!
//! The hint shifts the lattice split by multiples of `(λ + 1, λ)`, a vector
//! whose image `λ + 1 + λ²` is `r`, until both halves exceed `λ`. The top bits
//! of the halves are then known to be set, which keeps the first steps of the
//! multiplication loop away from the exceptional cases of incomplete addition.

use ark_ff::PrimeField;
use frontend::{from_biguint, Builder, FrontendError, Hint, HintId, Variable};
use num_bigint::{BigInt, BigUint};
use num_traits::Zero;
use tracing::{debug, instrument};

use crate::error::CircuitError;
use crate::inner::InnerCurveConfig;

/// Hint computing `(s1, s2, k)` from a scalar.
pub struct DecomposeScalarG2 {
    config: &'static InnerCurveConfig,
}

impl DecomposeScalarG2 {
    pub const ID: HintId = "decompose_scalar_g2";

    pub fn new(config: &'static InnerCurveConfig) -> Self {
        Self { config }
    }

    /// The hint computation on plain integers.
    pub fn decompose(&self, s: &BigUint) -> [BigInt; 3] {
        let lambda = BigInt::from(self.config.lambda.clone());
        let fr = BigInt::from(self.config.fr.clone());
        let s = BigInt::from(s.clone());

        let [mut s1, mut s2] = self.config.glv_basis.split(&s);
        while !(s1 > lambda && s2 > lambda) {
            s1 += &lambda + 1u32;
            s2 += &lambda;
        }
        let k = (&s1 + &lambda * &s2 - &s) / fr;
        [s1, s2, k]
    }
}

impl Hint for DecomposeScalarG2 {
    fn id(&self) -> HintId {
        Self::ID
    }

    fn arity(&self) -> (usize, usize) {
        (1, 3)
    }

    fn execute(
        &self,
        _modulus: &BigUint,
        inputs: &[BigUint],
        outputs: &mut [BigInt],
    ) -> Result<(), FrontendError> {
        let [s] = inputs else {
            return Err(FrontendError::HintFailed {
                id: Self::ID,
                reason: format!("expected one scalar, got {}", inputs.len()),
            });
        };
        for (out, value) in outputs.iter_mut().zip(self.decompose(s)) {
            *out = value;
        }
        Ok(())
    }
}

/// Half-scalars of a decomposed scalar with their bits, least significant first.
#[derive(Clone, Debug)]
pub struct DecomposedScalar<F: PrimeField> {
    pub s1: Variable<F>,
    pub s2: Variable<F>,
    pub k: Variable<F>,
    pub s1_bits: Vec<Variable<F>>,
    pub s2_bits: Vec<Variable<F>>,
}

/// Decomposes `s` through the hint and constrains the result.
#[instrument(skip_all, level = "debug")]
pub fn decompose_scalar<F: PrimeField>(
    b: &mut Builder<F>,
    config: &'static InnerCurveConfig,
    s: Variable<F>,
) -> Result<DecomposedScalar<F>, CircuitError> {
    let outputs = b.new_hint(&DecomposeScalarG2::new(config), &[s], 3)?;
    let [s1, s2, k] = [outputs[0], outputs[1], outputs[2]];

    // s1 + λ·s2 == s + r·k
    let lhs = b.linear(F::one(), s1, from_biguint(&config.lambda), s2, F::zero(), "glv_relation");
    let rhs = b.linear(F::one(), s, from_biguint(&config.fr), k, F::zero(), "glv_relation");
    b.assert_is_equal(lhs, rhs);

    let nbits = config.half_scalar_bits();
    let s1_bits = b.to_binary(s1, nbits);
    let s2_bits = b.to_binary(s2, nbits);
    debug!(nbits, "scalar decomposed");

    Ok(DecomposedScalar {
        s1,
        s2,
        k,
        s1_bits,
        s2_bits,
    })
}
