//! Hint system.
//!
//! Hints are deterministic computations that happen on the prover side. Their
//! outputs are allocated as fresh, unconstrained witness wires: the gadget that
//! calls a hint is responsible for constraining what it returns.

use num_bigint::{BigInt, BigUint};

use crate::error::FrontendError;

pub type HintId = &'static str;

/// Prover-side computation with a fixed number of inputs and outputs.
pub trait Hint: Send + Sync {
    /// Stable identifier, used to look up overrides.
    fn id(&self) -> HintId;

    /// `(n_inputs, n_outputs)`
    fn arity(&self) -> (usize, usize);

    /// Computes the outputs from canonical input values. `modulus` is the native
    /// field modulus; outputs may be negative and are reduced by the caller.
    fn execute(
        &self,
        modulus: &BigUint,
        inputs: &[BigUint],
        outputs: &mut [BigInt],
    ) -> Result<(), FrontendError>;
}
