//! Constants of the inner curve, derived once per process.

use std::sync::OnceLock;

use curve::{base_modulus, lambda, lattice, scalar_modulus, Lattice, OMEGA, PSI_COEFF_X, PSI_COEFF_Y};
use frontend::to_biguint;
use num_bigint::BigUint;

use crate::error::CircuitError;

/// BLS12-377 G2 parameters as seen from a circuit over its base field.
#[derive(Clone, Debug)]
pub struct InnerCurveConfig {
    /// Modulus of the native field the circuit is defined over.
    pub native_modulus: BigUint,
    /// Eigenvalue of `phi`.
    pub lambda: BigUint,
    /// Order of G2.
    pub fr: BigUint,
    pub glv_basis: Lattice,
    /// Cube root of unity scaling `x` in `phi`.
    pub third_root_one: BigUint,
    pub psi_coeffs: [BigUint; 2],
    /// Coefficients of the twist constant `b'`.
    pub twist_b: [BigUint; 2],
}

impl InnerCurveConfig {
    fn build() -> Self {
        let twist_b = curve::twist_b();
        Self {
            native_modulus: base_modulus(),
            lambda: lambda(),
            fr: scalar_modulus(),
            glv_basis: lattice().clone(),
            third_root_one: to_biguint(&OMEGA),
            psi_coeffs: [to_biguint(&PSI_COEFF_X), to_biguint(&PSI_COEFF_Y)],
            twist_b: [to_biguint(&twist_b.c0), to_biguint(&twist_b.c1)],
        }
    }

    /// Width of the half-scalars produced by the decomposition hint.
    pub fn half_scalar_bits(&self) -> usize {
        self.lambda.bits() as usize + 1
    }
}

/// Looks up the inner-curve constants for a native field modulus.
pub fn inner_curve_config(native_modulus: &BigUint) -> Result<&'static InnerCurveConfig, CircuitError> {
    static CONFIG: OnceLock<InnerCurveConfig> = OnceLock::new();
    let config = CONFIG.get_or_init(InnerCurveConfig::build);
    if &config.native_modulus != native_modulus {
        return Err(CircuitError::UnsupportedField(native_modulus.clone()));
    }
    Ok(config)
}
