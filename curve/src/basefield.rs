use ark_bls12_377::{g2, Fq, Fq2};
use ark_ec::short_weierstrass::SWCurveConfig;

/// BLS12-377 quadratic extension `Fq[u]/(u^2 + 5)`
pub type BaseField = Fq2;

/// Non-residue `u^2` of the extension.
pub const NONRESIDUE: i64 = -5;

/// Builds an extension element from its coefficients `[c0, c1]`.
#[inline]
pub fn from_coeffs(coeffs: [Fq; 2]) -> BaseField {
    Fq2::new(coeffs[0], coeffs[1])
}

/// `c0 - c1*u`
#[inline]
pub fn conjugate(value: &BaseField) -> BaseField {
    Fq2::new(value.c0, -value.c1)
}

/// Scales both coefficients by a base-field element.
#[inline]
pub fn mul_by_fp(value: &BaseField, scalar: &Fq) -> BaseField {
    Fq2::new(value.c0 * scalar, value.c1 * scalar)
}

/// Constant `b'` of the twist `y^2 = x^3 + b'` carrying G2.
#[inline]
pub fn twist_b() -> BaseField {
    <g2::Config as SWCurveConfig>::COEFF_B
}
