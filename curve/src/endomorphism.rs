//! Efficient endomorphisms of BLS12-377 G2.

use ark_bls12_377::Fq;
use ark_ff::MontFp;

use crate::basefield::{conjugate, mul_by_fp};
use crate::Affine;

/// Primitive cube root of unity in `Fq` for which `phi` acts as `[λ]` on G2.
pub const OMEGA: Fq = MontFp!(
    "258664426012969093929703085429980814127835149614277183275038967946009968870203535512256352201271898244626862047231"
);

/// Frobenius twist coefficient applied to the conjugated `x` coordinate by `psi`.
pub const PSI_COEFF_X: Fq = MontFp!(
    "80949648264912719408558363140637477264845294720710499478137287262712535938301461879813459410946"
);

/// Frobenius twist coefficient applied to the conjugated `y` coordinate by `psi`.
pub const PSI_COEFF_Y: Fq = MontFp!(
    "216465761340224619389371505802605247630151569547285782856803747159100223055385581585702401816380679166954762214499"
);

/// `phi(x, y) = (ω·x, y)`; equals `[λ]P` for `P` in G2.
pub fn phi(point: &Affine) -> Affine {
    if point.infinity {
        return *point;
    }
    Affine::new_unchecked(mul_by_fp(&point.x, &OMEGA), point.y)
}

/// Untwist-Frobenius-twist map; equals `[x₀]P` for `P` in G2.
pub fn psi(point: &Affine) -> Affine {
    if point.infinity {
        return *point;
    }
    Affine::new_unchecked(
        mul_by_fp(&conjugate(&point.x), &PSI_COEFF_X),
        mul_by_fp(&conjugate(&point.y), &PSI_COEFF_Y),
    )
}
