//! Fixed-base scalar multiplication against the G2 generator.

use ark_ec::AffineRepr;
use ark_ff::PrimeField;
use curve::{generator_table, Affine};
use frontend::{Builder, Variable};
use tracing::{debug, instrument};

use crate::config::{AlgebraConfig, AlgebraOption};
use crate::error::CircuitError;
use crate::inner::inner_curve_config;
use crate::point_ops::CircuitPoint;
use crate::scalar_mul::add_with;

/// `[s]G` for the G2 generator `G`.
///
/// The scalar is split into `bitlength(r)` bits. Bits 1 and 2 pick the
/// starting point among `G, 3G, 5G, 7G`, every higher bit conditionally adds
/// `2^i·G`, and bit 0 removes the initial `G` when clear.
///
/// Without [`AlgebraOption::CompleteArithmetic`] the scalars `0`, `1` and
/// `r - 1` are not supported: their accumulator meets a table entry with the
/// same x coordinate.
#[instrument(skip_all, level = "debug")]
pub fn scalar_mul_base<F: PrimeField>(
    b: &mut Builder<F>,
    s: Variable<F>,
    options: &[AlgebraOption],
) -> Result<CircuitPoint<F>, CircuitError> {
    let algebra = AlgebraConfig::new(options)?;
    let config = inner_curve_config(&b.field_modulus())?;
    let table = generator_table();

    let start = b.num_gates();
    let nbits = config.fr.bits() as usize;
    let bits = b.to_binary(s, nbits);

    let odd = table.odd_multiples().map(|p| CircuitPoint::constant(&p));
    let mut acc = CircuitPoint::lookup2(b, bits[1], bits[2], [&odd[0], &odd[1], &odd[2], &odd[3]]);

    for (i, power) in table.powers().iter().enumerate().take(nbits).skip(3) {
        let sum = add_with(b, algebra, &acc, &CircuitPoint::constant(power));
        acc = CircuitPoint::select(b, bits[i], &sum, &acc);
    }

    let neg_g = CircuitPoint::constant(&-Affine::generator());
    let corrected = add_with(b, algebra, &neg_g, &acc);
    acc = CircuitPoint::select(b, bits[0], &acc, &corrected);

    debug!(gates = b.num_gates() - start, nbits, "fixed-base scalar multiplication");
    Ok(acc)
}
