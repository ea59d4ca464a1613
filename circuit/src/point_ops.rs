//! Circuit-friendly G2 point operations.
//!
//! Points are affine pairs of [`CircuitFp2`] coordinates; `(0, 0)` is not on the
//! twist and stands for the identity. The incomplete formulas (`add`,
//! `double`, `double_and_add`) divide without checking the denominator: their
//! preconditions are listed on each method and are the caller's
//! responsibility. A violated precondition leaves the circuit unsatisfiable.
//! `add_unified` is complete.

use ark_ec::AffineRepr;
use ark_ff::PrimeField;
use curve::{Affine, BaseField};
use frontend::{from_biguint, Builder, Variable};

use crate::fields_e2::CircuitFp2;
use crate::inner::InnerCurveConfig;

/// G2 point in circuit representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CircuitPoint<F: PrimeField> {
    pub x: CircuitFp2<F>,
    pub y: CircuitFp2<F>,
}

impl<F: PrimeField> CircuitPoint<F> {
    /// The identity `(0, 0)`.
    pub fn identity() -> Self {
        Self {
            x: CircuitFp2::zero(),
            y: CircuitFp2::zero(),
        }
    }

    /// Embeds a native point as constants.
    pub fn constant(point: &Affine) -> Self {
        if point.is_zero() {
            return Self::identity();
        }
        Self {
            x: CircuitFp2::constant(&point.x),
            y: CircuitFp2::constant(&point.y),
        }
    }

    /// Loads a native point as a witness. The identity is assigned as `(0, 0)`.
    pub fn assign(b: &mut Builder<F>, point: &Affine) -> Self {
        let (x, y) = if point.is_zero() {
            (BaseField::from(0u64), BaseField::from(0u64))
        } else {
            (point.x, point.y)
        };
        Self {
            x: CircuitFp2::assign(b, &x),
            y: CircuitFp2::assign(b, &y),
        }
    }

    /// The assigned value as a native point.
    pub fn value(&self) -> Option<Affine> {
        let x = self.x.to_base_field()?;
        let y = self.y.to_base_field()?;
        if x == BaseField::from(0u64) && y == BaseField::from(0u64) {
            return Some(Affine::identity());
        }
        Some(Affine::new_unchecked(x, y))
    }

    /// Boolean: the point is `(0, 0)`.
    pub fn is_identity(&self, b: &mut Builder<F>) -> Variable<F> {
        let zx = self.x.is_zero(b);
        let zy = self.y.is_zero(b);
        b.and(zx, zy)
    }

    pub fn neg(&self, b: &mut Builder<F>) -> Self {
        Self {
            x: self.x,
            y: self.y.neg(b),
        }
    }

    /// `self + q` with the chord formula. Requires `self.x != q.x`.
    pub fn add(&self, b: &mut Builder<F>, q: &Self) -> Self {
        let num = q.y.sub(b, &self.y);
        let den = q.x.sub(b, &self.x);
        let slope = CircuitFp2::div_unchecked(b, &num, &den);
        self.finish_slope(b, &slope, &q.x)
    }

    /// `R = (λ² - x1 - x2, λ(x1 - x3) - y1)`
    fn finish_slope(&self, b: &mut Builder<F>, slope: &CircuitFp2<F>, other_x: &CircuitFp2<F>) -> Self {
        let xs = self.x.add(b, other_x);
        let x3 = slope.square(b).sub(b, &xs);
        let dx = self.x.sub(b, &x3);
        let y3 = slope.mul(b, &dx).sub(b, &self.y);
        Self { x: x3, y: y3 }
    }

    /// Complete addition.
    ///
    /// The slope numerator and denominator are `(x1 + x2)² - x1·x2` and
    /// `y1 + y2`, which covers doubling. When `y1 + y2 = 0` the chord slope is
    /// used instead; if its denominator vanishes too the operands are mutually
    /// inverse. `y1 + y2 = 0` alone does not imply `O`: `p` and `-phi(p)` have
    /// opposite y and distinct x, and their sum is a regular point.
    /// Degenerate cases are folded in by selectors, in this order of
    /// precedence: `self = O` gives `q`, `q = O` gives `self`, `self = -q`
    /// gives `O`.
    pub fn add_unified(&self, b: &mut Builder<F>, q: &Self) -> Self {
        let self_is_o = self.is_identity(b);
        let q_is_o = q.is_identity(b);

        let ys = self.y.add(b, &q.y);
        let ys_is_zero = ys.is_zero(b);

        let xs = self.x.add(b, &q.x);
        let xs2 = xs.square(b);
        let xx = self.x.mul(b, &q.x);
        let tangent_num = xs2.sub(b, &xx);
        let chord_num = q.y.sub(b, &self.y);
        let chord_den = q.x.sub(b, &self.x);

        let num = CircuitFp2::select(b, ys_is_zero, &chord_num, &tangent_num);
        let den = CircuitFp2::select(b, ys_is_zero, &chord_den, &ys);
        let den_is_zero = den.is_zero(b);
        let den = CircuitFp2::select(b, den_is_zero, &CircuitFp2::one(), &den);

        let slope = CircuitFp2::div_unchecked(b, &num, &den);
        let sum = self.finish_slope(b, &slope, &q.x);

        let r = Self::select(b, den_is_zero, &Self::identity(), &sum);
        let r = Self::select(b, q_is_o, self, &r);
        Self::select(b, self_is_o, q, &r)
    }

    /// `2·self` for `y² = x³ + b'`. Requires `self.y != 0`.
    pub fn double(&self, b: &mut Builder<F>) -> Self {
        let xx = self.x.square(b);
        let num = xx.mul_by_fp(b, F::from(3u64));
        let den = self.y.double(b);
        let slope = CircuitFp2::div_unchecked(b, &num, &den);
        self.finish_slope(b, &slope, &self.x)
    }

    /// Doubles `n` times.
    pub fn double_n(&self, b: &mut Builder<F>, n: usize) -> Self {
        let mut p = *self;
        for _ in 0..n {
            p = p.double(b);
        }
        p
    }

    /// `2·self + q` without materializing `self + q`.
    ///
    /// Requires `self.x != q.x` and `self + q` not to share its x coordinate
    /// with `self`.
    pub fn double_and_add(&self, b: &mut Builder<F>, q: &Self) -> Self {
        // λ1 = (y1 - y2) / (x1 - x2), x3 = λ1² - x1 - x2
        let num = self.y.sub(b, &q.y);
        let den = self.x.sub(b, &q.x);
        let l1 = CircuitFp2::div_unchecked(b, &num, &den);
        let xs = self.x.add(b, &q.x);
        let x3 = l1.square(b).sub(b, &xs);

        // λ2 = -λ1 - 2·y1 / (x3 - x1)
        let num = self.y.double(b);
        let den = x3.sub(b, &self.x);
        let l2 = CircuitFp2::div_unchecked(b, &num, &den);
        let l2 = l2.add(b, &l1).neg(b);

        // x4 = λ2² - x1 - x3, y4 = λ2(x1 - x4) - y1
        let xs = self.x.add(b, &x3);
        let x4 = l2.square(b).sub(b, &xs);
        let dx = self.x.sub(b, &x4);
        let y4 = l2.mul(b, &dx).sub(b, &self.y);
        Self { x: x4, y: y4 }
    }

    /// `cond ? p1 : p2` for a boolean `cond`.
    pub fn select(b: &mut Builder<F>, cond: Variable<F>, p1: &Self, p2: &Self) -> Self {
        Self {
            x: CircuitFp2::select(b, cond, &p1.x, &p2.x),
            y: CircuitFp2::select(b, cond, &p1.y, &p2.y),
        }
    }

    /// `table[b0 + 2·b1]`
    pub fn lookup2(b: &mut Builder<F>, b0: Variable<F>, b1: Variable<F>, table: [&Self; 4]) -> Self {
        Self {
            x: CircuitFp2::lookup2(b, b0, b1, table.map(|p| &p.x)),
            y: CircuitFp2::lookup2(b, b0, b1, table.map(|p| &p.y)),
        }
    }

    pub fn assert_is_equal(&self, b: &mut Builder<F>, other: &Self) {
        self.x.assert_is_equal(b, &other.x);
        self.y.assert_is_equal(b, &other.y);
    }

    /// `phi(x, y) = (ω·x, y)`, equal to `[λ]self` on G2.
    pub fn phi(&self, b: &mut Builder<F>, config: &InnerCurveConfig) -> Self {
        let omega = from_biguint(&config.third_root_one);
        Self {
            x: self.x.mul_by_fp(b, omega),
            y: self.y,
        }
    }

    /// `psi(x, y) = (conj(x)·c_x, conj(y)·c_y)`, equal to `[x₀]self` on G2.
    pub fn psi(&self, b: &mut Builder<F>, config: &InnerCurveConfig) -> Self {
        let [cx, cy] = &config.psi_coeffs;
        let x = self.x.conjugate(b).mul_by_fp(b, from_biguint(cx));
        let y = self.y.conjugate(b).mul_by_fp(b, from_biguint(cy));
        Self { x, y }
    }

    /// `[x₀]self` for the BLS seed `x₀ = 0x8508c00000000001`.
    ///
    /// Uses incomplete formulas: `self` must be a non-identity point of G2.
    pub fn scalar_mul_by_seed(&self, b: &mut Builder<F>) -> Self {
        let q = *self;
        let z = q.double(b).add(b, &q);
        let z = z.double_and_add(b, &q);
        let t0 = z.double(b).double(b);
        let z = z.add(b, &t0);
        let t1 = z.double(b).add(b, &z);
        let t0 = t0.add(b, &t1);
        let t0 = t0.double_n(b, 9);
        let z = t0.double_and_add(b, &z);
        let z = z.double_n(b, 45);
        z.double_and_add(b, &q)
    }

    /// Constrains `y² = x³ + b'`.
    pub fn assert_is_on_twist(&self, b: &mut Builder<F>, config: &InnerCurveConfig) {
        let [b0, b1] = &config.twist_b;
        let twist_b = CircuitFp2::from_coeffs(from_biguint(b0), from_biguint(b1));

        let lhs = self.y.square(b);
        let rhs = self.x.square(b).mul(b, &self.x).add(b, &twist_b);
        lhs.assert_is_equal(b, &rhs);
    }

    /// Constrains membership in G2: on the twist and `psi(self) = [x₀]self`.
    pub fn assert_is_on_g2(&self, b: &mut Builder<F>, config: &InnerCurveConfig) {
        self.assert_is_on_twist(b, config);
        let psi = self.psi(b, config);
        let seed = self.scalar_mul_by_seed(b);
        psi.assert_is_equal(b, &seed);
    }
}
