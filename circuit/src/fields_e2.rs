//! In-circuit arithmetic over `Fq2 = Fq[u]/(u^2 + 5)`.
//!
//! An element is a pair of native variables `(a0, a1)` with value `a0 + a1·u`.

use ark_ff::PrimeField;
use curve::{BaseField, Fq, NONRESIDUE};
use frontend::{from_biguint, to_biguint, Builder, Variable};

/// Maps a BLS12-377 base field element into the native field.
pub(crate) fn lift<F: PrimeField>(value: &Fq) -> F {
    from_biguint(&to_biguint(value))
}

fn nonresidue<F: PrimeField>() -> F {
    -F::from(NONRESIDUE.unsigned_abs())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CircuitFp2<F: PrimeField> {
    pub a0: Variable<F>,
    pub a1: Variable<F>,
}

impl<F: PrimeField> CircuitFp2<F> {
    pub fn from_coeffs(a0: F, a1: F) -> Self {
        Self {
            a0: Variable::Constant(a0),
            a1: Variable::Constant(a1),
        }
    }

    pub fn constant(value: &BaseField) -> Self {
        Self::from_coeffs(lift(&value.c0), lift(&value.c1))
    }

    pub fn zero() -> Self {
        Self::from_coeffs(F::zero(), F::zero())
    }

    pub fn one() -> Self {
        Self::from_coeffs(F::one(), F::zero())
    }

    /// Allocates both coefficients as witnesses.
    pub fn assign(b: &mut Builder<F>, value: &BaseField) -> Self {
        Self {
            a0: b.witness(lift(&value.c0)),
            a1: b.witness(lift(&value.c1)),
        }
    }

    pub fn add(&self, b: &mut Builder<F>, other: &Self) -> Self {
        Self {
            a0: b.add(self.a0, other.a0),
            a1: b.add(self.a1, other.a1),
        }
    }

    pub fn sub(&self, b: &mut Builder<F>, other: &Self) -> Self {
        Self {
            a0: b.sub(self.a0, other.a0),
            a1: b.sub(self.a1, other.a1),
        }
    }

    pub fn neg(&self, b: &mut Builder<F>) -> Self {
        Self {
            a0: b.neg(self.a0),
            a1: b.neg(self.a1),
        }
    }

    pub fn double(&self, b: &mut Builder<F>) -> Self {
        self.mul_by_fp(b, F::from(2u64))
    }

    /// Karatsuba multiplication: three native products.
    pub fn mul(&self, b: &mut Builder<F>, other: &Self) -> Self {
        let v0 = b.mul(self.a0, other.a0);
        let v1 = b.mul(self.a1, other.a1);
        let sa = b.add(self.a0, self.a1);
        let so = b.add(other.a0, other.a1);
        let cross = b.mul(sa, so);

        let c0 = b.linear(F::one(), v0, nonresidue(), v1, F::zero(), "fp2_mul");
        let c1 = b.sub(cross, v0);
        let c1 = b.sub(c1, v1);
        Self { a0: c0, a1: c1 }
    }

    /// Two native products: `c0 = (a0 + a1)(a0 + β·a1) - (1 + β)·a0·a1`,
    /// `c1 = 2·a0·a1`.
    pub fn square(&self, b: &mut Builder<F>) -> Self {
        let beta = nonresidue::<F>();
        let s = b.add(self.a0, self.a1);
        let t = b.linear(F::one(), self.a0, beta, self.a1, F::zero(), "fp2_square");
        let st = b.mul(s, t);
        let prod = b.mul(self.a0, self.a1);

        let c0 = b.linear(F::one(), st, -(F::one() + beta), prod, F::zero(), "fp2_square");
        let c1 = b.mul_const(prod, F::from(2u64));
        Self { a0: c0, a1: c1 }
    }

    /// Scales both coefficients by a native constant.
    pub fn mul_by_fp(&self, b: &mut Builder<F>, k: F) -> Self {
        Self {
            a0: b.mul_const(self.a0, k),
            a1: b.mul_const(self.a1, k),
        }
    }

    pub fn conjugate(&self, b: &mut Builder<F>) -> Self {
        Self {
            a0: self.a0,
            a1: b.neg(self.a1),
        }
    }

    /// `num / den` assuming `den != 0`. The quotient is a witness checked by a
    /// single extension multiplication.
    pub fn div_unchecked(b: &mut Builder<F>, num: &Self, den: &Self) -> Self {
        if let Some(inv) = den.constant_inverse() {
            return num.mul(b, &inv);
        }

        let (q0, q1) = num
            .value()
            .zip(den.value())
            .map(|(n, d)| divide(n, d))
            .unwrap_or_default();
        let quotient = Self {
            a0: b.witness(q0),
            a1: b.witness(q1),
        };
        let check = quotient.mul(b, den);
        check.assert_is_equal(b, num);
        quotient
    }

    fn constant_inverse(&self) -> Option<Self> {
        let (d0, d1) = (self.a0.as_constant()?, self.a1.as_constant()?);
        let (q0, q1) = divide((F::one(), F::zero()), (d0, d1));
        if q0.is_zero() && q1.is_zero() {
            return None;
        }
        Some(Self::from_coeffs(q0, q1))
    }

    /// Boolean: both coefficients are zero.
    pub fn is_zero(&self, b: &mut Builder<F>) -> Variable<F> {
        let z0 = b.is_zero(self.a0);
        let z1 = b.is_zero(self.a1);
        b.and(z0, z1)
    }

    /// `cond ? x : y`
    pub fn select(b: &mut Builder<F>, cond: Variable<F>, x: &Self, y: &Self) -> Self {
        Self {
            a0: b.select(cond, x.a0, y.a0),
            a1: b.select(cond, x.a1, y.a1),
        }
    }

    /// `table[b0 + 2·b1]`
    pub fn lookup2(b: &mut Builder<F>, b0: Variable<F>, b1: Variable<F>, table: [&Self; 4]) -> Self {
        Self {
            a0: b.lookup2(b0, b1, table.map(|e| e.a0)),
            a1: b.lookup2(b0, b1, table.map(|e| e.a1)),
        }
    }

    pub fn assert_is_equal(&self, b: &mut Builder<F>, other: &Self) {
        b.assert_is_equal(self.a0, other.a0);
        b.assert_is_equal(self.a1, other.a1);
    }

    /// Native coefficients, if assigned.
    pub fn value(&self) -> Option<(F, F)> {
        self.a0.value().zip(self.a1.value())
    }

    /// The assigned value as an `Fq2` element.
    pub fn to_base_field(&self) -> Option<BaseField> {
        let (a0, a1) = self.value()?;
        Some(curve::from_coeffs([
            from_biguint(&to_biguint(&a0)),
            from_biguint(&to_biguint(&a1)),
        ]))
    }
}

/// `n / d` over `F[u]/(u^2 - β)`; returns zero when `d` is zero.
fn divide<F: PrimeField>(n: (F, F), d: (F, F)) -> (F, F) {
    let beta = nonresidue::<F>();
    let norm = d.0 * d.0 - beta * d.1 * d.1;
    let Some(inv) = norm.inverse() else {
        return (F::zero(), F::zero());
    };
    // n · conj(d) / norm
    let c0 = n.0 * d.0 - beta * n.1 * d.1;
    let c1 = n.1 * d.0 - n.0 * d.1;
    (c0 * inv, c1 * inv)
}
