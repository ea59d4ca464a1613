//! Circuit builder: allocates wires, emits generic gates and runs hints.
//!
//! Every operation folds constant operands into the gate selectors, so an
//! operation whose operands are all constants returns a constant and emits
//! nothing. In witness mode each wire carries its value and [`Builder::check`]
//! evaluates every gate against the assignment; a builder made with
//! [`Builder::compile_only`] only records the circuit shape.

use std::collections::HashMap;
use std::sync::Arc;

use ark_ff::{BigInteger, PrimeField};
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::Zero;
use tracing::{debug, warn};

use crate::error::FrontendError;
use crate::gate::Gate;
use crate::hint::{Hint, HintId};
use crate::variable::{Variable, Wire};

pub struct Builder<F: PrimeField> {
    assignment: Vec<Option<F>>,
    gates: Vec<Gate<F>>,
    overrides: HashMap<HintId, Arc<dyn Hint>>,
    witness_mode: bool,
}

impl<F: PrimeField> Default for Builder<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: PrimeField> Builder<F> {
    /// Builder that records wire values.
    pub fn new() -> Self {
        Self::with_mode(true)
    }

    /// Builder that only records the circuit shape; wires carry no values and
    /// hints are not run.
    pub fn compile_only() -> Self {
        Self::with_mode(false)
    }

    fn with_mode(witness_mode: bool) -> Self {
        Self {
            assignment: Vec::new(),
            gates: Vec::new(),
            overrides: HashMap::new(),
            witness_mode,
        }
    }

    pub fn has_witness(&self) -> bool {
        self.witness_mode
    }

    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }

    pub fn num_wires(&self) -> usize {
        self.assignment.len()
    }

    pub fn gates(&self) -> &[Gate<F>] {
        &self.gates
    }

    pub fn field_modulus(&self) -> BigUint {
        BigUint::from_bytes_le(&F::MODULUS.to_bytes_le())
    }

    /// Canonical value of `v` if it is a compile-time constant.
    pub fn constant_value(&self, v: &Variable<F>) -> Option<BigUint> {
        v.as_constant().map(|c| to_biguint(&c))
    }

    /// Allocates a witness wire. The value is dropped in compile-only mode.
    pub fn witness(&mut self, value: F) -> Variable<F> {
        self.alloc(Some(value))
    }

    pub fn constant(&self, value: F) -> Variable<F> {
        Variable::Constant(value)
    }

    fn alloc(&mut self, value: Option<F>) -> Variable<F> {
        let value = if self.witness_mode { value } else { None };
        let index = self.assignment.len();
        self.assignment.push(value);
        Variable::Witness(Wire { index, value })
    }

    /// Records `ql·l + qr·r + qo·o + qm·l·r + qc = 0`, folding constant
    /// operands into the selectors first.
    fn emit(&mut self, operands: [Variable<F>; 3], selectors: [F; 5], label: &'static str) {
        let [l, r, o] = operands;
        let [mut ql, mut qr, mut qo, mut qm, mut qc] = selectors;

        match (l.as_constant(), r.as_constant()) {
            (Some(cl), Some(cr)) => qc += qm * cl * cr,
            (Some(cl), None) => qr += qm * cl,
            (None, Some(cr)) => ql += qm * cr,
            (None, None) => {}
        }
        if l.is_constant() || r.is_constant() {
            qm = F::zero();
        }
        for (q, v) in [(&mut ql, l), (&mut qr, r), (&mut qo, o)] {
            if let Some(c) = v.as_constant() {
                qc += *q * c;
                *q = F::zero();
            }
        }

        let wires = [l.wire(), r.wire(), o.wire()];
        if wires.iter().all(Option::is_none) && qc.is_zero() {
            return;
        }
        self.gates.push(Gate {
            wires,
            ql,
            qr,
            qo,
            qm,
            qc,
            label,
        });
    }

    /// `ka·a + kb·b + c`
    pub fn linear(
        &mut self,
        ka: F,
        a: Variable<F>,
        kb: F,
        b: Variable<F>,
        c: F,
        label: &'static str,
    ) -> Variable<F> {
        let a = if ka.is_zero() { Variable::Constant(F::zero()) } else { a };
        let b = if kb.is_zero() { Variable::Constant(F::zero()) } else { b };
        if let (Some(x), Some(y)) = (a.as_constant(), b.as_constant()) {
            return Variable::Constant(ka * x + kb * y + c);
        }

        let value = a.value().zip(b.value()).map(|(x, y)| ka * x + kb * y + c);
        let out = self.alloc(value);
        self.emit([a, b, out], [ka, kb, -F::one(), F::zero(), c], label);
        out
    }

    pub fn add(&mut self, a: Variable<F>, b: Variable<F>) -> Variable<F> {
        self.linear(F::one(), a, F::one(), b, F::zero(), "add")
    }

    pub fn sub(&mut self, a: Variable<F>, b: Variable<F>) -> Variable<F> {
        self.linear(F::one(), a, -F::one(), b, F::zero(), "sub")
    }

    pub fn neg(&mut self, a: Variable<F>) -> Variable<F> {
        self.linear(-F::one(), a, F::zero(), a, F::zero(), "neg")
    }

    pub fn mul_const(&mut self, a: Variable<F>, k: F) -> Variable<F> {
        if k.is_one() {
            return a;
        }
        self.linear(k, a, F::zero(), a, F::zero(), "mul_const")
    }

    pub fn mul(&mut self, a: Variable<F>, b: Variable<F>) -> Variable<F> {
        match (a.as_constant(), b.as_constant()) {
            (Some(x), Some(y)) => Variable::Constant(x * y),
            (Some(x), None) => self.mul_const(b, x),
            (None, Some(y)) => self.mul_const(a, y),
            (None, None) => {
                let value = a.value().zip(b.value()).map(|(x, y)| x * y);
                let out = self.alloc(value);
                self.emit([a, b, out], [F::zero(), F::zero(), -F::one(), F::one(), F::zero()], "mul");
                out
            }
        }
    }

    /// `a / b` for `b != 0`. The quotient is a witness constrained by
    /// `q·b = a`; a zero divisor makes the circuit unsatisfiable unless `a = 0`.
    pub fn div_unchecked(&mut self, a: Variable<F>, b: Variable<F>) -> Variable<F> {
        if let Some(y) = b.as_constant() {
            if let Some(inv) = y.inverse() {
                return self.mul_const(a, inv);
            }
        }

        let value = a
            .value()
            .zip(b.value())
            .map(|(x, y)| y.inverse().map_or(F::zero(), |inv| x * inv));
        let q = match (a.as_constant(), b.as_constant()) {
            (Some(_), Some(_)) => Variable::Constant(value.unwrap_or_default()),
            _ => self.alloc(value),
        };
        self.emit([q, b, a], [F::zero(), F::zero(), -F::one(), F::one(), F::zero()], "div");
        q
    }

    /// Boolean `a == 0`. Uses a witness inverse and two gates.
    pub fn is_zero(&mut self, a: Variable<F>) -> Variable<F> {
        if let Some(x) = a.as_constant() {
            return Variable::Constant(F::from(x.is_zero()));
        }

        let inv = self.alloc(a.value().map(|x| x.inverse().unwrap_or(F::zero())));
        let out = self.alloc(a.value().map(|x| F::from(x.is_zero())));
        // a·inv + out - 1 = 0
        self.emit([a, inv, out], [F::zero(), F::zero(), F::one(), F::one(), -F::one()], "is_zero");
        // a·out = 0
        self.emit(
            [a, out, Variable::Constant(F::zero())],
            [F::zero(), F::zero(), F::zero(), F::one(), F::zero()],
            "is_zero",
        );
        out
    }

    /// Logical and of two booleans.
    pub fn and(&mut self, a: Variable<F>, b: Variable<F>) -> Variable<F> {
        self.mul(a, b)
    }

    /// `cond ? x : y` for a boolean `cond`.
    pub fn select(&mut self, cond: Variable<F>, x: Variable<F>, y: Variable<F>) -> Variable<F> {
        if let Some(c) = cond.as_constant() {
            return if c.is_zero() { y } else { x };
        }
        if let (Some(cx), Some(cy)) = (x.as_constant(), y.as_constant()) {
            if cx == cy {
                return x;
            }
        }
        let diff = self.sub(x, y);
        let picked = self.mul(cond, diff);
        self.add(picked, y)
    }

    /// `table[b0 + 2·b1]` for booleans `b0, b1`.
    pub fn lookup2(&mut self, b0: Variable<F>, b1: Variable<F>, table: [Variable<F>; 4]) -> Variable<F> {
        let low = self.select(b0, table[1], table[0]);
        let high = self.select(b0, table[3], table[2]);
        self.select(b1, high, low)
    }

    pub fn assert_is_equal(&mut self, a: Variable<F>, b: Variable<F>) {
        self.emit(
            [a, b, Variable::Constant(F::zero())],
            [F::one(), -F::one(), F::zero(), F::zero(), F::zero()],
            "assert_is_equal",
        );
    }

    pub fn assert_is_boolean(&mut self, a: Variable<F>) {
        // a·a - a = 0
        self.emit(
            [a, a, Variable::Constant(F::zero())],
            [-F::one(), F::zero(), F::zero(), F::one(), F::zero()],
            "assert_is_boolean",
        );
    }

    /// Decomposes `v` into exactly `n` boolean wires, least significant first.
    ///
    /// The recomposition is constrained equal to `v`, so a value that does not
    /// fit in `n` bits leaves the circuit unsatisfiable.
    pub fn to_binary(&mut self, v: Variable<F>, n: usize) -> Vec<Variable<F>> {
        let repr = v.value().map(|x| x.into_bigint());

        let bits: Vec<Variable<F>> = match v.as_constant() {
            Some(_) => (0..n)
                .map(|i| Variable::Constant(F::from(repr.is_some_and(|r| r.get_bit(i)))))
                .collect(),
            None => (0..n)
                .map(|i| {
                    let bit = self.alloc(repr.map(|r| F::from(r.get_bit(i))));
                    self.assert_is_boolean(bit);
                    bit
                })
                .collect(),
        };

        let mut acc = Variable::Constant(F::zero());
        let mut weight = F::one();
        for bit in &bits {
            acc = self.linear(F::one(), acc, weight, *bit, F::zero(), "to_binary");
            weight = weight + weight;
        }
        self.assert_is_equal(acc, v);
        bits
    }

    /// Replaces the implementation of hint `id` for this builder.
    pub fn override_hint(&mut self, id: HintId, hint: Arc<dyn Hint>) {
        self.overrides.insert(id, hint);
    }

    /// Runs `hint` on `inputs` and allocates its outputs as unconstrained wires.
    ///
    /// The call is rejected when `inputs.len()` or `n_outputs` disagree with
    /// the hint's arity. Negative outputs are reduced modulo the native field.
    pub fn new_hint(
        &mut self,
        hint: &dyn Hint,
        inputs: &[Variable<F>],
        n_outputs: usize,
    ) -> Result<Vec<Variable<F>>, FrontendError> {
        let (expected_inputs, expected_outputs) = hint.arity();
        if inputs.len() != expected_inputs || n_outputs != expected_outputs {
            return Err(FrontendError::HintArity {
                id: hint.id(),
                expected_inputs,
                expected_outputs,
                inputs: inputs.len(),
                outputs: n_outputs,
            });
        }

        if !self.witness_mode {
            return Ok((0..n_outputs).map(|_| self.alloc(None)).collect());
        }

        let values = inputs
            .iter()
            .map(|v| {
                v.value()
                    .map(|x| to_biguint(&x))
                    .ok_or_else(|| FrontendError::MissingWitness(v.wire().unwrap_or_default()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let modulus = self.field_modulus();
        let mut outputs = vec![BigInt::zero(); n_outputs];
        match self.overrides.get(hint.id()).cloned() {
            Some(replacement) => replacement.execute(&modulus, &values, &mut outputs)?,
            None => hint.execute(&modulus, &values, &mut outputs)?,
        }
        debug!(hint = hint.id(), n_outputs, "hint executed");

        Ok(outputs
            .iter()
            .map(|out| self.alloc(Some(from_bigint(out))))
            .collect())
    }

    /// Evaluates every gate against the assignment.
    pub fn check(&self) -> Result<(), FrontendError> {
        debug!(gates = self.gates.len(), wires = self.assignment.len(), "checking circuit");
        for (index, gate) in self.gates.iter().enumerate() {
            match gate.is_satisfied(&self.assignment) {
                Ok(true) => {}
                Ok(false) => {
                    warn!(index, label = gate.label, "unsatisfied gate");
                    return Err(FrontendError::Unsatisfied {
                        index,
                        label: gate.label,
                    });
                }
                Err(wire) => return Err(FrontendError::MissingWitness(wire)),
            }
        }
        Ok(())
    }
}

/// Canonical integer value of a field element.
pub fn to_biguint<F: PrimeField>(x: &F) -> BigUint {
    BigUint::from_bytes_le(&x.into_bigint().to_bytes_le())
}

/// Reduces an unsigned integer into the field.
pub fn from_biguint<F: PrimeField>(x: &BigUint) -> F {
    F::from_le_bytes_mod_order(&x.to_bytes_le())
}

/// Reduces a signed integer into the field.
pub fn from_bigint<F: PrimeField>(x: &BigInt) -> F {
    let modulus = BigInt::from(BigUint::from_bytes_le(&F::MODULUS.to_bytes_le()));
    let reduced = x.mod_floor(&modulus);
    from_biguint(reduced.magnitude())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bls12_377::Fq;
    use ark_ff::{One, Zero};

    fn fq(v: u64) -> Fq {
        Fq::from(v)
    }

    struct Square;

    impl Hint for Square {
        fn id(&self) -> HintId {
            "square"
        }

        fn arity(&self) -> (usize, usize) {
            (1, 2)
        }

        fn execute(
            &self,
            _modulus: &BigUint,
            inputs: &[BigUint],
            outputs: &mut [BigInt],
        ) -> Result<(), FrontendError> {
            let x = BigInt::from(inputs[0].clone());
            outputs[0] = &x * &x;
            outputs[1] = -x;
            Ok(())
        }
    }

    struct Broken;

    impl Hint for Broken {
        fn id(&self) -> HintId {
            "square"
        }

        fn arity(&self) -> (usize, usize) {
            (1, 2)
        }

        fn execute(&self, _: &BigUint, _: &[BigUint], _: &mut [BigInt]) -> Result<(), FrontendError> {
            Err(FrontendError::HintFailed {
                id: "square",
                reason: "refused".into(),
            })
        }
    }

    #[test]
    fn test_arithmetic() {
        let mut b = Builder::<Fq>::new();
        let x = b.witness(fq(6));
        let y = b.witness(fq(3));

        let sum = b.add(x, y);
        let diff = b.sub(x, y);
        let prod = b.mul(x, y);
        let quot = b.div_unchecked(x, y);
        let neg = b.neg(x);

        assert_eq!(sum.value(), Some(fq(9)));
        assert_eq!(diff.value(), Some(fq(3)));
        assert_eq!(prod.value(), Some(fq(18)));
        assert_eq!(quot.value(), Some(fq(2)));
        assert_eq!(neg.value(), Some(-fq(6)));
        assert_eq!(b.num_gates(), 5);
        assert!(b.check().is_ok());
    }

    #[test]
    fn test_constant_folding_emits_nothing() {
        let mut b = Builder::<Fq>::new();
        let x = b.constant(fq(4));
        let y = b.constant(fq(2));

        let sum = b.add(x, y);
        let prod = b.mul(x, y);
        let quot = b.div_unchecked(x, y);
        let zero = b.is_zero(x);
        let picked = b.select(zero, x, y);
        b.assert_is_equal(sum, b.constant(fq(6)));

        assert_eq!(b.constant_value(&prod), Some(BigUint::from(8u32)));
        assert_eq!(b.constant_value(&quot), Some(BigUint::from(2u32)));
        assert_eq!(picked.as_constant(), Some(fq(2)));
        assert_eq!(b.num_gates(), 0);
        assert_eq!(b.num_wires(), 0);
    }

    #[test]
    fn test_failed_constant_assertion_is_recorded() {
        let mut b = Builder::<Fq>::new();
        b.assert_is_equal(b.constant(fq(1)), b.constant(fq(2)));
        assert_eq!(b.num_gates(), 1);
        assert!(matches!(
            b.check(),
            Err(FrontendError::Unsatisfied { index: 0, label: "assert_is_equal" })
        ));
    }

    #[test]
    fn test_is_zero() {
        let mut b = Builder::<Fq>::new();
        let zero = b.witness(Fq::zero());
        let five = b.witness(fq(5));
        assert_eq!(b.is_zero(zero).value(), Some(Fq::one()));
        assert_eq!(b.is_zero(five).value(), Some(Fq::zero()));
        assert!(b.check().is_ok());
    }

    #[test]
    fn test_select_and_lookup2() {
        let mut b = Builder::<Fq>::new();
        let t = b.witness(Fq::one());
        let f = b.witness(Fq::zero());
        let table = [b.witness(fq(10)), b.witness(fq(11)), b.witness(fq(12)), b.witness(fq(13))];

        assert_eq!(b.select(t, table[0], table[1]).value(), Some(fq(10)));
        assert_eq!(b.select(f, table[0], table[1]).value(), Some(fq(11)));
        for (b0, b1, expected) in [(f, f, 10), (t, f, 11), (f, t, 12), (t, t, 13)] {
            assert_eq!(b.lookup2(b0, b1, table).value(), Some(fq(expected)));
        }
        assert!(b.check().is_ok());
    }

    #[test]
    fn test_to_binary() {
        let mut b = Builder::<Fq>::new();
        let v = b.witness(fq(0b1011));
        let bits = b.to_binary(v, 6);
        let values: Vec<_> = bits.iter().map(|bit| bit.value().unwrap()).collect();
        assert_eq!(values, [1u64, 1, 0, 1, 0, 0].map(fq));
        assert!(b.check().is_ok());
    }

    #[test]
    fn test_to_binary_overflow_is_unsatisfiable() {
        let mut b = Builder::<Fq>::new();
        let v = b.witness(fq(300));
        b.to_binary(v, 8);
        assert!(matches!(
            b.check(),
            Err(FrontendError::Unsatisfied { label: "assert_is_equal", .. })
        ));
    }

    #[test]
    fn test_wrong_product_is_caught() {
        let mut b = Builder::<Fq>::new();
        let x = b.witness(fq(2));
        let y = b.witness(fq(3));
        let z = b.mul(x, y);
        b.assert_is_equal(z, b.constant(fq(7)));
        assert!(b.check().is_err());
    }

    #[test]
    fn test_hint_outputs_are_reduced() {
        let mut b = Builder::<Fq>::new();
        let x = b.witness(fq(7));
        let out = b.new_hint(&Square, &[x], 2).unwrap();
        assert_eq!(out[0].value(), Some(fq(49)));
        assert_eq!(out[1].value(), Some(-fq(7)));
        assert_eq!(b.num_gates(), 0);
    }

    #[test]
    fn test_hint_arity_mismatch() {
        let mut b = Builder::<Fq>::new();
        let x = b.witness(fq(7));
        let err = b.new_hint(&Square, &[x, x], 2).unwrap_err();
        assert!(matches!(err, FrontendError::HintArity { inputs: 2, expected_inputs: 1, .. }));
        let err = b.new_hint(&Square, &[x], 1).unwrap_err();
        assert!(matches!(err, FrontendError::HintArity { outputs: 1, expected_outputs: 2, .. }));
    }

    #[test]
    fn test_override_hint() {
        let mut b = Builder::<Fq>::new();
        b.override_hint("square", Arc::new(Broken));
        let x = b.witness(fq(7));
        let err = b.new_hint(&Square, &[x], 2).unwrap_err();
        assert!(matches!(err, FrontendError::HintFailed { id: "square", .. }));
    }

    #[test]
    fn test_compile_only_has_same_shape() {
        fn build(b: &mut Builder<Fq>) {
            let x = b.witness(fq(9));
            let y = b.witness(fq(4));
            let z = b.mul(x, y);
            let bits = b.to_binary(z, 8);
            let w = b.new_hint(&Square, &[bits[0]], 2).unwrap();
            b.is_zero(w[0]);
        }

        let mut witness = Builder::<Fq>::new();
        let mut shape = Builder::<Fq>::compile_only();
        build(&mut witness);
        build(&mut shape);

        assert_eq!(witness.num_gates(), shape.num_gates());
        assert_eq!(witness.num_wires(), shape.num_wires());
        assert!(witness.check().is_ok());
        assert!(matches!(shape.check(), Err(FrontendError::MissingWitness(_))));
    }
}
