//! The generic PLONK gate.

use ark_ff::Field;

/// `ql·l + qr·r + qo·o + qm·l·r + qc = 0` over the wires in `wires = [l, r, o]`.
///
/// An empty slot reads as zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gate<F> {
    pub wires: [Option<usize>; 3],
    pub ql: F,
    pub qr: F,
    pub qo: F,
    pub qm: F,
    pub qc: F,
    /// Name of the operation that emitted the gate.
    pub label: &'static str,
}

impl<F: Field> Gate<F> {
    /// Evaluates the gate polynomial. Returns the index of the first wire
    /// without an assignment if one is missing.
    pub fn evaluate(&self, assignment: &[Option<F>]) -> Result<F, usize> {
        let mut v = [F::zero(); 3];
        for (slot, wire) in v.iter_mut().zip(self.wires) {
            if let Some(index) = wire {
                *slot = assignment.get(index).copied().flatten().ok_or(index)?;
            }
        }
        let [l, r, o] = v;
        Ok(self.ql * l + self.qr * r + self.qo * o + self.qm * l * r + self.qc)
    }

    pub fn is_satisfied(&self, assignment: &[Option<F>]) -> Result<bool, usize> {
        Ok(self.evaluate(assignment)?.is_zero())
    }
}
