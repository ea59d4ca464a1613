use ark_ff::Field;

/// An allocated wire. `value` is `None` when the circuit is built without a witness.
#[derive(Hash, Eq, PartialEq, Debug, Clone, Copy)]
pub struct Wire<F> {
    pub index: usize,
    pub value: Option<F>,
}

/// A circuit value: either a compile-time constant or a witness wire.
#[derive(Hash, Eq, PartialEq, Debug, Clone, Copy)]
pub enum Variable<F> {
    Constant(F),
    Witness(Wire<F>),
}

impl<F: Field> Variable<F> {
    /// Assigned value, if known.
    pub fn value(&self) -> Option<F> {
        match self {
            Variable::Constant(c) => Some(*c),
            Variable::Witness(wire) => wire.value,
        }
    }

    pub fn as_constant(&self) -> Option<F> {
        match self {
            Variable::Constant(c) => Some(*c),
            Variable::Witness(_) => None,
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Variable::Constant(_))
    }

    pub(crate) fn wire(&self) -> Option<usize> {
        match self {
            Variable::Constant(_) => None,
            Variable::Witness(wire) => Some(wire.index),
        }
    }
}
