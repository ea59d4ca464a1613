//! Arithmetic-circuit construction over an arkworks prime field.
//!
//! The builder emits generic PLONK gates, evaluates them against a witness and
//! runs prover-side hints. Gadgets in the `circuit` crate are written against
//! this API.

mod builder;
mod error;
mod gate;
mod hint;
mod variable;

pub use builder::{from_bigint, from_biguint, to_biguint, Builder};
pub use error::FrontendError;
pub use gate::Gate;
pub use hint::{Hint, HintId};
pub use variable::{Variable, Wire};
