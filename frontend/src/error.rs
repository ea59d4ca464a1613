/// Errors raised while building or checking a circuit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrontendError {
    #[error(
        "hint {id} takes {expected_inputs} inputs and {expected_outputs} outputs, \
         called with {inputs} and {outputs}"
    )]
    HintArity {
        id: &'static str,
        expected_inputs: usize,
        expected_outputs: usize,
        inputs: usize,
        outputs: usize,
    },
    #[error("hint {id} failed: {reason}")]
    HintFailed { id: &'static str, reason: String },
    #[error("gate {index} ({label}) is not satisfied")]
    Unsatisfied { index: usize, label: &'static str },
    #[error("wire {0} has no assigned value")]
    MissingWitness(usize),
}
