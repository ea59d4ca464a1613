use frontend::FrontendError;
use num_bigint::BigUint;

use crate::config::AlgebraOption;

/// Malformed algebra configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("algebra option {0:?} given more than once")]
    DuplicateOption(AlgebraOption),
    #[error("invalid algebra config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised while building G2 gadgets.
#[derive(Debug, thiserror::Error)]
pub enum CircuitError {
    #[error("native field with modulus {0} does not host BLS12-377 G2")]
    UnsupportedField(BigUint),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Frontend(#[from] FrontendError),
}
