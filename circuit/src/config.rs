//! Options selecting between the complete and the incomplete group law.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A single algebra option passed to the scalar-multiplication entry points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlgebraOption {
    /// Use unified addition everywhere so that the identity and mutually
    /// inverse operands are handled by the constraints themselves.
    CompleteArithmetic,
}

/// Folded algebra options.
///
/// With `complete_arithmetic` unset the cheaper incomplete formulas are used and
/// the caller must guarantee that no operand is the identity and that no two
/// operands are equal or mutually inverse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlgebraConfig {
    #[serde(default)]
    pub complete_arithmetic: bool,
}

impl AlgebraConfig {
    /// Folds a list of options. Giving the same option twice is rejected.
    pub fn new(options: &[AlgebraOption]) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for option in options {
            match option {
                AlgebraOption::CompleteArithmetic => {
                    if config.complete_arithmetic {
                        return Err(ConfigError::DuplicateOption(*option));
                    }
                    config.complete_arithmetic = true;
                }
            }
        }
        Ok(config)
    }

    pub fn complete() -> Self {
        Self {
            complete_arithmetic: true,
        }
    }

    /// Parses a JSON object such as `{"complete_arithmetic": true}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The options that fold back into this config.
    pub fn options(&self) -> Vec<AlgebraOption> {
        let mut options = Vec::new();
        if self.complete_arithmetic {
            options.push(AlgebraOption::CompleteArithmetic);
        }
        options
    }
}
