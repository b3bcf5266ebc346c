//! Validator settings loaded from TOML.

use serde::{Deserialize, Serialize};

use crate::error::ValidateResult;

/// Which checks the validator runs. Syntax is always checked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Report keys repeated within the same object.
    pub check_duplicate_keys: bool,
    /// Report unbalanced HTML tags inside string values.
    pub check_html: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            check_duplicate_keys: true,
            check_html: true,
        }
    }
}

impl ValidatorConfig {
    /// Syntax checking only.
    pub fn syntax_only() -> Self {
        Self {
            check_duplicate_keys: false,
            check_html: false,
        }
    }

    /// Parse configuration from TOML text. Missing fields keep their defaults.
    pub fn from_toml_str(text: &str) -> ValidateResult<Self> {
        Ok(toml::from_str(text)?)
    }
}
