//! Interpreter configuration.
//!
//! Hosts either build an [`InterpreterConfig`] in code or hand over JSON
//! text; every field is optional and falls back to the standard setup.
//!
//! ```json
//! {
//!   "defaults": { "origin": { "x": 0, "y": 0 }, "rotate": 0, "scale": 1 },
//!   "constants": { "pi": 3.141592653589793, "g": 9.81 },
//!   "standard_builtins": true
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::builtins::BuiltinRegistry;
use crate::constants::ConstantTable;
use crate::env::DefaultBindings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid interpreter config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InterpreterConfig {
    /// Bindings seeded into the global scope at the start of each run.
    pub defaults: DefaultBindings,
    /// Named constants available to `Constant` nodes.
    pub constants: ConstantTable,
    /// Whether to register the standard math/vector builtins.
    pub standard_builtins: bool,
}

impl InterpreterConfig {
    /// Parse a config from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// The builtin registry this config asks for.
    pub fn builtins(&self) -> BuiltinRegistry {
        if self.standard_builtins {
            BuiltinRegistry::standard()
        } else {
            BuiltinRegistry::empty()
        }
    }
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            defaults: DefaultBindings::standard(),
            constants: ConstantTable::standard(),
            standard_builtins: true,
        }
    }
}
