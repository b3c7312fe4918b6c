//! Engine configuration: the range modifier table and batch options.
//!
//! Integrator and solver constants are fixed and not part of this file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::batch::BatchOptions;
use crate::error::BallisticsError;
use crate::modifiers::RangeModifierTable;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub modifiers: RangeModifierTable,
    pub batch: BatchOptions,
}

impl EngineConfig {
    pub fn from_json_str(s: &str) -> Result<Self, BallisticsError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from a JSON file. Missing sections fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BallisticsError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String, BallisticsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
