//! Emulation configuration.
//!
//! One optional setting: a regular expression selecting the types the
//! single-binding rules apply to. It is read once, at startup, from the
//! environment or from a TOML document such as:
//!
//! ```toml
//! [emulation]
//! emulate = 'coffee::simple::.*'
//! ```

use crate::emulation::filter::EligibilityFilter;
use crate::error::{BindingError, BindingResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the emulation pattern.
pub const EMULATE_ENV_VAR: &str = "MONOBIND_EMULATE";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmulationConfig {
    /// Pattern matched against the fully-qualified owning type. `None` means
    /// every declaration is emulated.
    #[serde(default)]
    pub emulate: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    emulation: EmulationConfig,
}

impl EmulationConfig {
    pub fn with_pattern(pattern: impl Into<String>) -> Self {
        Self {
            emulate: Some(pattern.into()),
        }
    }

    /// Read `MONOBIND_EMULATE`. An unset or blank variable means no pattern.
    pub fn from_env() -> Self {
        let emulate = std::env::var(EMULATE_ENV_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty());
        Self { emulate }
    }

    pub fn from_toml_str(content: &str) -> BindingResult<Self> {
        let doc: ConfigDocument = toml::from_str(content)?;
        Ok(doc.emulation)
    }

    pub fn from_file(path: impl AsRef<Path>) -> BindingResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            BindingError::Configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Compile the pattern. A malformed pattern is a startup-time failure.
    pub fn filter(&self) -> BindingResult<EligibilityFilter> {
        match &self.emulate {
            Some(pattern) => EligibilityFilter::with_pattern(pattern),
            None => Ok(EligibilityFilter::all()),
        }
    }
}
