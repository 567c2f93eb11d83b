//! Error taxonomy for binding emulation.
//!
//! Every variant is fatal to the operation that raised it. Nothing here is
//! retried or recovered locally; vetoes are decisions and never errors.

use crate::types::{QualifierSet, TypeRef};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BindingError {
    /// Malformed or unreadable emulation configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Ambiguous binding for {requested_type}{}: {candidates} candidates", display_qualifiers(.qualifiers))]
    AmbiguousBinding {
        requested_type: TypeRef,
        qualifiers: QualifierSet,
        candidates: usize,
    },

    #[error("Unsatisfied binding for {requested_type}{}", display_qualifiers(.qualifiers))]
    UnsatisfiedBinding {
        requested_type: TypeRef,
        qualifiers: QualifierSet,
    },

    /// The container resolved a reference that turned out to be absent.
    #[error("Null resolution for {0}")]
    NullResolution(TypeRef),

    #[error("Resolved instance for {requested_type} is not a {expected}")]
    TypeMismatch {
        requested_type: TypeRef,
        expected: &'static str,
    },

    /// Failure reported by the container itself while instantiating.
    #[error("Container error: {0}")]
    Container(String),
}

pub type BindingResult<T> = Result<T, BindingError>;

fn display_qualifiers(qualifiers: &QualifierSet) -> String {
    if qualifiers.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = qualifiers.iter().map(|q| q.as_str()).collect();
    format!(" qualified [{}]", names.join(", "))
}

impl From<regex::Error> for BindingError {
    fn from(e: regex::Error) -> Self {
        BindingError::Configuration(e.to_string())
    }
}

impl From<toml::de::Error> for BindingError {
    fn from(e: toml::de::Error) -> Self {
        BindingError::Configuration(e.to_string())
    }
}

impl From<std::io::Error> for BindingError {
    fn from(e: std::io::Error) -> Self {
        BindingError::Configuration(e.to_string())
    }
}
