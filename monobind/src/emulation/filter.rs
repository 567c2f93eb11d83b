//! Eligibility gate: which declarations the single-binding rules apply to.

use crate::annotated::Declaration;
use crate::error::BindingResult;
use regex::Regex;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct EligibilityFilter {
    pattern: Option<String>,
    // Anchored form of `pattern`; the owning type must match it whole.
    matcher: Option<Regex>,
}

impl EligibilityFilter {
    /// Every declaration is eligible.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_pattern(pattern: &str) -> BindingResult<Self> {
        let matcher = Regex::new(&format!("^(?:{})$", pattern))?;
        info!(pattern, "Binding emulation restricted to matching types");
        Ok(Self {
            pattern: Some(pattern.to_string()),
            matcher: Some(matcher),
        })
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    pub fn is_eligible(&self, declaration: &Declaration) -> bool {
        self.matches_name(declaration.owning_type().name())
    }

    pub fn matches_name(&self, type_name: &str) -> bool {
        match &self.matcher {
            Some(matcher) => matcher.is_match(type_name),
            None => true,
        }
    }
}
