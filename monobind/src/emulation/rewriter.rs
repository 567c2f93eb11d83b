//! Capability-set rewriting: one binding, one type.
//!
//! The container natively advertises a declaration under its whole supertype
//! closure. Under single-binding semantics a binding advertises its base type
//! only, and a type claimed by a provider method belongs to that provider.

use super::classifier::Classification;
use crate::annotated::Declaration;
use crate::attributes::{BeanAttributes, RewrittenAttributes};
use crate::types::{CapabilitySet, TypeRef};
use std::sync::Arc;

/// Return types of every provider method seen during discovery.
///
/// Grows monotonically while types are discovered and is only read once
/// attributes are finalized.
#[derive(Debug, Clone, Default)]
pub struct ProviderReturnTypes {
    types: CapabilitySet,
}

impl ProviderReturnTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when another provider already claimed `ty`.
    pub fn register(&mut self, ty: TypeRef) -> bool {
        self.types.insert(ty)
    }

    pub fn contains(&self, ty: &TypeRef) -> bool {
        self.types.contains(ty)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeRef> {
        self.types.iter()
    }
}

/// Outcome of attribute finalization for one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeDecision {
    Untouched,
    Rewrite(CapabilitySet),
    Veto,
}

impl AttributeDecision {
    /// Replacement attributes for a `Rewrite`, `None` otherwise.
    pub fn apply(
        &self,
        attributes: &Arc<dyn BeanAttributes>,
    ) -> Option<RewrittenAttributes<dyn BeanAttributes>> {
        match self {
            AttributeDecision::Rewrite(types) => Some(RewrittenAttributes::with_types(
                Arc::clone(attributes),
                types.clone(),
            )),
            _ => None,
        }
    }
}

pub fn decide(
    declaration: &Declaration,
    attributes: &dyn BeanAttributes,
    classification: Classification,
    eligible: bool,
    provider_types: &ProviderReturnTypes,
) -> AttributeDecision {
    if !eligible || classification.is_infrastructure() {
        return AttributeDecision::Untouched;
    }
    let base_type = declaration.base_type();

    match classification {
        Classification::ProviderMethodHost => single(base_type),
        Classification::InjectedComponent if provider_types.contains(base_type) => {
            AttributeDecision::Veto
        }
        Classification::InjectedComponent => single(base_type),
        Classification::Unbound
            if declaration.as_type().is_some() && provider_types.contains(base_type) =>
        {
            let remaining: CapabilitySet = attributes
                .types()
                .iter()
                .filter(|ty| !provider_types.contains(ty))
                .cloned()
                .collect();
            // a residue of only the root type still resolves to nothing but the shadow
            if remaining.iter().all(TypeRef::is_universal_root) {
                AttributeDecision::Veto
            } else {
                AttributeDecision::Rewrite(remaining)
            }
        }
        _ => AttributeDecision::Veto,
    }
}

fn single(ty: &TypeRef) -> AttributeDecision {
    AttributeDecision::Rewrite([ty.clone()].into_iter().collect())
}
