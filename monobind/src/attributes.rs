//! Bean attributes: what a declaration advertises to the container's resolver.

use crate::types::{CapabilitySet, QualifierSet, Scope, TypeRef};
use indexmap::IndexSet;
use std::fmt;
use std::sync::Arc;

pub trait BeanAttributes: fmt::Debug + Send + Sync {
    /// Advertised capability set.
    fn types(&self) -> &CapabilitySet;

    fn qualifiers(&self) -> &QualifierSet;

    fn scope(&self) -> &Scope;

    fn name(&self) -> Option<&str>;

    fn stereotypes(&self) -> &IndexSet<String>;

    fn is_alternative(&self) -> bool;
}

/// Attributes as the container computes them natively.
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    pub types: CapabilitySet,
    pub qualifiers: QualifierSet,
    pub scope: Scope,
    pub name: Option<String>,
    pub stereotypes: IndexSet<String>,
    pub alternative: bool,
}

impl Attributes {
    pub fn new(types: CapabilitySet) -> Self {
        Self {
            types,
            ..Self::default()
        }
    }
}

impl BeanAttributes for Attributes {
    fn types(&self) -> &CapabilitySet {
        &self.types
    }

    fn qualifiers(&self) -> &QualifierSet {
        &self.qualifiers
    }

    fn scope(&self) -> &Scope {
        &self.scope
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn stereotypes(&self) -> &IndexSet<String> {
        &self.stereotypes
    }

    fn is_alternative(&self) -> bool {
        self.alternative
    }
}

/// Replacement capability set over unchanged delegate attributes.
#[derive(Debug)]
pub struct RewrittenAttributes<A: ?Sized = dyn BeanAttributes> {
    delegate: Arc<A>,
    types: CapabilitySet,
}

impl<A: ?Sized> Clone for RewrittenAttributes<A> {
    fn clone(&self) -> Self {
        Self {
            delegate: Arc::clone(&self.delegate),
            types: self.types.clone(),
        }
    }
}

impl<A: BeanAttributes + ?Sized> RewrittenAttributes<A> {
    /// Advertise exactly `binding_type`.
    pub fn single(delegate: Arc<A>, binding_type: TypeRef) -> Self {
        Self {
            delegate,
            types: [binding_type].into_iter().collect(),
        }
    }

    pub fn with_types(delegate: Arc<A>, types: CapabilitySet) -> Self {
        Self { delegate, types }
    }

    pub fn delegate(&self) -> &Arc<A> {
        &self.delegate
    }
}

impl<A: BeanAttributes + ?Sized> BeanAttributes for RewrittenAttributes<A> {
    fn types(&self) -> &CapabilitySet {
        &self.types
    }

    fn qualifiers(&self) -> &QualifierSet {
        self.delegate.qualifiers()
    }

    fn scope(&self) -> &Scope {
        self.delegate.scope()
    }

    fn name(&self) -> Option<&str> {
        self.delegate.name()
    }

    fn stereotypes(&self) -> &IndexSet<String> {
        self.delegate.stereotypes()
    }

    fn is_alternative(&self) -> bool {
        self.delegate.is_alternative()
    }
}
