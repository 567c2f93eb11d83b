//! Container service-provider interface.
//!
//! The container owns discovery, registration and instantiation. This module
//! declares the small surface the emulation layer consumes from it
//! ([`Container`], discovery events) and the observer surface it offers back
//! ([`Extension`]).

use crate::annotated::{AnnotatedType, Declaration};
use crate::attributes::BeanAttributes;
use crate::error::{BindingError, BindingResult};
use crate::types::{QualifierSet, TypeRef};
use std::any::Any;
use std::sync::Arc;

/// Type-erased instance produced by the container.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Opaque handle of a registered bean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BeanId(pub usize);

/// What is being asked for: a type narrowed by qualifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionKey {
    pub requested_type: TypeRef,
    pub qualifiers: QualifierSet,
}

impl ResolutionKey {
    pub fn new(requested_type: impl Into<TypeRef>) -> Self {
        Self {
            requested_type: requested_type.into(),
            qualifiers: QualifierSet::new(),
        }
    }

    pub fn qualified(mut self, qualifier: crate::types::Qualifier) -> Self {
        self.qualifiers.insert(qualifier);
        self
    }
}

/// Point of use of a dependency, as the container reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionPoint {
    /// Declared type at the point of use, generic arguments included.
    pub ty: TypeRef,
    pub qualifiers: QualifierSet,
}

/// Resolution authority.
pub trait Container: Send + Sync {
    /// Every bean whose advertised types and qualifiers satisfy `key`.
    fn candidates(&self, key: &ResolutionKey) -> Vec<BeanId>;

    /// Contextual reference for `bean` viewed as `requested_type`.
    ///
    /// `Ok(None)` means the bean produced no value.
    fn instantiate(
        &self,
        bean: BeanId,
        requested_type: &TypeRef,
    ) -> BindingResult<Option<Instance>>;

    /// Narrow the candidates of `key` down to exactly one bean.
    fn resolve(&self, key: &ResolutionKey) -> BindingResult<BeanId> {
        let candidates = self.candidates(key);
        match candidates.as_slice() {
            [bean] => Ok(*bean),
            [] => Err(BindingError::UnsatisfiedBinding {
                requested_type: key.requested_type.clone(),
                qualifiers: key.qualifiers.clone(),
            }),
            many => Err(BindingError::AmbiguousBinding {
                requested_type: key.requested_type.clone(),
                qualifiers: key.qualifiers.clone(),
                candidates: many.len(),
            }),
        }
    }
}

/// Fired once per discovered type, before beans are built from it.
#[derive(Debug)]
pub struct ProcessAnnotatedType {
    annotated_type: Arc<dyn AnnotatedType>,
    replaced: bool,
}

impl ProcessAnnotatedType {
    pub fn new(annotated_type: Arc<dyn AnnotatedType>) -> Self {
        Self {
            annotated_type,
            replaced: false,
        }
    }

    pub fn annotated_type(&self) -> &Arc<dyn AnnotatedType> {
        &self.annotated_type
    }

    /// Replace the view the container builds beans from.
    pub fn set_annotated_type(&mut self, annotated_type: Arc<dyn AnnotatedType>) {
        self.annotated_type = annotated_type;
        self.replaced = true;
    }

    pub fn is_replaced(&self) -> bool {
        self.replaced
    }

    pub fn into_annotated_type(self) -> Arc<dyn AnnotatedType> {
        self.annotated_type
    }
}

/// Fired once per bean candidate, before its attributes are frozen.
#[derive(Debug)]
pub struct ProcessBeanAttributes {
    annotated: Declaration,
    attributes: Arc<dyn BeanAttributes>,
    replaced: bool,
    vetoed: bool,
}

impl ProcessBeanAttributes {
    pub fn new(annotated: Declaration, attributes: Arc<dyn BeanAttributes>) -> Self {
        Self {
            annotated,
            attributes,
            replaced: false,
            vetoed: false,
        }
    }

    pub fn annotated(&self) -> &Declaration {
        &self.annotated
    }

    pub fn bean_attributes(&self) -> &Arc<dyn BeanAttributes> {
        &self.attributes
    }

    pub fn set_bean_attributes(&mut self, attributes: Arc<dyn BeanAttributes>) {
        self.attributes = attributes;
        self.replaced = true;
    }

    /// Remove the declaration from further consideration.
    pub fn veto(&mut self) {
        self.vetoed = true;
    }

    pub fn is_replaced(&self) -> bool {
        self.replaced
    }

    pub fn is_vetoed(&self) -> bool {
        self.vetoed
    }

    /// Final attributes, or `None` when vetoed.
    pub fn into_attributes(self) -> Option<Arc<dyn BeanAttributes>> {
        if self.vetoed {
            None
        } else {
            Some(self.attributes)
        }
    }
}

/// Observer of the container's discovery phase.
///
/// Callbacks run single-threaded, in container order: `before_discovery`,
/// then every `process_annotated_type`, then every `process_bean_attributes`,
/// then `after_discovery`.
pub trait Extension {
    fn before_discovery(&mut self) -> BindingResult<()> {
        Ok(())
    }

    fn process_annotated_type(&mut self, _event: &mut ProcessAnnotatedType) {}

    fn process_bean_attributes(&mut self, _event: &mut ProcessBeanAttributes) {}

    fn after_discovery(&mut self) {}
}
