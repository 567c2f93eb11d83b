//! Provider advertisement: present provider methods to the container as producers.
//!
//! The container only instantiates through methods carrying its own producer
//! marker, so every provider method gets a decorated view adding exactly that
//! marker. Originals are never touched, which keeps discovery re-runnable and
//! keeps the wrapped and unwrapped declarations distinguishable.

use crate::annotated::{
    Annotated, AnnotatedMember, AnnotatedMethod, AnnotatedType, ConstructorDeclaration,
    FieldDeclaration, Parameter,
};
use crate::types::{Annotation, AnnotationSet, CapabilitySet, TypeRef};
use std::sync::Arc;

/// Provider method view carrying the producer marker.
#[derive(Debug)]
pub struct ProducerMethod<M: ?Sized = dyn AnnotatedMethod> {
    delegate: Arc<M>,
    annotations: AnnotationSet,
}

impl<M: AnnotatedMethod + ?Sized> ProducerMethod<M> {
    pub fn wrap(delegate: Arc<M>) -> Self {
        let mut annotations = delegate.annotations().clone();
        annotations.insert(Annotation::Produces);
        Self {
            delegate,
            annotations,
        }
    }

    pub fn delegate(&self) -> &Arc<M> {
        &self.delegate
    }
}

impl<M: AnnotatedMethod + ?Sized> Annotated for ProducerMethod<M> {
    fn base_type(&self) -> &TypeRef {
        self.delegate.base_type()
    }

    fn type_closure(&self) -> &CapabilitySet {
        self.delegate.type_closure()
    }

    fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }
}

impl<M: AnnotatedMethod + ?Sized> AnnotatedMember for ProducerMethod<M> {
    fn declaring_type(&self) -> &TypeRef {
        self.delegate.declaring_type()
    }

    fn is_static(&self) -> bool {
        self.delegate.is_static()
    }
}

impl<M: AnnotatedMethod + ?Sized> AnnotatedMethod for ProducerMethod<M> {
    fn name(&self) -> &str {
        self.delegate.name()
    }

    fn parameters(&self) -> &[Parameter] {
        self.delegate.parameters()
    }
}

/// Type view whose provider methods are replaced by [`ProducerMethod`]s.
#[derive(Debug)]
pub struct EmulatedType {
    delegate: Arc<dyn AnnotatedType>,
    methods: Vec<Arc<dyn AnnotatedMethod>>,
}

impl EmulatedType {
    pub fn wrap(delegate: Arc<dyn AnnotatedType>) -> Self {
        let methods = delegate
            .methods()
            .iter()
            .map(|method| {
                if method.is_annotation_present(&Annotation::Provides) {
                    Arc::new(ProducerMethod::wrap(Arc::clone(method))) as Arc<dyn AnnotatedMethod>
                } else {
                    Arc::clone(method)
                }
            })
            .collect();
        Self { delegate, methods }
    }

    pub fn delegate(&self) -> &Arc<dyn AnnotatedType> {
        &self.delegate
    }

    /// Methods carrying the producer marker after wrapping.
    pub fn producer_methods(&self) -> impl Iterator<Item = &Arc<dyn AnnotatedMethod>> {
        self.methods
            .iter()
            .filter(|m| m.is_annotation_present(&Annotation::Provides))
    }
}

impl Annotated for EmulatedType {
    fn base_type(&self) -> &TypeRef {
        self.delegate.base_type()
    }

    fn type_closure(&self) -> &CapabilitySet {
        self.delegate.type_closure()
    }

    fn annotations(&self) -> &AnnotationSet {
        self.delegate.annotations()
    }
}

impl AnnotatedType for EmulatedType {
    fn constructors(&self) -> &[ConstructorDeclaration] {
        self.delegate.constructors()
    }

    fn methods(&self) -> &[Arc<dyn AnnotatedMethod>] {
        &self.methods
    }

    fn fields(&self) -> &[Arc<FieldDeclaration>] {
        self.delegate.fields()
    }
}
