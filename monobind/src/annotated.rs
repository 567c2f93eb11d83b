//! Read-only views of discovered component declarations.
//!
//! The container owns the concrete declarations; the emulation layer only reads
//! them through these traits and hands back decorated views (see
//! [`crate::emulation::producer`]). Nothing in this module is ever mutated after
//! the container hands it over.

use crate::types::{Annotation, AnnotationSet, CapabilitySet, QualifierSet, TypeRef};
use std::fmt;
use std::sync::Arc;

/// Anything that carries a base type, an advertised closure and markers.
pub trait Annotated: fmt::Debug + Send + Sync {
    fn base_type(&self) -> &TypeRef;

    /// Every type the container would natively advertise for this declaration.
    fn type_closure(&self) -> &CapabilitySet;

    fn annotations(&self) -> &AnnotationSet;

    fn is_annotation_present(&self, annotation: &Annotation) -> bool {
        self.annotations().contains(annotation)
    }
}

pub trait AnnotatedMember: Annotated {
    fn declaring_type(&self) -> &TypeRef;

    fn is_static(&self) -> bool;
}

pub trait AnnotatedMethod: AnnotatedMember {
    /// Member handle: the method name on its declaring type.
    fn name(&self) -> &str;

    fn parameters(&self) -> &[Parameter];

    /// Declared return type. Same as the base type of the method.
    fn return_type(&self) -> &TypeRef {
        self.base_type()
    }
}

pub trait AnnotatedType: Annotated {
    fn constructors(&self) -> &[ConstructorDeclaration];

    fn methods(&self) -> &[Arc<dyn AnnotatedMethod>];

    fn fields(&self) -> &[Arc<FieldDeclaration>];

    fn has_provider_methods(&self) -> bool {
        self.methods()
            .iter()
            .any(|m| m.is_annotation_present(&Annotation::Provides))
    }

    fn has_injected_constructor(&self) -> bool {
        self.constructors().iter().any(|c| c.is_injected())
    }
}

/// Injection point of a constructor or method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub ty: TypeRef,
    pub qualifiers: QualifierSet,
}

impl Parameter {
    pub fn new(ty: impl Into<TypeRef>) -> Self {
        Self {
            ty: ty.into(),
            qualifiers: QualifierSet::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConstructorDeclaration {
    pub parameters: Vec<Parameter>,
    pub annotations: AnnotationSet,
}

impl ConstructorDeclaration {
    /// Constructor marked for injection.
    pub fn injected(parameters: Vec<Parameter>) -> Self {
        Self {
            parameters,
            annotations: [Annotation::Inject].into_iter().collect(),
        }
    }

    pub fn is_injected(&self) -> bool {
        self.annotations.contains(&Annotation::Inject)
    }
}

/// Type declaration as discovered by the container.
#[derive(Debug, Clone)]
pub struct TypeDeclaration {
    base_type: TypeRef,
    type_closure: CapabilitySet,
    annotations: AnnotationSet,
    constructors: Vec<ConstructorDeclaration>,
    methods: Vec<Arc<dyn AnnotatedMethod>>,
    fields: Vec<Arc<FieldDeclaration>>,
}

impl TypeDeclaration {
    /// New declaration whose closure holds only the type itself.
    pub fn new(base_type: impl Into<TypeRef>) -> Self {
        let base_type = base_type.into();
        Self {
            type_closure: [base_type.clone()].into_iter().collect(),
            base_type,
            annotations: AnnotationSet::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Add a supertype or implemented interface to the closure.
    pub fn implements(mut self, ty: impl Into<TypeRef>) -> Self {
        self.type_closure.insert(ty.into());
        self
    }

    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.insert(annotation);
        self
    }

    pub fn with_constructor(mut self, constructor: ConstructorDeclaration) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Add a method; its declaring type is forced to this type.
    pub fn with_method(mut self, method: MethodDeclaration) -> Self {
        let method = method.declared_by(self.base_type.clone());
        self.methods.push(Arc::new(method));
        self
    }

    pub fn with_field(mut self, field: FieldDeclaration) -> Self {
        let field = FieldDeclaration {
            declaring_type: self.base_type.clone(),
            ..field
        };
        self.fields.push(Arc::new(field));
        self
    }
}

impl Annotated for TypeDeclaration {
    fn base_type(&self) -> &TypeRef {
        &self.base_type
    }

    fn type_closure(&self) -> &CapabilitySet {
        &self.type_closure
    }

    fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }
}

impl AnnotatedType for TypeDeclaration {
    fn constructors(&self) -> &[ConstructorDeclaration] {
        &self.constructors
    }

    fn methods(&self) -> &[Arc<dyn AnnotatedMethod>] {
        &self.methods
    }

    fn fields(&self) -> &[Arc<FieldDeclaration>] {
        &self.fields
    }
}

#[derive(Debug, Clone)]
pub struct MethodDeclaration {
    name: String,
    declaring_type: TypeRef,
    return_type: TypeRef,
    type_closure: CapabilitySet,
    annotations: AnnotationSet,
    parameters: Vec<Parameter>,
    is_static: bool,
}

impl MethodDeclaration {
    /// Method returning `return_type`. The declaring type is filled in by
    /// [`TypeDeclaration::with_method`] or [`MethodDeclaration::declared_by`].
    pub fn new(name: impl Into<String>, return_type: impl Into<TypeRef>) -> Self {
        let return_type = return_type.into();
        Self {
            name: name.into(),
            declaring_type: TypeRef::new(""),
            type_closure: [return_type.clone()].into_iter().collect(),
            return_type,
            annotations: AnnotationSet::new(),
            parameters: Vec::new(),
            is_static: false,
        }
    }

    /// Shorthand for a method annotated `Provides`.
    pub fn provider(name: impl Into<String>, return_type: impl Into<TypeRef>) -> Self {
        Self::new(name, return_type).annotated(Annotation::Provides)
    }

    pub fn declared_by(mut self, declaring_type: TypeRef) -> Self {
        self.declaring_type = declaring_type;
        self
    }

    /// Add a supertype of the return type to the closure.
    pub fn implements(mut self, ty: impl Into<TypeRef>) -> Self {
        self.type_closure.insert(ty.into());
        self
    }

    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.insert(annotation);
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn static_method(mut self) -> Self {
        self.is_static = true;
        self
    }
}

impl Annotated for MethodDeclaration {
    fn base_type(&self) -> &TypeRef {
        &self.return_type
    }

    fn type_closure(&self) -> &CapabilitySet {
        &self.type_closure
    }

    fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }
}

impl AnnotatedMember for MethodDeclaration {
    fn declaring_type(&self) -> &TypeRef {
        &self.declaring_type
    }

    fn is_static(&self) -> bool {
        self.is_static
    }
}

impl AnnotatedMethod for MethodDeclaration {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }
}

#[derive(Debug, Clone)]
pub struct FieldDeclaration {
    pub name: String,
    pub declaring_type: TypeRef,
    pub ty: TypeRef,
    pub type_closure: CapabilitySet,
    pub annotations: AnnotationSet,
    pub is_static: bool,
}

impl FieldDeclaration {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        let ty = ty.into();
        Self {
            name: name.into(),
            declaring_type: TypeRef::new(""),
            type_closure: [ty.clone()].into_iter().collect(),
            ty,
            annotations: AnnotationSet::new(),
            is_static: false,
        }
    }

    pub fn declared_by(mut self, declaring_type: TypeRef) -> Self {
        self.declaring_type = declaring_type;
        self
    }

    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.insert(annotation);
        self
    }
}

impl Annotated for FieldDeclaration {
    fn base_type(&self) -> &TypeRef {
        &self.ty
    }

    fn type_closure(&self) -> &CapabilitySet {
        &self.type_closure
    }

    fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }
}

impl AnnotatedMember for FieldDeclaration {
    fn declaring_type(&self) -> &TypeRef {
        &self.declaring_type
    }

    fn is_static(&self) -> bool {
        self.is_static
    }
}

/// A declaration whose attributes the container is about to finalize.
#[derive(Debug, Clone)]
pub enum Declaration {
    Type(Arc<dyn AnnotatedType>),
    Method(Arc<dyn AnnotatedMethod>),
    Field(Arc<FieldDeclaration>),
}

impl Declaration {
    pub fn base_type(&self) -> &TypeRef {
        match self {
            Declaration::Type(t) => t.base_type(),
            Declaration::Method(m) => m.base_type(),
            Declaration::Field(f) => f.base_type(),
        }
    }

    pub fn type_closure(&self) -> &CapabilitySet {
        match self {
            Declaration::Type(t) => t.type_closure(),
            Declaration::Method(m) => m.type_closure(),
            Declaration::Field(f) => f.type_closure(),
        }
    }

    pub fn is_annotation_present(&self, annotation: &Annotation) -> bool {
        match self {
            Declaration::Type(t) => t.is_annotation_present(annotation),
            Declaration::Method(m) => m.is_annotation_present(annotation),
            Declaration::Field(f) => f.is_annotation_present(annotation),
        }
    }

    /// Type whose name decides eligibility: the type itself, or the
    /// declaring type of a member.
    pub fn owning_type(&self) -> &TypeRef {
        match self {
            Declaration::Type(t) => t.base_type(),
            Declaration::Method(m) => m.declaring_type(),
            Declaration::Field(f) => f.declaring_type(),
        }
    }

    pub fn as_type(&self) -> Option<&dyn AnnotatedType> {
        match self {
            Declaration::Type(t) => Some(t.as_ref()),
            _ => None,
        }
    }
}

impl From<TypeDeclaration> for Declaration {
    fn from(decl: TypeDeclaration) -> Self {
        Declaration::Type(Arc::new(decl))
    }
}

impl From<MethodDeclaration> for Declaration {
    fn from(decl: MethodDeclaration) -> Self {
        Declaration::Method(Arc::new(decl))
    }
}

impl From<FieldDeclaration> for Declaration {
    fn from(decl: FieldDeclaration) -> Self {
        Declaration::Field(Arc::new(decl))
    }
}
