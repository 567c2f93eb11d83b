//! Identity types shared by declarations, attributes and resolution keys.

use indexmap::IndexSet;
use std::fmt;
use std::sync::Arc;

/// Fully-qualified name of the lazy handle type, generic arguments erased.
pub const LAZY_HANDLE_TYPE: &str = "monobind::lazy::LazyHandle";

/// Root type every declaration's closure may carry. It binds nothing by itself.
pub const UNIVERSAL_ROOT_TYPE: &str = "core::any::Any";

/// Fully-qualified type identity as the container knows it.
///
/// Generic arguments are part of the name (`monobind::lazy::LazyHandle<coffee::Pump>`);
/// use [`TypeRef::raw`] to compare erased names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeRef(Arc<str>);

impl TypeRef {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Identity of a Rust type, taken from its type path.
    pub fn of<T: ?Sized>() -> Self {
        Self::new(std::any::type_name::<T>())
    }

    /// Identity of the lazy handle parameterized by `argument`.
    pub fn lazy_handle_of(argument: &TypeRef) -> Self {
        Self::new(format!("{}<{}>", LAZY_HANDLE_TYPE, argument))
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Name with generic arguments stripped.
    pub fn raw(&self) -> &str {
        match self.0.find('<') {
            Some(idx) => &self.0[..idx],
            None => &self.0,
        }
    }

    /// Top-level generic arguments, in declaration order.
    pub fn type_arguments(&self) -> Vec<TypeRef> {
        let Some(open) = self.0.find('<') else {
            return Vec::new();
        };
        let Some(inner) = self.0[open + 1..].strip_suffix('>') else {
            return Vec::new();
        };

        let mut args = Vec::new();
        let mut depth = 0usize;
        let mut start = 0usize;
        for (idx, ch) in inner.char_indices() {
            match ch {
                '<' => depth += 1,
                '>' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    args.push(TypeRef::new(inner[start..idx].trim()));
                    start = idx + 1;
                }
                _ => {}
            }
        }
        let last = inner[start..].trim();
        if !last.is_empty() {
            args.push(TypeRef::new(last));
        }
        args
    }

    pub fn is_lazy_handle(&self) -> bool {
        self.raw() == LAZY_HANDLE_TYPE
    }

    pub fn is_universal_root(&self) -> bool {
        self.name() == UNIVERSAL_ROOT_TYPE
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        TypeRef::new(name)
    }
}

/// Opaque marker narrowing candidate selection (`Juicy`, `Named("x")`...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Qualifier(String);

impl Qualifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle scope marker. The core only carries it through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    #[default]
    Dependent,
    Singleton,
    Application,
    Custom(String),
}

/// Markers a declaration can carry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Annotation {
    /// The type is a module hosting provider methods.
    Module,
    /// Provider method in the foreign binding model.
    Provides,
    /// Producer marker recognized by the container.
    Produces,
    /// Injected constructor, field or initializer.
    Inject,
    Qualifier(Qualifier),
    Other(String),
}

/// Ordered set of advertised types.
pub type CapabilitySet = IndexSet<TypeRef>;

pub type AnnotationSet = IndexSet<Annotation>;

pub type QualifierSet = IndexSet<Qualifier>;
