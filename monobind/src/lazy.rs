//! Lazily resolved, memoized dependency handle.
//!
//! The candidate bean is chosen when the handle is built, so unsatisfied and
//! ambiguous dependencies fail at wiring time. Instantiation is deferred to the
//! first [`Lazy::get`] and happens at most once per handle, however many
//! threads race on it.

use crate::container::{BeanId, Container, InjectionPoint, ResolutionKey};
use crate::error::{BindingError, BindingResult};
use crate::types::{QualifierSet, TypeRef};
use once_cell::sync::OnceCell;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Deferred accessor in the single-binding model. Never yields an absent value.
pub trait Lazy<T: ?Sized> {
    fn get(&self) -> BindingResult<Arc<T>>;
}

pub struct LazyHandle<T> {
    key: ResolutionKey,
    bean: BeanId,
    container: Arc<dyn Container>,
    instance: OnceCell<Arc<T>>,
}

impl<T: Any + Send + Sync> LazyHandle<T> {
    /// Resolve the single candidate for `key` now; instantiate it on first use.
    pub fn new(key: ResolutionKey, container: Arc<dyn Container>) -> BindingResult<Self> {
        let bean = container.resolve(&key)?;
        debug!(requested_type = %key.requested_type, ?bean, "Lazy handle bound");
        Ok(Self {
            key,
            bean,
            container,
            instance: OnceCell::new(),
        })
    }

    /// Handle for `T` itself, identified by its type path.
    pub fn for_type(qualifiers: QualifierSet, container: Arc<dyn Container>) -> BindingResult<Self> {
        Self::new(
            ResolutionKey {
                requested_type: TypeRef::of::<T>(),
                qualifiers,
            },
            container,
        )
    }

    /// Handle for a `LazyHandle<X>` injection point: resolves `X` with the
    /// point's qualifiers.
    pub fn from_injection_point(
        injection_point: &InjectionPoint,
        container: Arc<dyn Container>,
    ) -> BindingResult<Self> {
        let requested_type = injection_point
            .ty
            .type_arguments()
            .into_iter()
            .next()
            .ok_or_else(|| {
                BindingError::Configuration(format!(
                    "Lazy injection point {} has no type argument",
                    injection_point.ty
                ))
            })?;
        Self::new(
            ResolutionKey {
                requested_type,
                qualifiers: injection_point.qualifiers.clone(),
            },
            container,
        )
    }

    pub fn key(&self) -> &ResolutionKey {
        &self.key
    }

    pub fn bean(&self) -> BeanId {
        self.bean
    }

    pub fn is_resolved(&self) -> bool {
        self.instance.get().is_some()
    }

    fn resolve_instance(&self) -> BindingResult<Arc<T>> {
        let requested_type = &self.key.requested_type;
        let instance = self
            .container
            .instantiate(self.bean, requested_type)?
            .ok_or_else(|| BindingError::NullResolution(requested_type.clone()))?;
        debug!(%requested_type, bean = ?self.bean, "Lazy handle resolved");
        instance
            .downcast::<T>()
            .map_err(|_| BindingError::TypeMismatch {
                requested_type: requested_type.clone(),
                expected: std::any::type_name::<T>(),
            })
    }
}

impl<T: Any + Send + Sync> Lazy<T> for LazyHandle<T> {
    fn get(&self) -> BindingResult<Arc<T>> {
        // Fast path is a plain load; late arrivals block until the first
        // caller stores its result. Failures are not cached.
        self.instance
            .get_or_try_init(|| self.resolve_instance())
            .map(Arc::clone)
    }
}

impl<T> fmt::Debug for LazyHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyHandle")
            .field("key", &self.key)
            .field("bean", &self.bean)
            .field("resolved", &self.instance.get().is_some())
            .finish()
    }
}
