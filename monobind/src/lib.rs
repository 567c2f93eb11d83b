// monobind
// Single-binding emulation over a multi-type component container

pub mod annotated;
pub mod attributes;
pub mod config;
pub mod container;
pub mod emulation;
pub mod error;
pub mod lazy;
pub mod types;

pub use crate::annotated::{Annotated, AnnotatedMember, AnnotatedMethod, AnnotatedType, Declaration};
pub use crate::attributes::{Attributes, BeanAttributes, RewrittenAttributes};
pub use crate::config::{EmulationConfig, EMULATE_ENV_VAR};
pub use crate::container::{Container, Extension, ProcessAnnotatedType, ProcessBeanAttributes};
pub use crate::emulation::{AttributeDecision, BindingEmulation, Classification, EligibilityFilter};
pub use crate::error::{BindingError, BindingResult};
pub use crate::lazy::{Lazy, LazyHandle};
pub use crate::types::{Annotation, CapabilitySet, Qualifier, TypeRef};
