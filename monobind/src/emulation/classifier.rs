//! Declaration roles under the single-binding model.
//!
//! A binding is only ever constructed for a type with an injected constructor or
//! from a provider method. Modules stay ordinary producer hosts, and the lazy
//! handle is infrastructure that is never rebound.

use super::filter::EligibilityFilter;
use crate::annotated::Declaration;
use crate::types::Annotation;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Type annotated as a module.
    Module,
    /// Type declaration of the lazy handle itself.
    LazyHandleType,
    /// The declaration is itself a provider method.
    ProviderMethodHost,
    /// Type with at least one injected constructor.
    InjectedComponent,
    /// No binding role, or not eligible.
    Unbound,
}

impl Classification {
    /// Declarations left exactly as the container discovered them.
    pub fn is_infrastructure(self) -> bool {
        matches!(self, Classification::Module | Classification::LazyHandleType)
    }

    /// Roles that bind exactly one type.
    pub fn is_binding(self) -> bool {
        matches!(
            self,
            Classification::ProviderMethodHost | Classification::InjectedComponent
        )
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Classification::Module => "module",
            Classification::LazyHandleType => "lazy-handle",
            Classification::ProviderMethodHost => "provider-method",
            Classification::InjectedComponent => "injected-component",
            Classification::Unbound => "unbound",
        };
        f.write_str(label)
    }
}

pub fn classify(declaration: &Declaration, filter: &EligibilityFilter) -> Classification {
    if !filter.is_eligible(declaration) {
        return Classification::Unbound;
    }
    classify_role(declaration)
}

/// Role of a declaration, ignoring eligibility.
pub fn classify_role(declaration: &Declaration) -> Classification {
    if declaration.is_annotation_present(&Annotation::Module) {
        return Classification::Module;
    }
    match declaration {
        Declaration::Type(ty) if ty.base_type().is_lazy_handle() => Classification::LazyHandleType,
        Declaration::Method(method) if method.is_annotation_present(&Annotation::Provides) => {
            Classification::ProviderMethodHost
        }
        Declaration::Type(ty) if ty.has_injected_constructor() => {
            Classification::InjectedComponent
        }
        _ => Classification::Unbound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotated::{
        ConstructorDeclaration, FieldDeclaration, MethodDeclaration, Parameter, TypeDeclaration,
    };
    use crate::types::TypeRef;

    fn all() -> EligibilityFilter {
        EligibilityFilter::all()
    }

    #[test]
    fn test_module_wins_over_injected_constructor() {
        let module: Declaration = TypeDeclaration::new("coffee::PumpModule")
            .annotated(Annotation::Module)
            .with_constructor(ConstructorDeclaration::injected(vec![]))
            .into();
        assert_eq!(classify(&module, &all()), Classification::Module);
    }

    #[test]
    fn test_lazy_handle_type_is_infrastructure() {
        let lazy: Declaration = TypeDeclaration::new(TypeRef::lazy_handle_of(&"coffee::Heater".into()))
            .with_constructor(ConstructorDeclaration::injected(vec![]))
            .into();
        let class = classify(&lazy, &all());
        assert_eq!(class, Classification::LazyHandleType);
        assert!(class.is_infrastructure());
    }

    #[test]
    fn test_provider_of_lazy_handle_is_rebound() {
        let lazy = TypeRef::lazy_handle_of(&"coffee::Heater".into());
        let method: Declaration = MethodDeclaration::provider("provide_lazy_heater", lazy)
            .declared_by("coffee::DripCoffeeModule".into())
            .into();
        assert_eq!(classify(&method, &all()), Classification::ProviderMethodHost);
    }

    #[test]
    fn test_provider_method() {
        let method: Declaration = MethodDeclaration::provider("provide_pump", "coffee::Pump")
            .declared_by("coffee::PumpModule".into())
            .with_parameter(Parameter::new("coffee::Thermosiphon"))
            .into();
        assert_eq!(classify(&method, &all()), Classification::ProviderMethodHost);

        let plain: Declaration = MethodDeclaration::new("helper", "coffee::Pump")
            .declared_by("coffee::PumpModule".into())
            .into();
        assert_eq!(classify(&plain, &all()), Classification::Unbound);
    }

    #[test]
    fn test_injected_component_and_plain_type() {
        let thermosiphon: Declaration = TypeDeclaration::new("coffee::Thermosiphon")
            .implements("coffee::Pump")
            .with_constructor(ConstructorDeclaration::injected(vec![Parameter::new(
                "coffee::Heater",
            )]))
            .into();
        assert_eq!(classify(&thermosiphon, &all()), Classification::InjectedComponent);

        let heater: Declaration = TypeDeclaration::new("coffee::ElectricHeater")
            .implements("coffee::Heater")
            .with_constructor(ConstructorDeclaration::default())
            .into();
        assert_eq!(classify(&heater, &all()), Classification::Unbound);
    }

    #[test]
    fn test_fields_are_unbound() {
        let field: Declaration = FieldDeclaration::new("pump", "coffee::Pump").into();
        assert_eq!(classify(&field, &all()), Classification::Unbound);
    }

    #[test]
    fn test_ineligible_declarations_are_unbound() {
        let filter = EligibilityFilter::with_pattern(r"coffee::simple::.*").unwrap();
        let module: Declaration = TypeDeclaration::new("coffee::other::PumpModule")
            .annotated(Annotation::Module)
            .into();
        assert_eq!(classify(&module, &filter), Classification::Unbound);
        assert_eq!(classify_role(&module), Classification::Module);
    }
}
