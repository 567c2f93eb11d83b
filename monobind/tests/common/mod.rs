//! Shared fixtures: a minimal container that replays discovery through an
//! extension, and the coffee-maker declarations.

#![allow(dead_code)]

use monobind::annotated::{
    ConstructorDeclaration, MethodDeclaration, Parameter, TypeDeclaration,
};
use monobind::container::{BeanId, Instance, ResolutionKey};
use monobind::{
    AnnotatedType, Annotation, Attributes, BeanAttributes, BindingResult, Container, Declaration,
    Extension, ProcessAnnotatedType, ProcessBeanAttributes, TypeRef,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const HEATER: &str = "coffee::simple::Heater";
pub const ELECTRIC_HEATER: &str = "coffee::simple::ElectricHeater";
pub const PUMP: &str = "coffee::simple::Pump";
pub const THERMOSIPHON: &str = "coffee::simple::Thermosiphon";
pub const COFFEE_MAKER: &str = "coffee::simple::CoffeeMaker";
pub const DRIP_COFFEE_MODULE: &str = "coffee::simple::DripCoffeeModule";
pub const PUMP_MODULE: &str = "coffee::simple::PumpModule";
pub const ROOT: &str = "core::any::Any";

pub type Factory = Arc<dyn Fn() -> Option<Instance> + Send + Sync>;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug)]
pub struct RegisteredBean {
    pub declaration: Declaration,
    pub attributes: Arc<dyn BeanAttributes>,
}

/// Beans that survived discovery, plus the ones that were vetoed.
#[derive(Default)]
pub struct TestContainer {
    pub beans: Vec<RegisteredBean>,
    pub vetoed: Vec<Declaration>,
    factories: HashMap<String, Factory>,
    instantiations: AtomicUsize,
}

impl TestContainer {
    pub fn instantiations(&self) -> usize {
        self.instantiations.load(Ordering::SeqCst)
    }

    /// Surviving beans whose base type is `ty`.
    pub fn beans_of(&self, ty: &str) -> Vec<&RegisteredBean> {
        self.beans
            .iter()
            .filter(|b| b.declaration.base_type().name() == ty)
            .collect()
    }

    pub fn is_vetoed(&self, ty: &str) -> bool {
        self.vetoed.iter().any(|d| d.base_type().name() == ty)
    }
}

impl Container for TestContainer {
    fn candidates(&self, key: &ResolutionKey) -> Vec<BeanId> {
        self.beans
            .iter()
            .enumerate()
            .filter(|(_, bean)| {
                bean.attributes.types().contains(&key.requested_type)
                    && key
                        .qualifiers
                        .iter()
                        .all(|q| bean.attributes.qualifiers().contains(q))
            })
            .map(|(idx, _)| BeanId(idx))
            .collect()
    }

    fn instantiate(
        &self,
        bean: BeanId,
        _requested_type: &TypeRef,
    ) -> BindingResult<Option<Instance>> {
        self.instantiations.fetch_add(1, Ordering::SeqCst);
        let Some(registered) = self.beans.get(bean.0) else {
            return Ok(None);
        };
        let key = factory_key(&registered.declaration);
        Ok(self.factories.get(&key).and_then(|factory| factory()))
    }
}

fn factory_key(declaration: &Declaration) -> String {
    match declaration {
        Declaration::Method(m) => format!("{}::{}", m.declaring_type(), m.name()),
        other => other.base_type().name().to_string(),
    }
}

fn qualifiers_of(annotations: &monobind::types::AnnotationSet) -> monobind::types::QualifierSet {
    annotations
        .iter()
        .filter_map(|a| match a {
            Annotation::Qualifier(q) => Some(q.clone()),
            _ => None,
        })
        .collect()
}

/// Declarations to deploy, replayed in container order.
#[derive(Default)]
pub struct Deployment {
    types: Vec<Arc<dyn AnnotatedType>>,
    factories: HashMap<String, Factory>,
}

impl Deployment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, declaration: TypeDeclaration) -> Self {
        self.types.push(Arc::new(declaration));
        self
    }

    /// Factory for a type bean (`"a::X"`) or a producer (`"a::Module::method"`).
    pub fn with_factory<F>(mut self, key: &str, factory: F) -> Self
    where
        F: Fn() -> Option<Instance> + Send + Sync + 'static,
    {
        self.factories.insert(key.to_string(), Arc::new(factory));
        self
    }

    /// Run discovery without any extension: the container's native model.
    pub fn boot_native(self) -> TestContainer {
        self.run(None).expect("native boot")
    }

    pub fn boot(self, extension: &mut dyn Extension) -> BindingResult<TestContainer> {
        self.run(Some(extension))
    }

    fn run(self, mut extension: Option<&mut dyn Extension>) -> BindingResult<TestContainer> {
        if let Some(ext) = extension.as_deref_mut() {
            ext.before_discovery()?;
        }

        let mut views = Vec::new();
        for ty in self.types {
            let mut event = ProcessAnnotatedType::new(ty);
            if let Some(ext) = extension.as_deref_mut() {
                ext.process_annotated_type(&mut event);
            }
            views.push(event.into_annotated_type());
        }

        let mut container = TestContainer {
            factories: self.factories,
            ..TestContainer::default()
        };
        for view in views {
            let mut candidates = vec![(
                Declaration::Type(Arc::clone(&view)),
                Attributes {
                    types: view.type_closure().clone(),
                    qualifiers: qualifiers_of(view.annotations()),
                    ..Attributes::default()
                },
            )];
            for method in view.methods() {
                if method.is_annotation_present(&Annotation::Produces) {
                    candidates.push((
                        Declaration::Method(Arc::clone(method)),
                        Attributes {
                            types: method.type_closure().clone(),
                            qualifiers: qualifiers_of(method.annotations()),
                            ..Attributes::default()
                        },
                    ));
                }
            }

            for (declaration, attributes) in candidates {
                let attributes: Arc<dyn BeanAttributes> = Arc::new(attributes);
                let mut event = ProcessBeanAttributes::new(declaration.clone(), attributes);
                if let Some(ext) = extension.as_deref_mut() {
                    ext.process_bean_attributes(&mut event);
                }
                match event.into_attributes() {
                    Some(attributes) => container.beans.push(RegisteredBean {
                        declaration,
                        attributes,
                    }),
                    None => container.vetoed.push(declaration),
                }
            }
        }

        if let Some(ext) = extension.as_deref_mut() {
            ext.after_discovery();
        }
        Ok(container)
    }
}

#[derive(Debug)]
pub struct Thermosiphon {
    pub heater_hot: bool,
}

#[derive(Debug)]
pub struct ElectricHeater {
    pub hot: bool,
}

/// The coffee-maker deployment: two modules, an injected pump and a plain
/// heater implementation.
pub fn coffee_deployment() -> Deployment {
    Deployment::new()
        .with_type(
            TypeDeclaration::new(DRIP_COFFEE_MODULE)
                .annotated(Annotation::Module)
                .implements(ROOT)
                .with_method(
                    MethodDeclaration::provider("provide_heater", HEATER)
                        .implements(ROOT)
                        .annotated(Annotation::Other("Singleton".to_string())),
                ),
        )
        .with_type(
            TypeDeclaration::new(PUMP_MODULE)
                .annotated(Annotation::Module)
                .implements(ROOT)
                .with_method(
                    MethodDeclaration::provider("provide_pump", PUMP)
                        .implements(ROOT)
                        .with_parameter(Parameter::new(THERMOSIPHON)),
                ),
        )
        .with_type(
            TypeDeclaration::new(THERMOSIPHON)
                .implements(PUMP)
                .implements(ROOT)
                .with_constructor(ConstructorDeclaration::injected(vec![Parameter::new(
                    HEATER,
                )])),
        )
        .with_type(
            TypeDeclaration::new(ELECTRIC_HEATER)
                .implements(HEATER)
                .implements(ROOT)
                .with_constructor(ConstructorDeclaration::default()),
        )
        .with_type(
            TypeDeclaration::new(COFFEE_MAKER)
                .implements(ROOT)
                .with_constructor(ConstructorDeclaration::injected(vec![
                    Parameter::new(TypeRef::lazy_handle_of(&HEATER.into())),
                    Parameter::new(PUMP),
                ])),
        )
        .with_factory(&format!("{}::provide_heater", DRIP_COFFEE_MODULE), || {
            let heater: Instance = Arc::new(ElectricHeater { hot: true });
            Some(heater)
        })
        .with_factory(&format!("{}::provide_pump", PUMP_MODULE), || {
            let pump: Instance = Arc::new(Thermosiphon { heater_hot: true });
            Some(pump)
        })
}
