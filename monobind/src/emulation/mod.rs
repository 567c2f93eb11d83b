//! Single-binding emulation extension.
//!
//! Observes the container's discovery phase and rewrites what each declaration
//! advertises:
//! - types hosting provider methods are replaced by a view presenting those
//!   methods as producers, and each provider return type is recorded;
//! - provider methods and injected components advertise their base type only;
//! - plain components are vetoed, unless their base type is claimed by a
//!   provider and they advertise some other type no provider claims; they then
//!   keep those types.
//!
//! One instance serves exactly one container bootstrap.

pub mod classifier;
pub mod filter;
pub mod producer;
pub mod rewriter;

pub use classifier::{classify, Classification};
pub use filter::EligibilityFilter;
pub use producer::{EmulatedType, ProducerMethod};
pub use rewriter::{decide, AttributeDecision, ProviderReturnTypes};

use crate::annotated::{AnnotatedType, Declaration};
use crate::attributes::BeanAttributes;
use crate::config::EmulationConfig;
use crate::container::{Extension, ProcessAnnotatedType, ProcessBeanAttributes};
use crate::error::BindingResult;
use std::sync::Arc;
use tracing::{debug, info};

/// Counters for one discovery phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryReport {
    pub types_wrapped: usize,
    pub providers_registered: usize,
    pub rewritten: usize,
    pub vetoed: usize,
    pub untouched: usize,
}

#[derive(Debug, Default)]
pub struct BindingEmulation {
    // Explicit configuration; `None` defers to the environment at startup.
    config: Option<EmulationConfig>,
    filter: EligibilityFilter,
    provider_types: ProviderReturnTypes,
    report: DiscoveryReport,
}

impl BindingEmulation {
    /// Extension configured from the environment when discovery starts.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EmulationConfig) -> BindingResult<Self> {
        let filter = config.filter()?;
        Ok(Self {
            config: Some(config),
            filter,
            ..Self::default()
        })
    }

    pub fn filter(&self) -> &EligibilityFilter {
        &self.filter
    }

    pub fn provider_return_types(&self) -> &ProviderReturnTypes {
        &self.provider_types
    }

    pub fn report(&self) -> &DiscoveryReport {
        &self.report
    }

    /// Producer view of `annotated_type`, registering its provider return types.
    ///
    /// `None` when the type is not eligible or hosts no provider method.
    pub fn emulate_type(&mut self, annotated_type: &Arc<dyn AnnotatedType>) -> Option<EmulatedType> {
        if !annotated_type.has_provider_methods()
            || !self.filter.matches_name(annotated_type.base_type().name())
        {
            return None;
        }

        let emulated = EmulatedType::wrap(Arc::clone(annotated_type));
        for method in emulated.producer_methods() {
            debug!(
                declaring_type = %method.declaring_type(),
                method = method.name(),
                return_type = %method.return_type(),
                "Provider method advertised as producer"
            );
            self.provider_types.register(method.return_type().clone());
            self.report.providers_registered += 1;
        }
        self.report.types_wrapped += 1;
        Some(emulated)
    }

    /// Decide what `declaration` may advertise.
    pub fn finalize(
        &self,
        declaration: &Declaration,
        attributes: &dyn BeanAttributes,
    ) -> AttributeDecision {
        let eligible = self.filter.is_eligible(declaration);
        let classification = classify(declaration, &self.filter);
        let decision = decide(
            declaration,
            attributes,
            classification,
            eligible,
            &self.provider_types,
        );
        debug!(
            declaration = %declaration.base_type(),
            owning_type = %declaration.owning_type(),
            %classification,
            eligible,
            ?decision,
            "Bean attributes finalized"
        );
        decision
    }
}

impl Extension for BindingEmulation {
    fn before_discovery(&mut self) -> BindingResult<()> {
        if self.config.is_none() {
            let config = EmulationConfig::from_env();
            self.filter = config.filter()?;
            self.config = Some(config);
        }
        Ok(())
    }

    fn process_annotated_type(&mut self, event: &mut ProcessAnnotatedType) {
        if let Some(emulated) = self.emulate_type(event.annotated_type()) {
            event.set_annotated_type(Arc::new(emulated));
        }
    }

    fn process_bean_attributes(&mut self, event: &mut ProcessBeanAttributes) {
        let decision = self.finalize(event.annotated(), &**event.bean_attributes());
        match decision.apply(event.bean_attributes()) {
            Some(rewritten) => {
                self.report.rewritten += 1;
                event.set_bean_attributes(Arc::new(rewritten));
            }
            None if decision == AttributeDecision::Veto => {
                self.report.vetoed += 1;
                event.veto();
            }
            None => self.report.untouched += 1,
        }
    }

    fn after_discovery(&mut self) {
        info!(
            types_wrapped = self.report.types_wrapped,
            providers = self.report.providers_registered,
            rewritten = self.report.rewritten,
            vetoed = self.report.vetoed,
            untouched = self.report.untouched,
            "Binding emulation finished discovery"
        );
    }
}
