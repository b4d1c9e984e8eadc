//! Process-wide mapping from target type to builder descriptor
//!
//! The registry is populated by [`setup`] and read by every builder when it
//! refreshes its rules and when it constructs related values. A setup call
//! with modules replaces the mapping wholesale; one without modules leaves the
//! current mapping in place.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

use crate::config::{set_faker_config, FakerConfig};
use crate::entity::Entity;
use crate::error::FakerResult;

mod descriptor;

pub use descriptor::{
    create_descriptor, BuilderModule, DescriptorRegistration, ErasedDescriptor, FakerDescriptor,
};

/// Builder descriptors keyed by target type, at most one per type
#[derive(Clone, Default)]
pub struct BuilderRegistry {
    descriptors: HashMap<TypeId, Arc<dyn ErasedDescriptor>>,
}

impl BuilderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every descriptor of `modules`, first registration
    /// per target type winning
    pub fn from_modules(modules: &[BuilderModule]) -> Self {
        let mut registry = Self::new();
        for module in modules {
            for descriptor in module.descriptors() {
                registry.register(Arc::clone(descriptor));
            }
        }
        registry
    }

    /// Add a descriptor; returns false when its target type is already
    /// covered and the descriptor was ignored
    pub fn register(&mut self, descriptor: Arc<dyn ErasedDescriptor>) -> bool {
        let target = descriptor.target();
        if let Some(existing) = self.descriptors.get(&target.type_id()) {
            tracing::warn!(
                "Ignoring builder descriptor {} for {}: already registered by {}",
                descriptor.name(),
                target.name(),
                existing.name()
            );
            return false;
        }

        tracing::debug!("Registered builder descriptor {} for {}", descriptor.name(), target.name());
        self.descriptors.insert(target.type_id(), descriptor);
        true
    }

    pub fn get(&self, type_id: TypeId) -> Option<&Arc<dyn ErasedDescriptor>> {
        self.descriptors.get(&type_id)
    }

    pub fn lookup<E: Entity>(&self) -> Option<&Arc<dyn ErasedDescriptor>> {
        self.get(TypeId::of::<E>())
    }

    pub fn contains(&self, type_id: TypeId) -> bool {
        self.descriptors.contains_key(&type_id)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Names of the registered target types, sorted
    pub fn targets(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .descriptors
            .values()
            .map(|descriptor| descriptor.target().name())
            .collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for BuilderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuilderRegistry")
            .field("targets", &self.targets())
            .finish()
    }
}

/// Options accepted by [`setup`]
#[derive(Debug, Clone, Default)]
pub struct FakerOptions {
    /// Modules to register; `None` leaves the current registry untouched
    pub builder_modules: Option<Vec<BuilderModule>>,
    /// Replacement for the process-wide [`FakerConfig`]
    pub config: Option<FakerConfig>,
}

impl FakerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module(mut self, module: BuilderModule) -> Self {
        self.builder_modules.get_or_insert_with(Vec::new).push(module);
        self
    }

    pub fn with_modules(mut self, modules: impl IntoIterator<Item = BuilderModule>) -> Self {
        self.builder_modules
            .get_or_insert_with(Vec::new)
            .extend(modules);
        self
    }

    pub fn with_config(mut self, config: FakerConfig) -> Self {
        self.config = Some(config);
        self
    }
}

static BUILDER_REGISTRY: Lazy<RwLock<Option<Arc<BuilderRegistry>>>> = Lazy::new(|| RwLock::new(None));

/// Populate the process-wide registry and settings
///
/// Configuration is validated before anything is replaced.
pub fn setup(options: FakerOptions) -> FakerResult<()> {
    if let Some(config) = options.config {
        set_faker_config(config)?;
    }

    let Some(modules) = options.builder_modules else {
        tracing::debug!("Faker setup without builder modules; registry left unchanged");
        return Ok(());
    };

    let registry = BuilderRegistry::from_modules(&modules);
    tracing::info!(
        "Faker setup: {} builder descriptor(s) from {} module(s)",
        registry.len(),
        modules.len()
    );

    *BUILDER_REGISTRY
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(Arc::new(registry));
    Ok(())
}

/// Snapshot of the process-wide registry, `None` before the first setup with
/// modules
pub fn registry() -> Option<Arc<BuilderRegistry>> {
    BUILDER_REGISTRY
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

/// Registered descriptor for a target type
pub fn lookup(type_id: TypeId) -> Option<Arc<dyn ErasedDescriptor>> {
    registry().and_then(|registry| registry.get(type_id).cloned())
}

/// Forget every registration
pub fn reset() {
    *BUILDER_REGISTRY
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
}
