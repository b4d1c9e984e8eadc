//! Builder descriptors and the modules that group them

use std::fmt;
use std::sync::Arc;

use crate::entity::{Entity, EntitySchema};
use crate::error::FakerResult;
use crate::path::IncludePath;
use crate::rules::RuleSet;

/// Field rules for one target type
///
/// `configure` receives a rule set already holding the inferred defaults for
/// [`FakerDescriptor::Target`]; explicit rules replace them field by field.
/// `includes` names paths replayed whenever the descriptor builds its target,
/// as the root of a build or as a related value inside another graph.
///
/// ```
/// use fluent_faker::prelude::*;
///
/// #[derive(Debug, Default, Entity)]
/// struct Department {
///     id: i32,
///     company_id: i32,
///     name: String,
///     code: String,
/// }
///
/// #[derive(Default)]
/// struct DepartmentFaker;
///
/// impl FakerDescriptor for DepartmentFaker {
///     type Target = Department;
///
///     fn configure(&self, rules: &mut RuleSet) {
///         rules.rule_for("name", |f| f.company_name());
///     }
/// }
/// ```
pub trait FakerDescriptor: Send + Sync + 'static {
    type Target: Entity + Default;

    fn configure(&self, rules: &mut RuleSet);

    /// Include paths applied to every instance this descriptor builds
    fn includes(&self) -> Vec<&'static str> {
        Vec::new()
    }
}

/// Object-safe view of a [`FakerDescriptor`]
pub trait ErasedDescriptor: Send + Sync {
    /// Schema of the target type
    fn target(&self) -> &'static EntitySchema;

    /// Descriptor type name, for diagnostics
    fn name(&self) -> &'static str;

    fn apply_rules(&self, rules: &mut RuleSet);

    fn include_paths(&self) -> Vec<&'static str>;
}

impl<D: FakerDescriptor> ErasedDescriptor for D {
    fn target(&self) -> &'static EntitySchema {
        D::Target::describe()
    }

    fn name(&self) -> &'static str {
        std::any::type_name::<D>()
    }

    fn apply_rules(&self, rules: &mut RuleSet) {
        self.configure(rules);
    }

    fn include_paths(&self) -> Vec<&'static str> {
        self.includes()
    }
}

impl dyn ErasedDescriptor {
    /// Defaults of the target type with this descriptor's rules applied
    pub fn rule_set(&self) -> RuleSet {
        let mut rules = RuleSet::defaults(self.target());
        self.apply_rules(&mut rules);
        rules
    }

    /// Declared include paths resolved against the target type
    pub fn resolve_includes(&self) -> FakerResult<Vec<IncludePath>> {
        self.include_paths()
            .into_iter()
            .map(|expression| IncludePath::resolve(self.target(), expression))
            .collect()
    }
}

impl fmt::Debug for dyn ErasedDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("name", &self.name())
            .field("target", &self.target().name())
            .finish()
    }
}

/// Link-time registration of a descriptor, collected by [`BuilderModule::scan`]
pub struct DescriptorRegistration {
    module_path: &'static str,
    create: fn() -> Arc<dyn ErasedDescriptor>,
}

impl DescriptorRegistration {
    pub const fn new(module_path: &'static str, create: fn() -> Arc<dyn ErasedDescriptor>) -> Self {
        Self { module_path, create }
    }

    pub fn module_path(&self) -> &'static str {
        self.module_path
    }

    pub fn create(&self) -> Arc<dyn ErasedDescriptor> {
        (self.create)()
    }
}

inventory::collect!(DescriptorRegistration);

#[doc(hidden)]
pub fn create_descriptor<D: FakerDescriptor + Default>() -> Arc<dyn ErasedDescriptor> {
    Arc::new(D::default())
}

/// Register a `Default` descriptor type for discovery by [`BuilderModule::scan`]
#[macro_export]
macro_rules! register_descriptor {
    ($descriptor:ty) => {
        $crate::inventory::submit! {
            $crate::registry::DescriptorRegistration::new(
                module_path!(),
                $crate::registry::create_descriptor::<$descriptor>,
            )
        }
    };
}

/// A named source of builder descriptors
#[derive(Clone, Default)]
pub struct BuilderModule {
    name: String,
    descriptors: Vec<Arc<dyn ErasedDescriptor>>,
}

impl BuilderModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptors: Vec::new(),
        }
    }

    /// Add a descriptor
    pub fn with<D: FakerDescriptor>(mut self, descriptor: D) -> Self {
        self.add(descriptor);
        self
    }

    pub fn add<D: FakerDescriptor>(&mut self, descriptor: D) -> &mut Self {
        self.descriptors.push(Arc::new(descriptor));
        self
    }

    /// Collect every descriptor registered with [`register_descriptor!`]
    /// in `module_prefix` or one of its submodules
    ///
    /// Registrations are ordered by module path, then descriptor name.
    pub fn scan(module_prefix: &str) -> Self {
        let mut registrations: Vec<&DescriptorRegistration> = inventory::iter::<DescriptorRegistration>
            .into_iter()
            .filter(|registration| in_module(registration.module_path(), module_prefix))
            .collect();
        registrations.sort_by_key(|registration| registration.module_path());

        let mut descriptors: Vec<Arc<dyn ErasedDescriptor>> = registrations
            .into_iter()
            .map(DescriptorRegistration::create)
            .collect();
        descriptors.sort_by(|a, b| {
            module_of(a.name())
                .cmp(module_of(b.name()))
                .then_with(|| a.name().cmp(b.name()))
        });

        tracing::debug!(
            "Scanned module '{}': {} builder descriptor(s)",
            module_prefix,
            descriptors.len()
        );

        Self {
            name: module_prefix.to_string(),
            descriptors,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn descriptors(&self) -> &[Arc<dyn ErasedDescriptor>] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl fmt::Debug for BuilderModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuilderModule")
            .field("name", &self.name)
            .field("descriptors", &self.descriptors)
            .finish()
    }
}

fn in_module(module_path: &str, prefix: &str) -> bool {
    module_path == prefix
        || module_path
            .strip_prefix(prefix)
            .map(|rest| rest.starts_with("::"))
            .unwrap_or(false)
}

fn module_of(type_name: &str) -> &str {
    type_name.rsplit_once("::").map(|(module, _)| module).unwrap_or("")
}
