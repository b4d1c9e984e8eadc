//! Typed fluent builder

use std::marker::PhantomData;
use std::sync::Arc;

use crate::builder::GraphBuilder;
use crate::config::FakerConfig;
use crate::entity::Entity;
use crate::error::FakerResult;
use crate::path::IncludePath;
use crate::registry::FakerDescriptor;
use crate::rules::RuleSet;
use crate::source::ValueSource;
use crate::value::Value;

/// Fluent builder for one target type
///
/// ```
/// use fluent_faker::prelude::*;
///
/// #[derive(Debug, Default, Entity)]
/// struct Company {
///     id: i32,
///     name: String,
///     departments: Vec<Department>,
/// }
///
/// #[derive(Debug, Default, Entity)]
/// struct Department {
///     id: i32,
///     company_id: i32,
/// }
///
/// let company = FluentFaker::<Company>::new()
///     .rule_value("name", "Initech")
///     .include("departments")?
///     .build()?;
///
/// assert_eq!(company.name, "Initech");
/// assert!(company.departments.iter().all(|d| d.company_id == company.id));
/// # Ok::<(), fluent_faker::FakerError>(())
/// ```
pub struct FluentFaker<T> {
    builder: GraphBuilder,
    _target: PhantomData<fn() -> T>,
}

impl<T: Entity + Default> FluentFaker<T> {
    pub fn new() -> Self {
        Self::from_builder(GraphBuilder::for_type::<T>())
    }

    /// Builder with its own settings instead of the process-wide ones
    pub fn with_config(config: FakerConfig) -> FakerResult<Self> {
        Ok(Self::from_builder(GraphBuilder::with_config(T::describe(), config)?))
    }

    /// Builder starting from `descriptor`'s rules, whether or not it is
    /// registered
    pub fn from_descriptor<D>(descriptor: D) -> Self
    where
        D: FakerDescriptor<Target = T>,
    {
        let mut builder = GraphBuilder::for_type::<T>();
        builder.set_descriptor(Arc::new(descriptor));
        Self::from_builder(builder)
    }

    fn from_builder(builder: GraphBuilder) -> Self {
        Self {
            builder,
            _target: PhantomData,
        }
    }

    pub fn with_source(mut self, source: impl ValueSource + 'static) -> Self {
        self.builder.set_source(Box::new(source));
        self
    }

    /// Generate `field` with `generator` on every instance
    pub fn rule_for<V, F>(mut self, field: &str, generator: F) -> Self
    where
        V: Into<Value>,
        F: Fn(&mut dyn ValueSource) -> V + Send + Sync + 'static,
    {
        self.builder.overrides_mut().rule_for(field, generator);
        self
    }

    /// Give `field` the same value on every instance
    pub fn rule_value(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.builder.overrides_mut().rule_value(field, value);
        self
    }

    /// Declare an include path such as `"company.billing_address"`
    pub fn include(mut self, expression: &str) -> FakerResult<Self> {
        self.builder.include(expression)?;
        Ok(self)
    }

    pub fn build(&mut self) -> FakerResult<T> {
        let entity = self.builder.build()?;
        Ok(*entity.downcast::<T>()?)
    }

    pub fn build_many(&mut self, count: usize) -> FakerResult<Vec<T>> {
        self.builder
            .build_many(count)?
            .into_iter()
            .map(|entity| entity.downcast::<T>().map(|instance| *instance))
            .collect()
    }

    /// Rules the next build applies
    pub fn rules(&self) -> RuleSet {
        self.builder.rules()
    }

    pub fn paths(&self) -> &[IncludePath] {
        self.builder.paths()
    }

    pub fn builder(&self) -> &GraphBuilder {
        &self.builder
    }

    pub fn builder_mut(&mut self) -> &mut GraphBuilder {
        &mut self.builder
    }
}

impl<T: Entity + Default> Default for FluentFaker<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for FluentFaker<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("FluentFaker").field(&self.builder).finish()
    }
}
