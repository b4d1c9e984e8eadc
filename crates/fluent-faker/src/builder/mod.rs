//! Type-erased graph builder
//!
//! A [`GraphBuilder`] produces instances of one target type. Scalars come from
//! its effective rule set; navigation fields come from the include paths
//! declared by its descriptor and then those declared on the builder itself.
//! Related values are materialized into an
//! [`IncludedValues`] map that belongs to exactly one generated instance: a
//! build moves the map into the instance, and the next build replays every
//! path into a fresh map.

use std::sync::Arc;

use crate::config::{faker_config, FakerConfig};
use crate::entity::{Entity, EntitySchema};
use crate::error::FakerResult;
use crate::path::IncludePath;
use crate::registry::{self, BuilderRegistry, ErasedDescriptor};
use crate::rules::RuleSet;
use crate::source::{RandomSource, ValueSource};

mod backfill;
mod included;
mod materialize;

pub use backfill::{link_member, link_to_owner, ID_FIELD};
pub use included::IncludedValues;
pub use materialize::{attach, fill, nested_rules, Materializer, MAX_NESTING_DEPTH};

/// Builds instances of one target type along declared include paths
pub struct GraphBuilder {
    schema: &'static EntitySchema,
    descriptor: Option<Arc<dyn ErasedDescriptor>>,
    overrides: RuleSet,
    paths: Vec<IncludePath>,
    included: IncludedValues,
    primed: bool,
    source: Box<dyn ValueSource>,
    config: FakerConfig,
}

impl GraphBuilder {
    /// Builder using the process-wide settings
    pub fn new(schema: &'static EntitySchema) -> Self {
        let config = faker_config();
        let source = RandomSource::from_seed(config.seed);
        Self {
            schema,
            descriptor: None,
            overrides: RuleSet::new(),
            paths: Vec::new(),
            included: IncludedValues::new(),
            primed: false,
            source: Box::new(source),
            config,
        }
    }

    pub fn for_type<E: Entity>() -> Self {
        Self::new(E::describe())
    }

    /// Builder with its own settings
    pub fn with_config(schema: &'static EntitySchema, config: FakerConfig) -> FakerResult<Self> {
        config.validate()?;
        let mut builder = Self::new(schema);
        builder.source = Box::new(RandomSource::from_seed(config.seed));
        builder.config = config;
        Ok(builder)
    }

    /// Replace the value source
    pub fn set_source(&mut self, source: Box<dyn ValueSource>) {
        self.source = source;
        self.primed = false;
    }

    /// Use `descriptor`'s rules in place of whatever is registered for the
    /// target type
    pub fn set_descriptor(&mut self, descriptor: Arc<dyn ErasedDescriptor>) {
        self.descriptor = Some(descriptor);
    }

    pub fn schema(&self) -> &'static EntitySchema {
        self.schema
    }

    pub fn config(&self) -> &FakerConfig {
        &self.config
    }

    /// Rules set directly on this builder
    pub fn overrides(&self) -> &RuleSet {
        &self.overrides
    }

    pub fn overrides_mut(&mut self) -> &mut RuleSet {
        &mut self.overrides
    }

    pub fn paths(&self) -> &[IncludePath] {
        &self.paths
    }

    /// Root fields currently materialized for the next build
    pub fn included_fields(&self) -> Vec<&'static str> {
        self.included.fields().collect()
    }

    /// Related values the next build will attach
    pub fn included(&self) -> &IncludedValues {
        &self.included
    }

    /// Rules the next build will apply: inferred defaults, then the
    /// descriptor's rules, then this builder's overrides
    pub fn rules(&self) -> RuleSet {
        self.effective_rules(registry::registry().as_deref())
    }

    /// Include paths the descriptor declares, replayed before [`Self::paths`]
    pub fn declared_paths(&self) -> FakerResult<Vec<IncludePath>> {
        self.descriptor_paths(registry::registry().as_deref())
    }

    /// Explicit descriptor, else the one registered for the target type
    fn effective_descriptor<'r>(
        &'r self,
        registry: Option<&'r BuilderRegistry>,
    ) -> Option<&'r Arc<dyn ErasedDescriptor>> {
        self.descriptor
            .as_ref()
            .or_else(|| registry.and_then(|registry| registry.get(self.schema.type_id())))
    }

    fn descriptor_paths(
        &self,
        registry: Option<&BuilderRegistry>,
    ) -> FakerResult<Vec<IncludePath>> {
        match self.effective_descriptor(registry) {
            Some(descriptor) => descriptor.resolve_includes(),
            None => Ok(Vec::new()),
        }
    }

    fn effective_rules(&self, registry: Option<&BuilderRegistry>) -> RuleSet {
        let mut rules = match self.effective_descriptor(registry) {
            Some(descriptor) => descriptor.rule_set(),
            None => RuleSet::defaults(self.schema),
        };
        rules.merge(&self.overrides);
        rules
    }

    /// Declare an include path and materialize it right away
    ///
    /// A path that fails to resolve or materialize is not kept.
    pub fn include(&mut self, expression: &str) -> FakerResult<&mut Self> {
        let path = IncludePath::resolve(self.schema, expression)?;

        let result = if self.primed {
            let registry = registry::registry();
            let mut materializer = Materializer::new(self.source.as_mut(), &self.config, registry);
            materializer.apply(&mut self.included, &path)
        } else {
            Ok(())
        };

        if let Err(error) = result {
            self.primed = false;
            return Err(error);
        }

        self.paths.push(path);
        if !self.primed {
            if let Err(error) = self.prime() {
                self.paths.pop();
                self.included.clear();
                return Err(error);
            }
        }
        Ok(self)
    }

    /// Replay the descriptor's paths, then every path declared here, into a
    /// fresh map
    fn prime(&mut self) -> FakerResult<()> {
        let registry = registry::registry();
        let mut paths = self.descriptor_paths(registry.as_deref())?;
        paths.extend(self.paths.iter().cloned());

        let mut materializer = Materializer::new(self.source.as_mut(), &self.config, registry);
        self.included = materializer.replay(&paths)?;
        self.primed = true;
        Ok(())
    }

    /// Materialized related values for one instance, leaving the builder
    /// unprimed
    fn take_included(&mut self) -> FakerResult<IncludedValues> {
        if !self.primed {
            self.prime()?;
        }
        self.primed = false;
        Ok(std::mem::take(&mut self.included))
    }

    /// Generate one instance
    pub fn build(&mut self) -> FakerResult<Box<dyn Entity>> {
        let registry = registry::registry();
        let rules = self.effective_rules(registry.as_deref());
        self.generate(&rules)
    }

    /// Generate `count` instances that share no related values
    pub fn build_many(&mut self, count: usize) -> FakerResult<Vec<Box<dyn Entity>>> {
        let registry = registry::registry();
        let rules = self.effective_rules(registry.as_deref());

        tracing::debug!("Building {} x {}", count, self.schema.name());
        (0..count).map(|_| self.generate(&rules)).collect()
    }

    fn generate(&mut self, rules: &RuleSet) -> FakerResult<Box<dyn Entity>> {
        let mut instance = rules.generate(self.schema, self.source.as_mut())?;
        let included = self.take_included()?;
        fill(instance.as_mut(), included)?;
        Ok(instance)
    }
}

impl std::fmt::Debug for GraphBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphBuilder")
            .field("schema", &self.schema.name())
            .field("descriptor", &self.descriptor.as_ref().map(|descriptor| descriptor.name()))
            .field("overrides", &self.overrides)
            .field("paths", &self.paths)
            .field("config", &self.config)
            .finish()
    }
}
