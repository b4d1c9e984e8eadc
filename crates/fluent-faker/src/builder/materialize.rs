//! Include path replay and nested construction

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use super::backfill::{link_member, link_to_owner};
use super::included::IncludedValues;
use crate::config::FakerConfig;
use crate::entity::{Entity, EntityRef, EntitySchema, Related};
use crate::error::{FakerError, FakerResult};
use crate::path::{IncludePath, PathStep};
use crate::registry::BuilderRegistry;
use crate::rules::RuleSet;
use crate::source::ValueSource;

/// How many descriptor-declared include levels may nest inside one another
/// before construction gives up
pub const MAX_NESTING_DEPTH: usize = 16;

/// Rule set for building `schema` as a related value: its registered
/// descriptor's rules, or the inferred defaults
pub fn nested_rules(schema: &'static EntitySchema, registry: Option<&BuilderRegistry>) -> RuleSet {
    match registry.and_then(|registry| registry.get(schema.type_id())) {
        Some(descriptor) => {
            tracing::trace!("Building {} with {}", schema.name(), descriptor.name());
            descriptor.rule_set()
        }
        None => RuleSet::defaults(schema),
    }
}

/// Rules and descriptor include paths for one related type
#[derive(Debug)]
struct NestedPlan {
    rules: RuleSet,
    paths: Vec<IncludePath>,
}

impl NestedPlan {
    fn for_schema(
        schema: &'static EntitySchema,
        registry: Option<&BuilderRegistry>,
    ) -> FakerResult<Self> {
        let paths = match registry.and_then(|registry| registry.get(schema.type_id())) {
            Some(descriptor) => descriptor.resolve_includes()?,
            None => Vec::new(),
        };
        Ok(Self {
            rules: nested_rules(schema, registry),
            paths,
        })
    }
}

/// Builds related values and applies include paths for one generation pass
pub struct Materializer<'a> {
    source: &'a mut dyn ValueSource,
    config: &'a FakerConfig,
    registry: Option<Arc<BuilderRegistry>>,
    plans: HashMap<TypeId, Arc<NestedPlan>>,
    depth: usize,
}

impl<'a> Materializer<'a> {
    pub fn new(
        source: &'a mut dyn ValueSource,
        config: &'a FakerConfig,
        registry: Option<Arc<BuilderRegistry>>,
    ) -> Self {
        Self {
            source,
            config,
            registry,
            plans: HashMap::new(),
            depth: 0,
        }
    }

    /// Apply `paths` in order to a fresh map
    pub fn replay(&mut self, paths: &[IncludePath]) -> FakerResult<IncludedValues> {
        let mut included = IncludedValues::new();
        for path in paths {
            self.apply(&mut included, path)?;
        }
        Ok(included)
    }

    /// Apply one path to `included`, reusing every value already present
    pub fn apply(&mut self, included: &mut IncludedValues, path: &IncludePath) -> FakerResult<()> {
        let Some((first, rest)) = path.steps().split_first() else {
            return Err(FakerError::invalid_argument("path", "include path must not be empty"));
        };

        tracing::debug!("Materializing include path '{}'", path);

        let root = included.get_or_try_insert_with(first.field, || {
            self.construct(first.target, first.collection)
        })?;

        let mut frontier = root.entities_mut();
        for step in rest {
            let mut next = Vec::new();
            for parent in frontier {
                next.extend(self.descend(parent, step)?);
            }
            frontier = next;
        }
        Ok(())
    }

    /// Entities held by `parent.<step.field>`, constructing and linking them
    /// first when the field is unset
    fn descend<'p>(
        &mut self,
        parent: &'p mut dyn Entity,
        step: &PathStep,
    ) -> FakerResult<Vec<&'p mut dyn Entity>> {
        let schema = parent.schema();
        let unset = parent
            .slot(step.field)
            .map(|slot| slot.is_unset())
            .ok_or_else(|| FakerError::property_not_found(schema.name(), step.field))?;

        if unset {
            let mut related = self.construct(step.target, step.collection)?;
            link_to_owner(&*parent, &mut related)?;
            link_member(&mut *parent, step.field, &related)?;
            attach(&mut *parent, step.field, related)?;
        }

        let slot = parent
            .slot_mut(step.field)
            .ok_or_else(|| FakerError::property_not_found(schema.name(), step.field))?;
        Ok(slot.related_mut())
    }

    /// Build a related value of `target`: one instance, or
    /// `collection_size` instances for a collection
    pub fn construct(&mut self, target: EntityRef, collection: bool) -> FakerResult<Related> {
        let schema = target.schema();
        if collection {
            let items = (0..self.config.collection_size)
                .map(|_| self.instance(schema))
                .collect::<FakerResult<Vec<_>>>()?;
            Ok(Related::Many(items))
        } else {
            Ok(Related::One(self.instance(schema)?))
        }
    }

    /// One related instance with its rules applied and the include paths of
    /// its registered descriptor replayed
    fn instance(&mut self, schema: &'static EntitySchema) -> FakerResult<Box<dyn Entity>> {
        let plan = self.plan(schema)?;
        let mut entity = plan.rules.generate(schema, &mut *self.source)?;
        if plan.paths.is_empty() {
            return Ok(entity);
        }

        if self.depth >= MAX_NESTING_DEPTH {
            return Err(FakerError::construction(
                schema.name(),
                format!(
                    "descriptor include paths nest deeper than {} levels",
                    MAX_NESTING_DEPTH
                ),
            ));
        }

        self.depth += 1;
        let included = self.replay(&plan.paths);
        self.depth -= 1;

        fill(entity.as_mut(), included?)?;
        Ok(entity)
    }

    fn plan(&mut self, schema: &'static EntitySchema) -> FakerResult<Arc<NestedPlan>> {
        if let Some(plan) = self.plans.get(&schema.type_id()) {
            return Ok(Arc::clone(plan));
        }
        let plan = Arc::new(NestedPlan::for_schema(schema, self.registry.as_deref())?);
        self.plans.insert(schema.type_id(), Arc::clone(&plan));
        Ok(plan)
    }
}

/// Link `owner` with each included value, then attach the values whose root
/// field is still unset
pub fn fill(owner: &mut dyn Entity, included: IncludedValues) -> FakerResult<()> {
    for (field, mut related) in included {
        link_to_owner(&*owner, &mut related)?;

        let unset = owner.slot(field).map(|slot| slot.is_unset()).unwrap_or(false);
        if unset {
            link_member(&mut *owner, field, &related)?;
            attach(&mut *owner, field, related)?;
        } else {
            tracing::trace!("{}.{} already set; keeping it", owner.schema().name(), field);
        }
    }
    Ok(())
}

/// Store `related` in `owner.<field>`
pub fn attach(owner: &mut dyn Entity, field: &str, related: Related) -> FakerResult<()> {
    let schema = owner.schema();
    let slot = owner
        .slot_mut(field)
        .ok_or_else(|| FakerError::property_not_found(schema.name(), field))?;

    slot.attach(related).map_err(|rejected| {
        FakerError::construction(
            schema.name(),
            format!(
                "field '{}' cannot hold {} related value(s)",
                field,
                rejected.len()
            ),
        )
    })
}
