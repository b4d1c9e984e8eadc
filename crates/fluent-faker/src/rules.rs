//! Per-type field generation rules
//!
//! A [`RuleSet`] maps field names to [`Rule`]s. Defaults are inferred from
//! each field's [`FieldKind`]; builder descriptors and callers layer explicit
//! rules on top. Generator rules are late-bound: they run on every
//! generation, so two instances built from the same rule set get independent
//! values. Literal rules produce the same value for every instance.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::entity::{Entity, EntitySchema, FieldKind};
use crate::error::FakerResult;
use crate::source::ValueSource;
use crate::value::Value;

/// Upper bound (exclusive) of default integer values
pub const DEFAULT_INT_MAX: i32 = 1_000_000_000;

/// Upper bound (exclusive) of default decimal and double values
pub const DEFAULT_FRACTIONAL_MAX: i64 = 1000;

/// Late-bound value generator
pub type Generator = Arc<dyn Fn(&mut dyn ValueSource) -> Value + Send + Sync>;

/// How a single field gets its value
#[derive(Clone)]
pub enum Rule {
    Generate(Generator),
    Literal(Value),
}

impl Rule {
    pub fn generate<V, F>(generator: F) -> Self
    where
        V: Into<Value>,
        F: Fn(&mut dyn ValueSource) -> V + Send + Sync + 'static,
    {
        Rule::Generate(Arc::new(move |source: &mut dyn ValueSource| generator(source).into()))
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Rule::Literal(value.into())
    }

    /// Produce a value for one instance
    pub fn evaluate(&self, source: &mut dyn ValueSource) -> Value {
        match self {
            Rule::Generate(generator) => generator(source),
            Rule::Literal(value) => value.clone(),
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Rule::Literal(_))
    }

    /// Default rule for a field kind, `None` when the kind has no default
    ///
    /// Enum fields always get their first declared variant rather than a
    /// random one.
    pub fn default_for(kind: &FieldKind) -> Option<Self> {
        let rule = match kind {
            FieldKind::Int32 => Rule::generate(|source| source.int(1, DEFAULT_INT_MAX)),
            FieldKind::Int64 => Rule::generate(|source| source.long(1, i64::from(DEFAULT_INT_MAX))),
            FieldKind::Decimal => Rule::generate(|source| source.decimal(1, DEFAULT_FRACTIONAL_MAX)),
            FieldKind::Double => {
                Rule::generate(|source| source.double(1.0, DEFAULT_FRACTIONAL_MAX as f64))
            }
            FieldKind::Enum(_) => Rule::literal(Value::Enum(0)),
            FieldKind::Text => Rule::generate(|source| source.word()),
            FieldKind::Uuid => Rule::generate(|source| source.uuid()),
            FieldKind::DateTime => Rule::generate(|source| source.recent()),
            FieldKind::Bool | FieldKind::Object(_) | FieldKind::Collection(_) | FieldKind::Other => {
                return None
            }
        };
        Some(rule)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Generate(_) => f.write_str("Generate(<fn>)"),
            Rule::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
        }
    }
}

/// Field name to rule mapping for one target type
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: BTreeMap<String, Rule>,
}

impl RuleSet {
    /// Empty rule set
    pub fn new() -> Self {
        Self::default()
    }

    /// Rule set holding the inferred default for every field of `schema`
    pub fn defaults(schema: &EntitySchema) -> Self {
        let rules = schema
            .fields()
            .iter()
            .filter_map(|field| {
                Rule::default_for(&field.kind).map(|rule| (field.name.to_string(), rule))
            })
            .collect();
        Self { rules }
    }

    /// Generate `field` with `generator` on every instance
    pub fn rule_for<V, F>(&mut self, field: &str, generator: F) -> &mut Self
    where
        V: Into<Value>,
        F: Fn(&mut dyn ValueSource) -> V + Send + Sync + 'static,
    {
        self.set(field, Rule::generate(generator))
    }

    /// Give `field` the same literal value on every instance
    pub fn rule_value(&mut self, field: &str, value: impl Into<Value>) -> &mut Self {
        self.set(field, Rule::literal(value))
    }

    pub fn set(&mut self, field: &str, rule: Rule) -> &mut Self {
        self.rules.insert(field.to_string(), rule);
        self
    }

    pub fn remove(&mut self, field: &str) -> Option<Rule> {
        self.rules.remove(field)
    }

    pub fn get(&self, field: &str) -> Option<&Rule> {
        self.rules.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.rules.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Layer `other` on top of this set; its rules win on conflicts
    pub fn merge(&mut self, other: &RuleSet) -> &mut Self {
        for (field, rule) in &other.rules {
            self.rules.insert(field.clone(), rule.clone());
        }
        self
    }

    /// Evaluate every rule into `entity`, in field name order
    pub fn apply(&self, entity: &mut dyn Entity, source: &mut dyn ValueSource) -> FakerResult<()> {
        for (field, rule) in &self.rules {
            let value = rule.evaluate(source);
            tracing::trace!("{}.{} = {}", entity.schema().name(), field, value);
            entity.set_value(field, value)?;
        }
        Ok(())
    }

    /// Instantiate `schema` and populate it from this rule set
    pub fn generate(
        &self,
        schema: &EntitySchema,
        source: &mut dyn ValueSource,
    ) -> FakerResult<Box<dyn Entity>> {
        let mut entity = schema.instantiate()?;
        self.apply(entity.as_mut(), source)?;
        Ok(entity)
    }
}
