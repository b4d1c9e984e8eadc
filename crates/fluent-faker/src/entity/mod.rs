//! Runtime field introspection for target types
//!
//! Every target type carries an [`EntitySchema`] built once per type and cached
//! by type identity. The schema enumerates the writable fields and their
//! semantic kind, and [`FieldSlot`] gives typed get/set access to a single
//! field without knowing the concrete struct. `#[derive(Entity)]` generates
//! both for structs with named fields.

use std::any::{Any, TypeId};
use std::fmt;

use crate::error::{FakerError, FakerResult};
use crate::value::Value;

mod slot;

pub use slot::{FieldSlot, Opaque};

/// A structured type whose fields can be enumerated and written at runtime
pub trait Entity: Any + Send + fmt::Debug {
    /// Cached schema of the implementing type
    fn describe() -> &'static EntitySchema
    where
        Self: Sized;

    /// Schema of this instance's concrete type
    fn schema(&self) -> &'static EntitySchema;

    fn slot(&self, field: &str) -> Option<&dyn FieldSlot>;

    fn slot_mut(&mut self, field: &str) -> Option<&mut dyn FieldSlot>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl dyn Entity {
    /// Read a scalar field, `None` when the field is missing or unset
    pub fn value_of(&self, field: &str) -> Option<Value> {
        self.slot(field).and_then(|slot| slot.get())
    }

    /// Write a scalar field
    pub fn set_value(&mut self, field: &str, value: Value) -> FakerResult<()> {
        let schema = self.schema();
        let slot = self
            .slot_mut(field)
            .ok_or_else(|| FakerError::property_not_found(schema.name(), field))?;

        slot.set(value).map_err(|rejected| {
            let expected = Self::kind_label(schema, field);
            FakerError::value_mismatch(schema.name(), field, expected, rejected.type_label())
        })
    }

    pub fn downcast_ref<E: Entity>(&self) -> Option<&E> {
        self.as_any().downcast_ref::<E>()
    }

    /// Recover the concrete type of a boxed entity
    pub fn downcast<E: Entity>(self: Box<Self>) -> FakerResult<Box<E>> {
        let found = self.schema().name();
        self.into_any().downcast::<E>().map_err(|_| {
            FakerError::construction(
                std::any::type_name::<E>(),
                format!("generated value has type '{}'", found),
            )
        })
    }

    fn kind_label(schema: &EntitySchema, field: &str) -> &'static str {
        schema
            .field(field)
            .map(|info| info.kind.label())
            .unwrap_or("unknown")
    }
}

/// Semantic kind of a field, used to infer default rules and navigation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Int32,
    Int64,
    Decimal,
    Double,
    Bool,
    /// Fieldless enum, listing its variant names in declaration order
    Enum(&'static [&'static str]),
    Text,
    Uuid,
    DateTime,
    /// Single related entity (`Option<Box<E>>`)
    Object(EntityRef),
    /// Collection of related entities (`Vec<E>`)
    Collection(EntityRef),
    Other,
}

impl FieldKind {
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Int32 => "int32",
            FieldKind::Int64 => "int64",
            FieldKind::Decimal => "decimal",
            FieldKind::Double => "double",
            FieldKind::Bool => "bool",
            FieldKind::Enum(_) => "enum",
            FieldKind::Text => "text",
            FieldKind::Uuid => "uuid",
            FieldKind::DateTime => "datetime",
            FieldKind::Object(_) => "object",
            FieldKind::Collection(_) => "collection",
            FieldKind::Other => "other",
        }
    }

    /// Related entity type of a navigation field
    pub fn navigation(&self) -> Option<EntityRef> {
        match self {
            FieldKind::Object(target) | FieldKind::Collection(target) => Some(*target),
            _ => None,
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, FieldKind::Collection(_))
    }
}

/// Lazily resolved handle to another entity type's schema
///
/// Resolution is deferred so that mutually referencing types (a company
/// listing departments that point back at the company) can build their
/// schemas independently.
#[derive(Clone, Copy)]
pub struct EntityRef(fn() -> &'static EntitySchema);

impl EntityRef {
    pub fn of<E: Entity>() -> Self {
        Self(E::describe)
    }

    pub fn schema(&self) -> &'static EntitySchema {
        (self.0)()
    }
}

impl PartialEq for EntityRef {
    fn eq(&self, other: &Self) -> bool {
        self.schema().type_id() == other.schema().type_id()
    }
}

impl fmt::Debug for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntityRef").field(&self.schema().name()).finish()
    }
}

/// Name and kind of one writable field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldInfo {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldInfo {
    pub fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// Field descriptors of one target type
pub struct EntitySchema {
    name: &'static str,
    foreign_key: &'static str,
    type_id: TypeId,
    fields: Vec<FieldInfo>,
    instantiate: Option<fn() -> Box<dyn Entity>>,
}

fn instantiate_default<E: Entity + Default>() -> Box<dyn Entity> {
    Box::new(E::default())
}

impl EntitySchema {
    /// Schema for a type constructible through `Default`
    ///
    /// `foreign_key` is the field name other types use to reference this one
    /// (`company_id` for `Company`).
    pub fn new<E: Entity + Default>(
        name: &'static str,
        foreign_key: &'static str,
        fields: Vec<FieldInfo>,
    ) -> Self {
        Self {
            name,
            foreign_key,
            type_id: TypeId::of::<E>(),
            fields,
            instantiate: Some(instantiate_default::<E>),
        }
    }

    /// Schema for a type that can be described but not constructed
    pub fn without_constructor<E: Entity>(
        name: &'static str,
        foreign_key: &'static str,
        fields: Vec<FieldInfo>,
    ) -> Self {
        Self {
            name,
            foreign_key,
            type_id: TypeId::of::<E>(),
            fields,
            instantiate: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn foreign_key(&self) -> &'static str {
        self.foreign_key
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Navigation fields (single and collection)
    pub fn navigations(&self) -> impl Iterator<Item = &FieldInfo> {
        self.fields.iter().filter(|field| field.kind.navigation().is_some())
    }

    /// Create an empty instance of this type
    pub fn instantiate(&self) -> FakerResult<Box<dyn Entity>> {
        let constructor = self
            .instantiate
            .ok_or_else(|| FakerError::construction(self.name, "type has no usable constructor"))?;
        Ok(constructor())
    }
}

impl fmt::Debug for EntitySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntitySchema")
            .field("name", &self.name)
            .field("foreign_key", &self.foreign_key)
            .field("fields", &self.fields)
            .field("constructible", &self.instantiate.is_some())
            .finish()
    }
}

/// A materialized related value: one entity or a collection of them
#[derive(Debug)]
pub enum Related {
    One(Box<dyn Entity>),
    Many(Vec<Box<dyn Entity>>),
}

impl Related {
    /// Every entity held, one for `One`, each item for `Many`
    pub fn entities_mut(&mut self) -> Vec<&mut dyn Entity> {
        match self {
            Related::One(entity) => vec![entity.as_mut()],
            Related::Many(items) => items.iter_mut().map(|item| item.as_mut()).collect(),
        }
    }

    /// The single entity, if this is not a collection
    pub fn single(&self) -> Option<&dyn Entity> {
        match self {
            Related::One(entity) => Some(entity.as_ref()),
            Related::Many(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Related::One(_) => 1,
            Related::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_many(&self) -> bool {
        matches!(self, Related::Many(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, fluent_faker::Entity)]
    struct Office {
        id: i32,
        city: String,
        manager: Option<Box<Manager>>,
    }

    #[derive(Debug, Default, fluent_faker::Entity)]
    struct Manager {
        id: i64,
        office_id: Option<i32>,
        offices: Vec<Office>,
    }

    #[test]
    fn test_schema_describes_fields() {
        let schema = Office::describe();
        assert_eq!(schema.name(), "Office");
        assert_eq!(schema.foreign_key(), "office_id");
        assert_eq!(schema.fields().len(), 3);
        assert_eq!(schema.field("id").map(|f| f.kind), Some(FieldKind::Int32));
        assert_eq!(schema.field("city").map(|f| f.kind), Some(FieldKind::Text));
        assert_eq!(
            schema.field("manager").map(|f| f.kind),
            Some(FieldKind::Object(EntityRef::of::<Manager>()))
        );
        assert!(schema.field("missing").is_none());
    }

    #[test]
    fn test_mutually_referencing_schemas() {
        let manager = Manager::describe();
        let offices = manager.field("offices").expect("offices field");
        assert!(offices.kind.is_collection());
        let target = offices.kind.navigation().expect("navigation");
        assert_eq!(target.schema().name(), "Office");
        assert_eq!(manager.navigations().count(), 1);
        assert!(std::ptr::eq(Manager::describe(), manager));
    }

    #[test]
    fn test_dyn_value_access() {
        let mut office: Box<dyn Entity> = Office::describe().instantiate().unwrap();
        office.set_value("id", Value::Int32(7)).unwrap();
        office.set_value("city", Value::from("Springfield")).unwrap();

        assert_eq!(office.value_of("id"), Some(Value::Int32(7)));
        assert_eq!(office.value_of("nope"), None);

        let err = office.set_value("id", Value::from("seven")).unwrap_err();
        assert_eq!(err, FakerError::value_mismatch("Office", "id", "int32", "text"));

        let err = office.set_value("floor", Value::Int32(1)).unwrap_err();
        assert!(err.is_property_not_found());

        let office = office.downcast::<Office>().unwrap();
        assert_eq!(office.city, "Springfield");
    }

    #[test]
    fn test_downcast_to_wrong_type_fails() {
        let office = Office::describe().instantiate().unwrap();
        assert!(office.downcast_ref::<Manager>().is_none());
        let err = office.downcast::<Manager>().unwrap_err();
        assert!(matches!(err, FakerError::Construction { .. }));
    }

    #[test]
    fn test_related_accessors() {
        let mut one = Related::One(Box::new(Office::default()));
        assert_eq!(one.len(), 1);
        assert!(one.single().is_some());
        assert_eq!(one.entities_mut().len(), 1);

        let mut many = Related::Many(vec![Box::new(Office::default()), Box::new(Office::default())]);
        assert!(many.is_many());
        assert!(many.single().is_none());
        assert_eq!(many.entities_mut().len(), 2);
        assert!(Related::Many(Vec::new()).is_empty());
    }
}
