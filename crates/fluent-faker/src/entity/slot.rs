//! Typed access to a single field behind a type-erased interface

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{Entity, EntityRef, FieldKind, Related};
use crate::value::Value;

/// Get/set accessor for one field of an entity
///
/// Writers hand back the rejected value or related entity when the field
/// cannot hold it, so callers can report which field and type mismatched.
pub trait FieldSlot: Send {
    /// Semantic kind of fields of this type
    fn kind() -> FieldKind
    where
        Self: Sized;

    /// Current scalar value; `None` for navigation fields and unset options
    fn get(&self) -> Option<Value> {
        None
    }

    /// Overwrite with a scalar value
    fn set(&mut self, value: Value) -> Result<(), Value> {
        Err(value)
    }

    /// Whether a navigation or optional field holds nothing yet
    fn is_unset(&self) -> bool {
        false
    }

    /// Store a materialized related value in a navigation field
    fn attach(&mut self, related: Related) -> Result<(), Related> {
        Err(related)
    }

    /// Related entities currently held: zero or one for a single navigation,
    /// every item for a collection
    fn related_mut(&mut self) -> Vec<&mut dyn Entity> {
        Vec::new()
    }
}

macro_rules! scalar_slot {
    ($ty:ty, $kind:ident, |$value:ident| $extract:expr) => {
        impl FieldSlot for $ty {
            fn kind() -> FieldKind {
                FieldKind::$kind
            }

            fn get(&self) -> Option<Value> {
                Some(Value::from(self.clone()))
            }

            fn set(&mut self, $value: Value) -> Result<(), Value> {
                *self = $extract?;
                Ok(())
            }
        }

        impl FieldSlot for Option<$ty> {
            fn kind() -> FieldKind {
                FieldKind::$kind
            }

            fn get(&self) -> Option<Value> {
                self.clone().map(Value::from)
            }

            fn set(&mut self, $value: Value) -> Result<(), Value> {
                *self = Some($extract?);
                Ok(())
            }

            fn is_unset(&self) -> bool {
                self.is_none()
            }
        }
    };
}

scalar_slot!(i32, Int32, |value| match value {
    Value::Int32(v) => Ok(v),
    other => Err(other),
});

scalar_slot!(i64, Int64, |value| match value {
    Value::Int64(v) => Ok(v),
    Value::Int32(v) => Ok(i64::from(v)),
    other => Err(other),
});

scalar_slot!(Decimal, Decimal, |value| match value {
    Value::Decimal(v) => Ok(v),
    other => Err(other),
});

scalar_slot!(f64, Double, |value| match value {
    Value::Double(v) => Ok(v),
    other => Err(other),
});

scalar_slot!(bool, Bool, |value| match value {
    Value::Bool(v) => Ok(v),
    other => Err(other),
});

scalar_slot!(String, Text, |value| match value {
    Value::Text(v) => Ok(v),
    other => Err(other),
});

scalar_slot!(Uuid, Uuid, |value| match value {
    Value::Uuid(v) => Ok(v),
    other => Err(other),
});

scalar_slot!(DateTime<Utc>, DateTime, |value| match value {
    Value::DateTime(v) => Ok(v),
    other => Err(other),
});

/// Integers with no default rule: readable as `Int64`, writable from any
/// integer value that fits
macro_rules! integer_slot {
    ($($ty:ty),*) => {
        $(
            impl FieldSlot for $ty {
                fn kind() -> FieldKind {
                    FieldKind::Other
                }

                fn get(&self) -> Option<Value> {
                    i64::try_from(*self).ok().map(Value::Int64)
                }

                fn set(&mut self, value: Value) -> Result<(), Value> {
                    *self = narrow_integer(value)?;
                    Ok(())
                }
            }

            impl FieldSlot for Option<$ty> {
                fn kind() -> FieldKind {
                    FieldKind::Other
                }

                fn get(&self) -> Option<Value> {
                    self.and_then(|v| i64::try_from(v).ok()).map(Value::Int64)
                }

                fn set(&mut self, value: Value) -> Result<(), Value> {
                    *self = Some(narrow_integer(value)?);
                    Ok(())
                }

                fn is_unset(&self) -> bool {
                    self.is_none()
                }
            }
        )*
    };
}

fn narrow_integer<T: TryFrom<i64>>(value: Value) -> Result<T, Value> {
    match value.as_i64().map(T::try_from) {
        Some(Ok(v)) => Ok(v),
        _ => Err(value),
    }
}

integer_slot!(u8, u16, u32, u64, usize, i8, i16, isize);

impl FieldSlot for f32 {
    fn kind() -> FieldKind {
        FieldKind::Other
    }

    fn get(&self) -> Option<Value> {
        Some(Value::Double(f64::from(*self)))
    }

    fn set(&mut self, value: Value) -> Result<(), Value> {
        match value {
            Value::Double(v) => {
                *self = v as f32;
                Ok(())
            }
            other => Err(other),
        }
    }
}

/// Accessor for a `#[fake(other)]` field, whose type has no slot of its own
///
/// The field shows up in its entity's schema as [`FieldKind::Other`] but is
/// never read or written, so it keeps its `Default` value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Opaque;

impl Opaque {
    pub fn slot() -> &'static dyn FieldSlot {
        &Opaque
    }

    pub fn slot_mut() -> &'static mut dyn FieldSlot {
        // zero-sized: leaking the box allocates nothing
        Box::leak(Box::new(Opaque))
    }
}

impl FieldSlot for Opaque {
    fn kind() -> FieldKind {
        FieldKind::Other
    }
}

impl<E: Entity> FieldSlot for Option<Box<E>> {
    fn kind() -> FieldKind {
        FieldKind::Object(EntityRef::of::<E>())
    }

    fn is_unset(&self) -> bool {
        self.is_none()
    }

    fn attach(&mut self, related: Related) -> Result<(), Related> {
        let Related::One(entity) = related else {
            return Err(related);
        };
        if !entity.as_any().is::<E>() {
            return Err(Related::One(entity));
        }
        if let Ok(entity) = entity.into_any().downcast::<E>() {
            *self = Some(entity);
        }
        Ok(())
    }

    fn related_mut(&mut self) -> Vec<&mut dyn Entity> {
        match self {
            Some(entity) => vec![entity.as_mut() as &mut dyn Entity],
            None => Vec::new(),
        }
    }
}

impl<E: Entity> FieldSlot for Vec<E> {
    fn kind() -> FieldKind {
        FieldKind::Collection(EntityRef::of::<E>())
    }

    fn is_unset(&self) -> bool {
        self.is_empty()
    }

    fn attach(&mut self, related: Related) -> Result<(), Related> {
        let Related::Many(items) = related else {
            return Err(related);
        };
        if !items.iter().all(|item| item.as_any().is::<E>()) {
            return Err(Related::Many(items));
        }
        *self = items
            .into_iter()
            .filter_map(|item| item.into_any().downcast::<E>().ok())
            .map(|item| *item)
            .collect();
        Ok(())
    }

    fn related_mut(&mut self) -> Vec<&mut dyn Entity> {
        self.iter_mut().map(|item| item as &mut dyn Entity).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, fluent_faker::Entity)]
    struct Badge {
        id: i32,
        label: String,
    }

    #[derive(Debug, Default, fluent_faker::Entity)]
    struct Holder {
        id: i32,
    }

    #[test]
    fn test_scalar_slots() {
        let mut id = 0i32;
        assert_eq!(<i32 as FieldSlot>::kind(), FieldKind::Int32);
        assert!(id.set(Value::Int32(5)).is_ok());
        assert_eq!(id.get(), Some(Value::Int32(5)));
        assert_eq!(id.set(Value::Bool(true)), Err(Value::Bool(true)));
        assert!(!id.is_unset());

        let mut wide = 0i64;
        wide.set(Value::Int32(12)).unwrap();
        assert_eq!(wide, 12);
    }

    #[test]
    fn test_optional_scalar_slots() {
        let mut company_id: Option<i32> = None;
        assert!(company_id.is_unset());
        assert_eq!(company_id.get(), None);
        company_id.set(Value::Int32(99)).unwrap();
        assert_eq!(company_id, Some(99));
        assert!(!company_id.is_unset());
    }

    #[test]
    fn test_unruled_primitive_slots() {
        assert_eq!(<u32 as FieldSlot>::kind(), FieldKind::Other);
        assert_eq!(<Option<i16> as FieldSlot>::kind(), FieldKind::Other);
        assert_eq!(<f32 as FieldSlot>::kind(), FieldKind::Other);

        let mut reading = 0u32;
        reading.set(Value::Int32(42)).unwrap();
        assert_eq!(reading, 42);
        assert_eq!(reading.get(), Some(Value::Int64(42)));
        assert_eq!(reading.set(Value::Int32(-1)), Err(Value::Int32(-1)));
        assert_eq!(reading, 42);

        let mut level: Option<u8> = None;
        assert!(level.is_unset());
        assert_eq!(level.set(Value::Int64(300)), Err(Value::Int64(300)));
        level.set(Value::Int64(7)).unwrap();
        assert_eq!(level, Some(7));

        let mut ratio = 0f32;
        ratio.set(Value::Double(0.5)).unwrap();
        assert_eq!(ratio.get(), Some(Value::Double(0.5)));
        assert!(ratio.set(Value::Int32(1)).is_err());
    }

    #[test]
    fn test_opaque_slot_rejects_everything() {
        assert_eq!(<Opaque as FieldSlot>::kind(), FieldKind::Other);
        assert_eq!(Opaque::slot().get(), None);
        assert!(!Opaque::slot().is_unset());

        let slot = Opaque::slot_mut();
        assert_eq!(slot.set(Value::Int32(1)), Err(Value::Int32(1)));
        assert!(slot.attach(Related::Many(Vec::new())).is_err());
        assert!(slot.related_mut().is_empty());
    }

    #[test]
    fn test_single_navigation_slot() {
        let mut badge: Option<Box<Badge>> = None;
        assert!(badge.is_unset());
        assert!(badge.related_mut().is_empty());

        let rejected = badge.attach(Related::One(Box::new(Holder::default())));
        assert!(rejected.is_err());
        assert!(badge.is_none());

        badge
            .attach(Related::One(Box::new(Badge { id: 3, label: "gold".into() })))
            .unwrap();
        assert_eq!(badge.as_ref().map(|b| b.id), Some(3));
        assert_eq!(badge.related_mut().len(), 1);
        assert!(badge.set(Value::Int32(1)).is_err());
    }

    #[test]
    fn test_collection_slot() {
        let mut badges: Vec<Badge> = Vec::new();
        assert!(badges.is_unset());
        assert!(badges.attach(Related::One(Box::new(Badge::default()))).is_err());

        let items: Vec<Box<dyn Entity>> = vec![Box::new(Badge::default()), Box::new(Badge::default())];
        badges.attach(Related::Many(items)).unwrap();
        assert_eq!(badges.len(), 2);
        assert_eq!(badges.related_mut().len(), 2);

        let mixed: Vec<Box<dyn Entity>> = vec![Box::new(Badge::default()), Box::new(Holder::default())];
        let mut other: Vec<Badge> = Vec::new();
        assert!(other.attach(Related::Many(mixed)).is_err());
        assert!(other.is_empty());
    }
}
