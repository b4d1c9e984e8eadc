//! Scalar values produced by rules and copied between entities

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// A scalar field value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int32(i32),
    Int64(i64),
    Decimal(Decimal),
    Double(f64),
    Bool(bool),
    /// Variant index of a fieldless enum
    Enum(usize),
    Text(String),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
}

impl Value {
    /// Short type label used in error messages
    pub fn type_label(&self) -> &'static str {
        match self {
            Value::Int32(_) => "int32",
            Value::Int64(_) => "int64",
            Value::Decimal(_) => "decimal",
            Value::Double(_) => "double",
            Value::Bool(_) => "bool",
            Value::Enum(_) => "enum",
            Value::Text(_) => "text",
            Value::Uuid(_) => "uuid",
            Value::DateTime(_) => "datetime",
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            Value::Int32(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int32(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Enum(v) => write!(f, "#{}", v),
            Value::Text(v) => write!(f, "{}", v),
            Value::Uuid(v) => write!(f, "{}", v),
            Value::DateTime(v) => write!(f, "{}", v.to_rfc3339()),
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

impl_from_scalar! {
    i32 => Int32,
    i64 => Int64,
    Decimal => Decimal,
    f64 => Double,
    bool => Bool,
    String => Text,
    Uuid => Uuid,
    DateTime<Utc> => DateTime,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(Value::from(42), Value::Int32(42));
        assert_eq!(Value::from("Pa$$wOrd!"), Value::Text("Pa$$wOrd!".to_string()));
        assert_eq!(Value::from(7i64).as_i64(), Some(7));
        assert_eq!(Value::from(7).as_i64(), Some(7));
        assert_eq!(Value::from(true).as_i32(), None);
    }

    #[test]
    fn test_type_labels_and_display() {
        assert_eq!(Value::Enum(2).type_label(), "enum");
        assert_eq!(Value::Enum(2).to_string(), "#2");
        assert_eq!(Value::Text("acme".into()).to_string(), "acme");
        assert_eq!(Value::Double(1.5).type_label(), "double");
    }
}
