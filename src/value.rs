//! Mapping between Rust types and the engine's semantic types.
//!
//! [`FieldValue`] is implemented for the built-in primitives, the chrono
//! temporal types, `Option<T>` and `Vec<T>`. User types join in through
//! [`named_scalar!`](crate::named_scalar) (a newtype over a supported type) or
//! [`text_codec!`](crate::text_codec) (a type with its own text decoding).

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

use crate::context::Context;
use crate::error::{BoxError, FillError};
use crate::time::UnixTime;
use crate::types::{SemanticType, Value};

/// Semantic validation hook, invoked after all values are assigned.
pub trait Validate {
    fn validate(&self, ctx: &Context) -> Result<(), BoxError>;
}

/// Custom text decoding for a type. Takes priority over every built-in
/// coercion, including list splitting.
pub trait TextCodec: Sized {
    fn decode_text(text: &str) -> Result<Self, BoxError>;

    /// Canonical text form; decoding it must yield an equal value.
    fn encode_text(&self) -> String;
}

/// A Rust type that can be stored in a configuration field.
pub trait FieldValue: Sized + 'static {
    fn semantic_type() -> SemanticType;

    /// Build the value from a resolved source value.
    fn from_value(value: Value) -> Result<Self, FillError>;

    /// The current value, used for presence checks and printing.
    fn to_value(&self) -> Value;

    /// The value's own validation hook, if it has one.
    fn validator(&self) -> Option<&dyn Validate> {
        None
    }

    /// Hooks of the elements of a list value.
    fn element_validators(&self) -> Vec<&dyn Validate> {
        Vec::new()
    }
}

fn mismatch(expected: &'static str, found: &Value) -> FillError {
    FillError::Mismatch {
        expected,
        found: found.kind(),
    }
}

impl FieldValue for String {
    fn semantic_type() -> SemanticType {
        SemanticType::Text
    }

    fn from_value(value: Value) -> Result<Self, FillError> {
        match value {
            Value::Text(s) | Value::Encoded(s) => Ok(s),
            other => Err(mismatch("text", &other)),
        }
    }

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl FieldValue for bool {
    fn semantic_type() -> SemanticType {
        SemanticType::Bool
    }

    fn from_value(value: Value) -> Result<Self, FillError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(mismatch("bool", &other)),
        }
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

macro_rules! signed_field_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl FieldValue for $ty {
            fn semantic_type() -> SemanticType {
                SemanticType::$variant
            }

            fn from_value(value: Value) -> Result<Self, FillError> {
                match value {
                    Value::Int(i) => <$ty>::try_from(i).map_err(|_| FillError::OutOfRange(i.to_string())),
                    Value::Uint(u) => <$ty>::try_from(u).map_err(|_| FillError::OutOfRange(u.to_string())),
                    other => Err(mismatch("integer", &other)),
                }
            }

            fn to_value(&self) -> Value {
                Value::Int(*self as i64)
            }
        }
    )*};
}

macro_rules! unsigned_field_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl FieldValue for $ty {
            fn semantic_type() -> SemanticType {
                SemanticType::$variant
            }

            fn from_value(value: Value) -> Result<Self, FillError> {
                match value {
                    Value::Uint(u) => <$ty>::try_from(u).map_err(|_| FillError::OutOfRange(u.to_string())),
                    Value::Int(i) => <$ty>::try_from(i).map_err(|_| FillError::OutOfRange(i.to_string())),
                    other => Err(mismatch("unsigned integer", &other)),
                }
            }

            fn to_value(&self) -> Value {
                Value::Uint(*self as u64)
            }
        }
    )*};
}

signed_field_value!(i8 => I8, i16 => I16, i32 => I32, i64 => I64, isize => Isize);
unsigned_field_value!(u8 => U8, u16 => U16, u32 => U32, u64 => U64, usize => Usize);

impl FieldValue for f64 {
    fn semantic_type() -> SemanticType {
        SemanticType::F64
    }

    fn from_value(value: Value) -> Result<Self, FillError> {
        match value {
            Value::Float(f) => Ok(f),
            other => Err(mismatch("float", &other)),
        }
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl FieldValue for f32 {
    fn semantic_type() -> SemanticType {
        SemanticType::F32
    }

    fn from_value(value: Value) -> Result<Self, FillError> {
        match value {
            Value::Float(f) => Ok(f as f32),
            other => Err(mismatch("float", &other)),
        }
    }

    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

impl FieldValue for TimeDelta {
    fn semantic_type() -> SemanticType {
        SemanticType::Duration
    }

    fn from_value(value: Value) -> Result<Self, FillError> {
        match value {
            Value::Duration(d) => Ok(d),
            other => Err(mismatch("duration", &other)),
        }
    }

    fn to_value(&self) -> Value {
        Value::Duration(*self)
    }
}

impl FieldValue for std::time::Duration {
    fn semantic_type() -> SemanticType {
        SemanticType::Duration
    }

    fn from_value(value: Value) -> Result<Self, FillError> {
        match value {
            Value::Duration(d) => d
                .to_std()
                .map_err(|_| FillError::OutOfRange(crate::time::format_duration(d))),
            other => Err(mismatch("duration", &other)),
        }
    }

    fn to_value(&self) -> Value {
        Value::Duration(TimeDelta::from_std(*self).unwrap_or(TimeDelta::MAX))
    }
}

impl FieldValue for NaiveDate {
    fn semantic_type() -> SemanticType {
        SemanticType::Date
    }

    fn from_value(value: Value) -> Result<Self, FillError> {
        match value {
            Value::Date(d) => Ok(d),
            other => Err(mismatch("date", &other)),
        }
    }

    fn to_value(&self) -> Value {
        Value::Date(*self)
    }
}

impl FieldValue for DateTime<Utc> {
    fn semantic_type() -> SemanticType {
        SemanticType::DateTime
    }

    fn from_value(value: Value) -> Result<Self, FillError> {
        match value {
            Value::DateTime(t) | Value::UnixTime(t) => Ok(t),
            other => Err(mismatch("date-time", &other)),
        }
    }

    fn to_value(&self) -> Value {
        Value::DateTime(*self)
    }
}

impl FieldValue for UnixTime {
    fn semantic_type() -> SemanticType {
        SemanticType::UnixTime
    }

    fn from_value(value: Value) -> Result<Self, FillError> {
        match value {
            Value::UnixTime(t) | Value::DateTime(t) => Ok(UnixTime(t)),
            other => Err(mismatch("unix time", &other)),
        }
    }

    fn to_value(&self) -> Value {
        Value::UnixTime(self.0)
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn semantic_type() -> SemanticType {
        SemanticType::Optional(Box::new(T::semantic_type()))
    }

    fn from_value(value: Value) -> Result<Self, FillError> {
        match value {
            Value::Absent => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Absent,
        }
    }

    fn validator(&self) -> Option<&dyn Validate> {
        self.as_ref().and_then(FieldValue::validator)
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn semantic_type() -> SemanticType {
        SemanticType::List(Box::new(T::semantic_type()))
    }

    fn from_value(value: Value) -> Result<Self, FillError> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            Value::Absent => Ok(Vec::new()),
            other => Err(mismatch("list", &other)),
        }
    }

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(FieldValue::to_value).collect())
    }

    fn element_validators(&self) -> Vec<&dyn Validate> {
        self.iter().filter_map(FieldValue::validator).collect()
    }
}

/// Declare a named scalar: a tuple newtype resolved exactly like its
/// representation but keeping its own type.
///
/// ```ignore
/// pub struct Port(pub u16);
/// argument::named_scalar!(Port(u16));
///
/// // with a semantic validation hook implemented via `impl Validate for Port`
/// argument::named_scalar!(Port(u16) + Validate);
/// ```
#[macro_export]
macro_rules! named_scalar {
    (@impl $name:ident($repr:ty) { $($hook:tt)* }) => {
        impl $crate::FieldValue for $name {
            fn semantic_type() -> $crate::SemanticType {
                $crate::SemanticType::Named {
                    name: stringify!($name),
                    repr: Box::new(<$repr as $crate::FieldValue>::semantic_type()),
                }
            }

            fn from_value(value: $crate::Value) -> Result<Self, $crate::FillError> {
                <$repr as $crate::FieldValue>::from_value(value).map($name)
            }

            fn to_value(&self) -> $crate::Value {
                $crate::FieldValue::to_value(&self.0)
            }

            fn element_validators(&self) -> Vec<&dyn $crate::Validate> {
                $crate::FieldValue::element_validators(&self.0)
            }

            $($hook)*
        }
    };
    ($name:ident($repr:ty) + Validate) => {
        $crate::named_scalar!(@impl $name($repr) {
            fn validator(&self) -> Option<&dyn $crate::Validate> {
                Some(self)
            }
        });
    };
    ($name:ident($repr:ty)) => {
        $crate::named_scalar!(@impl $name($repr) {});
    };
}

/// Declare a custom-decodable type backed by its [`TextCodec`] impl.
///
/// ```ignore
/// impl TextCodec for Broker { ... }
/// argument::text_codec!(Broker);
/// argument::text_codec!(Brokers + Validate);
/// ```
#[macro_export]
macro_rules! text_codec {
    (@impl $name:ident { $($hook:tt)* }) => {
        impl $crate::FieldValue for $name {
            fn semantic_type() -> $crate::SemanticType {
                $crate::SemanticType::Custom($crate::CustomCodec {
                    type_name: stringify!($name),
                    decode: |text| {
                        <$name as $crate::TextCodec>::decode_text(text)
                            .map(|v| $crate::TextCodec::encode_text(&v))
                    },
                })
            }

            fn from_value(value: $crate::Value) -> Result<Self, $crate::FillError> {
                match value {
                    $crate::Value::Encoded(text) | $crate::Value::Text(text) => {
                        <$name as $crate::TextCodec>::decode_text(&text)
                            .map_err($crate::FillError::Decode)
                    }
                    other => Err($crate::FillError::Mismatch {
                        expected: "encoded text",
                        found: other.kind(),
                    }),
                }
            }

            fn to_value(&self) -> $crate::Value {
                $crate::Value::Encoded($crate::TextCodec::encode_text(self))
            }

            $($hook)*
        }
    };
    ($name:ident + Validate) => {
        $crate::text_codec!(@impl $name {
            fn validator(&self) -> Option<&dyn $crate::Validate> {
                Some(self)
            }
        });
    };
    ($name:ident) => {
        $crate::text_codec!(@impl $name {});
    };
}
