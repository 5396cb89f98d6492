use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::{Serialize, Serializer};

use crate::error::BoxError;
use crate::time;

/// How a field's value is rendered by the printer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayMode {
    #[default]
    Normal,
    /// Only the length of the rendered value is shown (secrets).
    Length,
    /// The field is never printed.
    Hidden,
}

/// Text decoding hook of a custom-decodable type.
///
/// `decode` turns raw text into the canonical text form of the value, failing
/// with the type's own error.
#[derive(Clone, Copy)]
pub struct CustomCodec {
    pub type_name: &'static str,
    pub decode: fn(&str) -> Result<String, BoxError>,
}

impl fmt::Debug for CustomCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomCodec")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// The closed set of types the engine knows how to resolve.
#[derive(Debug, Clone)]
pub enum SemanticType {
    Text,
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Duration,
    Date,
    DateTime,
    UnixTime,
    Optional(Box<SemanticType>),
    List(Box<SemanticType>),
    /// A user type stored as one of the other semantic types.
    Named {
        name: &'static str,
        repr: Box<SemanticType>,
    },
    Custom(CustomCodec),
}

impl SemanticType {
    /// Strip any `Named` layers, exposing the representation.
    pub fn representation(&self) -> &SemanticType {
        match self {
            SemanticType::Named { repr, .. } => repr.representation(),
            other => other,
        }
    }

    /// Scalars are everything that may appear inside a list or an optional.
    pub fn is_scalar(&self) -> bool {
        !matches!(
            self.representation(),
            SemanticType::Optional(_) | SemanticType::List(_)
        )
    }

    /// Whether this shape is inside the supported set.
    pub fn is_supported(&self) -> bool {
        match self {
            SemanticType::Named { repr, .. } => repr.is_supported(),
            SemanticType::Optional(inner) | SemanticType::List(inner) => {
                inner.is_scalar() && inner.is_supported()
            }
            _ => true,
        }
    }

    /// Boolean-like fields take an optional flag value on the command line.
    pub fn is_bool(&self) -> bool {
        match self.representation() {
            SemanticType::Bool => true,
            SemanticType::Optional(inner) => inner.is_bool(),
            _ => false,
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self.representation(), SemanticType::Optional(_))
    }
}

impl PartialEq for SemanticType {
    fn eq(&self, other: &Self) -> bool {
        use SemanticType::*;
        match (self, other) {
            (Optional(a), Optional(b)) | (List(a), List(b)) => a == b,
            (Named { name: a, repr: ra }, Named { name: b, repr: rb }) => a == b && ra == rb,
            (Custom(a), Custom(b)) => a.type_name == b.type_name,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

/// Field identifier to typed value, one map per source.
pub type Values = BTreeMap<String, Value>;

/// A fully typed value produced by one of the source resolvers.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Duration(TimeDelta),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    UnixTime(DateTime<Utc>),
    /// Canonical text form of a custom-decodable value.
    Encoded(String),
    List(Vec<Value>),
    /// An optional field explicitly set to nothing.
    Absent,
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Uint(_) => "unsigned integer",
            Value::Float(_) => "float",
            Value::Duration(_) => "duration",
            Value::Date(_) => "date",
            Value::DateTime(_) => "date-time",
            Value::UnixTime(_) => "unix time",
            Value::Encoded(_) => "encoded text",
            Value::List(_) => "list",
            Value::Absent => "absent",
        }
    }

    /// Whether this equals the zero representation of its kind.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Text(s) | Value::Encoded(s) => s.is_empty(),
            Value::Bool(b) => !b,
            Value::Int(i) => *i == 0,
            Value::Uint(u) => *u == 0,
            Value::Float(f) => *f == 0.0,
            Value::Duration(d) => d.is_zero(),
            Value::Date(d) => *d == NaiveDate::default(),
            Value::DateTime(t) | Value::UnixTime(t) => *t == DateTime::<Utc>::default(),
            Value::List(items) => items.is_empty(),
            Value::Absent => true,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) | Value::Encoded(s) => write!(f, "{s}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Uint(u) => write!(f, "{u}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Duration(d) => write!(f, "{}", time::format_duration(*d)),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::DateTime(t) => write!(f, "{}", time::format_date_time(t)),
            Value::UnixTime(t) => write!(f, "{}", t.timestamp()),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Absent => write!(f, "<nil>"),
        }
    }
}

/// JSON-friendly form: durations and timestamps as their display text, unix
/// times as seconds, absent values as null.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Text(s) | Value::Encoded(s) => serializer.serialize_str(s),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Uint(u) => serializer.serialize_u64(*u),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Duration(d) => serializer.serialize_str(&time::format_duration(*d)),
            Value::Date(d) => serializer.collect_str(&d.format("%Y-%m-%d")),
            Value::DateTime(t) => serializer.serialize_str(&time::format_date_time(t)),
            Value::UnixTime(t) => serializer.serialize_i64(t.timestamp()),
            Value::List(items) => serializer.collect_seq(items),
            Value::Absent => serializer.serialize_none(),
        }
    }
}
