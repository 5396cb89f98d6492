//! Text to typed value conversion, shared by all three source resolvers.
//!
//! Rules are tried in a fixed order and the first match wins:
//!
//! 1. custom-decodable types use their own decoder
//! 2. lists are split, trimmed and converted element by element
//! 3. named scalars convert like their representation
//! 4. optionals, primitives and temporal types use the built-in parsers
//!
//! Any shape outside that set is reported as unsupported.

use std::num::ParseIntError;
use std::str::FromStr;

use crate::error::{ArgumentError, DecodeError, Source};
use crate::field::FieldDescriptor;
use crate::time;
use crate::types::{SemanticType, Value};

/// Convert `text` for the given field, wrapping failures with field context.
pub fn decode_field(
    descriptor: &FieldDescriptor,
    text: &str,
    source: Source,
) -> Result<Value, ArgumentError> {
    ensure_supported(descriptor)?;
    coerce(descriptor.semantic_type(), text, descriptor.separator()).map_err(|e| match e {
        DecodeError::Unsupported(_) => unsupported(descriptor),
        e => ArgumentError::Parse {
            field: descriptor.name().to_string(),
            type_name: descriptor.type_name(),
            source_kind: source,
            source: e,
        },
    })
}

/// Fail fast on shapes the engine cannot resolve.
pub fn ensure_supported(descriptor: &FieldDescriptor) -> Result<(), ArgumentError> {
    if descriptor.semantic_type().is_supported() {
        Ok(())
    } else {
        Err(unsupported(descriptor))
    }
}

fn unsupported(descriptor: &FieldDescriptor) -> ArgumentError {
    ArgumentError::Unsupported {
        field: descriptor.name().to_string(),
        type_name: descriptor.type_name(),
    }
}

/// Convert raw text into a value of the given semantic type.
pub fn coerce(ty: &SemanticType, text: &str, separator: &str) -> Result<Value, DecodeError> {
    match ty {
        SemanticType::Custom(codec) => (codec.decode)(text)
            .map(Value::Encoded)
            .map_err(DecodeError::Custom),
        SemanticType::List(element) => {
            if !element.is_scalar() {
                return Err(DecodeError::Unsupported(format!("{ty:?}")));
            }
            split_list(text, separator)
                .map(|item| coerce(element, item, separator))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List)
        }
        SemanticType::Named { repr, .. } => coerce(repr, text, separator),
        SemanticType::Optional(inner) => {
            if !inner.is_scalar() {
                return Err(DecodeError::Unsupported(format!("{ty:?}")));
            }
            if text.is_empty() {
                Ok(Value::Absent)
            } else {
                coerce(inner, text, separator)
            }
        }
        SemanticType::Text => Ok(Value::Text(text.to_string())),
        SemanticType::Bool => parse_bool(text).map(Value::Bool),
        SemanticType::I8 => parse_int::<i8>(text).map(|v| Value::Int(v.into())),
        SemanticType::I16 => parse_int::<i16>(text).map(|v| Value::Int(v.into())),
        SemanticType::I32 => parse_int::<i32>(text).map(|v| Value::Int(v.into())),
        SemanticType::I64 => parse_int::<i64>(text).map(Value::Int),
        SemanticType::Isize => parse_int::<isize>(text).map(|v| Value::Int(v as i64)),
        SemanticType::U8 => parse_int::<u8>(text).map(|v| Value::Uint(v.into())),
        SemanticType::U16 => parse_int::<u16>(text).map(|v| Value::Uint(v.into())),
        SemanticType::U32 => parse_int::<u32>(text).map(|v| Value::Uint(v.into())),
        SemanticType::U64 => parse_int::<u64>(text).map(Value::Uint),
        SemanticType::Usize => parse_int::<usize>(text).map(|v| Value::Uint(v as u64)),
        SemanticType::F32 | SemanticType::F64 => parse_float(text).map(Value::Float),
        SemanticType::Duration => time::parse_duration(text).map(Value::Duration),
        SemanticType::Date => time::parse_date(text).map(Value::Date),
        SemanticType::DateTime => time::parse_date_time(text).map(Value::DateTime),
        SemanticType::UnixTime => time::parse_unix_time(text).map(Value::UnixTime),
    }
}

/// Split on `separator`, trim each segment and drop empty ones.
pub fn split_list<'a>(text: &'a str, separator: &'a str) -> impl Iterator<Item = &'a str> {
    let text = text.trim();
    let segments: Box<dyn Iterator<Item = &'a str> + 'a> = if text.is_empty() {
        Box::new(std::iter::empty())
    } else if separator.is_empty() {
        Box::new(std::iter::once(text))
    } else {
        Box::new(text.split(separator))
    };
    segments.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_bool(text: &str) -> Result<bool, DecodeError> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(DecodeError::InvalidBool(text.to_string())),
    }
}

fn parse_int<T: FromStr<Err = ParseIntError>>(text: &str) -> Result<T, DecodeError> {
    text.parse().map_err(|e| DecodeError::InvalidInt {
        text: text.to_string(),
        source: e,
    })
}

fn parse_float(text: &str) -> Result<f64, DecodeError> {
    text.parse().map_err(|e| DecodeError::InvalidFloat {
        text: text.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{Broker, Hosts};
    use crate::value::FieldValue;
    use chrono::TimeDelta;

    fn text_list() -> SemanticType {
        SemanticType::List(Box::new(SemanticType::Text))
    }

    #[test]
    fn list_trims_and_drops_empty_segments() {
        let v = coerce(&text_list(), "alice,, bob ,  ,charlie", ",").unwrap();
        assert_eq!(
            v,
            Value::List(vec![
                Value::Text("alice".into()),
                Value::Text("bob".into()),
                Value::Text("charlie".into()),
            ])
        );
    }

    #[test]
    fn empty_list_text_is_empty_list() {
        assert_eq!(coerce(&text_list(), "", ",").unwrap(), Value::List(vec![]));
        assert_eq!(coerce(&text_list(), "   ", ",").unwrap(), Value::List(vec![]));
    }

    #[test]
    fn custom_separator() {
        let v = coerce(&text_list(), "a:b:c", ":").unwrap();
        assert_eq!(
            v,
            Value::List(vec![
                Value::Text("a".into()),
                Value::Text("b".into()),
                Value::Text("c".into()),
            ])
        );
    }

    #[test]
    fn list_elements_are_typed() {
        let ints = SemanticType::List(Box::new(SemanticType::I32));
        assert_eq!(
            coerce(&ints, "8080, 8081", ",").unwrap(),
            Value::List(vec![Value::Int(8080), Value::Int(8081)])
        );
        let err = coerce(&ints, "8080,invalid", ",").unwrap_err();
        assert!(err.to_string().contains("invalid"));
    }

    #[test]
    fn optional_empty_is_absent() {
        let amount = SemanticType::Optional(Box::new(SemanticType::F64));
        assert_eq!(coerce(&amount, "", ",").unwrap(), Value::Absent);
        assert_eq!(coerce(&amount, "23.5", ",").unwrap(), Value::Float(23.5));
    }

    #[test]
    fn integer_width_is_checked() {
        assert_eq!(coerce(&SemanticType::U8, "255", ",").unwrap(), Value::Uint(255));
        assert!(coerce(&SemanticType::U8, "256", ",").is_err());
        assert!(coerce(&SemanticType::I8, "-129", ",").is_err());
        assert!(coerce(&SemanticType::U32, "-1", ",").is_err());
        assert!(coerce(&SemanticType::I64, "abc", ",").is_err());
    }

    #[test]
    fn bools() {
        assert_eq!(coerce(&SemanticType::Bool, "1", ",").unwrap(), Value::Bool(true));
        assert_eq!(coerce(&SemanticType::Bool, "false", ",").unwrap(), Value::Bool(false));
        assert!(coerce(&SemanticType::Bool, "yes", ",").is_err());
    }

    #[test]
    fn duration_with_days() {
        assert_eq!(
            coerce(&SemanticType::Duration, "1d2h30m", ",").unwrap(),
            Value::Duration(TimeDelta::minutes(26 * 60 + 30))
        );
    }

    #[test]
    fn custom_decoder_runs_before_list_rules() {
        let v = coerce(&Broker::semantic_type(), "localhost:9092", ",").unwrap();
        assert_eq!(v, Value::Encoded("plain://localhost:9092".into()));

        let list = SemanticType::List(Box::new(Broker::semantic_type()));
        let v = coerce(&list, "localhost:9092,ssl://kafka:9093", ",").unwrap();
        assert_eq!(
            v,
            Value::List(vec![
                Value::Encoded("plain://localhost:9092".into()),
                Value::Encoded("ssl://kafka:9093".into()),
            ])
        );
    }

    #[test]
    fn custom_list_type_decodes_as_one_unit() {
        let v = coerce(&Hosts::semantic_type(), "a; b", ",").unwrap();
        assert_eq!(v, Value::Encoded("a;b".into()));

        let err = coerce(&Hosts::semantic_type(), "", ",").unwrap_err();
        assert!(matches!(err, DecodeError::Custom(_)), "{err}");
        assert_eq!(err.to_string(), "no hosts given");
    }

    #[test]
    fn named_scalar_converts_like_repr() {
        let port = SemanticType::Named {
            name: "Port",
            repr: Box::new(SemanticType::U16),
        };
        assert_eq!(
            coerce(&port, "8080", ",").unwrap(),
            coerce(&SemanticType::U16, "8080", ",").unwrap()
        );
    }

    #[test]
    fn nested_lists_are_unsupported() {
        let nested = SemanticType::List(Box::new(text_list()));
        assert!(matches!(
            coerce(&nested, "a", ","),
            Err(DecodeError::Unsupported(_))
        ));
    }
}
