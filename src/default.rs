use tracing::debug;

use crate::dispatch::decode_field;
use crate::error::{ArgumentError, Source};
use crate::field::Field;
use crate::types::Values;

/// Parse the default text of every field that declares one.
///
/// An empty default is still a value: a text field gets `""`, a list field an
/// empty list, an optional field "absent".
pub fn default_values<C>(fields: &[Field<C>]) -> Result<Values, ArgumentError> {
    let mut values = Values::new();
    for field in fields {
        let descriptor = field.descriptor();
        let Some(text) = descriptor.default_text() else {
            continue;
        };
        let value = decode_field(descriptor, text, Source::Default)?;
        values.insert(descriptor.name().to_string(), value);
    }
    debug!(count = values.len(), "resolved defaults");
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::descriptors;
    use crate::fixtures::test::{BadDefault, TestConfig};
    use crate::types::Value;
    use chrono::TimeDelta;

    #[test]
    fn only_fields_with_default_text() {
        let values = default_values(&descriptors::<TestConfig>()).unwrap();
        assert_eq!(values["host"], Value::Text("localhost".into()));
        assert_eq!(values["timeout"], Value::Duration(TimeDelta::seconds(30)));
        assert_eq!(
            values["names"],
            Value::List(vec![Value::Text("alice".into()), Value::Text("bob".into())])
        );
        assert!(!values.contains_key("port"));
        assert!(!values.contains_key("notes"));
    }

    #[test]
    fn empty_default_on_text_is_empty_string() {
        let values = default_values(&descriptors::<TestConfig>()).unwrap();
        assert_eq!(values["prefix"], Value::Text(String::new()));
    }

    #[test]
    fn malformed_default_aborts() {
        let err = default_values(&descriptors::<BadDefault>()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("port"), "{msg}");
        assert!(msg.contains("i32"), "{msg}");
        assert!(msg.contains("default"), "{msg}");
    }
}
