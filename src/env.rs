use std::collections::HashMap;

use tracing::debug;

use crate::dispatch::decode_field;
use crate::error::{ArgumentError, Source};
use crate::field::Field;
use crate::types::Values;

/// Split an environment block of `NAME=value` entries into a map.
///
/// The first `=` separates name from value, so values may contain `=`.
/// Entries without `=` or with an empty name are skipped. Later entries
/// overwrite earlier ones with the same name.
///
/// Takes an iterator so tests can pass synthetic data instead of the process
/// environment.
pub fn env_to_map<I, S>(environ: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut map = HashMap::new();
    for entry in environ {
        let Some((name, value)) = entry.as_ref().split_once('=') else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        map.insert(name.to_string(), value.to_string());
    }
    map
}

/// The current process environment as `NAME=value` entries. Entries that are
/// not valid unicode are dropped.
pub fn process_environ() -> Vec<String> {
    std::env::vars_os()
        .filter_map(|(k, v)| Some(format!("{}={}", k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}

/// Resolve every field whose environment name is set.
pub fn env_values<C, I, S>(fields: &[Field<C>], environ: I) -> Result<Values, ArgumentError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let vars = env_to_map(environ);
    let mut values = Values::new();
    for field in fields {
        let descriptor = field.descriptor();
        let Some(text) = descriptor.env().and_then(|name| vars.get(name)) else {
            continue;
        };
        let value = decode_field(descriptor, text, Source::Environment)?;
        values.insert(descriptor.name().to_string(), value);
    }
    debug!(count = values.len(), "resolved environment");
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::descriptors;
    use crate::fixtures::test::TestConfig;
    use crate::types::Value;

    #[test]
    fn splits_on_first_equals() {
        let map = env_to_map(["URL=postgres://db?sslmode=off"]);
        assert_eq!(map["URL"], "postgres://db?sslmode=off");
    }

    #[test]
    fn last_occurrence_wins() {
        let map = env_to_map(["PORT=1", "HOST=a", "PORT=2"]);
        assert_eq!(map["PORT"], "2");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn malformed_entries_skipped() {
        let map = env_to_map(["NOEQUALS", "=value", "EMPTY="]);
        assert_eq!(map.len(), 1);
        assert_eq!(map["EMPTY"], "");
    }

    #[test]
    fn resolves_bound_fields_only() {
        let fields = descriptors::<TestConfig>();
        let values = env_values(&fields, ["PORT=8080", "UNRELATED=x", "NAMES=a, b"]).unwrap();
        assert_eq!(values["port"], Value::Uint(8080));
        assert_eq!(
            values["names"],
            Value::List(vec![Value::Text("a".into()), Value::Text("b".into())])
        );
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn default_text_is_not_consulted() {
        let fields = descriptors::<TestConfig>();
        let values = env_values(&fields, Vec::<String>::new()).unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn empty_env_list_is_empty_list() {
        let fields = descriptors::<TestConfig>();
        let values = env_values(&fields, ["NAMES="]).unwrap();
        assert_eq!(values["names"], Value::List(vec![]));
    }

    #[test]
    fn malformed_value_names_field_and_source() {
        let fields = descriptors::<TestConfig>();
        let err = env_values(&fields, ["PORT=http"]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("port"), "{msg}");
        assert!(msg.contains("env"), "{msg}");
    }
}
