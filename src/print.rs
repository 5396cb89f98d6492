//! Diagnostic rendering of resolved values.
//!
//! Honors each field's [`DisplayMode`]: hidden fields are left out and
//! length-only fields show nothing but the length of their text.

use serde_json::{Map, Value as JsonValue};
use tracing::info;

use crate::field::Field;
use crate::types::{DisplayMode, Value};

/// One line per visible field, in declaration order.
pub fn render_lines<C>(fields: &[Field<C>], target: &C) -> Vec<String> {
    fields
        .iter()
        .filter_map(|field| {
            let descriptor = field.descriptor();
            let name = descriptor.name();
            let value = field.value(target);
            let line = match descriptor.display() {
                DisplayMode::Hidden => return None,
                DisplayMode::Length => format!("Argument: {name} length {}", value.to_string().len()),
                DisplayMode::Normal => match value {
                    Value::Absent => format!("Argument: {name} <nil>"),
                    Value::List(items) if items.is_empty() => format!("Argument: {name} []"),
                    Value::List(items) => {
                        let joined: Vec<String> = items.iter().map(ToString::to_string).collect();
                        format!("Argument: {name} [{}]: {}", items.len(), joined.join(", "))
                    }
                    other => format!("Argument: {name} '{other}'"),
                },
            };
            Some(line)
        })
        .collect()
}

/// Emit [`render_lines`] through `tracing` at info level.
pub fn print_lines<C>(fields: &[Field<C>], target: &C) {
    for line in render_lines(fields, target) {
        info!("{line}");
    }
}

/// The same view as a JSON object keyed by field name. Length-only fields map
/// to their length, absent values to `null`.
pub fn render_json_map<C>(fields: &[Field<C>], target: &C) -> Map<String, JsonValue> {
    let mut map = Map::new();
    for field in fields {
        let descriptor = field.descriptor();
        let value = field.value(target);
        let json = match descriptor.display() {
            DisplayMode::Hidden => continue,
            DisplayMode::Length => JsonValue::from(value.to_string().len()),
            DisplayMode::Normal => serde_json::to_value(&value).unwrap_or(JsonValue::Null),
        };
        map.insert(descriptor.name().to_string(), json);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::descriptors;
    use crate::fixtures::test::TestConfig;
    use chrono::TimeDelta;

    fn config() -> TestConfig {
        TestConfig {
            host: "localhost".into(),
            port: 8080,
            debug: true,
            timeout: TimeDelta::seconds(90),
            names: vec!["alice".into(), "bob".into(), "carol".into()],
            rate: None,
            prefix: String::new(),
            token: "s3cret".into(),
            secret: "never shown".into(),
            notes: "n".into(),
        }
    }

    #[test]
    fn renders_each_display_mode() {
        let lines = render_lines(&descriptors::<TestConfig>(), &config());
        assert_eq!(
            lines,
            vec![
                "Argument: host 'localhost'",
                "Argument: port '8080'",
                "Argument: debug 'true'",
                "Argument: timeout '1m30s'",
                "Argument: names [3]: alice, bob, carol",
                "Argument: rate <nil>",
                "Argument: prefix ''",
                "Argument: token length 6",
                "Argument: notes 'n'",
            ]
        );
    }

    #[test]
    fn empty_list_renders_brackets() {
        let config = TestConfig {
            names: vec![],
            ..config()
        };
        let lines = render_lines(&descriptors::<TestConfig>(), &config);
        assert!(lines.contains(&"Argument: names []".to_string()));
    }

    #[test]
    fn json_view_follows_display_policy() {
        let map = render_json_map(&descriptors::<TestConfig>(), &config());
        assert_eq!(map["port"], JsonValue::from(8080));
        assert_eq!(map["timeout"], JsonValue::from("1m30s"));
        assert_eq!(map["rate"], JsonValue::Null);
        assert_eq!(map["token"], JsonValue::from(6));
        assert!(!map.contains_key("secret"));
        assert_eq!(
            map["names"],
            serde_json::json!(["alice", "bob", "carol"])
        );
    }
}
