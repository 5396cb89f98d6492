//! Command-line resolver.
//!
//! A fresh [`clap::Command`] is built for every call from the fields that
//! carry an argument name, so parses never share state. Flags use the
//! single-dash long form (`-port 8080`, `-port=8080`), which is rewritten to
//! clap's `--port` before parsing; the double-dash form works as well.

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use tracing::debug;

use crate::dispatch::{decode_field, ensure_supported};
use crate::error::{ArgumentError, Source};
use crate::field::{Field, FieldDescriptor};
use crate::types::Values;

const TRAILING: &str = "__argument_trailing";
const FIELD_PREFIX: &str = "field.";

/// Build the command-line parser for a field list.
///
/// Exposed so callers can render help or usage text for the same surface
/// that [`arg_values`] parses.
pub fn command<C>(program_name: &str, fields: &[Field<C>]) -> Command {
    let mut cmd = Command::new(program_name.to_string())
        .no_binary_name(true)
        .args_override_self(true)
        .disable_version_flag(true);

    for descriptor in bound(fields) {
        cmd = cmd.arg(flag(descriptor));
    }

    // Parsing stops at the first positional; everything after it is ignored.
    cmd.arg(
        Arg::new(TRAILING)
            .num_args(0..)
            .action(ArgAction::Append)
            .trailing_var_arg(true)
            .hide(true),
    )
}

fn bound<C>(fields: &[Field<C>]) -> impl Iterator<Item = &FieldDescriptor> {
    fields
        .iter()
        .map(Field::descriptor)
        .filter(|d| d.arg().is_some())
}

fn flag(descriptor: &FieldDescriptor) -> Arg {
    let ty = descriptor.semantic_type();
    let mut arg = Arg::new(flag_id(descriptor))
        .long(descriptor.arg().unwrap_or(descriptor.name()).to_string())
        .value_parser(value_parser!(String))
        .action(ArgAction::Set)
        .help(descriptor.usage().to_string());

    if ty.is_bool() {
        arg = arg
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value("true");
    } else {
        arg = arg.num_args(1).allow_hyphen_values(true);
    }

    if !ty.is_optional()
        && let Some(text) = descriptor.default_text()
    {
        arg = arg.default_value(text.to_string());
    }
    arg
}

/// Arg ids are namespaced so field names never collide with clap's own.
fn flag_id(descriptor: &FieldDescriptor) -> String {
    format!("{FIELD_PREFIX}{}", descriptor.name())
}

/// Rewrite `-name` / `-name=value` to `--name` / `--name=value` for known
/// flag names, up to a `--` terminator.
fn normalize<I, S>(args: I, names: &[&str]) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut terminated = false;
    args.into_iter()
        .map(|token| {
            let token = token.as_ref();
            if terminated {
                return token.to_string();
            }
            if token == "--" {
                terminated = true;
                return token.to_string();
            }
            if let Some(rest) = token.strip_prefix('-')
                && !rest.starts_with('-')
            {
                let name = rest.split_once('=').map_or(rest, |(n, _)| n);
                if names.contains(&name) {
                    return format!("-{token}");
                }
            }
            token.to_string()
        })
        .collect()
}

/// Resolve every argument-bound field from the argument vector.
///
/// The resulting map holds flags given on the command line plus, for
/// non-optional fields with default text, the default seeded into the flag.
/// Optional fields contribute only when given a non-empty value.
pub fn arg_values<C, I, S>(
    fields: &[Field<C>],
    program_name: &str,
    args: I,
) -> Result<Values, ArgumentError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for descriptor in bound(fields) {
        ensure_supported(descriptor)?;
    }

    let names: Vec<&str> = bound(fields).filter_map(FieldDescriptor::arg).collect();
    let tokens = normalize(args, &names);
    let matches = command(program_name, fields).try_get_matches_from(tokens)?;

    let mut values = Values::new();
    for descriptor in bound(fields) {
        if let Some(text) = flag_text(&matches, descriptor) {
            let value = decode_field(descriptor, text, Source::Argument)?;
            values.insert(descriptor.name().to_string(), value);
        }
    }
    debug!(count = values.len(), "resolved arguments");
    Ok(values)
}

fn flag_text<'a>(matches: &'a ArgMatches, descriptor: &FieldDescriptor) -> Option<&'a str> {
    let id = flag_id(descriptor);
    let text = matches.get_one::<String>(&id)?.as_str();
    match matches.value_source(&id)? {
        ValueSource::CommandLine if descriptor.semantic_type().is_optional() && text.is_empty() => {
            None
        }
        ValueSource::CommandLine | ValueSource::DefaultValue => Some(text),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::descriptors;
    use crate::fixtures::test::{TestConfig, Unsupported};
    use crate::types::Value;
    use chrono::TimeDelta;

    fn parse(args: &[&str]) -> Result<Values, ArgumentError> {
        arg_values(&descriptors::<TestConfig>(), "test", args)
    }

    #[test]
    fn single_dash_with_space_and_equals() {
        let values = parse(&["-port", "8080", "-host=example.com"]).unwrap();
        assert_eq!(values["port"], Value::Uint(8080));
        assert_eq!(values["host"], Value::Text("example.com".into()));
    }

    #[test]
    fn double_dash_also_accepted() {
        let values = parse(&["--port=9000"]).unwrap();
        assert_eq!(values["port"], Value::Uint(9000));
    }

    #[test]
    fn omitted_flags_fall_back_to_default_text() {
        let values = parse(&[]).unwrap();
        assert_eq!(values["host"], Value::Text("localhost".into()));
        assert_eq!(values["timeout"], Value::Duration(TimeDelta::seconds(30)));
        assert!(!values.contains_key("port"));
        assert!(!values.contains_key("rate"));
    }

    #[test]
    fn bare_bool_flag_is_true() {
        let values = parse(&["-debug"]).unwrap();
        assert_eq!(values["debug"], Value::Bool(true));
        let values = parse(&["-debug=false"]).unwrap();
        assert_eq!(values["debug"], Value::Bool(false));
    }

    #[test]
    fn last_repeated_flag_wins() {
        let values = parse(&["-port", "1", "-port", "2"]).unwrap();
        assert_eq!(values["port"], Value::Uint(2));
    }

    #[test]
    fn optional_empty_value_is_not_given() {
        let values = parse(&["-rate="]).unwrap();
        assert!(!values.contains_key("rate"));
        let values = parse(&["-rate", "2.5"]).unwrap();
        assert_eq!(values["rate"], Value::Float(2.5));
    }

    #[test]
    fn explicit_empty_list_is_empty() {
        let values = parse(&["-names="]).unwrap();
        assert_eq!(values["names"], Value::List(vec![]));
    }

    #[test]
    fn parsing_stops_at_first_positional() {
        let values = parse(&["-port", "1", "run", "-port", "2"]).unwrap();
        assert_eq!(values["port"], Value::Uint(1));
    }

    #[test]
    fn negative_values_are_values() {
        let err = parse(&["-port", "-1"]).unwrap_err();
        assert!(matches!(err, ArgumentError::Parse { .. }), "{err}");
    }

    #[test]
    fn malformed_value_names_field() {
        let err = parse(&["-timeout", "soon"]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("timeout"), "{msg}");
        assert!(msg.contains("argument"), "{msg}");
    }

    #[test]
    fn unknown_flag_is_cli_error() {
        let err = parse(&["-nope"]).unwrap_err();
        assert!(matches!(err, ArgumentError::Cli(_)));
    }

    #[test]
    fn unsupported_type_fails_before_parsing() {
        // the malformed flag would be a Cli error if parsing ran first
        let err = arg_values(&descriptors::<Unsupported>(), "test", ["--bogus"]).unwrap_err();
        assert!(matches!(err, ArgumentError::Unsupported { .. }), "{err}");
    }

    #[test]
    fn unbound_fields_are_not_flags() {
        let cmd = command("test", &descriptors::<TestConfig>());
        assert!(cmd.get_arguments().all(|a| a.get_id() != "field.notes"));
        assert!(cmd.get_arguments().any(|a| a.get_id() == "field.port"));
    }

    #[derive(Debug, Default)]
    struct Manual {
        help: String,
    }

    impl crate::Arguments for Manual {
        fn fields() -> Vec<Field<Self>> {
            vec![crate::field!(help).arg("hint").default("none")]
        }
    }

    #[test]
    fn field_named_help_keeps_help_flag() {
        let fields = descriptors::<Manual>();
        let values = arg_values(&fields, "test", ["-hint", "read the docs"]).unwrap();
        assert_eq!(values["help"], Value::Text("read the docs".into()));

        let err = arg_values(&fields, "test", ["--help"]).unwrap_err();
        assert!(
            matches!(&err, ArgumentError::Cli(e) if e.kind() == clap::error::ErrorKind::DisplayHelp),
            "{err}"
        );
    }

    #[test]
    fn normalize_respects_terminator() {
        let tokens = normalize(["-port", "1", "--", "-port"], &["port"]);
        assert_eq!(tokens, vec!["--port", "1", "--", "-port"]);
    }
}
