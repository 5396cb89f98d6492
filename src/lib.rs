//! Typed configuration from defaults, environment variables and command-line
//! arguments. Declare a struct, describe its fields, and go.
//!
//! ```ignore
//! use argument::{Argument, Arguments, Field, field};
//!
//! #[derive(Default)]
//! struct AppConfig {
//!     host: String,
//!     port: u16,
//!     timeout: chrono::TimeDelta,
//! }
//!
//! impl Arguments for AppConfig {
//!     fn fields() -> Vec<Field<Self>> {
//!         vec![
//!             field!(host).arg("host").env("HOST").default("localhost"),
//!             field!(port).arg("port").env("PORT").required(),
//!             field!(timeout).arg("timeout").env("TIMEOUT").default("30s"),
//!         ]
//!     }
//! }
//!
//! let config: AppConfig = Argument::builder().load()?;
//! ```
//!
//! That single call parses `-host`, `-port` and `-timeout` from the command
//! line, reads `HOST`, `PORT` and `TIMEOUT` from the environment, fills in
//! defaults, checks that `port` was supplied, and hands you a typed struct.
//!
//! # Fields
//!
//! Every field is described once with [`Field`] (usually through the
//! [`field!`] macro), and every stage works from that description:
//!
//! - **`.arg(name)`** binds a command-line flag, written `-name value`,
//!   `-name=value` or `--name value`. Boolean flags may be given bare.
//! - **`.env(name)`** binds an environment variable.
//! - **`.default(text)`** supplies default text. It is parsed exactly like
//!   text from the other sources, so a malformed default is an error.
//! - **`.required()`** makes the presence pass reject the field's empty
//!   value. Booleans are never considered empty.
//! - **`.separator(sep)`** changes the list separator (default `,`).
//! - **`.display(mode)`** controls printing: [`DisplayMode::Length`] for
//!   secrets, [`DisplayMode::Hidden`] to leave a field out.
//!
//! A field with none of `arg`, `env` or `default` is still printed and
//! validated, but no source writes to it.
//!
//! # Types
//!
//! Text, booleans, every integer width, floats, durations
//! ([`chrono::TimeDelta`] or [`std::time::Duration`]), dates, timestamps and
//! [`UnixTime`] are supported, as are `Option<T>` and `Vec<T>` of those.
//! Lists are split on the separator, trimmed, and empty items dropped, so
//! `"alice, bob,"` is `["alice", "bob"]` and `""` is an empty list. An empty
//! value for an `Option<T>` means `None`.
//!
//! Durations accept days and weeks on top of the usual units: `1d2h30m`,
//! `1.5h`, `2w`.
//!
//! Your own types join in two ways:
//!
//! - [`named_scalar!`] declares a newtype that resolves like its inner type
//!   (`Port(u16)`), keeping its own identity.
//! - [`text_codec!`] declares a type with its own text decoding via
//!   [`TextCodec`]. Custom decoding takes priority over every built-in rule,
//!   including list splitting.
//!
//! Both accept a `+ Validate` suffix to register a [`Validate`] hook.
//!
//! # Precedence
//!
//! ```text
//! Defaults              .default("...")
//!        ↑ overridden by
//! Arguments             -name value
//!        ↑ overridden by
//! Environment           NAME=value
//! ```
//!
//! The environment has the final word: a value set in the environment wins
//! over the same field given on the command line. Every source is sparse; a
//! field a source does not mention keeps the value from the layer below, and
//! a field no source mentions keeps whatever the target already held.
//!
//! # Validation
//!
//! After filling, two passes run in order, each stopping at the first
//! failure:
//!
//! 1. **Presence**: required fields must not hold their empty value. The
//!    error says how to supply one, e.g. `Required field empty, define
//!    parameter port or define env PORT`.
//! 2. **Semantic**: the target's own hook ([`Arguments::validator`]) runs
//!    first, then every field whose value implements [`Validate`]. Lists use
//!    their own hook when they have one and validate each element
//!    otherwise. Hooks receive a [`Context`] carrying a cancellation token.
//!
//! # Error handling
//!
//! All fallible operations return [`ArgumentError`], naming the field, the
//! type and the source involved. Resolution is all-or-nothing: the first
//! error is returned and the target may be partially filled. See the
//! [`error`] module for the full set.

pub mod error;
pub mod time;
pub mod types;

mod args;
mod builder;
mod context;
mod default;
mod dispatch;
mod env;
mod field;
mod fill;
pub(crate) mod merge;
mod parse;
mod print;
mod resolve;
mod validate;
mod value;

#[cfg(test)]
mod fixtures;

pub use args::command;
pub use builder::{Argument, ArgumentBuilder};
pub use context::Context;
pub use error::{ArgumentError, BoxError, DecodeError, FillError, Source};
pub use field::{Arguments, Field, FieldDescriptor, descriptors};
pub use parse::{
    default_values, fill, parse, parse_and_print, parse_args, parse_env, print, render,
    render_json, validate_has_validation, validate_required,
};
pub use time::UnixTime;
pub use types::{CustomCodec, DisplayMode, SemanticType, Value, Values};
pub use value::{FieldValue, TextCodec, Validate};
