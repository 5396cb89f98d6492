use std::fmt;

use thiserror::Error;

/// Error type returned by validation and decoding hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The source a value was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Default,
    Environment,
    Argument,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Default => write!(f, "default"),
            Source::Environment => write!(f, "env"),
            Source::Argument => write!(f, "argument"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ArgumentError {
    #[error("parse field {field} as {type_name} from {source_kind} failed: {source}")]
    Parse {
        field: String,
        type_name: &'static str,
        source_kind: Source,
        source: DecodeError,
    },

    #[error("field {field} with type {type_name} is unsupported")]
    Unsupported {
        field: String,
        type_name: &'static str,
    },

    #[error("parse commandline failed: {0}")]
    Cli(#[from] clap::Error),

    #[error("fill field {field} as {type_name} failed: {source}")]
    Fill {
        field: String,
        type_name: &'static str,
        source: FillError,
    },

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("Required field empty, {hint}")]
    Required { field: String, hint: String },

    #[error("validate arguments failed: {0}")]
    Validation(BoxError),

    #[error("field {field} ({type_name}) validation failed: {source}")]
    FieldValidation {
        field: String,
        type_name: &'static str,
        source: BoxError,
    },
}

/// Failure converting raw text into a typed value.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid bool '{0}'")]
    InvalidBool(String),

    #[error("invalid integer '{text}': {source}")]
    InvalidInt {
        text: String,
        source: std::num::ParseIntError,
    },

    #[error("invalid float '{text}': {source}")]
    InvalidFloat {
        text: String,
        source: std::num::ParseFloatError,
    },

    #[error("invalid duration '{0}'")]
    InvalidDuration(String),

    #[error("invalid time '{0}'")]
    InvalidTime(String),

    #[error("{0}")]
    Custom(BoxError),

    #[error("type {0} is unsupported")]
    Unsupported(String),
}

/// Failure assigning a resolved value onto a target slot.
#[derive(Debug, Error)]
pub enum FillError {
    #[error("expected {expected} value, got {found}")]
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("value {0} out of range")]
    OutOfRange(String),

    #[error("{0}")]
    Decode(BoxError),
}
