//! One-call entry points over the process arguments and environment, plus
//! each pipeline stage on its own.

use serde_json::{Map, Value as JsonValue};

use crate::args::arg_values;
use crate::builder::Argument;
use crate::context::Context;
use crate::default;
use crate::env::env_values;
use crate::error::ArgumentError;
use crate::field::{Arguments, descriptors};
use crate::fill::fill_values;
use crate::print::{print_lines, render_json_map, render_lines};
use crate::types::Values;
use crate::validate::{check_hooks, check_required};

/// Resolve the process arguments and environment into `target`, then run the
/// presence and semantic passes.
pub fn parse<C: Arguments>(ctx: &Context, target: &mut C) -> Result<(), ArgumentError> {
    Argument::builder::<C>()
        .context(ctx.clone())
        .load_into(target)
}

/// Like [`parse`], logging the resolved values before validation.
pub fn parse_and_print<C: Arguments>(ctx: &Context, target: &mut C) -> Result<(), ArgumentError> {
    Argument::builder::<C>()
        .context(ctx.clone())
        .print(true)
        .load_into(target)
}

/// Fill `target` from an argument vector alone. No validation.
pub fn parse_args<C, I, S>(target: &mut C, args: I) -> Result<(), ArgumentError>
where
    C: Arguments,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let fields = descriptors::<C>();
    let program_name = std::env::args().next().unwrap_or_default();
    let values = arg_values(&fields, &program_name, args)?;
    fill_values(&fields, target, values)
}

/// Fill `target` from `NAME=value` entries alone. No validation.
pub fn parse_env<C, I, S>(target: &mut C, environ: I) -> Result<(), ArgumentError>
where
    C: Arguments,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let fields = descriptors::<C>();
    let values = env_values(&fields, environ)?;
    fill_values(&fields, target, values)
}

/// The default text of every field, parsed.
pub fn default_values<C: Arguments>() -> Result<Values, ArgumentError> {
    default::default_values(&descriptors::<C>())
}

/// Assign resolved values onto `target`.
pub fn fill<C: Arguments>(target: &mut C, values: Values) -> Result<(), ArgumentError> {
    fill_values(&descriptors::<C>(), target, values)
}

/// Fail on the first required field that is still empty.
pub fn validate_required<C: Arguments>(target: &C) -> Result<(), ArgumentError> {
    check_required(&descriptors::<C>(), target)
}

/// Run the target's validation hook, then each field's.
pub fn validate_has_validation<C: Arguments>(
    ctx: &Context,
    target: &C,
) -> Result<(), ArgumentError> {
    check_hooks(ctx, &descriptors::<C>(), target)
}

/// Log every visible field at info level.
pub fn print<C: Arguments>(target: &C) {
    print_lines(&descriptors::<C>(), target);
}

/// The lines [`print`] logs.
pub fn render<C: Arguments>(target: &C) -> Vec<String> {
    render_lines(&descriptors::<C>(), target)
}

/// Visible fields as a JSON object.
pub fn render_json<C: Arguments>(target: &C) -> Map<String, JsonValue> {
    render_json_map(&descriptors::<C>(), target)
}
