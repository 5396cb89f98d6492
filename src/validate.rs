//! Post-fill validation: the presence pass and the semantic pass.
//!
//! Both passes stop at the first failing field.

use crate::context::Context;
use crate::error::ArgumentError;
use crate::field::{Arguments, Field, FieldDescriptor};
use crate::types::{SemanticType, Value};

/// Fail on the first required field still holding its empty value.
///
/// Booleans (named or not) are never empty. Lists are empty when they have
/// no elements and optionals when they hold nothing; every other type is
/// empty at its zero value.
pub fn check_required<C>(fields: &[Field<C>], target: &C) -> Result<(), ArgumentError> {
    for field in fields {
        let descriptor = field.descriptor();
        if !descriptor.is_required() {
            continue;
        }
        let ty = descriptor.semantic_type();
        if matches!(ty.representation(), SemanticType::Bool) {
            continue;
        }
        let value = field.value(target);
        let empty = if ty.is_optional() {
            value == Value::Absent
        } else {
            value.is_zero()
        };
        if empty {
            return Err(ArgumentError::Required {
                field: descriptor.name().to_string(),
                hint: required_hint(descriptor),
            });
        }
    }
    Ok(())
}

fn required_hint(descriptor: &FieldDescriptor) -> String {
    let mut ways = Vec::new();
    if let Some(arg) = descriptor.arg() {
        ways.push(format!("define parameter {arg}"));
    }
    if let Some(env) = descriptor.env() {
        ways.push(format!("define env {env}"));
    }
    if ways.is_empty() {
        format!("set field {}", descriptor.name())
    } else {
        ways.join(" or ")
    }
}

/// Run every validation hook: the target's own first, then each field's.
///
/// A list field is validated through its own hook when it has one, otherwise
/// element by element. Fields holding nothing are skipped.
pub fn check_hooks<C: Arguments>(
    ctx: &Context,
    fields: &[Field<C>],
    target: &C,
) -> Result<(), ArgumentError> {
    if let Some(hook) = target.validator() {
        hook.validate(ctx).map_err(ArgumentError::Validation)?;
    }

    for field in fields {
        let descriptor = field.descriptor();
        let wrap = |name: String| {
            move |source| ArgumentError::FieldValidation {
                field: name,
                type_name: descriptor.type_name(),
                source,
            }
        };

        if let Some(hook) = field.validator(target) {
            hook.validate(ctx)
                .map_err(wrap(descriptor.name().to_string()))?;
            continue;
        }
        for (i, hook) in field.element_validators(target).into_iter().enumerate() {
            hook.validate(ctx)
                .map_err(wrap(format!("{}[{i}]", descriptor.name())))?;
        }
    }
    Ok(())
}
