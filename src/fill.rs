use tracing::debug;

use crate::error::ArgumentError;
use crate::field::Field;
use crate::types::Values;

/// Assign every value in `values` onto the matching slot of `target`.
///
/// Fields without an entry keep whatever `target` already holds. A key that
/// names no field is an error, as is a value the slot cannot hold.
pub fn fill_values<C>(
    fields: &[Field<C>],
    target: &mut C,
    values: Values,
) -> Result<(), ArgumentError> {
    let count = values.len();
    for (key, value) in values {
        let field = fields
            .iter()
            .find(|f| f.descriptor().name() == key)
            .ok_or_else(|| ArgumentError::UnknownField(key.clone()))?;
        field
            .assign(target, value)
            .map_err(|source| ArgumentError::Fill {
                field: key,
                type_name: field.descriptor().type_name(),
                source,
            })?;
    }
    debug!(count, "filled target");
    Ok(())
}
