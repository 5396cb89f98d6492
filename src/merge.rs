use crate::types::Values;

/// Merge source maps in order; for the same key, later maps win.
///
/// A key missing from a later map leaves the earlier value in place, so a
/// source "has no opinion" on every field it did not supply.
pub fn merge_values<'a>(layers: impl IntoIterator<Item = &'a Values>) -> Values {
    let mut merged = Values::new();
    for layer in layers {
        for (key, value) in layer {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}
