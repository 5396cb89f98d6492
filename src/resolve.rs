//! Core resolution pipeline: resolve each source, merge, and fill the target.
//!
//! Operates on pre-loaded data (`ResolveInput`) with no I/O, making the full
//! pipeline testable with synthetic inputs. Steps:
//!
//! 1. Resolve the argument vector (if enabled)
//! 2. Resolve the environment block (if enabled)
//! 3. Resolve default texts
//! 4. Merge: defaults, then arguments, then environment (highest priority)
//! 5. Assign the merged values onto the target

use tracing::debug;

use crate::args::arg_values;
use crate::default::default_values;
use crate::env::env_values;
use crate::error::ArgumentError;
use crate::field::{Arguments, descriptors};
use crate::fill::fill_values;
use crate::merge::merge_values;
use crate::types::Values;

/// All pre-loaded data needed to resolve a target. No I/O happens here.
#[derive(Debug, Clone, Default)]
pub struct ResolveInput {
    /// Program name shown in command-line errors and help.
    pub program_name: String,
    /// Argument vector without the binary name. `None` disables the source.
    pub args: Option<Vec<String>>,
    /// `NAME=value` entries. `None` disables the source.
    pub env_vars: Option<Vec<String>>,
}

/// Resolve all enabled sources and fill `target`.
///
/// Fields no source supplied keep their current value. On error the target
/// may be partially filled.
pub fn resolve<C: Arguments>(input: ResolveInput, target: &mut C) -> Result<(), ArgumentError> {
    let fields = descriptors::<C>();

    let args = match &input.args {
        Some(args) => arg_values(&fields, &input.program_name, args)?,
        None => Values::new(),
    };
    let env = match &input.env_vars {
        Some(vars) => env_values(&fields, vars)?,
        None => Values::new(),
    };
    let defaults = default_values(&fields)?;

    let merged = merge_values([&defaults, &args, &env]);
    debug!(
        defaults = defaults.len(),
        args = args.len(),
        env = env.len(),
        merged = merged.len(),
        "merged sources"
    );
    fill_values(&fields, target, merged)
}
