//! `para`: look up the resolved path verbatim as a key in the
//! caller-supplied parameter map.

use crate::context::Context;
use crate::error::Result;
use crate::resolver::{validate_input, PathRequirement, ResolvedNode};

/// Resolve `${para:key}`. Takes no arguments and requires a path (which
/// may be empty, though an empty key will simply never be found).
pub fn resolve(node: &ResolvedNode, ctx: &Context) -> Result<Option<String>> {
    validate_input(node, 0, PathRequirement::Required)?;
    let key = node.path.as_deref().unwrap_or_default();
    Ok(ctx.parameter.get(key).cloned())
}
