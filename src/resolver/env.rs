//! `env`: look up the resolved path as a process environment variable.

use crate::context::Context;
use crate::error::Result;
use crate::resolver::{validate_input, PathRequirement, ResolvedNode};

/// Resolve `${env:VAR}`. Takes no arguments and requires a path.
pub fn resolve(node: &ResolvedNode, _ctx: &Context) -> Result<Option<String>> {
    validate_input(node, 0, PathRequirement::Required)?;
    let var = node.path.as_deref().unwrap_or_default();
    Ok(std::env::var(var).ok())
}
