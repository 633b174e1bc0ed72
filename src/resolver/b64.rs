//! `base64encode` / `base64decode`: straightforward base64 codec
//! resolvers, the only two sources that take a literal argument instead
//! of a path as their primary input.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::context::Context;
use crate::error::{PreconfigError, Result};
use crate::resolver::{extract_from_raw, validate_input, PathRequirement, ResolvedNode};

/// Resolve `${base64encode(value)}`. Takes exactly one argument and
/// forbids a path.
pub fn encode(node: &ResolvedNode, _ctx: &Context) -> Result<Option<String>> {
    validate_input(node, 1, PathRequirement::Forbidden)?;
    let value = &node.arguments.as_ref().expect("validated exactly one argument")[0];
    Ok(Some(STANDARD.encode(value)))
}

/// Resolve `${base64decode(value):path}`. Takes exactly one argument and
/// allows an optional path into the decoded content.
pub fn decode(node: &ResolvedNode, _ctx: &Context) -> Result<Option<String>> {
    validate_input(node, 1, PathRequirement::Optional)?;
    let value = &node.arguments.as_ref().expect("validated exactly one argument")[0];
    let bytes = STANDARD
        .decode(value)
        .map_err(|e| PreconfigError::reference(format!("invalid base64 in base64decode: {e}")))?;
    let decoded = String::from_utf8(bytes)
        .map_err(|e| PreconfigError::reference(format!("base64decode result is not valid UTF-8: {e}")))?;
    extract_from_raw(&decoded, node.path.as_deref())
}
