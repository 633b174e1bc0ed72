//! Resolver Registry: the fixed mapping from control-source name to a
//! resolver function, plus the helpers every resolver shares
//! (`validate_input`, `extract_from_raw`).
//!
//! Each resolver receives a [`ResolvedNode`] — a node whose arguments
//! and path have already been reduced to plain strings — and the
//! current [`Context`], and returns either a resolved string, `None`
//! ("cannot yet be resolved — try again later"), or a hard error.

pub mod b64;
pub mod env;
pub mod file;
pub mod para;
pub mod selfref;

use crate::context::Context;
use crate::document::DocumentView;
use crate::error::{PreconfigError, Result};

/// A node whose `arguments` and `path` have been fully reduced to plain
/// strings, ready for a resolver to consume.
#[derive(Debug, Clone)]
pub struct ResolvedNode<'a> {
    /// The control source name (`para`, `env`, ... or an unknown name).
    pub kind: &'a str,
    /// The original `${...}` text, used in diagnostics.
    pub segment: &'a str,
    /// Resolved argument strings, or `None` if no `(...)` was present.
    pub arguments: Option<Vec<String>>,
    /// The resolved path string, or `None` if no `:` was present.
    pub path: Option<String>,
}

/// Whether a resolver requires, forbids, or tolerates either presence
/// of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRequirement {
    /// A path must be present (may be empty).
    Required,
    /// A path is forbidden.
    Forbidden,
    /// A path may or may not be present.
    Optional,
}

/// Validate a resolved node's shape against a resolver's contract,
/// raising a [`PreconfigError::Syntax`] when it doesn't match.
pub fn validate_input(node: &ResolvedNode, expected_args: usize, path: PathRequirement) -> Result<()> {
    let args_present = node.arguments.is_some();
    let actual_args = node.arguments.as_ref().map_or(0, Vec::len);

    if expected_args == 0 && args_present {
        return Err(PreconfigError::syntax(format!(
            "'{}' takes no arguments: {}",
            node.kind, node.segment
        )));
    }
    if expected_args > 0 && actual_args != expected_args {
        return Err(PreconfigError::syntax(format!(
            "'{}' expects {} argument(s), found {}: {}",
            node.kind, expected_args, actual_args, node.segment
        )));
    }

    match (path, node.path.is_some()) {
        (PathRequirement::Required, false) => Err(PreconfigError::syntax(format!(
            "'{}' requires a path: {}",
            node.kind, node.segment
        ))),
        (PathRequirement::Forbidden, true) => Err(PreconfigError::syntax(format!(
            "'{}' does not accept a path: {}",
            node.kind, node.segment
        ))),
        _ => Ok(()),
    }
}

/// `extractFromRaw`: if `path` is absent or empty, return `content`
/// unchanged; otherwise interpret `content` as structured data and look
/// up `path` in it, raising [`PreconfigError::Implementation`] if
/// `content` turns out to be plain text (a path can't be extracted from
/// something that isn't JSON/YAML).
pub fn extract_from_raw(content: &str, path: Option<&str>) -> Result<Option<String>> {
    let path = path.unwrap_or("");
    if path.is_empty() {
        return Ok(Some(content.to_string()));
    }
    let view = DocumentView::parse(content);
    if view.is_text() {
        return Err(PreconfigError::implementation(
            "cannot resolve a path for a non-json/yaml content",
        ));
    }
    Ok(view.lookup(path))
}

/// Dispatch a resolved node to its resolver. Unknown source names have
/// no resolver and are returned as `Ok(None)` — the node is left
/// untouched and the eventual `stringify(force=false)` call will report
/// it as unresolvable.
pub fn dispatch(node: &ResolvedNode, ctx: &Context) -> Result<Option<String>> {
    match node.kind {
        "para" => para::resolve(node, ctx),
        "env" => env::resolve(node, ctx),
        "file" => file::resolve(node, ctx),
        "self" => selfref::resolve(node, ctx),
        "base64encode" => b64::encode(node, ctx),
        "base64decode" => b64::decode(node, ctx),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn node<'a>(kind: &'a str, arguments: Option<Vec<String>>, path: Option<String>) -> ResolvedNode<'a> {
        ResolvedNode {
            kind,
            segment: "${test}",
            arguments,
            path,
        }
    }

    #[test]
    fn rejects_unexpected_empty_arg_list() {
        let n = node("para", Some(vec![]), Some("x".into()));
        assert!(validate_input(&n, 0, PathRequirement::Required).is_err());
    }

    #[test]
    fn rejects_wrong_arg_count() {
        let n = node("file", Some(vec!["a".into(), "b".into()]), None);
        assert!(validate_input(&n, 1, PathRequirement::Optional).is_err());
    }

    #[test]
    fn rejects_missing_required_path() {
        let n = node("para", None, None);
        assert!(validate_input(&n, 0, PathRequirement::Required).is_err());
    }

    #[test]
    fn rejects_forbidden_path() {
        let n = node("base64encode", Some(vec!["x".into()]), Some("y".into()));
        assert!(validate_input(&n, 1, PathRequirement::Forbidden).is_err());
    }

    #[test]
    fn accepts_well_formed_node() {
        let n = node("para", None, Some(String::new()));
        assert!(validate_input(&n, 0, PathRequirement::Required).is_ok());
    }

    #[test]
    fn extract_from_raw_empty_path_is_content() {
        assert_eq!(extract_from_raw("hello", None).unwrap(), Some("hello".to_string()));
        assert_eq!(extract_from_raw("hello", Some("")).unwrap(), Some("hello".to_string()));
    }

    #[test]
    fn extract_from_raw_rejects_path_on_text() {
        assert!(extract_from_raw("hello", Some("a.b")).is_err());
    }

    #[test]
    fn extract_from_raw_looks_up_json() {
        assert_eq!(
            extract_from_raw(r#"{"a":"b"}"#, Some("a")).unwrap(),
            Some("b".to_string())
        );
    }

    #[test]
    fn unknown_source_dispatches_to_none() {
        let n = node("mystery", None, None);
        let params = HashMap::new();
        let ctx = Context::new(".", &params, DocumentView::Text(String::new()));
        assert_eq!(dispatch(&n, &ctx).unwrap(), None);
    }
}
