//! `self`: look up a path against the current document's own,
//! partially-resolved structure.

use crate::ast::{ast, NodeKind};
use crate::context::Context;
use crate::error::{PreconfigError, Result};
use crate::resolver::{validate_input, PathRequirement, ResolvedNode};

/// Resolve `${self:path}`. Takes no arguments and requires a path.
/// Fails immediately if the current document isn't structured data; if
/// the looked-up value still contains unresolved control expressions of
/// its own, resolves to `None` so the fixpoint reducer tries again on a
/// later pass instead of returning a half-resolved string.
pub fn resolve(node: &ResolvedNode, ctx: &Context) -> Result<Option<String>> {
    validate_input(node, 0, PathRequirement::Required)?;

    if ctx.doc.is_text() {
        return Err(PreconfigError::reference(
            "cannot self-reference a template whose document is plain text",
        ));
    }

    let path = node.path.as_deref().unwrap_or_default();
    let Some(value) = ctx.doc.lookup(path) else {
        return Ok(None);
    };

    let (_, nodes) = ast(&value)?;
    let still_pending = nodes.iter().any(|n| n.kind != NodeKind::Literal);
    if still_pending {
        return Ok(None);
    }

    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentView;
    use std::collections::HashMap;

    fn node(path: Option<&str>) -> ResolvedNode<'static> {
        ResolvedNode {
            kind: "self",
            segment: "${self:name}",
            arguments: None,
            path: path.map(String::from),
        }
    }

    #[test]
    fn resolves_a_sibling_value() {
        let params = HashMap::new();
        let doc = DocumentView::parse(r#"{"name":"preconfig"}"#);
        let ctx = Context::new(".", &params, doc);
        assert_eq!(resolve(&node(Some("name")), &ctx).unwrap(), Some("preconfig".to_string()));
    }

    #[test]
    fn defers_when_sibling_value_is_still_a_control_expression() {
        let params = HashMap::new();
        let doc = DocumentView::parse(r#"{"name":"${para:name}"}"#);
        let ctx = Context::new(".", &params, doc);
        assert_eq!(resolve(&node(Some("name")), &ctx).unwrap(), None);
    }

    #[test]
    fn text_document_is_a_hard_error() {
        let params = HashMap::new();
        let doc = DocumentView::parse("just text");
        let ctx = Context::new(".", &params, doc);
        assert!(resolve(&node(Some("name")), &ctx).is_err());
    }

    #[test]
    fn missing_sibling_is_none() {
        let params = HashMap::new();
        let doc = DocumentView::parse(r#"{"name":"preconfig"}"#);
        let ctx = Context::new(".", &params, doc);
        assert_eq!(resolve(&node(Some("missing")), &ctx).unwrap(), None);
    }
}
