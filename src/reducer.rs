//! Fixpoint reducer: repeatedly attempts to resolve control nodes whose
//! arguments and path have themselves reduced to plain literals,
//! coalescing adjacent literals after every pass, until the total node
//! count stops shrinking.
//!
//! Between passes, the partially-resolved document (every still-literal
//! part concatenated, every still-unresolved control node left as its
//! original text) is re-parsed so `self:` references see the document's
//! progress so far, not just its original, fully-unresolved text.

use crate::ast::{Node, NodeKind};
use crate::context::Context;
use crate::document::DocumentView;
use crate::error::Result;
use crate::resolver::{dispatch, ResolvedNode};

/// Run the fixpoint reduction to completion and return the final node
/// sequence. Callers typically follow this with
/// [`stringify`]`(nodes, false)` to get the resolved text or fail on
/// anything left unresolved.
pub fn reduce(nodes: Vec<Node>, ctx: &Context) -> Result<Vec<Node>> {
    let mut current = nodes;
    let mut doc = ctx.doc.clone();

    let mut pass = 0;
    loop {
        pass += 1;
        let before = total_node_count(&current);
        let pass_ctx = ctx.rebased(&ctx.cwd, doc.clone());
        current = reduce_sequence(current, &pass_ctx)?;
        let after = total_node_count(&current);
        tracing::debug!("reduction pass {pass}: {before} nodes -> {after} nodes");
        if after == before {
            return Ok(current);
        }
        let partial = stringify(&current, true)?;
        doc = DocumentView::parse(&partial);
    }
}

/// Render a node sequence to text. With `force`, every still-unresolved
/// control node is rendered as its original `${...}` text (used to build
/// the partial document between passes); without it, any remaining
/// control node is collected and reported as a
/// [`crate::error::PreconfigError::Reference`].
pub fn stringify(nodes: &[Node], force: bool) -> Result<String> {
    let mut out = String::new();
    let mut unresolved = Vec::new();
    for node in nodes {
        match &node.kind {
            NodeKind::Literal => out.push_str(&node.segment),
            NodeKind::Control(_) => {
                if force {
                    out.push_str(&node.segment);
                } else {
                    unresolved.push(node.segment.clone());
                }
            }
        }
    }
    if !unresolved.is_empty() {
        return Err(crate::error::PreconfigError::reference_many(unresolved));
    }
    Ok(out)
}

fn reduce_sequence(nodes: Vec<Node>, ctx: &Context) -> Result<Vec<Node>> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        out.push(reduce_node(node, ctx)?);
    }
    Ok(coalesce_literals(out))
}

fn reduce_node(node: Node, ctx: &Context) -> Result<Node> {
    let Node {
        kind,
        segment,
        arguments,
        path,
    } = node;

    let control_name = match &kind {
        NodeKind::Literal => return Ok(Node {
            kind,
            segment,
            arguments,
            path,
        }),
        NodeKind::Control(name) => name.clone(),
    };

    let arguments = match arguments {
        Some(args) => {
            let mut reduced = Vec::with_capacity(args.len());
            for arg in args {
                reduced.push(reduce_sequence(arg, ctx)?);
            }
            Some(reduced)
        }
        None => None,
    };
    let path = match path {
        Some(p) => Some(reduce_sequence(p, ctx)?),
        None => None,
    };

    let args_ready = match &arguments {
        Some(args) => args.iter().all(|a| is_settled(a)),
        None => true,
    };
    let path_ready = match &path {
        Some(p) => is_settled(p),
        None => true,
    };

    if args_ready && path_ready {
        let resolved_args = arguments.as_ref().map(|args| args.iter().map(|a| settled_value(a)).collect());
        let resolved_path = path.as_ref().map(|p| settled_value(p));
        let resolved_node = ResolvedNode {
            kind: &control_name,
            segment: &segment,
            arguments: resolved_args,
            path: resolved_path,
        };
        if let Some(value) = dispatch(&resolved_node, ctx)? {
            return Ok(Node::literal(value));
        }
    }

    Ok(Node {
        kind: NodeKind::Control(control_name),
        segment,
        arguments,
        path,
    })
}

/// A node sequence is "settled" once it's been reduced to either nothing
/// (an empty argument/path, standing for `""`) or a single literal.
fn is_settled(seq: &[Node]) -> bool {
    seq.is_empty() || (seq.len() == 1 && seq[0].kind == NodeKind::Literal)
}

fn settled_value(seq: &[Node]) -> String {
    seq.first().map_or_else(String::new, |n| n.segment.clone())
}

fn coalesce_literals(nodes: Vec<Node>) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if node.kind == NodeKind::Literal {
            if let Some(last) = out.last_mut() {
                if last.kind == NodeKind::Literal {
                    last.segment.push_str(&node.segment);
                    continue;
                }
            }
        }
        out.push(node);
    }
    out
}

fn total_node_count(nodes: &[Node]) -> usize {
    nodes
        .iter()
        .map(|n| {
            let mut count = 1;
            if let Some(args) = &n.arguments {
                count += args.iter().map(|a| total_node_count(a)).sum::<usize>();
            }
            if let Some(p) = &n.path {
                count += total_node_count(p);
            }
            count
        })
        .sum()
}
