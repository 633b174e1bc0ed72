//! Top-level entry point: a [`Template`] ties together the AST builder,
//! the Document View, and the fixpoint reducer behind the single
//! operation callers actually want — resolve this text, in this
//! directory, against these parameters.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::ast::{ast, Node};
use crate::context::Context;
use crate::document::DocumentView;
use crate::error::Result;
use crate::reducer::{reduce, stringify};

/// A template's parsed AST paired with the original text (consulted by
/// `self:` references) and the directory relative `file` references
/// inside it are resolved against.
pub struct Template {
    content: String,
    cwd: PathBuf,
    nodes: Vec<Node>,
}

impl Template {
    /// Parse `content` immediately, rooting relative `file` references
    /// at `cwd`. Fails with [`crate::error::PreconfigError::Syntax`] if
    /// `content` is malformed (e.g. an unmatched `${`).
    pub fn new(content: impl Into<String>, cwd: impl AsRef<Path>) -> Result<Self> {
        let content = content.into();
        let (_, nodes) = ast(&content)?;
        Ok(Self {
            content,
            cwd: cwd.as_ref().to_path_buf(),
            nodes,
        })
    }

    /// Resolve this template's control expressions against `parameter`,
    /// returning the fully-rendered text or the first
    /// [`crate::error::PreconfigError`] encountered.
    pub fn resolve(&self, parameter: &HashMap<String, String>) -> Result<String> {
        tracing::debug!("resolving template ({} bytes) rooted at {}", self.content.len(), self.cwd.display());
        let doc = DocumentView::parse(&self.content);
        let ctx = Context::new(&self.cwd, parameter, doc);
        let reduced = reduce(self.nodes.clone(), &ctx)?;
        let output = stringify(&reduced, false)?;
        tracing::debug!("template resolved to {} bytes", output.len());
        Ok(output)
    }
}
