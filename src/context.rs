//! Resolution context: the read-only inputs a single `resolve()` call
//! threads through every node reduction.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::document::DocumentView;

/// Immutable, per-`resolve()`-call context.
///
/// Nothing under `Context` is mutated during a reduction pass; the
/// fixpoint reducer only ever replaces `self` *between* passes by
/// constructing a fresh `Context` from a freshly re-parsed
/// [`DocumentView`].
pub struct Context<'a> {
    /// Directory used to resolve relative `file` references.
    pub cwd: PathBuf,
    /// Caller-supplied parameter map, consulted by the `para` resolver.
    pub parameter: &'a HashMap<String, String>,
    /// The document-so-far, consulted by the `self` resolver.
    pub doc: DocumentView,
}

impl<'a> Context<'a> {
    /// Build a context rooted at `cwd` with the given parameter map and
    /// document view.
    pub fn new(cwd: impl AsRef<Path>, parameter: &'a HashMap<String, String>, doc: DocumentView) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
            parameter,
            doc,
        }
    }

    /// Build a context identical to this one but rooted at a different
    /// directory and document view — used by the `file` resolver to
    /// construct the context for a nested template.
    pub fn rebased(&self, cwd: impl AsRef<Path>, doc: DocumentView) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
            parameter: self.parameter,
            doc,
        }
    }
}
