//! preconfig - a configuration template transpiler.
//!
//! preconfig resolves `${source:path}` and `${source(args):path}`
//! control expressions embedded in a template's text against a fixed
//! [`resolver`] registry consulted through a [`Context`](context::Context),
//! producing the fully-rendered document.
//!
//! # Architecture
//!
//! - [`marker`] - locates matched `${ ... }` (and nested `( ... )`)
//!   delimiter pairs, honoring backslash escapes and nesting
//! - [`ast`] - turns located markers into a tree of [`ast::Node`]s
//! - [`document`] - interprets a template's text as JSON, YAML, or plain
//!   text, used to answer `self:` references
//! - [`context`] - the read-only inputs threaded through a resolution
//! - [`resolver`] - the fixed `para`/`env`/`file`/`self`/`base64encode`/
//!   `base64decode` sources
//! - [`reducer`] - the fixpoint reduction loop that drives resolution to
//!   completion
//! - [`template`] - [`Template`], the single entry point tying the above
//!   together
//! - [`error`] - the four error kinds and their CLI display wrapper
//! - [`fs`] - the minimal file access the `file` resolver needs
//! - [`cli`] - command-line argument parsing and output formatting
//!
//! # Example
//!
//! ```no_run
//! use std::collections::HashMap;
//! use preconfig::Template;
//!
//! let template = Template::new("hello ${para:name}", ".").unwrap();
//! let mut parameters = HashMap::new();
//! parameters.insert("name".to_string(), "world".to_string());
//! assert_eq!(template.resolve(&parameters).unwrap(), "hello world");
//! ```

pub mod ast;
pub mod cli;
pub mod context;
pub mod document;
pub mod error;
pub mod fs;
pub mod marker;
pub mod reducer;
pub mod resolver;
pub mod template;

pub use ast::{ast as parse_ast, Node, NodeKind};
pub use context::Context;
pub use document::DocumentView;
pub use error::{PreconfigError, Result};
pub use marker::{locate_markers, Marker};
pub use template::Template;
