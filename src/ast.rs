//! AST builder: turns raw text plus located markers into a tree of
//! [`Node`]s, each carrying an optional argument list and an optional
//! dotted path — both themselves node sequences, since arguments and
//! paths may contain further control expressions.

use crate::error::Result;
use crate::marker::{first_degree, locate_markers, Marker};

/// What kind of thing a [`Node`] represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A literal run of text, used verbatim.
    Literal,
    /// A control expression naming a source (`para`, `env`, `file`,
    /// `self`, `base64encode`, `base64decode`, or an unrecognized
    /// identifier — unknown sources still parse, they just have no
    /// resolver and fail at reduction time).
    Control(String),
}

/// A node in the control-expression tree.
///
/// `arguments` and `path` are each `Option` to preserve the
/// absent-vs-empty distinction spec'd for control headers: `${fn}` has
/// no arguments and no path, `${fn()}` has an empty-but-present argument
/// list, `${fn:}` has an empty-but-present path.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// The node's kind.
    pub kind: NodeKind,
    /// The exact substring of the text this node was built from.
    pub segment: String,
    /// Argument node-sequences, or `None` if no `(...)` was present.
    pub arguments: Option<Vec<Vec<Node>>>,
    /// The dotted-path node-sequence, or `None` if no `:` was present.
    pub path: Option<Vec<Node>>,
}

impl Node {
    /// Build a literal node carrying `segment` verbatim. Exposed to the
    /// reducer, which replaces resolved control nodes with literals
    /// holding their resolved value.
    pub(crate) fn literal(segment: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Literal,
            segment: segment.into(),
            arguments: None,
            path: None,
        }
    }
}

/// Parse `text` into a top-level node sequence, paired with the original
/// content it was parsed from.
pub fn ast(text: &str) -> Result<(String, Vec<Node>)> {
    let markers = locate_markers(text, "${", "}")?;
    let outer = first_degree(&markers);

    let mut nodes = Vec::with_capacity(outer.len() * 2 + 1);
    let mut cursor = 0;
    for marker in outer {
        if marker.open > cursor {
            nodes.push(Node::literal(&text[cursor..marker.open]));
        }
        nodes.push(build_control_node(text, marker)?);
        cursor = marker.close + 1;
    }
    if cursor < text.len() {
        nodes.push(Node::literal(&text[cursor..]));
    }

    Ok((text.to_string(), nodes))
}

/// Build the `Node` for a single first-degree `${...}` marker by parsing
/// its control header. Falls back to a literal node if the header does
/// not match the expected grammar (the locator has already validated
/// bracket pairing, so this is rare in practice).
fn build_control_node(text: &str, marker: Marker) -> Result<Node> {
    let segment = &text[marker.open..=marker.close];
    // header is everything between "${" and the final "}".
    let header = &text[marker.open + 2..marker.close];

    match parse_header(header) {
        Some((ident, arguments, path)) => {
            let arguments = match arguments {
                Some(arg_strings) => {
                    let mut built = Vec::with_capacity(arg_strings.len());
                    for arg in arg_strings {
                        let (_, nodes) = ast(&arg)?;
                        built.push(nodes);
                    }
                    Some(built)
                }
                None => None,
            };
            let path = match path {
                Some(path_string) => {
                    let (_, nodes) = ast(&path_string)?;
                    Some(nodes)
                }
                None => None,
            };
            Ok(Node {
                kind: NodeKind::Control(ident),
                segment: segment.to_string(),
                arguments,
                path,
            })
        }
        None => Ok(Node::literal(segment)),
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Parse a control header (the text between `${` and `}`) into its
/// identifier, optional argument-list strings, and optional path string.
/// Returns `None` if the header doesn't match the grammar.
fn parse_header(header: &str) -> Option<(String, Option<Vec<String>>, Option<String>)> {
    let mut chars: Vec<(usize, char)> = header.char_indices().collect();
    chars.push((header.len(), '\0')); // sentinel
    let mut pos = 0;

    let skip_ws = |chars: &[(usize, char)], mut pos: usize| -> usize {
        while chars[pos].1.is_whitespace() {
            pos += 1;
        }
        pos
    };

    pos = skip_ws(&chars, pos);
    let ident_start = pos;
    while is_ident_char(chars[pos].1) {
        pos += 1;
    }
    if pos == ident_start {
        return None;
    }
    let ident_end_byte = chars[pos].0;
    let ident = header[chars[ident_start].0..ident_end_byte].to_string();

    pos = skip_ws(&chars, pos);

    let mut arguments = None;
    if chars[pos].1 == '(' {
        let open_byte = chars[pos].0;
        let remainder = &header[open_byte..];
        let inner_markers = locate_markers(remainder, "(", ")").ok()?;
        let matching = inner_markers.iter().find(|m| m.open == 0)?;
        let close_byte = open_byte + matching.close;
        let inner = &header[open_byte + 1..close_byte];
        arguments = Some(split_argument_list(inner));

        // advance `pos` (char index) past the consumed byte range.
        pos = chars.iter().position(|&(b, _)| b == close_byte + 1).unwrap_or(chars.len() - 1);
        pos = skip_ws(&chars, pos);
    }

    let mut path = None;
    if chars[pos].1 == ':' {
        pos += 1;
        let path_start_byte = chars[pos].0;
        path = Some(header[path_start_byte..].trim().to_string());
        pos = chars.len() - 1;
    }

    if pos != chars.len() - 1 {
        // Leftover, unexpected text in the header.
        return None;
    }

    Some((ident, arguments, path))
}

/// Split an argument-list interior on commas, except commas that fall
/// inside a nested `${...}` span, trimming whitespace from each token.
/// A blank (whitespace-only) interior yields an empty-but-present list.
fn split_argument_list(inner: &str) -> Vec<String> {
    if inner.trim().is_empty() {
        return Vec::new();
    }

    let nested = locate_markers(inner, "${", "}").unwrap_or_default();
    let protected = first_degree(&nested);

    let mut tokens = Vec::new();
    let mut start = 0;
    let bytes = inner.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b',' {
            continue;
        }
        if protected.iter().any(|m| i > m.open && i < m.close) {
            continue;
        }
        tokens.push(inner[start..i].trim().to_string());
        start = i + 1;
    }
    tokens.push(inner[start..].trim().to_string());
    tokens
}
