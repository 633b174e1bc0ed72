//! Document View: the structured interpretation of a template's content
//! (so far resolved), used to answer `self:` references.
//!
//! A template is interpreted as one of plain text, a single JSON/YAML
//! document, or a multi-document YAML stream — whichever the parser
//! collaborator recognizes first, tried in that order. YAML values are
//! normalized into [`serde_json::Value`] immediately after parsing so
//! every downstream dotted-path lookup has exactly one value type to
//! handle.

use serde::Deserialize as _;
use serde_json::Value;

/// The structured interpretation of a template's content.
#[derive(Debug, Clone)]
pub enum DocumentView {
    /// Plain text; no structured lookup is possible.
    Text(String),
    /// A single JSON document whose root is an object or array.
    Json(Value),
    /// A single YAML document whose root is a mapping or sequence.
    Yaml(Value),
    /// A YAML stream of two or more `---`-separated documents.
    Multi(Vec<Value>),
}

impl DocumentView {
    /// Interpret `content` as structured data, trying JSON, then
    /// single-document YAML, then multi-document YAML, then falling
    /// back to plain text. Never fails — an unparseable input is simply
    /// `Text`.
    pub fn parse(content: &str) -> Self {
        if let Some(value) = try_json(content) {
            return Self::Json(value);
        }
        if let Some(docs) = try_yaml_documents(content) {
            return match docs.len() {
                1 => Self::Yaml(docs.into_iter().next().expect("checked len == 1")),
                _ => Self::Multi(docs),
            };
        }
        Self::Text(content.to_string())
    }

    /// Look up a dotted `path` against this view. Returns `None` when
    /// the view is plain text, the path doesn't resolve to a value, or
    /// the resolved value is an explicit JSON `null` (treated the same
    /// as "not found" — see `DESIGN.md`).
    ///
    /// For [`DocumentView::Multi`], the path's first segment selects
    /// the zero-based document index (`self:0.name`).
    pub fn lookup(&self, path: &str) -> Option<String> {
        match self {
            Self::Text(_) => None,
            Self::Json(v) | Self::Yaml(v) => extract_from_json(v, path),
            Self::Multi(docs) => {
                let (index_segment, rest) = match path.split_once('.') {
                    Some((head, tail)) => (head, tail),
                    None => (path, ""),
                };
                let index: usize = index_segment.parse().ok()?;
                extract_from_json(docs.get(index)?, rest)
            }
        }
    }

    /// `true` if this view holds plain text (no structured data).
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }
}

fn try_json(content: &str) -> Option<Value> {
    let value: Value = serde_json::from_str(content).ok()?;
    matches!(value, Value::Object(_) | Value::Array(_)).then_some(value)
}

/// Parse `content` as a YAML stream and return every document whose root
/// is a mapping or sequence. Returns `None` if the stream fails to parse
/// or contains a document whose root is a scalar (primitive documents
/// don't participate in `self:` lookups, so a stream containing one
/// falls through to plain text rather than silently dropping it).
fn try_yaml_documents(content: &str) -> Option<Vec<Value>> {
    let mut docs = Vec::new();
    for document in serde_yaml::Deserializer::from_str(content) {
        let yaml_value = serde_yaml::Value::deserialize(document).ok()?;
        if !matches!(yaml_value, serde_yaml::Value::Mapping(_) | serde_yaml::Value::Sequence(_)) {
            return None;
        }
        let json_value = serde_json::to_value(&yaml_value).ok()?;
        docs.push(json_value);
    }
    if docs.is_empty() {
        None
    } else {
        Some(docs)
    }
}

/// Dotted-path lookup: `a.b.2` indexes key `a`, then `b`, then array
/// element `2`. Numeric segments are tried as array indices against
/// arrays and as (numeral-looking) object keys against objects — the
/// same ambiguity `extractFromJSON` inherits in the source this was
/// distilled from.
pub fn extract_from_json(data: &Value, path: &str) -> Option<String> {
    let mut current = data;
    if !path.is_empty() {
        for segment in path.split('.') {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(arr) => arr.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
    }
    stringify_leaf(current)
}

fn stringify_leaf(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null => None,
        Value::Object(_) | Value::Array(_) => serde_json::to_string(value).ok(),
    }
}
