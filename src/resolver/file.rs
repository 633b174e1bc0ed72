//! `file`: read another template relative to the current one's
//! directory, fully resolve it against the same parameters, then
//! optionally extract a path from its result.

use std::path::Path;

use crate::context::Context;
use crate::error::Result;
use crate::fs::read_text_file;
use crate::resolver::{extract_from_raw, validate_input, PathRequirement, ResolvedNode};
use crate::template::Template;

/// Resolve `${file(path):path}`. Takes exactly one argument (the file
/// path, relative to the current template's directory) and an optional
/// extraction path into the file's resolved content.
pub fn resolve(node: &ResolvedNode, ctx: &Context) -> Result<Option<String>> {
    validate_input(node, 1, PathRequirement::Optional)?;
    let relative = &node.arguments.as_ref().expect("validated exactly one argument")[0];
    let file_path = ctx.cwd.join(relative);
    let content = read_text_file(&file_path)?;

    let parent = file_path.parent().map_or_else(|| ctx.cwd.clone(), Path::to_path_buf);
    let resolved = Template::new(content, parent)?.resolve(ctx.parameter)?;

    extract_from_raw(&resolved, node.path.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentView;
    use std::collections::HashMap;
    use std::io::Write;

    fn node(arg: &str, path: Option<&str>) -> ResolvedNode<'static> {
        ResolvedNode {
            kind: "file",
            segment: "${file(x)}",
            arguments: Some(vec![arg.to_string()]),
            path: path.map(String::from),
        }
    }

    #[test]
    fn reads_a_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("greeting.txt");
        std::fs::write(&file_path, "hello").unwrap();

        let params = HashMap::new();
        let ctx = Context::new(dir.path(), &params, DocumentView::Text(String::new()));
        assert_eq!(resolve(&node("greeting.txt", None), &ctx).unwrap(), Some("hello".to_string()));
    }

    #[test]
    fn resolves_parameters_inside_the_included_file() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("greeting.txt");
        let mut f = std::fs::File::create(&file_path).unwrap();
        write!(f, "hello ${{para:name}}").unwrap();

        let mut params = HashMap::new();
        params.insert("name".to_string(), "world".to_string());
        let ctx = Context::new(dir.path(), &params, DocumentView::Text(String::new()));
        assert_eq!(resolve(&node("greeting.txt", None), &ctx).unwrap(), Some("hello world".to_string()));
    }

    #[test]
    fn extracts_a_path_from_included_json() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("data.json");
        std::fs::write(&file_path, r#"{"a":{"b":"c"}}"#).unwrap();

        let params = HashMap::new();
        let ctx = Context::new(dir.path(), &params, DocumentView::Text(String::new()));
        assert_eq!(resolve(&node("data.json", Some("a.b")), &ctx).unwrap(), Some("c".to_string()));
    }

    #[test]
    fn missing_file_is_a_reference_error() {
        let dir = tempfile::tempdir().unwrap();
        let params = HashMap::new();
        let ctx = Context::new(dir.path(), &params, DocumentView::Text(String::new()));
        assert!(resolve(&node("does-not-exist.txt", None), &ctx).is_err());
    }
}
