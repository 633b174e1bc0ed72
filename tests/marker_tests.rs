//! End-to-end coverage of the bracket-pair locator against the escape
//! and nesting scenarios.

use preconfig::locate_markers;

#[test]
fn escaped_delimiters_are_never_matched() {
    let markers = locate_markers(r"plain \${not a marker} text", "${", "}").unwrap();
    assert!(markers.is_empty());
}

#[test]
fn deeply_nested_markers_pair_correctly() {
    let markers = locate_markers("${a${b${c}d}e}", "${", "}").unwrap();
    assert_eq!(markers.len(), 3);
    // Sorted by open offset, outermost first.
    assert!(markers[0].open < markers[1].open);
    assert!(markers[1].open < markers[2].open);
    // And correctly nested: each inner marker's close precedes its
    // parent's.
    assert!(markers[0].close > markers[1].close);
    assert!(markers[1].close > markers[2].close);
}

#[test]
fn unterminated_marker_is_a_syntax_error() {
    let err = locate_markers("prefix ${unterminated", "${", "}").unwrap_err();
    assert!(err.to_string().contains("missing closing"));
}

#[test]
fn stray_closing_brace_is_ignored() {
    let markers = locate_markers("a } b ${c}", "${", "}").unwrap();
    assert_eq!(markers.len(), 1);
}
