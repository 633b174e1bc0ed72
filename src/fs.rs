//! File system access for the `file` resolver: just enough to read a
//! template-relative file as UTF-8 text, reporting a missing file the
//! way spec'd — as a [`PreconfigError::Reference`], not a generic I/O
//! failure.

use std::path::Path;

use crate::error::{PreconfigError, Result};

/// Read `path` as UTF-8 text. A missing file is reported as
/// [`PreconfigError::Reference`]; every other I/O failure (permissions,
/// not-a-file, invalid UTF-8 surfaced as `InvalidData`, ...) is wrapped
/// as [`PreconfigError::Io`].
pub fn read_text_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PreconfigError::reference(format!("file not found: {}", path.display()))
        } else {
            PreconfigError::Io(e)
        }
    })
}
