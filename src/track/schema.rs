use std::path::Path;

use crate::error::{Error, Result};

/// Read the sidecar column-label file: one name per line, in the order the
/// data columns appear in every track file of the directory. Surrounding
/// whitespace is trimmed and blank lines are ignored.
///
/// The raw track files carry no header names, only positions, so this list
/// is the single source of column identity; a length mismatch against a
/// data row is caught at load time.
pub fn read_columns(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::File {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}
