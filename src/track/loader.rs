use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::{Error, Result};
use crate::grid::Grid;

use super::filename::parse_filename;
use super::model::Track;
use super::schema::read_columns;

/// Name of the sidecar file listing the shared column labels.
pub const COLUMN_LABELS_FILE: &str = "column_labels.txt";

// ---------------------------------------------------------------------------
// Single-file loader
// ---------------------------------------------------------------------------

/// Load one raw `.track` file into a [`Track`].
///
/// The first physical line is a header and is discarded. Every following
/// non-empty line is one evolutionary step; fields are assigned to columns
/// positionally against `columns`. Rows may be comma- or
/// whitespace-delimited (sniffed from the first data line). Pure: file
/// contents in, in-memory track out.
pub fn load_track(path: &Path, columns: &[String]) -> Result<Track> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::FilenameParse {
            name: path.display().to_string(),
            reason: "file name is not valid UTF-8".to_string(),
        })?;
    let key = parse_filename(name)?;

    let text = std::fs::read_to_string(path).map_err(|source| Error::File {
        path: path.to_path_buf(),
        source,
    })?;

    // One header line, discarded. Everything after it is data.
    let body = match text.split_once('\n') {
        Some((_header, body)) => body,
        None => {
            return Err(Error::EmptyTrack {
                path: path.to_path_buf(),
            })
        }
    };
    let first_data = body
        .lines()
        .find(|line| !line.trim().is_empty())
        .ok_or_else(|| Error::EmptyTrack {
            path: path.to_path_buf(),
        })?;

    let mut data: Vec<Vec<f64>> = vec![Vec::new(); columns.len()];
    if first_data.contains(',') {
        read_delimited_rows(path, columns, body, &mut data)?;
    } else {
        read_whitespace_rows(path, columns, body, &mut data)?;
    }

    Track::new(key, columns.to_vec(), data)
}

/// Comma-delimited body, parsed through the csv reader.
fn read_delimited_rows(
    path: &Path,
    columns: &[String],
    body: &str,
    data: &mut [Vec<f64>],
) -> Result<()> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    for (row, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() != columns.len() {
            return Err(Error::ColumnMismatch {
                path: path.to_path_buf(),
                row,
                expected: columns.len(),
                found: record.len(),
            });
        }
        for (i, field) in record.iter().enumerate() {
            data[i].push(parse_field(path, columns, row, i, field)?);
        }
    }
    Ok(())
}

/// Whitespace-delimited body, split per line.
fn read_whitespace_rows(
    path: &Path,
    columns: &[String],
    body: &str,
    data: &mut [Vec<f64>],
) -> Result<()> {
    for (row, line) in body
        .lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
    {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != columns.len() {
            return Err(Error::ColumnMismatch {
                path: path.to_path_buf(),
                row,
                expected: columns.len(),
                found: fields.len(),
            });
        }
        for (i, field) in fields.iter().enumerate() {
            data[i].push(parse_field(path, columns, row, i, field)?);
        }
    }
    Ok(())
}

fn parse_field(
    path: &Path,
    columns: &[String],
    row: usize,
    col: usize,
    field: &str,
) -> Result<f64> {
    field.parse::<f64>().map_err(|_| Error::BadNumber {
        path: path.to_path_buf(),
        row,
        column: columns[col].clone(),
        value: field.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Directory batch loader
// ---------------------------------------------------------------------------

/// One track file that failed to load. The batch keeps going; failures are
/// reported here instead of aborting the other files.
#[derive(Debug)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub error: Error,
}

/// Outcome of loading a whole raw-grid directory.
#[derive(Debug)]
pub struct DirectoryLoad {
    /// Successfully loaded tracks, in no particular order; ordering is
    /// restored by [`Grid::assemble`].
    pub tracks: Vec<Track>,
    /// Per-file failures, one entry per rejected `.track` file.
    pub failures: Vec<LoadFailure>,
}

impl DirectoryLoad {
    /// Assemble the loaded tracks into a [`Grid`], handing back the
    /// per-file failures alongside it.
    pub fn into_grid(self) -> Result<(Grid, Vec<LoadFailure>)> {
        Ok((Grid::assemble(self.tracks)?, self.failures))
    }
}

/// Load every `*.track` file in `dir` against the directory's shared
/// column schema (`column_labels.txt`).
///
/// A missing or unreadable schema file is fatal for the whole directory.
/// A bad individual track file is not: it is logged, recorded in
/// [`DirectoryLoad::failures`], and the rest of the batch proceeds.
pub fn load_directory(dir: &Path) -> Result<DirectoryLoad> {
    let columns = read_columns(&dir.join(COLUMN_LABELS_FILE))?;

    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "track"))
        .collect();
    paths.sort();

    info!("loading {} track files from {}", paths.len(), dir.display());

    let mut tracks = Vec::with_capacity(paths.len());
    let mut failures = Vec::new();
    for path in paths {
        match load_track(&path, &columns) {
            Ok(track) => tracks.push(track),
            Err(error) => {
                warn!("skipping {}: {error}", path.display());
                failures.push(LoadFailure { path, error });
            }
        }
    }

    Ok(DirectoryLoad { tracks, failures })
}
