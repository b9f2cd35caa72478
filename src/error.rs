use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between a raw track directory and the
/// assembled, EEP-annotated grid.
///
/// A landmark that is simply absent from a track ("not found") is *not* an
/// error; detectors report it as `Ok(None)` and it shows up as a `None`
/// entry in the per-track EEP map.
#[derive(Error, Debug)]
pub enum Error {
    /// Track filename does not follow the `m<dddd>...feh<m|p><ddd>.track`
    /// encoding. The file is rejected rather than mis-keyed.
    #[error("cannot parse track filename '{name}': {reason}")]
    FilenameParse { name: String, reason: String },

    /// A data row's field count disagrees with the column schema.
    #[error("{}: row {row} has {found} fields, column schema has {expected}", .path.display())]
    ColumnMismatch {
        path: PathBuf,
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A field in a data row failed to parse as a number.
    #[error("{}: row {row}, column '{column}': '{value}' is not a number", .path.display())]
    BadNumber {
        path: PathBuf,
        row: usize,
        column: String,
        value: String,
    },

    /// A detector or metric asked for a column the track does not carry.
    #[error("track has no column '{column}'")]
    MissingColumn { column: String },

    /// Track columns of unequal length or repeated names.
    #[error("invalid track data: {reason}")]
    InvalidTrack { reason: String },

    /// A track file contains a header line but no data rows.
    #[error("{}: no data rows after the header line", .path.display())]
    EmptyTrack { path: PathBuf },

    /// Two track files resolved to the same (mass, [Fe/H]) key.
    #[error("duplicate track key: mass={mass}, [Fe/H]={met}")]
    DuplicateTrack { mass: f64, met: f64 },

    /// Primary EEP indices came out of evolutionary order, which signals a
    /// malformed or truncated track (or a misbehaving custom detector).
    #[error("track mass={mass}, [Fe/H]={met}: primary EEPs out of order: {details}")]
    OrderingViolation {
        mass: f64,
        met: f64,
        details: String,
    },

    /// File could not be opened or read.
    #[error("{}: {source}", .path.display())]
    File {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
