//! Stellar evolution track ingestion and EEP conversion.
//!
//! `eepgrid` reads a directory of raw evolutionary tracks (one file per
//! initial mass / metallicity pair plus a shared column-label sidecar),
//! assembles them into one composite-keyed [`Grid`], and converts each
//! track into its primary Equivalent Evolutionary Phase landmarks plus a
//! monotone HR-diagram path-length coordinate. The output (the grid and
//! one [`TrackEep`] per track) is what a downstream grid installer feeds
//! into its interpolator; persistence and interpolation themselves live
//! with that consumer.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use eepgrid::{convert_grid, load_directory, EepParams, LandmarkPlan};
//!
//! # fn main() -> eepgrid::Result<()> {
//! let loaded = load_directory(Path::new("grids/yrec"))?;
//! let (grid, skipped) = loaded.into_grid()?;
//! eprintln!("{} tracks loaded, {} files skipped", grid.num_tracks(), skipped.len());
//!
//! let result = convert_grid(&grid, &EepParams::default(), &LandmarkPlan::default(), None);
//! for track in &result.tracks {
//!     println!("{}: {:?}", track.key, track.eeps);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod eep;
pub mod error;
pub mod grid;
pub mod track;

pub use config::EepParams;
pub use eep::{
    convert_grid, convert_track, hrd_distance, locate_primary_eeps, DetectorFn, EepMap, GridEep,
    Landmark, LandmarkAction, LandmarkPlan, MetricFn, TrackEep,
};
pub use error::{Error, Result};
pub use grid::{Grid, Row};
pub use track::filename::parse_filename;
pub use track::loader::{load_directory, load_track, DirectoryLoad, LoadFailure, COLUMN_LABELS_FILE};
pub use track::model::{GridKey, Track, TrackKey};
pub use track::schema::read_columns;
