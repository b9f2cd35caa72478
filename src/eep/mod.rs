/// EEP layer: primary landmark detection and the HRD metric.
///
/// Architecture:
/// ```text
///        Grid
///         │  one track at a time
///         ▼
///   ┌──────────┐    ┌──────────┐
///   │  locate   │    │  metric   │
///   └──────────┘    └──────────┘
///         │  EepMap        │  Vec<f64>
///         └───────┬────────┘
///                 ▼
///            TrackEep  →  external interpolator builder
/// ```
pub mod locate;
pub mod metric;

use log::{debug, warn};

pub use locate::{
    locate_primary_eeps, pre_ms, tams, trgb, zahb, zams, DetectorFn, EepMap, Landmark,
    LandmarkAction, LandmarkPlan,
};
pub use metric::hrd_distance;

use crate::config::EepParams;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::track::model::{Track, TrackKey};

/// Override hook for the secondary-EEP spacing metric. Same contract as
/// [`hrd_distance`]: one non-decreasing value per row, starting at 0.
pub type MetricFn = fn(&Track, &EepParams) -> Result<Vec<f64>>;

// ---------------------------------------------------------------------------
// Per-track and per-grid conversion results
// ---------------------------------------------------------------------------

/// Everything the interpolator builder needs for one track: the landmark
/// row indices and the metric coordinate along the track.
#[derive(Debug, Clone)]
pub struct TrackEep {
    pub key: TrackKey,
    pub eeps: EepMap,
    pub metric: Vec<f64>,
}

/// Conversion results for a whole grid. A track whose landmarks come out
/// of order lands in `failures` instead of poisoning the batch.
#[derive(Debug)]
pub struct GridEep {
    /// Per-track results, ascending key order.
    pub tracks: Vec<TrackEep>,
    pub failures: Vec<(TrackKey, Error)>,
}

/// Convert one track: locate the planned primary EEPs and compute the
/// spacing metric (`metric` overrides [`hrd_distance`] when given).
pub fn convert_track(
    track: &Track,
    params: &EepParams,
    plan: &LandmarkPlan,
    metric: Option<MetricFn>,
) -> Result<TrackEep> {
    let eeps = locate_primary_eeps(track, params, plan)?;
    let metric_fn = metric.unwrap_or(hrd_distance as MetricFn);
    let metric = metric_fn(track, params)?;
    debug!(
        "track {}: {} landmarks found, {} rows",
        track.key(),
        eeps.values().filter(|v| v.is_some()).count(),
        track.len()
    );
    Ok(TrackEep {
        key: track.key(),
        eeps,
        metric,
    })
}

/// Convert every track of an assembled grid, in ascending key order.
///
/// Per-track failures (ordering violations, missing columns) are warned
/// and collected; the rest of the grid still converts.
pub fn convert_grid(
    grid: &Grid,
    params: &EepParams,
    plan: &LandmarkPlan,
    metric: Option<MetricFn>,
) -> GridEep {
    let mut tracks = Vec::with_capacity(grid.num_tracks());
    let mut failures = Vec::new();
    for track in grid.tracks() {
        match convert_track(track, params, plan, metric) {
            Ok(converted) => tracks.push(converted),
            Err(error) => {
                warn!("track {}: {error}", track.key());
                failures.push((track.key(), error));
            }
        }
    }
    GridEep { tracks, failures }
}
