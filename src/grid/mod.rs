//! The assembled model grid: every loaded track's rows behind one
//! composite key, in one deterministic order.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::track::model::{GridKey, Track, TrackKey};

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// All tracks of one raw-grid directory, keyed by `TrackKey` and iterated
/// in ascending key order.
///
/// Row-level addressing uses [`GridKey`] (mass, [Fe/H], step); for a fixed
/// track the step values are exactly `0..track.len()` with no gaps. The
/// ordering depends only on key values, never on the order files were
/// enumerated in.
#[derive(Debug, Clone)]
pub struct Grid {
    tracks: BTreeMap<TrackKey, Track>,
}

impl Grid {
    /// Assemble loaded tracks into one grid.
    ///
    /// Two tracks resolving to the same key is [`Error::DuplicateTrack`];
    /// a colliding track never silently displaces the one already there.
    pub fn assemble(tracks: Vec<Track>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for track in tracks {
            let key = track.key();
            if map.insert(key, track).is_some() {
                return Err(Error::DuplicateTrack {
                    mass: key.initial_mass,
                    met: key.initial_met,
                });
            }
        }
        Ok(Self { tracks: map })
    }

    pub fn num_tracks(&self) -> usize {
        self.tracks.len()
    }

    /// Total row count across all tracks.
    pub fn num_rows(&self) -> usize {
        self.tracks.values().map(Track::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, key: &TrackKey) -> Option<&Track> {
        self.tracks.get(key)
    }

    /// Tracks in ascending key order.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    /// Every (mass, [Fe/H], step) row key, ascending.
    pub fn keys(&self) -> impl Iterator<Item = GridKey> + '_ {
        self.tracks.values().flat_map(|track| {
            let key = track.key();
            (0..track.len()).map(move |step| GridKey {
                initial_mass: key.initial_mass,
                initial_met: key.initial_met,
                step,
            })
        })
    }

    /// Look up one row by composite key.
    pub fn row(&self, key: GridKey) -> Option<Row<'_>> {
        let (_, track) = self.tracks.iter().find(|(k, _)| {
            k.initial_mass == key.initial_mass && k.initial_met == key.initial_met
        })?;
        (key.step < track.len()).then_some(Row {
            track,
            step: key.step,
        })
    }
}

/// Borrowed view of a single grid row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    track: &'a Track,
    step: usize,
}

impl Row<'_> {
    pub fn key(&self) -> TrackKey {
        self.track.key()
    }

    pub fn step(&self) -> usize {
        self.step
    }

    /// Cell value by column label.
    pub fn value(&self, column: &str) -> Result<f64> {
        self.track.value(column, self.step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(mass: f64, met: f64, rows: usize) -> Track {
        let xs: Vec<f64> = (0..rows).map(|i| i as f64).collect();
        Track::new(
            TrackKey::new(mass, met, 0.0),
            vec!["Age_gyr".to_string()],
            vec![xs],
        )
        .unwrap()
    }

    #[test]
    fn composite_key_set_is_the_union_of_steps() {
        let grid = Grid::assemble(vec![track(1.2, 0.0, 150), track(1.0, 0.0, 100)]).unwrap();

        assert_eq!(grid.num_tracks(), 2);
        assert_eq!(grid.num_rows(), 250);

        let keys: Vec<GridKey> = grid.keys().collect();
        assert_eq!(keys.len(), 250);
        // Ascending, regardless of insertion order.
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(keys[0].initial_mass, 1.0);
        assert_eq!(keys[0].step, 0);
        assert_eq!(keys[99].initial_mass, 1.0);
        assert_eq!(keys[99].step, 99);
        assert_eq!(keys[100].initial_mass, 1.2);
        assert_eq!(keys[100].step, 0);
        assert_eq!(keys[249].step, 149);
    }

    #[test]
    fn assembly_order_is_independent_of_input_order() {
        let a = Grid::assemble(vec![track(1.0, 0.0, 5), track(0.5, -0.5, 5)]).unwrap();
        let b = Grid::assemble(vec![track(0.5, -0.5, 5), track(1.0, 0.0, 5)]).unwrap();
        let keys_a: Vec<TrackKey> = a.tracks().map(Track::key).collect();
        let keys_b: Vec<TrackKey> = b.tracks().map(Track::key).collect();
        assert_eq!(keys_a, keys_b);
        assert_eq!(keys_a[0].initial_mass, 0.5);
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let err = Grid::assemble(vec![track(1.0, 0.0, 5), track(1.0, 0.0, 9)]).unwrap_err();
        assert!(matches!(err, Error::DuplicateTrack { .. }));
    }

    #[test]
    fn row_lookup_by_composite_key() {
        let grid = Grid::assemble(vec![track(1.0, 0.0, 10)]).unwrap();
        let row = grid
            .row(GridKey {
                initial_mass: 1.0,
                initial_met: 0.0,
                step: 7,
            })
            .unwrap();
        assert_eq!(row.value("Age_gyr").unwrap(), 7.0);
        assert!(grid
            .row(GridKey {
                initial_mass: 1.0,
                initial_met: 0.0,
                step: 10,
            })
            .is_none());
    }
}
