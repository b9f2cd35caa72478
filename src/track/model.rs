use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// TrackKey – (initial mass, initial [Fe/H], alpha enhancement)
// ---------------------------------------------------------------------------

/// Identity of one evolutionary track: the initial conditions of the model.
///
/// Carries floats but still needs to live in `BTreeMap` keys, so `Eq`,
/// `Ord` and `Hash` are implemented by hand over the IEEE total order /
/// raw bits.
#[derive(Debug, Clone, Copy)]
pub struct TrackKey {
    /// Initial stellar mass in solar masses. Positive.
    pub initial_mass: f64,
    /// Initial metallicity [Fe/H] in dex.
    pub initial_met: f64,
    /// Alpha enhancement [alpha/Fe]. Always 0.0 for the YREC family.
    pub alpha: f64,
}

impl TrackKey {
    pub fn new(initial_mass: f64, initial_met: f64, alpha: f64) -> Self {
        Self {
            initial_mass,
            initial_met,
            alpha,
        }
    }
}

impl PartialEq for TrackKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TrackKey {}

impl PartialOrd for TrackKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TrackKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.initial_mass
            .total_cmp(&other.initial_mass)
            .then_with(|| self.initial_met.total_cmp(&other.initial_met))
            .then_with(|| self.alpha.total_cmp(&other.alpha))
    }
}

impl std::hash::Hash for TrackKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.initial_mass.to_bits().hash(state);
        self.initial_met.to_bits().hash(state);
        self.alpha.to_bits().hash(state);
    }
}

impl fmt::Display for TrackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "m={:.3} [Fe/H]={:+.2}",
            self.initial_mass, self.initial_met
        )
    }
}

// ---------------------------------------------------------------------------
// GridKey – one row of the assembled grid
// ---------------------------------------------------------------------------

/// Composite row key (initial mass, initial [Fe/H], step). The grid is
/// sorted ascending by this key and nothing else.
#[derive(Debug, Clone, Copy)]
pub struct GridKey {
    pub initial_mass: f64,
    pub initial_met: f64,
    /// Zero-based, contiguous row index within the track.
    pub step: usize,
}

impl PartialEq for GridKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GridKey {}

impl PartialOrd for GridKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GridKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.initial_mass
            .total_cmp(&other.initial_mass)
            .then_with(|| self.initial_met.total_cmp(&other.initial_met))
            .then_with(|| self.step.cmp(&other.step))
    }
}

// ---------------------------------------------------------------------------
// Track – one star model's evolutionary steps
// ---------------------------------------------------------------------------

/// One loaded evolutionary track: column-major numeric data plus the key
/// parsed from the file name.
///
/// Rows are addressed by `step`, the position in each column vector;
/// step 0 is always the earliest point and steps are contiguous by
/// construction.
#[derive(Debug, Clone)]
pub struct Track {
    key: TrackKey,
    columns: Vec<String>,
    index: BTreeMap<String, usize>,
    data: Vec<Vec<f64>>,
}

impl Track {
    /// Build a track from column names and column-major data.
    ///
    /// Rejects ragged columns, repeated column names, and a name/data
    /// count mismatch.
    pub fn new(key: TrackKey, columns: Vec<String>, data: Vec<Vec<f64>>) -> Result<Self> {
        if columns.len() != data.len() {
            return Err(Error::InvalidTrack {
                reason: format!(
                    "{} column names for {} data columns",
                    columns.len(),
                    data.len()
                ),
            });
        }
        if let Some(first) = data.first() {
            let n = first.len();
            if let Some(bad) = data.iter().position(|c| c.len() != n) {
                return Err(Error::InvalidTrack {
                    reason: format!(
                        "column '{}' has {} rows, expected {}",
                        columns[bad],
                        data[bad].len(),
                        n
                    ),
                });
            }
        }
        let mut index = BTreeMap::new();
        for (i, name) in columns.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(Error::InvalidTrack {
                    reason: format!("duplicate column name '{name}'"),
                });
            }
        }
        Ok(Self {
            key,
            columns,
            index,
            data,
        })
    }

    pub fn key(&self) -> TrackKey {
        self.key
    }

    /// Number of rows (evolutionary steps).
    pub fn len(&self) -> usize {
        self.data.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ordered column labels, as listed in the schema file.
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Full column by label.
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.index
            .get(name)
            .map(|&i| self.data[i].as_slice())
            .ok_or_else(|| Error::MissingColumn {
                column: name.to_string(),
            })
    }

    /// Single cell by label and step.
    pub fn value(&self, name: &str, step: usize) -> Result<f64> {
        let col = self.column(name)?;
        col.get(step).copied().ok_or_else(|| Error::InvalidTrack {
            reason: format!("step {step} out of range for track of length {}", col.len()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(mass: f64, met: f64) -> TrackKey {
        TrackKey::new(mass, met, 0.0)
    }

    #[test]
    fn track_keys_order_by_mass_then_met() {
        let mut keys = vec![key(1.2, -0.3), key(0.5, 0.5), key(1.2, -1.0), key(0.5, 0.0)];
        keys.sort();
        assert_eq!(
            keys,
            vec![key(0.5, 0.0), key(0.5, 0.5), key(1.2, -1.0), key(1.2, -0.3)]
        );
    }

    #[test]
    fn grid_keys_order_step_last() {
        let a = GridKey {
            initial_mass: 1.0,
            initial_met: 0.0,
            step: 99,
        };
        let b = GridKey {
            initial_mass: 1.2,
            initial_met: -0.5,
            step: 0,
        };
        assert!(a < b);
    }

    #[test]
    fn track_rejects_ragged_columns() {
        let result = Track::new(
            key(1.0, 0.0),
            vec!["a".to_string(), "b".to_string()],
            vec![vec![1.0, 2.0], vec![1.0]],
        );
        assert!(matches!(result, Err(Error::InvalidTrack { .. })));
    }

    #[test]
    fn track_rejects_duplicate_column_names() {
        let result = Track::new(
            key(1.0, 0.0),
            vec!["a".to_string(), "a".to_string()],
            vec![vec![1.0], vec![2.0]],
        );
        assert!(matches!(result, Err(Error::InvalidTrack { .. })));
    }

    #[test]
    fn column_lookup_by_label() {
        let track = Track::new(
            key(1.0, 0.0),
            vec!["x".to_string(), "y".to_string()],
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
        )
        .unwrap();
        assert_eq!(track.len(), 2);
        assert_eq!(track.column("y").unwrap(), &[3.0, 4.0]);
        assert_eq!(track.value("x", 1).unwrap(), 2.0);
        assert!(matches!(
            track.column("z"),
            Err(Error::MissingColumn { .. })
        ));
    }
}
