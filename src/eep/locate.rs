use std::collections::BTreeMap;
use std::fmt;

use crate::config::EepParams;
use crate::error::{Error, Result};
use crate::track::model::Track;

// ---------------------------------------------------------------------------
// Landmarks
// ---------------------------------------------------------------------------

/// The five primary EEP landmarks, in evolutionary order. The derived
/// `Ord` follows declaration order, which is what the ordering contract
/// and the `EepMap` iteration rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Landmark {
    /// Pre-main-sequence start (the track's first row, by convention).
    PreMs,
    /// Zero-age main sequence.
    Zams,
    /// Terminal-age main sequence.
    Tams,
    /// Tip of the red giant branch.
    Trgb,
    /// Zero-age horizontal branch (core helium ignition).
    Zahb,
}

impl Landmark {
    pub const ALL: [Landmark; 5] = [
        Landmark::PreMs,
        Landmark::Zams,
        Landmark::Tams,
        Landmark::Trgb,
        Landmark::Zahb,
    ];
}

impl fmt::Display for Landmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Landmark::PreMs => "PreMS",
            Landmark::Zams => "ZAMS",
            Landmark::Tams => "TAMS",
            Landmark::Trgb => "TRGB",
            Landmark::Zahb => "ZAHB",
        };
        write!(f, "{name}")
    }
}

/// Per-track landmark results: one entry per *attempted* landmark.
/// `None` means the phase was searched for and not found; a skipped
/// landmark has no entry at all.
pub type EepMap = BTreeMap<Landmark, Option<usize>>;

// ---------------------------------------------------------------------------
// Detectors
// ---------------------------------------------------------------------------

/// Signature shared by every landmark detector: scan `track` from `start`
/// and report the landmark row, `Ok(None)` when the phase never occurs.
/// Errors are reserved for structural problems (a missing column), never
/// for "not found".
pub type DetectorFn = fn(&Track, &EepParams, usize) -> Result<Option<usize>>;

/// Core hydrogen fraction below which the star is off the main sequence.
const TAMS_XC_MIN: f64 = 1e-4;

/// Pre-main-sequence start: the first point of the track.
pub fn pre_ms(_track: &Track, _params: &EepParams, _start: usize) -> Result<Option<usize>> {
    Ok(Some(0))
}

/// Zero-age main sequence: the first point where the core hydrogen
/// fraction has dropped 0.001 below its value at `start`.
pub fn zams(track: &Track, params: &EepParams, start: usize) -> Result<Option<usize>> {
    let xc = track.column(&params.core_hydrogen_frac)?;
    let Some(&x0) = xc.get(start) else {
        return Ok(None);
    };
    Ok(scan_from(xc, start, |x| x <= x0 - 0.001))
}

/// Terminal-age main sequence: the first point where the core hydrogen
/// fraction falls to 1e-4 or below.
pub fn tams(track: &Track, params: &EepParams, start: usize) -> Result<Option<usize>> {
    let xc = track.column(&params.core_hydrogen_frac)?;
    Ok(scan_from(xc, start, |x| x <= TAMS_XC_MIN))
}

/// Tip of the red giant branch: the log-luminosity maximum over
/// [start, end]. Ties resolve to the first occurrence.
pub fn trgb(track: &Track, params: &EepParams, start: usize) -> Result<Option<usize>> {
    let lum = track.column(&params.lum)?;
    if start >= lum.len() {
        return Ok(None);
    }
    let mut best = start;
    for (i, &value) in lum.iter().enumerate().skip(start + 1) {
        if value > lum[best] {
            best = i;
        }
    }
    Ok(Some(best))
}

/// Zero-age horizontal branch: the first point with a triple-alpha
/// luminosity fraction above 0.001 while the core helium fraction sits
/// strictly between 0.5 and 1 − Zc(start) − 0.04 (helium burning has
/// begun but the core has not yet been eaten into).
pub fn zahb(track: &Track, params: &EepParams, start: usize) -> Result<Option<usize>> {
    let l3a = track.column(&params.l3a)?;
    let yc = track.column(&params.core_helium_frac)?;
    let zc = track.column(&params.core_z_frac)?;
    let Some(&z0) = zc.get(start) else {
        return Ok(None);
    };
    let yc_max = 1.0 - z0 - 0.04;
    Ok((start..l3a.len()).find(|&i| l3a[i] > 0.001 && yc[i] > 0.5 && yc[i] < yc_max))
}

fn scan_from(values: &[f64], start: usize, pred: impl Fn(f64) -> bool) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .skip(start)
        .find(|&(_, &value)| pred(value))
        .map(|(i, _)| i)
}

// ---------------------------------------------------------------------------
// Landmark plan – which detectors run, in what order
// ---------------------------------------------------------------------------

/// What to do for one landmark: run a detector, or leave the landmark out
/// of this grid's set entirely. Skipping is a configuration choice and is
/// distinct from a detector coming back empty-handed.
#[derive(Debug, Clone, Copy)]
pub enum LandmarkAction {
    Detect(DetectorFn),
    Skip,
}

/// Ordered landmark → action list walked by [`locate_primary_eeps`].
#[derive(Debug, Clone)]
pub struct LandmarkPlan {
    entries: Vec<(Landmark, LandmarkAction)>,
}

impl Default for LandmarkPlan {
    /// All five landmarks mapped to the standard detectors.
    fn default() -> Self {
        Self {
            entries: vec![
                (Landmark::PreMs, LandmarkAction::Detect(pre_ms)),
                (Landmark::Zams, LandmarkAction::Detect(zams)),
                (Landmark::Tams, LandmarkAction::Detect(tams)),
                (Landmark::Trgb, LandmarkAction::Detect(trgb)),
                (Landmark::Zahb, LandmarkAction::Detect(zahb)),
            ],
        }
    }
}

impl LandmarkPlan {
    /// Replace the action for one landmark.
    pub fn set(&mut self, landmark: Landmark, action: LandmarkAction) -> &mut Self {
        for entry in &mut self.entries {
            if entry.0 == landmark {
                entry.1 = action;
            }
        }
        self
    }

    pub fn entries(&self) -> &[(Landmark, LandmarkAction)] {
        &self.entries
    }
}

// ---------------------------------------------------------------------------
// Primary EEP location
// ---------------------------------------------------------------------------

/// Run the plan's detectors over one track, threading the start index so
/// each landmark is searched for at or after the previous one.
///
/// Phases are sequential: once a detector comes back empty, the later
/// landmarks are recorded as not found without being run. A detector
/// returning an index *before* its start (possible only with a custom
/// detector or corrupt track data) is an [`Error::OrderingViolation`]
/// surfaced to the caller, never silently accepted.
pub fn locate_primary_eeps(
    track: &Track,
    params: &EepParams,
    plan: &LandmarkPlan,
) -> Result<EepMap> {
    let key = track.key();
    let mut eeps = EepMap::new();
    let mut start = 0usize;
    let mut exhausted = false;

    for &(landmark, action) in plan.entries() {
        let detector = match action {
            LandmarkAction::Skip => continue,
            LandmarkAction::Detect(f) => f,
        };
        if exhausted {
            eeps.insert(landmark, None);
            continue;
        }
        match detector(track, params, start)? {
            Some(index) => {
                if index < start {
                    return Err(Error::OrderingViolation {
                        mass: key.initial_mass,
                        met: key.initial_met,
                        details: format!(
                            "{landmark} at row {index}, before the previous landmark at row {start}"
                        ),
                    });
                }
                eeps.insert(landmark, Some(index));
                start = index;
            }
            None => {
                eeps.insert(landmark, None);
                exhausted = true;
            }
        }
    }

    Ok(eeps)
}
