//! End-to-end ingestion: raw files in a temp directory → grid → per-track
//! EEPs and metric, with per-file failures isolated along the way.

use std::fmt::Write as _;
use std::path::Path;

use eepgrid::{
    convert_grid, load_directory, EepParams, GridKey, Landmark, LandmarkAction, LandmarkPlan,
    TrackKey,
};

const COLUMNS: [&str; 7] = [
    "Age_gyr",
    "log_Teff",
    "LogL_lsun",
    "X_cen",
    "Y_cen",
    "Z_cen",
    "3a_lsun",
];

/// A compact full evolution: 5 pre-MS rows, 20 main-sequence rows, 10 RGB
/// rows climbing to the tip, 5 helium-burning rows. All five landmarks
/// are present.
fn synthetic_rows(lum_offset: f64) -> Vec<[f64; 7]> {
    let mut rows = Vec::new();
    let mut age = 0.0;
    for _ in 0..5 {
        age += 0.001;
        rows.push([age, 3.76, lum_offset + 0.5, 0.70, 0.28, 0.02, 0.0]);
    }
    for i in 0..20 {
        age += 0.5;
        let xc = (0.70 - 0.037 * (i + 1) as f64).max(0.0);
        rows.push([age, 3.75, lum_offset + 0.2, xc, 0.98 - xc - 0.02, 0.02, 0.0]);
    }
    for i in 0..10 {
        age += 0.01;
        rows.push([
            age,
            3.70,
            lum_offset + 1.0 + 0.25 * i as f64,
            0.0,
            0.96,
            0.02,
            0.0,
        ]);
    }
    for _ in 0..5 {
        age += 0.01;
        rows.push([age, 3.72, lum_offset + 1.8, 0.0, 0.90, 0.02, 0.05]);
    }
    rows
}

fn write_track_file(dir: &Path, name: &str, rows: &[[f64; 7]]) {
    let mut text = String::from("# header line\n");
    for row in rows {
        let fields: Vec<String> = row.iter().map(|v| format!("{v:.6}")).collect();
        writeln!(text, "{}", fields.join(" ")).unwrap();
    }
    std::fs::write(dir.join(name), text).unwrap();
}

fn write_grid_dir(dir: &Path) {
    std::fs::write(dir.join("column_labels.txt"), COLUMNS.join("\n")).unwrap();
    write_track_file(dir, "m1000fehp000.track", &synthetic_rows(0.0));
    write_track_file(dir, "m1200fehp000.track", &synthetic_rows(0.3));
    write_track_file(dir, "m0800fehm050.track", &synthetic_rows(-0.2));
}

#[test]
fn directory_to_eep_conversion() {
    let dir = tempfile::tempdir().unwrap();
    write_grid_dir(dir.path());

    let loaded = load_directory(dir.path()).unwrap();
    assert!(loaded.failures.is_empty());
    let (grid, _) = loaded.into_grid().unwrap();
    assert_eq!(grid.num_tracks(), 3);
    assert_eq!(grid.num_rows(), 3 * 40);

    // Grid order is key order: (0.8, -0.5) < (1.0, 0.0) < (1.2, 0.0).
    let keys: Vec<TrackKey> = grid.tracks().map(|t| t.key()).collect();
    assert_eq!(keys[0], TrackKey::new(0.8, -0.5, 0.0));
    assert_eq!(keys[2], TrackKey::new(1.2, 0.0, 0.0));

    let result = convert_grid(
        &grid,
        &EepParams::default(),
        &LandmarkPlan::default(),
        None,
    );
    assert!(result.failures.is_empty());
    assert_eq!(result.tracks.len(), 3);

    for track in &result.tracks {
        // Every landmark found, in evolutionary order.
        let found: Vec<usize> = Landmark::ALL
            .iter()
            .map(|l| track.eeps[l].expect("landmark present"))
            .collect();
        assert_eq!(found[0], 0, "PreMS is the first row");
        assert!(found.windows(2).all(|w| w[0] <= w[1]), "{:?}", found);
        assert_eq!(track.eeps[&Landmark::Trgb], Some(34));

        // Metric contract: starts at zero, never decreases.
        assert_eq!(track.metric.len(), 40);
        assert_eq!(track.metric[0], 0.0);
        assert!(track.metric.windows(2).all(|w| w[1] >= w[0]));
    }
}

#[test]
fn composite_key_set_matches_track_lengths() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("column_labels.txt"), COLUMNS.join("\n")).unwrap();
    write_track_file(dir.path(), "m1000fehp000.track", &synthetic_rows(0.0)[..25]);
    write_track_file(dir.path(), "m1200fehp000.track", &synthetic_rows(0.0));

    let (grid, _) = load_directory(dir.path()).unwrap().into_grid().unwrap();
    let keys: Vec<GridKey> = grid.keys().collect();

    assert_eq!(keys.len(), 25 + 40);
    assert!(keys.windows(2).all(|w| w[0] < w[1]));
    let steps_first: Vec<usize> = keys
        .iter()
        .filter(|k| k.initial_mass == 1.0)
        .map(|k| k.step)
        .collect();
    assert_eq!(steps_first, (0..25).collect::<Vec<_>>());
}

#[test]
fn corrupt_file_does_not_poison_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    write_grid_dir(dir.path());
    std::fs::write(
        dir.path().join("m1400fehp000.track"),
        "# header\n0.1 not-a-number 0.5 0.7 0.28 0.02 0.0\n",
    )
    .unwrap();

    let loaded = load_directory(dir.path()).unwrap();
    assert_eq!(loaded.tracks.len(), 3);
    assert_eq!(loaded.failures.len(), 1);
    assert!(loaded.failures[0]
        .path
        .to_string_lossy()
        .contains("m1400fehp000"));
}

#[test]
fn duplicate_keys_refuse_to_assemble() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("column_labels.txt"), COLUMNS.join("\n")).unwrap();
    // Same (mass, [Fe/H]) encoded with different separators.
    write_track_file(dir.path(), "m1000fehp000.track", &synthetic_rows(0.0));
    write_track_file(dir.path(), "m1000_fehp000.track", &synthetic_rows(0.1));

    let loaded = load_directory(dir.path()).unwrap();
    assert_eq!(loaded.tracks.len(), 2);
    assert!(loaded.into_grid().is_err());
}

#[test]
fn skipped_landmarks_stay_out_of_the_map() {
    let dir = tempfile::tempdir().unwrap();
    write_grid_dir(dir.path());
    let (grid, _) = load_directory(dir.path()).unwrap().into_grid().unwrap();

    let mut plan = LandmarkPlan::default();
    plan.set(Landmark::Zahb, LandmarkAction::Skip);
    let result = convert_grid(&grid, &EepParams::default(), &plan, None);

    for track in &result.tracks {
        assert!(!track.eeps.contains_key(&Landmark::Zahb));
        assert!(track.eeps[&Landmark::Trgb].is_some());
    }
}
