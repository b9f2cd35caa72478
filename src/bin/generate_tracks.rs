//! Generate a small directory of synthetic `.track` files (plus the
//! `column_labels.txt` sidecar) shaped like real stellar-evolution output:
//! a pre-main-sequence plateau, a main-sequence hydrogen burn-down, a red
//! giant climb to a luminosity tip, and post-flash helium burning.
//! Deterministic; useful for demos and manual testing of the ingestion
//! pipeline.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

const COLUMNS: [&str; 9] = [
    "Age_gyr",
    "log_Teff",
    "LogL_lsun",
    "Log_g",
    "X_cen",
    "Y_cen",
    "Z_cen",
    "3a_lsun",
    "Mass_msun",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn track_filename(mass: f64, feh: f64) -> String {
    let sign = if feh < 0.0 { 'm' } else { 'p' };
    format!(
        "m{:04}feh{}{:03}.track",
        (mass * 1000.0).round() as u32,
        sign,
        (feh.abs() * 100.0).round() as u32
    )
}

/// One synthetic evolutionary track, row-major. Phase boundaries scale a
/// little with mass so tracks across the grid are not clones of each
/// other.
fn synth_track(mass: f64, feh: f64, rng: &mut SimpleRng) -> Vec<[f64; 9]> {
    let zc0 = (0.02 * 10f64.powf(feh)).min(0.08);
    let x0 = 0.75 - 1.5 * zc0;
    let y0 = 1.0 - x0 - zc0;

    let pre_ms = 40;
    let main_seq = 220;
    let rgb = 100;
    let hb = 60;

    // Main-sequence lifetime shortens with mass; ages stay monotone.
    let ms_gyr = 10.0 / mass.powf(2.5);
    let mut rows = Vec::with_capacity(pre_ms + main_seq + rgb + hb);
    let mut age = 0.0;

    let lum_zams = 4.0 * mass.log10();
    let teff_zams = 3.76 + 0.05 * (mass - 1.0);

    // Pre-MS: contraction at constant Xc, luminosity settling down.
    for i in 0..pre_ms {
        let f = i as f64 / pre_ms as f64;
        age += 1e-4;
        rows.push([
            age,
            teff_zams - 0.02 * (1.0 - f),
            lum_zams + 0.5 * (1.0 - f) + rng.gauss(0.0, 1e-4),
            4.3 - 0.2 * (1.0 - f),
            x0,
            y0,
            zc0,
            0.0,
            mass,
        ]);
    }
    // Main sequence: Xc burns down from x0 to below the TAMS threshold.
    for i in 0..main_seq {
        let f = (i + 1) as f64 / main_seq as f64;
        age += ms_gyr / main_seq as f64;
        let xc = (x0 * (1.0 - f)).max(0.0);
        rows.push([
            age,
            teff_zams - 0.03 * f,
            lum_zams + 0.4 * f + rng.gauss(0.0, 1e-4),
            4.3 - 0.3 * f,
            xc,
            y0 + (x0 - xc),
            zc0,
            0.0,
            mass,
        ]);
    }
    // RGB: luminosity climbs to the tip, surface cools and puffs up.
    for i in 0..rgb {
        let f = (i + 1) as f64 / rgb as f64;
        age += 0.001;
        rows.push([
            age,
            teff_zams - 0.03 - 0.1 * f,
            lum_zams + 0.4 + 3.0 * f + rng.gauss(0.0, 1e-4),
            4.0 - 2.5 * f,
            0.0,
            1.0 - zc0,
            zc0,
            0.0,
            mass,
        ]);
    }
    // Horizontal branch: helium ignites, luminosity drops off the tip.
    for i in 0..hb {
        let f = (i + 1) as f64 / hb as f64;
        age += 0.001;
        rows.push([
            age,
            teff_zams - 0.05,
            lum_zams + 1.7 + rng.gauss(0.0, 1e-4),
            2.5,
            0.0,
            (1.0 - zc0 - 0.05) - 0.3 * f,
            zc0,
            0.05 + 0.1 * f,
            mass,
        ]);
    }
    rows
}

fn write_track(path: &Path, rows: &[[f64; 9]]) -> Result<()> {
    let mut file = fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writeln!(file, "# {}", COLUMNS.join(", "))?;
    for row in rows {
        let fields: Vec<String> = row.iter().map(|v| format!("{v:.6}")).collect();
        writeln!(file, "{}", fields.join(", "))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_tracks".to_string());
    let out_dir = Path::new(&out_dir);
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let mut labels = fs::File::create(out_dir.join("column_labels.txt"))
        .context("creating column_labels.txt")?;
    for column in COLUMNS {
        writeln!(labels, "{column}")?;
    }

    let mut rng = SimpleRng::new(42);
    let masses = [0.8, 1.0, 1.2];
    let fehs = [-0.5, 0.0, 0.5];

    let mut n_rows = 0usize;
    let mut n_files = 0usize;
    for &mass in &masses {
        for &feh in &fehs {
            let rows = synth_track(mass, feh, &mut rng);
            let name = track_filename(mass, feh);
            write_track(&out_dir.join(&name), &rows)?;
            log::info!("wrote {name} ({} rows)", rows.len());
            n_rows += rows.len();
            n_files += 1;
        }
    }

    println!(
        "Wrote {n_files} tracks ({n_rows} rows) and column_labels.txt to {}",
        out_dir.display()
    );
    Ok(())
}
