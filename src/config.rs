use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// EepParams – per-installation conversion parameters
// ---------------------------------------------------------------------------

/// Column aliases and numeric knobs for one EEP conversion run.
///
/// The string fields map this crate's semantic column names onto the labels
/// actually used by the grid being installed (the defaults carry the YREC
/// 25 release labels). Construct a fresh value per run; nothing here is
/// shared or mutated behind the caller's back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EepParams {
    /// Stellar age column.
    pub age: String,
    /// Log effective temperature column.
    pub log_teff: String,
    /// Log luminosity column.
    pub lum: String,
    /// Surface gravity column.
    pub logg: String,
    /// Core hydrogen mass fraction (Xc).
    pub core_hydrogen_frac: String,
    /// Core helium mass fraction (Yc).
    pub core_helium_frac: String,
    /// Core metal mass fraction (Zc).
    pub core_z_frac: String,
    /// Triple-alpha luminosity fraction.
    pub l3a: String,
    /// Stellar mass column.
    pub mass: String,

    /// Weight on Δ log Teff in the HRD metric.
    pub teff_scale: f64,
    /// Weight on Δ log L in the HRD metric.
    pub lum_scale: f64,

    /// Number of secondary EEPs between each consecutive pair of primary
    /// landmarks (PreMS–ZAMS, ZAMS–TAMS, TAMS–TRGB, TRGB–ZAHB). Consumed
    /// by the downstream interpolator builder, carried here so one value
    /// travels with the conversion.
    pub intervals: Vec<usize>,
}

impl Default for EepParams {
    fn default() -> Self {
        Self {
            age: "Age_gyr".to_string(),
            log_teff: "log_Teff".to_string(),
            lum: "LogL_lsun".to_string(),
            logg: "Log_g".to_string(),
            core_hydrogen_frac: "X_cen".to_string(),
            core_helium_frac: "Y_cen".to_string(),
            core_z_frac: "Z_cen".to_string(),
            l3a: "3a_lsun".to_string(),
            mass: "Mass_msun".to_string(),
            teff_scale: 5.0,
            lum_scale: 1.0,
            intervals: vec![200, 250, 150, 50],
        }
    }
}
