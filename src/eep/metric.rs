use crate::config::EepParams;
use crate::error::Result;
use crate::track::model::Track;

/// Cumulative path length along the track in the scaled HR diagram.
///
/// `dist[0]` is 0; each subsequent row adds the Euclidean distance from
/// the previous row in the (log Teff · teff_scale, log L · lum_scale)
/// plane. The scales make temperature and luminosity excursions
/// comparable. Non-decreasing by construction; the downstream
/// interpolator uses it to place secondary EEPs at even intervals between
/// primary landmarks.
pub fn hrd_distance(track: &Track, params: &EepParams) -> Result<Vec<f64>> {
    let log_teff = track.column(&params.log_teff)?;
    let log_lum = track.column(&params.lum)?;

    let mut dist = vec![0.0; track.len()];
    for i in 1..track.len() {
        let dt = (log_teff[i] - log_teff[i - 1]) * params.teff_scale;
        let dl = (log_lum[i] - log_lum[i - 1]) * params.lum_scale;
        dist[i] = dist[i - 1] + (dt * dt + dl * dl).sqrt();
    }
    Ok(dist)
}
