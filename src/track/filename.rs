use crate::error::{Error, Result};

use super::model::TrackKey;

/// Decode a track filename into its `TrackKey`.
///
/// Expected shape: `m<dddd>...feh<m|p><ddd>[.track]`, e.g.
/// `m0500abcfehp050.track` → mass 0.500 Msun, [Fe/H] +0.50. Mass digits
/// are thousandths of a solar mass; the metallicity digits are hundredths
/// of a dex, with `m` meaning a negative value. These tracks carry no
/// alpha enhancement, so `alpha` is always 0.0.
pub fn parse_filename(name: &str) -> Result<TrackKey> {
    let fail = |reason: &str| Error::FilenameParse {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let stem = name.strip_suffix(".track").unwrap_or(name);

    if !stem.starts_with('m') {
        return Err(fail("expected leading 'm' before the mass digits"));
    }
    let mass_digits = stem
        .get(1..5)
        .ok_or_else(|| fail("name too short for the 4-digit mass field"))?;
    if !mass_digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(fail("mass field is not 4 decimal digits"));
    }
    let initial_mass = mass_digits.parse::<u32>().map_err(|e| fail(&e.to_string()))? as f64 / 1000.0;

    let feh = stem.find("feh").ok_or_else(|| fail("missing 'feh' token"))?;
    let rest = &stem[feh + 3..];
    let sign = match rest.bytes().next() {
        Some(b'm') => -1.0,
        Some(_) => 1.0,
        None => return Err(fail("nothing after the 'feh' token")),
    };
    let met_digits = rest
        .get(1..4)
        .ok_or_else(|| fail("name too short for the 3-digit [Fe/H] field"))?;
    if !met_digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(fail("[Fe/H] field is not 3 decimal digits"));
    }
    let initial_met =
        sign * met_digits.parse::<u32>().map_err(|e| fail(&e.to_string()))? as f64 / 100.0;

    Ok(TrackKey::new(initial_mass, initial_met, 0.0))
}
