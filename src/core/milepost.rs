//! `DK<km>-<m>` milepost codec.
//!
//! Values are whole distance units (meters). The kilometer part is
//! `floor(v / 1000)`, the meter part is `v mod 1000` without zero padding, so
//! `2300` renders as `DK2-300` and `2005` as `DK2-5`.

use crate::error::{ChartError, ChartResult};

const DK_PREFIX: &str = "DK";
const METERS_PER_KM: u64 = 1000;

#[must_use]
pub fn format_dk(value: u64) -> String {
    format!(
        "{DK_PREFIX}{}-{}",
        value / METERS_PER_KM,
        value % METERS_PER_KM
    )
}

/// Formats a fractional data value, flooring it to whole meters.
///
/// Negative and non-finite values have no milepost and return `None`.
#[must_use]
pub fn format_dk_value(value: f64) -> Option<String> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(format_dk(value.floor() as u64))
}

pub fn parse_dk(text: &str) -> ChartResult<u64> {
    let invalid = || ChartError::InvalidMilepost(text.to_owned());

    let body = text.trim().strip_prefix(DK_PREFIX).ok_or_else(invalid)?;
    let (km, m) = body.split_once('-').ok_or_else(invalid)?;
    if km.is_empty() || m.is_empty() {
        return Err(invalid());
    }
    let km: u64 = km.parse().map_err(|_| invalid())?;
    let m: u64 = m.parse().map_err(|_| invalid())?;

    km.checked_mul(METERS_PER_KM)
        .and_then(|meters| meters.checked_add(m))
        .ok_or_else(invalid)
}
