//! Flat local projection used by the radar: one minute of arc is treated as
//! one nautical mile, longitude shrunk by the cosine of the center latitude.

use serde::{Deserialize, Serialize};

/// Nautical miles per degree of latitude.
pub const NM_PER_DEGREE: f64 = 60.0;

/// WGS84 coordinates in degrees. Ranges are only checked at form entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

impl Position {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Offset of `target` from `center` in nautical miles, as (north, east).
fn offset_nm(center: Position, target: Position) -> (f64, f64) {
    let north = (target.lat - center.lat) * NM_PER_DEGREE;
    let east = (target.lng - center.lng) * NM_PER_DEGREE * center.lat.to_radians().cos();
    (north, east)
}

/// Approximate distance in nautical miles. NaN in, NaN out.
pub fn distance_nm(center: Position, target: Position) -> f64 {
    let (north, east) = offset_nm(center, target);
    north.hypot(east)
}

/// Bearing from `center` to `target` in degrees, 0 = north, clockwise, in `[0, 360)`.
///
/// Uses raw degree deltas, matching how the scope has always placed blips.
pub fn bearing_deg(center: Position, target: Position) -> f64 {
    let delta_lat = target.lat - center.lat;
    let delta_lng = target.lng - center.lng;
    normalize_deg(delta_lng.atan2(delta_lat).to_degrees())
}

/// Wraps an angle into `[0, 360)`.
pub fn normalize_deg(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Sixteen-point compass label for a direction in degrees.
pub fn compass_point(direction_deg: f64) -> &'static str {
    const POINTS: [&str; 16] = [
        "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
        "NW", "NNW",
    ];
    let sector = (normalize_deg(direction_deg) / 22.5).round() as usize % POINTS.len();
    POINTS[sector]
}
