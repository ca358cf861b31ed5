use std::ops::RangeInclusive;

/// Panel facing the light source head-on.
pub const NORMAL_INCIDENCE: u32 = 0;
/// Light grazing the panel surface.
pub const GRAZING_INCIDENCE: u32 = 90;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

/// Whole-degree incidence angles covered by a sweep, ascending.
pub fn incidence_angles() -> RangeInclusive<u32> {
    NORMAL_INCIDENCE..=GRAZING_INCIDENCE
}

/// Fraction of normal-incidence power collected at `angle` degrees (cosine law).
pub fn cosine_factor(angle: u32) -> f64 {
    deg_to_rad(angle as f64).cos()
}

/// Power collected at `angle` by a panel producing `peak` at normal incidence.
pub fn output_at_angle(peak: f64, angle: u32) -> f64 {
    peak * cosine_factor(angle)
}
