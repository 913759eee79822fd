//! Heading math and position sanitizing.
//!
//! Headings are yaw angles in degrees around +y, with 0 facing +z and 90
//! facing +x. Nothing here returns an error: degenerate input falls back to a
//! safe value and the tick carries on.

use crate::config::BoundsConfig;
use oasis_data::Vec3;
use rand::Rng;

#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Uniform point in the safe square at ground level.
pub fn random_safe_point<R: Rng>(rng: &mut R, bounds: &BoundsConfig) -> Vec3 {
    let h = bounds.safe_zone_half;
    Vec3::new(rng.gen_range(-h..=h), 0.0, rng.gen_range(-h..=h))
}

/// True when `pos` can be committed as-is.
#[inline]
pub fn is_valid_position(pos: Vec3, bounds: &BoundsConfig) -> bool {
    pos.is_finite() && pos.length() <= bounds.position_limit
}

/// Returns `pos` unchanged when it is finite and within the position limit,
/// otherwise a fresh random point in the safe zone.
///
/// Applied to every position before it is committed, and to animal body
/// scale, which is a 3-vector subject to the same blow-up.
pub fn validate_position<R: Rng>(pos: Vec3, bounds: &BoundsConfig, rng: &mut R) -> Vec3 {
    if is_valid_position(pos, bounds) {
        pos
    } else {
        tracing::trace!(?pos, "Replacing invalid position");
        random_safe_point(rng, bounds)
    }
}

/// Wraps an angle difference into `(-180, 180]`.
#[inline]
pub fn normalize_angle(degrees: f64) -> f64 {
    let wrapped = (degrees + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Wraps a heading into `[0, 360)`.
#[inline]
pub fn wrap_heading(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Heading that faces along `direction` on the ground plane, or `fallback`
/// when the direction is degenerate.
pub fn heading_towards(direction: Vec3, fallback: f64) -> f64 {
    let dir = direction.flat().normalized();
    let angle = dir.x.atan2(dir.z).to_degrees();
    if angle.is_nan() {
        fallback
    } else {
        angle
    }
}

/// Unit vector the body faces at `heading`.
#[inline]
pub fn forward(heading: f64) -> Vec3 {
    let (sin, cos) = heading.to_radians().sin_cos();
    Vec3::new(sin, 0.0, cos)
}

/// Unit vector to the body's right at `heading`.
#[inline]
pub fn right(heading: f64) -> Vec3 {
    let (sin, cos) = heading.to_radians().sin_cos();
    Vec3::new(cos, 0.0, -sin)
}
