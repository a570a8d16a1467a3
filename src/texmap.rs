//! Procedural texture-coordinate projections.
//!
//! Both mappers take a surface point and the object's reference center and
//! return `(u, v)` coordinates. The exact formula shapes are load-bearing:
//! the projection radii are fixed, and the spherical `v` term keeps the
//! radius inside the arccosine, so every mapped texture depends on these
//! constants staying as they are.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};

/// Radius of the spherical projection surface.
pub const SPHERE_MAP_RADIUS: f32 = 2.0;
/// Radius of the cylindrical projection surface.
pub const CYLINDER_MAP_RADIUS: f32 = 4.0;
/// Height of the cylindrical projection surface.
pub const CYLINDER_MAP_HEIGHT: f32 = 12.0;

/// Maps a surface point onto a sphere of radius [`SPHERE_MAP_RADIUS`]
/// centered on `center`.
pub fn spherical_uv(point: Vec3, center: Vec3) -> Vec2 {
    let n = (point - center).normalize_or_zero();

    let x = SPHERE_MAP_RADIUS * n.z;
    let y = SPHERE_MAP_RADIUS * n.x;
    let z = SPHERE_MAP_RADIUS * n.y;

    let u = (2.0 * PI + 2.0 * x.atan2(y)) / (4.0 * PI);
    let v = 2.0 * (z / (SPHERE_MAP_RADIUS * SPHERE_MAP_RADIUS + z * z).sqrt()).acos() / PI - 0.5;
    Vec2::new(u, v)
}

/// Maps a surface point onto a cylinder of radius [`CYLINDER_MAP_RADIUS`]
/// and height [`CYLINDER_MAP_HEIGHT`] centered on `center`.
///
/// The projection scale diverges as the direction approaches the cylinder
/// axis; points past `30 * height` on the projected axis are pinned to the
/// texture corners, and a degenerate (zero) direction maps to `(0, 0)`.
pub fn cylindrical_uv(point: Vec3, center: Vec3) -> Vec2 {
    let n = (point - center).normalize_or_zero();
    if n == Vec3::ZERO {
        return Vec2::ZERO;
    }

    let lambda = CYLINDER_MAP_RADIUS / (n.z * n.z + n.x * n.x).sqrt();
    let x = lambda * n.z;
    let y = lambda * n.x;
    let z = lambda * n.y;

    if z <= -30.0 * CYLINDER_MAP_HEIGHT {
        return Vec2::ZERO;
    }
    if z >= 30.0 * CYLINDER_MAP_HEIGHT {
        return Vec2::ONE;
    }

    let u = (2.0 * PI + 2.0 * x.atan2(y)) / (4.0 * PI);
    let v = z / CYLINDER_MAP_HEIGHT + 0.5;
    Vec2::new(u, v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn spherical_cardinal_directions() {
        let c = Vec3::ZERO;
        assert!(close(spherical_uv(Vec3::Z, c), Vec2::new(0.75, 0.5)));
        assert!(close(spherical_uv(Vec3::X, c), Vec2::new(0.5, 0.5)));
        assert!(close(spherical_uv(Vec3::Y, c), Vec2::new(0.5, 0.0)));
    }

    #[test]
    fn spherical_matches_closed_form_off_axis() {
        // Direction (1,1,1)/sqrt(3); reference values from the closed form
        // in double precision.
        let uv = spherical_uv(Vec3::ONE, Vec3::ZERO);
        assert!(close(uv, Vec2::new(0.625, 0.16666667)), "{uv:?}");
    }

    #[test]
    fn spherical_is_center_relative() {
        let center = Vec3::new(3.0, -3.0, 0.0);
        let uv = spherical_uv(center + Vec3::Z, center);
        assert!(close(uv, Vec2::new(0.75, 0.5)));
    }

    #[test]
    fn spherical_degenerate_direction_is_finite() {
        let uv = spherical_uv(Vec3::ZERO, Vec3::ZERO);
        assert!(close(uv, Vec2::new(0.5, 0.5)));
    }

    #[test]
    fn cylindrical_cardinal_and_off_axis() {
        let c = Vec3::ZERO;
        assert!(close(cylindrical_uv(Vec3::Z, c), Vec2::new(0.75, 0.5)));
        // Reference values from the closed form in double precision.
        assert!(close(
            cylindrical_uv(Vec3::ONE, c),
            Vec2::new(0.625, 0.73570226)
        ));
        assert!(close(
            cylindrical_uv(Vec3::new(1.0, 2.0, 1.0), c),
            Vec2::new(0.625, 0.97140452)
        ));
    }

    #[test]
    fn cylindrical_clamps_near_the_axis() {
        // Directions nearly parallel to the axis project past the 30x
        // height cutoff and are pinned to the corners.
        let c = Vec3::ZERO;
        assert_eq!(cylindrical_uv(Vec3::new(1e-4, 1.0, 0.0), c), Vec2::ONE);
        assert_eq!(cylindrical_uv(Vec3::new(1e-4, -1.0, 0.0), c), Vec2::ZERO);
        assert_eq!(cylindrical_uv(Vec3::Y, c), Vec2::ONE);
        assert_eq!(cylindrical_uv(-Vec3::Y, c), Vec2::ZERO);
    }

    #[test]
    fn cylindrical_is_continuous_inside_the_clamp_band() {
        // Sweep a quarter arc away from the axis; consecutive samples must
        // stay close once clear of the clamp region.
        let c = Vec3::ZERO;
        let mut last = None;
        for step in 10..=80 {
            let angle = step as f32 * std::f32::consts::FRAC_PI_2 / 90.0;
            let uv = cylindrical_uv(Vec3::new(angle.sin(), angle.cos(), 0.0), c);
            if let Some(prev) = last {
                let delta: Vec2 = uv - prev;
                assert!(delta.abs().max_element() < 0.25, "jump at step {step}: {delta:?}");
            }
            last = Some(uv);
        }
    }

    #[test]
    fn cylindrical_degenerate_direction_maps_to_origin() {
        assert_eq!(cylindrical_uv(Vec3::ZERO, Vec3::ZERO), Vec2::ZERO);
    }
}
