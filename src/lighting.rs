use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::material::Material;

/// Fixed number of light slots carried by every [`LightRig`].
pub const MAX_LIGHTS: usize = 2;

/// Quadratic distance attenuation: `1 / (a + b*d + c*d^2)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Attenuation {
    pub fn new(constant: f32, linear: f32, quadratic: f32) -> Self {
        Self {
            constant,
            linear,
            quadratic,
        }
    }

    pub fn factor(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }
}

/// A point light with separate diffuse and specular colors.
///
/// Lights are provided once at rig construction and replaced only as whole
/// records; the shading state of every object references the rig rather
/// than owning copies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub position: Vec3,
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub attenuation: Attenuation,
}

/// Error raised when a caller requests an unsupported active-light count.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("active light count must be 1 or {MAX_LIGHTS}, got {0}")]
pub struct LightCountError(pub usize);

/// Two-slot light registry with a runtime active count.
///
/// Both slots always hold a light; evaluators only ever read the first
/// `active_count` entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightRig {
    lights: [PointLight; MAX_LIGHTS],
    active: usize,
}

impl LightRig {
    pub fn new(lights: [PointLight; MAX_LIGHTS], active: usize) -> Result<Self, LightCountError> {
        if active == 0 || active > MAX_LIGHTS {
            return Err(LightCountError(active));
        }
        Ok(Self { lights, active })
    }

    /// Sets the active count. Anything outside `{1, 2}` is a caller error;
    /// the value is rejected rather than clamped.
    pub fn set_active_count(&mut self, count: usize) -> Result<(), LightCountError> {
        if count == 0 || count > MAX_LIGHTS {
            return Err(LightCountError(count));
        }
        self.active = count;
        Ok(())
    }

    /// Flips between the one-light and two-light scenarios.
    pub fn toggle_active_count(&mut self) {
        self.active = if self.active == 1 { MAX_LIGHTS } else { 1 };
    }

    pub fn active_count(&self) -> usize {
        self.active
    }

    /// The lights that currently contribute, in slot order.
    pub fn active_lights(&self) -> &[PointLight] {
        &self.lights[..self.active]
    }

    /// All slots, including inactive ones (used when marshaling uniforms).
    pub fn slots(&self) -> &[PointLight; MAX_LIGHTS] {
        &self.lights
    }
}

/// Radiance contributed by a single point light at a surface point.
///
/// Mirrors the shader-side evaluator exactly: Blinn-Phong with a half
/// vector, quadratic distance attenuation on the diffuse and specular
/// terms, and an unattenuated ambient term added per evaluated light.
/// Zero-length vectors normalize to zero rather than faulting.
pub fn evaluate_light(
    light: &PointLight,
    unit_normal: Vec3,
    point: Vec3,
    camera: Vec3,
    material: &Material,
) -> Vec3 {
    let to_light = light.position - point;
    let light_dir = to_light.normalize_or_zero();

    let diffuse_amount = light_dir.dot(unit_normal).max(0.0);
    let diffuse = material.diffuse_weight * light.diffuse.truncate() * diffuse_amount;

    let to_camera = (camera - point).normalize_or_zero();
    let halfway = (to_camera + light_dir).normalize_or_zero();
    let specular_amount = halfway.dot(unit_normal).max(0.0).powf(material.shininess);
    let specular = material.specular_weight * light.specular.truncate() * specular_amount;

    let attenuation = light.attenuation.factor(to_light.length());
    let ambient = material.ambient_weight * material.ambient_color.truncate();

    attenuation * (diffuse + specular) + ambient
}

/// Sums [`evaluate_light`] over the rig's active lights only.
pub fn evaluate_total(
    rig: &LightRig,
    unit_normal: Vec3,
    point: Vec3,
    camera: Vec3,
    material: &Material,
) -> Vec3 {
    rig.active_lights()
        .iter()
        .fold(Vec3::ZERO, |radiance, light| {
            radiance + evaluate_light(light, unit_normal, point, camera, material)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};

    fn demo_light(position: Vec3) -> PointLight {
        PointLight {
            position,
            diffuse: Vec4::ONE,
            specular: Vec4::ONE,
            attenuation: Attenuation::new(0.01, 0.01, 0.0009),
        }
    }

    fn demo_material() -> Material {
        Material::new(0.2, 0.1, 1.0, 15.0, Vec4::new(1.0, 0.0, 0.0, 1.0))
    }

    fn demo_rig(active: usize) -> LightRig {
        LightRig::new(
            [
                demo_light(Vec3::new(-10.0, 25.0, 10.0)),
                demo_light(Vec3::new(10.0, -25.0, 10.0)),
            ],
            active,
        )
        .unwrap()
    }

    #[test]
    fn rejects_out_of_range_counts() {
        let mut rig = demo_rig(1);
        assert_eq!(rig.set_active_count(0), Err(LightCountError(0)));
        assert_eq!(rig.set_active_count(3), Err(LightCountError(3)));
        assert_eq!(rig.active_count(), 1);
        rig.set_active_count(2).unwrap();
        assert_eq!(rig.active_count(), 2);
    }

    #[test]
    fn toggle_flips_between_one_and_two() {
        let mut rig = demo_rig(1);
        rig.toggle_active_count();
        assert_eq!(rig.active_count(), 2);
        rig.toggle_active_count();
        assert_eq!(rig.active_count(), 1);
    }

    #[test]
    fn golden_radiance_single_light() {
        // Material {kd=0.1, ka=0.2, ks=1.0, alpha=15}, light at (-10, 25, 10)
        // with a=0.01 b=0.01 c=0.0009, surface at the origin facing +Z,
        // camera at (0, 0, 10). Reference values computed from the closed
        // form in double precision.
        let radiance = evaluate_light(
            &demo_light(Vec3::new(-10.0, 25.0, 10.0)),
            Vec3::Z,
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, 10.0),
            &demo_material(),
        );
        let expected = Vec3::new(0.28342018, 0.08342018, 0.08342018);
        assert!((radiance - expected).abs().max_element() < 1e-5, "{radiance:?}");
    }

    #[test]
    fn total_sums_only_active_lights() {
        // Give the second slot an absurd diffuse color; with one active
        // light it must not contribute at all.
        let loud = PointLight {
            diffuse: Vec4::splat(1000.0),
            ..demo_light(Vec3::new(10.0, -25.0, 10.0))
        };
        let rig = LightRig::new([demo_light(Vec3::new(-10.0, 25.0, 10.0)), loud], 1).unwrap();
        let material = demo_material();
        let camera = Vec3::new(0.0, 0.0, 10.0);

        let one = evaluate_total(&rig, Vec3::Z, Vec3::ZERO, camera, &material);
        let first_only = evaluate_light(&rig.active_lights()[0], Vec3::Z, Vec3::ZERO, camera, &material);
        assert_eq!(one, first_only);

        let mut rig = rig;
        rig.set_active_count(2).unwrap();
        let both = evaluate_total(&rig, Vec3::Z, Vec3::ZERO, camera, &material);
        assert!(both.x > one.x * 10.0, "second light should dominate: {both:?}");
    }

    #[test]
    fn ambient_is_not_attenuated() {
        // With zero diffuse and specular weights the result collapses to
        // the raw ambient term regardless of distance.
        let mut material = demo_material();
        material.diffuse_weight = 0.0;
        material.specular_weight = 0.0;
        let far = demo_light(Vec3::new(0.0, 0.0, 10_000.0));
        let radiance = evaluate_light(&far, Vec3::Z, Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0), &material);
        assert_eq!(radiance, Vec3::new(0.2, 0.0, 0.0));
    }

    #[test]
    fn ambient_is_added_once_per_active_light() {
        let mut material = demo_material();
        material.diffuse_weight = 0.0;
        material.specular_weight = 0.0;
        let rig = demo_rig(2);
        let total = evaluate_total(&rig, Vec3::Z, Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0), &material);
        // Each active light contributes the full ambient term.
        assert!((total - Vec3::new(0.4, 0.0, 0.0)).abs().max_element() < 1e-6);
    }

    #[test]
    fn zero_vectors_normalize_to_zero() {
        // Light exactly at the surface point: the light direction collapses
        // to zero and only ambient survives (attenuation is finite thanks to
        // the constant term).
        let light = demo_light(Vec3::ZERO);
        let radiance = evaluate_light(&light, Vec3::Z, Vec3::ZERO, Vec3::ZERO, &demo_material());
        assert_eq!(radiance, Vec3::new(0.2, 0.0, 0.0));
    }
}
