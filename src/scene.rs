use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::geometry::GeometryPreset;
use crate::lighting::{Attenuation, LightRig, PointLight};
use crate::material::Material;
use crate::shading::ObjectShadingState;

/// The two object sets the demo switches between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    Spheres,
    Cylinders,
}

impl Family {
    pub fn toggled(self) -> Self {
        match self {
            Family::Spheres => Family::Cylinders,
            Family::Cylinders => Family::Spheres,
        }
    }
}

/// Stable handle for one object, used to address render-resource rebuilds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId {
    pub family: Family,
    pub index: usize,
}

/// A renderable object: geometry strategy, placement, and shading state.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadedPrimitive {
    pub name: String,
    pub base: GeometryPreset,
    pub position: Vec3,
    pub scale: Vec3,
    pub shading: ObjectShadingState,
}

impl ShadedPrimitive {
    /// The preset to render right now. While a texture mode is active some
    /// slots display a stand-in shape (knot/box/torus) instead of the family
    /// base shape; mode `None` always restores the base.
    pub fn geometry(&self, index: usize) -> GeometryPreset {
        if self.shading.texture_mode().is_textured() {
            textured_stand_in(index, self.base)
        } else {
            self.base
        }
    }
}

fn textured_stand_in(index: usize, base: GeometryPreset) -> GeometryPreset {
    match index {
        0 | 8 => GeometryPreset::TorusKnot {
            radius: 0.25,
            tube: 0.06,
        },
        2 | 7 => GeometryPreset::Box { size: 0.6 },
        4 => GeometryPreset::Torus {
            radius: 0.3,
            tube: 0.08,
        },
        _ => base,
    }
}

/// Commands the input layer can apply to the scene.
///
/// All scene mutation funnels through [`SceneState::apply`], which returns
/// the objects whose render resources must be rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneCommand {
    /// Swap which object family is displayed.
    SwitchFamily,
    /// Toggle Gouraud/Phong on the displayed family (no-op per object
    /// while its texture mode is active).
    ToggleStage,
    /// Advance the texture mode of every object in both families.
    CycleTextureMode,
    /// Flip the shared light rig between one and two active lights.
    ToggleLightCount,
}

/// Mutable scene: both object families and the shared light rig.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    pub spheres: Vec<ShadedPrimitive>,
    pub cylinders: Vec<ShadedPrimitive>,
    active: Family,
    pub lights: LightRig,
}

impl SceneState {
    pub fn new(
        spheres: Vec<ShadedPrimitive>,
        cylinders: Vec<ShadedPrimitive>,
        lights: LightRig,
    ) -> Self {
        Self {
            spheres,
            cylinders,
            active: Family::Spheres,
            lights,
        }
    }

    pub fn active_family(&self) -> Family {
        self.active
    }

    pub fn family(&self, family: Family) -> &[ShadedPrimitive] {
        match family {
            Family::Spheres => &self.spheres,
            Family::Cylinders => &self.cylinders,
        }
    }

    fn family_mut(&mut self, family: Family) -> &mut Vec<ShadedPrimitive> {
        match family {
            Family::Spheres => &mut self.spheres,
            Family::Cylinders => &mut self.cylinders,
        }
    }

    pub fn object(&self, id: ObjectId) -> &ShadedPrimitive {
        &self.family(id.family)[id.index]
    }

    /// Ids of the currently displayed objects, in draw order.
    pub fn displayed_ids(&self) -> Vec<ObjectId> {
        self.ids_of(self.active)
    }

    /// Ids of every object in both families.
    pub fn all_ids(&self) -> Vec<ObjectId> {
        let mut ids = self.ids_of(Family::Spheres);
        ids.extend(self.ids_of(Family::Cylinders));
        ids
    }

    fn ids_of(&self, family: Family) -> Vec<ObjectId> {
        (0..self.family(family).len())
            .map(|index| ObjectId { family, index })
            .collect()
    }

    /// Applies one command and returns the objects whose render resources
    /// must be rebuilt. The caller is responsible for swapping the rebuilt
    /// resources into its display list.
    pub fn apply(&mut self, command: SceneCommand) -> Vec<ObjectId> {
        match command {
            SceneCommand::SwitchFamily => {
                self.active = self.active.toggled();
                Vec::new()
            }
            SceneCommand::ToggleStage => {
                let family = self.active;
                let mut rebuilt = Vec::new();
                for (index, object) in self.family_mut(family).iter_mut().enumerate() {
                    if object.shading.toggle_stage() {
                        rebuilt.push(ObjectId { family, index });
                    }
                }
                rebuilt
            }
            SceneCommand::CycleTextureMode => {
                for family in [Family::Spheres, Family::Cylinders] {
                    for object in self.family_mut(family).iter_mut() {
                        object.shading.cycle_texture_mode();
                    }
                }
                self.all_ids()
            }
            SceneCommand::ToggleLightCount => {
                // Both families rebuild so the off-screen set stays
                // consistent when it is displayed later.
                self.lights.toggle_active_count();
                self.all_ids()
            }
        }
    }

    /// The built-in demo scene: nine spheres and nine cylinders on a 3x3
    /// grid, two white point lights, one light active.
    pub fn demo() -> Self {
        const PLAIN_AMBIENT: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);
        const TEXTURED_AMBIENT: Vec4 = Vec4::ONE;
        const SCALE: Vec3 = Vec3::new(2.5, 2.5, 2.5);
        const POSITIONS: [Vec3; 9] = [
            Vec3::new(3.0, -3.0, 0.0),
            Vec3::new(0.5, -3.0, 0.0),
            Vec3::new(-2.0, -3.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(0.5, 0.0, 0.0),
            Vec3::new(-2.0, 0.0, 0.0),
            Vec3::new(3.0, 3.0, 0.0),
            Vec3::new(0.5, 3.0, 0.0),
            Vec3::new(-2.0, 3.0, 0.0),
        ];
        // (kd, ka, ks, alpha) per grid slot.
        const SPHERE_COEFFS: [(f32, f32, f32, f32); 9] = [
            (0.1, 0.2, 1.0, 15.0),
            (0.1, 0.2, 0.7, 40.0),
            (0.1, 0.2, 0.01, 100.0),
            (0.4, 0.5, 0.9, 15.0),
            (0.4, 0.5, 0.7, 40.0),
            (0.4, 0.5, 0.01, 100.0),
            (0.8, 0.9, 0.9, 40.0),
            (0.6, 0.9, 0.7, 80.0),
            (0.5, 0.9, 0.01, 100.0),
        ];
        const CYLINDER_COEFFS: [(f32, f32, f32, f32); 9] = [
            (0.1, 0.2, 1.0, 2.0),
            (0.3, 0.2, 0.7, 3.0),
            (0.5, 0.2, 0.01, 4.0),
            (0.1, 0.5, 1.0, 4.0),
            (0.3, 0.5, 0.7, 5.0),
            (0.5, 0.5, 0.01, 6.0),
            (0.1, 0.9, 1.0, 5.0),
            (0.3, 0.9, 0.7, 6.0),
            (0.5, 0.9, 0.01, 7.0),
        ];

        let build = |name: &str,
                     index: usize,
                     base: GeometryPreset,
                     (kd, ka, ks, alpha): (f32, f32, f32, f32)| {
            let material = Material::new(ka, kd, ks, alpha, PLAIN_AMBIENT);
            ShadedPrimitive {
                name: format!("{name}-{}", index + 1),
                base,
                position: POSITIONS[index],
                scale: SCALE,
                shading: ObjectShadingState::new(
                    material,
                    TEXTURED_AMBIENT,
                    crate::material::TextureMode::None,
                ),
            }
        };

        let spheres = SPHERE_COEFFS
            .iter()
            .enumerate()
            .map(|(index, &coeffs)| {
                build(
                    "sphere",
                    index,
                    GeometryPreset::Sphere { radius: 0.4 },
                    coeffs,
                )
            })
            .collect();
        let cylinders = CYLINDER_COEFFS
            .iter()
            .enumerate()
            .map(|(index, &coeffs)| {
                build(
                    "cylinder",
                    index,
                    GeometryPreset::Cylinder {
                        radius: 0.3,
                        height: 0.8,
                    },
                    coeffs,
                )
            })
            .collect();

        let light = |position: Vec3| PointLight {
            position,
            diffuse: Vec4::ONE,
            specular: Vec4::ONE,
            attenuation: Attenuation::new(0.01, 0.01, 0.0009),
        };
        let rig = LightRig::new(
            [
                light(Vec3::new(-10.0, 25.0, 10.0)),
                light(Vec3::new(10.0, -25.0, 10.0)),
            ],
            1,
        )
        .expect("demo light count is valid");

        Self::new(spheres, cylinders, rig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{ShadingStage, TextureMode};

    #[test]
    fn demo_scene_shape() {
        let scene = SceneState::demo();
        assert_eq!(scene.spheres.len(), 9);
        assert_eq!(scene.cylinders.len(), 9);
        assert_eq!(scene.active_family(), Family::Spheres);
        assert_eq!(scene.lights.active_count(), 1);
        assert_eq!(scene.spheres[0].shading.stage(), ShadingStage::Gouraud);
    }

    #[test]
    fn switch_family_rebuilds_nothing() {
        let mut scene = SceneState::demo();
        let rebuilt = scene.apply(SceneCommand::SwitchFamily);
        assert!(rebuilt.is_empty());
        assert_eq!(scene.active_family(), Family::Cylinders);
        assert_eq!(scene.displayed_ids()[0].family, Family::Cylinders);
    }

    #[test]
    fn toggle_stage_touches_only_the_displayed_family() {
        let mut scene = SceneState::demo();
        let rebuilt = scene.apply(SceneCommand::ToggleStage);
        assert_eq!(rebuilt.len(), 9);
        assert!(rebuilt.iter().all(|id| id.family == Family::Spheres));
        assert!(scene
            .spheres
            .iter()
            .all(|o| o.shading.stage() == ShadingStage::Phong));
        assert!(scene
            .cylinders
            .iter()
            .all(|o| o.shading.stage() == ShadingStage::Gouraud));
    }

    #[test]
    fn toggle_stage_skips_textured_objects() {
        let mut scene = SceneState::demo();
        scene.apply(SceneCommand::CycleTextureMode);
        let rebuilt = scene.apply(SceneCommand::ToggleStage);
        assert!(rebuilt.is_empty(), "texture modes force Phong");
    }

    #[test]
    fn light_toggle_updates_both_families() {
        let mut scene = SceneState::demo();
        let rebuilt = scene.apply(SceneCommand::ToggleLightCount);
        assert_eq!(scene.lights.active_count(), 2);
        assert_eq!(rebuilt.len(), 18);
        assert!(rebuilt.iter().any(|id| id.family == Family::Cylinders));
    }

    #[test]
    fn texture_cycle_swaps_stand_in_geometry_and_back() {
        let mut scene = SceneState::demo();
        let base = scene.spheres[0].geometry(0);
        assert!(matches!(base, GeometryPreset::Sphere { .. }));

        let rebuilt = scene.apply(SceneCommand::CycleTextureMode);
        assert_eq!(rebuilt.len(), 18);
        assert!(matches!(
            scene.spheres[0].geometry(0),
            GeometryPreset::TorusKnot { .. }
        ));
        assert!(matches!(
            scene.spheres[2].geometry(2),
            GeometryPreset::Box { .. }
        ));
        assert!(matches!(
            scene.spheres[4].geometry(4),
            GeometryPreset::Torus { .. }
        ));
        assert!(matches!(
            scene.spheres[1].geometry(1),
            GeometryPreset::Sphere { .. }
        ));
        assert!(matches!(
            scene.cylinders[1].geometry(1),
            GeometryPreset::Cylinder { .. }
        ));

        scene.apply(SceneCommand::CycleTextureMode);
        scene.apply(SceneCommand::CycleTextureMode);
        assert_eq!(scene.spheres[0].shading.texture_mode(), TextureMode::None);
        assert!(matches!(
            scene.spheres[0].geometry(0),
            GeometryPreset::Sphere { .. }
        ));
    }
}
