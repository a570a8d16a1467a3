use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::lighting::{LightRig, PointLight, MAX_LIGHTS};
use crate::material::{Material, ShadingStage, TextureMode};

/// GPU layout of one light slot (16-byte aligned vectors).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuPointLight {
    pub position: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    /// `(a, b, c, 0)` attenuation coefficients.
    pub attenuation: [f32; 4],
}

impl From<&PointLight> for GpuPointLight {
    fn from(light: &PointLight) -> Self {
        Self {
            position: light.position.extend(1.0).to_array(),
            diffuse: light.diffuse.to_array(),
            specular: light.specular.to_array(),
            attenuation: [
                light.attenuation.constant,
                light.attenuation.linear,
                light.attenuation.quadratic,
                0.0,
            ],
        }
    }
}

/// Complete shading parameter block for one object, as uploaded to the
/// per-object uniform buffer.
///
/// Derivation from [`ObjectShadingState`] is pure, so rebuilding after a
/// round-trip of state transitions must reproduce this block bit for bit.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ShadingParams {
    /// Reference center of the texture projections (`xyz`, w unused).
    pub center: [f32; 4],
    /// Ambient color currently in effect.
    pub ambient: [f32; 4],
    /// `(ka, kd, ks, shininess)`.
    pub coefficients: [f32; 4],
    /// `(active light count, texture mode, 0, 0)`.
    pub modes: [u32; 4],
    pub lights: [GpuPointLight; MAX_LIGHTS],
}

/// Per-object shading state machine.
///
/// Tracks the shading stage, the texture-mapping mode, and the forced-Phong
/// flag, and swaps the ambient color between the per-object plain constant
/// and the neutral textured constant. Every transition is expected to be
/// followed by a full rebuild of the object's render resources; there is no
/// incremental update path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectShadingState {
    material: Material,
    plain_ambient: Vec4,
    textured_ambient: Vec4,
    stage: ShadingStage,
    texture_mode: TextureMode,
    forced_phong: bool,
}

impl ObjectShadingState {
    /// Creates the state for a newly constructed object. The material's
    /// ambient color becomes the plain (untextured) constant. A non-`None`
    /// initial mode goes through the same forcing rule as a runtime
    /// transition.
    pub fn new(material: Material, textured_ambient: Vec4, texture_mode: TextureMode) -> Self {
        let mut state = Self {
            plain_ambient: material.ambient_color,
            material,
            textured_ambient,
            stage: ShadingStage::Gouraud,
            texture_mode: TextureMode::None,
            forced_phong: false,
        };
        if texture_mode.is_textured() {
            state.texture_mode = texture_mode;
            state.enter_textured();
        }
        state
    }

    pub fn stage(&self) -> ShadingStage {
        self.stage
    }

    pub fn texture_mode(&self) -> TextureMode {
        self.texture_mode
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn forced_phong(&self) -> bool {
        self.forced_phong
    }

    /// Toggles between Gouraud and Phong. Requests made while a texture
    /// mode is active are no-ops (texture modes force Phong); returns
    /// whether the stage actually changed.
    pub fn toggle_stage(&mut self) -> bool {
        if self.texture_mode.is_textured() {
            return false;
        }
        self.stage = self.stage.toggled();
        true
    }

    /// Advances the texture mode along its fixed cycle and applies the
    /// forced-Phong and ambient-swap policies. Returns the new mode.
    ///
    /// Gouraud is restored on the way back to `None` only when Phong was
    /// forced by the mode change itself; a stage the user picked manually
    /// survives a full cycle.
    pub fn cycle_texture_mode(&mut self) -> TextureMode {
        self.texture_mode = self.texture_mode.next();
        if self.texture_mode.is_textured() {
            self.enter_textured();
        } else {
            if self.forced_phong {
                self.forced_phong = false;
                self.stage = ShadingStage::Gouraud;
            }
            self.material.ambient_color = self.plain_ambient;
        }
        self.texture_mode
    }

    fn enter_textured(&mut self) {
        if self.stage == ShadingStage::Gouraud {
            self.forced_phong = true;
            self.stage = ShadingStage::Phong;
        }
        self.material.ambient_color = self.textured_ambient;
    }

    /// Derives the uniform-ready parameter block for the current state.
    pub fn shading_params(&self, rig: &LightRig, center: Vec3) -> ShadingParams {
        let slots = rig.slots();
        ShadingParams {
            center: center.extend(1.0).to_array(),
            ambient: self.material.ambient_color.to_array(),
            coefficients: [
                self.material.ambient_weight,
                self.material.diffuse_weight,
                self.material.specular_weight,
                self.material.shininess,
            ],
            modes: [
                rig.active_count() as u32,
                self.texture_mode.index(),
                0,
                0,
            ],
            lights: [GpuPointLight::from(&slots[0]), GpuPointLight::from(&slots[1])],
        }
    }
}
