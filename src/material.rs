use glam::Vec4;
use serde::{Deserialize, Serialize};

/// Blinn-Phong material coefficients shared by both shading stages.
///
/// The weights are deliberately unconstrained: the demo uses values above
/// one to show over-bright results. `shininess` is used as a power exponent
/// and must stay positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Ambient weight (`ka`).
    pub ambient_weight: f32,
    /// Diffuse weight (`kd`).
    pub diffuse_weight: f32,
    /// Specular weight (`ks`).
    pub specular_weight: f32,
    /// Specular exponent (`alpha`). Must be > 0.
    pub shininess: f32,
    /// Current ambient color, swapped by the texture-mode state machine.
    pub ambient_color: Vec4,
}

impl Material {
    pub fn new(
        ambient_weight: f32,
        diffuse_weight: f32,
        specular_weight: f32,
        shininess: f32,
        ambient_color: Vec4,
    ) -> Self {
        Self {
            ambient_weight,
            diffuse_weight,
            specular_weight,
            shininess,
            ambient_color,
        }
    }
}

/// Policy for deriving 2D sampling coordinates from a 3D surface point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextureMode {
    #[default]
    None,
    Spherical,
    Cylindrical,
}

impl TextureMode {
    /// Advances along the fixed cycle None -> Spherical -> Cylindrical -> None.
    pub fn next(self) -> Self {
        match self {
            TextureMode::None => TextureMode::Spherical,
            TextureMode::Spherical => TextureMode::Cylindrical,
            TextureMode::Cylindrical => TextureMode::None,
        }
    }

    /// Stable integer encoding used by the shader uniform.
    pub fn index(self) -> u32 {
        match self {
            TextureMode::None => 0,
            TextureMode::Spherical => 1,
            TextureMode::Cylindrical => 2,
        }
    }

    pub fn is_textured(self) -> bool {
        !matches!(self, TextureMode::None)
    }
}

/// Granularity at which the lighting evaluator runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShadingStage {
    /// Lighting evaluated per vertex, interpolated across the primitive.
    #[default]
    Gouraud,
    /// Normal and position interpolated, lighting evaluated per fragment.
    Phong,
}

impl ShadingStage {
    pub fn toggled(self) -> Self {
        match self {
            ShadingStage::Gouraud => ShadingStage::Phong,
            ShadingStage::Phong => ShadingStage::Gouraud,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_mode_cycles_back_to_none() {
        let mode = TextureMode::None;
        assert_eq!(mode.next(), TextureMode::Spherical);
        assert_eq!(mode.next().next(), TextureMode::Cylindrical);
        assert_eq!(mode.next().next().next(), TextureMode::None);
    }

    #[test]
    fn texture_mode_indices_are_stable() {
        assert_eq!(TextureMode::None.index(), 0);
        assert_eq!(TextureMode::Spherical.index(), 1);
        assert_eq!(TextureMode::Cylindrical.index(), 2);
    }

    #[test]
    fn stage_toggle_is_an_involution() {
        assert_eq!(ShadingStage::Gouraud.toggled(), ShadingStage::Phong);
        assert_eq!(ShadingStage::Gouraud.toggled().toggled(), ShadingStage::Gouraud);
    }
}
