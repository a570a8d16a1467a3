//! Core modules for the shading-lab demo.
//!
//! The crate separates the shading model — lights, materials, texture
//! projections, and the per-object state machine that switches between
//! them — from the GPU renderer that executes it, so the state machine and
//! the evaluators stay testable without a graphics device.

pub mod camera;
pub mod geometry;
pub mod input;
pub mod lighting;
pub mod material;
pub mod render;
pub mod scene;
pub mod shading;
pub mod texmap;
pub mod texture;

pub use camera::{CameraParams, OrbitCamera};
pub use geometry::{GeometryPreset, MeshData};
pub use input::{InputState, KeyCode, MouseButton, NamedKey};
pub use lighting::{
    evaluate_light, evaluate_total, Attenuation, LightCountError, LightRig, PointLight, MAX_LIGHTS,
};
pub use material::{Material, ShadingStage, TextureMode};
pub use render::Renderer;
pub use scene::{Family, ObjectId, SceneCommand, SceneState, ShadedPrimitive};
pub use shading::{ObjectShadingState, ShadingParams};
pub use texmap::{cylindrical_uv, spherical_uv};
pub use texture::TextureImage;
