mod gpu;
pub mod shaders;

pub use gpu::Renderer;
