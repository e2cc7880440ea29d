//! WebGPU rendering module
//!
//! The scene is described as a `DrawList` of textured triangles in screen
//! pixels, built without touching the GPU, then uploaded and drawn by
//! `RenderState` in one pass.

pub mod draw_list;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod text;
pub mod texture;
pub mod vertex;

pub use draw_list::{DrawList, TextureId, tex};
pub use pipeline::RenderState;
pub use scene::{HudOptions, build_scene};
pub use text::GlyphAtlas;
pub use texture::ImageData;
pub use vertex::Vertex;

/// GPU initialization failures
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}
