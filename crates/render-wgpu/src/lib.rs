//! wgpu render backend for PawGrove.
//!
//! Draws textured meshes with the matrices cached by a [`pawgrove_camera::Camera`].
//!
//! # Invariants
//! - The renderer reads the camera's cached matrices; it never rebuilds them.
//! - All GPU state lives in [`RenderContext`] and [`MeshRenderer`] values owned
//!   by the caller. Dropping them releases the GPU resources.

mod context;
mod gpu;
mod shaders;

pub use context::RenderContext;
pub use gpu::{MeshRenderer, SceneUniforms};

use pawgrove_assets::AssetError;

/// Errors from GPU setup and per-frame surface handling.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
    #[error("surface reports no supported formats")]
    UnsupportedSurface,
    #[error("invalid asset: {0}")]
    Asset(#[from] AssetError),
    #[error("texture is {width}x{height}, device limit is {max}x{max}")]
    TextureTooLarge { width: u32, height: u32, max: u32 },
}
