//! Asset loading: mesh data, model import and texture decoding.
//!
//! Everything here is CPU-side. The renderer uploads what these types hold;
//! no GPU handles live in this crate.
//!
//! # Layout
//! - Meshes are triangle lists with one index per vertex (`u32`).
//! - Textures are tightly packed RGBA8, row-major, top row first. Texture
//!   coordinate `v = 0` addresses the top row.

mod mesh;
mod texture;

use std::path::PathBuf;

pub use mesh::{MeshData, Vertex, import_obj};
pub use texture::TextureData;

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("model import error: {0}")]
    Import(String),
    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),
    #[error("no geometry found in {0}")]
    Empty(PathBuf),
    #[error("texture data has {actual} bytes, expected {expected}")]
    InvalidTexture { expected: usize, actual: usize },
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),
}
