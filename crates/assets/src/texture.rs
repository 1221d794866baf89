use crate::AssetError;
use std::path::Path;

/// Decoded RGBA8 image, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureData {
    /// Wrap raw pixels, checking `rgba.len() == width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, AssetError> {
        let texture = Self {
            width,
            height,
            rgba,
        };
        texture.validate()?;
        Ok(texture)
    }

    /// Check that the pixel buffer is non-empty and tightly packed.
    pub fn validate(&self) -> Result<(), AssetError> {
        let expected = self.width as usize * self.height as usize * 4;
        if self.rgba.len() != expected || expected == 0 {
            return Err(AssetError::InvalidTexture {
                expected,
                actual: self.rgba.len(),
            });
        }
        Ok(())
    }

    /// Decode an image file (PNG, JPEG, BMP or TGA) into RGBA8.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let image = image::load_from_memory(&bytes)?.to_rgba8();
        let (width, height) = image.dimensions();
        tracing::info!("loaded {width}x{height} texture from {}", path.display());
        Self::from_rgba(width, height, image.into_raw())
    }

    /// Square checkerboard with `cells` squares per side.
    pub fn checkerboard(size: u32, cells: u32, a: [u8; 4], b: [u8; 4]) -> Self {
        let size = size.max(1);
        let cells = cells.clamp(1, size);
        let mut rgba = Vec::with_capacity(size as usize * size as usize * 4);
        for y in 0..size {
            for x in 0..size {
                let cx = x * cells / size;
                let cy = y * cells / size;
                let color = if (cx + cy) % 2 == 0 { a } else { b };
                rgba.extend_from_slice(&color);
            }
        }
        Self {
            width: size,
            height: size,
            rgba,
        }
    }

    /// Bytes per row of tightly packed pixels.
    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }
}
