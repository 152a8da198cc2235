/// Texture trait, texture descriptor, and texture info

use std::any::Any;

/// Texture pixel format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    /// 8-bit BGRA, unsigned normalized (byte order B, G, R, A)
    B8G8R8A8_UNORM,
    /// 8-bit RGBA, unsigned normalized (byte order R, G, B, A)
    R8G8B8A8_UNORM,
}

impl TextureFormat {
    /// Returns size in bytes of one pixel in this format
    pub fn bytes_per_pixel(&self) -> u32 {
        match self {
            TextureFormat::B8G8R8A8_UNORM | TextureFormat::R8G8B8A8_UNORM => 4,
        }
    }
}

/// Texture usage flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureUsage {
    /// Texture can be used as render target
    RenderTarget,
    /// Texture is CPU-readable (copy destination for read-back)
    Staging,
}

// ===== TEXTURE DESC =====

/// Descriptor for creating a texture
#[derive(Debug, Clone)]
pub struct TextureDesc {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel format
    pub format: TextureFormat,
    /// Usage flags
    pub usage: TextureUsage,
}

// ===== TEXTURE INFO =====

/// Read-only properties of a created texture.
///
/// Returned by `Texture::info()` to query texture properties
/// without exposing backend-specific details.
#[derive(Debug, Clone)]
pub struct TextureInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel format
    pub format: TextureFormat,
    /// Usage flags
    pub usage: TextureUsage,
}

impl TextureInfo {
    /// Size in bytes of one tightly packed row
    pub fn row_bytes(&self) -> u32 {
        self.width * self.format.bytes_per_pixel()
    }

    /// Size in bytes of the whole image, tightly packed
    pub fn byte_size(&self) -> usize {
        self.row_bytes() as usize * self.height as usize
    }
}

// ===== TEXTURE TRAIT =====

/// Texture resource trait
///
/// Implemented by backend-specific texture types (e.g., SoftTexture).
/// The texture is automatically destroyed when dropped.
pub trait Texture: Send + Sync {
    /// Get the read-only properties of this texture
    fn info(&self) -> &TextureInfo;

    /// Downcast support for backends
    fn as_any(&self) -> &dyn Any;
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
