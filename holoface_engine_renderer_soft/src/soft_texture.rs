/// Texture - soft implementation of the engine Texture trait

use std::any::Any;
use std::sync::{Arc, Mutex};
use holoface_engine::holoface::render::Texture as RendererTexture;
use holoface_engine::holoface::render::TextureInfo;

use crate::soft::AllocationRegistry;

/// Row pitch alignment in bytes
///
/// Rows are padded the way GPU staging memory is, so read-back code has to
/// cope with a pitch larger than the tight row size.
pub(crate) const ROW_PITCH_ALIGNMENT: u32 = 256;

/// CPU texture implementation
///
/// Pixel storage is row-padded: each row occupies `row_pitch` bytes, of which
/// the first `info.row_bytes()` hold pixels.
pub struct Texture {
    /// Row-padded pixel storage
    pub(crate) pixels: Mutex<Vec<u8>>,
    /// Bytes per stored row (>= info.row_bytes())
    pub(crate) row_pitch: u32,
    /// Allocation registry (shared with the device, for cleanup)
    registry: Arc<Mutex<AllocationRegistry>>,
    /// Registry id of this allocation
    allocation_id: u64,
    /// Read-only texture properties
    pub(crate) info: TextureInfo,
}

impl Texture {
    /// Create a new soft texture with zeroed pixels
    pub(crate) fn new(
        info: TextureInfo,
        registry: Arc<Mutex<AllocationRegistry>>,
        allocation_id: u64,
    ) -> Self {
        let row_pitch = Self::row_pitch_for(&info);
        let byte_len = row_pitch as usize * info.height as usize;
        Self {
            pixels: Mutex::new(vec![0u8; byte_len]),
            row_pitch,
            registry,
            allocation_id,
            info,
        }
    }

    /// Padded row pitch for a texture with these properties
    pub(crate) fn row_pitch_for(info: &TextureInfo) -> u32 {
        let tight = info.row_bytes();
        (tight + ROW_PITCH_ALIGNMENT - 1) / ROW_PITCH_ALIGNMENT * ROW_PITCH_ALIGNMENT
    }

    /// Total bytes of the padded storage for these properties
    pub(crate) fn storage_size_for(info: &TextureInfo) -> u64 {
        Self::row_pitch_for(info) as u64 * info.height as u64
    }
}

impl RendererTexture for Texture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        // Don't panic if the lock fails - the pixels drop either way
        if let Ok(mut registry) = self.registry.lock() {
            registry.free(self.allocation_id);
        }
    }
}
