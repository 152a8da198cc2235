/// GraphicsDevice trait - main resource factory and submission interface

use std::sync::Arc;
use crate::error::Result;
use crate::graphics_device::{
    Buffer, BufferDesc, CommandList, Pipeline, PipelineDesc, Texture, TextureDesc,
};

/// Graphics device configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Enable validation (strict resource checks, verbose diagnostics)
    pub enable_validation: bool,
    /// Application name
    pub app_name: String,
    /// Application version (major, minor, patch)
    pub app_version: (u32, u32, u32),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable_validation: cfg!(debug_assertions),
            app_name: "Holoface Application".to_string(),
            app_version: (1, 0, 0),
        }
    }
}

/// Graphics device statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceStats {
    /// Number of draw calls in the last submitted command list
    pub draw_calls: u32,
    /// Number of points drawn in the last submitted command list
    pub points_drawn: u32,
    /// Resource memory currently allocated (bytes)
    pub bytes_allocated: u64,
}

/// Main graphics device trait
///
/// This is the central factory interface for creating rendering resources
/// and executing recorded command lists. Implemented by backend-specific
/// devices (e.g., SoftGraphicsDevice).
pub trait GraphicsDevice: Send + Sync {
    /// Create a buffer
    ///
    /// # Arguments
    ///
    /// * `desc` - Buffer descriptor
    ///
    /// # Returns
    ///
    /// A shared pointer to the created buffer
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>>;

    /// Create a texture
    ///
    /// # Arguments
    ///
    /// * `desc` - Texture descriptor
    ///
    /// # Returns
    ///
    /// A shared pointer to the created texture
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>>;

    /// Create a graphics pipeline
    ///
    /// # Arguments
    ///
    /// * `desc` - Pipeline descriptor
    ///
    /// # Returns
    ///
    /// A shared pointer to the created pipeline
    fn create_pipeline(&mut self, desc: PipelineDesc) -> Result<Arc<dyn Pipeline>>;

    /// Create a command list for recording
    fn create_command_list(&mut self) -> Result<Box<dyn CommandList>>;

    /// Execute a recorded command list
    ///
    /// Returns once all recorded commands have completed.
    fn submit(&mut self, commands: &mut dyn CommandList) -> Result<()>;

    /// Read a texture back into CPU memory
    ///
    /// Rows are written tightly packed, whatever the backend's internal
    /// row pitch. The destination length must be exactly
    /// `width * height * bytes_per_pixel` for the texture's format.
    ///
    /// # Arguments
    ///
    /// * `texture` - Texture to read (TextureUsage::Staging)
    /// * `out` - Destination for the pixel bytes
    fn read_texture(&mut self, texture: &Arc<dyn Texture>, out: &mut [u8]) -> Result<()>;

    /// Wait for all pending operations to complete
    fn wait_idle(&self) -> Result<()>;

    /// Get statistics about the device
    fn stats(&self) -> DeviceStats;

    /// Backend name (e.g., "soft")
    fn name(&self) -> &str;
}
