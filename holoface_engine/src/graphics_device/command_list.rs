/// CommandList trait - for recording rendering commands

use std::any::Any;
use std::sync::Arc;
use crate::error::Result;
use crate::graphics_device::{Buffer, Pipeline, Texture};

/// Command list for recording rendering commands
///
/// Commands are recorded and later executed via GraphicsDevice::submit()
pub trait CommandList: Send + Sync {
    /// Begin recording commands
    ///
    /// Discards anything recorded previously, so one command list can be
    /// re-recorded every frame.
    fn begin(&mut self) -> Result<()>;

    /// End recording commands
    fn end(&mut self) -> Result<()>;

    /// Begin a render pass targeting a single color texture
    ///
    /// # Arguments
    ///
    /// * `target` - Render target texture (TextureUsage::RenderTarget)
    /// * `clear_color` - RGBA clear value applied when the pass begins
    fn begin_render_pass(&mut self, target: &Arc<dyn Texture>, clear_color: [f32; 4]) -> Result<()>;

    /// End the current render pass
    fn end_render_pass(&mut self) -> Result<()>;

    /// Set the viewport
    ///
    /// # Arguments
    ///
    /// * `viewport` - Viewport dimensions and depth range
    fn set_viewport(&mut self, viewport: Viewport) -> Result<()>;

    /// Bind a graphics pipeline
    ///
    /// # Arguments
    ///
    /// * `pipeline` - Pipeline to bind
    fn bind_pipeline(&mut self, pipeline: &Arc<dyn Pipeline>) -> Result<()>;

    /// Bind a vertex buffer
    ///
    /// # Arguments
    ///
    /// * `buffer` - Buffer to bind
    /// * `offset` - Offset into the buffer in bytes
    fn bind_vertex_buffer(&mut self, buffer: &Arc<dyn Buffer>, offset: u64) -> Result<()>;

    /// Bind a uniform buffer
    ///
    /// The bound bytes are passed to the pipeline's vertex shader for
    /// every vertex of subsequent draws.
    ///
    /// # Arguments
    ///
    /// * `buffer` - Buffer to bind
    fn bind_uniform_buffer(&mut self, buffer: &Arc<dyn Buffer>) -> Result<()>;

    /// Draw vertices
    ///
    /// # Arguments
    ///
    /// * `vertex_count` - Number of vertices to draw
    /// * `first_vertex` - Index of first vertex
    fn draw(&mut self, vertex_count: u32, first_vertex: u32) -> Result<()>;

    /// Copy a texture into another texture of the same extent and format
    ///
    /// Typically used to copy a render target into a staging texture for
    /// CPU read-back.
    ///
    /// # Arguments
    ///
    /// * `src` - Source texture
    /// * `dst` - Destination texture
    fn copy_texture(&mut self, src: &Arc<dyn Texture>, dst: &Arc<dyn Texture>) -> Result<()>;

    /// Downcast support for backends
    fn as_any(&self) -> &dyn Any;
}

/// Viewport dimensions and depth range
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}
