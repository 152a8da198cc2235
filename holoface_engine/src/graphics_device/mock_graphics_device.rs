/// Mock GraphicsDevice for unit tests (no backend required)
///
/// This mock device allows testing the face renderer and other components
/// without requiring a real rasterizer backend.

use std::any::Any;
use std::sync::{Arc, Mutex};

use crate::engine_bail;
use crate::error::Result;
use crate::graphics_device::{
    Buffer, BufferDesc, CommandList, Config, DeviceStats, GraphicsDevice, Pipeline, PipelineDesc,
    Texture, TextureDesc, TextureInfo, Viewport,
};

// ============================================================================
// Mock Buffer
// ============================================================================

pub struct MockBuffer {
    pub desc: BufferDesc,
    pub data: Mutex<Vec<u8>>,
}

impl MockBuffer {
    pub fn new(desc: BufferDesc) -> Self {
        let size = desc.size as usize;
        Self {
            desc,
            data: Mutex::new(vec![0u8; size]),
        }
    }

    /// Snapshot of the buffer contents (for assertions)
    pub fn contents(&self) -> Vec<u8> {
        self.data.lock().unwrap().clone()
    }
}

impl Buffer for MockBuffer {
    fn update(&self, offset: u64, data: &[u8]) -> Result<()> {
        let end = offset as usize + data.len();
        if end > self.desc.size as usize {
            engine_bail!("holoface::mock",
                "Buffer update out of range: offset {} + len {} > size {}",
                offset, data.len(), self.desc.size);
        }
        let mut store = self.data.lock().unwrap();
        store[offset as usize..end].copy_from_slice(data);
        Ok(())
    }

    fn size(&self) -> u64 {
        self.desc.size
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// Mock Texture
// ============================================================================

pub struct MockTexture {
    pub info: TextureInfo,
}

impl MockTexture {
    pub fn new(desc: &TextureDesc) -> Self {
        Self {
            info: TextureInfo {
                width: desc.width,
                height: desc.height,
                format: desc.format,
                usage: desc.usage,
            },
        }
    }
}

impl Texture for MockTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// Mock Pipeline
// ============================================================================

pub struct MockPipeline {
    pub desc: PipelineDesc,
}

impl MockPipeline {
    pub fn new(desc: PipelineDesc) -> Self {
        Self { desc }
    }
}

impl Pipeline for MockPipeline {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// Mock CommandList
// ============================================================================

/// Records command names so tests can assert the recorded sequence
pub struct MockCommandList {
    pub commands: Vec<String>,
}

impl MockCommandList {
    pub fn new() -> Self {
        Self { commands: Vec::new() }
    }
}

impl CommandList for MockCommandList {
    fn begin(&mut self) -> Result<()> {
        self.commands.clear();
        self.commands.push("begin".to_string());
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        self.commands.push("end".to_string());
        Ok(())
    }

    fn begin_render_pass(&mut self, _target: &Arc<dyn Texture>, clear_color: [f32; 4]) -> Result<()> {
        self.commands.push(format!("begin_render_pass clear={:?}", clear_color));
        Ok(())
    }

    fn end_render_pass(&mut self) -> Result<()> {
        self.commands.push("end_render_pass".to_string());
        Ok(())
    }

    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.commands.push(format!("set_viewport {}x{}", viewport.width, viewport.height));
        Ok(())
    }

    fn bind_pipeline(&mut self, _pipeline: &Arc<dyn Pipeline>) -> Result<()> {
        self.commands.push("bind_pipeline".to_string());
        Ok(())
    }

    fn bind_vertex_buffer(&mut self, _buffer: &Arc<dyn Buffer>, offset: u64) -> Result<()> {
        self.commands.push(format!("bind_vertex_buffer offset={}", offset));
        Ok(())
    }

    fn bind_uniform_buffer(&mut self, _buffer: &Arc<dyn Buffer>) -> Result<()> {
        self.commands.push("bind_uniform_buffer".to_string());
        Ok(())
    }

    fn draw(&mut self, vertex_count: u32, first_vertex: u32) -> Result<()> {
        self.commands.push(format!("draw {} from {}", vertex_count, first_vertex));
        Ok(())
    }

    fn copy_texture(&mut self, _src: &Arc<dyn Texture>, _dst: &Arc<dyn Texture>) -> Result<()> {
        self.commands.push("copy_texture".to_string());
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

/// Mock GraphicsDevice that tracks created resources
pub struct MockGraphicsDevice {
    pub config: Config,
    /// Track created buffers
    pub created_buffers: Arc<Mutex<Vec<String>>>,
    /// Track created textures
    pub created_textures: Arc<Mutex<Vec<String>>>,
    /// Track created pipelines
    pub created_pipelines: Arc<Mutex<Vec<String>>>,
    /// Number of submitted command lists
    pub submit_count: Arc<Mutex<u32>>,
    /// Number of texture read-backs
    pub read_count: Arc<Mutex<u32>>,
    /// Commands of the most recently submitted list
    pub last_submitted: Arc<Mutex<Vec<String>>>,
}

impl MockGraphicsDevice {
    /// Create a new mock device
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            created_buffers: Arc::new(Mutex::new(Vec::new())),
            created_textures: Arc::new(Mutex::new(Vec::new())),
            created_pipelines: Arc::new(Mutex::new(Vec::new())),
            submit_count: Arc::new(Mutex::new(0)),
            read_count: Arc::new(Mutex::new(0)),
            last_submitted: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get names of created buffers
    pub fn get_created_buffers(&self) -> Vec<String> {
        self.created_buffers.lock().unwrap().clone()
    }

    /// Get names of created textures
    pub fn get_created_textures(&self) -> Vec<String> {
        self.created_textures.lock().unwrap().clone()
    }

    /// Get names of created pipelines
    pub fn get_created_pipelines(&self) -> Vec<String> {
        self.created_pipelines.lock().unwrap().clone()
    }

    /// Get the commands of the most recently submitted list
    pub fn get_last_submitted(&self) -> Vec<String> {
        self.last_submitted.lock().unwrap().clone()
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>> {
        let name = format!("buffer_{:?}_{}", desc.usage, desc.size);
        self.created_buffers.lock().unwrap().push(name);
        Ok(Arc::new(MockBuffer::new(desc)))
    }

    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>> {
        let name = format!("texture_{:?}_{}x{}", desc.usage, desc.width, desc.height);
        self.created_textures.lock().unwrap().push(name);
        Ok(Arc::new(MockTexture::new(&desc)))
    }

    fn create_pipeline(&mut self, desc: PipelineDesc) -> Result<Arc<dyn Pipeline>> {
        let name = format!("pipeline_{:?}", desc.topology);
        self.created_pipelines.lock().unwrap().push(name);
        Ok(Arc::new(MockPipeline::new(desc)))
    }

    fn create_command_list(&mut self) -> Result<Box<dyn CommandList>> {
        Ok(Box::new(MockCommandList::new()))
    }

    fn submit(&mut self, commands: &mut dyn CommandList) -> Result<()> {
        if let Some(mock) = commands.as_any().downcast_ref::<MockCommandList>() {
            *self.last_submitted.lock().unwrap() = mock.commands.clone();
        }
        *self.submit_count.lock().unwrap() += 1;
        Ok(())
    }

    fn read_texture(&mut self, texture: &Arc<dyn Texture>, out: &mut [u8]) -> Result<()> {
        let expected = texture.info().byte_size();
        if out.len() != expected {
            return Err(crate::error::Error::OutputBufferSize {
                expected,
                actual: out.len(),
            });
        }
        out.fill(0);
        *self.read_count.lock().unwrap() += 1;
        Ok(())
    }

    fn wait_idle(&self) -> Result<()> {
        Ok(())
    }

    fn stats(&self) -> DeviceStats {
        DeviceStats::default()
    }

    fn name(&self) -> &str {
        "mock"
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
