/// SoftGraphicsDevice - CPU implementation of the GraphicsDevice trait

use holoface_engine::holoface::{Result, Error};
use holoface_engine::holoface::render::{
    GraphicsDevice as RendererGraphicsDevice, Config, DeviceStats,
    CommandList as RendererCommandList,
    Buffer as RendererBuffer, BufferDesc,
    Texture as RendererTexture, TextureDesc, TextureInfo, TextureFormat, TextureUsage,
    Pipeline as RendererPipeline, PipelineDesc, PrimitiveTopology, Viewport,
};
use holoface_engine::{engine_trace, engine_info, engine_warn, engine_error, engine_err, engine_bail};

use glam::Vec4;
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex};

use crate::soft_buffer::Buffer;
use crate::soft_texture::Texture;
use crate::soft_pipeline::Pipeline;
use crate::soft_command_list::{Command, CommandList};
use crate::debug;

/// Tracks live allocations so device statistics and leak checks work
/// the same way they do on a real GPU device.
///
/// Resources hold an `Arc` to the registry and free their entry on drop.
pub(crate) struct AllocationRegistry {
    allocations: FxHashMap<u64, u64>,
    next_id: u64,
}

impl AllocationRegistry {
    fn new() -> Self {
        Self {
            allocations: FxHashMap::default(),
            next_id: 0,
        }
    }

    pub(crate) fn register(&mut self, bytes: u64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.allocations.insert(id, bytes);
        id
    }

    pub(crate) fn free(&mut self, id: u64) {
        self.allocations.remove(&id);
    }

    pub(crate) fn total_bytes(&self) -> u64 {
        self.allocations.values().sum()
    }

    pub(crate) fn live_count(&self) -> usize {
        self.allocations.len()
    }
}

/// Bind state accumulated while replaying a command list.
struct ExecState {
    target: Option<Arc<dyn RendererTexture>>,
    viewport: Option<Viewport>,
    pipeline: Option<Arc<dyn RendererPipeline>>,
    vertex_buffer: Option<(Arc<dyn RendererBuffer>, u64)>,
    uniform_buffer: Option<Arc<dyn RendererBuffer>>,
}

impl ExecState {
    fn new() -> Self {
        Self {
            target: None,
            viewport: None,
            pipeline: None,
            vertex_buffer: None,
            uniform_buffer: None,
        }
    }
}

/// Software rasterizer device.
///
/// Executes command lists synchronously on the CPU at submit time. Points
/// are the only supported primitive. Output is deterministic, which makes
/// this device the reference implementation for tests.
pub struct SoftGraphicsDevice {
    config: Config,
    stats: DeviceStats,
    registry: Arc<Mutex<AllocationRegistry>>,
}

impl SoftGraphicsDevice {
    pub fn new(config: Config) -> Self {
        engine_info!(
            "holoface::soft",
            "Created soft graphics device for '{}' (validation: {})",
            config.app_name,
            config.enable_validation
        );

        Self {
            config,
            stats: DeviceStats::default(),
            registry: Arc::new(Mutex::new(AllocationRegistry::new())),
        }
    }

    /// Count a rejected operation when validation is enabled.
    fn validation_reject(&self) {
        if self.config.enable_validation {
            debug::record_error();
        }
    }

    /// Count and log a suspicious but permitted operation when validation
    /// is enabled.
    fn validation_warn(&self, message: &str) {
        if self.config.enable_validation {
            debug::record_warning();
            engine_warn!("holoface::soft", "{}", message);
        }
    }

    fn lock_registry(&self) -> Result<std::sync::MutexGuard<'_, AllocationRegistry>> {
        self.registry.lock().map_err(|_| {
            engine_error!("holoface::soft", "Allocation registry lock poisoned");
            Error::BackendError("Allocation registry lock poisoned".to_string())
        })
    }

    fn downcast_texture<'a>(&self, texture: &'a Arc<dyn RendererTexture>) -> Result<&'a Texture> {
        texture.as_any().downcast_ref::<Texture>().ok_or_else(|| {
            self.validation_reject();
            engine_err!("holoface::soft", "Texture was not created by this device")
        })
    }

    fn downcast_buffer<'a>(&self, buffer: &'a Arc<dyn RendererBuffer>) -> Result<&'a Buffer> {
        buffer.as_any().downcast_ref::<Buffer>().ok_or_else(|| {
            self.validation_reject();
            engine_err!("holoface::soft", "Buffer was not created by this device")
        })
    }

    fn downcast_pipeline<'a>(
        &self,
        pipeline: &'a Arc<dyn RendererPipeline>,
    ) -> Result<&'a Pipeline> {
        pipeline.as_any().downcast_ref::<Pipeline>().ok_or_else(|| {
            self.validation_reject();
            engine_err!("holoface::soft", "Pipeline was not created by this device")
        })
    }

    fn execute_commands(&mut self, commands: &[Command]) -> Result<()> {
        // Draw statistics cover the most recent submit.
        self.stats.draw_calls = 0;
        self.stats.points_drawn = 0;

        let mut state = ExecState::new();

        for command in commands {
            match command {
                Command::BeginRenderPass { target, clear_color } => {
                    let texture = self.downcast_texture(target)?;
                    if texture.info.usage != TextureUsage::RenderTarget {
                        self.validation_reject();
                        engine_bail!(
                            "holoface::soft",
                            "Render pass target has usage {:?}, expected RenderTarget",
                            texture.info.usage
                        );
                    }
                    clear_texture(texture, *clear_color)?;
                    state.target = Some(Arc::clone(target));
                }
                Command::EndRenderPass => {
                    state.target = None;
                }
                Command::SetViewport(viewport) => {
                    state.viewport = Some(*viewport);
                }
                Command::BindPipeline(pipeline) => {
                    self.downcast_pipeline(pipeline)?;
                    state.pipeline = Some(Arc::clone(pipeline));
                }
                Command::BindVertexBuffer { buffer, offset } => {
                    self.downcast_buffer(buffer)?;
                    state.vertex_buffer = Some((Arc::clone(buffer), *offset));
                }
                Command::BindUniformBuffer(buffer) => {
                    self.downcast_buffer(buffer)?;
                    state.uniform_buffer = Some(Arc::clone(buffer));
                }
                Command::Draw { vertex_count, first_vertex } => {
                    self.execute_draw(&state, *vertex_count, *first_vertex)?;
                }
                Command::CopyTexture { src, dst } => {
                    self.execute_copy(src, dst)?;
                }
            }
        }

        Ok(())
    }

    fn execute_draw(&mut self, state: &ExecState, vertex_count: u32, first_vertex: u32) -> Result<()> {
        let target = match &state.target {
            Some(target) => target,
            None => {
                self.validation_reject();
                engine_bail!("holoface::soft", "Draw outside a render pass");
            }
        };
        let pipeline = match &state.pipeline {
            Some(pipeline) => pipeline,
            None => {
                self.validation_reject();
                engine_bail!("holoface::soft", "Draw without a bound pipeline");
            }
        };
        let (vertex_buffer, vertex_offset) = match &state.vertex_buffer {
            Some((buffer, offset)) => (buffer, *offset),
            None => {
                self.validation_reject();
                engine_bail!("holoface::soft", "Draw without a bound vertex buffer");
            }
        };
        let viewport = match state.viewport {
            Some(viewport) => viewport,
            None => {
                self.validation_reject();
                engine_bail!("holoface::soft", "Draw without a viewport");
            }
        };

        let target = self.downcast_texture(target)?;
        let pipeline = self.downcast_pipeline(pipeline)?;
        let vertex_buffer = self.downcast_buffer(vertex_buffer)?;

        if pipeline.topology != PrimitiveTopology::PointList {
            self.validation_reject();
            engine_bail!(
                "holoface::soft",
                "Topology {:?} is not supported, only PointList rasterizes",
                pipeline.topology
            );
        }

        let vertex_bytes = vertex_buffer.contents()?;
        let uniform_bytes = match &state.uniform_buffer {
            Some(buffer) => self.downcast_buffer(buffer)?.contents()?,
            None => Vec::new(),
        };

        let stride = pipeline.vertex_stride as usize;
        let needed = (first_vertex as u64 + vertex_count as u64)
            .checked_mul(stride as u64)
            .and_then(|bytes| bytes.checked_add(vertex_offset))
            .unwrap_or(u64::MAX);
        if needed > vertex_bytes.len() as u64 {
            self.validation_reject();
            engine_bail!(
                "holoface::soft",
                "Vertex fetch out of range: {} vertices from {} at stride {} exceed buffer size {}",
                vertex_count,
                first_vertex,
                stride,
                vertex_bytes.len()
            );
        }

        let width = target.info.width;
        let height = target.info.height;
        let format = target.info.format;
        let row_pitch = target.row_pitch as usize;

        let mut pixels = target.pixels.lock().map_err(|_| {
            engine_error!("holoface::soft", "Texture pixel lock poisoned");
            Error::BackendError("Texture pixel lock poisoned".to_string())
        })?;

        for index in first_vertex..first_vertex + vertex_count {
            let begin = (vertex_offset + index as u64 * stride as u64) as usize;
            let vertex = &vertex_bytes[begin..begin + stride];

            let clip = pipeline.vertex_shader.shade(vertex, &uniform_bytes);
            let ndc = match clip_to_ndc(clip.position) {
                Some(ndc) => ndc,
                None => continue,
            };
            let (px, py) = match ndc_to_pixel(ndc, &viewport, width, height) {
                Some(pixel) => pixel,
                None => continue,
            };

            let packed = pack_color(format, clip.color.to_array());
            let offset = py * row_pitch + px * 4;
            pixels[offset..offset + 4].copy_from_slice(&packed);
        }

        self.stats.draw_calls += 1;
        self.stats.points_drawn += vertex_count;

        Ok(())
    }

    fn execute_copy(
        &mut self,
        src: &Arc<dyn RendererTexture>,
        dst: &Arc<dyn RendererTexture>,
    ) -> Result<()> {
        let src_texture = self.downcast_texture(src)?;
        let dst_texture = self.downcast_texture(dst)?;

        if src_texture.info.width != dst_texture.info.width
            || src_texture.info.height != dst_texture.info.height
            || src_texture.info.format != dst_texture.info.format
        {
            self.validation_reject();
            engine_bail!(
                "holoface::soft",
                "Texture copy mismatch: {}x{} {:?} -> {}x{} {:?}",
                src_texture.info.width,
                src_texture.info.height,
                src_texture.info.format,
                dst_texture.info.width,
                dst_texture.info.height,
                dst_texture.info.format
            );
        }

        if dst_texture.info.usage != TextureUsage::Staging {
            self.validation_warn("Texture copy destination is not a staging texture");
        }

        // Clone before locking the destination so copying a texture onto
        // itself cannot deadlock.
        let src_pixels = src_texture
            .pixels
            .lock()
            .map_err(|_| {
                engine_error!("holoface::soft", "Texture pixel lock poisoned");
                Error::BackendError("Texture pixel lock poisoned".to_string())
            })?
            .clone();

        let mut dst_pixels = dst_texture.pixels.lock().map_err(|_| {
            engine_error!("holoface::soft", "Texture pixel lock poisoned");
            Error::BackendError("Texture pixel lock poisoned".to_string())
        })?;

        // Same extent and format means the same row pitch, so the storage
        // lengths match.
        dst_pixels.copy_from_slice(&src_pixels);

        Ok(())
    }
}

impl RendererGraphicsDevice for SoftGraphicsDevice {
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn RendererBuffer>> {
        if desc.size == 0 {
            self.validation_reject();
            engine_bail!("holoface::soft", "Buffer size must be non-zero");
        }

        let allocation_id = self.lock_registry()?.register(desc.size);

        engine_trace!(
            "holoface::soft",
            "Created {:?} buffer of {} bytes",
            desc.usage,
            desc.size
        );

        Ok(Arc::new(Buffer::new(
            desc.size,
            Arc::clone(&self.registry),
            allocation_id,
        )))
    }

    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn RendererTexture>> {
        if desc.width == 0 || desc.height == 0 {
            self.validation_reject();
            engine_bail!(
                "holoface::soft",
                "Texture extent must be non-zero ({}x{})",
                desc.width,
                desc.height
            );
        }

        let info = TextureInfo {
            width: desc.width,
            height: desc.height,
            format: desc.format,
            usage: desc.usage,
        };
        let storage = Texture::storage_size_for(&info);
        let allocation_id = self.lock_registry()?.register(storage);

        engine_trace!(
            "holoface::soft",
            "Created {}x{} {:?} texture ({:?}, {} bytes with row padding)",
            desc.width,
            desc.height,
            desc.format,
            desc.usage,
            storage
        );

        Ok(Arc::new(Texture::new(
            info,
            Arc::clone(&self.registry),
            allocation_id,
        )))
    }

    fn create_pipeline(&mut self, desc: PipelineDesc) -> Result<Arc<dyn RendererPipeline>> {
        if desc.vertex_stride == 0 {
            self.validation_reject();
            engine_bail!("holoface::soft", "Pipeline vertex stride must be non-zero");
        }

        engine_trace!(
            "holoface::soft",
            "Created {:?} pipeline with vertex stride {}",
            desc.topology,
            desc.vertex_stride
        );

        Ok(Arc::new(Pipeline::new(desc)))
    }

    fn create_command_list(&mut self) -> Result<Box<dyn RendererCommandList>> {
        Ok(Box::new(CommandList::new()))
    }

    fn submit(&mut self, commands: &mut dyn RendererCommandList) -> Result<()> {
        let list = commands.as_any().downcast_ref::<CommandList>().ok_or_else(|| {
            self.validation_reject();
            engine_err!("holoface::soft", "Command list was not created by this device")
        })?;

        if list.is_recording() {
            self.validation_reject();
            engine_bail!("holoface::soft", "Command list submitted while still recording");
        }

        self.execute_commands(list.commands())
    }

    fn read_texture(&mut self, texture: &Arc<dyn RendererTexture>, out: &mut [u8]) -> Result<()> {
        let soft_texture = self.downcast_texture(texture)?;

        if soft_texture.info.usage != TextureUsage::Staging {
            self.validation_warn("Reading back a texture that is not a staging texture");
        }

        let expected = soft_texture.info.byte_size();
        if out.len() != expected {
            self.validation_reject();
            engine_bail!(
                "holoface::soft",
                "Texture read-back size mismatch: expected {} bytes, got {}",
                expected,
                out.len()
            );
        }

        let pixels = soft_texture.pixels.lock().map_err(|_| {
            engine_error!("holoface::soft", "Texture pixel lock poisoned");
            Error::BackendError("Texture pixel lock poisoned".to_string())
        })?;

        let row_bytes = soft_texture.info.row_bytes() as usize;
        let row_pitch = soft_texture.row_pitch as usize;

        // Drop the row padding so callers get tightly packed pixels.
        for (row_index, row) in pixels.chunks_exact(row_pitch).enumerate() {
            let start = row_index * row_bytes;
            out[start..start + row_bytes].copy_from_slice(&row[..row_bytes]);
        }

        Ok(())
    }

    fn wait_idle(&self) -> Result<()> {
        // Submits execute synchronously, so there is nothing to wait for.
        Ok(())
    }

    fn stats(&self) -> DeviceStats {
        let bytes_allocated = self
            .registry
            .lock()
            .map(|registry| registry.total_bytes())
            .unwrap_or(0);

        DeviceStats {
            draw_calls: self.stats.draw_calls,
            points_drawn: self.stats.points_drawn,
            bytes_allocated,
        }
    }

    fn name(&self) -> &str {
        "soft"
    }
}

impl Drop for SoftGraphicsDevice {
    fn drop(&mut self) {
        if let Ok(registry) = self.registry.lock() {
            let live = registry.live_count();
            if live > 0 {
                // Resources can outlive the device through their Arcs.
                engine_trace!(
                    "holoface::soft",
                    "Soft graphics device dropped with {} live allocations",
                    live
                );
            }
        }
        engine_info!("holoface::soft", "Destroyed soft graphics device");
    }
}

/// Clip test and perspective divide.
///
/// Returns `None` when the vertex falls outside the clip volume
/// (`w > 0`, `|x| <= w`, `|y| <= w`, `0 <= z <= w`).
fn clip_to_ndc(position: Vec4) -> Option<(f32, f32)> {
    let w = position.w;
    if w <= 0.0 {
        return None;
    }
    if position.x < -w || position.x > w {
        return None;
    }
    if position.y < -w || position.y > w {
        return None;
    }
    if position.z < 0.0 || position.z > w {
        return None;
    }
    Some((position.x / w, position.y / w))
}

/// Viewport transform to integer pixel coordinates, with Y flipped so
/// NDC +Y points up while rows grow downward.
///
/// Returns `None` when the point lands outside the target extent.
fn ndc_to_pixel(ndc: (f32, f32), viewport: &Viewport, width: u32, height: u32) -> Option<(usize, usize)> {
    let sx = viewport.x + (ndc.0 * 0.5 + 0.5) * viewport.width;
    let sy = viewport.y + (0.5 - ndc.1 * 0.5) * viewport.height;

    let px = sx.floor() as i64;
    let py = sy.floor() as i64;
    if px < 0 || py < 0 || px >= width as i64 || py >= height as i64 {
        return None;
    }

    Some((px as usize, py as usize))
}

/// Pack a normalized color into the byte order the format dictates.
fn pack_color(format: TextureFormat, color: [f32; 4]) -> [u8; 4] {
    let [r, g, b, a] = color.map(|c| (c.clamp(0.0, 1.0) * 255.0 + 0.5) as u8);
    match format {
        TextureFormat::B8G8R8A8_UNORM => [b, g, r, a],
        TextureFormat::R8G8B8A8_UNORM => [r, g, b, a],
    }
}

/// Fill every pixel of a texture, leaving the row padding untouched.
fn clear_texture(texture: &Texture, clear_color: [f32; 4]) -> Result<()> {
    let packed = pack_color(texture.info.format, clear_color);
    let row_bytes = texture.info.row_bytes() as usize;
    let row_pitch = texture.row_pitch as usize;

    let mut pixels = texture.pixels.lock().map_err(|_| {
        engine_error!("holoface::soft", "Texture pixel lock poisoned");
        Error::BackendError("Texture pixel lock poisoned".to_string())
    })?;

    for row in pixels.chunks_exact_mut(row_pitch) {
        for pixel in row[..row_bytes].chunks_exact_mut(4) {
            pixel.copy_from_slice(&packed);
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "soft_raster_tests.rs"]
mod tests;
