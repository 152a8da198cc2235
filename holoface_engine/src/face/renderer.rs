//! FaceRenderer - owns the GPU resources of one face and renders it a
//! frame at a time into a caller-owned pixel buffer.
//!
//! All resources are created once in `new`; `render` only updates the
//! uniform buffer, replays the frame's command list and blocks until
//! the pixels have been read back.

use std::sync::{Arc, Mutex};

use crate::camera::FaceCamera;
use crate::error::{Error, Result};
use crate::face::{
    FaceConfig, FaceConstants, FaceMesh, FaceShader, FrameParams, Mood, MoodState, MoodTarget,
    PointVertex, Region,
};
use crate::graphics_device::{
    Buffer, BufferDesc, BufferUsage, CommandList, GraphicsDevice, Pipeline, PipelineDesc,
    PrimitiveTopology, Texture, TextureDesc, TextureFormat, TextureUsage, Viewport,
};
use crate::{engine_error, engine_info};

/// Renders a procedural point-cloud face
pub struct FaceRenderer {
    device: Arc<Mutex<dyn GraphicsDevice>>,
    config: FaceConfig,
    camera: FaceCamera,
    mood: MoodState,

    vertex_count: u32,
    vertex_buffer: Arc<dyn Buffer>,
    uniform_buffer: Arc<dyn Buffer>,
    render_target: Arc<dyn Texture>,
    staging: Arc<dyn Texture>,
    pipeline: Arc<dyn Pipeline>,
    commands: Box<dyn CommandList>,
}

impl FaceRenderer {
    /// Create a face renderer and all its GPU resources
    ///
    /// The mesh is generated and uploaded here; nothing about it changes
    /// afterward.
    pub fn new(device: Arc<Mutex<dyn GraphicsDevice>>, config: FaceConfig) -> Result<Self> {
        config.validate()?;

        let mesh = FaceMesh::generate(&config)?;
        let camera = FaceCamera::new(config.width, config.height);
        let mood = MoodState::new(Mood::Neutral, config.mood_smoothing);

        let (vertex_buffer, uniform_buffer, render_target, staging, pipeline, commands) = {
            let mut dev = device.lock().map_err(|_| Self::lock_poisoned())?;

            let vertex_buffer = dev.create_buffer(BufferDesc {
                size: mesh.as_bytes().len() as u64,
                usage: BufferUsage::Vertex,
            })?;
            vertex_buffer.update(0, mesh.as_bytes())?;

            let uniform_buffer = dev.create_buffer(BufferDesc {
                size: FaceConstants::SIZE,
                usage: BufferUsage::Uniform,
            })?;

            let render_target = dev.create_texture(TextureDesc {
                width: config.width,
                height: config.height,
                format: TextureFormat::B8G8R8A8_UNORM,
                usage: TextureUsage::RenderTarget,
            })?;

            let staging = dev.create_texture(TextureDesc {
                width: config.width,
                height: config.height,
                format: TextureFormat::B8G8R8A8_UNORM,
                usage: TextureUsage::Staging,
            })?;

            let pipeline = dev.create_pipeline(PipelineDesc {
                vertex_shader: Arc::new(FaceShader),
                vertex_stride: PointVertex::STRIDE,
                topology: PrimitiveTopology::PointList,
            })?;

            let commands = dev.create_command_list()?;

            (
                vertex_buffer,
                uniform_buffer,
                render_target,
                staging,
                pipeline,
                commands,
            )
        };

        engine_info!(
            "holoface::FaceRenderer",
            "Face renderer ready: {}x{} output, {} points ({} skin, {} eye, {} mouth)",
            config.width,
            config.height,
            mesh.vertex_count(),
            mesh.region_count(Region::Skin),
            mesh.region_count(Region::Eye),
            mesh.region_count(Region::Mouth)
        );

        Ok(Self {
            device,
            vertex_count: mesh.vertex_count(),
            config,
            camera,
            mood,
            vertex_buffer,
            uniform_buffer,
            render_target,
            staging,
            pipeline,
            commands,
        })
    }

    /// Render one frame into `out`
    ///
    /// `out` must be exactly `output_len()` bytes; on success it holds the
    /// finished frame as tightly packed BGRA rows, top row first. Blocks
    /// until the read-back completes. A failed frame leaves `out`
    /// unspecified but the renderer stays usable.
    pub fn render(&mut self, params: &FrameParams, out: &mut [u8]) -> Result<()> {
        let expected = self.output_len();
        if out.len() != expected {
            engine_error!(
                "holoface::FaceRenderer",
                "Output buffer size mismatch: expected {} bytes, got {}",
                expected,
                out.len()
            );
            return Err(Error::OutputBufferSize {
                expected,
                actual: out.len(),
            });
        }

        self.mood.advance();

        let constants = FaceConstants {
            wvp: self.camera.world_view_projection(params.time),
            time: params.time,
            blink: params.blink,
            mouth: params.mouth,
            spike: self.mood.spike(),
            mood_color: self.mood.color(),
            confusion: self.mood.confusion(),
            _padding: [0.0; 3],
        };
        self.uniform_buffer.update(0, bytemuck::bytes_of(&constants))?;

        self.commands.begin()?;
        self.commands
            .begin_render_pass(&self.render_target, self.config.clear_color)?;
        self.commands.set_viewport(Viewport {
            x: 0.0,
            y: 0.0,
            width: self.config.width as f32,
            height: self.config.height as f32,
            min_depth: 0.0,
            max_depth: 1.0,
        })?;
        self.commands.bind_pipeline(&self.pipeline)?;
        self.commands.bind_vertex_buffer(&self.vertex_buffer, 0)?;
        self.commands.bind_uniform_buffer(&self.uniform_buffer)?;
        self.commands.draw(self.vertex_count, 0)?;
        self.commands.end_render_pass()?;
        self.commands
            .copy_texture(&self.render_target, &self.staging)?;
        self.commands.end()?;

        let mut device = self.device.lock().map_err(|_| Self::lock_poisoned())?;
        device.submit(self.commands.as_mut())?;
        device.read_texture(&self.staging, out)?;

        Ok(())
    }

    /// Byte size `render` expects for its output buffer
    pub fn output_len(&self) -> usize {
        self.config.output_len()
    }

    /// Get the configuration
    pub fn config(&self) -> &FaceConfig {
        &self.config
    }

    /// Get the camera
    pub fn camera(&self) -> &FaceCamera {
        &self.camera
    }

    /// Get the number of lattice points
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Get the smoothed mood state
    pub fn mood(&self) -> &MoodState {
        &self.mood
    }

    /// Set the mood preset to glide toward
    pub fn set_mood(&mut self, mood: Mood) {
        self.mood.set_mood(mood);
    }

    /// Set raw mood targets directly
    pub fn set_mood_target(&mut self, target: MoodTarget) {
        self.mood.set_target(target);
    }

    fn lock_poisoned() -> Error {
        engine_error!("holoface::FaceRenderer", "Graphics device lock poisoned");
        Error::BackendError("Graphics device lock poisoned".to_string())
    }
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
