/// CommandList - soft implementation of the engine CommandList trait

use std::any::Any;
use std::sync::Arc;
use holoface_engine::holoface::{Result, Error};
use holoface_engine::holoface::render::{
    CommandList as RendererCommandList,
    Pipeline as RendererPipeline,
    Buffer as RendererBuffer,
    Texture as RendererTexture,
    Viewport,
};

/// One recorded command
///
/// Resources are held as shared trait objects; the device downcasts them to
/// soft types while executing.
pub(crate) enum Command {
    BeginRenderPass {
        target: Arc<dyn RendererTexture>,
        clear_color: [f32; 4],
    },
    EndRenderPass,
    SetViewport(Viewport),
    BindPipeline(Arc<dyn RendererPipeline>),
    BindVertexBuffer {
        buffer: Arc<dyn RendererBuffer>,
        offset: u64,
    },
    BindUniformBuffer(Arc<dyn RendererBuffer>),
    Draw {
        vertex_count: u32,
        first_vertex: u32,
    },
    CopyTexture {
        src: Arc<dyn RendererTexture>,
        dst: Arc<dyn RendererTexture>,
    },
}

/// Soft command list implementation
///
/// Records rendering commands for later execution by the device. Recording
/// only validates ordering; resource checks happen at submit.
pub struct CommandList {
    /// Commands in recording order
    commands: Vec<Command>,
    /// Whether the command list is currently recording
    is_recording: bool,
    /// Whether we're inside a render pass
    in_render_pass: bool,
}

impl CommandList {
    /// Create a new command list
    pub(crate) fn new() -> Self {
        Self {
            commands: Vec::new(),
            is_recording: false,
            in_render_pass: false,
        }
    }

    /// The recorded commands, for execution by the device
    pub(crate) fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Whether `begin` was called without a matching `end`
    pub(crate) fn is_recording(&self) -> bool {
        self.is_recording
    }
}

impl RendererCommandList for CommandList {
    fn begin(&mut self) -> Result<()> {
        if self.is_recording {
            return Err(Error::BackendError("Command list already recording".to_string()));
        }

        // Discard the previous recording
        self.commands.clear();
        self.is_recording = true;
        self.in_render_pass = false;

        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        if !self.is_recording {
            return Err(Error::BackendError("Command list not recording".to_string()));
        }

        if self.in_render_pass {
            return Err(Error::BackendError("Render pass not ended before ending command list".to_string()));
        }

        self.is_recording = false;

        Ok(())
    }

    fn begin_render_pass(&mut self, target: &Arc<dyn RendererTexture>, clear_color: [f32; 4]) -> Result<()> {
        if !self.is_recording {
            return Err(Error::BackendError("Command list not recording".to_string()));
        }

        if self.in_render_pass {
            return Err(Error::BackendError("Already inside a render pass".to_string()));
        }

        self.commands.push(Command::BeginRenderPass {
            target: Arc::clone(target),
            clear_color,
        });
        self.in_render_pass = true;

        Ok(())
    }

    fn end_render_pass(&mut self) -> Result<()> {
        if !self.is_recording {
            return Err(Error::BackendError("Command list not recording".to_string()));
        }

        if !self.in_render_pass {
            return Err(Error::BackendError("Not inside a render pass".to_string()));
        }

        self.commands.push(Command::EndRenderPass);
        self.in_render_pass = false;

        Ok(())
    }

    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        if !self.is_recording {
            return Err(Error::BackendError("Command list not recording".to_string()));
        }

        self.commands.push(Command::SetViewport(viewport));

        Ok(())
    }

    fn bind_pipeline(&mut self, pipeline: &Arc<dyn RendererPipeline>) -> Result<()> {
        if !self.is_recording {
            return Err(Error::BackendError("Command list not recording".to_string()));
        }

        self.commands.push(Command::BindPipeline(Arc::clone(pipeline)));

        Ok(())
    }

    fn bind_vertex_buffer(&mut self, buffer: &Arc<dyn RendererBuffer>, offset: u64) -> Result<()> {
        if !self.is_recording {
            return Err(Error::BackendError("Command list not recording".to_string()));
        }

        self.commands.push(Command::BindVertexBuffer {
            buffer: Arc::clone(buffer),
            offset,
        });

        Ok(())
    }

    fn bind_uniform_buffer(&mut self, buffer: &Arc<dyn RendererBuffer>) -> Result<()> {
        if !self.is_recording {
            return Err(Error::BackendError("Command list not recording".to_string()));
        }

        self.commands.push(Command::BindUniformBuffer(Arc::clone(buffer)));

        Ok(())
    }

    fn draw(&mut self, vertex_count: u32, first_vertex: u32) -> Result<()> {
        if !self.is_recording {
            return Err(Error::BackendError("Command list not recording".to_string()));
        }

        if !self.in_render_pass {
            return Err(Error::BackendError("Not inside a render pass".to_string()));
        }

        self.commands.push(Command::Draw {
            vertex_count,
            first_vertex,
        });

        Ok(())
    }

    fn copy_texture(&mut self, src: &Arc<dyn RendererTexture>, dst: &Arc<dyn RendererTexture>) -> Result<()> {
        if !self.is_recording {
            return Err(Error::BackendError("Command list not recording".to_string()));
        }

        if self.in_render_pass {
            return Err(Error::BackendError("Texture copy inside a render pass".to_string()));
        }

        self.commands.push(Command::CopyTexture {
            src: Arc::clone(src),
            dst: Arc::clone(dst),
        });

        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
