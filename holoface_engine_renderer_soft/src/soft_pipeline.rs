/// Pipeline - soft implementation of the engine Pipeline trait

use std::any::Any;
use std::sync::Arc;
use holoface_engine::holoface::render::{
    Pipeline as RendererPipeline, PipelineDesc, PrimitiveTopology, VertexShader,
};

/// CPU pipeline implementation
///
/// Captures the vertex program and fixed state from the descriptor. There is
/// nothing to compile; the vertex program runs directly at draw time.
pub struct Pipeline {
    /// Vertex program run for every drawn vertex
    pub(crate) vertex_shader: Arc<dyn VertexShader>,
    /// Size in bytes of one vertex in the bound vertex buffer
    pub(crate) vertex_stride: u32,
    /// Primitive topology
    pub(crate) topology: PrimitiveTopology,
}

impl Pipeline {
    /// Create a new soft pipeline
    pub(crate) fn new(desc: PipelineDesc) -> Self {
        Self {
            vertex_shader: desc.vertex_shader,
            vertex_stride: desc.vertex_stride,
            topology: desc.topology,
        }
    }
}

impl RendererPipeline for Pipeline {
    fn as_any(&self) -> &dyn Any {
        self
    }
}
