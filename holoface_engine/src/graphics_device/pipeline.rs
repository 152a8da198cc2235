/// Pipeline trait, pipeline descriptor, and the vertex shader seam

use std::any::Any;
use std::sync::Arc;
use glam::Vec4;

/// Primitive topology for a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    PointList,
    LineList,
    TriangleList,
}

/// Output of a vertex shader for one vertex
///
/// Position is in clip space (before perspective divide).
#[derive(Debug, Clone, Copy)]
pub struct ClipVertex {
    /// Clip-space position
    pub position: Vec4,
    /// Vertex color (RGBA, 0..1)
    pub color: Vec4,
}

impl ClipVertex {
    /// A vertex that every clipper rejects (w = 0)
    pub const REJECTED: ClipVertex = ClipVertex {
        position: Vec4::ZERO,
        color: Vec4::ZERO,
    };
}

/// Vertex shader trait - the per-vertex program a pipeline runs
///
/// Backends call `shade` once per drawn vertex with the raw vertex bytes
/// (one stride-sized slice from the bound vertex buffer) and the currently
/// bound uniform bytes. Implementations cast those bytes to their own
/// typed structures.
///
/// Inputs of unexpected length must shade to `ClipVertex::REJECTED`
/// rather than panic.
pub trait VertexShader: Send + Sync {
    /// Run the vertex program for a single vertex
    ///
    /// # Arguments
    ///
    /// * `vertex` - Raw bytes of one vertex (stride-sized)
    /// * `constants` - Raw bytes of the bound uniform buffer
    fn shade(&self, vertex: &[u8], constants: &[u8]) -> ClipVertex;
}

/// Descriptor for creating a pipeline
#[derive(Clone)]
pub struct PipelineDesc {
    /// Vertex program to run for each vertex
    pub vertex_shader: Arc<dyn VertexShader>,
    /// Size in bytes of one vertex in the bound vertex buffer
    pub vertex_stride: u32,
    /// Primitive topology
    pub topology: PrimitiveTopology,
}

/// Pipeline resource trait
///
/// Implemented by backend-specific pipeline types (e.g., SoftPipeline).
pub trait Pipeline: Send + Sync {
    /// Downcast support for backends
    fn as_any(&self) -> &dyn Any;
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
