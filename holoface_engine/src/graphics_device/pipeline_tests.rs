//! Unit tests for pipeline.rs
//!
//! Tests PrimitiveTopology, ClipVertex, and the VertexShader trait.

use std::sync::Arc;
use glam::Vec4;
use crate::graphics_device::{ClipVertex, PipelineDesc, PrimitiveTopology, VertexShader};

// ============================================================================
// PRIMITIVE TOPOLOGY TESTS
// ============================================================================

#[test]
fn test_primitive_topology_equality() {
    assert_eq!(PrimitiveTopology::PointList, PrimitiveTopology::PointList);
    assert_eq!(PrimitiveTopology::LineList, PrimitiveTopology::LineList);
    assert_eq!(PrimitiveTopology::TriangleList, PrimitiveTopology::TriangleList);

    assert_ne!(PrimitiveTopology::PointList, PrimitiveTopology::TriangleList);
}

#[test]
fn test_primitive_topology_debug() {
    assert!(format!("{:?}", PrimitiveTopology::PointList).contains("PointList"));
    assert!(format!("{:?}", PrimitiveTopology::LineList).contains("LineList"));
    assert!(format!("{:?}", PrimitiveTopology::TriangleList).contains("TriangleList"));
}

#[test]
fn test_primitive_topology_copy() {
    let topo1 = PrimitiveTopology::PointList;
    let topo2 = topo1; // Copy, not move
    assert_eq!(topo1, topo2);
}

// ============================================================================
// CLIP VERTEX TESTS
// ============================================================================

#[test]
fn test_clip_vertex_rejected_has_zero_w() {
    let rejected = ClipVertex::REJECTED;
    assert_eq!(rejected.position.w, 0.0);
}

#[test]
fn test_clip_vertex_copy() {
    let v1 = ClipVertex {
        position: Vec4::new(1.0, 2.0, 3.0, 4.0),
        color: Vec4::new(0.0, 1.0, 0.8, 1.0),
    };
    let v2 = v1; // Copy, not move
    assert_eq!(v1.position, v2.position);
    assert_eq!(v1.color, v2.color);
}

// ============================================================================
// VERTEX SHADER TRAIT TESTS
// ============================================================================

/// Shader that outputs a fixed clip position and echoes no color
struct FixedShader;

impl VertexShader for FixedShader {
    fn shade(&self, _vertex: &[u8], _constants: &[u8]) -> ClipVertex {
        ClipVertex {
            position: Vec4::new(0.0, 0.0, 0.5, 1.0),
            color: Vec4::ONE,
        }
    }
}

#[test]
fn test_vertex_shader_trait_object() {
    let shader: Arc<dyn VertexShader> = Arc::new(FixedShader);
    let out = shader.shade(&[0u8; 32], &[0u8; 112]);
    assert_eq!(out.position.w, 1.0);
    assert_eq!(out.color, Vec4::ONE);
}

#[test]
fn test_pipeline_desc_clone_shares_shader() {
    let desc1 = PipelineDesc {
        vertex_shader: Arc::new(FixedShader),
        vertex_stride: 32,
        topology: PrimitiveTopology::PointList,
    };
    let desc2 = desc1.clone();

    assert_eq!(desc1.vertex_stride, desc2.vertex_stride);
    assert_eq!(desc1.topology, desc2.topology);
    assert!(Arc::ptr_eq(&desc1.vertex_shader, &desc2.vertex_shader));
}
