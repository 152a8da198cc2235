//! Integration tests for the SoftGraphicsDevice backend
//!
//! These tests verify that SoftGraphicsDevice correctly implements the
//! GraphicsDevice trait through the public API alone. The backend runs
//! entirely on the CPU, so no test needs a GPU or a window.
//!
//! Run with: cargo test --test soft_renderer_tests

use holoface_engine::holoface::render::{
    GraphicsDevice, Config,
    TextureDesc, TextureFormat, TextureUsage,
    BufferDesc, BufferUsage,
    PipelineDesc, PrimitiveTopology, Viewport,
    ClipVertex, VertexShader,
};
use holoface_engine_renderer_soft::SoftGraphicsDevice;
use glam::Vec4;
use std::sync::Arc;

/// Shader used by the drawing tests: position (3 floats) then color
/// (4 floats), passed through at w = 1.
struct TestShader;

const TEST_STRIDE: u32 = 28;

impl VertexShader for TestShader {
    fn shade(&self, vertex: &[u8], _constants: &[u8]) -> ClipVertex {
        if vertex.len() != TEST_STRIDE as usize {
            return ClipVertex::REJECTED;
        }
        let position: [f32; 3] = bytemuck::pod_read_unaligned(&vertex[0..12]);
        let color: [f32; 4] = bytemuck::pod_read_unaligned(&vertex[12..28]);
        ClipVertex {
            position: Vec4::new(position[0], position[1], position[2], 1.0),
            color: Vec4::from_array(color),
        }
    }
}

fn test_config() -> Config {
    Config {
        enable_validation: false,
        app_name: "Soft Backend Test".to_string(),
        app_version: (0, 1, 0),
    }
}

fn vertex_bytes(position: [f32; 3], color: [f32; 4]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(TEST_STRIDE as usize);
    bytes.extend_from_slice(bytemuck::bytes_of(&position));
    bytes.extend_from_slice(bytemuck::bytes_of(&color));
    bytes
}

// ============================================================================
// DEVICE TESTS
// ============================================================================

#[test]
fn test_soft_device_reports_name() {
    let device = SoftGraphicsDevice::new(test_config());
    assert_eq!(device.name(), "soft");
}

#[test]
fn test_soft_device_initial_stats() {
    let device = SoftGraphicsDevice::new(test_config());
    let stats = device.stats();

    assert_eq!(stats.draw_calls, 0);
    assert_eq!(stats.points_drawn, 0);
    assert_eq!(stats.bytes_allocated, 0);
}

#[test]
fn test_soft_wait_idle() {
    let device = SoftGraphicsDevice::new(test_config());
    device.wait_idle().unwrap();
}

// ============================================================================
// TEXTURE TESTS
// ============================================================================

#[test]
fn test_soft_create_render_target() {
    let mut device = SoftGraphicsDevice::new(test_config());

    let texture = device
        .create_texture(TextureDesc {
            width: 300,
            height: 300,
            format: TextureFormat::B8G8R8A8_UNORM,
            usage: TextureUsage::RenderTarget,
        })
        .unwrap();
    let info = texture.info();

    assert_eq!(info.width, 300);
    assert_eq!(info.height, 300);
    assert_eq!(info.format, TextureFormat::B8G8R8A8_UNORM);
    assert_eq!(info.usage, TextureUsage::RenderTarget);
    assert_eq!(info.byte_size(), 300 * 300 * 4);
}

#[test]
fn test_soft_create_staging_texture() {
    let mut device = SoftGraphicsDevice::new(test_config());

    let texture = device
        .create_texture(TextureDesc {
            width: 64,
            height: 32,
            format: TextureFormat::R8G8B8A8_UNORM,
            usage: TextureUsage::Staging,
        })
        .unwrap();

    assert_eq!(texture.info().usage, TextureUsage::Staging);
}

#[test]
fn test_soft_textures_count_toward_stats() {
    let mut device = SoftGraphicsDevice::new(test_config());

    let _texture = device
        .create_texture(TextureDesc {
            width: 16,
            height: 16,
            format: TextureFormat::B8G8R8A8_UNORM,
            usage: TextureUsage::RenderTarget,
        })
        .unwrap();

    assert!(device.stats().bytes_allocated > 0);
}

// ============================================================================
// BUFFER TESTS
// ============================================================================

#[test]
fn test_soft_create_vertex_buffer() {
    let mut device = SoftGraphicsDevice::new(test_config());

    let buffer = device
        .create_buffer(BufferDesc {
            size: 1024,
            usage: BufferUsage::Vertex,
        })
        .unwrap();

    assert_eq!(buffer.size(), 1024);

    let data = vec![0u8; 256];
    buffer.update(0, &data).unwrap();
    buffer.update(768, &data).unwrap();
}

#[test]
fn test_soft_create_uniform_buffer() {
    let mut device = SoftGraphicsDevice::new(test_config());

    let buffer = device
        .create_buffer(BufferDesc {
            size: 112,
            usage: BufferUsage::Uniform,
        })
        .unwrap();

    let data = vec![0u8; 112];
    buffer.update(0, &data).unwrap();
}

#[test]
fn test_soft_buffer_update_past_end_fails() {
    let mut device = SoftGraphicsDevice::new(test_config());

    let buffer = device
        .create_buffer(BufferDesc {
            size: 16,
            usage: BufferUsage::Vertex,
        })
        .unwrap();

    assert!(buffer.update(8, &[0u8; 16]).is_err());
}

// ============================================================================
// PIPELINE TESTS
// ============================================================================

#[test]
fn test_soft_create_point_pipeline() {
    let mut device = SoftGraphicsDevice::new(test_config());

    let pipeline = device.create_pipeline(PipelineDesc {
        vertex_shader: Arc::new(TestShader),
        vertex_stride: TEST_STRIDE,
        topology: PrimitiveTopology::PointList,
    });

    assert!(pipeline.is_ok());
}

// ============================================================================
// COMMAND LIST TESTS
// ============================================================================

#[test]
fn test_soft_command_list_begin_end() {
    let mut device = SoftGraphicsDevice::new(test_config());

    let mut list = device.create_command_list().unwrap();
    list.begin().unwrap();
    list.end().unwrap();
}

#[test]
fn test_soft_multiple_command_lists() {
    let mut device = SoftGraphicsDevice::new(test_config());

    let mut first = device.create_command_list().unwrap();
    let mut second = device.create_command_list().unwrap();

    first.begin().unwrap();
    second.begin().unwrap();
    first.end().unwrap();
    second.end().unwrap();
}

#[test]
fn test_soft_command_list_rejects_double_begin() {
    let mut device = SoftGraphicsDevice::new(test_config());

    let mut list = device.create_command_list().unwrap();
    list.begin().unwrap();
    assert!(list.begin().is_err());
}

#[test]
fn test_soft_command_list_rejects_end_without_begin() {
    let mut device = SoftGraphicsDevice::new(test_config());

    let mut list = device.create_command_list().unwrap();
    assert!(list.end().is_err());
}

#[test]
fn test_soft_command_list_rejects_unended_render_pass() {
    let mut device = SoftGraphicsDevice::new(test_config());
    let target = device
        .create_texture(TextureDesc {
            width: 8,
            height: 8,
            format: TextureFormat::B8G8R8A8_UNORM,
            usage: TextureUsage::RenderTarget,
        })
        .unwrap();

    let mut list = device.create_command_list().unwrap();
    list.begin().unwrap();
    list.begin_render_pass(&target, [0.0; 4]).unwrap();
    assert!(list.end().is_err());
}

#[test]
fn test_soft_command_list_rejects_nested_render_pass() {
    let mut device = SoftGraphicsDevice::new(test_config());
    let target = device
        .create_texture(TextureDesc {
            width: 8,
            height: 8,
            format: TextureFormat::B8G8R8A8_UNORM,
            usage: TextureUsage::RenderTarget,
        })
        .unwrap();

    let mut list = device.create_command_list().unwrap();
    list.begin().unwrap();
    list.begin_render_pass(&target, [0.0; 4]).unwrap();
    assert!(list.begin_render_pass(&target, [0.0; 4]).is_err());
}

#[test]
fn test_soft_command_list_rebegin_discards_recording() {
    let mut device = SoftGraphicsDevice::new(test_config());
    let target = device
        .create_texture(TextureDesc {
            width: 8,
            height: 8,
            format: TextureFormat::B8G8R8A8_UNORM,
            usage: TextureUsage::RenderTarget,
        })
        .unwrap();
    let staging = device
        .create_texture(TextureDesc {
            width: 8,
            height: 8,
            format: TextureFormat::B8G8R8A8_UNORM,
            usage: TextureUsage::Staging,
        })
        .unwrap();

    // First recording clears to white
    let mut list = device.create_command_list().unwrap();
    list.begin().unwrap();
    list.begin_render_pass(&target, [1.0, 1.0, 1.0, 1.0]).unwrap();
    list.end_render_pass().unwrap();
    list.end().unwrap();

    // Re-record with a black clear and submit; the white clear must be gone
    list.begin().unwrap();
    list.begin_render_pass(&target, [0.0, 0.0, 0.0, 1.0]).unwrap();
    list.end_render_pass().unwrap();
    list.copy_texture(&target, &staging).unwrap();
    list.end().unwrap();
    device.submit(list.as_mut()).unwrap();

    let mut out = vec![0u8; 8 * 8 * 4];
    device.read_texture(&staging, &mut out).unwrap();
    for pixel in out.chunks_exact(4) {
        assert_eq!(pixel, [0, 0, 0, 255]);
    }
}

// ============================================================================
// FRAME TESTS
// ============================================================================

#[test]
fn test_soft_full_frame_draws_point() {
    let mut device = SoftGraphicsDevice::new(test_config());

    let target = device
        .create_texture(TextureDesc {
            width: 16,
            height: 16,
            format: TextureFormat::B8G8R8A8_UNORM,
            usage: TextureUsage::RenderTarget,
        })
        .unwrap();
    let staging = device
        .create_texture(TextureDesc {
            width: 16,
            height: 16,
            format: TextureFormat::B8G8R8A8_UNORM,
            usage: TextureUsage::Staging,
        })
        .unwrap();
    let buffer = device
        .create_buffer(BufferDesc {
            size: TEST_STRIDE as u64,
            usage: BufferUsage::Vertex,
        })
        .unwrap();
    buffer
        .update(0, &vertex_bytes([0.0, 0.0, 0.5], [0.0, 1.0, 0.0, 1.0]))
        .unwrap();
    let pipeline = device
        .create_pipeline(PipelineDesc {
            vertex_shader: Arc::new(TestShader),
            vertex_stride: TEST_STRIDE,
            topology: PrimitiveTopology::PointList,
        })
        .unwrap();

    let mut list = device.create_command_list().unwrap();
    list.begin().unwrap();
    list.begin_render_pass(&target, [0.0, 0.0, 0.0, 0.0]).unwrap();
    list.set_viewport(Viewport {
        x: 0.0,
        y: 0.0,
        width: 16.0,
        height: 16.0,
        min_depth: 0.0,
        max_depth: 1.0,
    })
    .unwrap();
    list.bind_pipeline(&pipeline).unwrap();
    list.bind_vertex_buffer(&buffer, 0).unwrap();
    list.draw(1, 0).unwrap();
    list.end_render_pass().unwrap();
    list.copy_texture(&target, &staging).unwrap();
    list.end().unwrap();

    device.submit(list.as_mut()).unwrap();
    device.wait_idle().unwrap();

    let mut out = vec![0u8; 16 * 16 * 4];
    device.read_texture(&staging, &mut out).unwrap();

    // Green point at the center, BGRA byte order
    let center = (8 * 16 + 8) * 4;
    assert_eq!(&out[center..center + 4], &[0, 255, 0, 255]);

    // Background stayed transparent black
    assert_eq!(&out[0..4], &[0, 0, 0, 0]);

    let stats = device.stats();
    assert_eq!(stats.draw_calls, 1);
    assert_eq!(stats.points_drawn, 1);
}

#[test]
fn test_soft_frames_are_deterministic() {
    let render = || {
        let mut device = SoftGraphicsDevice::new(test_config());

        let target = device
            .create_texture(TextureDesc {
                width: 16,
                height: 16,
                format: TextureFormat::B8G8R8A8_UNORM,
                usage: TextureUsage::RenderTarget,
            })
            .unwrap();
        let staging = device
            .create_texture(TextureDesc {
                width: 16,
                height: 16,
                format: TextureFormat::B8G8R8A8_UNORM,
                usage: TextureUsage::Staging,
            })
            .unwrap();

        let mut vertices = Vec::new();
        for i in 0..5 {
            let t = i as f32 / 5.0;
            vertices.extend_from_slice(&vertex_bytes(
                [t - 0.5, 0.5 - t, 0.5],
                [t, 1.0 - t, 0.5, 1.0],
            ));
        }
        let buffer = device
            .create_buffer(BufferDesc {
                size: vertices.len() as u64,
                usage: BufferUsage::Vertex,
            })
            .unwrap();
        buffer.update(0, &vertices).unwrap();
        let pipeline = device
            .create_pipeline(PipelineDesc {
                vertex_shader: Arc::new(TestShader),
                vertex_stride: TEST_STRIDE,
                topology: PrimitiveTopology::PointList,
            })
            .unwrap();

        let mut list = device.create_command_list().unwrap();
        list.begin().unwrap();
        list.begin_render_pass(&target, [0.1, 0.2, 0.3, 1.0]).unwrap();
        list.set_viewport(Viewport {
            x: 0.0,
            y: 0.0,
            width: 16.0,
            height: 16.0,
            min_depth: 0.0,
            max_depth: 1.0,
        })
        .unwrap();
        list.bind_pipeline(&pipeline).unwrap();
        list.bind_vertex_buffer(&buffer, 0).unwrap();
        list.draw(5, 0).unwrap();
        list.end_render_pass().unwrap();
        list.copy_texture(&target, &staging).unwrap();
        list.end().unwrap();
        device.submit(list.as_mut()).unwrap();

        let mut out = vec![0u8; 16 * 16 * 4];
        device.read_texture(&staging, &mut out).unwrap();
        out
    };

    assert_eq!(render(), render());
}
