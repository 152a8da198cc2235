/*!
# Holoface Engine - Soft Renderer Backend

CPU rasterizer implementation of the Holoface rendering engine.

This crate provides a software backend that implements the holoface_engine
device traits entirely on the CPU. Point primitives run through the bound
pipeline's vertex program, get clipped and viewport-transformed, and are
written straight into row-padded texture memory, so complete frames can be
rendered and read back without any GPU.

The backend is deterministic, which also makes it the reference device for
integration tests.
*/

// Soft rasterizer implementation modules
mod soft;
mod soft_texture;
mod soft_buffer;
mod soft_pipeline;
mod debug;

// Command recording module
mod soft_command_list;

pub use soft::SoftGraphicsDevice;

// Re-export debug utilities
pub use debug::{ValidationStats, get_validation_stats, reset_validation_stats, print_validation_stats_report};
