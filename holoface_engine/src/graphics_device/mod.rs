/// Graphics device module - all rendering-related types and traits

// Module declarations
pub mod graphics_device;
pub mod texture;
pub mod buffer;
pub mod pipeline;
pub mod command_list;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use texture::*;
pub use buffer::*;
pub use pipeline::*;
pub use command_list::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
