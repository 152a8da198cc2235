/*!
# Holoface Engine

Core traits and types for the Holoface point-cloud face renderer.

This crate provides the backend-agnostic API for rendering an animated
holographic face into a caller-owned pixel buffer. Device access goes through
trait-based dynamic polymorphism; backend implementations (software rasterizer,
GPU backends) provide the concrete types.

## Architecture

- **GraphicsDevice**: Factory trait for creating rendering resources
- **Buffer / Texture / Pipeline**: Resource traits
- **CommandList**: Command recording trait
- **VertexShader**: Per-point vertex program trait (the face program lives here)
- **FaceRenderer**: Owns the face resources and produces one frame per call
- **Engine**: Process-wide singleton for logging and an optional global face

Backend implementations provide concrete types that implement these traits.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod camera;
pub mod graphics_device;
pub mod face;

// Main holoface namespace module
pub mod holoface {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Camera
    pub use crate::camera::FaceCamera;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: engine_* macros are NOT re-exported here - they are internal only
    }

    // Render sub-module with all device-facing types
    pub mod render {
        pub use crate::graphics_device::*;
    }

    // Face sub-module: mesh, shader, animation, drivers, renderer
    pub mod face {
        pub use crate::face::*;
    }
}

// Re-export math library at crate root
pub use glam;
