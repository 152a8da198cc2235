/// Face module - procedural point-cloud face: mesh, vertex program,
/// animation state, autonomous drivers, and the frame renderer

// Module declarations
pub mod config;
pub mod mesh;
pub mod shader;
pub mod animation;
pub mod drivers;
pub mod renderer;

// Re-export from all modules
pub use config::*;
pub use mesh::*;
pub use shader::*;
pub use animation::*;
pub use drivers::*;
pub use renderer::*;
