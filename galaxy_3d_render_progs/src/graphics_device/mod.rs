/// Graphics device module - the GPU collaborator consumed by the program cache

// Module declarations
pub mod graphics_device;
pub mod shader;
pub mod program;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use shader::*;
pub use program::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
