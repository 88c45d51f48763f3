/*!
# Galaxy 3D Render Programs

Shader and GPU program cache for the Galaxy 3D renderer.

The crate loads vertex/fragment shaders by name, links them into programs,
keeps them in append-only stores addressed by stable indices, binds the
active program before draws while skipping redundant binds, and tears
everything down on reload or shutdown.

## Architecture

- **GraphicsDevice**: trait implemented by the backend (compile, link, bind, destroy)
- **ShaderStore**: vertex or fragment shader records, looked up by name
- **ProgramStore**: linked vertex/fragment pairs
- **BuiltinTable**: well-known roles (color, depth, shadow...) to programs
- **BindState**: what is currently active on the context
- **RenderProgManager**: owns all of the above and drives the lifecycle
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod command;
pub mod graphics_device;
pub mod resource;
pub mod render_prog;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging facade
    pub use crate::engine::Engine;

    // Program cache entry point
    pub use crate::render_prog::{
        RenderProgManager, RenderProgConfig, MissingProgramPolicy, BindState,
        RELOAD_SHADERS_COMMAND,
    };

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Device collaborator
    pub mod device {
        pub use crate::graphics_device::*;
    }

    // Console commands
    pub mod command {
        pub use crate::command::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }
}

// Re-export math library at crate root
pub use glam;
