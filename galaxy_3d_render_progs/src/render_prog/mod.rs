//! Render program module
//!
//! The manager tying the stores together, its configuration and the
//! bind-state machine.

pub mod config;
pub mod bind_state;
pub mod render_prog_manager;

pub use config::{RenderProgConfig, MissingProgramPolicy};
pub use bind_state::BindState;
pub use render_prog_manager::{RenderProgManager, RELOAD_SHADERS_COMMAND};
