//! Resource module
//!
//! Shader and program records, the builtin table and the uniform table.

pub mod render_parm;
pub mod uniforms;
pub mod shader;
pub mod program;
pub mod builtin;

pub use render_parm::{RenderParm, MAX_USER_PARMS};
pub use uniforms::UniformTable;
pub use shader::{ShaderIndex, ShaderRecord, ShaderStore};
pub use program::{ProgramIndex, ProgramRecord, ProgramStore};
pub use builtin::{
    BuiltinShader, BuiltinDesc, BuiltinTable,
    MAX_BUILTINS, DEFAULT_BUILTINS, default_builtins,
};
