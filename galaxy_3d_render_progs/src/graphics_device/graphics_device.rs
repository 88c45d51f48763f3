/// GraphicsDevice trait - compile, link, bind and destroy primitives

use crate::error::Result;
use crate::graphics_device::{ShaderDesc, CompiledShader, ShaderHandle, ProgramHandle};
use crate::resource::RenderParm;

/// GPU device collaborator
///
/// Implemented by the backend that owns the rendering context (GL, GLES...).
/// Every method runs synchronously on the thread that owns the context.
pub trait GraphicsDevice {
    /// Compile a shader stage from its named source
    ///
    /// # Errors
    ///
    /// Returns `Error::CompileFailed` (or any other error, which the caller
    /// reports as a compile failure) when the source is missing or invalid.
    fn compile_shader(&mut self, desc: &ShaderDesc) -> Result<CompiledShader>;

    /// Link a vertex and a fragment shader into an executable program
    ///
    /// # Arguments
    ///
    /// * `name` - Program name, for driver debug labels and error messages
    /// * `vertex` - Compiled vertex shader
    /// * `fragment` - Compiled fragment shader
    fn link_program(
        &mut self,
        name: &str,
        vertex: ShaderHandle,
        fragment: ShaderHandle,
    ) -> Result<ProgramHandle>;

    /// Make `program` active for subsequent draws, `None` deactivates
    fn use_program(&mut self, program: Option<ProgramHandle>);

    /// Destroy a compiled shader object
    fn destroy_shader(&mut self, shader: ShaderHandle);

    /// Destroy a linked program
    fn destroy_program(&mut self, program: ProgramHandle);

    /// Upload uniform values to a program
    ///
    /// `values` holds four floats per entry of `parms`, in the same order.
    fn upload_uniforms(&mut self, program: ProgramHandle, parms: &[RenderParm], values: &[f32]);
}
