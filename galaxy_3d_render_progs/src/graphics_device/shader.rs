/// Shader stage, compile descriptor and compiled shader handle

use std::num::NonZeroU32;

/// Shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment/Pixel shader
    Fragment,
}

impl ShaderStage {
    /// File extension of the GLSL source for this stage
    pub fn extension(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "pixel",
        }
    }
}

/// Directory holding the GLSL sources, relative to the game data root
pub const SHADER_SOURCE_DIR: &str = "renderprogs/glsl";

/// Descriptor for compiling a shader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderDesc<'a> {
    /// Shader stage
    pub stage: ShaderStage,
    /// Shader record name (e.g. "interaction.vfp")
    pub name: &'a str,
}

impl ShaderDesc<'_> {
    /// Path of the source file the loader should read
    ///
    /// The `.vfp` suffix is replaced by the stage extension:
    /// `color.vfp` -> `renderprogs/glsl/color.vertex`.
    pub fn source_path(&self) -> String {
        let base = self.name.strip_suffix(".vfp").unwrap_or(self.name);
        format!("{}/{}.{}", SHADER_SOURCE_DIR, base, self.stage.extension())
    }
}

/// Opaque handle of a compiled shader object
///
/// Zero is never a valid handle; "not loaded" is `Option::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(NonZeroU32);

impl ShaderHandle {
    /// Wrap a raw device id, `None` for 0
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// Raw device id
    pub fn raw(self) -> u32 {
        self.0.get()
    }
}

/// Result of a successful compile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledShader {
    /// Device handle of the shader object
    pub handle: ShaderHandle,
    /// Uniform names declared by the source, in declaration order
    pub uniforms: Vec<String>,
}
