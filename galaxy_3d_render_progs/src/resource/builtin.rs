/// Builtin program registry.
///
/// Maps the renderer's well-known shader roles to program indices. The table
/// is filled once from a curated (role, file) list when the manager is
/// initialised; roles missing from the list stay unassigned and binding them
/// is a configuration error.

use std::fmt;
use crate::error::{Error, Result};
use crate::graphics_device::GraphicsDevice;
use crate::resource::{ProgramIndex, ProgramStore, ShaderStore};

// ===== ROLES =====

/// Well-known shader roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinShader {
    Gui,
    Color,
    SimpleShade,
    Textured,
    TextureVertexColor,
    TextureTexgenVertexColor,
    Interaction,
    InteractionAmbient,
    Environment,
    BumpyEnvironment,
    Depth,
    Shadow,
    ShadowDebug,
    BlendLight,
    Fog,
    Skybox,
    WobbleSky,
    PostProcess,
    StereoDeghost,
    StereoWarp,
    StereoInterlace,
    MotionBlur,
}

/// Number of builtin roles (size of the builtin table)
pub const MAX_BUILTINS: usize = 22;

// MotionBlur must stay the last role
const _: () = assert!(BuiltinShader::MotionBlur as usize + 1 == MAX_BUILTINS);

impl BuiltinShader {
    /// Every role, in table order
    pub const ALL: [BuiltinShader; MAX_BUILTINS] = [
        BuiltinShader::Gui,
        BuiltinShader::Color,
        BuiltinShader::SimpleShade,
        BuiltinShader::Textured,
        BuiltinShader::TextureVertexColor,
        BuiltinShader::TextureTexgenVertexColor,
        BuiltinShader::Interaction,
        BuiltinShader::InteractionAmbient,
        BuiltinShader::Environment,
        BuiltinShader::BumpyEnvironment,
        BuiltinShader::Depth,
        BuiltinShader::Shadow,
        BuiltinShader::ShadowDebug,
        BuiltinShader::BlendLight,
        BuiltinShader::Fog,
        BuiltinShader::Skybox,
        BuiltinShader::WobbleSky,
        BuiltinShader::PostProcess,
        BuiltinShader::StereoDeghost,
        BuiltinShader::StereoWarp,
        BuiltinShader::StereoInterlace,
        BuiltinShader::MotionBlur,
    ];

    /// Slot in the builtin table
    pub fn index(self) -> usize {
        self as usize
    }

    /// Short role name ("color", "shadow_debug")
    pub fn name(self) -> &'static str {
        match self {
            BuiltinShader::Gui => "gui",
            BuiltinShader::Color => "color",
            BuiltinShader::SimpleShade => "simple_shade",
            BuiltinShader::Textured => "textured",
            BuiltinShader::TextureVertexColor => "texture_vertex_color",
            BuiltinShader::TextureTexgenVertexColor => "texture_texgen_vertex_color",
            BuiltinShader::Interaction => "interaction",
            BuiltinShader::InteractionAmbient => "interaction_ambient",
            BuiltinShader::Environment => "environment",
            BuiltinShader::BumpyEnvironment => "bumpy_environment",
            BuiltinShader::Depth => "depth",
            BuiltinShader::Shadow => "shadow",
            BuiltinShader::ShadowDebug => "shadow_debug",
            BuiltinShader::BlendLight => "blend_light",
            BuiltinShader::Fog => "fog",
            BuiltinShader::Skybox => "skybox",
            BuiltinShader::WobbleSky => "wobble_sky",
            BuiltinShader::PostProcess => "post_process",
            BuiltinShader::StereoDeghost => "stereo_deghost",
            BuiltinShader::StereoWarp => "stereo_warp",
            BuiltinShader::StereoInterlace => "stereo_interlace",
            BuiltinShader::MotionBlur => "motion_blur",
        }
    }

    /// Role from its short name, ignoring ASCII case
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|role| role.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for BuiltinShader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ===== CURATED LIST =====

/// One entry of the curated builtin list
///
/// The same file name is used for the vertex and the fragment stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinDesc {
    pub role: BuiltinShader,
    pub file: String,
}

impl BuiltinDesc {
    pub fn new(role: BuiltinShader, file: &str) -> Self {
        Self { role, file: file.to_string() }
    }
}

/// Roles shipped with the renderer and their shader files
pub const DEFAULT_BUILTINS: &[(BuiltinShader, &str)] = &[
    (BuiltinShader::Color, "color.vfp"),
    (BuiltinShader::Textured, "texture.vfp"),
    (BuiltinShader::TextureVertexColor, "texture_color.vfp"),
    (BuiltinShader::TextureTexgenVertexColor, "texture_color_texgen.vfp"),
    (BuiltinShader::Interaction, "interaction.vfp"),
    (BuiltinShader::InteractionAmbient, "interactionAmbient.vfp"),
    (BuiltinShader::Environment, "environment.vfp"),
    (BuiltinShader::BumpyEnvironment, "bumpyEnvironment.vfp"),
    (BuiltinShader::Depth, "depth.vfp"),
    (BuiltinShader::ShadowDebug, "shadowDebug.vfp"),
    (BuiltinShader::Shadow, "shadow.vfp"),
];

/// DEFAULT_BUILTINS as owned descriptors
pub fn default_builtins() -> Vec<BuiltinDesc> {
    DEFAULT_BUILTINS.iter()
        .map(|(role, file)| BuiltinDesc::new(*role, file))
        .collect()
}

// ===== TABLE =====

/// Fixed-size role -> program index table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinTable {
    slots: [Option<ProgramIndex>; MAX_BUILTINS],
}

impl Default for BuiltinTable {
    fn default() -> Self {
        Self { slots: [None; MAX_BUILTINS] }
    }
}

impl BuiltinTable {
    /// Create a table with every role unassigned
    pub fn new() -> Self {
        Self::default()
    }

    /// Program of a role, `None` if unassigned
    pub fn get(&self, role: BuiltinShader) -> Option<ProgramIndex> {
        self.slots[role.index()]
    }

    /// Program of a role, or a configuration error if unassigned
    pub fn resolve(&self, role: BuiltinShader) -> Result<ProgramIndex> {
        self.get(role).ok_or_else(|| Error::Configuration(format!(
            "Builtin shader '{}' is not registered", role
        )))
    }

    pub fn is_assigned(&self, role: BuiltinShader) -> bool {
        self.get(role).is_some()
    }

    /// Assigned roles and their programs, in table order
    pub fn assigned(&self) -> impl Iterator<Item = (BuiltinShader, ProgramIndex)> + '_ {
        BuiltinShader::ALL.iter()
            .filter_map(|role| self.get(*role).map(|program| (*role, program)))
    }

    /// Unassign every role
    pub fn clear(&mut self) {
        self.slots = [None; MAX_BUILTINS];
    }

    /// Register, load and link every entry of `builtins`
    ///
    /// Each entry gets a vertex record, a fragment record and a program,
    /// all named after the entry's file. On an empty set of stores, entry
    /// `i` therefore lands at program index `i`. A role listed twice is a
    /// configuration error.
    pub fn populate(
        &mut self,
        builtins: &[BuiltinDesc],
        vertex_shaders: &mut ShaderStore,
        fragment_shaders: &mut ShaderStore,
        programs: &mut ProgramStore,
        device: &mut dyn GraphicsDevice,
    ) -> Result<()> {
        for desc in builtins {
            if self.is_assigned(desc.role) {
                return Err(Error::Configuration(format!(
                    "Builtin shader '{}' listed more than once", desc.role
                )));
            }

            let vertex = vertex_shaders.add(&desc.file);
            let fragment = fragment_shaders.add(&desc.file);
            let program = programs.add(&desc.file, vertex, fragment);
            self.slots[desc.role.index()] = Some(program);

            vertex_shaders.load(vertex, device)?;
            fragment_shaders.load(fragment, device)?;
            programs.load(program, vertex_shaders, fragment_shaders, device)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "builtin_tests.rs"]
mod tests;
