/// Uniform parameter identifiers.
///
/// A RenderParm addresses one vec4 slot of the uniform table. The engine
/// parameters come first, followed by a configurable number of user
/// parameters (`RenderParm::user(n)`). Shader sources declare the parameters
/// they read as `uniform vec4 rpXxx;`, which is how reflected uniform names
/// are mapped back to identifiers.

use std::fmt;

/// Identifier of a vec4 uniform parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RenderParm(u16);

/// Number of user parameters reserved by default
pub const MAX_USER_PARMS: usize = 8;

/// Prefix shared by every uniform name
const UNIFORM_PREFIX: &str = "rp";

/// Uniform names of the engine parameters, indexed by parameter id
const ENGINE_PARM_NAMES: [&str; RenderParm::COUNT] = [
    "ScreenCorrectionFactor",
    "WindowCoord",
    "DiffuseModifier",
    "SpecularModifier",
    "LocalLightOrigin",
    "LocalViewOrigin",
    "LightProjectionS",
    "LightProjectionT",
    "LightProjectionQ",
    "LightFalloffS",
    "BumpMatrixS",
    "BumpMatrixT",
    "DiffuseMatrixS",
    "DiffuseMatrixT",
    "SpecularMatrixS",
    "SpecularMatrixT",
    "VertexColorModulate",
    "VertexColorAdd",
    "Color",
    "ViewOrigin",
    "GlobalEyePos",
    "MVPmatrixX",
    "MVPmatrixY",
    "MVPmatrixZ",
    "MVPmatrixW",
    "ModelMatrixX",
    "ModelMatrixY",
    "ModelMatrixZ",
    "ModelMatrixW",
    "ProjectionMatrixX",
    "ProjectionMatrixY",
    "ProjectionMatrixZ",
    "ProjectionMatrixW",
    "ModelViewMatrixX",
    "ModelViewMatrixY",
    "ModelViewMatrixZ",
    "ModelViewMatrixW",
    "TextureMatrixS",
    "TextureMatrixT",
    "TexGen0S",
    "TexGen0T",
    "TexGen0Q",
    "TexGen0Enabled",
    "TexGen1S",
    "TexGen1T",
    "TexGen1Q",
    "TexGen1Enabled",
    "WobbleSkyX",
    "WobbleSkyY",
    "WobbleSkyZ",
    "Overbright",
    "EnableSkinning",
    "AlphaTest",
];

impl RenderParm {
    pub const SCREEN_CORRECTION_FACTOR: Self = Self(0);
    pub const WINDOW_COORD: Self = Self(1);
    pub const DIFFUSE_MODIFIER: Self = Self(2);
    pub const SPECULAR_MODIFIER: Self = Self(3);
    pub const LOCAL_LIGHT_ORIGIN: Self = Self(4);
    pub const LOCAL_VIEW_ORIGIN: Self = Self(5);
    pub const LIGHT_PROJECTION_S: Self = Self(6);
    pub const LIGHT_PROJECTION_T: Self = Self(7);
    pub const LIGHT_PROJECTION_Q: Self = Self(8);
    pub const LIGHT_FALLOFF_S: Self = Self(9);
    pub const BUMP_MATRIX_S: Self = Self(10);
    pub const BUMP_MATRIX_T: Self = Self(11);
    pub const DIFFUSE_MATRIX_S: Self = Self(12);
    pub const DIFFUSE_MATRIX_T: Self = Self(13);
    pub const SPECULAR_MATRIX_S: Self = Self(14);
    pub const SPECULAR_MATRIX_T: Self = Self(15);
    pub const VERTEX_COLOR_MODULATE: Self = Self(16);
    pub const VERTEX_COLOR_ADD: Self = Self(17);
    pub const COLOR: Self = Self(18);
    pub const VIEW_ORIGIN: Self = Self(19);
    pub const GLOBAL_EYE_POS: Self = Self(20);
    pub const MVP_MATRIX_X: Self = Self(21);
    pub const MVP_MATRIX_Y: Self = Self(22);
    pub const MVP_MATRIX_Z: Self = Self(23);
    pub const MVP_MATRIX_W: Self = Self(24);
    pub const MODEL_MATRIX_X: Self = Self(25);
    pub const MODEL_MATRIX_Y: Self = Self(26);
    pub const MODEL_MATRIX_Z: Self = Self(27);
    pub const MODEL_MATRIX_W: Self = Self(28);
    pub const PROJECTION_MATRIX_X: Self = Self(29);
    pub const PROJECTION_MATRIX_Y: Self = Self(30);
    pub const PROJECTION_MATRIX_Z: Self = Self(31);
    pub const PROJECTION_MATRIX_W: Self = Self(32);
    pub const MODEL_VIEW_MATRIX_X: Self = Self(33);
    pub const MODEL_VIEW_MATRIX_Y: Self = Self(34);
    pub const MODEL_VIEW_MATRIX_Z: Self = Self(35);
    pub const MODEL_VIEW_MATRIX_W: Self = Self(36);
    pub const TEXTURE_MATRIX_S: Self = Self(37);
    pub const TEXTURE_MATRIX_T: Self = Self(38);
    pub const TEXGEN_0_S: Self = Self(39);
    pub const TEXGEN_0_T: Self = Self(40);
    pub const TEXGEN_0_Q: Self = Self(41);
    pub const TEXGEN_0_ENABLED: Self = Self(42);
    pub const TEXGEN_1_S: Self = Self(43);
    pub const TEXGEN_1_T: Self = Self(44);
    pub const TEXGEN_1_Q: Self = Self(45);
    pub const TEXGEN_1_ENABLED: Self = Self(46);
    pub const WOBBLE_SKY_X: Self = Self(47);
    pub const WOBBLE_SKY_Y: Self = Self(48);
    pub const WOBBLE_SKY_Z: Self = Self(49);
    pub const OVERBRIGHT: Self = Self(50);
    pub const ENABLE_SKINNING: Self = Self(51);
    pub const ALPHA_TEST: Self = Self(52);

    /// Number of engine parameters (first user parameter id)
    pub const COUNT: usize = 53;

    /// User parameter `n`
    pub const fn user(n: u16) -> Self {
        Self((Self::COUNT as u16).saturating_add(n))
    }

    /// Parameter from its table index
    pub const fn from_index(index: usize) -> Self {
        Self(index as u16)
    }

    /// Slot in the uniform table
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// True for `RenderParm::user(_)` ids
    pub const fn is_user(self) -> bool {
        self.index() >= Self::COUNT
    }

    /// The parameter `offset` slots after this one
    pub const fn offset(self, offset: usize) -> Self {
        Self(self.0.saturating_add(offset as u16))
    }

    /// GLSL uniform name (`rpColor`, `rpUser3`)
    pub fn uniform_name(self) -> String {
        match ENGINE_PARM_NAMES.get(self.index()) {
            Some(name) => format!("{}{}", UNIFORM_PREFIX, name),
            None => format!("{}User{}", UNIFORM_PREFIX, self.index() - Self::COUNT),
        }
    }

    /// Map a reflected uniform name back to a parameter
    ///
    /// Matching is case-sensitive, like GLSL identifiers. Array suffixes
    /// (`rpUser0[0]`) are ignored.
    pub fn from_uniform_name(name: &str) -> Option<Self> {
        let name = name.split('[').next().unwrap_or(name);
        let suffix = name.strip_prefix(UNIFORM_PREFIX)?;
        if let Some(user) = suffix.strip_prefix("User") {
            return user.parse::<u16>().ok().map(Self::user);
        }
        ENGINE_PARM_NAMES.iter()
            .position(|candidate| *candidate == suffix)
            .map(Self::from_index)
    }
}

impl fmt::Display for RenderParm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uniform_name())
    }
}

#[cfg(test)]
#[path = "render_parm_tests.rs"]
mod tests;
