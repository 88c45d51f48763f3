/// RenderProgManager configuration

use crate::resource::{BuiltinDesc, MAX_USER_PARMS, default_builtins};

/// What an explicit bind does when no program matches the requested pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingProgramPolicy {
    /// Track the pair, issue no GPU call, say nothing
    Ignore,
    /// Track the pair, issue no GPU call, log a warning
    #[default]
    Warn,
    /// Leave the bind state alone and return `Error::ProgramNotFound`
    Error,
}

/// Render program manager configuration
#[derive(Debug, Clone)]
pub struct RenderProgConfig {
    /// Curated builtin list loaded by `init`
    pub builtins: Vec<BuiltinDesc>,
    /// Number of user uniform parameters after the engine ones
    pub user_parm_count: usize,
    /// Behavior of unmatched explicit binds
    pub missing_program_policy: MissingProgramPolicy,
    /// Register the reload command during `init`
    pub register_commands: bool,
}

impl Default for RenderProgConfig {
    fn default() -> Self {
        Self {
            builtins: default_builtins(),
            user_parm_count: MAX_USER_PARMS,
            missing_program_policy: MissingProgramPolicy::default(),
            register_commands: true,
        }
    }
}
