/// Render program manager.
///
/// Owns the shader and program stores, the builtin table, the bind state and
/// the uniform table, together with the graphics device they are built on.
/// One manager is created per rendering context and passed to whatever code
/// binds programs. Everything runs on the context thread.
///
/// Lifecycle: `new` -> `init` -> [find / bind / set parms / reload] -> `shutdown`
/// (also run on drop).

use glam::Vec4;

use crate::command::{CommandFlags, CommandRegistrar};
use crate::error::{Error, Result};
use crate::graphics_device::{GraphicsDevice, ShaderStage};
use crate::render_prog::{BindState, MissingProgramPolicy, RenderProgConfig};
use crate::resource::{
    BuiltinShader, BuiltinTable, ProgramIndex, ProgramStore, RenderParm,
    ShaderIndex, ShaderStore, UniformTable,
};

const SOURCE: &str = "galaxy3d::RenderProgManager";

/// Console command running a full kill + load cycle
pub const RELOAD_SHADERS_COMMAND: &str = "reloadShaders";

/// Shader/program cache and bind-state machine for one rendering context
pub struct RenderProgManager {
    device: Box<dyn GraphicsDevice>,
    config: RenderProgConfig,
    vertex_shaders: ShaderStore,
    fragment_shaders: ShaderStore,
    programs: ProgramStore,
    builtins: BuiltinTable,
    bind_state: BindState,
    uniforms: UniformTable,
    initialized: bool,
    functional: bool,
}

impl RenderProgManager {
    /// Create an empty, uninitialised manager on top of `device`
    pub fn new<D: GraphicsDevice + 'static>(device: D, config: RenderProgConfig) -> Self {
        let uniforms = UniformTable::new(config.user_parm_count);
        Self {
            device: Box::new(device),
            config,
            vertex_shaders: ShaderStore::new(ShaderStage::Vertex),
            fragment_shaders: ShaderStore::new(ShaderStage::Fragment),
            programs: ProgramStore::new(),
            builtins: BuiltinTable::new(),
            bind_state: BindState::UNBOUND,
            uniforms,
            initialized: false,
            functional: false,
        }
    }

    /// Helper to log errors before returning them
    fn log_and_return_error(error: Error) -> Error {
        crate::engine_error!(SOURCE, "{}", error);
        error
    }

    // ===== LIFECYCLE =====

    /// Load and link the builtin programs and register console commands
    ///
    /// # Errors
    ///
    /// - `InitializationFailed` if already initialised
    /// - `Configuration` if a role is listed twice
    /// - `CompileFailed` / `LinkFailed` from the device
    ///
    /// On failure every handle created so far is destroyed and the manager
    /// stays uninitialised.
    pub fn init(&mut self, registrar: &mut dyn CommandRegistrar) -> Result<()> {
        if self.initialized {
            return Err(Self::log_and_return_error(Error::InitializationFailed(
                "RenderProgManager already initialized. Call shutdown() first.".to_string()
            )));
        }

        crate::engine_info!(SOURCE, "----- Initializing Render Shaders -----");

        self.bind_state.reset();
        self.builtins.clear();

        if let Err(err) = self.builtins.populate(
            &self.config.builtins,
            &mut self.vertex_shaders,
            &mut self.fragment_shaders,
            &mut self.programs,
            self.device.as_mut(),
        ) {
            self.kill_all_shaders();
            self.builtins.clear();
            return Err(Self::log_and_return_error(err));
        }

        self.uniforms = UniformTable::new(self.config.user_parm_count);

        if self.config.register_commands {
            registrar.add_command(RELOAD_SHADERS_COMMAND, CommandFlags::RENDERER, "reloads shaders");
        }

        self.initialized = true;
        self.functional = true;
        crate::engine_info!(SOURCE, "{} builtin programs loaded", self.builtins.assigned().count());
        Ok(())
    }

    /// Compile every shader and relink every program
    ///
    /// Used after a reload request or a context recreation. Relinking
    /// replaces every program handle, so the current program is unbound
    /// first. If anything fails, every handle is destroyed again, the
    /// manager is flagged as not functional and the error is returned.
    pub fn load_all_shaders(&mut self) -> Result<()> {
        self.unbind();
        match self.load_stores() {
            Ok(()) => {
                self.functional = true;
                crate::engine_info!(SOURCE, "Loaded {} vertex shaders, {} fragment shaders, {} programs",
                    self.vertex_shaders.len(), self.fragment_shaders.len(), self.programs.len());
                Ok(())
            }
            Err(err) => {
                self.kill_all_shaders();
                self.functional = false;
                crate::engine_error!(SOURCE, "Shader load failed, renderer has no usable programs");
                Err(Self::log_and_return_error(err))
            }
        }
    }

    fn load_stores(&mut self) -> Result<()> {
        self.vertex_shaders.load_all(self.device.as_mut())?;
        self.fragment_shaders.load_all(self.device.as_mut())?;
        self.programs.load_all(
            &mut self.vertex_shaders,
            &mut self.fragment_shaders,
            self.device.as_mut(),
        )
    }

    /// Unbind, then destroy every shader and program handle
    ///
    /// Records are kept; only their handles are reset.
    pub fn kill_all_shaders(&mut self) {
        self.unbind();
        self.vertex_shaders.unload_all(self.device.as_mut());
        self.fragment_shaders.unload_all(self.device.as_mut());
        self.programs.unload_all(self.device.as_mut());
    }

    /// Full hot-reload cycle: kill everything, then load everything
    pub fn reload_shaders(&mut self) -> Result<()> {
        crate::engine_info!(SOURCE, "Reloading shaders");
        self.kill_all_shaders();
        self.load_all_shaders()
    }

    /// Release every GPU handle
    ///
    /// Does nothing when there is nothing to release, so calling it twice is
    /// fine. `init` may be called again afterwards.
    pub fn shutdown(&mut self) {
        if !self.initialized && !self.has_live_handles() {
            return;
        }
        self.kill_all_shaders();
        self.initialized = false;
        self.functional = false;
        crate::engine_info!(SOURCE, "Render shaders shut down");
    }

    /// Run a console command owned by this manager
    ///
    /// Returns `Ok(false)` if the command is not one of ours.
    pub fn execute_command(&mut self, name: &str) -> Result<bool> {
        if !self.initialized || !self.config.register_commands {
            return Ok(false);
        }
        if name.eq_ignore_ascii_case(RELOAD_SHADERS_COMMAND) {
            self.reload_shaders()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn has_live_handles(&self) -> bool {
        self.vertex_shaders.iter().any(|(_, record)| record.is_loaded())
            || self.fragment_shaders.iter().any(|(_, record)| record.is_loaded())
            || self.programs.iter().any(|(_, record)| record.is_linked())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// False after a failed load, until a load succeeds again
    pub fn is_functional(&self) -> bool {
        self.functional
    }

    // ===== SHADERS =====

    /// Index of a vertex shader, creating and loading it if needed
    pub fn find_vertex_shader(&mut self, name: &str) -> Result<ShaderIndex> {
        self.vertex_shaders.find_or_create(name, self.device.as_mut())
            .map_err(Self::log_and_return_error)
    }

    /// Index of a fragment shader, creating and loading it if needed
    pub fn find_fragment_shader(&mut self, name: &str) -> Result<ShaderIndex> {
        self.fragment_shaders.find_or_create(name, self.device.as_mut())
            .map_err(Self::log_and_return_error)
    }

    /// Compile a vertex shader if it is not loaded
    pub fn load_vertex_shader(&mut self, index: ShaderIndex) -> Result<()> {
        self.vertex_shaders.load(index, self.device.as_mut())
            .map_err(Self::log_and_return_error)
    }

    /// Compile a fragment shader if it is not loaded
    pub fn load_fragment_shader(&mut self, index: ShaderIndex) -> Result<()> {
        self.fragment_shaders.load(index, self.device.as_mut())
            .map_err(Self::log_and_return_error)
    }

    /// Destroy a vertex shader's compiled object
    ///
    /// # Errors
    ///
    /// `InvalidResource` if the shader is part of the current bind state.
    pub fn unload_vertex_shader(&mut self, index: ShaderIndex) -> Result<()> {
        if self.bind_state.vertex() == Some(index) {
            return Err(Self::log_and_return_error(Error::InvalidResource(format!(
                "Vertex shader {} is bound, unbind before unloading it", index.index()
            ))));
        }
        self.vertex_shaders.unload(index, self.device.as_mut())
            .map_err(Self::log_and_return_error)
    }

    /// Destroy a fragment shader's compiled object
    ///
    /// # Errors
    ///
    /// `InvalidResource` if the shader is part of the current bind state.
    pub fn unload_fragment_shader(&mut self, index: ShaderIndex) -> Result<()> {
        if self.bind_state.fragment() == Some(index) {
            return Err(Self::log_and_return_error(Error::InvalidResource(format!(
                "Fragment shader {} is bound, unbind before unloading it", index.index()
            ))));
        }
        self.fragment_shaders.unload(index, self.device.as_mut())
            .map_err(Self::log_and_return_error)
    }

    // ===== PROGRAMS =====

    /// Index of the program built from this pair, registering and linking it if needed
    pub fn find_program(&mut self, name: &str, vertex: ShaderIndex, fragment: ShaderIndex) -> Result<ProgramIndex> {
        for (stage, store, index) in [
            ("vertex", &self.vertex_shaders, vertex),
            ("fragment", &self.fragment_shaders, fragment),
        ] {
            if store.get(index).is_none() {
                return Err(Self::log_and_return_error(Error::Configuration(format!(
                    "Program '{}': {} shader index {} out of range", name, stage, index.index()
                ))));
            }
        }
        let program = self.programs.add(name, vertex, fragment);
        self.load_program(program)?;
        Ok(program)
    }

    /// Link a program (loading its shaders) unless it is already linked
    pub fn load_program(&mut self, index: ProgramIndex) -> Result<()> {
        self.programs.load(
            index,
            &mut self.vertex_shaders,
            &mut self.fragment_shaders,
            self.device.as_mut(),
        ).map_err(Self::log_and_return_error)
    }

    /// Program registered for a builtin role
    pub fn builtin_program(&self, role: BuiltinShader) -> Option<ProgramIndex> {
        self.builtins.get(role)
    }

    // ===== BINDING =====

    /// Bind the program registered for a builtin role
    ///
    /// # Errors
    ///
    /// `Configuration` if the role was never registered, `InvalidResource`
    /// if its program is not linked. No device call is made in either case.
    pub fn bind_builtin(&mut self, role: BuiltinShader) -> Result<()> {
        let program = self.builtins.resolve(role).map_err(Self::log_and_return_error)?;
        let (vertex, fragment) = match self.programs.get(program) {
            Some(record) => (record.vertex(), record.fragment()),
            None => {
                return Err(Self::log_and_return_error(Error::Configuration(format!(
                    "Builtin shader '{}' maps to missing program {}", role, program.index()
                ))));
            }
        };
        if self.bind_state.matches(vertex, fragment) {
            return Ok(());
        }
        self.activate(program, vertex, fragment)
    }

    /// Bind a program by vertex/fragment pair
    ///
    /// With `program == None` the program store is scanned for the first
    /// record built from this pair. If none exists, the pair is tracked
    /// without any device call, as decided by the missing-program policy.
    pub fn bind_shader(
        &mut self,
        program: Option<ProgramIndex>,
        vertex: ShaderIndex,
        fragment: ShaderIndex,
    ) -> Result<()> {
        if self.bind_state.matches(vertex, fragment) {
            return Ok(());
        }

        let program = match program {
            Some(index) => {
                if self.programs.get(index).is_none() {
                    return Err(Self::log_and_return_error(Error::Configuration(format!(
                        "Program index {} out of range ({} programs)", index.index(), self.programs.len()
                    ))));
                }
                Some(index)
            }
            None => self.programs.find_by_pair(vertex, fragment),
        };

        match program {
            Some(index) => self.activate(index, vertex, fragment),
            None => self.handle_missing_program(vertex, fragment),
        }
    }

    /// Deactivate any program and forget the bind state
    pub fn unbind(&mut self) {
        self.bind_state.reset();
        self.device.use_program(None);
    }

    /// True if a vertex shader is tracked as bound
    pub fn is_shader_bound(&self) -> bool {
        self.bind_state.is_bound()
    }

    pub fn bind_state(&self) -> BindState {
        self.bind_state
    }

    fn activate(&mut self, program: ProgramIndex, vertex: ShaderIndex, fragment: ShaderIndex) -> Result<()> {
        let record = match self.programs.get(program) {
            Some(record) => record,
            None => {
                return Err(Self::log_and_return_error(Error::Configuration(format!(
                    "Program index {} out of range", program.index()
                ))));
            }
        };
        let handle = match record.handle() {
            Some(handle) => handle,
            None => {
                return Err(Self::log_and_return_error(Error::InvalidResource(format!(
                    "Program '{}' is not linked", record.name()
                ))));
            }
        };

        crate::engine_trace!(SOURCE, "Binding GLSL Program {}", record.name());
        self.device.use_program(Some(handle));
        self.bind_state.bind(vertex, fragment, program);
        Ok(())
    }

    fn handle_missing_program(&mut self, vertex: ShaderIndex, fragment: ShaderIndex) -> Result<()> {
        let name_of = |store: &ShaderStore, index: ShaderIndex| {
            store.get(index)
                .map(|record| record.name().to_string())
                .unwrap_or_else(|| format!("#{}", index.index()))
        };

        match self.config.missing_program_policy {
            MissingProgramPolicy::Ignore => {}
            MissingProgramPolicy::Warn => {
                crate::engine_warn!(SOURCE, "No program for vertex '{}' / fragment '{}', nothing bound",
                    name_of(&self.vertex_shaders, vertex), name_of(&self.fragment_shaders, fragment));
            }
            MissingProgramPolicy::Error => {
                return Err(Self::log_and_return_error(Error::ProgramNotFound {
                    vertex: name_of(&self.vertex_shaders, vertex),
                    fragment: name_of(&self.fragment_shaders, fragment),
                }));
            }
        }
        self.bind_state.track(vertex, fragment);
        Ok(())
    }

    // ===== UNIFORMS =====

    /// Set one uniform parameter
    pub fn set_render_parm(&mut self, parm: RenderParm, value: Vec4) -> Result<()> {
        self.uniforms.set(parm, value).map_err(Self::log_and_return_error)
    }

    /// Set consecutive uniform parameters starting at `first`
    pub fn set_render_parms(&mut self, first: RenderParm, values: &[Vec4]) -> Result<()> {
        self.uniforms.set_range(first, values).map_err(Self::log_and_return_error)
    }

    /// Current value of a uniform parameter
    pub fn render_parm(&self, parm: RenderParm) -> Option<Vec4> {
        self.uniforms.get(parm)
    }

    /// Upload the parameters used by the bound program
    ///
    /// Uploads the vertex shader's parameters followed by the fragment
    /// shader's parameters not already listed, in one device call. Does
    /// nothing when no program is bound or it uses no parameters.
    pub fn commit_uniforms(&mut self) -> Result<()> {
        let Some(program) = self.bind_state.program() else {
            return Ok(());
        };
        let Some(record) = self.programs.get(program) else {
            return Ok(());
        };
        let Some(handle) = record.handle() else {
            return Err(Self::log_and_return_error(Error::InvalidResource(format!(
                "Program '{}' is bound but not linked", record.name()
            ))));
        };

        let mut parms: Vec<RenderParm> = self.vertex_shaders.get(record.vertex())
            .map(|shader| shader.uniforms().to_vec())
            .unwrap_or_default();
        if let Some(shader) = self.fragment_shaders.get(record.fragment()) {
            for parm in shader.uniforms() {
                if !parms.contains(parm) {
                    parms.push(*parm);
                }
            }
        }
        if parms.is_empty() {
            return Ok(());
        }

        let values = self.uniforms.gather(&parms);
        self.device.upload_uniforms(handle, &parms, &values);
        Ok(())
    }

    // ===== ACCESSORS =====

    pub fn config(&self) -> &RenderProgConfig {
        &self.config
    }

    pub fn vertex_shaders(&self) -> &ShaderStore {
        &self.vertex_shaders
    }

    pub fn fragment_shaders(&self) -> &ShaderStore {
        &self.fragment_shaders
    }

    pub fn programs(&self) -> &ProgramStore {
        &self.programs
    }

    pub fn builtins(&self) -> &BuiltinTable {
        &self.builtins
    }

    pub fn uniforms(&self) -> &UniformTable {
        &self.uniforms
    }
}

impl Drop for RenderProgManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
#[path = "render_prog_manager_tests.rs"]
mod tests;
