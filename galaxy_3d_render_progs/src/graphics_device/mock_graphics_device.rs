/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Records every call so tests can count compiles, links and binds, and can
/// be told to fail compiling or linking specific names.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};
use crate::graphics_device::{
    GraphicsDevice, ShaderDesc, ShaderStage, CompiledShader, ShaderHandle, ProgramHandle,
};
use crate::resource::RenderParm;

/// One recorded device call
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    Compile { stage: ShaderStage, name: String, handle: u32 },
    Link { name: String, vertex: u32, fragment: u32, handle: u32 },
    Use(Option<u32>),
    DestroyShader(u32),
    DestroyProgram(u32),
    Upload { program: u32, parms: Vec<RenderParm>, values: Vec<f32> },
}

/// Shared state behind every clone of a MockGraphicsDevice
#[derive(Debug, Default)]
struct MockState {
    calls: Vec<DeviceCall>,
    next_id: u32,
    fail_compile: HashSet<String>,
    fail_link: HashSet<String>,
    uniforms: HashMap<String, Vec<String>>,
}

/// Mock device that tracks calls without GPU
///
/// Cloning shares the recorded state, so a test keeps one clone while the
/// manager owns the other.
#[derive(Debug, Clone, Default)]
pub struct MockGraphicsDevice {
    state: Arc<Mutex<MockState>>,
}

impl MockGraphicsDevice {
    /// Create a new mock device
    pub fn new() -> Self {
        Self::default()
    }

    /// Make compiling `name` (any stage) fail
    pub fn fail_compile(&self, name: &str) {
        self.state.lock().unwrap().fail_compile.insert(name.to_string());
    }

    /// Make linking program `name` fail
    pub fn fail_link(&self, name: &str) {
        self.state.lock().unwrap().fail_link.insert(name.to_string());
    }

    /// Clear injected failures
    pub fn clear_failures(&self) {
        let mut state = self.state.lock().unwrap();
        state.fail_compile.clear();
        state.fail_link.clear();
    }

    /// Uniform names reported when compiling `name`
    pub fn set_uniforms(&self, name: &str, uniforms: &[&str]) {
        self.state.lock().unwrap().uniforms.insert(
            name.to_string(),
            uniforms.iter().map(|u| u.to_string()).collect(),
        );
    }

    /// All recorded calls, oldest first
    pub fn calls(&self) -> Vec<DeviceCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Forget recorded calls (handle numbering continues)
    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    /// Number of compile calls
    pub fn compile_count(&self) -> usize {
        self.count(|c| matches!(c, DeviceCall::Compile { .. }))
    }

    /// Number of link calls
    pub fn link_count(&self) -> usize {
        self.count(|c| matches!(c, DeviceCall::Link { .. }))
    }

    /// Raw handles passed to `use_program`, in call order
    pub fn use_calls(&self) -> Vec<Option<u32>> {
        self.calls().into_iter()
            .filter_map(|c| match c {
                DeviceCall::Use(handle) => Some(handle),
                _ => None,
            })
            .collect()
    }

    /// Number of destroy calls (shaders and programs)
    pub fn destroy_count(&self) -> usize {
        self.count(|c| matches!(c, DeviceCall::DestroyShader(_) | DeviceCall::DestroyProgram(_)))
    }

    fn count(&self, pred: impl Fn(&DeviceCall) -> bool) -> usize {
        self.state.lock().unwrap().calls.iter().filter(|c| pred(c)).count()
    }
}

impl MockState {
    fn next_handle(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn compile_shader(&mut self, desc: &ShaderDesc) -> Result<CompiledShader> {
        let mut state = self.state.lock().unwrap();
        if state.fail_compile.contains(desc.name) {
            return Err(Error::CompileFailed {
                stage: desc.stage,
                name: desc.name.to_string(),
                message: format!("'{}' not found", desc.source_path()),
            });
        }
        let raw = state.next_handle();
        state.calls.push(DeviceCall::Compile {
            stage: desc.stage,
            name: desc.name.to_string(),
            handle: raw,
        });
        let uniforms = state.uniforms.get(desc.name).cloned().unwrap_or_default();
        Ok(CompiledShader {
            handle: ShaderHandle::new(raw).unwrap(),
            uniforms,
        })
    }

    fn link_program(
        &mut self,
        name: &str,
        vertex: ShaderHandle,
        fragment: ShaderHandle,
    ) -> Result<ProgramHandle> {
        let mut state = self.state.lock().unwrap();
        if state.fail_link.contains(name) {
            return Err(Error::BackendError("link status GL_FALSE".to_string()));
        }
        let raw = state.next_handle();
        state.calls.push(DeviceCall::Link {
            name: name.to_string(),
            vertex: vertex.raw(),
            fragment: fragment.raw(),
            handle: raw,
        });
        Ok(ProgramHandle::new(raw).unwrap())
    }

    fn use_program(&mut self, program: Option<ProgramHandle>) {
        self.state.lock().unwrap().calls.push(DeviceCall::Use(program.map(ProgramHandle::raw)));
    }

    fn destroy_shader(&mut self, shader: ShaderHandle) {
        self.state.lock().unwrap().calls.push(DeviceCall::DestroyShader(shader.raw()));
    }

    fn destroy_program(&mut self, program: ProgramHandle) {
        self.state.lock().unwrap().calls.push(DeviceCall::DestroyProgram(program.raw()));
    }

    fn upload_uniforms(&mut self, program: ProgramHandle, parms: &[RenderParm], values: &[f32]) {
        self.state.lock().unwrap().calls.push(DeviceCall::Upload {
            program: program.raw(),
            parms: parms.to_vec(),
            values: values.to_vec(),
        });
    }
}
