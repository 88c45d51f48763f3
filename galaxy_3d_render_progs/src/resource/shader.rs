/// Shader record store.
///
/// An append-only, ordered collection of shader records for one stage. The
/// renderer keeps two of them (vertex and fragment). Records are looked up by
/// name (ASCII case-insensitive) and addressed by `ShaderIndex`, which stays
/// valid for the life of the store because records are never removed. Only
/// the compiled handle comes and goes with load/unload.

use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::graphics_device::{GraphicsDevice, ShaderDesc, ShaderHandle, ShaderStage};
use crate::resource::RenderParm;

const SOURCE: &str = "galaxy3d::ShaderStore";

// ===== INDEX =====

/// Stable index of a shader record inside its store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShaderIndex(u32);

impl ShaderIndex {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

// ===== RECORD =====

/// One named shader and its compiled state
#[derive(Debug, Clone)]
pub struct ShaderRecord {
    name: String,
    handle: Option<ShaderHandle>,
    uniforms: Vec<RenderParm>,
}

impl ShaderRecord {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            handle: None,
            uniforms: Vec::new(),
        }
    }

    /// Record name as first requested
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Compiled handle, `None` while not loaded
    pub fn handle(&self) -> Option<ShaderHandle> {
        self.handle
    }

    pub fn is_loaded(&self) -> bool {
        self.handle.is_some()
    }

    /// Parameters declared by the source, in declaration order, no duplicates
    pub fn uniforms(&self) -> &[RenderParm] {
        &self.uniforms
    }
}

// ===== STORE =====

/// Append-only shader records for one stage
pub struct ShaderStore {
    stage: ShaderStage,
    records: Vec<ShaderRecord>,
    names: FxHashMap<String, ShaderIndex>,
}

impl ShaderStore {
    /// Create an empty store for `stage`
    pub fn new(stage: ShaderStage) -> Self {
        Self {
            stage,
            records: Vec::new(),
            names: FxHashMap::default(),
        }
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record by index
    pub fn get(&self, index: ShaderIndex) -> Option<&ShaderRecord> {
        self.records.get(index.index())
    }

    /// Records with their indices, in store order
    pub fn iter(&self) -> impl Iterator<Item = (ShaderIndex, &ShaderRecord)> {
        self.records.iter()
            .enumerate()
            .map(|(i, record)| (ShaderIndex::new(i as u32), record))
    }

    /// Index of `name`, ignoring ASCII case, without loading it
    pub fn find(&self, name: &str) -> Option<ShaderIndex> {
        self.names.get(&name.to_ascii_lowercase()).copied()
    }

    /// Compiled handle of a record, `None` if unknown or not loaded
    pub fn handle(&self, index: ShaderIndex) -> Option<ShaderHandle> {
        self.get(index).and_then(ShaderRecord::handle)
    }

    pub fn is_loaded(&self, index: ShaderIndex) -> bool {
        self.handle(index).is_some()
    }

    /// Append a record for `name` without loading it
    ///
    /// Returns the existing index if the name is already known.
    pub fn add(&mut self, name: &str) -> ShaderIndex {
        if let Some(index) = self.find(name) {
            return index;
        }
        let index = ShaderIndex::new(self.records.len() as u32);
        self.records.push(ShaderRecord::new(name));
        self.names.insert(name.to_ascii_lowercase(), index);
        index
    }

    /// Find a record by name, creating it if needed, and make sure it is loaded
    ///
    /// The record is kept even if compiling it fails, so its index stays
    /// valid for a later reload.
    pub fn find_or_create(&mut self, name: &str, device: &mut dyn GraphicsDevice) -> Result<ShaderIndex> {
        let index = self.add(name);
        self.load(index, device)?;
        Ok(index)
    }

    /// Compile a record if it is not loaded yet
    pub fn load(&mut self, index: ShaderIndex, device: &mut dyn GraphicsDevice) -> Result<()> {
        let stage = self.stage;
        let record = self.record_mut(index)?;
        if record.handle.is_some() {
            return Ok(());
        }

        let desc = ShaderDesc { stage, name: &record.name };
        let compiled = device.compile_shader(&desc).map_err(|err| match err {
            Error::CompileFailed { .. } => err,
            other => Error::CompileFailed {
                stage,
                name: record.name.clone(),
                message: other.to_string(),
            },
        })?;

        let mut uniforms = Vec::with_capacity(compiled.uniforms.len());
        for uniform in &compiled.uniforms {
            match RenderParm::from_uniform_name(uniform) {
                Some(parm) if !uniforms.contains(&parm) => uniforms.push(parm),
                Some(_) => {}
                None => crate::engine_debug!(SOURCE,
                    "{:?} shader '{}': ignoring uniform '{}'", stage, record.name, uniform),
            }
        }

        crate::engine_debug!(SOURCE, "Loaded {:?} shader '{}' ({} uniforms)",
            stage, record.name, uniforms.len());
        record.handle = Some(compiled.handle);
        record.uniforms = uniforms;
        Ok(())
    }

    /// Destroy a record's compiled shader, if any
    ///
    /// The caller must make sure no program using it is bound.
    pub fn unload(&mut self, index: ShaderIndex, device: &mut dyn GraphicsDevice) -> Result<()> {
        let record = self.record_mut(index)?;
        if let Some(handle) = record.handle.take() {
            device.destroy_shader(handle);
        }
        Ok(())
    }

    /// Load every record, stopping at the first failure
    pub fn load_all(&mut self, device: &mut dyn GraphicsDevice) -> Result<()> {
        for i in 0..self.records.len() {
            self.load(ShaderIndex::new(i as u32), device)?;
        }
        Ok(())
    }

    /// Destroy every compiled shader
    pub fn unload_all(&mut self, device: &mut dyn GraphicsDevice) {
        for record in &mut self.records {
            if let Some(handle) = record.handle.take() {
                device.destroy_shader(handle);
            }
        }
    }

    fn record_mut(&mut self, index: ShaderIndex) -> Result<&mut ShaderRecord> {
        let len = self.records.len();
        let stage = self.stage;
        self.records.get_mut(index.index()).ok_or_else(|| Error::Configuration(format!(
            "{:?} shader index {} out of range ({} records)", stage, index.index(), len
        )))
    }
}

#[cfg(test)]
#[path = "shader_tests.rs"]
mod tests;
