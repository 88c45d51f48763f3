/// Program store.
///
/// Ordered, append-only collection of linked programs. Each record names a
/// vertex and a fragment shader by index into their ShaderStores and owns the
/// linked program handle while it is linked.

use crate::error::{Error, Result};
use crate::graphics_device::{GraphicsDevice, ProgramHandle};
use crate::resource::{ShaderIndex, ShaderStore};

const SOURCE: &str = "galaxy3d::ProgramStore";

// ===== INDEX =====

/// Stable index of a program record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProgramIndex(u32);

impl ProgramIndex {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

// ===== RECORD =====

/// A vertex/fragment pair and its linked program
#[derive(Debug, Clone)]
pub struct ProgramRecord {
    name: String,
    vertex: ShaderIndex,
    fragment: ShaderIndex,
    handle: Option<ProgramHandle>,
}

impl ProgramRecord {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Index into the vertex ShaderStore
    pub fn vertex(&self) -> ShaderIndex {
        self.vertex
    }

    /// Index into the fragment ShaderStore
    pub fn fragment(&self) -> ShaderIndex {
        self.fragment
    }

    /// Linked handle, `None` while not linked
    pub fn handle(&self) -> Option<ProgramHandle> {
        self.handle
    }

    pub fn is_linked(&self) -> bool {
        self.handle.is_some()
    }
}

// ===== STORE =====

/// Append-only program records
#[derive(Default)]
pub struct ProgramStore {
    records: Vec<ProgramRecord>,
}

impl ProgramStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: ProgramIndex) -> Option<&ProgramRecord> {
        self.records.get(index.index())
    }

    /// Records with their indices, in store order
    pub fn iter(&self) -> impl Iterator<Item = (ProgramIndex, &ProgramRecord)> {
        self.records.iter()
            .enumerate()
            .map(|(i, record)| (ProgramIndex::new(i as u32), record))
    }

    /// Linked handle of a record, `None` if unknown or not linked
    pub fn handle(&self, index: ProgramIndex) -> Option<ProgramHandle> {
        self.get(index).and_then(ProgramRecord::handle)
    }

    /// First program (in store order) built from this vertex/fragment pair
    pub fn find_by_pair(&self, vertex: ShaderIndex, fragment: ShaderIndex) -> Option<ProgramIndex> {
        self.records.iter()
            .position(|record| record.vertex == vertex && record.fragment == fragment)
            .map(|i| ProgramIndex::new(i as u32))
    }

    /// First program with this name, ignoring ASCII case
    pub fn find_by_name(&self, name: &str) -> Option<ProgramIndex> {
        self.records.iter()
            .position(|record| record.name.eq_ignore_ascii_case(name))
            .map(|i| ProgramIndex::new(i as u32))
    }

    /// Register a vertex/fragment pair without linking it
    ///
    /// Returns the existing index if the pair is already registered.
    pub fn add(&mut self, name: &str, vertex: ShaderIndex, fragment: ShaderIndex) -> ProgramIndex {
        if let Some(index) = self.find_by_pair(vertex, fragment) {
            return index;
        }
        let index = ProgramIndex::new(self.records.len() as u32);
        self.records.push(ProgramRecord {
            name: name.to_string(),
            vertex,
            fragment,
            handle: None,
        });
        index
    }

    /// Make sure a program is linked, loading its shaders first
    ///
    /// Does nothing if the program is already linked.
    pub fn load(
        &mut self,
        index: ProgramIndex,
        vertex_shaders: &mut ShaderStore,
        fragment_shaders: &mut ShaderStore,
        device: &mut dyn GraphicsDevice,
    ) -> Result<()> {
        if self.record(index)?.handle.is_some() {
            return Ok(());
        }
        self.relink(index, vertex_shaders, fragment_shaders, device)
    }

    /// Link a program unconditionally, loading its shaders first
    ///
    /// A previous handle is destroyed only once the new link succeeded, so a
    /// failed relink keeps the old program usable.
    pub fn relink(
        &mut self,
        index: ProgramIndex,
        vertex_shaders: &mut ShaderStore,
        fragment_shaders: &mut ShaderStore,
        device: &mut dyn GraphicsDevice,
    ) -> Result<()> {
        let (vertex, fragment) = {
            let record = self.record(index)?;
            (record.vertex, record.fragment)
        };

        vertex_shaders.load(vertex, device)?;
        fragment_shaders.load(fragment, device)?;

        let record = &mut self.records[index.index()];
        let (vertex_handle, fragment_handle) = match (
            vertex_shaders.handle(vertex),
            fragment_shaders.handle(fragment),
        ) {
            (Some(v), Some(f)) => (v, f),
            _ => {
                return Err(Error::InvalidResource(format!(
                    "Program '{}' references a shader that is not loaded", record.name
                )));
            }
        };

        let linked = device.link_program(&record.name, vertex_handle, fragment_handle)
            .map_err(|err| match err {
                Error::LinkFailed { .. } => err,
                other => Error::LinkFailed {
                    program: record.name.clone(),
                    message: other.to_string(),
                },
            })?;

        if let Some(old) = record.handle.replace(linked) {
            device.destroy_program(old);
        }
        crate::engine_debug!(SOURCE, "Linked program '{}'", record.name);
        Ok(())
    }

    /// Relink every program in store order, stopping at the first failure
    pub fn load_all(
        &mut self,
        vertex_shaders: &mut ShaderStore,
        fragment_shaders: &mut ShaderStore,
        device: &mut dyn GraphicsDevice,
    ) -> Result<()> {
        for i in 0..self.records.len() {
            self.relink(ProgramIndex::new(i as u32), vertex_shaders, fragment_shaders, device)?;
        }
        Ok(())
    }

    /// Destroy one linked program, if linked
    pub fn unload(&mut self, index: ProgramIndex, device: &mut dyn GraphicsDevice) -> Result<()> {
        self.record(index)?;
        if let Some(handle) = self.records[index.index()].handle.take() {
            device.destroy_program(handle);
        }
        Ok(())
    }

    /// Destroy every linked program
    pub fn unload_all(&mut self, device: &mut dyn GraphicsDevice) {
        for record in &mut self.records {
            if let Some(handle) = record.handle.take() {
                device.destroy_program(handle);
            }
        }
    }

    fn record(&self, index: ProgramIndex) -> Result<&ProgramRecord> {
        self.records.get(index.index()).ok_or_else(|| Error::Configuration(format!(
            "Program index {} out of range ({} records)", index.index(), self.records.len()
        )))
    }
}

#[cfg(test)]
#[path = "program_tests.rs"]
mod tests;
