/// Uniform parameter backing table.
///
/// Host-side storage for every RenderParm value, one vec4 per parameter.
/// Values are written here by the renderer and uploaded to the bound program
/// by `RenderProgManager::commit_uniforms`.

use glam::Vec4;
use crate::error::{Error, Result};
use crate::resource::RenderParm;

/// Vec4 storage sized to the engine parameters plus a user budget
pub struct UniformTable {
    values: Vec<Vec4>,
}

impl UniformTable {
    /// Create a zeroed table with `user_parm_count` user slots
    pub fn new(user_parm_count: usize) -> Self {
        Self {
            values: vec![Vec4::ZERO; RenderParm::COUNT + user_parm_count],
        }
    }

    /// Number of vec4 slots
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the table has no slots
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of user parameter slots
    pub fn user_parm_count(&self) -> usize {
        self.values.len().saturating_sub(RenderParm::COUNT)
    }

    /// Set one parameter
    pub fn set(&mut self, parm: RenderParm, value: Vec4) -> Result<()> {
        let len = self.values.len();
        let slot = self.values.get_mut(parm.index())
            .ok_or_else(|| out_of_range(parm, 1, len))?;
        *slot = value;
        Ok(())
    }

    /// Set `values.len()` consecutive parameters starting at `first`
    ///
    /// Nothing is written if the range does not fit.
    pub fn set_range(&mut self, first: RenderParm, values: &[Vec4]) -> Result<()> {
        let start = first.index();
        let end = start + values.len();
        if end > self.values.len() {
            return Err(out_of_range(first, values.len(), self.values.len()));
        }
        self.values[start..end].copy_from_slice(values);
        Ok(())
    }

    /// Current value of a parameter
    pub fn get(&self, parm: RenderParm) -> Option<Vec4> {
        self.values.get(parm.index()).copied()
    }

    /// Reset every slot to zero
    pub fn clear(&mut self) {
        self.values.fill(Vec4::ZERO);
    }

    /// Whole table as packed floats (4 per parameter)
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.values)
    }

    /// Gather the values of `parms`, in order, as packed floats
    pub fn gather(&self, parms: &[RenderParm]) -> Vec<f32> {
        let gathered: Vec<Vec4> = parms.iter()
            .map(|parm| self.get(*parm).unwrap_or(Vec4::ZERO))
            .collect();
        bytemuck::cast_slice(&gathered).to_vec()
    }
}

fn out_of_range(first: RenderParm, count: usize, len: usize) -> Error {
    Error::Configuration(format!(
        "Render parm range {}..{} exceeds uniform table size {}",
        first.index(), first.index() + count, len
    ))
}

#[cfg(test)]
#[path = "uniforms_tests.rs"]
mod tests;
