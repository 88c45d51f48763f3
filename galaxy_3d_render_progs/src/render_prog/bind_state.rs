/// Bind-state tracking.
///
/// Remembers which vertex shader, fragment shader and program are active on
/// the context so redundant binds can be skipped. Whenever `program()` is
/// `Some`, the device's active program is that record's linked handle.

use crate::resource::{ProgramIndex, ShaderIndex};

/// Currently bound shaders and program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BindState {
    vertex: Option<ShaderIndex>,
    fragment: Option<ShaderIndex>,
    program: Option<ProgramIndex>,
}

impl BindState {
    /// Nothing bound
    pub const UNBOUND: Self = Self {
        vertex: None,
        fragment: None,
        program: None,
    };

    pub fn vertex(&self) -> Option<ShaderIndex> {
        self.vertex
    }

    pub fn fragment(&self) -> Option<ShaderIndex> {
        self.fragment
    }

    pub fn program(&self) -> Option<ProgramIndex> {
        self.program
    }

    /// True when a vertex shader is tracked
    ///
    /// Only the vertex slot is looked at: after an unmatched explicit bind
    /// this reports true even though no program was activated.
    pub fn is_bound(&self) -> bool {
        self.vertex.is_some()
    }

    /// True if binding this pair again would be redundant
    pub fn matches(&self, vertex: ShaderIndex, fragment: ShaderIndex) -> bool {
        self.vertex == Some(vertex) && self.fragment == Some(fragment)
    }

    /// Record a successful program activation
    pub(crate) fn bind(&mut self, vertex: ShaderIndex, fragment: ShaderIndex, program: ProgramIndex) {
        self.vertex = Some(vertex);
        self.fragment = Some(fragment);
        self.program = Some(program);
    }

    /// Record a requested pair for which nothing was activated
    ///
    /// The program slot is left alone: the device still runs it.
    pub(crate) fn track(&mut self, vertex: ShaderIndex, fragment: ShaderIndex) {
        self.vertex = Some(vertex);
        self.fragment = Some(fragment);
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::UNBOUND;
    }
}

#[cfg(test)]
#[path = "bind_state_tests.rs"]
mod tests;
