/// Linked program handle

use std::num::NonZeroU32;

/// Opaque handle of a linked program
///
/// Zero is reserved by the device for "no program"; unbinding is expressed
/// as `use_program(None)` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(NonZeroU32);

impl ProgramHandle {
    /// Wrap a raw device id, `None` for 0
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// Raw device id
    pub fn raw(self) -> u32 {
        self.0.get()
    }
}
