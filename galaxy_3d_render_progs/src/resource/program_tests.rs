//! Unit tests for the program store

use super::*;
use crate::graphics_device::ShaderStage;
use crate::graphics_device::mock_graphics_device::{MockGraphicsDevice, DeviceCall};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

struct Fixture {
    device: MockGraphicsDevice,
    vertex: ShaderStore,
    fragment: ShaderStore,
    programs: ProgramStore,
}

fn fixture() -> Fixture {
    Fixture {
        device: MockGraphicsDevice::new(),
        vertex: ShaderStore::new(ShaderStage::Vertex),
        fragment: ShaderStore::new(ShaderStage::Fragment),
        programs: ProgramStore::new(),
    }
}

impl Fixture {
    fn add(&mut self, name: &str) -> ProgramIndex {
        let v = self.vertex.add(name);
        let f = self.fragment.add(name);
        self.programs.add(name, v, f)
    }

    fn load(&mut self, index: ProgramIndex) -> Result<()> {
        self.programs.load(index, &mut self.vertex, &mut self.fragment, &mut self.device)
    }
}

// ============================================================================
// REGISTRATION TESTS
// ============================================================================

#[test]
fn test_add_registers_unlinked_program() {
    let mut fx = fixture();
    let index = fx.add("color.vfp");

    assert_eq!(index, ProgramIndex::new(0));
    let record = fx.programs.get(index).unwrap();
    assert_eq!(record.name(), "color.vfp");
    assert_eq!(record.vertex(), ShaderIndex::new(0));
    assert_eq!(record.fragment(), ShaderIndex::new(0));
    assert!(!record.is_linked());
    assert!(fx.device.calls().is_empty());
}

#[test]
fn test_add_same_pair_returns_existing_index() {
    let mut fx = fixture();
    let first = fx.add("color.vfp");
    let again = fx.programs.add("other name", ShaderIndex::new(0), ShaderIndex::new(0));
    assert_eq!(first, again);
    assert_eq!(fx.programs.len(), 1);
}

#[test]
fn test_find_by_pair_first_match_wins() {
    let mut fx = fixture();
    let v = fx.vertex.add("a");
    let f = fx.fragment.add("b");
    let f2 = fx.fragment.add("c");
    let p0 = fx.programs.add("a+b", v, f);
    let p1 = fx.programs.add("a+c", v, f2);

    assert_eq!(fx.programs.find_by_pair(v, f), Some(p0));
    assert_eq!(fx.programs.find_by_pair(v, f2), Some(p1));
    assert_eq!(fx.programs.find_by_pair(f2, v), None);
    assert_eq!(fx.programs.find_by_name("A+C"), Some(p1));
}

// ============================================================================
// LINK TESTS
// ============================================================================

#[test]
fn test_load_loads_shaders_then_links() {
    let mut fx = fixture();
    let index = fx.add("color.vfp");

    fx.load(index).unwrap();

    assert!(fx.vertex.is_loaded(ShaderIndex::new(0)));
    assert!(fx.fragment.is_loaded(ShaderIndex::new(0)));
    assert!(fx.programs.get(index).unwrap().is_linked());
    let calls = fx.device.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[2], DeviceCall::Link {
        name: "color.vfp".to_string(),
        vertex: 1,
        fragment: 2,
        handle: 3,
    });
}

#[test]
fn test_load_skips_already_linked_program() {
    let mut fx = fixture();
    let index = fx.add("color.vfp");

    fx.load(index).unwrap();
    fx.load(index).unwrap();

    assert_eq!(fx.device.link_count(), 1);
}

#[test]
fn test_relink_replaces_and_destroys_old_handle() {
    let mut fx = fixture();
    let index = fx.add("color.vfp");
    fx.load(index).unwrap();
    let old = fx.programs.handle(index).unwrap();

    fx.programs.relink(index, &mut fx.vertex, &mut fx.fragment, &mut fx.device).unwrap();

    let new = fx.programs.handle(index).unwrap();
    assert_ne!(old, new);
    assert_eq!(fx.device.link_count(), 2);
    assert!(fx.device.calls().contains(&DeviceCall::DestroyProgram(old.raw())));
}

#[test]
fn test_failed_relink_keeps_old_handle() {
    let mut fx = fixture();
    let index = fx.add("color.vfp");
    fx.load(index).unwrap();
    let old = fx.programs.handle(index).unwrap();

    fx.device.fail_link("color.vfp");
    let result = fx.programs.relink(index, &mut fx.vertex, &mut fx.fragment, &mut fx.device);

    match result {
        Err(Error::LinkFailed { program, message }) => {
            assert_eq!(program, "color.vfp");
            assert!(message.contains("GL_FALSE"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(fx.programs.handle(index), Some(old));
}

#[test]
fn test_load_with_broken_shader_does_not_link() {
    let mut fx = fixture();
    fx.device.fail_compile("broken.vfp");
    let index = fx.add("broken.vfp");

    let result = fx.load(index);

    assert!(matches!(result, Err(Error::CompileFailed { .. })));
    assert_eq!(fx.device.link_count(), 0);
    assert!(!fx.programs.get(index).unwrap().is_linked());
}

#[test]
fn test_load_out_of_range_is_configuration_error() {
    let mut fx = fixture();
    let result = fx.load(ProgramIndex::new(5));
    assert!(matches!(result, Err(Error::Configuration(_))));
}

// ============================================================================
// BULK TESTS
// ============================================================================

#[test]
fn test_load_all_relinks_every_program() {
    let mut fx = fixture();
    let a = fx.add("a");
    let b = fx.add("b");
    fx.load(a).unwrap();

    fx.programs.load_all(&mut fx.vertex, &mut fx.fragment, &mut fx.device).unwrap();

    assert!(fx.programs.get(a).unwrap().is_linked());
    assert!(fx.programs.get(b).unwrap().is_linked());
    // a linked twice (load + relink), b once
    assert_eq!(fx.device.link_count(), 3);
}

#[test]
fn test_unload_all_skips_unlinked_programs() {
    let mut fx = fixture();
    let a = fx.add("a");
    fx.add("b");
    fx.load(a).unwrap();
    let handle = fx.programs.handle(a).unwrap();
    fx.device.clear_calls();

    fx.programs.unload_all(&mut fx.device);

    assert_eq!(fx.device.calls(), vec![DeviceCall::DestroyProgram(handle.raw())]);
    assert!(fx.programs.iter().all(|(_, record)| !record.is_linked()));
}

#[test]
fn test_unload_single_program() {
    let mut fx = fixture();
    let a = fx.add("a");
    fx.load(a).unwrap();

    fx.programs.unload(a, &mut fx.device).unwrap();

    assert_eq!(fx.programs.handle(a), None);
    assert!(fx.programs.unload(ProgramIndex::new(9), &mut fx.device).is_err());
}
