//! Unit tests for BindState

use super::*;

fn v(i: u32) -> ShaderIndex {
    ShaderIndex::new(i)
}

#[test]
fn test_default_is_unbound() {
    let state = BindState::default();
    assert_eq!(state, BindState::UNBOUND);
    assert!(!state.is_bound());
    assert_eq!(state.program(), None);
}

#[test]
fn test_bind_records_all_slots() {
    let mut state = BindState::default();
    state.bind(v(1), v(2), ProgramIndex::new(3));

    assert!(state.is_bound());
    assert_eq!(state.vertex(), Some(v(1)));
    assert_eq!(state.fragment(), Some(v(2)));
    assert_eq!(state.program(), Some(ProgramIndex::new(3)));
}

#[test]
fn test_matches_needs_both_shaders() {
    let mut state = BindState::default();
    assert!(!state.matches(v(0), v(0)));

    state.bind(v(1), v(2), ProgramIndex::new(0));
    assert!(state.matches(v(1), v(2)));
    assert!(!state.matches(v(1), v(3)));
    assert!(!state.matches(v(2), v(1)));
}

#[test]
fn test_track_keeps_previous_program() {
    let mut state = BindState::default();
    state.bind(v(0), v(0), ProgramIndex::new(4));

    state.track(v(5), v(9));

    assert!(state.is_bound());
    assert!(state.matches(v(5), v(9)));
    assert_eq!(state.program(), Some(ProgramIndex::new(4)));
}

#[test]
fn test_track_from_unbound_reports_bound() {
    let mut state = BindState::default();
    state.track(v(5), v(9));
    assert!(state.is_bound());
    assert_eq!(state.program(), None);
}

#[test]
fn test_reset() {
    let mut state = BindState::default();
    state.bind(v(1), v(1), ProgramIndex::new(1));
    state.reset();
    assert_eq!(state, BindState::UNBOUND);
}
