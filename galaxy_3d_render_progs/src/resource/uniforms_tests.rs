//! Unit tests for uniforms.rs

use super::*;

#[test]
fn test_new_table_is_zeroed_and_sized() {
    let table = UniformTable::new(8);
    assert_eq!(table.len(), RenderParm::COUNT + 8);
    assert_eq!(table.user_parm_count(), 8);
    assert_eq!(table.get(RenderParm::COLOR), Some(Vec4::ZERO));
    assert_eq!(table.get(RenderParm::user(7)), Some(Vec4::ZERO));
    assert_eq!(table.get(RenderParm::user(8)), None);
    assert!(!table.is_empty());
}

#[test]
fn test_set_and_get() {
    let mut table = UniformTable::new(0);
    table.set(RenderParm::COLOR, Vec4::new(1.0, 0.5, 0.25, 1.0)).unwrap();
    assert_eq!(table.get(RenderParm::COLOR), Some(Vec4::new(1.0, 0.5, 0.25, 1.0)));
}

#[test]
fn test_set_out_of_range_is_configuration_error() {
    let mut table = UniformTable::new(2);
    let result = table.set(RenderParm::user(2), Vec4::ONE);
    assert!(matches!(result, Err(Error::Configuration(_))));
}

#[test]
fn test_set_range_writes_consecutive_slots() {
    let mut table = UniformTable::new(0);
    let rows = [
        Vec4::new(1.0, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 1.0, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 1.0, 0.0),
        Vec4::new(0.0, 0.0, 0.0, 1.0),
    ];
    table.set_range(RenderParm::MVP_MATRIX_X, &rows).unwrap();

    assert_eq!(table.get(RenderParm::MVP_MATRIX_X), Some(rows[0]));
    assert_eq!(table.get(RenderParm::MVP_MATRIX_Y), Some(rows[1]));
    assert_eq!(table.get(RenderParm::MVP_MATRIX_Z), Some(rows[2]));
    assert_eq!(table.get(RenderParm::MVP_MATRIX_W), Some(rows[3]));
    assert_eq!(table.get(RenderParm::MODEL_MATRIX_X), Some(Vec4::ZERO));
}

#[test]
fn test_set_range_overflow_writes_nothing() {
    let mut table = UniformTable::new(1);
    let result = table.set_range(RenderParm::user(0), &[Vec4::ONE, Vec4::ONE]);
    assert!(result.is_err());
    assert_eq!(table.get(RenderParm::user(0)), Some(Vec4::ZERO));
}

#[test]
fn test_as_floats_and_gather() {
    let mut table = UniformTable::new(0);
    table.set(RenderParm::COLOR, Vec4::new(1.0, 2.0, 3.0, 4.0)).unwrap();
    table.set(RenderParm::VIEW_ORIGIN, Vec4::new(5.0, 6.0, 7.0, 8.0)).unwrap();

    let floats = table.as_floats();
    assert_eq!(floats.len(), table.len() * 4);
    let color = RenderParm::COLOR.index() * 4;
    assert_eq!(&floats[color..color + 4], &[1.0, 2.0, 3.0, 4.0]);

    let gathered = table.gather(&[RenderParm::VIEW_ORIGIN, RenderParm::COLOR]);
    assert_eq!(gathered, vec![5.0, 6.0, 7.0, 8.0, 1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_clear_resets_values() {
    let mut table = UniformTable::new(0);
    table.set(RenderParm::COLOR, Vec4::ONE).unwrap();
    table.clear();
    assert_eq!(table.get(RenderParm::COLOR), Some(Vec4::ZERO));
}
