use crate::{make_fitting_attribute_vector, AttributeVector, FixedWidthVector};
use test_log::test;

#[test]
fn test_width_selection() {
    assert_eq!(make_fitting_attribute_vector(4, 0).width(), 1);
    assert_eq!(make_fitting_attribute_vector(4, 255).width(), 1);
    assert_eq!(make_fitting_attribute_vector(4, 256).width(), 2);
    assert_eq!(make_fitting_attribute_vector(4, 65535).width(), 2);
    assert_eq!(make_fitting_attribute_vector(4, 65536).width(), 4);
    assert_eq!(make_fitting_attribute_vector(4, u32::MAX as usize).width(), 4);
}

#[test]
#[should_panic(expected = "wider than 32 bits")]
fn test_width_selection_overflow() {
    make_fitting_attribute_vector(1, u32::MAX as usize + 1);
}

#[test]
fn test_get_set_round_trip() {
    let mut vector = make_fitting_attribute_vector(3, 300);
    assert_eq!(vector.size(), 3);
    vector.set(0, 7);
    vector.set(2, 300);
    assert_eq!(vector.get(0), 7);
    assert_eq!(vector.get(1), 0);
    assert_eq!(vector.get(2), 300);
}

#[test]
#[should_panic(expected = "does not fit")]
fn test_code_wider_than_backing_width() {
    let mut vector = FixedWidthVector::<u8>::new(1);
    vector.set(0, 256);
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn test_out_of_range_set() {
    let mut vector = FixedWidthVector::<u16>::new(2);
    vector.set(2, 1);
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn test_out_of_range_get() {
    FixedWidthVector::<u32>::new(0).get(0);
}
