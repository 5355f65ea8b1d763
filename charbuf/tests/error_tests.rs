use charbuf::{Bounded, CharBuf, CharBufError};

#[test]
fn test_checked_access() {
    let mut text = CharBuf::try_from_str("abc").unwrap();
    assert_eq!(text.at(2), Ok(&b'c'));
    assert_eq!(text.at(3), Err(CharBufError::OutOfRange { pos: 3, length: 3 }));

    *text.at_mut(0).unwrap() = b'A';
    assert_eq!(text, "Abc");
    assert!(text.at_mut(10).is_err());
    assert_eq!(text.get(5), None);
}

#[test]
#[should_panic]
fn test_index_past_end_panics() {
    let text = CharBuf::try_from_str("abc").unwrap();
    let _ = text[3];
}

#[test]
fn test_offsets_past_end_are_rejected() {
    let mut text = CharBuf::try_from_str("abc").unwrap();
    let out_of_range = CharBufError::OutOfRange { pos: 4, length: 3 };

    assert_eq!(text.insert(4, b'x'), Err(out_of_range.clone()));
    assert_eq!(text.insert_units(4, b"xy"), Err(out_of_range.clone()));
    assert_eq!(text.insert_n(4, 0, b'x'), Err(out_of_range.clone()));
    assert_eq!(text.erase(4, 1), Err(out_of_range.clone()));
    assert_eq!(text.substr(4, 0), Err(out_of_range));
    assert_eq!(text, "abc");
}

#[test]
fn test_failed_growth_leaves_buffer_unchanged() {
    let budget = Bounded::new(8);
    let mut text = CharBuf::<u8, _>::new_in(budget.clone());
    text.append(b"abcdefg").unwrap();

    assert!(matches!(text.push(b'h'), Err(CharBufError::Alloc(_))));
    assert!(matches!(text.insert_units(0, b"xy"), Err(CharBufError::Alloc(_))));
    assert!(matches!(text.resize(20, b'.'), Err(CharBufError::Alloc(_))));
    assert!(matches!(text.try_clone(), Err(CharBufError::Alloc(_))));

    assert_eq!(text, "abcdefg");
    assert_eq!(text.capacity(), 8);
    assert_eq!(text.as_nul_terminated(), b"abcdefg\0");
    assert_eq!(budget.live_blocks(), 1);
}

#[test]
fn test_failed_assign_keeps_target() {
    let budget = Bounded::new(14);
    let mut target = CharBuf::<u8, _>::try_from_units_in(b"keep", budget.clone()).unwrap();
    let source = CharBuf::<u8, _>::try_from_units_in(b"0123456", budget.clone()).unwrap();

    assert!(matches!(target.assign_from(&source), Err(CharBufError::Alloc(_))));
    assert_eq!(target, "keep");
    assert_eq!(budget.live_blocks(), 2);
}

#[test]
fn test_error_messages() {
    let err = CharBufError::OutOfRange { pos: 9, length: 2 };
    assert_eq!(err.to_string(), "Out of range: position 9 is outside buffer length 2");
}
