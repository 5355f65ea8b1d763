use charbuf::{Bounded, CharBuf};

#[test]
fn test_push_and_pop() {
    let mut text = CharBuf::<u8>::new();
    assert!(text.is_empty());
    assert_eq!(text.pop(), None);

    for unit in b"abc" {
        text.push(*unit).unwrap();
    }
    assert_eq!(text, "abc");
    assert_eq!(text.front(), Some(&b'a'));
    assert_eq!(text.back(), Some(&b'c'));

    assert_eq!(text.pop(), Some(b'c'));
    assert_eq!(text.len(), 2);
    assert_eq!(text.as_nul_terminated(), b"ab\0");
}

#[test]
fn test_growth_sequence() {
    let budget = Bounded::unlimited();
    let mut text = CharBuf::<u8, _>::new_in(budget.clone());
    let mut capacities = Vec::new();

    for n in 0..40u8 {
        text.push(b'a' + n % 26).unwrap();
        if capacities.last() != Some(&text.capacity()) {
            capacities.push(text.capacity());
        }
    }
    assert_eq!(capacities, [8, 16, 32, 64]);
    assert_eq!(budget.total_allocations(), 4);
    assert_eq!(budget.live_blocks(), 1);
}

#[test]
fn test_reserve_is_exact() {
    let mut text = CharBuf::<u8>::with_capacity(10).unwrap();
    assert_eq!(text.capacity(), 11);
    assert!(text.is_empty());
    assert_eq!(text.as_nul_terminated(), b"\0");

    text.reserve(5).unwrap();
    assert_eq!(text.capacity(), 11);

    text.append(b"0123456789").unwrap();
    assert_eq!(text.capacity(), 11);
    text.push(b'!').unwrap();
    assert_eq!(text.capacity(), 22);
}

#[test]
fn test_unallocated_buffer_is_terminated() {
    let text = CharBuf::<u16>::new();
    assert_eq!(text.capacity(), 0);
    assert_eq!(text.as_nul_terminated(), &[0u16]);
    assert_eq!(text.as_slice(), &[] as &[u16]);
}

#[test]
fn test_from_nul_terminated_stops_at_nul() {
    let text = CharBuf::<u8>::try_from_nul_terminated(b"abc\0def").unwrap();
    assert_eq!(text, "abc");

    let whole = CharBuf::<u8>::try_from_nul_terminated(b"abc").unwrap();
    assert_eq!(whole, "abc");
}

#[test]
fn test_concat_leaves_operands_alone() {
    let head = CharBuf::try_from_str("left").unwrap();
    let joined = head.concat(b"+right").unwrap();

    assert_eq!(head, "left");
    assert_eq!(joined, "left+right");
    assert_eq!(joined.capacity(), joined.len() + 1);
}

#[test]
fn test_append_buf_across_policies() {
    let mut text = CharBuf::try_from_str("one").unwrap();
    let other = CharBuf::try_from_units_in(b" two", Bounded::unlimited()).unwrap();

    text.append_buf(&other).unwrap();
    assert_eq!(text, "one two");
}

#[test]
fn test_resize_grows_and_shrinks() {
    let mut text = CharBuf::try_from_str("ab").unwrap();
    text.resize(5, b'.').unwrap();
    assert_eq!(text, "ab...");

    text.resize(1, b'.').unwrap();
    assert_eq!(text, "a");
    assert_eq!(text.as_nul_terminated(), b"a\0");
}

#[test]
fn test_clone_copies_exactly() {
    let mut text = CharBuf::<u8>::new();
    text.append(b"abc").unwrap();
    assert_eq!(text.capacity(), 8);

    let mut copy = text.clone();
    assert_eq!(copy.capacity(), 4);
    copy.push(b'd').unwrap();
    assert_eq!(text, "abc");
    assert_eq!(copy, "abcd");

    let empty = CharBuf::<u8>::new();
    assert_eq!(empty.clone().capacity(), 0);
}

#[test]
fn test_swap_take_and_assign() {
    let mut left = CharBuf::try_from_str("left").unwrap();
    let mut right = CharBuf::try_from_str("right").unwrap();

    left.swap_with(&mut right);
    assert_eq!(left, "right");
    assert_eq!(right, "left");

    let taken = left.take();
    assert_eq!(taken, "right");
    assert!(left.is_empty());
    assert_eq!(left.capacity(), 0);

    left.assign_from(&right).unwrap();
    assert_eq!(left, right);
    right.clear();
    assert_eq!(left, "left");
}

#[test]
fn test_ordering_and_display() {
    let apple = CharBuf::try_from_str("apple").unwrap();
    let apricot = CharBuf::try_from_str("apricot").unwrap();
    let app = CharBuf::try_from_str("app").unwrap();

    assert!(apple < apricot);
    assert!(app < apple);

    let mut broken = CharBuf::try_from_str("ok").unwrap();
    broken.push(0xff).unwrap();
    assert_eq!(broken.to_string(), "ok\u{fffd}");
    assert_eq!(format!("{broken:?}"), "\"ok\\xff\"");
}
