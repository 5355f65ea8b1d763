use seqvec::{Bounded, SeqVec};

#[test]
fn test_empty_construction() {
    let seq: SeqVec<i32> = SeqVec::new();

    assert_eq!(seq.len(), 0);
    assert!(seq.is_empty());
    assert_eq!(seq.capacity(), 0);
    assert_eq!(seq.front(), None);
    assert_eq!(seq.back(), None);
}

#[test]
fn test_push_and_index() {
    let mut seq = SeqVec::new();
    seq.push(1).unwrap();
    seq.push(2).unwrap();
    seq.push(3).unwrap();

    assert!(!seq.is_empty());
    assert_eq!(seq.len(), 3);
    assert!(seq.capacity() >= 3);
    assert_eq!(seq[0], 1);
    assert_eq!(seq[1], 2);
    assert_eq!(seq[2], 3);
    assert_eq!(seq.front(), Some(&1));
    assert_eq!(seq.back(), Some(&3));
}

#[test]
fn test_pop_operation() {
    let mut seq = SeqVec::from_array([1, 2, 3]).unwrap();

    assert_eq!(seq.pop(), Some(3));
    assert_eq!(seq, [1, 2]);

    assert_eq!(seq.pop(), Some(2));
    assert_eq!(seq.pop(), Some(1));
    assert!(seq.is_empty());

    // Popping an empty sequence is a no-op
    assert_eq!(seq.pop(), None);
    assert_eq!(seq.len(), 0);
}

#[test]
fn test_pop_back_then_front_keeps_order() {
    let mut seq = SeqVec::from_array([1, 2, 3, 4, 5]).unwrap();

    seq.pop().unwrap();
    seq.remove(0).unwrap();

    assert_eq!(seq.len(), 3);
    assert_eq!(seq, [2, 3, 4]);
}

#[test]
fn test_amortized_doubling() {
    let budget = Bounded::unlimited();
    let mut seq = SeqVec::new_in(budget.clone());

    for n in 1..=1000usize {
        seq.push(n).unwrap();
        assert_eq!(seq.len(), n);
        assert!(seq.capacity() >= n);
        // ceil(log2 n) + 1 reallocations for n pushes
        let expected = n.next_power_of_two().trailing_zeros() as usize + 1;
        assert_eq!(budget.total_allocations(), expected);
    }
    assert_eq!(seq.capacity(), 1024);
}

#[test]
fn test_reserve_is_exact_and_monotonic() {
    let mut seq: SeqVec<u64> = SeqVec::new();

    seq.reserve(10).unwrap();
    assert_eq!(seq.capacity(), 10);

    seq.reserve(3).unwrap();
    assert_eq!(seq.capacity(), 10);

    seq.extend_from_slice(&[1, 2, 3]).unwrap();
    seq.reserve(17).unwrap();
    assert_eq!(seq.capacity(), 17);
    assert_eq!(seq, [1, 2, 3]);
}

#[test]
fn test_clear_twice() {
    let mut seq = SeqVec::from_array([String::from("a"), String::from("b")]).unwrap();
    let capacity = seq.capacity();

    seq.clear();
    assert_eq!(seq.len(), 0);
    seq.clear();
    assert_eq!(seq.len(), 0);

    // Storage is kept for reuse
    assert_eq!(seq.capacity(), capacity);
}

#[test]
fn test_truncate() {
    let mut seq = SeqVec::from_array([1, 2, 3, 4]).unwrap();

    seq.truncate(10);
    assert_eq!(seq.len(), 4);

    seq.truncate(1);
    assert_eq!(seq, [1]);
}

#[test]
fn test_copy_is_independent() {
    let mut original = SeqVec::from_array([10, 20]).unwrap();
    let mut copy = original.clone();

    assert_eq!(original, copy);

    copy.push(30).unwrap();
    assert_ne!(original, copy);
    assert_eq!(original, [10, 20]);

    original[0] = 11;
    assert_eq!(copy, [10, 20, 30]);
}

#[test]
fn test_move_leaves_empty_source() {
    let mut source = SeqVec::from_array([100, 200]).unwrap();
    let moved = source.take();

    assert_eq!(moved, [100, 200]);
    assert!(source.is_empty());
    assert_eq!(source.capacity(), 0);

    // The source stays usable
    source.push(1).unwrap();
    assert_eq!(source, [1]);
}

#[test]
fn test_assign_from() {
    let source = SeqVec::from_array([1, 2, 3]).unwrap();
    let mut target = SeqVec::from_array([9]).unwrap();

    target.assign_from(&source).unwrap();
    assert_eq!(target, source);

    target.push(4).unwrap();
    assert_eq!(source.len(), 3);
}

#[test]
fn test_swap_with() {
    let mut left = SeqVec::from_array([1, 2, 3]).unwrap();
    let mut right = SeqVec::from_array([7]).unwrap();
    let left_ptr = left.as_ptr();

    left.swap_with(&mut right);

    assert_eq!(left, [7]);
    assert_eq!(right, [1, 2, 3]);
    // No element was copied
    assert_eq!(right.as_ptr(), left_ptr);
}

#[test]
fn test_equality_and_ordering() {
    let a = SeqVec::from_array([1, 2, 3]).unwrap();
    let b = SeqVec::try_from_slice(&[1, 2, 3]).unwrap();
    let c = SeqVec::from_array([1, 2, 4]).unwrap();
    let d = SeqVec::from_array([1, 2]).unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(a < c);
    assert!(d < a);
    assert_eq!(a.cmp(&b), std::cmp::Ordering::Equal);
    assert_eq!(a, &[1, 2, 3][..]);
}

#[test]
fn test_zero_sized_elements() {
    let mut seq = SeqVec::new();
    for _ in 0..100 {
        seq.push(()).unwrap();
    }
    assert_eq!(seq.len(), 100);
    seq.erase(10..90).unwrap();
    assert_eq!(seq.len(), 20);
}

#[test]
fn test_debug_format() {
    let seq = SeqVec::from_array([1, 2]).unwrap();
    assert_eq!(format!("{seq:?}"), "[1, 2]");
}
