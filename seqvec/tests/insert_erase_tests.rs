use seqvec::SeqVec;

#[test]
fn test_insert_in_middle() {
    let mut seq = SeqVec::from_array([1, 2, 3]).unwrap();

    seq.insert(1, 4).unwrap();

    assert_eq!(seq, [1, 4, 2, 3]);
    assert_eq!(seq.len(), 4);
}

#[test]
fn test_insert_at_both_ends() {
    let mut seq = SeqVec::new();
    seq.insert(0, 2).unwrap();
    seq.insert(0, 1).unwrap();
    seq.insert(2, 3).unwrap();

    assert_eq!(seq, [1, 2, 3]);
}

#[test]
fn test_insert_grows_full_sequence() {
    let mut seq = SeqVec::with_capacity(2).unwrap();
    seq.push(String::from("a")).unwrap();
    seq.push(String::from("c")).unwrap();
    assert_eq!(seq.capacity(), 2);

    seq.insert(1, String::from("b")).unwrap();

    assert_eq!(seq.capacity(), 4);
    assert_eq!(seq, ["a", "b", "c"]);
}

#[test]
fn test_insert_n() {
    let mut seq = SeqVec::from_array([1, 5]).unwrap();

    seq.insert_n(1, 3, &0).unwrap();
    assert_eq!(seq, [1, 0, 0, 0, 5]);

    seq.insert_n(5, 0, &9).unwrap();
    assert_eq!(seq.len(), 5);
}

#[test]
fn test_insert_slice_and_iter() {
    let mut seq = SeqVec::from_array([1, 6]).unwrap();

    seq.insert_slice(1, &[2, 3]).unwrap();
    seq.insert_iter(3, vec![4, 5]).unwrap();

    assert_eq!(seq, [1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_insert_iter_with_short_iterator_closes_gap() {
    struct Liar {
        items: std::vec::IntoIter<i32>,
    }
    impl Iterator for Liar {
        type Item = i32;
        fn next(&mut self) -> Option<i32> {
            self.items.next()
        }
        fn size_hint(&self) -> (usize, Option<usize>) {
            (4, Some(4))
        }
    }
    impl ExactSizeIterator for Liar {}

    let mut seq = SeqVec::from_array([1, 9]).unwrap();
    seq.insert_iter(
        1,
        Liar {
            items: vec![2, 3].into_iter(),
        },
    )
    .unwrap();

    assert_eq!(seq, [1, 2, 3, 9]);
}

#[test]
fn test_remove() {
    let mut seq = SeqVec::from_array([10, 20, 30]).unwrap();

    assert_eq!(seq.remove(1).unwrap(), 20);
    assert_eq!(seq, [10, 30]);

    assert_eq!(seq.remove(1).unwrap(), 30);
    assert_eq!(seq.remove(0).unwrap(), 10);
    assert!(seq.is_empty());
}

#[test]
fn test_erase_range() {
    let mut seq = SeqVec::from_array([0, 1, 2, 3, 4, 5, 6]).unwrap();

    seq.erase(2..5).unwrap();
    assert_eq!(seq, [0, 1, 5, 6]);

    seq.erase(1..1).unwrap();
    assert_eq!(seq.len(), 4);

    seq.erase(..=1).unwrap();
    assert_eq!(seq, [5, 6]);

    seq.erase(..).unwrap();
    assert!(seq.is_empty());
}

#[test]
fn test_erase_drops_exactly_the_range() {
    use std::rc::Rc;

    let marker = Rc::new(());
    let mut seq = SeqVec::new();
    for _ in 0..6 {
        seq.push(Rc::clone(&marker)).unwrap();
    }
    assert_eq!(Rc::strong_count(&marker), 7);

    seq.erase(1..4).unwrap();
    assert_eq!(Rc::strong_count(&marker), 4);

    drop(seq);
    assert_eq!(Rc::strong_count(&marker), 1);
}

#[test]
fn test_insert_then_erase_round_trip() {
    let mut seq = SeqVec::try_from_slice(&["x", "y"]).unwrap();
    seq.insert_slice(1, &["a", "b", "c"]).unwrap();
    seq.erase(1..4).unwrap();

    assert_eq!(seq, ["x", "y"]);
}
