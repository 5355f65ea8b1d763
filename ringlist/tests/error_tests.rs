use rawstore::AllocError;
use ringlist::{Bounded, RingList, RingListError};

#[test]
fn test_error_at_out_of_bounds() {
    let list = RingList::from_array([1, 2]).unwrap();

    assert_eq!(list.at(1), Ok(&2));
    assert_eq!(
        list.at(2),
        Err(RingListError::IndexOutOfBounds {
            index: 2,
            length: 2
        })
    );
    assert_eq!(
        list.position_of(3),
        Err(RingListError::IndexOutOfBounds {
            index: 3,
            length: 2
        })
    );
}

#[test]
fn test_error_remove_end() {
    let mut list = RingList::from_array([1]).unwrap();
    let end = list.end();

    assert_eq!(list.remove(end), Err(RingListError::PositionIsEnd));
    assert_eq!(list, [1]);
}

#[test]
fn test_error_stale_position() {
    let mut list = RingList::from_array([1, 2, 3]).unwrap();
    let two = list.position_of(1).unwrap();
    list.remove(two).unwrap();

    let stale = RingListError::InvalidPosition;
    assert_eq!(list.insert(two, 9), Err(stale.clone()));
    assert_eq!(list.remove(two), Err(stale.clone()));
    assert_eq!(list.next_of(two), Err(stale.clone()));
    assert_eq!(list.prev_of(two), Err(stale));
    assert!(list.cursor(two).is_err());
    assert_eq!(list.get(two), None);
    assert_eq!(list, [1, 3]);
}

#[test]
fn test_error_reused_node_does_not_revive_position() {
    let mut list = RingList::from_array([1, 2]).unwrap();
    let first = list.begin();
    list.pop_front().unwrap();
    assert_eq!(list.capacity(), 2);

    // The next insert takes the spare node under a new generation
    let fresh = list.push_back(7).unwrap();
    assert_eq!(list.capacity(), 2);
    assert_ne!(fresh, first);
    assert_eq!(list.get(first), None);
    assert_eq!(list.get(fresh), Some(&7));
}

#[test]
fn test_error_position_from_another_list() {
    let mut small = RingList::from_array([1]).unwrap();
    let big = RingList::from_array([1, 2, 3, 4, 5, 6]).unwrap();

    let foreign = big.prev_of(big.end()).unwrap();
    assert_eq!(small.insert(foreign, 0), Err(RingListError::InvalidPosition));
    assert_eq!(small.get(foreign), None);
    assert_eq!(small, [1]);
}

#[test]
fn test_error_own_positions_rejected_by_other_list() {
    let mut a = RingList::from_array([1, 2, 3]).unwrap();
    let mut b = RingList::from_array([4, 5]).unwrap();

    // `a`'s positions name live nodes, but none of them belongs to `b`
    let end = a.end();
    let (first, last) = (a.begin(), a.prev_of(a.end()).unwrap());
    assert_eq!(
        a.splice_range(end, &mut b, first, end),
        Err(RingListError::InvalidPosition)
    );
    assert_eq!(
        a.splice_one(end, &mut b, last),
        Err(RingListError::InvalidPosition)
    );
    assert_eq!(b.remove(first), Err(RingListError::InvalidPosition));
    assert_eq!(b.get(first), None);
    assert!(b.cursor(first).is_err());

    assert_eq!(a, [1, 2, 3]);
    assert_eq!(b, [4, 5]);
    assert_eq!(a.get(first), Some(&1));
}

#[test]
fn test_error_allocation_failure_keeps_contents() {
    let sizing_budget = Bounded::unlimited();
    let mut sizing = RingList::new_in(sizing_budget.clone());
    sizing.push_back(0u32).unwrap();
    let node_bytes = sizing_budget.live_bytes();

    let budget = Bounded::new(4 * node_bytes);
    let mut list = RingList::new_in(budget.clone());
    for n in 0..4u32 {
        list.push_back(n).unwrap();
    }

    let err = list.push_back(4).unwrap_err();
    assert!(matches!(err, RingListError::Alloc(AllocError::OutOfMemory { .. })));
    assert_eq!(list, [0, 1, 2, 3]);

    let end = list.end();
    assert!(list.insert_n(end, 2, &9).is_err());
    assert!(list.insert_with(end, || unreachable!()).is_err());
    assert!(list.try_clone().is_err());
    assert_eq!(list, [0, 1, 2, 3]);

    // Spare nodes are reused without allocating
    list.pop_front().unwrap();
    list.push_back(4).unwrap();
    assert_eq!(list, [1, 2, 3, 4]);
    assert_eq!(budget.total_allocations(), 4);
}

#[test]
fn test_error_insert_iter_rolls_back() {
    let sizing_budget = Bounded::unlimited();
    let mut sizing = RingList::new_in(sizing_budget.clone());
    sizing.push_back(0u32).unwrap();
    let node_bytes = sizing_budget.live_bytes();

    let budget = Bounded::new(4 * node_bytes);
    let mut list = RingList::new_in(budget.clone());
    list.push_back(100u32).unwrap();

    // The filter hides the length, so the fifth node fails midway
    let end = list.end();
    let result = list.insert_iter(end, (0..6u32).filter(|_| true));
    assert!(matches!(result, Err(RingListError::Alloc(_))));
    assert_eq!(list, [100]);
    assert_eq!(list.len(), 1);
}

#[test]
fn test_error_messages_quality() {
    let message = format!("{}", RingListError::InvalidPosition);
    assert!(message.contains("another list"));

    let message = format!("{}", RingListError::PositionIsEnd);
    assert!(message.contains("end"));

    let message = format!(
        "{}",
        RingListError::IndexOutOfBounds {
            index: 4,
            length: 1
        }
    );
    assert!(message.contains("index 4"));
}
