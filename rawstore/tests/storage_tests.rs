use rawstore::{AllocError, Bounded, Global, RawStorage};

#[test]
fn test_global_allocate_construct_destroy() {
    let slots = Global.allocate::<String>(2).unwrap();
    unsafe {
        Global.construct(slots.as_ptr(), String::from("first"));
        Global.construct(slots.as_ptr().add(1), String::from("second"));
        assert_eq!(&*slots.as_ptr().add(1), "second");
        Global.destroy(slots.as_ptr());
        Global.destroy(slots.as_ptr().add(1));
        Global.deallocate(slots, 2);
    }
}

#[test]
fn test_zero_sized_requests_skip_the_policy() {
    let budget = Bounded::new(0);

    let empty = budget.allocate::<u64>(0).unwrap();
    let units = budget.allocate::<()>(1000).unwrap();
    assert_eq!(budget.live_blocks(), 0);
    assert_eq!(budget.total_allocations(), 0);

    unsafe {
        budget.deallocate(empty, 0);
        budget.deallocate(units, 1000);
    }
    assert_eq!(budget.live_blocks(), 0);
}

#[test]
fn test_capacity_overflow() {
    let result = Global.allocate::<u64>(usize::MAX);
    assert_eq!(
        result.unwrap_err(),
        AllocError::CapacityOverflow {
            count: usize::MAX,
            elem_size: 8
        }
    );
}

#[test]
fn test_bounded_refuses_past_limit() {
    let budget = Bounded::new(16);

    let first = budget.allocate::<u32>(3).unwrap();
    assert_eq!(budget.live_bytes(), 12);
    assert_eq!(budget.remaining(), 4);

    let refused = budget.allocate::<u32>(2);
    assert_eq!(
        refused.unwrap_err(),
        AllocError::OutOfMemory { bytes: 8, align: 4 }
    );
    // A refusal leaves the counters alone
    assert_eq!(budget.live_blocks(), 1);
    assert_eq!(budget.total_allocations(), 1);

    unsafe { budget.deallocate(first, 3) };
    assert_eq!(budget.live_bytes(), 0);
    assert_eq!(budget.live_blocks(), 0);

    let second = budget.allocate::<u32>(4).unwrap();
    assert_eq!(budget.remaining(), 0);
    unsafe { budget.deallocate(second, 4) };
}

#[test]
fn test_bounded_clones_share_budget() {
    let budget = Bounded::new(32);
    let shared = budget.clone();

    let block = shared.allocate::<u8>(20).unwrap();
    assert_eq!(budget.live_bytes(), 20);
    assert!(budget.allocate::<u8>(20).is_err());

    unsafe { budget.deallocate(block, 20) };
    assert_eq!(shared.live_bytes(), 0);
    assert_eq!(shared.total_allocations(), 1);
}

#[test]
fn test_unlimited_budget_counts() {
    let budget = Bounded::unlimited();
    assert_eq!(budget.limit(), usize::MAX);

    let blocks: Vec<_> = (1..=5).map(|n| budget.allocate::<u16>(n).unwrap()).collect();
    assert_eq!(budget.live_blocks(), 5);
    assert_eq!(budget.live_bytes(), 2 * (1 + 2 + 3 + 4 + 5));

    for (n, block) in (1..=5).zip(blocks) {
        unsafe { budget.deallocate(block, n) };
    }
    assert_eq!(budget.live_blocks(), 0);
    assert_eq!(budget.total_allocations(), 5);
}

#[test]
fn test_error_messages_quality() {
    let message = format!("{}", AllocError::OutOfMemory { bytes: 40, align: 8 });
    assert!(message.contains("40 bytes"));

    let message = format!(
        "{}",
        AllocError::CapacityOverflow {
            count: 3,
            elem_size: 16
        }
    );
    assert!(message.contains("3 elements of 16 bytes"));
}

#[test]
#[should_panic(expected = "Capacity overflow")]
fn test_abort_on_capacity_overflow_panics() {
    rawstore::abort_on(AllocError::CapacityOverflow {
        count: usize::MAX,
        elem_size: 8,
    });
}
