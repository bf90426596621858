#![cfg(feature = "std_alloc")]

use grow_arr::GrowArr;
use grow_arr::alloc::Global;
use proptest::prelude::*;

proptest! {
    #[test]
    fn push_keeps_order(values in proptest::collection::vec(any::<u32>(), 0..300)) {
        let mut arr = GrowArr::<u32, Global>::new();
        for v in &values {
            arr.push(*v).unwrap();
        }
        prop_assert_eq!(arr.len() as usize, values.len());
        prop_assert!(arr.capacity() >= arr.len());
        prop_assert_eq!(arr.as_slice(), values.as_slice());
    }

    #[test]
    fn get_space_appends_exactly(
        head in proptest::collection::vec(any::<u16>(), 0..50),
        extra in 0u32..50,
    ) {
        let mut arr = GrowArr::<u16, Global>::new();
        arr.extend_from_slice(&head).unwrap();
        let before = arr.len();

        let space = arr.get_space(extra).unwrap();
        prop_assert_eq!(space.len(), extra as usize);
        for (i, slot) in space.iter_mut().enumerate() {
            *slot = i as u16;
        }

        prop_assert_eq!(arr.len(), before + extra);
        prop_assert_eq!(&arr.as_slice()[..head.len()], head.as_slice());
        // Bulk growth never adds slack.
        prop_assert_eq!(arr.capacity(), arr.len());
    }

    #[test]
    fn shrink_to_fit_sets_capacity(len in 0u32..200, slack in 0u32..200) {
        let mut arr = GrowArr::<u64, Global>::with_capacity(len + slack).unwrap();
        for i in 0..len {
            arr.push(u64::from(i)).unwrap();
        }
        arr.shrink_to_fit().unwrap();
        prop_assert_eq!(arr.len(), len);
        prop_assert_eq!(arr.capacity(), len);
        for (i, v) in arr.iter().enumerate() {
            prop_assert_eq!(*v, i as u64);
        }
    }

    #[test]
    fn resize_keeps_prefix(len in 0u32..100, cap in 0u32..150) {
        let mut arr = GrowArr::<u32, Global>::new();
        for i in 0..len {
            arr.push(i).unwrap();
        }
        arr.resize(cap).unwrap();
        prop_assert_eq!(arr.len(), len.min(cap));
        prop_assert_eq!(arr.capacity(), cap);
        for (i, v) in arr.iter().enumerate() {
            prop_assert_eq!(*v, i as u32);
        }
    }
}

#[test]
fn release_then_reuse() {
    let mut arr = GrowArr::<u8, Global>::new();
    arr.extend_from_slice(b"hello").unwrap();
    arr.resize(0).unwrap();
    assert_eq!(arr.len(), 0);
    assert_eq!(arr.capacity(), 0);
    arr.release();
    arr.push(b'!').unwrap();
    assert_eq!(arr.as_slice(), b"!");
}
