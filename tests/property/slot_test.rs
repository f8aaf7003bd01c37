// tests/property/slot_test.rs

//! Property-based tests for cluster slot hashing and tracking

use proptest::prelude::*;
use typedcmds::core::cluster::slot::{NUM_SLOTS, Slot, SlotTracker, key_slot};
use typedcmds::Builder;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 100,
        max_shrink_iters: 1000,
        ..ProptestConfig::default()
    })]

    #[test]
    fn test_slot_always_in_range(key in prop::collection::vec(any::<u8>(), 0..256)) {
        prop_assert!(usize::from(key_slot(&key)) < NUM_SLOTS);
        let slot = Slot::of(&key);
        prop_assert!(!slot.is_unset());
        prop_assert!(!slot.is_cross());
    }

    #[test]
    fn test_hash_tag_pins_slot(
        tag in "[a-zA-Z0-9:_]{1,20}",
        left in "[a-zA-Z0-9:_]{0,20}",
        right in "[a-zA-Z0-9:_{}]{0,20}",
    ) {
        let key = format!("{left}{{{tag}}}{right}");
        prop_assert_eq!(key_slot(key.as_bytes()), key_slot(tag.as_bytes()));
    }

    #[test]
    fn test_tracker_single_slot_iff_all_keys_agree(
        keys in prop::collection::vec("[a-c]{1,2}", 1..8),
    ) {
        let mut tracker = SlotTracker::new();
        for key in &keys {
            tracker.observe(key.as_bytes());
        }
        let first = key_slot(keys[0].as_bytes());
        let all_same = keys.iter().all(|key| key_slot(key.as_bytes()) == first);
        if all_same {
            prop_assert_eq!(tracker.snapshot().get(), Some(first));
        } else {
            prop_assert!(tracker.snapshot().is_cross());
        }
    }

    #[test]
    fn test_raw_encoding_round_trips(slot in 0u16..16384) {
        let encoded = Slot::from_number(slot).unwrap();
        prop_assert_eq!(Slot::try_from(u32::from(encoded)).unwrap(), encoded);
        prop_assert_eq!(encoded.get(), Some(slot));
    }

    #[test]
    fn test_builder_slot_matches_tracker(
        keys in prop::collection::vec("[a-zA-Z0-9{}]{0,12}", 1..6),
    ) {
        let cmd = Builder::new().del().key(keys.clone()).build();
        let mut tracker = SlotTracker::new();
        for key in &keys {
            tracker.observe(key.as_bytes());
        }
        prop_assert_eq!(cmd.slot(), tracker.snapshot());
        prop_assert_eq!(cmd.commands().len(), keys.len() + 1);
    }
}
