use proptest::prelude::*;

use ballot_types::{encode_choice, resolve_choice, Poll, PollId, Principal, Timestamp};

proptest! {
    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// A deadline has passed exactly when now >= deadline.
    #[test]
    fn timestamp_has_passed_agrees_with_comparison(d in 0u64..u64::MAX, n in 0u64..u64::MAX) {
        prop_assert_eq!(Timestamp::new(d).has_passed(Timestamp::new(n)), n >= d);
    }

    /// elapsed_since saturates to 0 when now is earlier.
    #[test]
    fn timestamp_elapsed_since(base in 0u64..1_000_000, offset in 0u64..1_000_000) {
        let t = Timestamp::new(base);
        prop_assert_eq!(t.elapsed_since(Timestamp::new(base + offset)), offset);
        prop_assert_eq!(Timestamp::new(base + offset).elapsed_since(t), 0);
    }

    /// Choice codec roundtrip: an in-range index survives encode -> resolve.
    #[test]
    fn choice_roundtrip_in_range(index in 0u16..1000, extra in 0usize..100) {
        let option_count = index as usize + 1 + extra;
        prop_assert_eq!(resolve_choice(&encode_choice(index), option_count), index as usize);
    }

    /// Any payload whatsoever resolves to a valid index for a non-empty
    /// option list — the decode path cannot produce an out-of-range vote.
    #[test]
    fn choice_always_in_range(payload in prop::collection::vec(any::<u8>(), 0..8),
                              option_count in 1usize..=10) {
        let resolved = resolve_choice(&payload, option_count);
        prop_assert!(resolved < option_count);
    }

    /// Malformed payloads (wrong length) always resolve to 0.
    #[test]
    fn malformed_payload_resolves_to_zero(payload in prop::collection::vec(any::<u8>(), 0..8),
                                          option_count in 1usize..=10) {
        prop_assume!(payload.len() != 2);
        prop_assert_eq!(resolve_choice(&payload, option_count), 0);
    }

    /// PollId bincode roundtrip.
    #[test]
    fn poll_id_bincode_roundtrip(id in any::<u64>()) {
        let encoded = bincode::serialize(&PollId::new(id)).unwrap();
        let decoded: PollId = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded.as_u64(), id);
    }

    /// Poll record bincode roundtrip preserves every field.
    #[test]
    fn poll_bincode_roundtrip(
        title in "[a-zA-Z ]{1,32}",
        options in prop::collection::vec("[a-zA-Z]{1,8}", 1..=10),
        deadline in 0u64..u64::MAX,
        voters in 0u64..1_000_000,
    ) {
        let tallies = vec![0u64; options.len()];
        let poll = Poll {
            title,
            description: String::new(),
            options,
            deadline: Timestamp::new(deadline),
            total_voters: voters,
            is_active: true,
            is_revealed: voters > 0,
            creator: Principal::new("0xcreator"),
            tallies,
            created_at: Timestamp::EPOCH,
        };
        let encoded = bincode::serialize(&poll).unwrap();
        let decoded: Poll = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, poll);
    }
}
