use proptest::prelude::*;

use ballot_ledger::PollLedger;
use ballot_nullables::MemoryPollStore;
use ballot_types::{Principal, Timestamp};

fn principal(n: usize) -> Principal {
    Principal::new(format!("0xp{n:05}"))
}

proptest! {
    /// After any sequence of cast-only operations, the sum of the tallies
    /// equals the number of distinct voters — malformed payloads included,
    /// since those still count for option 0.
    #[test]
    fn sum_of_tallies_equals_total_voters(
        option_count in 1usize..=10,
        payloads in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..5), 1..40),
    ) {
        let mut ledger = PollLedger::new(MemoryPollStore::new(), Principal::new("0xowner"));
        let options = (0..option_count).map(|i| format!("o{i}")).collect();
        let id = ledger
            .create_poll(
                "prop".into(),
                String::new(),
                options,
                Timestamp::new(1_000_000),
                &principal(0),
                Timestamp::new(0),
            )
            .unwrap();

        for (n, payload) in payloads.iter().enumerate() {
            ledger
                .cast_vote(id, payload, &principal(n + 1), Timestamp::new(1 + n as u64))
                .unwrap();
            let poll = ledger.poll_info(id).unwrap();
            prop_assert_eq!(poll.tallies.iter().sum::<u64>(), poll.total_voters);
            prop_assert_eq!(poll.total_voters, n as u64 + 1);
            prop_assert_eq!(poll.tallies.len(), option_count);
        }
    }

    /// A repeat vote from any prior voter is rejected and leaves the
    /// tallies and voter count untouched.
    #[test]
    fn repeat_votes_never_counted(
        voters in 1usize..20,
        repeat_at in any::<prop::sample::Index>(),
    ) {
        let mut ledger = PollLedger::new(MemoryPollStore::new(), Principal::new("0xowner"));
        let id = ledger
            .create_poll(
                "prop".into(),
                String::new(),
                vec!["A".into(), "B".into()],
                Timestamp::new(1_000_000),
                &principal(0),
                Timestamp::new(0),
            )
            .unwrap();

        for n in 0..voters {
            ledger
                .cast_vote(id, &[0, (n % 2) as u8], &principal(n + 1), Timestamp::new(10))
                .unwrap();
        }
        let before = ledger.poll_info(id).unwrap();

        let repeat = repeat_at.index(voters) + 1;
        let result = ledger.cast_vote(id, &[0, 0], &principal(repeat), Timestamp::new(11));
        prop_assert!(result.is_err());
        prop_assert_eq!(ledger.poll_info(id).unwrap(), before);
    }
}
