//! Property tests for judge rotation (pure domain, no timers).
//!
//! Rotation contract:
//! - Each round's judge is drawn from players who have not judged in the
//!   current cycle; the cycle resets only once everyone has judged.
//! - Within one full cycle of n players, no judge repeats.

use std::collections::HashSet;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::judge::rotate_judge;
use crate::domain::test_prelude;
use crate::domain::test_state_helpers::make_session;

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Within each full cycle, every player judges exactly once.
    #[test]
    fn prop_no_repeat_within_a_cycle(
        player_count in 2usize..=8,
        cycles in 1usize..=3,
        seed in any::<u64>(),
    ) {
        let mut session = make_session(player_count);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let all_ids: HashSet<_> = session.players.iter().map(|p| p.id).collect();

        for _cycle in 0..cycles {
            let mut seen = HashSet::new();
            for _round in 0..player_count {
                let judge = rotate_judge(&mut session, &mut rng).unwrap();
                prop_assert!(all_ids.contains(&judge), "judge must be a player");
                prop_assert!(seen.insert(judge), "judge repeated within a cycle");
            }
            prop_assert_eq!(&seen, &all_ids, "cycle must cover every player");
        }
    }

    /// The session always tracks the most recent judge.
    #[test]
    fn prop_judge_id_tracks_rotation(
        player_count in 2usize..=6,
        rounds in 1usize..=12,
        seed in any::<u64>(),
    ) {
        let mut session = make_session(player_count);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for _ in 0..rounds {
            let judge = rotate_judge(&mut session, &mut rng).unwrap();
            prop_assert_eq!(session.judge_id, Some(judge));
        }
    }
}

#[test]
fn disconnected_players_are_skipped() {
    let mut session = make_session(4);
    let absent = session.players[2].id;
    session.players[2].connected = false;

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..12 {
        let judge = rotate_judge(&mut session, &mut rng).unwrap();
        assert_ne!(judge, absent);
    }
}
