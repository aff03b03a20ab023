use uuid::Uuid;

use crate::domain::scoring::{apply_round_awards, RoundAwards};
use crate::domain::test_state_helpers::make_session;

#[test]
fn first_and_second_place_points_are_applied() {
    let mut session = make_session(4);
    let first = session.players[1].id;
    let second = session.players[3].id;

    let deltas = apply_round_awards(&mut session, &RoundAwards::from_ranking(first, second));

    assert_eq!(deltas, vec![(first, 5), (second, 2)]);
    assert_eq!(session.player(first).unwrap().score, 5);
    assert_eq!(session.player(second).unwrap().score, 2);
    assert_eq!(session.players[0].score, 0);
}

#[test]
fn awards_accumulate_across_rounds() {
    let mut session = make_session(3);
    let winner = session.players[1].id;
    let runner_up = session.players[2].id;

    apply_round_awards(&mut session, &RoundAwards::from_ranking(winner, runner_up));
    apply_round_awards(&mut session, &RoundAwards::from_ranking(runner_up, winner));

    assert_eq!(session.player(winner).unwrap().score, 7);
    assert_eq!(session.player(runner_up).unwrap().score, 7);
}

#[test]
fn the_audience_channel_adds_one_point_when_fed() {
    let mut session = make_session(3);
    let first = session.players[1].id;
    let second = session.players[2].id;
    let awards = RoundAwards {
        first: Some(first),
        second: Some(second),
        audience: Some(second),
    };

    let deltas = apply_round_awards(&mut session, &awards);
    assert_eq!(deltas, vec![(first, 5), (second, 2), (second, 1)]);
    assert_eq!(session.player(second).unwrap().score, 3);
}

#[test]
fn empty_awards_change_nothing() {
    let mut session = make_session(3);
    let deltas = apply_round_awards(&mut session, &RoundAwards::none());
    assert!(deltas.is_empty());
    assert!(session.players.iter().all(|p| p.score == 0));
}

#[test]
fn awards_for_departed_players_are_skipped() {
    let mut session = make_session(3);
    let ghost = Uuid::new_v4();
    let second = session.players[1].id;
    let awards = RoundAwards {
        first: Some(ghost),
        second: Some(second),
        audience: None,
    };

    let deltas = apply_round_awards(&mut session, &awards);
    assert_eq!(deltas, vec![(second, 2)]);
}

#[test]
fn standings_sort_highest_first() {
    let mut session = make_session(3);
    let first = session.players[2].id;
    let second = session.players[0].id;
    apply_round_awards(&mut session, &RoundAwards::from_ranking(first, second));

    let standings = session.standings();
    assert_eq!(standings[0].0, first);
    assert_eq!(standings[0].2, 5);
    assert_eq!(standings[1].0, second);
}
