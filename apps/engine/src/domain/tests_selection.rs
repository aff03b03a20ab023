use uuid::Uuid;

use crate::domain::selection::{is_complete, progress, record_selection};
use crate::domain::state::Phase;
use crate::domain::test_state_helpers::{make_selection_state, make_session, two_cards};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

#[test]
fn the_judge_cannot_submit() {
    let mut session = make_selection_state(4);
    let judge_id = session.judge_id.unwrap();
    let err = record_selection(&mut session, judge_id, two_cards()).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::JudgeCannotSubmit, _)
    ));
    assert_eq!(session.selections.submitted_count(), 0);
}

#[test]
fn unknown_players_are_rejected() {
    let mut session = make_selection_state(4);
    let err = record_selection(&mut session, Uuid::new_v4(), two_cards()).unwrap_err();
    assert!(matches!(
        err,
        DomainError::NotFound(NotFoundKind::Player, _)
    ));
}

#[test]
fn selection_shape_must_match_blank_count() {
    let mut session = make_selection_state(4);
    let player_id = session.players[1].id;

    for cards in [vec![], vec!["one".to_string()], vec!["a".into(), "b".into(), "c".into()]] {
        let err = record_selection(&mut session, player_id, cards).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationKind::InvalidSelectionShape, _)
        ));
    }
    assert_eq!(session.selections.submitted_count(), 0);
}

#[test]
fn submissions_are_rejected_outside_card_selection() {
    let mut session = make_selection_state(4);
    session.phase = Phase::Judging;
    let player_id = session.players[1].id;
    let err = record_selection(&mut session, player_id, two_cards()).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::PhaseMismatch, _)
    ));
}

#[test]
fn resubmission_overwrites_instead_of_duplicating() {
    let mut session = make_selection_state(4);
    let player_id = session.players[1].id;

    record_selection(&mut session, player_id, two_cards()).unwrap();
    let replacement = vec!["sentient fog".to_string(), "birthday clown".to_string()];
    record_selection(&mut session, player_id, replacement.clone()).unwrap();

    assert_eq!(session.selections.submitted_count(), 1);
    let record = session.selections.record(player_id).unwrap();
    assert_eq!(record.cards, replacement);
}

#[test]
fn completeness_tracks_connected_non_judge_players() {
    let mut session = make_selection_state(4);
    let contributors: Vec<_> = session.contributors().map(|p| p.id).collect();
    assert_eq!(contributors.len(), 3);

    record_selection(&mut session, contributors[0], two_cards()).unwrap();
    record_selection(&mut session, contributors[1], two_cards()).unwrap();
    assert_eq!(progress(&session), (2, 3));
    assert!(!is_complete(&session));

    record_selection(&mut session, contributors[2], two_cards()).unwrap();
    assert!(is_complete(&session));
}

#[test]
fn a_departure_can_complete_the_phase() {
    let mut session = make_selection_state(4);
    let contributors: Vec<_> = session.contributors().map(|p| p.id).collect();

    record_selection(&mut session, contributors[0], two_cards()).unwrap();
    record_selection(&mut session, contributors[1], two_cards()).unwrap();
    assert!(!is_complete(&session));

    session.player_mut(contributors[2]).unwrap().connected = false;
    assert_eq!(progress(&session), (2, 2));
    assert!(is_complete(&session));
}

#[test]
fn lobby_sessions_have_no_selection_state() {
    let mut session = make_session(3);
    let player_id = session.players[1].id;
    let err = record_selection(&mut session, player_id, two_cards()).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::PhaseMismatch, _)
    ));
}
