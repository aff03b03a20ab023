use crate::domain::phase::{can_transition, require_phase, transition};
use crate::domain::state::Phase;
use crate::domain::test_state_helpers::make_session;
use crate::errors::domain::{DomainError, ValidationKind};

const ALL_PHASES: [Phase; 6] = [
    Phase::Lobby,
    Phase::RoundIntro,
    Phase::CardSelection,
    Phase::Judging,
    Phase::Results,
    Phase::Completed,
];

#[test]
fn the_happy_path_is_in_the_table() {
    let mut session = make_session(3);
    for to in [
        Phase::RoundIntro,
        Phase::CardSelection,
        Phase::Judging,
        Phase::Results,
        Phase::RoundIntro,
    ] {
        transition(&mut session, to).unwrap();
        assert_eq!(session.phase, to);
    }
    transition(&mut session, Phase::CardSelection).unwrap();
    transition(&mut session, Phase::Judging).unwrap();
    transition(&mut session, Phase::Results).unwrap();
    transition(&mut session, Phase::Completed).unwrap();
}

#[test]
fn transitions_outside_the_table_fail_and_leave_phase_unchanged() {
    for from in ALL_PHASES {
        for to in ALL_PHASES {
            if can_transition(from, to) {
                continue;
            }
            let mut session = make_session(3);
            session.phase = from;
            let err = transition(&mut session, to).unwrap_err();
            assert!(matches!(
                err,
                DomainError::Validation(ValidationKind::InvalidTransition, _)
            ));
            assert_eq!(session.phase, from, "{from} must be unchanged");
        }
    }
}

#[test]
fn rejection_names_source_and_target() {
    let mut session = make_session(3);
    let err = transition(&mut session, Phase::Results).unwrap_err();
    match err {
        DomainError::Validation(ValidationKind::InvalidTransition, detail) => {
            assert_eq!(detail, "lobby -> results");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn completed_is_terminal() {
    for to in ALL_PHASES {
        assert!(!can_transition(Phase::Completed, to));
    }
}

#[test]
fn require_phase_rejects_mismatches() {
    let session = make_session(3);
    assert!(require_phase(&session, Phase::Lobby).is_ok());
    let err = require_phase(&session, Phase::Judging).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::PhaseMismatch, _)
    ));
}
