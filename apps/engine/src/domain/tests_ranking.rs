use uuid::Uuid;

use crate::domain::ranking::{ImageOutcome, RankSlot, RankingBoard};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};

fn board_of(count: usize) -> (RankingBoard, Vec<Uuid>) {
    let ids: Vec<Uuid> = (0..count).map(|_| Uuid::new_v4()).collect();
    let board = RankingBoard::new(
        ids.iter()
            .map(|&id| (id, ImageOutcome::resolved(format!("https://img/{id}"))))
            .collect(),
    );
    (board, ids)
}

#[test]
fn selection_is_gated_on_all_images_loaded() {
    let (mut board, ids) = board_of(3);
    assert!(!board.all_loaded());

    let err = board.select(RankSlot::First, ids[0]).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::NotReady, _)
    ));

    for &id in &ids {
        board.mark_loaded(id).unwrap();
    }
    assert!(board.all_loaded());
    board.select(RankSlot::First, ids[0]).unwrap();
}

#[test]
fn mark_loaded_is_idempotent() {
    let (mut board, ids) = board_of(2);
    board.mark_loaded(ids[0]).unwrap();
    board.mark_loaded(ids[0]).unwrap();
    assert!(!board.all_loaded());
    board.mark_loaded(ids[1]).unwrap();
    assert!(board.all_loaded());
}

#[test]
fn placeholders_start_out_loaded() {
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();
    let board = RankingBoard::new(vec![
        (first, ImageOutcome::placeholder("/fallback.png", "timed out")),
        (second, ImageOutcome::placeholder("/fallback.png", "rejected")),
    ]);
    assert!(board.all_loaded());
}

#[test]
fn unknown_candidates_are_rejected() {
    let (mut board, ids) = board_of(2);
    for &id in &ids {
        board.mark_loaded(id).unwrap();
    }

    let stranger = Uuid::new_v4();
    assert!(matches!(
        board.mark_loaded(stranger).unwrap_err(),
        DomainError::NotFound(NotFoundKind::Candidate, _)
    ));
    assert!(matches!(
        board.select(RankSlot::First, stranger).unwrap_err(),
        DomainError::NotFound(NotFoundKind::Candidate, _)
    ));
}

#[test]
fn one_entrant_cannot_hold_both_slots() {
    let (mut board, ids) = board_of(3);
    for &id in &ids {
        board.mark_loaded(id).unwrap();
    }

    board.select(RankSlot::First, ids[0]).unwrap();
    let err = board.select(RankSlot::Second, ids[0]).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::DuplicateAssignment, _)
    ));
    // The prior valid assignment is retained.
    assert_eq!(board.first(), Some(ids[0]));
    assert_eq!(board.second(), None);
}

#[test]
fn reselection_overwrites_a_slot_before_finalization() {
    let (mut board, ids) = board_of(3);
    for &id in &ids {
        board.mark_loaded(id).unwrap();
    }

    board.select(RankSlot::First, ids[0]).unwrap();
    board.select(RankSlot::First, ids[1]).unwrap();
    assert_eq!(board.first(), Some(ids[1]));

    board.select(RankSlot::Second, ids[0]).unwrap();
    assert_eq!(board.second(), Some(ids[0]));
}

#[test]
fn finalize_requires_both_slots() {
    let (mut board, ids) = board_of(2);
    for &id in &ids {
        board.mark_loaded(id).unwrap();
    }

    assert!(matches!(
        board.finalize().unwrap_err(),
        DomainError::Validation(ValidationKind::IncompleteRanking, _)
    ));

    board.select(RankSlot::First, ids[0]).unwrap();
    assert!(matches!(
        board.finalize().unwrap_err(),
        DomainError::Validation(ValidationKind::IncompleteRanking, _)
    ));

    board.select(RankSlot::Second, ids[1]).unwrap();
    assert_eq!(board.finalize().unwrap(), (ids[0], ids[1]));
}

#[test]
fn the_committed_pair_is_consumed_exactly_once() {
    let (mut board, ids) = board_of(2);
    for &id in &ids {
        board.mark_loaded(id).unwrap();
    }
    board.select(RankSlot::First, ids[0]).unwrap();
    board.select(RankSlot::Second, ids[1]).unwrap();
    board.finalize().unwrap();
    assert!(board.finalize().is_err());
}
