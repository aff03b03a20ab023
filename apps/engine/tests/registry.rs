//! Session registry behavior: creation bounds, join/leave semantics, code
//! uniqueness, and the idle sweep.

mod support;

use std::collections::HashSet;
use std::time::Duration;

use engine::domain::rules::SessionOptions;
use engine::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use engine::services::registry::SessionRegistry;
use engine::{EventEnvelope, PlayerProfile};
use tokio::time::sleep;
use uuid::Uuid;

use support::{profile, test_engine};

fn options(max_rounds: u8, max_players: u8) -> SessionOptions {
    SessionOptions {
        max_rounds,
        max_players,
    }
}

#[tokio::test]
async fn creation_rejects_out_of_bounds_options() {
    let engine = test_engine();
    for (max_rounds, max_players) in [(0u8, 4u8), (21, 4), (5, 1), (5, 21)] {
        let err = engine
            .create_session(profile("host"), options(max_rounds, max_players))
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationKind::InvalidConfig, _)
        ));
    }
    assert_eq!(engine.live_session_count(), 0, "nothing partially applied");
}

#[tokio::test]
async fn join_is_idempotent_per_player_id() {
    let engine = test_engine();
    let snapshot = engine
        .create_session(profile("host"), options(3, 4))
        .unwrap();
    let code = snapshot.session.code;

    let ana = profile("ana");
    engine.join_session(&code, ana.clone()).unwrap();
    let second = engine.join_session(&code, ana.clone()).unwrap();

    assert_eq!(second.session.players.len(), 2, "no duplicate entry");
}

#[tokio::test]
async fn join_rejections_are_typed() {
    let engine = test_engine();

    let err = engine
        .join_session("NOSUCH", profile("ana"))
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Session, _)));

    let host = profile("host");
    let snapshot = engine
        .create_session(host.clone(), options(3, 2))
        .unwrap();
    let code = snapshot.session.code;

    engine.join_session(&code, profile("ana")).unwrap();
    let err = engine.join_session(&code, profile("ben")).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::SessionFull, _)
    ));

    engine.start_game(&code, host.id).unwrap();
    let err = engine.join_session(&code, profile("cho")).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::AlreadyStarted, _)
    ));
}

#[tokio::test]
async fn start_requires_the_host_and_two_players() {
    let engine = test_engine();
    let host = profile("host");
    let snapshot = engine
        .create_session(host.clone(), options(3, 4))
        .unwrap();
    let code = snapshot.session.code;

    let err = engine.start_game(&code, host.id).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::NotEnoughPlayers, _)
    ));

    let ana = profile("ana");
    engine.join_session(&code, ana.clone()).unwrap();
    let err = engine.start_game(&code, ana.id).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::NotHost, _)
    ));

    engine.start_game(&code, host.id).unwrap();
}

#[tokio::test]
async fn a_departing_host_is_announced_but_the_session_survives() {
    let engine = test_engine();
    let host = profile("host");
    let snapshot = engine
        .create_session(host.clone(), options(3, 4))
        .unwrap();
    let code = snapshot.session.code;
    engine.join_session(&code, profile("ana")).unwrap();

    let mut events = engine.subscribe();
    engine.leave_session(&code, host.id).unwrap();

    let mut saw_host_disconnected = false;
    while let Ok(event) = events.try_recv() {
        if let EventEnvelope::HostDisconnected { host_id, .. } = event {
            saw_host_disconnected = true;
            assert_eq!(host_id, host.id);
        }
    }
    assert!(saw_host_disconnected);
    assert!(engine.get_snapshot(&code).is_ok(), "session not terminated");
}

#[tokio::test]
async fn leaving_an_unknown_player_is_a_not_found() {
    let engine = test_engine();
    let snapshot = engine
        .create_session(profile("host"), options(3, 4))
        .unwrap();
    let err = engine
        .leave_session(&snapshot.session.code, Uuid::new_v4())
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Player, _)));
}

#[tokio::test]
async fn a_thousand_live_codes_never_collide() {
    let registry = SessionRegistry::new();
    let mut seen = HashSet::new();
    for i in 0..1_000 {
        let handle = registry
            .create(
                PlayerProfile {
                    id: Uuid::new_v4(),
                    display_name: format!("host{i}"),
                    avatar: "avatar".to_string(),
                },
                SessionOptions {
                    max_rounds: 3,
                    max_players: 4,
                },
            )
            .unwrap();
        let code = handle.lock().code.clone();
        assert_eq!(code.len(), 6);
        assert!(seen.insert(code), "live codes must be unique");
    }
    assert_eq!(registry.len(), 1_000);
}

#[tokio::test(start_paused = true)]
async fn the_sweep_evicts_only_idle_sessions() {
    let engine = test_engine();
    let stale = engine
        .create_session(profile("host-a"), options(3, 4))
        .unwrap();
    let stale_code = stale.session.code;

    // Default idle timeout is 10 minutes; age the first session past it
    // while the second stays fresh.
    sleep(Duration::from_secs(5 * 60)).await;
    let fresh = engine
        .create_session(profile("host-b"), options(3, 4))
        .unwrap();
    let fresh_code = fresh.session.code;
    sleep(Duration::from_secs(6 * 60)).await;

    let mut events = engine.subscribe();
    engine.sweep_idle_sessions();

    assert!(engine.get_snapshot(&stale_code).is_err(), "stale evicted");
    assert!(engine.get_snapshot(&fresh_code).is_ok(), "fresh survives");

    let mut saw_eviction = false;
    while let Ok(event) = events.try_recv() {
        if let EventEnvelope::SessionEvicted { snapshot, .. } = event {
            saw_eviction = true;
            assert_eq!(snapshot.session.code, stale_code);
        }
    }
    assert!(saw_eviction, "eviction must be observable for the archiver");
}

#[tokio::test]
async fn ending_a_session_emits_a_final_snapshot() {
    let engine = test_engine();
    let host = profile("host");
    let snapshot = engine
        .create_session(host.clone(), options(3, 4))
        .unwrap();
    let code = snapshot.session.code;
    let ana = profile("ana");
    engine.join_session(&code, ana.clone()).unwrap();

    let err = engine.end_session(&code, ana.id).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::NotHost, _)
    ));

    let mut events = engine.subscribe();
    engine.end_session(&code, host.id).unwrap();

    assert!(engine.get_snapshot(&code).is_err());
    let mut saw_eviction = false;
    while let Ok(event) = events.try_recv() {
        if let EventEnvelope::SessionEvicted { snapshot, .. } = event {
            saw_eviction = true;
            assert_eq!(snapshot.session.players.len(), 2);
        }
    }
    assert!(saw_eviction);
}
