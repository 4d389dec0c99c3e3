//! Classic matches driven through the orchestrator: bot continuation, turn
//! deadlines and the volatile-to-durable hand-off.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use game_core::{
    CardCode, CardDefinition, ErrorKind, MatchId, Outcome, ParticipantId, Variant,
};
use runtime::{
    CatalogOracleImpl, InMemoryMatchRepository, ManualClock, MatchRepository, SessionConfig,
    SessionError, SessionOrchestrator,
};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

fn alice() -> ParticipantId {
    ParticipantId::new("alice")
}

fn bob() -> ParticipantId {
    ParticipantId::new("bob")
}

struct Harness {
    session: SessionOrchestrator,
    clock: Arc<ManualClock>,
    repository: Arc<InMemoryMatchRepository>,
}

fn harness(cards: Vec<CardDefinition>, hand_size: usize, deck_copies: usize) -> Harness {
    let mut config = SessionConfig::default();
    config.match_config.hand_size = hand_size;
    config.match_config.deck_copies = deck_copies;
    config.rng_seed = Some(7);

    let clock = Arc::new(ManualClock::new(t0()));
    let repository = Arc::new(InMemoryMatchRepository::new());
    let session = SessionOrchestrator::builder()
        .config(config)
        .cards(Arc::new(CatalogOracleImpl::from_cards(cards)))
        .repository(repository.clone())
        .clock(clock.clone())
        .build()
        .expect("orchestrator should build");

    Harness {
        session,
        clock,
        repository,
    }
}

fn fireball() -> CardDefinition {
    CardDefinition::new("fireball", "Fireball").with_damage(5)
}

#[tokio::test]
async fn four_fireballs_beat_the_bot() {
    let h = harness(vec![fireball()], 4, 10);
    let started = h
        .session
        .start(alice(), Variant::Classic, None)
        .await
        .unwrap();
    let id = started.id.clone();
    assert!(started.seats[1].participant.is_bot());
    assert_eq!(started.turn, 0);

    let mut state = started;
    for hit in 1..=4 {
        state = h
            .session
            .play_card(&id, alice(), CardCode::new("fireball"))
            .await
            .unwrap();
        assert_eq!(state.seats[1].hp, 20 - 5 * hit);
    }

    assert_eq!(state.winner, Some(Outcome::Winner(alice())));
    assert!(state.log.last().unwrap().ends_with("WIN"));
    // Bot answered the first three hits only.
    assert_eq!(state.seats[0].hp, 5);
    assert_eq!(state.turn, 7);

    // Archived: gone from the active listing, still readable.
    assert!(h.session.list_active(None).unwrap().is_empty());
    assert!(h.repository.find(&id).unwrap().is_some());
    let result = h.session.get_result(&id).unwrap();
    assert_eq!(result.winner.as_deref(), Some("alice"));

    let err = h
        .session
        .play_card(&id, alice(), CardCode::new("fireball"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::AlreadyResolved));
}

#[tokio::test]
async fn drained_hands_end_in_a_draw() {
    let cards = vec![
        CardDefinition::new("lightning", "Lightning Bolt").with_damage(3),
        CardDefinition::new("heal", "Heal").with_heal(4),
    ];
    let h = harness(cards, 2, 1);
    let state = h
        .session
        .start(alice(), Variant::Classic, Some(bob()))
        .await
        .unwrap();
    let id = state.id.clone();
    assert!(state.seats.iter().all(|seat| seat.deck.is_empty()));

    for _ in 0..2 {
        for player in [alice(), bob()] {
            let current = h.session.get_state(&id).unwrap();
            let card = current.seat(current.side_of(&player).unwrap()).hand[0].clone();
            h.session.play_card(&id, player, card).await.unwrap();
        }
    }

    let state = h.session.skip_turn(&id, alice()).await.unwrap();
    assert_eq!(state.winner, Some(Outcome::Draw));
    assert!(state.log.iter().any(|line| line == "Player alice has no cards — skip"));
    assert!(state.seats.iter().all(|seat| seat.hp > 0));

    assert!(h.session.list_active(None).unwrap().is_empty());
    assert_eq!(
        h.session.get_result(&id).unwrap().winner.as_deref(),
        Some(Outcome::DRAW)
    );
}

#[tokio::test]
async fn stale_turn_is_forced_before_the_request() {
    let h = harness(vec![fireball()], 4, 10);
    let id = h
        .session
        .start(alice(), Variant::Classic, None)
        .await
        .unwrap()
        .id;

    h.clock.advance(Duration::seconds(31));
    let state = h
        .session
        .play_card(&id, alice(), CardCode::new("fireball"))
        .await
        .unwrap();

    assert!(
        state
            .log
            .iter()
            .any(|line| line == "Player alice ran out of time, playing a random card")
    );
    // forced play, bot reply, requested play, bot reply
    assert_eq!(state.turn, 4);
    assert_eq!(state.seats[0].hp, 10);
    assert_eq!(state.seats[1].hp, 10);
    assert_eq!(state.deadline, Some(t0() + Duration::seconds(61)));
}

#[tokio::test]
async fn forced_moves_stand_when_the_request_fails() {
    let h = harness(vec![fireball()], 4, 10);
    let id = h
        .session
        .start(alice(), Variant::Classic, Some(bob()))
        .await
        .unwrap()
        .id;

    h.clock.advance(Duration::seconds(45));
    // alice's turn expired; after the forced move it is bob's turn.
    let err = h
        .session
        .play_card(&id, alice(), CardCode::new("fireball"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::InvalidMove));

    let state = h.session.get_state(&id).unwrap();
    assert_eq!(state.turn, 1);
    assert_eq!(state.seats[1].hp, 15);
}

#[tokio::test]
async fn rejected_plays_leave_the_match_untouched() {
    let h = harness(vec![fireball(), CardDefinition::new("heal", "Heal").with_heal(4)], 4, 4);
    let before = h
        .session
        .start(alice(), Variant::Classic, Some(bob()))
        .await
        .unwrap();
    let id = before.id.clone();

    let out_of_turn = h
        .session
        .play_card(&id, bob(), CardCode::new("fireball"))
        .await
        .unwrap_err();
    assert_eq!(out_of_turn.kind(), Some(ErrorKind::InvalidMove));

    let stranger = h
        .session
        .skip_turn(&id, ParticipantId::new("mallory"))
        .await
        .unwrap_err();
    assert_eq!(stranger.kind(), Some(ErrorKind::Unauthorized));

    let unknown = h
        .session
        .play_card(&id, alice(), CardCode::new("meteor"))
        .await
        .unwrap_err();
    assert_eq!(unknown.kind(), Some(ErrorKind::NotFound));

    assert_eq!(h.session.get_state(&id).unwrap(), before);
}

#[tokio::test]
async fn duel_actions_on_classic_are_ignored() {
    let h = harness(vec![fireball()], 4, 10);
    let before = h
        .session
        .start(alice(), Variant::Classic, None)
        .await
        .unwrap();

    let after = h
        .session
        .choose_card(&before.id, alice(), CardCode::new("fireball"))
        .await
        .unwrap();
    assert_eq!(after, before);
    assert_eq!(h.session.advance(&before.id).await.unwrap(), before);
}

#[tokio::test]
async fn surrender_and_end_archive_the_match() {
    let h = harness(vec![fireball()], 4, 10);
    let first = h
        .session
        .start(alice(), Variant::Classic, None)
        .await
        .unwrap()
        .id;
    let second = h
        .session
        .start(alice(), Variant::Classic, None)
        .await
        .unwrap()
        .id;

    let surrendered = h.session.surrender(&first, alice()).await.unwrap();
    assert_eq!(
        surrendered.winner,
        Some(Outcome::Winner(ParticipantId::bot()))
    );

    let ended = h.session.end(&second).await.unwrap();
    assert!(ended.winner.is_none());
    assert!(ended.deadline.is_none());

    assert!(h.session.list_active(None).unwrap().is_empty());
    assert!(matches!(
        h.session.end(&second).await,
        Err(SessionError::AlreadyResolved(_))
    ));
}

#[tokio::test]
async fn unknown_match_is_not_found() {
    let h = harness(vec![fireball()], 4, 10);
    let err = h
        .session
        .skip_turn(&MatchId::new("nope"), alice())
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::MatchNotFound(_)));
    assert_eq!(err.kind(), Some(ErrorKind::NotFound));
    // Lookups for ids that do not exist leave no lock slot behind.
    assert!(h.session.locks().is_empty());
}
