//! Scenario tests for the room state machine.

use crate::domain::cards::{CardId, Color};
use crate::domain::dealing::seeded_rng;
use crate::domain::room::{Player, Room, RoomPhase, Winner};
use crate::domain::rules::{CARDS_PER_PLAYER, MAX_PLAYERS};
use crate::domain::test_gens::{lobby, rigged_room, started_room, NAMES};
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};

fn conflict_kind(err: &DomainError) -> ConflictKind {
    err.conflict_kind().cloned().expect("expected a conflict")
}

#[test]
fn new_room_seats_host_as_zero() {
    let room = Room::new("ABC123", "  Alice ").unwrap();
    assert_eq!(room.players().len(), 1);
    let host = &room.players()[0];
    assert_eq!(host.id, 0);
    assert_eq!(host.name, "Alice");
    assert!(host.is_host);
    assert_eq!(room.phase(), RoomPhase::Lobby);
    assert_eq!(room.current_turn(), None);
    assert_eq!(room.total_cards(), 0);
}

#[test]
fn new_room_rejects_blank_host_name() {
    let err = Room::new("ABC123", "   ").unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::EmptyName, _)
    ));
}

#[test]
fn joiners_get_dense_ids_until_full() {
    let mut room = Room::new("ABC123", "Alice").unwrap();
    assert_eq!(room.add_player("Bob").unwrap(), 1);
    assert_eq!(room.add_player("Carol").unwrap(), 2);
    assert_eq!(room.add_player("Dave").unwrap(), 3);
    assert!(room.players().iter().skip(1).all(|p| !p.is_host));

    let before = room.clone();
    let err = room.add_player("Eve").unwrap_err();
    assert_eq!(conflict_kind(&err), ConflictKind::RoomFull);
    assert_eq!(room, before);
    assert_eq!(room.players().len(), MAX_PLAYERS);
}

#[test]
fn join_after_start_is_rejected() {
    let mut room = started_room(2, 11);
    let before = room.clone();
    let err = room.add_player("Late").unwrap_err();
    assert_eq!(conflict_kind(&err), ConflictKind::AlreadyStarted);
    assert_eq!(room, before);
}

#[test]
fn start_requires_host() {
    let mut room = lobby(3);
    let before = room.clone();
    let err = room.start(1, &mut seeded_rng(1)).unwrap_err();
    assert_eq!(conflict_kind(&err), ConflictKind::NotHost);
    assert_eq!(room, before);
}

#[test]
fn start_requires_two_players() {
    let mut room = lobby(1);
    let err = room.start(0, &mut seeded_rng(1)).unwrap_err();
    assert_eq!(conflict_kind(&err), ConflictKind::NotEnoughPlayers);
    assert_eq!(room.phase(), RoomPhase::Lobby);
    assert_eq!(room.total_cards(), 0);
}

#[test]
fn start_with_unknown_caller_is_not_found() {
    let mut room = lobby(2);
    let err = room.start(7, &mut seeded_rng(1)).unwrap_err();
    assert_eq!(err.not_found_kind(), Some(&NotFoundKind::Player));
}

#[test]
fn second_start_never_redeals() {
    let mut room = started_room(2, 5);
    let before = room.clone();
    let err = room.start(0, &mut seeded_rng(99)).unwrap_err();
    assert_eq!(conflict_kind(&err), ConflictKind::AlreadyStarted);
    assert_eq!(room, before);
}

#[test]
fn deal_cards_refuses_a_started_room() {
    let mut room = started_room(3, 8);
    let err = room.deal_cards(&mut seeded_rng(8)).unwrap_err();
    assert_eq!(conflict_kind(&err), ConflictKind::AlreadyStarted);
}

#[test]
fn start_is_reproducible_from_seed() {
    assert_eq!(started_room(4, 1234), started_room(4, 1234));
}

#[test]
fn play_before_start_is_not_started() {
    let mut room = lobby(2);
    let err = room.play_card(0, &CardId::new("nope")).unwrap_err();
    assert_eq!(conflict_kind(&err), ConflictKind::NotStarted);
}

#[test]
fn alice_bob_carol_round_trip() {
    let mut room = Room::new("ABC123", "Alice").unwrap();
    assert_eq!(room.add_player("Bob").unwrap(), 1);
    assert_eq!(room.add_player("Carol").unwrap(), 2);
    room.start(0, &mut seeded_rng(2024)).unwrap();

    // 12 of the 16 cards are dealt at a three-player table.
    assert_eq!(room.total_cards(), 12);
    assert!(room.players().iter().all(|p| p.hand.len() == CARDS_PER_PLAYER));
    assert!(room.is_started());

    let mut plays = 0;
    while !room.is_ended() && plays < 6 {
        let turn = room.current_turn().unwrap();
        let card_id = room.players()[turn].hand[0].id.clone();
        let outcome = room.play_card(turn as u8, &card_id).unwrap();

        assert_eq!(usize::from(outcome.to), (turn + 1) % 3);
        assert!(room.players()[usize::from(outcome.to)].holds(&card_id));
        assert!(!room.players()[turn].holds(&card_id));
        assert_eq!(room.total_cards(), 12);
        plays += 1;
        assert_eq!(room.turn_count(), plays);
        if outcome.winner.is_none() {
            assert_eq!(room.current_turn(), Some((turn + 1) % 3));
        }
    }
}

#[test]
fn rigged_pass_ends_the_game_and_freezes_it() {
    // Carol passes red to Alice, who then holds four reds.
    let mut room = rigged_room(&["RRRG", "GGBB", "ROOB"], 2);
    let red = room.players()[2].hand[0].id.clone();

    let outcome = room.play_card(2, &red).unwrap();
    assert_eq!(outcome.to, 0);
    let expected = Winner {
        player_id: 0,
        name: "Alice".into(),
        color: Color::Red,
    };
    assert_eq!(outcome.winner, Some(expected.clone()));
    assert!(room.is_ended());
    assert_eq!(room.winner(), Some(&expected));

    let frozen = room.clone();
    let next = room.current_turn().unwrap() as u8;
    let any_card = room.players()[usize::from(next)].hand[0].id.clone();
    let err = room.play_card(next, &any_card).unwrap_err();
    assert_eq!(conflict_kind(&err), ConflictKind::GameEnded);
    assert_eq!(room, frozen);
}

#[test]
fn not_your_turn_leaves_room_untouched() {
    let mut room = rigged_room(&["RGOB", "RGOB"], 0);
    let bobs = room.players()[1].hand[0].id.clone();
    let before = room.clone();
    let err = room.play_card(1, &bobs).unwrap_err();
    assert_eq!(conflict_kind(&err), ConflictKind::NotYourTurn);
    assert_eq!(room, before);
}

#[test]
fn playing_someone_elses_card_is_card_not_found() {
    let mut room = rigged_room(&["RGOB", "RGOB"], 0);
    let bobs = room.players()[1].hand[0].id.clone();
    let before = room.clone();
    let err = room.play_card(0, &bobs).unwrap_err();
    assert_eq!(err.not_found_kind(), Some(&NotFoundKind::Card));
    assert_eq!(room, before);
}

#[test]
fn pass_card_validates_both_players_and_card() {
    let mut room = rigged_room(&["RGOB", "RGOB"], 0);
    let card = room.players()[0].hand[1].id.clone();
    let before = room.clone();

    let err = room.pass_card(0, &card, 9).unwrap_err();
    assert_eq!(err.not_found_kind(), Some(&NotFoundKind::Player));
    let err = room.pass_card(9, &card, 1).unwrap_err();
    assert_eq!(err.not_found_kind(), Some(&NotFoundKind::Player));
    let err = room.pass_card(1, &card, 0).unwrap_err();
    assert_eq!(err.not_found_kind(), Some(&NotFoundKind::Card));
    assert_eq!(room, before);

    let moved = room.pass_card(0, &card, 1).unwrap();
    assert_eq!(moved.color, Color::Green);
    assert_eq!(room.players()[1].hand.last(), Some(&moved));
    assert_eq!(room.players()[0].hand.len(), 3);
}

#[test]
fn winner_scan_prefers_lowest_id() {
    let mut room = rigged_room(&["GGGG", "RRRR"], 0);
    let winner = room.check_winner().cloned().unwrap();
    assert_eq!(winner.player_id, 0);
    assert_eq!(winner.color, Color::Green);
}

#[test]
fn winner_scan_prefers_color_order() {
    // Eight cards in one hand: both blue and red qualify, red is scanned first.
    let mut room = rigged_room(&["BBBBRRRR", ""], 1);
    let winner = room.check_winner().cloned().unwrap();
    assert_eq!(winner.color, Color::Red);
}

#[test]
fn check_winner_is_idempotent() {
    let mut room = rigged_room(&["OOOO", "RGBR"], 1);
    let first = room.check_winner().cloned();
    let snapshot = room.clone();
    let second = room.check_winner().cloned();
    assert_eq!(first, second);
    assert_eq!(room, snapshot);
    assert_eq!(room.phase(), RoomPhase::Ended);
}

#[test]
fn check_winner_without_a_winner_changes_nothing() {
    let mut room = rigged_room(&["RGOB", "RGOB"], 0);
    let before = room.clone();
    assert!(room.check_winner().is_none());
    assert_eq!(room, before);
}

#[test]
fn restore_rejects_broken_rooms() {
    let corrupt = |res: Result<Room, DomainError>| {
        matches!(
            res,
            Err(DomainError::Infra(InfraErrorKind::DataCorruption, _))
        )
    };
    let seat = |id: u8, host: bool| Player {
        id,
        name: NAMES[usize::from(id)].to_string(),
        is_host: host,
        hand: Vec::new(),
    };

    assert!(corrupt(Room::restore(
        "X",
        RoomPhase::Lobby,
        vec![],
        None,
        None,
        0
    )));
    assert!(corrupt(Room::restore(
        "X",
        RoomPhase::Lobby,
        vec![seat(0, true), seat(2, false)],
        None,
        None,
        0
    )));
    assert!(corrupt(Room::restore(
        "X",
        RoomPhase::Lobby,
        vec![seat(0, false)],
        None,
        None,
        0
    )));
    // Playing with no cards dealt.
    assert!(corrupt(Room::restore(
        "X",
        RoomPhase::Playing,
        vec![seat(0, true), seat(1, false)],
        Some(0),
        None,
        0
    )));
    // Ended without a winner.
    let mut dealt = rigged_room(&["RGOB", "RGOB"], 0).players().to_vec();
    assert!(corrupt(Room::restore(
        "X",
        RoomPhase::Ended,
        dealt.clone(),
        Some(0),
        None,
        0
    )));
    // Turn index out of range.
    assert!(corrupt(Room::restore(
        "X",
        RoomPhase::Playing,
        dealt.clone(),
        Some(2),
        None,
        0
    )));

    dealt[0].hand.pop();
    assert!(corrupt(Room::restore(
        "X",
        RoomPhase::Playing,
        dealt,
        Some(0),
        None,
        0
    )));
}
