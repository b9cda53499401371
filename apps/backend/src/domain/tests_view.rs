//! Hidden-information tests for room views.

use crate::domain::room::RoomPhase;
use crate::domain::test_gens::{lobby, rigged_room, started_room};
use crate::domain::view::room_view;

#[test]
fn viewer_sees_only_their_own_hand() {
    let room = started_room(3, 77);
    let view = room_view(&room, Some(1), 4);

    assert_eq!(view.viewer, Some(1));
    assert_eq!(view.lock_version, 4);
    for p in &view.players {
        assert_eq!(p.hand_count, 4);
        if p.player_id == 1 {
            assert_eq!(p.hand.as_deref(), Some(room.players()[1].hand.as_slice()));
        } else {
            assert!(p.hand.is_none());
        }
    }
}

#[test]
fn anonymous_and_unknown_viewers_see_no_hands() {
    let room = started_room(2, 3);
    for viewer in [None, Some(3)] {
        let view = room_view(&room, viewer, 2);
        assert_eq!(view.viewer, None);
        assert!(view.players.iter().all(|p| p.hand.is_none()));
    }
}

#[test]
fn lobby_view_has_no_turn() {
    let view = room_view(&lobby(2), Some(0), 1);
    assert_eq!(view.phase, RoomPhase::Lobby);
    assert!(!view.game_started);
    assert_eq!(view.current_turn, None);
    assert_eq!(view.player(0).unwrap().hand.as_deref(), Some(&[][..]));
}

#[test]
fn serialized_view_omits_hidden_hands() {
    let room = rigged_room(&["RGOB", "RGOB"], 1);
    let json = serde_json::to_value(room_view(&room, Some(0), 3)).unwrap();

    assert_eq!(json["phase"], "PLAYING");
    assert_eq!(json["current_turn"], 1);
    let players = json["players"].as_array().unwrap();
    assert_eq!(players[0]["hand"].as_array().unwrap().len(), 4);
    assert_eq!(players[0]["hand"][0]["color"], "red");
    assert!(players[1].get("hand").is_none());
    assert_eq!(players[1]["hand_count"], 4);
}

#[test]
fn ended_view_reports_winner() {
    let mut room = rigged_room(&["GGGG", "RRBB"], 0);
    room.check_winner();
    let view = room_view(&room, None, 9);
    assert!(view.game_ended);
    let winner = view.winner.unwrap();
    assert_eq!(winner.player_id, 0);
    assert_eq!(winner.name, "Alice");
}
