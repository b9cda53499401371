// Proptest generators and fixtures for room property tests.

use proptest::prelude::*;

use crate::domain::cards::{Card, CardId, Color};
use crate::domain::dealing::seeded_rng;
use crate::domain::room::{Player, PlayerId, Room, RoomPhase};

pub const NAMES: [&str; 4] = ["Alice", "Bob", "Carol", "Dave"];

/// Seated players for a startable room.
pub fn player_count() -> impl Strategy<Value = usize> {
    2usize..=4
}

pub fn seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Indices into the current player's hand; reduced modulo the hand size.
pub fn play_choices() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..8, 0..40)
}

pub fn lobby(players: usize) -> Room {
    let mut room = Room::new("TESTRM", NAMES[0]).unwrap();
    for name in NAMES.iter().take(players).skip(1) {
        room.add_player(name).unwrap();
    }
    room
}

pub fn started_room(players: usize, seed: u64) -> Room {
    let mut room = lobby(players);
    room.start(0, &mut seeded_rng(seed)).unwrap();
    room
}

/// Current player plays the card at `choice % hand.len()`.
pub fn play_choice(room: &mut Room, choice: usize) -> Option<CardId> {
    let turn = room.current_turn()?;
    let hand = &room.players()[turn].hand;
    if hand.is_empty() {
        return None;
    }
    let card_id = hand[choice % hand.len()].id.clone();
    room.play_card(turn as PlayerId, &card_id).ok()?;
    Some(card_id)
}

pub fn card(id: &str, color: Color) -> Card {
    Card::new(CardId::new(id), color)
}

/// Hand from a color pattern such as "RRGB". Ids are `{prefix}{index}`.
pub fn hand(prefix: &str, pattern: &str) -> Vec<Card> {
    pattern
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let color = match c {
                'R' => Color::Red,
                'G' => Color::Green,
                'O' => Color::Orange,
                _ => Color::Blue,
            };
            card(&format!("{prefix}{i}"), color)
        })
        .collect()
}

/// A playing room with fixed hands, one pattern per seat.
pub fn rigged_room(patterns: &[&str], turn: usize) -> Room {
    let players = patterns
        .iter()
        .enumerate()
        .map(|(seat, pattern)| Player {
            id: seat as PlayerId,
            name: NAMES[seat].to_string(),
            is_host: seat == 0,
            hand: hand(&format!("p{seat}-"), pattern),
        })
        .collect();
    Room::restore("RIGGED", RoomPhase::Playing, players, Some(turn), None, 0).unwrap()
}
