//! Deck construction, shuffling and dealing.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::cards::{Card, CardId, Color};
use crate::domain::rules::{CARDS_PER_COLOR, CARDS_PER_PLAYER, DECK_SIZE, MAX_PLAYERS};

/// RNG used for every seeded deal. Same seed, same game.
pub type DealRng = ChaCha8Rng;

pub fn seeded_rng(seed: u64) -> DealRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Unshuffled deck: `CARDS_PER_COLOR` of each color, colors in `Color::ALL` order.
pub fn fresh_deck<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for color in Color::ALL {
        for _ in 0..CARDS_PER_COLOR {
            deck.push(Card::new(CardId::random(rng), color));
        }
    }
    deck
}

/// Fisher-Yates: for i from last down to 1, swap with a uniform j in [0, i].
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Shuffle a fresh deck and cut `CARDS_PER_PLAYER` consecutive cards per seat.
///
/// Seat 0 gets the first block, seat 1 the next, and so on. Cards beyond
/// `player_count * CARDS_PER_PLAYER` are discarded.
pub fn deal_hands<R: Rng + ?Sized>(player_count: usize, rng: &mut R) -> Vec<Vec<Card>> {
    debug_assert!(player_count <= MAX_PLAYERS);
    let mut deck = fresh_deck(rng);
    shuffle(&mut deck, rng);

    deck.chunks(CARDS_PER_PLAYER)
        .take(player_count)
        .map(<[Card]>::to_vec)
        .collect()
}
