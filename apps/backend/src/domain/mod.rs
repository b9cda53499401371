//! Domain layer: pure room rules, cards and views.

pub mod cards;
pub mod dealing;
pub mod room;
pub mod rules;
pub mod view;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_room;
#[cfg(test)]
mod tests_view;

// Re-exports for ergonomics
pub use cards::{Card, CardId, Color};
pub use dealing::{deal_hands, seeded_rng};
pub use room::{PlayOutcome, Player, PlayerId, Room, RoomPhase, Winner};
pub use view::{room_view, PlayerView, RoomView};
