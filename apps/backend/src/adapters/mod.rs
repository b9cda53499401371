//! Adapters for external dependencies.

pub mod cards_sea;
pub mod players_sea;
pub mod rooms_sea;
