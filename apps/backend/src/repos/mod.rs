//! Domain-facing persistence functions. Everything here returns `DomainError`.

pub mod hands;
pub mod players;
pub mod rooms;
