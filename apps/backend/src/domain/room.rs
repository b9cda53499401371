//! Room state machine: membership, dealing, passing and win detection.
//!
//! A `Room` is rehydrated from storage for every request, mutated by one
//! action, then written back. Every fallible operation checks all of its
//! preconditions before touching state, so an `Err` always leaves the room
//! exactly as it was.

use core::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::cards::{Card, CardId, Color};
use crate::domain::dealing::deal_hands;
use crate::domain::rules::{
    next_seat, validate_player_name, CARDS_PER_PLAYER, MAX_PLAYERS, MIN_PLAYERS_TO_START,
    WINNING_COUNT,
};
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

/// Dense per-room player id. The host is always 0; the Nth joiner gets N-1.
pub type PlayerId = u8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub is_host: bool,
    pub hand: Vec<Card>,
}

impl Player {
    fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            is_host: id == 0,
            hand: Vec::new(),
        }
    }

    pub fn count_of(&self, color: Color) -> usize {
        self.hand.iter().filter(|c| c.color == color).count()
    }

    pub fn holds(&self, card_id: &CardId) -> bool {
        self.position_of(card_id).is_some()
    }

    fn position_of(&self, card_id: &CardId) -> Option<usize> {
        self.hand.iter().position(|c| &c.id == card_id)
    }

    /// First color in `Color::ALL` order held `WINNING_COUNT` or more times.
    fn winning_color(&self) -> Option<Color> {
        let mut counts = [0usize; 4];
        for card in &self.hand {
            counts[card.color.index()] += 1;
        }
        Color::ALL
            .into_iter()
            .find(|color| counts[color.index()] >= WINNING_COUNT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomPhase {
    Lobby,
    Playing,
    Ended,
}

impl RoomPhase {
    pub const fn as_str(self) -> &'static str {
        match self {
            RoomPhase::Lobby => "LOBBY",
            RoomPhase::Playing => "PLAYING",
            RoomPhase::Ended => "ENDED",
        }
    }
}

impl fmt::Display for RoomPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub player_id: PlayerId,
    pub name: String,
    pub color: Color,
}

/// Result of a successful `Room::play_card`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayOutcome {
    pub from: PlayerId,
    pub to: PlayerId,
    pub card: Card,
    /// Seat holding the turn after the pass.
    pub next_turn: usize,
    /// Set when this pass ended the game.
    pub winner: Option<Winner>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    code: String,
    players: Vec<Player>,
    current_turn: Option<usize>,
    phase: RoomPhase,
    winner: Option<Winner>,
    turn_count: u32,
}

impl Room {
    /// New lobby with `host_name` seated as player 0.
    pub fn new(code: impl Into<String>, host_name: &str) -> Result<Self, DomainError> {
        let name = validate_player_name(host_name)?;
        Ok(Self {
            code: code.into(),
            players: vec![Player::new(0, name)],
            current_turn: None,
            phase: RoomPhase::Lobby,
            winner: None,
            turn_count: 0,
        })
    }

    /// Rebuild a room from stored parts, rejecting anything that breaks the
    /// room invariants as data corruption.
    pub fn restore(
        code: impl Into<String>,
        phase: RoomPhase,
        players: Vec<Player>,
        current_turn: Option<usize>,
        winner: Option<Winner>,
        turn_count: u32,
    ) -> Result<Self, DomainError> {
        let code = code.into();
        let corrupt = |detail: String| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("Room {code}: {detail}"),
            )
        };

        if players.is_empty() || players.len() > MAX_PLAYERS {
            return Err(corrupt(format!("{} players seated", players.len())));
        }
        for (seat, player) in players.iter().enumerate() {
            if usize::from(player.id) != seat {
                return Err(corrupt(format!(
                    "player ids not dense (seat {seat} has id {})",
                    player.id
                )));
            }
            if player.is_host != (seat == 0) {
                return Err(corrupt(format!("unexpected host flag on player {seat}")));
            }
        }

        let total: usize = players.iter().map(|p| p.hand.len()).sum();
        match phase {
            RoomPhase::Lobby => {
                if current_turn.is_some() || winner.is_some() || total != 0 {
                    return Err(corrupt("lobby carries game state".into()));
                }
            }
            RoomPhase::Playing | RoomPhase::Ended => {
                match current_turn {
                    Some(turn) if turn < players.len() => {}
                    other => return Err(corrupt(format!("turn index {other:?} out of range"))),
                }
                if total != players.len() * CARDS_PER_PLAYER {
                    return Err(corrupt(format!("{total} cards in play")));
                }
            }
        }

        match (&winner, phase) {
            (Some(w), RoomPhase::Ended) => {
                if usize::from(w.player_id) >= players.len() {
                    return Err(corrupt(format!("winner {} not seated", w.player_id)));
                }
            }
            (None, RoomPhase::Ended) => return Err(corrupt("ended without a winner".into())),
            (Some(_), _) => return Err(corrupt("winner recorded before the end".into())),
            (None, _) => {}
        }

        Ok(Self {
            code,
            players,
            current_turn,
            phase,
            winner,
            turn_count,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(usize::from(id))
    }

    pub fn phase(&self) -> RoomPhase {
        self.phase
    }

    pub fn current_turn(&self) -> Option<usize> {
        self.current_turn
    }

    pub fn winner(&self) -> Option<&Winner> {
        self.winner.as_ref()
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn is_started(&self) -> bool {
        self.phase != RoomPhase::Lobby
    }

    pub fn is_ended(&self) -> bool {
        self.phase == RoomPhase::Ended
    }

    pub fn total_cards(&self) -> usize {
        self.players.iter().map(|p| p.hand.len()).sum()
    }

    fn require_player(&self, id: PlayerId) -> Result<&Player, DomainError> {
        self.player(id).ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Player,
                format!("Player {id} is not in room {}", self.code),
            )
        })
    }

    /// Seat a new player with the next dense id.
    pub fn add_player(&mut self, name: &str) -> Result<PlayerId, DomainError> {
        let name = validate_player_name(name)?;
        if self.is_started() {
            return Err(DomainError::conflict(
                ConflictKind::AlreadyStarted,
                format!("Room {} has already started", self.code),
            ));
        }
        if self.players.len() >= MAX_PLAYERS {
            return Err(DomainError::conflict(
                ConflictKind::RoomFull,
                format!("Room {} is full", self.code),
            ));
        }

        // len < MAX_PLAYERS, so this fits in a u8
        let id = self.players.len() as PlayerId;
        self.players.push(Player::new(id, name));
        Ok(id)
    }

    /// Deal `CARDS_PER_PLAYER` cards to every seated player in id order.
    pub fn deal_cards<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), DomainError> {
        if self.is_started() {
            return Err(DomainError::conflict(
                ConflictKind::AlreadyStarted,
                format!("Room {} has already started", self.code),
            ));
        }
        if self.total_cards() != 0 {
            return Err(DomainError::conflict(
                ConflictKind::Other("AlreadyDealt".into()),
                format!("Room {} already has cards dealt", self.code),
            ));
        }

        let hands = deal_hands(self.players.len(), rng);
        for (player, hand) in self.players.iter_mut().zip(hands) {
            player.hand = hand;
        }
        Ok(())
    }

    /// Pick a uniform starting seat and hand it the turn.
    pub fn select_random_start_player<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let seat = rng.random_range(0..self.players.len());
        self.current_turn = Some(seat);
        seat
    }

    /// Move `card_id` from `from`'s hand to the end of `to`'s hand.
    pub fn pass_card(
        &mut self,
        from: PlayerId,
        card_id: &CardId,
        to: PlayerId,
    ) -> Result<Card, DomainError> {
        let source = self.require_player(from)?;
        self.require_player(to)?;
        let pos = source.position_of(card_id).ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Card,
                format!("Card {card_id} is not in player {from}'s hand"),
            )
        })?;

        let card = self.players[usize::from(from)].hand.remove(pos);
        self.players[usize::from(to)].hand.push(card.clone());
        Ok(card)
    }

    /// Advance the turn one seat clockwise and count the completed pass.
    pub fn move_to_next_player(&mut self) {
        if let Some(turn) = self.current_turn {
            self.current_turn = Some(next_seat(turn, self.players.len()));
            self.turn_count += 1;
        }
    }

    /// Scan players in id order, colors in `Color::ALL` order. The first hit
    /// ends the game; later calls return the same winner.
    pub fn check_winner(&mut self) -> Option<&Winner> {
        if self.winner.is_none() {
            let found = self.players.iter().find_map(|p| {
                p.winning_color().map(|color| Winner {
                    player_id: p.id,
                    name: p.name.clone(),
                    color,
                })
            });
            if let Some(winner) = found {
                self.winner = Some(winner);
                self.phase = RoomPhase::Ended;
            }
        }
        self.winner.as_ref()
    }

    /// Host-only: deal, choose a starting seat, and open play.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        caller: PlayerId,
        rng: &mut R,
    ) -> Result<(), DomainError> {
        let player = self.require_player(caller)?;
        if !player.is_host {
            return Err(DomainError::conflict(
                ConflictKind::NotHost,
                format!("Only the host can start room {}", self.code),
            ));
        }
        if self.is_started() {
            return Err(DomainError::conflict(
                ConflictKind::AlreadyStarted,
                format!("Room {} has already started", self.code),
            ));
        }
        if self.players.len() < MIN_PLAYERS_TO_START {
            return Err(DomainError::conflict(
                ConflictKind::NotEnoughPlayers,
                format!("Room {} needs at least {MIN_PLAYERS_TO_START} players", self.code),
            ));
        }

        self.deal_cards(rng)?;
        self.select_random_start_player(rng);
        self.phase = RoomPhase::Playing;
        // A deal can hand someone four of a kind.
        self.check_winner();
        Ok(())
    }

    /// `caller` passes `card_id` to the next seat, then the turn advances and
    /// the winner scan runs.
    pub fn play_card(
        &mut self,
        caller: PlayerId,
        card_id: &CardId,
    ) -> Result<PlayOutcome, DomainError> {
        let player = self.require_player(caller)?;
        match self.phase {
            RoomPhase::Lobby => {
                return Err(DomainError::conflict(
                    ConflictKind::NotStarted,
                    format!("Room {} has not started", self.code),
                ))
            }
            RoomPhase::Ended => {
                return Err(DomainError::conflict(
                    ConflictKind::GameEnded,
                    format!("Game in room {} has ended", self.code),
                ))
            }
            RoomPhase::Playing => {}
        }
        if self.current_turn != Some(usize::from(caller)) {
            return Err(DomainError::conflict(
                ConflictKind::NotYourTurn,
                format!("It is not player {caller}'s turn"),
            ));
        }
        if !player.holds(card_id) {
            return Err(DomainError::not_found(
                NotFoundKind::Card,
                format!("Card {card_id} is not in player {caller}'s hand"),
            ));
        }

        let to = next_seat(usize::from(caller), self.players.len()) as PlayerId;
        let card = self.pass_card(caller, card_id, to)?;
        self.move_to_next_player();
        let winner = self.check_winner().cloned();

        Ok(PlayOutcome {
            from: caller,
            to,
            card,
            next_turn: self.current_turn.unwrap_or_default(),
            winner,
        })
    }
}
