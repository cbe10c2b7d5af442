//! Teams and their player rosters.

use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team.
pub type TeamId = Uuid;

/// Unique identifier for a player (an account in the surrounding app).
pub type PlayerId = Uuid;

/// A registered team. Created during registration, consumed by the bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub tournament_id: TournamentId,
    pub name: String,
    /// Ordered roster. A team with no players is never placed in a bracket.
    pub players: Vec<PlayerId>,
    /// Mirrors the tournament's champion reference for display.
    pub is_winner: bool,
}

impl Team {
    pub fn new(
        tournament_id: TournamentId,
        name: impl Into<String>,
        players: Vec<PlayerId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            name: name.into(),
            players,
            is_winner: false,
        }
    }

    pub fn has_players(&self) -> bool {
        !self.players.is_empty()
    }
}
