//! Bracket matches: two team slots, running scores, winner, successor link.

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Where a match sits in its decide-once state machine.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    /// One or both team slots still open.
    Empty,
    /// Both teams present, no winner yet.
    Pending,
    /// Winner recorded; terminal.
    Decided,
}

/// One node of the single-elimination tree.
///
/// `None` in a team slot means a bye or a slot not yet filled by an earlier
/// round's winner. `next_match` is `None` only for the final.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub team1: Option<TeamId>,
    pub team2: Option<TeamId>,
    pub score_team1: u32,
    pub score_team2: u32,
    /// Set at most once per match.
    pub winner: Option<TeamId>,
    pub next_match: Option<MatchId>,
}

impl GameMatch {
    pub fn new(team1: Option<TeamId>, team2: Option<TeamId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            team1,
            team2,
            score_team1: 0,
            score_team2: 0,
            winner: None,
            next_match: None,
        }
    }

    pub fn state(&self) -> MatchState {
        if self.winner.is_some() {
            MatchState::Decided
        } else if self.team1.is_some() && self.team2.is_some() {
            MatchState::Pending
        } else {
            MatchState::Empty
        }
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    /// Decide a one-sided match in favor of the present team (a walkover).
    /// Returns the winner, or None if the match is not one-sided.
    pub fn award_walkover(&mut self, max_score: u32) -> Option<TeamId> {
        let winner = match (self.team1, self.team2) {
            (Some(t), None) => {
                self.score_team1 = max_score;
                self.score_team2 = 0;
                t
            }
            (None, Some(t)) => {
                self.score_team1 = 0;
                self.score_team2 = max_score;
                t
            }
            _ => return None,
        };
        self.winner = Some(winner);
        Some(winner)
    }
}
