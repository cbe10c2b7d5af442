//! Tournament aggregate, match formats, and error types.

use crate::models::game::{GameMatch, MatchId};
use crate::models::team::{PlayerId, Team, TeamId};
use crate::models::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Caller is not the tournament creator or an admin (or is banned).
    Unauthorized,
    /// Fewer than 2 teams with at least one player.
    NotEnoughTeams,
    /// Launch requested on a tournament that already started.
    AlreadyStarted,
    /// Score submitted before the tournament was launched.
    NotStarted,
    /// Launch requested before the declared start date.
    BeforeStartDate,
    /// Registration would exceed the participant limit.
    TournamentFull,
    /// Roster larger than the per-team player limit.
    RosterTooLarge { max: u32 },
    /// No match with this id in the tournament.
    MatchNotFound(MatchId),
    /// Match still has an open team slot and cannot take a score.
    MatchNotReady(MatchId),
    /// A submitted score was negative.
    NegativeScore,
    /// A submitted score exceeds the clinch score for the format.
    ScoreExceedsMax { max: u32 },
    /// Both teams at the clinch score at once.
    InvalidScoreCombination { max: u32 },
    /// Score submitted to a match whose winner is already recorded.
    AlreadyDecided(MatchId),
    /// The bracket is in a state propagation can never produce; the whole
    /// operation must be rolled back.
    InvariantViolation(&'static str),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::Unauthorized => write!(f, "Not authorized to manage this tournament"),
            TournamentError::NotEnoughTeams => {
                write!(f, "Need at least 2 teams with players to launch")
            }
            TournamentError::AlreadyStarted => write!(f, "Tournament has already started"),
            TournamentError::NotStarted => write!(f, "Tournament has not started yet"),
            TournamentError::BeforeStartDate => {
                write!(f, "Tournament start date has not been reached")
            }
            TournamentError::TournamentFull => {
                write!(f, "Tournament has reached its participant limit")
            }
            TournamentError::RosterTooLarge { max } => {
                write!(f, "Team roster cannot exceed {} players", max)
            }
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::MatchNotReady(_) => {
                write!(f, "Match is still waiting for an opponent")
            }
            TournamentError::NegativeScore => write!(f, "Scores cannot be negative"),
            TournamentError::ScoreExceedsMax { max } => {
                write!(f, "Scores cannot exceed {} for this format", max)
            }
            TournamentError::InvalidScoreCombination { max } => {
                write!(f, "Both teams cannot be at the winning score of {}", max)
            }
            TournamentError::AlreadyDecided(_) => write!(f, "Match already has a winner"),
            TournamentError::InvariantViolation(msg) => {
                write!(f, "Bracket invariant violated: {}", msg)
            }
        }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Best-of-N match format; determines the score needed to clinch a match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum FormatType {
    BO1,
    BO2,
    BO3,
    BO4,
    BO5,
}

impl FormatType {
    /// Score a team must reach to win a match of this format.
    ///
    /// BO2 and BO4 reuse the clinch score of the next-lower odd format: an
    /// even best-of-N can end level, which single elimination cannot
    /// represent. TODO: product decision on whether BO2/BO4 should be
    /// offered at all.
    pub fn max_score(self) -> u32 {
        match self {
            FormatType::BO1 => 1,
            FormatType::BO2 | FormatType::BO3 | FormatType::BO4 => 2,
            FormatType::BO5 => 3,
        }
    }
}

/// Coarse lifecycle phase, derived from `is_started` and `winner_id`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentPhase {
    /// Teams may still register; no bracket exists.
    Registration,
    /// Bracket generated, matches being scored.
    Live,
    /// Champion recorded.
    Completed,
}

/// Full tournament state: settings, registered teams, and the match tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub format: FormatType,
    /// Registration cap on the number of teams (2..=128).
    pub number_participants: u32,
    /// None means individual entrants; Some(n) caps rosters at n players.
    pub number_players_per_team: Option<u32>,
    /// Launch is rejected before this instant.
    pub start_date: DateTime<Utc>,
    pub creator_id: UserId,
    /// One-way flag, flipped to true exactly once at launch.
    pub is_started: bool,
    /// Champion team, set once when the final is decided.
    pub winner_id: Option<TeamId>,
    pub teams: Vec<Team>,
    /// The single-elimination tree; empty until launch.
    pub matches: Vec<GameMatch>,
}

impl Tournament {
    /// Create a tournament in the registration phase with no teams.
    pub fn new(
        name: impl Into<String>,
        format: FormatType,
        number_participants: u32,
        number_players_per_team: Option<u32>,
        start_date: DateTime<Utc>,
        creator_id: UserId,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            format,
            number_participants,
            number_players_per_team,
            start_date,
            creator_id,
            is_started: false,
            winner_id: None,
            teams: Vec::new(),
            matches: Vec::new(),
        }
    }

    pub fn phase(&self) -> TournamentPhase {
        if !self.is_started {
            TournamentPhase::Registration
        } else if self.winner_id.is_none() {
            TournamentPhase::Live
        } else {
            TournamentPhase::Completed
        }
    }

    pub fn get_match(&self, id: MatchId) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn get_match_mut(&mut self, id: MatchId) -> Option<&mut GameMatch> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    pub fn get_team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn get_team_mut(&mut self, id: TeamId) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| t.id == id)
    }

    /// Teams that can be placed in the bracket: roster is not empty.
    pub fn eligible_teams(&self) -> Vec<Team> {
        self.teams.iter().filter(|t| t.has_players()).cloned().collect()
    }

    /// The match without a successor. None until the bracket is generated.
    pub fn final_match(&self) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.next_match.is_none())
    }

    /// Register a team (only before launch; respects the participant and
    /// roster limits). Teams may register with an empty roster, but are then
    /// skipped at bracket placement.
    pub fn add_team(
        &mut self,
        name: impl Into<String>,
        players: Vec<PlayerId>,
    ) -> Result<TeamId, TournamentError> {
        if self.is_started {
            return Err(TournamentError::AlreadyStarted);
        }
        if self.teams.len() as u32 >= self.number_participants {
            return Err(TournamentError::TournamentFull);
        }
        if let Some(max) = self.number_players_per_team {
            if players.len() as u32 > max {
                return Err(TournamentError::RosterTooLarge { max });
            }
        }
        let team = Team::new(self.id, name, players);
        let id = team.id;
        self.teams.push(team);
        Ok(id)
    }
}
