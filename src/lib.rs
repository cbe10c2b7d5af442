//! Esports tournament web app: single-elimination bracket engine with models
//! and business logic.

pub mod logic;
pub mod models;

pub use logic::{advance, apply_score, generate_bracket, launch, submit_score, ScoreOutcome};
pub use models::{
    FormatType, GameMatch, MatchId, MatchState, PlayerId, Requester, Team, TeamId, Tournament,
    TournamentError, TournamentId, TournamentPhase, UserId, UserRole,
};
