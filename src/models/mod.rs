//! Data structures: tournaments, teams, matches, and requesting users.

mod game;
mod team;
mod tournament;
mod user;

pub use game::{GameMatch, MatchId, MatchState};
pub use team::{PlayerId, Team, TeamId};
pub use tournament::{
    FormatType, Tournament, TournamentError, TournamentId, TournamentPhase,
};
pub use user::{Requester, UserId, UserRole};
