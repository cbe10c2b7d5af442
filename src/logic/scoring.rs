//! Score validation and the per-match decide-once state machine.

use crate::models::{FormatType, GameMatch, TeamId, TournamentError};

/// What a score submission did to the match.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScoreOutcome {
    /// The submission clinched the match for this team.
    Decided(TeamId),
    /// Scores recorded; neither side has reached the clinch score yet.
    StillPending,
}

/// Validate and store a score submission on one match.
///
/// A decided match never takes another submission, and a match with an open
/// slot cannot be scored. Exactly one side at the clinch score wins; both
/// sides there is ambiguous and rejected; both below is accepted as a
/// running score without a winner.
pub fn apply_score(
    game: &mut GameMatch,
    score_team1: u32,
    score_team2: u32,
    format: FormatType,
) -> Result<ScoreOutcome, TournamentError> {
    if game.winner.is_some() {
        return Err(TournamentError::AlreadyDecided(game.id));
    }
    let (Some(team1), Some(team2)) = (game.team1, game.team2) else {
        return Err(TournamentError::MatchNotReady(game.id));
    };

    let max = format.max_score();
    if score_team1 > max || score_team2 > max {
        return Err(TournamentError::ScoreExceedsMax { max });
    }
    if score_team1 == max && score_team2 == max {
        return Err(TournamentError::InvalidScoreCombination { max });
    }

    game.score_team1 = score_team1;
    game.score_team2 = score_team2;

    let outcome = if score_team1 == max {
        game.winner = Some(team1);
        ScoreOutcome::Decided(team1)
    } else if score_team2 == max {
        game.winner = Some(team2);
        ScoreOutcome::Decided(team2)
    } else {
        ScoreOutcome::StillPending
    };
    Ok(outcome)
}
