//! Lifecycle gates: one-time launch and score submission.

use crate::logic::advancement::advance;
use crate::logic::bracket::generate_bracket;
use crate::logic::scoring::{apply_score, ScoreOutcome};
use crate::models::{FormatType, MatchId, Requester, Tournament, TournamentError};
use chrono::{DateTime, Utc};
use rand::Rng;

/// One-time transition from registration to live play.
///
/// Preconditions, in order: the requester is the creator or an admin, the
/// declared start date has been reached, the tournament has not already been
/// launched, and at least two registered teams have players. On success the
/// bracket is generated over the eligible teams, every first-round walkover
/// is pushed into its next round (cascading as far as bye chains reach), and
/// `is_started` flips. The started check and the flip happen under the same
/// exclusive borrow, so a concurrent second launch is rejected cleanly.
pub fn launch<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    requester: &Requester,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<(), TournamentError> {
    if !requester.may_manage(tournament) {
        return Err(TournamentError::Unauthorized);
    }
    if now < tournament.start_date {
        return Err(TournamentError::BeforeStartDate);
    }
    if tournament.is_started {
        return Err(TournamentError::AlreadyStarted);
    }
    let eligible = tournament.eligible_teams();
    if eligible.len() < 2 {
        return Err(TournamentError::NotEnoughTeams);
    }

    let matches = generate_bracket(&eligible, tournament.format, rng)?;
    let walkovers: Vec<MatchId> = matches
        .iter()
        .filter(|m| m.is_decided())
        .map(|m| m.id)
        .collect();

    // Assemble on a working copy and commit whole, so a failed propagation
    // cannot leave a half-built bracket behind.
    let mut work = tournament.clone();
    work.matches = matches;
    for id in walkovers {
        advance(&mut work, id)?;
    }
    work.is_started = true;
    *tournament = work;

    log::info!(
        "tournament {} launched: {} teams, {} matches",
        tournament.id,
        eligible.len(),
        tournament.matches.len()
    );
    Ok(())
}

/// Validate and record a score for one match, advancing the winner when the
/// submission clinches it. All-or-nothing: the stored tournament changes
/// only if every step succeeds. Returns the ids of the matches that changed.
pub fn submit_score(
    tournament: &mut Tournament,
    match_id: MatchId,
    score_team1: i64,
    score_team2: i64,
    requester: &Requester,
) -> Result<Vec<MatchId>, TournamentError> {
    if !requester.may_manage(tournament) {
        return Err(TournamentError::Unauthorized);
    }
    if !tournament.is_started {
        return Err(TournamentError::NotStarted);
    }
    let format = tournament.format;
    let score_team1 = convert_score(score_team1, format)?;
    let score_team2 = convert_score(score_team2, format)?;

    let mut work = tournament.clone();
    let game = work
        .get_match_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    let outcome = apply_score(game, score_team1, score_team2, format)?;

    let mut updated = vec![match_id];
    if let ScoreOutcome::Decided(_) = outcome {
        updated.extend(advance(&mut work, match_id)?);
    }
    *tournament = work;
    Ok(updated)
}

/// Scores travel as signed integers on the wire; the engine works in `u32`.
fn convert_score(score: i64, format: FormatType) -> Result<u32, TournamentError> {
    if score < 0 {
        return Err(TournamentError::NegativeScore);
    }
    u32::try_from(score).map_err(|_| TournamentError::ScoreExceedsMax {
        max: format.max_score(),
    })
}
