//! Winner propagation: decided matches feed their successors, bye chains
//! cascade, and the final crowns the champion.

use crate::models::{GameMatch, MatchId, TeamId, Tournament, TournamentError};

/// Move the winner of a decided match up the bracket.
///
/// The winner takes the successor's first open slot. A successor left
/// one-sided stays open until its sibling feeder delivers. If that feeder
/// chain can never produce an opponent, the lone team takes a walkover and
/// the cascade continues into the next round instead. A decided
/// match without a successor is the final: the tournament's champion is
/// recorded there, exactly once.
///
/// Returns the ids of every match that was mutated. The loop runs at most
/// once per round.
pub fn advance(
    tournament: &mut Tournament,
    match_id: MatchId,
) -> Result<Vec<MatchId>, TournamentError> {
    let max_score = tournament.format.max_score();
    let mut updated = Vec::new();
    let mut current = match_id;

    loop {
        let decided = tournament
            .get_match(current)
            .ok_or(TournamentError::MatchNotFound(current))?;
        let winner = decided
            .winner
            .ok_or(TournamentError::InvariantViolation("advancing an undecided match"))?;

        let Some(next_id) = decided.next_match else {
            crown_champion(tournament, winner)?;
            return Ok(updated);
        };

        let one_sided = {
            let next = tournament
                .get_match_mut(next_id)
                .ok_or(TournamentError::InvariantViolation("successor match missing"))?;
            if next.team1.is_none() {
                next.team1 = Some(winner);
            } else if next.team2.is_none() {
                next.team2 = Some(winner);
            } else {
                return Err(TournamentError::InvariantViolation(
                    "successor match already has both teams",
                ));
            }
            next.team1.is_some() != next.team2.is_some()
        };
        updated.push(next_id);

        if !one_sided {
            // Pending: both teams present, awaits a real score submission.
            return Ok(updated);
        }
        if sibling_can_produce_opponent(tournament, next_id, current) {
            // The open slot is filled by a later advance.
            return Ok(updated);
        }

        // Bye chain: no opponent will ever arrive, walk the lone team over.
        tournament
            .get_match_mut(next_id)
            .ok_or(TournamentError::InvariantViolation("successor match missing"))?
            .award_walkover(max_score);
        current = next_id;
    }
}

/// Whether any feeder of `of_match` other than `delivered_by` can still
/// deliver a team into the open slot.
fn sibling_can_produce_opponent(
    tournament: &Tournament,
    of_match: MatchId,
    delivered_by: MatchId,
) -> bool {
    tournament
        .matches
        .iter()
        .filter(|m| m.next_match == Some(of_match) && m.id != delivered_by)
        .any(|m| can_yield_winner(tournament, m))
}

/// A match can still yield a winner if it is decided (its winner just has
/// not been propagated yet), holds any team, or has a live feeder of its
/// own. Recursion depth is bounded by the number of rounds.
fn can_yield_winner(tournament: &Tournament, game: &GameMatch) -> bool {
    if game.winner.is_some() || game.team1.is_some() || game.team2.is_some() {
        return true;
    }
    tournament
        .matches
        .iter()
        .filter(|m| m.next_match == Some(game.id))
        .any(|m| can_yield_winner(tournament, m))
}

fn crown_champion(tournament: &mut Tournament, winner: TeamId) -> Result<(), TournamentError> {
    if tournament.winner_id.is_some() {
        return Err(TournamentError::InvariantViolation("champion already recorded"));
    }
    tournament.winner_id = Some(winner);
    tournament
        .get_team_mut(winner)
        .ok_or(TournamentError::InvariantViolation("champion team not registered"))?
        .is_winner = true;
    log::info!("tournament {} champion: {}", tournament.id, winner);
    Ok(())
}
