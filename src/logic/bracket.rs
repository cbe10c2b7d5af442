//! Single-elimination bracket construction.

use crate::models::{FormatType, GameMatch, Team, TeamId, TournamentError};
use rand::seq::SliceRandom;
use rand::Rng;

/// Number of matches in the rounds before `round` (leaves are round 0).
///
/// Round r holds `bracket_size >> (r + 1)` matches, so the flat match list in
/// round order starts round r at `bracket_size - (bracket_size >> r)`.
fn round_offset(bracket_size: usize, round: u32) -> usize {
    bracket_size - (bracket_size >> round)
}

/// Position of the match at `(round, index)` in the flat match list.
fn global_index(bracket_size: usize, round: u32, index: usize) -> usize {
    round_offset(bracket_size, round) + index
}

/// Build the full single-elimination tree for `teams`.
///
/// Teams are shuffled with `rng`; seeding is uniform random, never by rank.
/// The bracket is sized to the next power of two. The `bracket_size - N`
/// byes occupy the leading first-round matches with a single team each and
/// are decided on the spot with a walkover score; the remaining teams pair
/// off in the remaining first-round matches. Later rounds start with both
/// slots open and are filled by advancement. Every match except the final is
/// linked to the match its winner feeds.
pub fn generate_bracket<R: Rng + ?Sized>(
    teams: &[Team],
    format: FormatType,
    rng: &mut R,
) -> Result<Vec<GameMatch>, TournamentError> {
    if teams.len() < 2 {
        return Err(TournamentError::NotEnoughTeams);
    }

    let mut seeds: Vec<TeamId> = teams.iter().map(|t| t.id).collect();
    seeds.shuffle(rng);

    let bracket_size = seeds.len().next_power_of_two();
    let total_rounds = bracket_size.trailing_zeros();
    let byes = bracket_size - seeds.len();

    let mut matches: Vec<GameMatch> = Vec::with_capacity(bracket_size - 1);

    // Round 0: byes first, one team each; then the rest paired off.
    let mut seeded = seeds.into_iter();
    for index in 0..bracket_size / 2 {
        let (team1, team2) = if index < byes {
            (seeded.next(), None)
        } else {
            (seeded.next(), seeded.next())
        };
        let mut game = GameMatch::new(team1, team2);
        if game.team2.is_none() {
            game.award_walkover(format.max_score());
        }
        matches.push(game);
    }

    // Rounds 1..: slots stay open until winners arrive.
    for round in 1..total_rounds {
        for _ in 0..bracket_size >> (round + 1) {
            matches.push(GameMatch::new(None, None));
        }
    }

    // The match at (r, i) feeds (r + 1, i / 2); the final feeds nothing.
    for round in 0..total_rounds {
        for index in 0..bracket_size >> (round + 1) {
            if round + 1 < total_rounds {
                let successor = matches[global_index(bracket_size, round + 1, index / 2)].id;
                matches[global_index(bracket_size, round, index)].next_match = Some(successor);
            }
        }
    }

    log::debug!(
        "generated bracket: {} teams, size {}, {} matches, {} byes",
        teams.len(),
        bracket_size,
        matches.len(),
        byes
    );

    Ok(matches)
}
