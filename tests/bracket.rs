//! Integration tests for bracket generation: sizing, byes, tree linking.

use esports_bracket_web::{generate_bracket, FormatType, GameMatch, Team, TournamentError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use uuid::Uuid;

fn teams(n: usize) -> Vec<Team> {
    let tournament_id = Uuid::new_v4();
    (0..n)
        .map(|i| Team::new(tournament_id, format!("Team {i}"), vec![Uuid::new_v4()]))
        .collect()
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn generate_requires_two_teams() {
    assert!(matches!(
        generate_bracket(&teams(1), FormatType::BO1, &mut rng()),
        Err(TournamentError::NotEnoughTeams)
    ));
}

#[test]
fn match_count_is_bracket_size_minus_one_with_single_final() {
    for n in [2usize, 3, 4, 5, 6, 7, 8, 9, 16, 33] {
        let matches = generate_bracket(&teams(n), FormatType::BO3, &mut rng()).unwrap();
        let bracket_size = n.next_power_of_two();
        assert_eq!(matches.len(), bracket_size - 1, "team count {n}");
        let finals = matches.iter().filter(|m| m.next_match.is_none()).count();
        assert_eq!(finals, 1, "team count {n}");
    }
}

#[test]
fn every_team_appears_in_exactly_one_slot() {
    let team_list = teams(11);
    let matches = generate_bracket(&team_list, FormatType::BO1, &mut rng()).unwrap();
    let slots: Vec<_> = matches
        .iter()
        .flat_map(|m| [m.team1, m.team2])
        .flatten()
        .collect();
    assert_eq!(slots.len(), team_list.len());
    let unique: HashSet<_> = slots.iter().collect();
    assert_eq!(unique.len(), team_list.len());
}

#[test]
fn byes_resolve_at_generation_five_teams() {
    // 5 teams -> bracket of 8: 3 walkovers and 1 real pairing in round 0.
    let matches = generate_bracket(&teams(5), FormatType::BO1, &mut rng()).unwrap();
    assert_eq!(matches.len(), 7);

    let byes: Vec<_> = matches
        .iter()
        .filter(|m| m.team1.is_some() && m.team2.is_none())
        .collect();
    assert_eq!(byes.len(), 3);
    for bye in &byes {
        assert_eq!(bye.winner, bye.team1);
        assert_eq!((bye.score_team1, bye.score_team2), (1, 0));
    }

    let real: Vec<_> = matches
        .iter()
        .filter(|m| m.team1.is_some() && m.team2.is_some())
        .collect();
    assert_eq!(real.len(), 1);
    assert!(real[0].winner.is_none());

    // Two second-round slots and the final, all still open.
    let open = matches
        .iter()
        .filter(|m| m.team1.is_none() && m.team2.is_none())
        .count();
    assert_eq!(open, 3);
}

#[test]
fn walkover_score_matches_format() {
    let matches = generate_bracket(&teams(3), FormatType::BO5, &mut rng()).unwrap();
    let bye = matches
        .iter()
        .find(|m| m.team1.is_some() && m.team2.is_none())
        .unwrap();
    assert_eq!(bye.winner, bye.team1);
    assert_eq!((bye.score_team1, bye.score_team2), (3, 0));
}

#[test]
fn links_form_a_binary_tree() {
    let matches = generate_bracket(&teams(8), FormatType::BO3, &mut rng()).unwrap();
    assert_eq!(matches.len(), 7);

    for m in &matches {
        if let Some(next) = m.next_match {
            assert!(matches.iter().any(|x| x.id == next), "dangling successor");
        }
        let feeders = matches
            .iter()
            .filter(|x| x.next_match == Some(m.id))
            .count();
        assert!(feeders == 0 || feeders == 2);
    }

    // A full bracket has no one-sided matches.
    assert!(matches
        .iter()
        .all(|m| m.team1.is_some() == m.team2.is_some()));
}

#[test]
fn same_seed_gives_same_seeding() {
    let team_list = teams(6);
    let a = generate_bracket(&team_list, FormatType::BO3, &mut StdRng::seed_from_u64(42)).unwrap();
    let b = generate_bracket(&team_list, FormatType::BO3, &mut StdRng::seed_from_u64(42)).unwrap();
    let slots = |ms: &[GameMatch]| ms.iter().map(|m| (m.team1, m.team2)).collect::<Vec<_>>();
    assert_eq!(slots(&a), slots(&b));
}
