// Exact position solver.
//
// Enumerates the target team's outcome triples and ranks a snapshot where only that team moves.
// Every other team, including the target's own opponents, keeps its current record. The result is
// therefore the true probability only when no rival's remaining games can change the order around
// the target; with rivals still to play it is an approximation, kept deliberately.

use serde::Serialize;
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::league::League;
use crate::outcome::{enumerate_outcomes, total_outcomes, ways_to_achieve, Outcome, MAX_EXACT_FIXTURES};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExactResult {
    /// Triples that leave the team in the target position
    pub valid_outcomes: Vec<Outcome>,
    /// 3^(league remaining fixtures), never below 1
    pub total_possible: u128,
    /// Sum of multinomial coefficients over `valid_outcomes`
    pub total_valid_ways: u128,
    /// total_valid_ways / total_possible, as a percentage
    pub probability: f64,
}

impl ExactResult {
    fn empty(total_possible: u128) -> ExactResult {
        ExactResult {
            valid_outcomes: Vec::new(),
            total_possible,
            total_valid_ways: 0,
            probability: 0.0,
        }
    }
}

/// Outcomes placing `team_name` exactly at 1-indexed `target_position`.
/// Unknown teams and positions outside the table yield an empty result.
pub fn find_valid_outcomes(league: &League, team_name: &str, target_position: usize) -> Result<ExactResult> {
    let remaining = league.remaining_count();
    let total_possible = total_outcomes(remaining).ok_or(EngineError::ExactLimitExceeded {
        remaining,
        limit: MAX_EXACT_FIXTURES,
    })?;

    let standings = league.standings();
    let Some(team) = standings.get(team_name) else {
        return Ok(ExactResult::empty(total_possible));
    };
    let Some(target_index) = target_position.checked_sub(1) else {
        return Ok(ExactResult::empty(total_possible));
    };

    let team_remaining = league.remaining_for(team_name).len() as u32;
    let valid_outcomes: Vec<Outcome> = enumerate_outcomes(team_remaining)
        .into_iter()
        .filter(|o| {
            let snapshot = standings.with_team(team.with_results(o.wins, o.draws, o.losses));
            snapshot.position_of(team_name) == Some(target_index)
        })
        .collect();

    // each coefficient is at most 3^team_remaining, which fits because total_possible did
    let total_valid_ways: u128 = valid_outcomes.iter().filter_map(ways_to_achieve).sum();
    let probability = total_valid_ways as f64 / total_possible as f64 * 100.0;

    debug!(
        team = team_name,
        target_position,
        team_remaining,
        valid = valid_outcomes.len(),
        %total_valid_ways,
        %total_possible,
        "exact solve finished"
    );

    Ok(ExactResult {
        valid_outcomes,
        total_possible,
        total_valid_ways,
        probability,
    })
}
