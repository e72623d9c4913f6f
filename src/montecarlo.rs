// Monte Carlo engine.
//
// Every remaining fixture in the league (not just the target's) is resolved uniformly at random,
// the table is re-ranked, and positions are tallied. Iterations are independent and run on rayon.
//
// Iteration i draws from ChaCha8 seeded with the run seed on stream i, so a seeded run gives the
// same answer however rayon splits the work.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::fixture::MatchOutcome;
use crate::league::League;
use crate::standings::{rank_order, settle, IndexedFixture};
use crate::team::Team;

/// Expected points per remaining match used for `projected_points`.
/// This is a flat heuristic and is independent of the simulated positions.
pub const EXPECTED_POINTS_PER_MATCH: f64 = 1.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonteCarloResult {
    /// Percentage of iterations finishing in the target position
    pub probability: f64,
    pub success_count: usize,
    pub iterations: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedRow {
    pub team: Team,
    /// 1-indexed position in the roster as supplied
    pub current_position: usize,
    /// Most frequent simulated finishing position, 1-indexed
    pub projected_position: usize,
    /// points + remaining * 1.5, rounded
    pub projected_points: i32,
    /// Share of iterations finishing at `projected_position`, as a percentage
    pub probability: f64,
}

impl ProjectedRow {
    /// Probability formatted with one decimal place, e.g. "42.7"
    pub fn probability_label(&self) -> String {
        format!("{:.1}", self.probability)
    }
}

fn iteration_rng(seed: u64, iteration: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(iteration as u64);
    rng
}

fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| rand::thread_rng().gen())
}

fn min_len(iterations: usize) -> usize {
    (iterations / num_cpus::get()).max(1)
}

// One full resolution of the remaining fixtures; returns roster indices in table order
fn simulate_once(base: &[Team], fixtures: &[IndexedFixture], rng: &mut ChaCha8Rng) -> Vec<usize> {
    let mut table = base.to_vec();
    for &fixture in fixtures {
        settle(&mut table, fixture, MatchOutcome::random(rng));
    }
    rank_order(&table)
}

/// Estimate the chance `team_name` finishes at 1-indexed `target_position`
pub fn simulate_probability(
    league: &League,
    team_name: &str,
    target_position: usize,
    iterations: usize,
    seed: Option<u64>,
) -> MonteCarloResult {
    let standings = league.standings();
    let (Some(team_index), Some(target_index)) = (standings.index_of(team_name), target_position.checked_sub(1)) else {
        return MonteCarloResult {
            probability: 0.0,
            success_count: 0,
            iterations,
        };
    };

    let fixtures = standings.resolve_all(league.remaining_fixtures());
    let base = standings.teams();
    let seed = resolve_seed(seed);
    debug!(team = team_name, target_position, iterations, seed, fixtures = fixtures.len(), "monte carlo probability");

    let success_count = (0..iterations)
        .into_par_iter()
        .with_min_len(min_len(iterations))
        .filter(|&i| {
            let mut rng = iteration_rng(seed, i);
            let order = simulate_once(base, &fixtures, &mut rng);
            order.get(target_index) == Some(&team_index)
        })
        .count();

    let probability = if iterations == 0 {
        0.0
    } else {
        success_count as f64 / iterations as f64 * 100.0
    };

    MonteCarloResult {
        probability,
        success_count,
        iterations,
    }
}

/// Per-team histogram of finishing positions, flattened as `team * n + position`
fn position_histogram(base: &[Team], fixtures: &[IndexedFixture], iterations: usize, seed: u64) -> Vec<u64> {
    let n = base.len();
    (0..iterations)
        .into_par_iter()
        .with_min_len(min_len(iterations))
        .fold(
            || vec![0u64; n * n],
            |mut tally, i| {
                let mut rng = iteration_rng(seed, i);
                for (position, team) in simulate_once(base, fixtures, &mut rng).into_iter().enumerate() {
                    tally[team * n + position] += 1;
                }
                tally
            },
        )
        .reduce(
            || vec![0u64; n * n],
            |mut a, b| {
                a.iter_mut().zip(b).for_each(|(x, y)| *x += y);
                a
            },
        )
}

/// Projected final table, one row per team, sorted by projected position
pub fn generate_projected_table(league: &League, iterations: usize, seed: Option<u64>) -> Vec<ProjectedRow> {
    let standings = league.standings();
    let base = standings.teams();
    let n = base.len();
    let fixtures = standings.resolve_all(league.remaining_fixtures());
    let seed = resolve_seed(seed);
    debug!(iterations, seed, teams = n, fixtures = fixtures.len(), "projecting table");

    let histogram = position_histogram(base, &fixtures, iterations, seed);

    let mut rows: Vec<ProjectedRow> = base
        .iter()
        .enumerate()
        .map(|(i, team)| {
            let tally = &histogram[i * n..(i + 1) * n];
            // first position holding the maximum tally
            let (best, count) = tally
                .iter()
                .enumerate()
                .fold((0, 0u64), |best, (pos, &c)| if c > best.1 { (pos, c) } else { best });
            let remaining = league.remaining_for(&team.name).len();
            let probability = if iterations == 0 {
                0.0
            } else {
                count as f64 / iterations as f64 * 100.0
            };
            ProjectedRow {
                team: team.clone(),
                current_position: i + 1,
                projected_position: best + 1,
                projected_points: (team.points as f64 + remaining as f64 * EXPECTED_POINTS_PER_MATCH + 0.5).floor() as i32,
                probability,
            }
        })
        .collect();

    rows.sort_by_key(|row| row.projected_position);
    rows
}
