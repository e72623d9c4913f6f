// Entry points tying the solvers together.
// Picks Exact or Monte Carlo by remaining-fixture count and bundles per-team reports.

use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::clinch::{find_earliest_clinch, ClinchScenario};
use crate::config::Config;
use crate::error::Result;
use crate::exact::{find_valid_outcomes, ExactResult};
use crate::fixture::Fixture;
use crate::league::League;
use crate::montecarlo::{generate_projected_table, simulate_probability, MonteCarloResult, ProjectedRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum SimulationMethod {
    Exact,
    MonteCarlo { iterations: usize },
}

impl SimulationMethod {
    /// Honour an Exact request only while the league has at most `exact_fixture_limit` fixtures left
    pub fn resolve(self, remaining: usize, exact_fixture_limit: usize, iterations: usize) -> SimulationMethod {
        match self {
            SimulationMethod::Exact if remaining > exact_fixture_limit => {
                info!(remaining, exact_fixture_limit, iterations, "too many fixtures for exact solve, using monte carlo");
                SimulationMethod::MonteCarlo { iterations }
            }
            other => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method", content = "result", rename_all = "snake_case")]
pub enum PositionProbability {
    Exact(ExactResult),
    MonteCarlo(MonteCarloResult),
}

impl PositionProbability {
    /// Percentage, whichever way it was computed
    pub fn probability(&self) -> f64 {
        match self {
            PositionProbability::Exact(r) => r.probability,
            PositionProbability::MonteCarlo(r) => r.probability,
        }
    }

    pub fn method_name(&self) -> &'static str {
        match self {
            PositionProbability::Exact(_) => "exact",
            PositionProbability::MonteCarlo(_) => "monte carlo",
        }
    }
}

pub fn compute_position_probability(
    league: &League,
    team_name: &str,
    target_position: usize,
    method: SimulationMethod,
    seed: Option<u64>,
) -> Result<PositionProbability> {
    match method {
        SimulationMethod::Exact => Ok(PositionProbability::Exact(find_valid_outcomes(league, team_name, target_position)?)),
        SimulationMethod::MonteCarlo { iterations } => Ok(PositionProbability::MonteCarlo(simulate_probability(
            league,
            team_name,
            target_position,
            iterations,
            seed,
        ))),
    }
}

pub fn compute_clinch_scenario(league: &League, team_name: &str) -> Result<Option<ClinchScenario>> {
    find_earliest_clinch(league, team_name)
}

pub fn compute_projected_table(league: &League, iterations: usize, seed: Option<u64>) -> Vec<ProjectedRow> {
    generate_projected_table(league, iterations, seed)
}

/// Everything shown for one team and target position
#[derive(Debug, Clone, Serialize)]
pub struct TeamReport {
    pub team: Arc<str>,
    pub target_position: usize,
    pub method: SimulationMethod,
    pub probability: PositionProbability,
    pub remaining_fixtures: Vec<Fixture>,
    /// Only computed when the target position is first place
    pub clinch: Option<ClinchScenario>,
    pub projected_table: Vec<ProjectedRow>,
}

impl TeamReport {
    pub fn build(league: &League, team_name: &str, target_position: usize, requested: SimulationMethod, config: &Config) -> Result<TeamReport> {
        let settings = &config.simulation;
        if league.team(team_name).is_none() {
            warn!(team = team_name, "team not in roster, report will be empty");
        }

        let method = requested.resolve(league.remaining_count(), settings.exact_fixture_limit, settings.iterations);
        let probability = compute_position_probability(league, team_name, target_position, method, settings.seed)?;
        let clinch = if target_position == 1 {
            compute_clinch_scenario(league, team_name)?
        } else {
            None
        };
        let projected_table = compute_projected_table(league, config.projection.iterations, settings.seed);

        Ok(TeamReport {
            team: Arc::from(team_name),
            target_position,
            method,
            probability,
            remaining_fixtures: league.remaining_for(team_name).into_iter().cloned().collect(),
            clinch,
            projected_table,
        })
    }
}
