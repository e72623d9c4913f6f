// League standings projection engine.
// Position probabilities (exact or Monte Carlo), projected final tables and earliest-clinch scenarios
// for a three-points-for-a-win league.

pub mod clinch;
pub mod config;
pub mod error;
pub mod exact;
pub mod fixture;
pub mod ingest;
pub mod league;
pub mod montecarlo;
pub mod outcome;
pub mod rounds;
pub mod simulator;
pub mod standings;
pub mod team;

pub use clinch::{ClinchScenario, Importance, KeyFixture, RequiredResult, ResultTag};
pub use config::Config;
pub use error::{EngineError, Result};
pub use exact::ExactResult;
pub use fixture::{Fixture, MatchOutcome, RoundInfo, RoundLabel};
pub use league::League;
pub use montecarlo::{MonteCarloResult, ProjectedRow};
pub use outcome::Outcome;
pub use rounds::RoundKey;
pub use simulator::{
    compute_clinch_scenario, compute_position_probability, compute_projected_table, PositionProbability,
    SimulationMethod, TeamReport,
};
pub use standings::Standings;
pub use team::{Team, TeamResult};
