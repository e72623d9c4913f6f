// Command line front end: load a league, run one of the solvers, print text or json.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use tablesim::config::{generate_sample_config, Config};
use tablesim::ingest::{load_league_csv, load_league_json};
use tablesim::{
    compute_clinch_scenario, compute_position_probability, compute_projected_table, ClinchScenario, League,
    PositionProbability, ProjectedRow, SimulationMethod, TeamReport,
};

#[derive(Parser)]
#[command(name = "tablesim")]
#[command(about = "League table projections: finishing position odds, projected tables and title clinch scenarios", long_about = None)]
struct Cli {
    /// Config file path (defaults to tablesim.yaml in the working directory if present)
    #[arg(short, long)]
    config: Option<String>,

    /// Print results as json
    #[arg(long)]
    json: bool,

    /// Teams csv (name,played,won,drawn,lost,goals_for,goals_against,points)
    #[arg(long, requires = "fixtures", conflicts_with = "league")]
    teams: Option<String>,

    /// Fixtures csv (home,away,played,home_goals,away_goals,round,date_based,date)
    #[arg(long, requires = "teams")]
    fixtures: Option<String>,

    /// Single json file holding both teams and fixtures
    #[arg(long)]
    league: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Method {
    Exact,
    MonteCarlo,
}

#[derive(Subcommand)]
enum Commands {
    /// Chance of a team finishing in a given position
    Probability {
        #[arg(long)]
        team: String,
        /// 1-indexed table position
        #[arg(long)]
        position: usize,
        #[arg(long, value_enum, default_value = "exact")]
        method: Method,
        /// Override the configured Monte Carlo iterations
        #[arg(long)]
        iterations: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Earliest round in which a team can secure first place
    Clinch {
        #[arg(long)]
        team: String,
    },
    /// Projected final table
    Project {
        #[arg(long)]
        iterations: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Probability, remaining fixtures, clinch scenario and projected table for one team
    Report {
        #[arg(long)]
        team: String,
        #[arg(long)]
        position: usize,
    },
    /// Print a sample configuration file
    SampleConfig,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_league(cli: &Cli) -> anyhow::Result<League> {
    match (&cli.teams, &cli.fixtures, &cli.league) {
        (Some(teams), Some(fixtures), None) => {
            load_league_csv(teams, fixtures).with_context(|| format!("loading {} and {}", teams, fixtures))
        }
        (None, None, Some(path)) => load_league_json(path).with_context(|| format!("loading {}", path)),
        _ => bail!("supply either --teams and --fixtures, or --league"),
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg} [{elapsed}]"));
    pb.set_message(message.to_string());
    pb.enable_steady_tick(100);
    pb
}

fn emit<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_probability(team: &str, position: usize, result: &PositionProbability) {
    println!("{} finishing position {}: {:.2}% ({})", team, position, result.probability(), result.method_name());
    match result {
        PositionProbability::Exact(r) => {
            println!("  {} of {} result sequences", r.total_valid_ways, r.total_possible);
            for o in &r.valid_outcomes {
                println!("  W{} D{} L{} (+{} pts)", o.wins, o.draws, o.losses, o.points());
            }
        }
        PositionProbability::MonteCarlo(r) => {
            println!("  {} of {} simulated seasons", r.success_count, r.iterations);
        }
    }
}

fn print_clinch(team: &str, scenario: Option<&ClinchScenario>) {
    let Some(s) = scenario else {
        println!("{} cannot mathematically clinch first place with the remaining schedule", team);
        return;
    };
    println!("{} can clinch first place in round {}", team, s.clinching_round);
    println!(
        "  guaranteed after round {}; needs {} pts (has {}, +{})",
        s.round, s.points_needed, s.current_points, s.points_to_gain
    );
    let threats: Vec<&str> = s.threat_competitors.iter().map(|t| &**t).collect();
    println!("  rivals: {}", threats.join(", "));
    if !s.required_results.is_empty() {
        println!("  required results:");
        for r in &s.required_results {
            println!("    {:<40} {:<18} {}", r.fixture.to_string(), r.result.to_string(), r.explanation);
        }
    }
    if !s.key_fixtures.is_empty() {
        println!("  key fixtures:");
        for k in &s.key_fixtures {
            println!("    [{}] {:<36} {:<18} {}", k.round, k.fixture.to_string(), k.result.to_string(), k.explanation);
        }
    }
}

fn print_table(rows: &[ProjectedRow]) {
    println!("{:>4} {:<24} {:>4} {:>5} {:>7}", "Pos", "Team", "Now", "Pts", "Prob%");
    for row in rows {
        println!(
            "{:>4} {:<24} {:>4} {:>5} {:>7}",
            row.projected_position,
            row.team.name,
            row.current_position,
            row.projected_points,
            row.probability_label()
        );
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = Config::load_or_default(cli.config.as_deref());

    if let Commands::SampleConfig = cli.command {
        print!("{}", generate_sample_config());
        return Ok(());
    }

    let league = load_league(&cli)?;

    match &cli.command {
        Commands::Probability { team, position, method, iterations, seed } => {
            let iterations = iterations.unwrap_or(config.simulation.iterations);
            let requested = match method {
                Method::Exact => SimulationMethod::Exact,
                Method::MonteCarlo => SimulationMethod::MonteCarlo { iterations },
            };
            let method = requested.resolve(league.remaining_count(), config.simulation.exact_fixture_limit, iterations);
            let pb = spinner("simulating");
            let result = compute_position_probability(&league, team, *position, method, seed.or(config.simulation.seed))?;
            pb.finish_and_clear();
            if cli.json {
                emit(&result)?;
            } else {
                print_probability(team, *position, &result);
            }
        }
        Commands::Clinch { team } => {
            let scenario = compute_clinch_scenario(&league, team)?;
            if cli.json {
                emit(&scenario)?;
            } else {
                print_clinch(team, scenario.as_ref());
            }
        }
        Commands::Project { iterations, seed } => {
            let iterations = iterations.unwrap_or(config.projection.iterations);
            let pb = spinner("projecting table");
            let rows = compute_projected_table(&league, iterations, seed.or(config.simulation.seed));
            pb.finish_and_clear();
            if cli.json {
                emit(&rows)?;
            } else {
                print_table(&rows);
            }
        }
        Commands::Report { team, position } => {
            let pb = spinner("building report");
            let report = TeamReport::build(&league, team, *position, SimulationMethod::Exact, &config)?;
            pb.finish_and_clear();
            if cli.json {
                emit(&report)?;
            } else {
                print_probability(team, *position, &report.probability);
                println!();
                println!("Remaining fixtures:");
                for fixture in &report.remaining_fixtures {
                    println!("  {}", fixture);
                }
                if *position == 1 {
                    println!();
                    print_clinch(team, report.clinch.as_ref());
                }
                println!();
                print_table(&report.projected_table);
            }
        }
        Commands::SampleConfig => {}
    }
    Ok(())
}
