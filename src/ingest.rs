// Loads a league from disk: a teams csv plus a fixtures csv, or a single league json.
// Records are checked for duplicate team names; inconsistent records are logged and kept.

use chrono::{DateTime, Utc};
use fnv::FnvHashSet;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{EngineError, Result};
use crate::fixture::{Fixture, RoundInfo, RoundLabel};
use crate::league::League;
use crate::team::Team;

/// Row of teams.csv
#[derive(Debug, Deserialize)]
struct TeamRecord {
    name: String,
    played: u32,
    won: u32,
    drawn: u32,
    lost: u32,
    goals_for: u32,
    goals_against: u32,
    points: i32,
}

/// Row of fixtures.csv; everything after `away` may be left empty
#[derive(Debug, Deserialize)]
struct FixtureRecord {
    home: String,
    away: String,
    played: Option<bool>,
    home_goals: Option<u32>,
    away_goals: Option<u32>,
    round: Option<String>,
    date_based: Option<bool>,
    date: Option<DateTime<Utc>>,
}

impl From<TeamRecord> for Team {
    fn from(r: TeamRecord) -> Team {
        Team::new(&r.name, r.played, r.won, r.drawn, r.lost, r.goals_for, r.goals_against, r.points)
    }
}

impl From<FixtureRecord> for Fixture {
    fn from(r: FixtureRecord) -> Fixture {
        let is_date_based = r.date_based.unwrap_or(false);
        let round_info = r.round.map(|label| {
            let round = match label.trim().parse::<u32>() {
                Ok(n) if !is_date_based => RoundLabel::Number(n),
                _ => RoundLabel::Text(label),
            };
            RoundInfo { round, is_date_based }
        });
        let mut fixture = if r.played.unwrap_or(false) {
            Fixture::result(&r.home, &r.away, r.home_goals.unwrap_or(0), r.away_goals.unwrap_or(0))
        } else {
            Fixture::remaining(&r.home, &r.away)
        };
        fixture.round_info = round_info;
        fixture.date = r.date;
        fixture
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader)
}

pub fn read_teams<R: Read>(reader: R) -> Result<Vec<Team>> {
    let mut rdr = csv_reader(reader);
    let mut teams = Vec::new();
    for record in rdr.deserialize::<TeamRecord>() {
        teams.push(Team::from(record?));
    }
    Ok(teams)
}

pub fn read_fixtures<R: Read>(reader: R) -> Result<Vec<Fixture>> {
    let mut rdr = csv_reader(reader);
    let mut fixtures = Vec::new();
    for record in rdr.deserialize::<FixtureRecord>() {
        fixtures.push(Fixture::from(record?));
    }
    Ok(fixtures)
}

/// Reject duplicate names and log records whose played count does not add up
pub fn validate(league: League) -> Result<League> {
    let mut seen = FnvHashSet::default();
    for team in &league.teams {
        if !seen.insert(team.name.clone()) {
            return Err(EngineError::DuplicateTeam {
                name: team.name.to_string(),
            });
        }
        if !team.is_consistent() {
            warn!(
                team = %team.name,
                played = team.played,
                won = team.won,
                drawn = team.drawn,
                lost = team.lost,
                "played does not equal won + drawn + lost"
            );
        }
    }
    debug!(teams = league.teams.len(), fixtures = league.fixtures.len(), remaining = league.remaining_count(), "league loaded");
    Ok(league)
}

pub fn load_league_csv<P: AsRef<Path>>(teams_path: P, fixtures_path: P) -> Result<League> {
    let teams = read_teams(File::open(teams_path)?)?;
    let fixtures = read_fixtures(File::open(fixtures_path)?)?;
    validate(League::new(teams, fixtures))
}

pub fn parse_league_json(json: &str) -> Result<League> {
    validate(serde_json::from_str(json)?)
}

pub fn load_league_json<P: AsRef<Path>>(path: P) -> Result<League> {
    let league: League = serde_json::from_reader(std::io::BufReader::new(File::open(path)?))?;
    validate(league)
}
