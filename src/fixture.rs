// Fixtures (matches) between two teams, played or not
// Team references are plain names, not owning pointers into the roster.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::team::TeamResult;

/// Round label as delivered by the data source: a matchday number or a text label such as "Mar 21"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoundLabel {
    Number(u32),
    Text(String),
}

impl fmt::Display for RoundLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundLabel::Number(n) => write!(f, "{}", n),
            RoundLabel::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundInfo {
    pub round: RoundLabel,
    /// The label is a calendar date ("Mar 21") rather than a matchday index
    #[serde(default)]
    pub is_date_based: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub home_team: Arc<str>,
    pub away_team: Arc<str>,
    #[serde(default)]
    pub played: bool,
    #[serde(default)]
    pub home_goals: u32,
    #[serde(default)]
    pub away_goals: u32,
    #[serde(default)]
    pub round_info: Option<RoundInfo>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl Fixture {
    /// An unplayed fixture with no round information
    pub fn remaining(home_team: &str, away_team: &str) -> Fixture {
        Fixture {
            home_team: Arc::from(home_team),
            away_team: Arc::from(away_team),
            played: false,
            home_goals: 0,
            away_goals: 0,
            round_info: None,
            date: None,
        }
    }

    /// A completed fixture
    pub fn result(home_team: &str, away_team: &str, home_goals: u32, away_goals: u32) -> Fixture {
        Fixture {
            played: true,
            home_goals,
            away_goals,
            ..Fixture::remaining(home_team, away_team)
        }
    }

    /// Tag the fixture with a numeric matchday
    pub fn in_round(mut self, round: u32) -> Fixture {
        self.round_info = Some(RoundInfo {
            round: RoundLabel::Number(round),
            is_date_based: false,
        });
        self
    }

    /// Tag the fixture with a date label such as "Mar 21"
    pub fn on_date(mut self, label: &str) -> Fixture {
        self.round_info = Some(RoundInfo {
            round: RoundLabel::Text(label.to_string()),
            is_date_based: true,
        });
        self
    }

    pub fn involves(&self, team: &str) -> bool {
        &*self.home_team == team || &*self.away_team == team
    }

    /// The other side of the fixture, or None if `team` is not playing in it
    pub fn opponent_of(&self, team: &str) -> Option<&str> {
        if &*self.home_team == team {
            Some(&*self.away_team)
        } else if &*self.away_team == team {
            Some(&*self.home_team)
        } else {
            None
        }
    }

    /// Unordered pair of team names, used to deduplicate fixtures between the same two sides
    pub fn pairing(&self) -> (Arc<str>, Arc<str>) {
        if self.home_team <= self.away_team {
            (Arc::clone(&self.home_team), Arc::clone(&self.away_team))
        } else {
            (Arc::clone(&self.away_team), Arc::clone(&self.home_team))
        }
    }
}

impl fmt::Display for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.played {
            write!(f, "{} {}-{} {}", self.home_team, self.home_goals, self.away_goals, self.away_team)
        } else {
            write!(f, "{} vs {}", self.home_team, self.away_team)
        }
    }
}

/// Result of a fixture from the home side's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    HomeWin,
    Draw,
    AwayWin,
}

impl MatchOutcome {
    /// Draw one of the three outcomes with equal probability
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> MatchOutcome {
        match rng.gen_range(0..3) {
            0 => MatchOutcome::HomeWin,
            1 => MatchOutcome::Draw,
            _ => MatchOutcome::AwayWin,
        }
    }

    /// The outcome in which `winner` takes the points. Falls back to a draw if `winner` is not playing.
    pub fn win_for(fixture: &Fixture, winner: &str) -> MatchOutcome {
        if &*fixture.home_team == winner {
            MatchOutcome::HomeWin
        } else if &*fixture.away_team == winner {
            MatchOutcome::AwayWin
        } else {
            MatchOutcome::Draw
        }
    }

    pub fn home_result(&self) -> TeamResult {
        match self {
            MatchOutcome::HomeWin => TeamResult::Win,
            MatchOutcome::Draw => TeamResult::Draw,
            MatchOutcome::AwayWin => TeamResult::Loss,
        }
    }

    pub fn away_result(&self) -> TeamResult {
        match self {
            MatchOutcome::HomeWin => TeamResult::Loss,
            MatchOutcome::Draw => TeamResult::Draw,
            MatchOutcome::AwayWin => TeamResult::Win,
        }
    }
}
