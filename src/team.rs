// Team records for the league table
// Teams are value-like: every simulation works on copies, the canonical roster is never mutated.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Points awarded for a win
pub const POINTS_WIN: i32 = 3;

/// Points awarded for a draw
pub const POINTS_DRAW: i32 = 1;

/// Points awarded for a loss
pub const POINTS_LOSS: i32 = 0;

/// One team's result in a single fixture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamResult {
    Win,
    Draw,
    Loss,
}

impl TeamResult {
    pub fn points(&self) -> i32 {
        match self {
            TeamResult::Win => POINTS_WIN,
            TeamResult::Draw => POINTS_DRAW,
            TeamResult::Loss => POINTS_LOSS,
        }
    }
}

/// A row of the league table.
/// The name is an `Arc<str>` so cloning a whole table for a simulation only bumps reference counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: Arc<str>,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: i32,
}

impl Team {
    pub fn new(
        name: &str,
        played: u32,
        won: u32,
        drawn: u32,
        lost: u32,
        goals_for: u32,
        goals_against: u32,
        points: i32,
    ) -> Team {
        Team {
            name: Arc::from(name),
            played,
            won,
            drawn,
            lost,
            goals_for,
            goals_against,
            points,
        }
    }

    pub fn goal_difference(&self) -> i32 {
        self.goals_for as i32 - self.goals_against as i32
    }

    /// True when played == won + drawn + lost
    pub fn is_consistent(&self) -> bool {
        self.played == self.won + self.drawn + self.lost
    }

    /// Returns a copy of the team with one more fixture played.
    /// Simulated results carry no score, so goal totals are left alone.
    pub fn with_result(&self, result: TeamResult) -> Team {
        match result {
            TeamResult::Win => self.with_results(1, 0, 0),
            TeamResult::Draw => self.with_results(0, 1, 0),
            TeamResult::Loss => self.with_results(0, 0, 1),
        }
    }

    /// Returns a copy of the team advanced by a whole block of results
    pub fn with_results(&self, wins: u32, draws: u32, losses: u32) -> Team {
        Team {
            name: Arc::clone(&self.name),
            played: self.played + wins + draws + losses,
            won: self.won + wins,
            drawn: self.drawn + draws,
            lost: self.lost + losses,
            goals_for: self.goals_for,
            goals_against: self.goals_against,
            points: self.points + wins as i32 * POINTS_WIN + draws as i32 * POINTS_DRAW,
        }
    }

    /// Points total if every one of `remaining` fixtures were won
    pub fn max_possible_points(&self, remaining: usize) -> i32 {
        self.points + remaining as i32 * POINTS_WIN
    }
}
