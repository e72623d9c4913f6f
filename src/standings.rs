// League table ordering and the name-indexed arena the simulations run on.
// Teams are ordered by points, then goal difference, then goals scored. There is no head-to-head
// or alphabetical tie-break: teams level on all three keep their input order.

use fnv::FnvHashMap;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::warn;

use crate::fixture::{Fixture, MatchOutcome};
use crate::team::Team;

/// Comparator placing the better-ranked team first
pub fn standings_cmp(a: &Team, b: &Team) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
}

/// Teams in table order (stable sort)
pub fn rank(teams: &[Team]) -> Vec<&Team> {
    let mut ranked: Vec<&Team> = teams.iter().collect();
    ranked.sort_by(|a, b| standings_cmp(a, b));
    ranked
}

/// Indices into `teams`, in table order
pub fn rank_order(teams: &[Team]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..teams.len()).collect();
    order.sort_by(|&a, &b| standings_cmp(&teams[a], &teams[b]));
    order
}

/// 0-indexed table position of `name`, if present
pub fn position_of(teams: &[Team], name: &str) -> Option<usize> {
    rank(teams).iter().position(|t| &*t.name == name)
}

/// A fixture resolved to indices into a roster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedFixture {
    pub home: usize,
    pub away: usize,
}

/// Apply one outcome to a working table. Only used on scratch copies owned by a single iteration.
#[inline]
pub fn settle(table: &mut [Team], fixture: IndexedFixture, outcome: MatchOutcome) {
    table[fixture.home] = table[fixture.home].with_result(outcome.home_result());
    table[fixture.away] = table[fixture.away].with_result(outcome.away_result());
}

/// Snapshot of every team, indexed by name.
/// Transformations return a new snapshot; the one they are called on is left as it was.
#[derive(Debug, Clone)]
pub struct Standings {
    teams: Vec<Team>,
    index: FnvHashMap<Arc<str>, usize>,
}

impl Standings {
    pub fn new(teams: &[Team]) -> Standings {
        let mut index = FnvHashMap::default();
        for (i, team) in teams.iter().enumerate() {
            index.entry(Arc::clone(&team.name)).or_insert(i);
        }
        Standings {
            teams: teams.to_vec(),
            index,
        }
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Option<&Team> {
        self.index_of(name).map(|i| &self.teams[i])
    }

    pub fn resolve(&self, fixture: &Fixture) -> Option<IndexedFixture> {
        Some(IndexedFixture {
            home: self.index_of(&fixture.home_team)?,
            away: self.index_of(&fixture.away_team)?,
        })
    }

    /// Resolve every fixture, dropping (and logging) the ones naming a team not in the roster
    pub fn resolve_all<'a, I>(&self, fixtures: I) -> Vec<IndexedFixture>
    where
        I: IntoIterator<Item = &'a Fixture>,
    {
        fixtures
            .into_iter()
            .filter_map(|fixture| {
                let resolved = self.resolve(fixture);
                if resolved.is_none() {
                    warn!(home = %fixture.home_team, away = %fixture.away_team, "fixture references an unknown team, skipping");
                }
                resolved
            })
            .collect()
    }

    /// New snapshot with the given results applied
    pub fn with_outcomes(&self, outcomes: &[(IndexedFixture, MatchOutcome)]) -> Standings {
        let mut teams = self.teams.clone();
        for &(fixture, outcome) in outcomes {
            settle(&mut teams, fixture, outcome);
        }
        Standings {
            teams,
            index: self.index.clone(),
        }
    }

    /// New snapshot with one team replaced
    pub fn with_team(&self, team: Team) -> Standings {
        let mut next = self.clone();
        if let Some(i) = self.index_of(&team.name) {
            next.teams[i] = team;
        }
        next
    }

    /// 0-indexed table position of `name`, if present
    pub fn position_of(&self, name: &str) -> Option<usize> {
        position_of(&self.teams, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(name: &str, points: i32, goals_for: u32, goals_against: u32) -> Team {
        Team::new(name, 10, 0, 0, 0, goals_for, goals_against, points)
    }

    #[test]
    fn test_rank_points_then_goal_difference() {
        // A and B level on points, B has the better goal difference
        let teams = vec![team("A", 10, 5, 3), team("B", 10, 4, 1), team("C", 9, 9, 0)];
        let names: Vec<&str> = rank(&teams).iter().map(|t| &*t.name).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_rank_goals_for_then_input_order() {
        let teams = vec![
            team("A", 10, 3, 1),
            team("B", 10, 4, 2),
            team("C", 10, 4, 2),
        ];
        let names: Vec<&str> = rank(&teams).iter().map(|t| &*t.name).collect();
        assert_eq!(names, vec!["B", "C", "A"]);
        assert_eq!(rank_order(&teams), vec![1, 2, 0]);
        assert_eq!(position_of(&teams, "A"), Some(2));
        assert_eq!(position_of(&teams, "Z"), None);
    }

    #[test]
    fn test_resolve_skips_unknown_teams() {
        let standings = Standings::new(&[team("A", 1, 0, 0), team("B", 2, 0, 0)]);
        let fixtures = vec![
            Fixture::remaining("A", "B"),
            Fixture::remaining("A", "Ghost"),
            Fixture::remaining("B", "A"),
        ];
        let resolved = standings.resolve_all(&fixtures);
        assert_eq!(
            resolved,
            vec![
                IndexedFixture { home: 0, away: 1 },
                IndexedFixture { home: 1, away: 0 },
            ]
        );
    }

    #[test]
    fn test_with_outcomes_is_pure() {
        let standings = Standings::new(&[team("A", 1, 0, 0), team("B", 2, 0, 0)]);
        let fixture = IndexedFixture { home: 0, away: 1 };
        let next = standings.with_outcomes(&[(fixture, MatchOutcome::HomeWin)]);

        assert_eq!(standings.get("A").unwrap().points, 1);
        assert_eq!(next.get("A").unwrap().points, 4);
        assert_eq!(next.get("B").unwrap().points, 2);
        assert_eq!(next.get("B").unwrap().lost, 1);
        assert_eq!(next.position_of("A"), Some(0));
        assert_eq!(standings.position_of("A"), Some(1));
    }
}
