// A league: the roster plus every fixture, played or not.
// This is the plain data the ingestion side hands over; the engine never mutates it.

use serde::{Deserialize, Serialize};

use crate::fixture::Fixture;
use crate::standings::Standings;
use crate::team::Team;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct League {
    /// Roster in the order supplied. This order is the "current position" shown in projections.
    pub teams: Vec<Team>,
    #[serde(default)]
    pub fixtures: Vec<Fixture>,
}

impl League {
    pub fn new(teams: Vec<Team>, fixtures: Vec<Fixture>) -> League {
        League { teams, fixtures }
    }

    pub fn team(&self, name: &str) -> Option<&Team> {
        self.teams.iter().find(|t| &*t.name == name)
    }

    /// Fixtures not yet played, in input order
    pub fn remaining_fixtures(&self) -> Vec<&Fixture> {
        self.fixtures.iter().filter(|f| !f.played).collect()
    }

    pub fn remaining_count(&self) -> usize {
        self.fixtures.iter().filter(|f| !f.played).count()
    }

    /// Unplayed fixtures involving `name`
    pub fn remaining_for(&self, name: &str) -> Vec<&Fixture> {
        self.fixtures
            .iter()
            .filter(|f| !f.played && f.involves(name))
            .collect()
    }

    pub fn standings(&self) -> Standings {
        Standings::new(&self.teams)
    }
}
