// Round keys: one sortable token for both numeric matchdays and date labels such as "Mar 21".
// Everything downstream of grouping only sees RoundKey and never branches on the label format.

use chrono::Month;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{EngineError, Result};
use crate::fixture::{Fixture, RoundInfo, RoundLabel};

/// Sortable round token.
/// Matchdays sort numerically, dates by (month, day), and fixtures with no round info come last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoundKey {
    Matchday(u32),
    Date { month: u32, day: u32 },
    Unscheduled,
}

impl RoundKey {
    pub fn from_info(info: Option<&RoundInfo>) -> Result<RoundKey> {
        let Some(info) = info else {
            return Ok(RoundKey::Unscheduled);
        };
        match (&info.round, info.is_date_based) {
            (RoundLabel::Number(n), false) => Ok(RoundKey::Matchday(*n)),
            (RoundLabel::Text(label), false) => label
                .trim()
                .parse::<u32>()
                .map(RoundKey::Matchday)
                .map_err(|_| invalid(label)),
            (RoundLabel::Text(label), true) => parse_date_label(label),
            (RoundLabel::Number(n), true) => Err(invalid(&n.to_string())),
        }
    }

    pub fn of(fixture: &Fixture) -> Result<RoundKey> {
        RoundKey::from_info(fixture.round_info.as_ref())
    }
}

fn invalid(label: &str) -> EngineError {
    EngineError::InvalidRoundLabel {
        label: label.to_string(),
    }
}

// "Mar 21", "March 21" -> Date { month: 3, day: 21 }
fn parse_date_label(label: &str) -> Result<RoundKey> {
    let mut parts = label.split_whitespace();
    let (Some(month), Some(day), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid(label));
    };
    let month: Month = month.parse().map_err(|_| invalid(label))?;
    let day: u32 = day.parse().map_err(|_| invalid(label))?;
    if !(1..=31).contains(&day) {
        return Err(invalid(label));
    }
    Ok(RoundKey::Date {
        month: month.number_from_month(),
        day,
    })
}

impl fmt::Display for RoundKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundKey::Matchday(n) => write!(f, "{}", n),
            RoundKey::Date { month, day } => {
                let name = u8::try_from(*month)
                    .ok()
                    .and_then(|m| Month::try_from(m).ok())
                    .map(|m| &m.name()[..3])
                    .unwrap_or("???");
                write!(f, "{} {}", name, day)
            }
            RoundKey::Unscheduled => write!(f, "unscheduled"),
        }
    }
}

impl Serialize for RoundKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Remaining fixtures sharing one round key
#[derive(Debug, Clone)]
pub struct Round {
    pub key: RoundKey,
    pub fixtures: Vec<Fixture>,
}

/// Group fixtures by round, rounds in ascending key order, fixtures in input order within a round
pub fn group_by_round<'a, I>(fixtures: I) -> Result<Vec<Round>>
where
    I: IntoIterator<Item = &'a Fixture>,
{
    let mut grouped: BTreeMap<RoundKey, Vec<Fixture>> = BTreeMap::new();
    for fixture in fixtures {
        grouped.entry(RoundKey::of(fixture)?).or_default().push(fixture.clone());
    }
    Ok(grouped
        .into_iter()
        .map(|(key, fixtures)| Round { key, fixtures })
        .collect())
}

/// The round after `key`, if there is one
pub fn next_round(rounds: &[Round], key: RoundKey) -> Option<RoundKey> {
    rounds.iter().map(|r| r.key).find(|&k| k > key)
}
