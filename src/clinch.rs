// Clinch scenario finder.
//
// Walks the remaining rounds in order under the most favourable assumptions for the target team:
// it wins every game, each threat loses every game, and everything else is drawn. After each round
// the walk asks whether any threat can still reach the target's points. The first round where none
// can is the clinch round; the results assumed in it, plus a few earlier "key fixtures", explain how.
//
// The walk is sequential by nature: round N's snapshot is the input to round N+1.

use fnv::{FnvHashMap, FnvHashSet};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::fixture::{Fixture, MatchOutcome};
use crate::league::League;
use crate::rounds::{group_by_round, next_round, Round, RoundKey};
use crate::standings::{IndexedFixture, Standings};
use crate::team::{Team, POINTS_WIN};

/// Gap at or above which a threat cannot close in within a single fixture
const SAME_ROUND_GAP: i32 = POINTS_WIN + 1;

/// Key fixtures kept per contender
const KEY_FIXTURES_PER_TEAM: usize = 3;

/// Required outcome of a fixture, from the home side's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultTag {
    HomeWin,
    AwayWin,
    Draw,
    HomeWinOrDraw,
    AwayWinOrDraw,
}

impl ResultTag {
    /// Win for `team`, whichever side it is on
    fn win_for(fixture: &Fixture, team: &str) -> ResultTag {
        if &*fixture.home_team == team {
            ResultTag::HomeWin
        } else {
            ResultTag::AwayWin
        }
    }

    /// `team` must not win
    fn drop_points_for(fixture: &Fixture, team: &str) -> ResultTag {
        if &*fixture.home_team == team {
            ResultTag::AwayWinOrDraw
        } else {
            ResultTag::HomeWinOrDraw
        }
    }
}

impl fmt::Display for ResultTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResultTag::HomeWin => "home_win",
            ResultTag::AwayWin => "away_win",
            ResultTag::Draw => "draw",
            ResultTag::HomeWinOrDraw => "home_win_or_draw",
            ResultTag::AwayWinOrDraw => "away_win_or_draw",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequiredResult {
    pub fixture: Fixture,
    pub result: ResultTag,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyFixture {
    pub fixture: Fixture,
    pub result: ResultTag,
    pub explanation: String,
    pub round: RoundKey,
    pub importance: Importance,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClinchScenario {
    /// Round whose assumed results make the title mathematically certain
    pub round: RoundKey,
    /// Round in which the title is actually secured; equal to `round` or the one after it
    pub clinching_round: RoundKey,
    pub points_needed: i32,
    pub current_points: i32,
    pub points_to_gain: i32,
    pub required_results: Vec<RequiredResult>,
    pub key_fixtures: Vec<KeyFixture>,
    pub threat_competitors: Vec<Arc<str>>,
    pub can_clinch_in_current_round: bool,
}

/// How many of the highest-placed rivals a team `gap` points behind the target may be and still
/// count as a threat. None means too far back to count at all.
fn proximity_limit(gap: i32) -> Option<usize> {
    match gap {
        g if g <= 3 => Some(usize::MAX),
        g if g <= 6 => Some(3),
        g if g <= 9 => Some(2),
        g if g <= 12 => Some(1),
        _ => None,
    }
}

/// Rivals that could still catch `target` and are close enough to matter.
/// Falls back to the highest-points rival so the walk always has a reference competitor.
pub fn classify_threats(league: &League, target: &Team) -> Vec<Arc<str>> {
    let mut rivals: Vec<&Team> = league.teams.iter().filter(|t| t.name != target.name).collect();
    // stable: ties keep roster order
    rivals.sort_by(|a, b| b.points.cmp(&a.points));

    let threats: Vec<Arc<str>> = rivals
        .iter()
        .enumerate()
        .filter(|(rank, rival)| {
            let reachable = rival.max_possible_points(league.remaining_for(&rival.name).len()) >= target.points;
            let close = proximity_limit(target.points - rival.points).map_or(false, |limit| *rank < limit);
            reachable && close
        })
        .map(|(_, rival)| Arc::clone(&rival.name))
        .collect();

    if threats.is_empty() {
        if let Some(leader) = rivals.first() {
            debug!(fallback = %leader.name, "no rival within reach, tracking the highest-placed one");
            return vec![Arc::clone(&leader.name)];
        }
    }
    threats
}

/// Outcome assumed for `fixture` during the walk
fn assumed_outcome(fixture: &Fixture, target: &str, threats: &FnvHashSet<Arc<str>>) -> MatchOutcome {
    if fixture.involves(target) {
        return MatchOutcome::win_for(fixture, target);
    }
    match (threats.contains(&fixture.home_team), threats.contains(&fixture.away_team)) {
        (true, false) => MatchOutcome::AwayWin,
        (false, true) => MatchOutcome::HomeWin,
        _ => MatchOutcome::Draw,
    }
}

/// State after one round of the walk
#[derive(Debug, Clone)]
pub(crate) struct WalkStep {
    pub index: usize,
    pub before: Standings,
    pub after: Standings,
    /// Each threat's best reachable total once this round is done, in threat order
    pub threat_maximums: Vec<(Arc<str>, i32)>,
}

impl WalkStep {
    fn target_points(&self, target: &str) -> i32 {
        self.after.get(target).map_or(0, |t| t.points)
    }

    fn is_clinched(&self, target: &str) -> bool {
        let target_points = self.target_points(target);
        self.threat_maximums.iter().all(|(_, max)| *max < target_points)
    }
}

fn remaining_after(rounds: &[Round], index: usize, name: &str) -> usize {
    rounds[index + 1..]
        .iter()
        .flat_map(|r| r.fixtures.iter())
        .filter(|f| f.involves(name))
        .count()
}

/// Run the favourable-results walk over every round
pub(crate) fn walk_rounds(standings: &Standings, rounds: &[Round], target: &str, threats: &[Arc<str>]) -> Vec<WalkStep> {
    let threat_set: FnvHashSet<Arc<str>> = threats.iter().cloned().collect();
    let mut snapshot = standings.clone();
    let mut steps = Vec::with_capacity(rounds.len());

    for (index, round) in rounds.iter().enumerate() {
        let outcomes: Vec<(IndexedFixture, MatchOutcome)> = round
            .fixtures
            .iter()
            .filter_map(|fixture| {
                let resolved = snapshot.resolve(fixture);
                if resolved.is_none() {
                    warn!(%fixture, round = %round.key, "fixture references an unknown team, skipping");
                }
                resolved.map(|indexed| (indexed, assumed_outcome(fixture, target, &threat_set)))
            })
            .collect();

        let after = snapshot.with_outcomes(&outcomes);
        let threat_maximums = threats
            .iter()
            .map(|name| {
                let points = after.get(name).map_or(0, |t| t.points);
                let remaining = remaining_after(rounds, index, name);
                (Arc::clone(name), points + remaining as i32 * POINTS_WIN)
            })
            .collect();

        let step = WalkStep {
            index,
            before: snapshot,
            after,
            threat_maximums,
        };
        trace!(round = %round.key, target_points = step.target_points(target), maximums = ?step.threat_maximums, "walk step");
        snapshot = step.after.clone();
        steps.push(step);
    }
    steps
}

fn required_results(round: &Round, target: &str, threats: &FnvHashSet<Arc<str>>) -> Vec<RequiredResult> {
    let own = round.fixtures.iter().filter_map(|f| {
        let opponent = f.opponent_of(target)?;
        Some(RequiredResult {
            fixture: f.clone(),
            result: ResultTag::win_for(f, target),
            explanation: format!("{} must beat {} to gain {} points", target, opponent, POINTS_WIN),
        })
    });

    let rivals = round.fixtures.iter().filter(|f| !f.involves(target)).filter_map(|f| {
        let (result, explanation) = match (threats.contains(&f.home_team), threats.contains(&f.away_team)) {
            (true, true) => (
                ResultTag::Draw,
                format!("A draw limits the points gained by both {} and {}", f.home_team, f.away_team),
            ),
            (true, false) => (
                ResultTag::drop_points_for(f, &f.home_team),
                format!("{} must drop points to stay behind {}", f.home_team, target),
            ),
            (false, true) => (
                ResultTag::drop_points_for(f, &f.away_team),
                format!("{} must drop points to stay behind {}", f.away_team, target),
            ),
            (false, false) => return None,
        };
        Some(RequiredResult {
            fixture: f.clone(),
            result,
            explanation,
        })
    });

    own.chain(rivals).collect()
}

/// Earlier-round fixtures that build the gap the clinch round relies on.
/// Deduplicated by team pair; every contender appears in at most `KEY_FIXTURES_PER_TEAM` of them.
fn key_fixtures(earlier: &[Round], target: &str, threats: &FnvHashSet<Arc<str>>) -> Vec<KeyFixture> {
    let mut seen: FnvHashSet<(Arc<str>, Arc<str>)> = FnvHashSet::default();
    let mut per_team: FnvHashMap<Arc<str>, usize> = FnvHashMap::default();
    let mut keys = Vec::new();
    let is_contender = |name: &Arc<str>| &**name == target || threats.contains(name);

    for round in earlier {
        for fixture in &round.fixtures {
            let (result, explanation) = if let Some(opponent) = fixture.opponent_of(target) {
                (
                    ResultTag::win_for(fixture, target),
                    format!("{} must beat {} to build the points gap", target, opponent),
                )
            } else {
                match (threats.contains(&fixture.home_team), threats.contains(&fixture.away_team)) {
                    (true, true) => (
                        ResultTag::Draw,
                        format!("A draw limits the points gained by both {} and {}", fixture.home_team, fixture.away_team),
                    ),
                    (true, false) => (
                        ResultTag::drop_points_for(fixture, &fixture.home_team),
                        format!("{} dropping points helps {} gain ground", fixture.home_team, target),
                    ),
                    (false, true) => (
                        ResultTag::drop_points_for(fixture, &fixture.away_team),
                        format!("{} dropping points helps {} gain ground", fixture.away_team, target),
                    ),
                    (false, false) => continue,
                }
            };

            // a fixture counts against every contender playing in it
            let involved: Vec<&Arc<str>> = [&fixture.home_team, &fixture.away_team]
                .into_iter()
                .filter(|name| is_contender(name))
                .collect();
            let has_room = involved
                .iter()
                .all(|name| per_team.get(*name).copied().unwrap_or(0) < KEY_FIXTURES_PER_TEAM);
            if !has_room || !seen.insert(fixture.pairing()) {
                continue;
            }
            for name in &involved {
                *per_team.entry(Arc::clone(name)).or_insert(0) += 1;
            }

            let importance = if involved.len() == 2 {
                Importance::High
            } else {
                Importance::Medium
            };
            keys.push(KeyFixture {
                fixture: fixture.clone(),
                result,
                explanation,
                round: round.key,
                importance,
            });
        }
    }
    keys
}

/// Earliest round in which `team_name` can mathematically secure first place.
/// Returns None when the team is unknown, nothing is left to play, or no round works.
pub fn find_earliest_clinch(league: &League, team_name: &str) -> Result<Option<ClinchScenario>> {
    let standings = league.standings();
    let Some(target) = standings.get(team_name) else {
        debug!(team = team_name, "team not in roster, no clinch scenario");
        return Ok(None);
    };

    let rounds = group_by_round(league.remaining_fixtures())?;
    if rounds.is_empty() {
        return Ok(None);
    }

    let threats = classify_threats(league, target);
    debug!(team = team_name, threats = ?threats, rounds = rounds.len(), "searching for clinch");
    let threat_set: FnvHashSet<Arc<str>> = threats.iter().cloned().collect();

    let steps = walk_rounds(&standings, &rounds, team_name, &threats);
    let Some(step) = steps.iter().find(|s| s.is_clinched(team_name)) else {
        debug!(team = team_name, "no round guarantees first place");
        return Ok(None);
    };

    let round = &rounds[step.index];
    // only fixtures the walk actually played count
    let has_fixture = round
        .fixtures
        .iter()
        .any(|f| f.involves(team_name) && step.before.resolve(f).is_some());
    let gap_holds = step.before.get(team_name).map_or(false, |t| {
        threats.iter().all(|name| {
            step.before
                .get(name)
                .map_or(true, |rival| t.points - rival.points >= SAME_ROUND_GAP)
        })
    });
    let can_clinch_in_current_round = has_fixture && gap_holds;
    let clinching_round = if can_clinch_in_current_round {
        round.key
    } else {
        next_round(&rounds, round.key).unwrap_or(round.key)
    };

    let current_points = target.points;
    let highest_threat = step.threat_maximums.iter().map(|(_, max)| *max).max();
    let points_needed = highest_threat.map_or(current_points, |max| current_points.max(max + 1));

    debug!(team = team_name, round = %round.key, %clinching_round, points_needed, "clinch found");

    Ok(Some(ClinchScenario {
        round: round.key,
        clinching_round,
        points_needed,
        current_points,
        points_to_gain: points_needed - current_points,
        required_results: required_results(round, team_name, &threat_set),
        key_fixtures: key_fixtures(&rounds[..step.index], team_name, &threat_set),
        threat_competitors: threats,
        can_clinch_in_current_round,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(name: &str, points: i32) -> Team {
        Team::new(name, 20, 0, 0, 0, 20, 20, points)
    }

    fn names(threats: &[Arc<str>]) -> Vec<&str> {
        threats.iter().map(|t| &**t).collect()
    }

    #[test]
    fn test_proximity_thresholds() {
        assert_eq!(proximity_limit(-5), Some(usize::MAX));
        assert_eq!(proximity_limit(3), Some(usize::MAX));
        assert_eq!(proximity_limit(4), Some(3));
        assert_eq!(proximity_limit(9), Some(2));
        assert_eq!(proximity_limit(12), Some(1));
        assert_eq!(proximity_limit(13), None);
    }

    #[test]
    fn test_classify_threats() {
        // gaps: B 2, C 5, D 5, E 8, F 5 (4th by points, so too far for a 5-point gap)
        let mut fixtures = Vec::new();
        for opponent in ["B", "C", "D", "E", "F"] {
            for round in 1..=4 {
                fixtures.push(Fixture::remaining(opponent, "G").in_round(round));
            }
        }
        let league = League::new(
            vec![
                team("A", 40),
                team("B", 38),
                team("C", 35),
                team("D", 35),
                team("F", 35),
                team("E", 32),
                team("G", 0),
            ],
            fixtures,
        );
        let threats = classify_threats(&league, &league.teams[0]);
        assert_eq!(names(&threats), vec!["B", "C", "D"]);
    }

    #[test]
    fn test_unreachable_rival_is_not_a_threat() {
        // B is 2 behind with nothing left to play
        let league = League::new(
            vec![team("A", 40), team("B", 38), team("C", 37)],
            vec![Fixture::remaining("A", "C").in_round(1)],
        );
        let threats = classify_threats(&league, &league.teams[0]);
        assert_eq!(names(&threats), vec!["C"]);
    }

    #[test]
    fn test_fallback_threat() {
        let league = League::new(
            vec![team("A", 60), team("B", 20), team("C", 30)],
            vec![Fixture::remaining("B", "C").in_round(1)],
        );
        let threats = classify_threats(&league, &league.teams[0]);
        assert_eq!(names(&threats), vec!["C"]);
    }

    #[test]
    fn test_runaway_leader_clinches_in_first_round() {
        let league = League::new(
            vec![team("A", 30), team("B", 15), team("C", 12)],
            vec![
                Fixture::remaining("B", "C").in_round(1),
                Fixture::remaining("A", "B").in_round(2),
                Fixture::remaining("A", "C").in_round(3),
            ],
        );
        let scenario = find_earliest_clinch(&league, "A").unwrap().unwrap();
        assert_eq!(scenario.round, RoundKey::Matchday(1));
        assert_eq!(scenario.points_to_gain, 0);
        assert_eq!(scenario.points_needed, 30);
        assert_eq!(scenario.current_points, 30);
        assert_eq!(names(&scenario.threat_competitors), vec!["B"]);
        // A is idle in round 1, so the title is only sealed in round 2
        assert!(!scenario.can_clinch_in_current_round);
        assert_eq!(scenario.clinching_round, RoundKey::Matchday(2));

        assert_eq!(scenario.required_results.len(), 1);
        assert_eq!(scenario.required_results[0].result, ResultTag::AwayWinOrDraw);
        assert!(scenario.key_fixtures.is_empty());
    }

    #[test]
    fn test_lone_team_clinches_immediately() {
        let league = League::new(
            vec![team("A", 3)],
            vec![Fixture::remaining("A", "Ghost").in_round(4)],
        );
        let scenario = find_earliest_clinch(&league, "A").unwrap().unwrap();
        assert_eq!(scenario.round, RoundKey::Matchday(4));
        assert_eq!(scenario.clinching_round, RoundKey::Matchday(4));
        assert_eq!(scenario.points_to_gain, 0);
        assert!(scenario.threat_competitors.is_empty());
        // the only fixture is against a team outside the roster, so A never actually plays
        assert!(!scenario.can_clinch_in_current_round);
        assert!(scenario.required_results[0].explanation.contains("Ghost"));
    }

    #[test]
    fn test_no_clinch_when_threats_stay_ahead() {
        let league = League::new(
            vec![team("A", 30), team("B", 38), team("C", 37), team("D", 10)],
            vec![
                Fixture::remaining("A", "D").in_round(1),
                Fixture::remaining("B", "C").in_round(2),
            ],
        );
        assert_eq!(find_earliest_clinch(&league, "A").unwrap(), None);
    }

    #[test]
    fn test_unknown_team_and_empty_schedule() {
        let league = League::new(vec![team("A", 30), team("B", 20)], Vec::new());
        assert_eq!(find_earliest_clinch(&league, "A").unwrap(), None);

        let league = League::new(
            vec![team("A", 30), team("B", 20)],
            vec![Fixture::remaining("A", "B").in_round(1)],
        );
        assert_eq!(find_earliest_clinch(&league, "Nobody").unwrap(), None);
    }

    #[test]
    fn test_close_race_with_key_fixtures() {
        // A leads B by 2. Four rounds left; B also plays C, a threat at 3 behind.
        let league = League::new(
            vec![team("A", 50), team("B", 48), team("C", 47), team("D", 20), team("E", 18)],
            vec![
                Fixture::remaining("A", "D").in_round(1),
                Fixture::remaining("B", "E").in_round(1),
                Fixture::remaining("C", "D").in_round(2),
                Fixture::remaining("E", "A").in_round(2),
                Fixture::remaining("B", "C").in_round(3),
                Fixture::remaining("A", "E").in_round(3),
                Fixture::remaining("D", "B").in_round(4),
                Fixture::remaining("C", "A").in_round(4),
            ],
        );
        let scenario = find_earliest_clinch(&league, "A").unwrap().unwrap();
        assert_eq!(names(&scenario.threat_competitors), vec!["B", "C"]);

        // after round 2: A 56, B 48 (+2 left => 54), C 47 (+2 left => 53)
        assert_eq!(scenario.round, RoundKey::Matchday(2));
        assert_eq!(scenario.points_needed, 55);
        assert_eq!(scenario.points_to_gain, 5);
        // before round 2 the gaps are 5 and 6, and A plays in round 2
        assert!(scenario.can_clinch_in_current_round);
        assert_eq!(scenario.clinching_round, RoundKey::Matchday(2));

        let tags: Vec<ResultTag> = scenario.required_results.iter().map(|r| r.result).collect();
        assert_eq!(tags, vec![ResultTag::AwayWin, ResultTag::AwayWinOrDraw]);

        assert_eq!(scenario.key_fixtures.len(), 2);
        assert_eq!(scenario.key_fixtures[0].result, ResultTag::HomeWin);
        assert_eq!(scenario.key_fixtures[0].importance, Importance::Medium);
        assert_eq!(scenario.key_fixtures[1].result, ResultTag::AwayWinOrDraw);
        assert!(scenario.key_fixtures.iter().all(|k| k.round == RoundKey::Matchday(1)));
    }

    fn appearances(keys: &[KeyFixture], name: &str) -> usize {
        keys.iter().filter(|k| k.fixture.involves(name)).count()
    }

    #[test]
    fn test_key_fixture_cap_counts_both_sides() {
        // four threats two points behind; C visits B, D and E, then hosts three minnows.
        // A only plays in round 7, so rounds 1 to 6 all feed key fixtures.
        let league = League::new(
            vec![
                team("A", 50),
                team("B", 48),
                team("C", 48),
                team("D", 48),
                team("E", 48),
                team("F", 10),
                team("G", 10),
                team("H", 10),
                team("X", 10),
            ],
            vec![
                Fixture::remaining("B", "C").in_round(1),
                Fixture::remaining("D", "C").in_round(2),
                Fixture::remaining("E", "C").in_round(3),
                Fixture::remaining("C", "F").in_round(4),
                Fixture::remaining("C", "G").in_round(5),
                Fixture::remaining("C", "H").in_round(6),
                Fixture::remaining("A", "X").in_round(7),
            ],
        );
        let scenario = find_earliest_clinch(&league, "A").unwrap().unwrap();
        assert_eq!(names(&scenario.threat_competitors), vec!["B", "C", "D", "E"]);

        // C draws three times to reach 51, so A is only safe once it wins in round 7
        assert_eq!(scenario.round, RoundKey::Matchday(7));
        assert_eq!(scenario.points_needed, 52);
        assert!(!scenario.can_clinch_in_current_round);

        let keys = &scenario.key_fixtures;
        assert_eq!(keys.len(), 3);
        for name in ["A", "B", "C", "D", "E"] {
            assert!(appearances(keys, name) <= KEY_FIXTURES_PER_TEAM, "{} listed too often", name);
        }
        assert_eq!(appearances(keys, "C"), 3);
        assert!(keys.iter().all(|k| k.result == ResultTag::Draw && k.importance == Importance::High));
        let rounds: Vec<RoundKey> = keys.iter().map(|k| k.round).collect();
        assert_eq!(rounds, vec![RoundKey::Matchday(1), RoundKey::Matchday(2), RoundKey::Matchday(3)]);
    }

    #[test]
    fn test_key_fixtures_skip_repeated_pairings() {
        // A and B each meet the same side twice; B has five distinct opponents before the clinch round
        let league = League::new(
            vec![
                team("A", 50),
                team("B", 48),
                team("I", 10),
                team("J", 10),
                team("K", 10),
                team("L", 10),
                team("M", 10),
                team("N", 10),
                team("O", 10),
            ],
            vec![
                Fixture::remaining("A", "I").in_round(1),
                Fixture::remaining("B", "J").in_round(1),
                Fixture::remaining("I", "A").in_round(2),
                Fixture::remaining("J", "B").in_round(2),
                Fixture::remaining("B", "K").in_round(3),
                Fixture::remaining("L", "B").in_round(4),
                Fixture::remaining("B", "M").in_round(5),
                Fixture::remaining("N", "B").in_round(6),
                Fixture::remaining("K", "B").in_round(7),
                Fixture::remaining("B", "O").in_round(8),
            ],
        );
        let scenario = find_earliest_clinch(&league, "A").unwrap().unwrap();
        // A stops at 56; B's ceiling drops below that once two games are left
        assert_eq!(scenario.round, RoundKey::Matchday(6));

        let keys = &scenario.key_fixtures;
        let pairs: FnvHashSet<(Arc<str>, Arc<str>)> = keys.iter().map(|k| k.fixture.pairing()).collect();
        assert_eq!(pairs.len(), keys.len());
        assert_eq!(appearances(keys, "A"), 1);
        assert_eq!(appearances(keys, "B"), KEY_FIXTURES_PER_TEAM);

        let listed: Vec<String> = keys.iter().map(|k| k.fixture.to_string()).collect();
        let expected: Vec<String> = [("A", "I"), ("B", "J"), ("B", "K"), ("L", "B")]
            .iter()
            .map(|(h, a)| Fixture::remaining(h, a).to_string())
            .collect();
        assert_eq!(listed, expected);

        assert_eq!(keys[0].result, ResultTag::HomeWin);
        assert_eq!(keys[0].explanation, "A must beat I to build the points gap");
        assert_eq!(keys[1].result, ResultTag::AwayWinOrDraw);
        assert!(keys.iter().all(|k| k.importance == Importance::Medium));
    }

    #[test]
    fn test_threat_maximums_never_rise() {
        let league = League::new(
            vec![team("A", 50), team("B", 49), team("C", 47), team("D", 20)],
            vec![
                Fixture::remaining("B", "C").in_round(1),
                Fixture::remaining("A", "D").in_round(1),
                Fixture::remaining("C", "A").in_round(2),
                Fixture::remaining("B", "D").in_round(2),
                Fixture::remaining("A", "B").in_round(3),
                Fixture::remaining("D", "C").in_round(3),
            ],
        );
        let standings = league.standings();
        let rounds = group_by_round(league.remaining_fixtures()).unwrap();
        let threats = classify_threats(&league, &league.teams[0]);
        let steps = walk_rounds(&standings, &rounds, "A", &threats);
        assert_eq!(steps.len(), 3);

        for (i, name) in threats.iter().enumerate() {
            let initial = standings.get(name).unwrap().max_possible_points(league.remaining_for(name).len());
            let mut previous = initial;
            let mut eliminated = false;
            for step in &steps {
                let (_, max) = &step.threat_maximums[i];
                assert!(*max <= previous, "{} maximum rose from {} to {}", name, previous, max);
                let target_points = step.after.get("A").unwrap().points;
                if eliminated {
                    assert!(*max < target_points);
                }
                eliminated |= *max < target_points;
                previous = *max;
            }
        }
    }

    #[test]
    fn test_result_tag_labels() {
        assert_eq!(ResultTag::HomeWinOrDraw.to_string(), "home_win_or_draw");
        assert_eq!(serde_json::to_string(&ResultTag::AwayWin).unwrap(), "\"away_win\"");
        assert_eq!(serde_json::to_string(&Importance::High).unwrap(), "\"high\"");
    }
}
