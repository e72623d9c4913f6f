// Outcome triples (wins, draws, losses) for a team's remaining fixtures, and how many
// fixture-level result assignments realise each one.
//
// Counts are exact u128 values. 3^80 is the largest power of three that fits, which caps the
// exact solver at 80 remaining fixtures; the log-space variant has no such ceiling.

use serde::Serialize;

/// Largest n for which 3^n fits in a u128
pub const MAX_EXACT_FIXTURES: usize = 80;

/// One way a team's season could end, without saying which fixtures were won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Outcome {
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

impl Outcome {
    pub fn games(&self) -> u32 {
        self.wins + self.draws + self.losses
    }

    pub fn points(&self) -> i32 {
        self.wins as i32 * crate::team::POINTS_WIN + self.draws as i32 * crate::team::POINTS_DRAW
    }
}

/// Every (wins, draws, losses) triple summing to `remaining`, wins ascending then draws ascending.
/// There are (n+1)(n+2)/2 of them.
pub fn enumerate_outcomes(remaining: u32) -> Vec<Outcome> {
    let n = remaining as usize;
    let mut outcomes = Vec::with_capacity((n + 1) * (n + 2) / 2);
    for wins in 0..=remaining {
        for draws in 0..=(remaining - wins) {
            outcomes.push(Outcome {
                wins,
                draws,
                losses: remaining - wins - draws,
            });
        }
    }
    outcomes
}

/// Binomial coefficient with overflow checking
pub fn binomial(n: u32, k: u32) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        // acc * (n - i) is divisible by (i + 1) at every step
        acc = acc.checked_mul((n - i) as u128)? / (i + 1) as u128;
    }
    Some(acc)
}

/// Multinomial coefficient n! / (wins! draws! losses!), None on overflow
pub fn ways_to_achieve(outcome: &Outcome) -> Option<u128> {
    let n = outcome.games();
    let choose_wins = binomial(n, outcome.wins)?;
    let choose_draws = binomial(n - outcome.wins, outcome.draws)?;
    choose_wins.checked_mul(choose_draws)
}

/// 3^n, None on overflow
pub fn total_outcomes(fixtures: usize) -> Option<u128> {
    3u128.checked_pow(u32::try_from(fixtures).ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_enumeration_completeness() {
        for n in 0..=12u32 {
            let outcomes = enumerate_outcomes(n);
            let expected = ((n + 1) * (n + 2) / 2) as usize;
            assert_eq!(outcomes.len(), expected);
            assert!(outcomes.iter().all(|o| o.games() == n));
            let unique: HashSet<Outcome> = outcomes.iter().copied().collect();
            assert_eq!(unique.len(), expected);
        }
    }

    #[test]
    fn test_zero_remaining() {
        let outcomes = enumerate_outcomes(0);
        assert_eq!(outcomes, vec![Outcome { wins: 0, draws: 0, losses: 0 }]);
        assert_eq!(ways_to_achieve(&outcomes[0]), Some(1));
        assert_eq!(total_outcomes(0), Some(1));
    }

    #[test]
    fn test_multinomial_sum_law() {
        for n in [0u32, 1, 2, 5, 10, 20, 40] {
            let sum: u128 = enumerate_outcomes(n)
                .iter()
                .map(|o| ways_to_achieve(o).unwrap())
                .sum();
            assert_eq!(sum, 3u128.pow(n), "sum of multinomials for n={}", n);
        }
    }

    #[test]
    fn test_known_coefficients() {
        assert_eq!(ways_to_achieve(&Outcome { wins: 2, draws: 1, losses: 1 }), Some(12));
        assert_eq!(ways_to_achieve(&Outcome { wins: 3, draws: 0, losses: 0 }), Some(1));
        assert_eq!(binomial(52, 5), Some(2_598_960));
        assert_eq!(binomial(3, 5), Some(0));
    }

    #[test]
    fn test_total_outcomes_ceiling() {
        assert!(total_outcomes(MAX_EXACT_FIXTURES).is_some());
        assert!(total_outcomes(MAX_EXACT_FIXTURES + 1).is_none());
    }
}
