//! Historical seed advancement probabilities.
//!
//! Source counts are cumulative: how many teams of a seed reached each
//! round (Round of 64, Round of 32, Sweet 16, Elite 8, Final Four, ...).
//! They are turned into round-over-round survival probabilities:
//! `p(seed, k) = count[k + 1] / count[k]`, the chance a team of that seed
//! wins its round-k game given it got there.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::engine::topology::RegionalRound;

/// Fallback used when either side of a matchup has no usable entry.
pub const NEUTRAL_SEED_PROB: f64 = 0.5;

/// Cumulative advancement counts for one seed, starting at the Round of 64.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedCounts {
    pub seed: u8,
    pub counts: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedAdvancementTable {
    probs: BTreeMap<u8, [Option<f64>; 4]>,
}

impl SeedAdvancementTable {
    /// Build conditional probabilities from cumulative counts.
    ///
    /// Degenerate cells (zero or missing denominator, non-finite values)
    /// stay empty; they are only replaced by a neutral value at lookup time.
    pub fn from_counts(rows: &[SeedCounts]) -> Self {
        let mut probs = BTreeMap::new();
        for row in rows {
            let mut per_round = [None; 4];
            for round in RegionalRound::ALL {
                let k = round.index();
                per_round[k] = match (row.counts.get(k), row.counts.get(k + 1)) {
                    (Some(&reached), Some(&advanced)) => conditional(reached, advanced),
                    _ => None,
                };
            }
            probs.insert(row.seed, per_round);
        }
        Self { probs }
    }

    pub fn probability(&self, seed: u8, round: RegionalRound) -> Option<f64> {
        self.probs.get(&seed)?[round.index()]
    }

    /// Seed probabilities for both sides of a regional game.
    ///
    /// If either lookup is empty both sides get [`NEUTRAL_SEED_PROB`].
    pub fn pair_odds(&self, seed_a: u8, seed_b: u8, round: RegionalRound) -> (f64, f64) {
        match (self.probability(seed_a, round), self.probability(seed_b, round)) {
            (Some(a), Some(b)) => (a, b),
            _ => (NEUTRAL_SEED_PROB, NEUTRAL_SEED_PROB),
        }
    }

    pub fn seeds(&self) -> impl Iterator<Item = u8> + '_ {
        self.probs.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }
}

fn conditional(reached: f64, advanced: f64) -> Option<f64> {
    if !reached.is_finite() || !advanced.is_finite() || reached <= 0.0 {
        return None;
    }
    Some((advanced / reached).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SeedAdvancementTable {
        SeedAdvancementTable::from_counts(&[
            SeedCounts { seed: 1, counts: vec![156.0, 154.0, 132.0, 108.0, 64.0] },
            SeedCounts { seed: 16, counts: vec![156.0, 2.0, 0.0, 0.0, 0.0] },
            SeedCounts { seed: 12, counts: vec![156.0, 55.0, f64::NAN] },
        ])
    }

    #[test]
    fn test_conditional_probabilities() {
        let t = table();
        let p = t.probability(1, RegionalRound::R64).unwrap();
        assert!((p - 154.0 / 156.0).abs() < 1e-12);
        let p = t.probability(1, RegionalRound::E8).unwrap();
        assert!((p - 64.0 / 108.0).abs() < 1e-12);
        assert_eq!(t.probability(16, RegionalRound::R32), Some(0.0));
    }

    #[test]
    fn test_degenerate_cells_stay_empty() {
        let t = table();
        // 0 / 0
        assert_eq!(t.probability(16, RegionalRound::S16), None);
        // NaN count and a missing column
        assert_eq!(t.probability(12, RegionalRound::R32), None);
        assert_eq!(t.probability(12, RegionalRound::E8), None);
        // unknown seed
        assert_eq!(t.probability(7, RegionalRound::R64), None);
    }

    #[test]
    fn test_pair_odds_falls_back_to_coin() {
        let t = table();
        let (a, b) = t.pair_odds(1, 16, RegionalRound::R64);
        assert!(a > 0.98 && b < 0.02);
        assert_eq!(t.pair_odds(1, 7, RegionalRound::R64), (0.5, 0.5));
    }
}
