//! Shared fixtures for unit tests.

use crate::registry::{default_field, SeedAdvancementTable, SeedCounts, StrengthRow, TeamRegistry};

/// Strength falls with seed; a small per-team offset keeps values distinct.
pub(crate) fn sample_strengths() -> Vec<StrengthRow> {
    default_field()
        .iter()
        .enumerate()
        .map(|(i, entry)| StrengthRow {
            team: entry.team.clone(),
            strength: 0.95 - entry.seed as f64 * 0.04 - i as f64 * 0.0001,
            error: 0.06,
        })
        .collect()
}

/// Synthetic history: a seed-s team survives each round with (17 - s) / 17.
pub(crate) fn sample_history() -> SeedAdvancementTable {
    let rows: Vec<SeedCounts> = (1..=16u8)
        .map(|seed| {
            let survive = (17 - seed) as f64 / 17.0;
            let counts = (0..6).map(|k| 160.0 * survive.powi(k)).collect();
            SeedCounts { seed, counts }
        })
        .collect();
    SeedAdvancementTable::from_counts(&rows)
}

pub(crate) fn sample_registry() -> TeamRegistry {
    TeamRegistry::from_parts(&default_field(), &sample_strengths(), sample_history())
        .expect("sample registry is valid")
}
