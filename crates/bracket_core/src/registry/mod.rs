//! Team registry: the immutable reference data a tournament run needs.
//!
//! Built once from the strength table, the field (team → seed, region) and
//! the historical seed table, then passed by reference into the runner.

pub mod field;
pub mod loader;
pub mod seed_table;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{info, warn};

use crate::config::DataPaths;
use crate::error::{BracketError, Result};
use crate::models::{Region, Team};

pub use field::{default_field, FieldEntry};
pub use loader::StrengthRow;
pub use seed_table::{SeedAdvancementTable, SeedCounts, NEUTRAL_SEED_PROB};

/// Team listing for result-entry screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub seed: u8,
    pub region: Region,
}

#[derive(Debug, Clone)]
pub struct TeamRegistry {
    teams: Vec<Team>,
    history: SeedAdvancementTable,
}

impl TeamRegistry {
    /// Registry from already-built teams.
    pub fn new(teams: Vec<Team>, history: SeedAdvancementTable) -> Result<Self> {
        let mut seen = HashSet::new();
        for team in &teams {
            if !(1..=16).contains(&team.seed) {
                return Err(BracketError::InvalidData(format!(
                    "seed {} for '{}' is outside 1..=16",
                    team.seed, team.name
                )));
            }
            if !team.strength.is_finite() {
                return Err(BracketError::InvalidData(format!("non-finite strength for '{}'", team.name)));
            }
            if !seen.insert(team.name.as_str()) {
                return Err(BracketError::InvalidData(format!("duplicate team '{}'", team.name)));
            }
        }
        Ok(Self { teams, history })
    }

    /// Join the field with the strength table, keeping field order.
    ///
    /// Strength rows for teams outside the field are ignored; a field team
    /// without a strength row is a configuration error.
    pub fn from_parts(
        field: &[FieldEntry],
        strengths: &[StrengthRow],
        history: SeedAdvancementTable,
    ) -> Result<Self> {
        let mut by_name: HashMap<&str, &StrengthRow> = HashMap::with_capacity(strengths.len());
        for row in strengths {
            if by_name.insert(row.team.as_str(), row).is_some() {
                warn!(team = %row.team, "duplicate strength row, keeping the last one");
            }
        }

        let teams = field
            .iter()
            .map(|entry| {
                let row = by_name
                    .get(entry.team.as_str())
                    .ok_or_else(|| BracketError::MissingStrength { team: entry.team.clone() })?;
                Ok(Team::new(entry.team.clone(), entry.seed, entry.region, row.strength, row.error))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(teams, history)
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team(&self, name: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.name == name)
    }

    pub fn history(&self) -> &SeedAdvancementTable {
        &self.history
    }

    pub fn region_teams(&self, region: Region) -> impl Iterator<Item = &Team> {
        self.teams.iter().filter(move |t| t.region == region)
    }

    /// (region, seed) slots shared by more than one team.
    pub fn play_in_slots(&self) -> Vec<(Region, u8)> {
        let mut counts: BTreeMap<(Region, u8), usize> = BTreeMap::new();
        for team in &self.teams {
            *counts.entry((team.region, team.seed)).or_default() += 1;
        }
        counts.into_iter().filter(|&(_, n)| n > 1).map(|(slot, _)| slot).collect()
    }

    /// Every team sorted by (seed, name).
    pub fn roster(&self) -> Vec<RosterEntry> {
        let mut roster: Vec<RosterEntry> = self
            .teams
            .iter()
            .map(|t| RosterEntry { name: t.name.clone(), seed: t.seed, region: t.region })
            .collect();
        roster.sort_by(|a, b| a.seed.cmp(&b.seed).then_with(|| a.name.cmp(&b.name)));
        roster
    }
}

/// Load every reference table named by `paths` and build the registry.
///
/// Missing strength or history files are fatal. When no field file is
/// configured the embedded 2025 field is used.
pub fn resolve_teams(paths: &DataPaths) -> Result<TeamRegistry> {
    let strengths = loader::load_strengths(&paths.strengths)?;
    let history = loader::load_history(&paths.history)?;
    let field = match &paths.field {
        Some(path) => loader::load_field(path)?,
        None => default_field(),
    };

    let registry = TeamRegistry::from_parts(&field, &strengths, history)?;
    info!(
        teams = registry.teams().len(),
        play_ins = registry.play_in_slots().len(),
        "team registry loaded"
    );
    Ok(registry)
}

static SHARED_REGISTRY: OnceCell<TeamRegistry> = OnceCell::new();

/// Process-wide registry loaded from [`DataPaths::from_env`] on first use.
///
/// A failed load is not cached; the next call tries again.
pub fn shared_registry() -> Result<&'static TeamRegistry> {
    load_once(&SHARED_REGISTRY, DataPaths::from_env)
}

fn load_once(cell: &OnceCell<TeamRegistry>, paths: impl FnOnce() -> DataPaths) -> Result<&TeamRegistry> {
    cell.get_or_try_init(|| resolve_teams(&paths()))
}
