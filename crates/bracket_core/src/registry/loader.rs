//! CSV readers for the reference tables.
//!
//! - strengths: `team,strength,error` (header row required; `team_names`
//!   is accepted for the first column)
//! - history: `Seed,Round of 64,Round of 32,...` cumulative counts
//! - field: `team,seed,region`

use serde::Deserialize;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

use super::field::FieldEntry;
use super::seed_table::{SeedAdvancementTable, SeedCounts};
use crate::error::{BracketError, Result};

/// One row of the team strength table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StrengthRow {
    #[serde(alias = "team_names")]
    pub team: String,
    pub strength: f64,
    #[serde(alias = "uncertainty")]
    pub error: f64,
}

#[derive(Debug, Deserialize)]
struct FieldRow {
    #[serde(alias = "team_names")]
    team: String,
    #[serde(alias = "Seed")]
    seed: u8,
    #[serde(alias = "Region")]
    region: String,
}

fn open(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    if !path.exists() {
        return Err(BracketError::MissingDataSource { path: path.display().to_string() });
    }
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| BracketError::Csv { path: path.display().to_string(), source })
}

fn reader<R: io::Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(input)
}

pub fn load_strengths(path: &Path) -> Result<Vec<StrengthRow>> {
    let rows = parse_strengths(open(path)?, &path.display().to_string())?;
    debug!(path = %path.display(), rows = rows.len(), "loaded strength table");
    Ok(rows)
}

pub fn read_strengths<R: io::Read>(input: R, source_name: &str) -> Result<Vec<StrengthRow>> {
    parse_strengths(reader(input), source_name)
}

fn parse_strengths<R: io::Read>(mut rdr: csv::Reader<R>, source_name: &str) -> Result<Vec<StrengthRow>> {
    rdr.deserialize()
        .collect::<std::result::Result<Vec<StrengthRow>, _>>()
        .map_err(|source| BracketError::Csv { path: source_name.to_string(), source })
}

pub fn load_field(path: &Path) -> Result<Vec<FieldEntry>> {
    parse_field(open(path)?, &path.display().to_string())
}

pub fn read_field<R: io::Read>(input: R, source_name: &str) -> Result<Vec<FieldEntry>> {
    parse_field(reader(input), source_name)
}

fn parse_field<R: io::Read>(mut rdr: csv::Reader<R>, source_name: &str) -> Result<Vec<FieldEntry>> {
    let mut entries = Vec::new();
    for row in rdr.deserialize::<FieldRow>() {
        let row = row.map_err(|source| BracketError::Csv { path: source_name.to_string(), source })?;
        if !(1..=16).contains(&row.seed) {
            return Err(BracketError::InvalidData(format!(
                "{source_name}: seed {} for '{}' is outside 1..=16",
                row.seed, row.team
            )));
        }
        entries.push(FieldEntry { team: row.team, seed: row.seed, region: row.region.parse()? });
    }
    Ok(entries)
}

pub fn load_history(path: &Path) -> Result<SeedAdvancementTable> {
    let table = parse_history(open(path)?, &path.display().to_string())?;
    debug!(path = %path.display(), seeds = table.seeds().count(), "loaded seed history");
    Ok(table)
}

pub fn read_history<R: io::Read>(input: R, source_name: &str) -> Result<SeedAdvancementTable> {
    parse_history(reader(input), source_name)
}

fn parse_history<R: io::Read>(mut rdr: csv::Reader<R>, source_name: &str) -> Result<SeedAdvancementTable> {
    let csv_err = |source| BracketError::Csv { path: source_name.to_string(), source };

    let columns = rdr.headers().map_err(csv_err)?.len();
    if columns < 2 {
        return Err(BracketError::InvalidData(format!(
            "{source_name}: expected a seed column followed by round columns"
        )));
    }

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(csv_err)?;
        let raw_seed = record.get(0).unwrap_or_default();
        let Some(seed) = parse_seed(raw_seed) else {
            warn!(source = source_name, seed = raw_seed, "skipping history row without a 1-16 seed");
            continue;
        };
        let counts = record.iter().skip(1).map(|cell| cell.parse::<f64>().unwrap_or(f64::NAN)).collect();
        rows.push(SeedCounts { seed, counts });
    }

    Ok(SeedAdvancementTable::from_counts(&rows))
}

fn parse_seed(raw: &str) -> Option<u8> {
    let value: f64 = raw.parse().ok()?;
    if value.fract() != 0.0 || !(1.0..=16.0).contains(&value) {
        return None;
    }
    Some(value as u8)
}
