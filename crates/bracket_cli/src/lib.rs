//! File plumbing for the `bracket` command.
//!
//! Stored brackets, official results and generated brackets all live in
//! JSON files; everything else is delegated to `bracket_core`.

use anyhow::{Context, Result};
use bracket_core::scoring::{GameCall, ResultLog, StoredBracket};
use bracket_core::AuthoritativeResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read JSON file: {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse JSON: {}", path.display()))
}

/// Pretty-print `value` into `path`, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text).with_context(|| format!("Failed to write output file: {}", path.display()))
}

/// Stored brackets: either `[{"id", "bracket"}, ...]` or `{"<id>": <bracket>, ...}`.
pub fn load_brackets(path: &Path) -> Result<Vec<StoredBracket>> {
    match read_json::<Value>(path)? {
        Value::Array(items) => serde_json::from_value(Value::Array(items))
            .with_context(|| format!("Invalid bracket list in {}", path.display())),
        Value::Object(map) => {
            let by_id: BTreeMap<String, Value> = map.into_iter().collect();
            Ok(by_id.into_iter().map(|(id, bracket)| StoredBracket { id, bracket }).collect())
        }
        _ => anyhow::bail!("Expected a list or map of brackets in {}", path.display()),
    }
}

/// Official results from a round map file, a game-call log file, or both.
pub fn load_results(results: Option<&Path>, calls: Option<&Path>) -> Result<AuthoritativeResult> {
    let mut official = match results {
        Some(path) => read_json(path)?,
        None => AuthoritativeResult::new(),
    };
    if let Some(path) = calls {
        let calls: Vec<GameCall> = read_json(path)?;
        let log = ResultLog::from_calls(&calls).with_context(|| format!("Invalid game call in {}", path.display()))?;
        log.apply_to(&mut official);
    }
    Ok(official)
}
