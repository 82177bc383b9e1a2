//! String-in, string-out entry points for hosts that talk JSON.

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::config::{SimConfig, DEFAULT_WEIGHT};
use crate::engine::runner::TournamentRunner;
use crate::error::{BracketError, Result};
use crate::models::{AuthoritativeResult, TournamentResult};
use crate::registry::TeamRegistry;
use crate::scoring::{rescore_all, score_value, standings, GameCall, ResultLog, Standing, StoredBracket};

#[derive(Debug, Deserialize)]
pub struct AutofillRequest {
    pub strategy: String,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl From<AutofillRequest> for SimConfig {
    fn from(request: AutofillRequest) -> Self {
        SimConfig {
            strategy: request.strategy,
            weight: request.weight.unwrap_or(DEFAULT_WEIGHT),
            seed: request.seed,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub bracket: Value,
    #[serde(default)]
    pub results: AuthoritativeResult,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub score: u32,
}

/// Official results come as a round map, a game-call log, or both; calls
/// are applied on top of the map.
#[derive(Debug, Deserialize)]
pub struct RescoreRequest {
    #[serde(default)]
    pub brackets: Vec<StoredBracket>,
    #[serde(default)]
    pub results: AuthoritativeResult,
    #[serde(default)]
    pub calls: Vec<GameCall>,
}

#[derive(Debug, Serialize)]
pub struct RescoreResponse {
    pub brackets_scored: usize,
    pub top_score: u32,
    pub standings: Vec<Standing>,
    pub computed_at: DateTime<Utc>,
}

/// Run one autofill with its own generator: seeded when the config names a
/// seed, from OS entropy otherwise.
pub fn simulate(registry: &TeamRegistry, config: &SimConfig) -> Result<TournamentResult> {
    let strategy = config.validate()?;
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    info!(strategy = strategy.name(), seed = ?config.seed, "autofill requested");
    Ok(TournamentRunner::new(registry).run(&strategy, &mut rng))
}

pub fn autofill_bracket_json(registry: &TeamRegistry, request_json: &str) -> Result<String> {
    let request: AutofillRequest = serde_json::from_str(request_json)
        .map_err(|e| BracketError::InvalidRequest(format!("invalid autofill request: {}", e)))?;
    let result = simulate(registry, &SimConfig::from(request))?;
    Ok(serde_json::to_string(&result)?)
}

pub fn score_bracket_json(request_json: &str) -> Result<String> {
    let request: ScoreRequest = serde_json::from_str(request_json)
        .map_err(|e| BracketError::InvalidRequest(format!("invalid score request: {}", e)))?;
    let score = score_value(&request.bracket, &request.results);
    Ok(serde_json::to_string(&ScoreResponse { score })?)
}

pub fn rescore_json(request_json: &str) -> Result<String> {
    let request: RescoreRequest = serde_json::from_str(request_json)
        .map_err(|e| BracketError::InvalidRequest(format!("invalid rescore request: {}", e)))?;

    let mut results = request.results;
    ResultLog::from_calls(&request.calls)?.apply_to(&mut results);

    let summary = rescore_all(&request.brackets, &results);
    let response = RescoreResponse {
        brackets_scored: summary.brackets_scored,
        top_score: summary.top_score,
        standings: standings(&summary.scores),
        computed_at: Utc::now(),
    };
    Ok(serde_json::to_string(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_support::sample_registry;
    use serde_json::json;

    #[test]
    fn test_autofill_chalk() {
        let registry = sample_registry();
        let out = autofill_bracket_json(&registry, r#"{"strategy": "chalk"}"#).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["champion"], "Florida");
        assert_eq!(parsed["west_r64"].as_array().unwrap().len(), 16);
        assert_eq!(parsed["championship"][0]["seed"], 1);
    }

    #[test]
    fn test_autofill_seed_is_reproducible() {
        let registry = sample_registry();
        let request = json!({ "strategy": "simulate", "weight": 0.4, "seed": 2025 }).to_string();
        let first = autofill_bracket_json(&registry, &request).unwrap();
        let second = autofill_bracket_json(&registry, &request).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_autofill_rejects_bad_requests() {
        let registry = sample_registry();
        let err = autofill_bracket_json(&registry, r#"{"strategy": "vibes"}"#).unwrap_err();
        assert!(matches!(err, BracketError::UnknownStrategy(_)));
        let err = autofill_bracket_json(&registry, r#"{"strategy": "simulate", "weight": -0.1}"#).unwrap_err();
        assert!(matches!(err, BracketError::InvalidWeight(_)));
        let err = autofill_bracket_json(&registry, "not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ClientInput);
    }

    #[test]
    fn test_score_bracket_json() {
        let request = json!({
            "bracket": { "west_r64": ["Florida", "Oklahoma"], "championship": ["Duke"] },
            "results": { "west_r64": ["Florida", "Connecticut"], "championship": ["Duke"] }
        });
        let out = score_bracket_json(&request.to_string()).unwrap();
        assert_eq!(serde_json::from_str::<Value>(&out).unwrap(), json!({ "score": 33 }));
    }

    #[test]
    fn test_rescore_json_with_calls() {
        let request = json!({
            "brackets": [
                { "id": "alice", "bracket": { "east_r64": ["Duke"], "ff_right": ["Duke"] } },
                { "id": "bob", "bracket": { "east_r64": ["American"] } },
                { "id": "carol", "bracket": { "east_r64": ["Duke"] } }
            ],
            "results": { "east_r64": ["American"] },
            "calls": [
                { "round_id": "east_r64", "slot_index": 0, "winner_name": "Duke" },
                { "round_id": "ff_right", "slot_index": 0, "winner_name": "Duke" }
            ]
        });
        let out: Value = serde_json::from_str(&rescore_json(&request.to_string()).unwrap()).unwrap();
        assert_eq!(out["brackets_scored"], 3);
        assert_eq!(out["top_score"], 17);
        assert_eq!(out["standings"][0], json!({ "rank": 1, "id": "alice", "score": 17 }));
        assert_eq!(out["standings"][2], json!({ "rank": 3, "id": "bob", "score": 0 }));
        assert!(out["computed_at"].is_string());
    }

    #[test]
    fn test_rescore_json_rejects_bad_call() {
        let request = json!({
            "brackets": [],
            "calls": [{ "round_id": "ff_left", "slot_index": 2, "winner_name": "Duke" }]
        });
        let err = rescore_json(&request.to_string()).unwrap_err();
        assert!(matches!(err, BracketError::SlotOutOfRange { .. }));
    }
}
