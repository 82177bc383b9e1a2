//! Rescoring every stored bracket against the current official results.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use super::score_value;
use crate::models::AuthoritativeResult;

/// A saved bracket as it sits in storage; `bracket` may be either shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredBracket {
    pub id: String,
    pub bracket: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredBracket {
    pub id: String,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RescoreSummary {
    pub brackets_scored: usize,
    pub top_score: u32,
    pub scores: Vec<ScoredBracket>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub rank: usize,
    pub id: String,
    pub score: u32,
}

/// Score every bracket. Output keeps input order.
///
/// With no decided game yet nothing is scored and the summary is empty.
pub fn rescore_all(brackets: &[StoredBracket], authoritative: &AuthoritativeResult) -> RescoreSummary {
    if authoritative.decided_games() == 0 {
        info!(brackets = brackets.len(), "no official results yet, skipping rescore");
        return RescoreSummary { brackets_scored: 0, top_score: 0, scores: Vec::new() };
    }

    let scores: Vec<ScoredBracket> = brackets
        .par_iter()
        .map(|stored| ScoredBracket {
            id: stored.id.clone(),
            score: score_value(&stored.bracket, authoritative),
        })
        .collect();

    let top_score = scores.iter().map(|s| s.score).max().unwrap_or(0);
    info!(
        brackets = scores.len(),
        top_score,
        decided_games = authoritative.decided_games(),
        "rescored brackets"
    );

    RescoreSummary { brackets_scored: scores.len(), top_score, scores }
}

/// Leaderboard order: score descending, then id. Equal scores share a rank
/// and the next rank skips ahead (1, 2, 2, 4).
pub fn standings(scores: &[ScoredBracket]) -> Vec<Standing> {
    let mut sorted: Vec<&ScoredBracket> = scores.iter().collect();
    sorted.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.id.cmp(&b.id)));

    let mut table: Vec<Standing> = Vec::with_capacity(sorted.len());
    for (i, scored) in sorted.into_iter().enumerate() {
        let rank = match table.last() {
            Some(prev) if prev.score == scored.score => prev.rank,
            _ => i + 1,
        };
        table.push(Standing { rank, id: scored.id.clone(), score: scored.score });
    }
    table
}
