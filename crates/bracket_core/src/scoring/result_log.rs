//! Official result entry.
//!
//! Results are entered one game at a time as (round id, slot index, winner)
//! calls. A later call for the same slot replaces the earlier one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::engine::topology::RoundId;
use crate::error::{BracketError, Result};
use crate::models::AuthoritativeResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCall {
    pub round_id: String,
    pub slot_index: usize,
    pub winner_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultLog {
    calls: BTreeMap<(RoundId, usize), String>,
}

impl ResultLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a log from stored calls, in order.
    pub fn from_calls<'c>(calls: impl IntoIterator<Item = &'c GameCall>) -> Result<Self> {
        let mut log = Self::new();
        for call in calls {
            log.record(call)?;
        }
        Ok(log)
    }

    /// Validate and upsert one call. Returns the winner it replaced, if any.
    pub fn record(&mut self, call: &GameCall) -> Result<Option<String>> {
        let round_id = call.round_id.trim();
        let round: RoundId = round_id.parse()?;
        if round == RoundId::Champion {
            return Err(BracketError::InvalidRequest(
                "champion is derived from the championship slot".to_string(),
            ));
        }
        if call.slot_index >= round.slots() {
            return Err(BracketError::SlotOutOfRange {
                round_id: round_id.to_string(),
                slot: call.slot_index,
                slots: round.slots(),
            });
        }
        let winner = call.winner_name.trim();
        if winner.is_empty() {
            return Err(BracketError::InvalidRequest(
                "round_id, slot_index, and winner_name are required".to_string(),
            ));
        }

        let previous = self.calls.insert((round, call.slot_index), winner.to_string());
        debug!(%round, slot = call.slot_index, winner, replaced = previous.is_some(), "result recorded");
        Ok(previous)
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Stored calls in (round, slot) order.
    pub fn calls(&self) -> Vec<GameCall> {
        self.calls
            .iter()
            .map(|((round, slot), winner)| GameCall {
                round_id: round.to_string(),
                slot_index: *slot,
                winner_name: winner.clone(),
            })
            .collect()
    }

    /// Sparse official results; undecided slots before a decided one are `None`.
    pub fn authoritative(&self) -> AuthoritativeResult {
        let mut result = AuthoritativeResult::new();
        self.apply_to(&mut result);
        result
    }

    /// Overwrite `result` with every recorded call.
    pub fn apply_to(&self, result: &mut AuthoritativeResult) {
        for ((round, slot), winner) in &self.calls {
            result.set(*round, *slot, winner.clone());
        }
    }
}
