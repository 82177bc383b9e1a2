use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use crate::engine::topology::RoundId;
use crate::models::TeamEntry;

/// Full structured bracket as consumed by the rendering layer.
///
/// Every container lists the competitors of its games in slot order, so
/// entries `2i` and `2i + 1` play game `i`. Serializes to a flat object:
/// `{"west_r64": [{"seed": 1, "name": "Florida"}, ...], ..., "champion": "Florida"}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TournamentResult {
    #[serde(flatten)]
    pub rounds: BTreeMap<RoundId, Vec<TeamEntry>>,
    pub champion: Option<String>,
}

impl TournamentResult {
    /// Competitors recorded for a container (empty when absent).
    pub fn round(&self, id: RoundId) -> &[TeamEntry] {
        self.rounds.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn names(&self, id: RoundId) -> Vec<&str> {
        self.round(id).iter().map(|entry| entry.name.as_str()).collect()
    }

    /// Winners per game, derived from the competitors of the next container.
    pub fn winners(&self, id: RoundId) -> Vec<Option<String>> {
        let advanced: Vec<&str> = match id.successor() {
            Some(RoundId::Champion) => self.champion.iter().map(String::as_str).collect(),
            Some(next) => self.names(next),
            None => Vec::new(),
        };
        self.round(id)
            .chunks_exact(2)
            .map(|pair| {
                match (advanced.contains(&pair[0].name.as_str()), advanced.contains(&pair[1].name.as_str())) {
                    (true, false) => Some(pair[0].name.clone()),
                    (false, true) => Some(pair[1].name.clone()),
                    _ => None,
                }
            })
            .collect()
    }
}

/// Official outcomes, addressed by round id and game slot.
///
/// Lists may be sparse: `None` means the game has not been decided yet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "BTreeMap<String, Value>")]
pub struct AuthoritativeResult {
    rounds: BTreeMap<RoundId, Vec<Option<String>>>,
}

impl AuthoritativeResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the winner of one game, padding earlier slots with `None`.
    pub fn set(&mut self, round: RoundId, slot: usize, winner: impl Into<String>) {
        let slots = self.rounds.entry(round).or_default();
        if slots.len() <= slot {
            slots.resize(slot + 1, None);
        }
        slots[slot] = Some(winner.into());
    }

    pub fn insert_round(&mut self, round: RoundId, winners: Vec<Option<String>>) {
        self.rounds.insert(round, winners);
    }

    pub fn winner(&self, round: RoundId, slot: usize) -> Option<&str> {
        self.rounds.get(&round)?.get(slot)?.as_deref()
    }

    pub fn rounds(&self) -> impl Iterator<Item = (RoundId, &[Option<String>])> {
        self.rounds.iter().map(|(id, winners)| (*id, winners.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Count of games with a known winner.
    pub fn decided_games(&self) -> usize {
        self.rounds.values().flatten().filter(|w| w.is_some()).count()
    }
}

impl From<BTreeMap<String, Value>> for AuthoritativeResult {
    fn from(raw: BTreeMap<String, Value>) -> Self {
        let mut rounds = BTreeMap::new();
        for (key, value) in raw {
            let Ok(id) = key.parse::<RoundId>() else {
                debug!(round_id = %key, "ignoring unknown round in results");
                continue;
            };
            let Value::Array(items) = value else {
                debug!(round_id = %key, "ignoring non-list results entry");
                continue;
            };
            let winners = items
                .into_iter()
                .map(|item| match item {
                    Value::String(name) if !name.is_empty() => Some(name),
                    _ => None,
                })
                .collect();
            rounds.insert(id, winners);
        }
        Self { rounds }
    }
}

impl Serialize for AuthoritativeResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rounds.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::topology::RegionalRound;
    use crate::models::Region;
    use serde_json::json;

    #[test]
    fn test_authoritative_parses_sparse_lists() {
        let raw = json!({
            "west_r64": ["Florida", null, "", "Maryland"],
            "champion": "Florida",
            "bogus_round": ["x"],
            "championship": [null]
        });
        let results: AuthoritativeResult = serde_json::from_value(raw).unwrap();
        let west = RoundId::Regional(Region::West, RegionalRound::R64);

        assert_eq!(results.winner(west, 0), Some("Florida"));
        assert_eq!(results.winner(west, 1), None);
        assert_eq!(results.winner(west, 2), None);
        assert_eq!(results.winner(west, 3), Some("Maryland"));
        assert_eq!(results.decided_games(), 2);
        assert_eq!(results.rounds().count(), 2);
    }

    #[test]
    fn test_set_pads_with_none() {
        let mut results = AuthoritativeResult::new();
        results.set(RoundId::FinalFour(crate::models::Half::Left), 0, "Duke");
        let west = RoundId::Regional(Region::West, RegionalRound::R32);
        results.set(west, 2, "Texas Tech");

        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(json["west_r32"], json!([null, null, "Texas Tech"]));
        assert_eq!(json["ff_left"], json!(["Duke"]));
    }

    #[test]
    fn test_tournament_result_json_shape() {
        let mut result = TournamentResult::default();
        result.rounds.insert(
            RoundId::Championship,
            vec![
                TeamEntry { seed: 1, name: "Duke".into() },
                TeamEntry { seed: 1, name: "Houston".into() },
            ],
        );
        result.champion = Some("Duke".into());

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["championship"][1]["name"], "Houston");
        assert_eq!(json["champion"], "Duke");

        let back: TournamentResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
        assert_eq!(back.winners(RoundId::Championship), vec![Some("Duke".to_string())]);
    }
}
