//! Candidate bracket normalization.
//!
//! Saved brackets come in two shapes:
//! - legacy: `{"west_r64": ["Florida", "Auburn", ...]}`, winner names per slot
//! - pairs:  `{"west_r64": [{"seed": 1, "name": "Florida"}, {"seed": 16, ...}, ...]}`,
//!   competitors per game; the winner is whichever competitor shows up in
//!   the next container (or the `champion` field after the championship)
//!
//! Both are reduced here to one winner-per-slot map. Malformed input never
//! fails; it just produces no pick for the affected slot or round.

use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};

use crate::engine::topology::RoundId;
use crate::models::TournamentResult;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateBracket {
    picks: BTreeMap<RoundId, Vec<Option<String>>>,
}

impl CandidateBracket {
    /// Normalize a stored bracket of either shape.
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };

        let mut picks = BTreeMap::new();
        for (key, round_value) in object {
            let Ok(id) = key.parse::<RoundId>() else { continue };
            if id == RoundId::Champion {
                continue;
            }
            let Some(items) = round_value.as_array() else { continue };

            let winners = match first_shape(items) {
                Some(Shape::Winners) => items.iter().map(winner_name).collect(),
                Some(Shape::Pairs) => pair_winners(items, &advanced_names(object, id)),
                None => continue,
            };
            picks.insert(id, winners);
        }
        Self { picks }
    }

    /// Picks implied by a generated bracket.
    pub fn from_result(result: &TournamentResult) -> Self {
        let picks = result.rounds.keys().map(|&id| (id, result.winners(id))).collect();
        Self { picks }
    }

    pub fn pick(&self, round: RoundId, slot: usize) -> Option<&str> {
        self.picks.get(&round)?.get(slot)?.as_deref()
    }

    /// Legacy-shape JSON for these picks.
    pub fn to_winner_lists(&self) -> Value {
        let object: Map<String, Value> = self
            .picks
            .iter()
            .map(|(id, winners)| {
                let list = winners
                    .iter()
                    .map(|w| w.clone().map(Value::String).unwrap_or(Value::Null))
                    .collect();
                (id.to_string(), Value::Array(list))
            })
            .collect();
        Value::Object(object)
    }
}

enum Shape {
    Winners,
    Pairs,
}

/// Shape of a round list, judged by its first non-null element.
fn first_shape(items: &[Value]) -> Option<Shape> {
    match items.iter().find(|v| !v.is_null())? {
        Value::String(_) => Some(Shape::Winners),
        Value::Object(_) => Some(Shape::Pairs),
        _ => None,
    }
}

fn winner_name(item: &Value) -> Option<String> {
    match item {
        Value::String(name) if !name.is_empty() => Some(name.clone()),
        _ => None,
    }
}

/// Competitor name for either element encoding; empty when unusable.
fn entry_name(item: &Value) -> &str {
    match item {
        Value::String(name) => name,
        Value::Object(fields) => fields.get("name").and_then(Value::as_str).unwrap_or(""),
        _ => "",
    }
}

/// Names recorded in the container that receives `id`'s winners.
fn advanced_names<'v>(object: &'v Map<String, Value>, id: RoundId) -> HashSet<&'v str> {
    let Some(next) = id.successor() else {
        return HashSet::new();
    };
    let Some(value) = object.get(&next.to_string()) else {
        return HashSet::new();
    };

    let names: Vec<&str> = match value {
        Value::Array(items) => items.iter().map(entry_name).collect(),
        other => vec![entry_name(other)],
    };
    names.into_iter().filter(|n| !n.is_empty()).collect()
}

fn pair_winners(items: &[Value], advanced: &HashSet<&str>) -> Vec<Option<String>> {
    items
        .chunks_exact(2)
        .map(|pair| {
            let (a, b) = (entry_name(&pair[0]), entry_name(&pair[1]));
            match (advanced.contains(a), advanced.contains(b)) {
                (true, false) => Some(a.to_string()),
                (false, true) => Some(b.to_string()),
                _ => None,
            }
        })
        .collect()
}
