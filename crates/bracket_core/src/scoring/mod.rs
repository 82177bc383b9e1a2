//! Bracket scoring.
//!
//! | Round | Points per correct pick |
//! |---|---|
//! | r64 | 1 |
//! | r32 | 2 |
//! | s16 | 4 |
//! | e8 | 8 |
//! | ff_left / ff_right | 16 |
//! | championship | 32 |
//!
//! Only decided slots of the official results count; an undecided slot is
//! neither a hit nor a miss. The `champion` field is never scored on its
//! own since the championship slot already covers it.

pub mod batch;
pub mod candidate;
pub mod result_log;

use serde_json::Value;
use tracing::trace;

use crate::models::AuthoritativeResult;

pub use batch::{rescore_all, standings, RescoreSummary, ScoredBracket, Standing, StoredBracket};
pub use candidate::CandidateBracket;
pub use result_log::{GameCall, ResultLog};

/// Score normalized picks against the official results.
pub fn score(candidate: &CandidateBracket, authoritative: &AuthoritativeResult) -> u32 {
    let mut total = 0;
    for (round, winners) in authoritative.rounds() {
        let points = round.points();
        if points == 0 {
            continue;
        }
        let hits = winners
            .iter()
            .enumerate()
            .filter(|(slot, official)| match official {
                Some(name) => candidate.pick(round, *slot) == Some(name.as_str()),
                None => false,
            })
            .count() as u32;
        if hits > 0 {
            trace!(%round, hits, points, "round scored");
        }
        total += hits * points;
    }
    total
}

/// Score a stored bracket of either JSON shape.
pub fn score_value(candidate: &Value, authoritative: &AuthoritativeResult) -> u32 {
    score(&CandidateBracket::from_value(candidate), authoritative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::resolver::Strategy;
    use crate::engine::runner::run;
    use crate::engine::topology::{RegionalRound, RoundId};
    use crate::models::Region;
    use crate::test_support::sample_registry;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use serde_json::json;

    fn results(value: Value) -> AuthoritativeResult {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_point_weights() {
        let official = results(json!({ "west_r64": ["Duke", "Auburn"], "championship": ["Duke"] }));
        let candidate = json!({ "west_r64": ["Duke", "Auburn"], "championship": ["Duke"] });
        assert_eq!(score_value(&candidate, &official), 1 + 1 + 32);
    }

    #[test]
    fn test_every_round_weight() {
        let official = results(json!({
            "east_r64": ["A"], "east_r32": ["A"], "east_s16": ["A"], "east_e8": ["A"],
            "ff_right": ["A"], "championship": ["A"], "champion": ["A"]
        }));
        let candidate = json!({
            "east_r64": ["A"], "east_r32": ["A"], "east_s16": ["A"], "east_e8": ["A"],
            "ff_right": ["A"], "championship": ["A"], "champion": "A"
        });
        assert_eq!(score_value(&candidate, &official), 1 + 2 + 4 + 8 + 16 + 32);
    }

    #[test]
    fn test_undecided_slots_never_count() {
        let official = results(json!({ "west_r64": ["Florida", "Connecticut", "Memphis", null] }));
        let hit_all = json!({ "west_r64": ["Florida", "Connecticut", "Memphis", "Maryland"] });
        let miss_last = json!({ "west_r64": ["Florida", "Connecticut", "Memphis", "Grand Canyon"] });
        let short = json!({ "west_r64": ["Florida", "Connecticut", "Memphis"] });
        assert_eq!(score_value(&hit_all, &official), 3);
        assert_eq!(score_value(&miss_last, &official), 3);
        assert_eq!(score_value(&short, &official), 3);
    }

    #[test]
    fn test_wrong_and_missing_picks_score_zero() {
        let official = results(json!({ "south_r64": ["Auburn"], "ff_left": ["Auburn"] }));
        assert_eq!(score_value(&json!({ "south_r64": ["Alabama St."] }), &official), 0);
        assert_eq!(score_value(&json!({}), &official), 0);
        assert_eq!(score_value(&json!("garbage"), &official), 0);
        assert_eq!(score_value(&json!({ "south_r64": ["Auburn"] }), &AuthoritativeResult::new()), 0);
    }

    #[test]
    fn test_pair_and_winner_shapes_score_the_same() {
        let registry = sample_registry();
        let bracket = run(&registry, &Strategy::Random, &mut ChaCha8Rng::seed_from_u64(21));
        let official_run = run(&registry, &Strategy::Random, &mut ChaCha8Rng::seed_from_u64(99));
        let official_picks = CandidateBracket::from_result(&official_run);
        let official: AuthoritativeResult = serde_json::from_value(official_picks.to_winner_lists()).unwrap();

        let pairs = serde_json::to_value(&bracket).unwrap();
        let winners = CandidateBracket::from_result(&bracket).to_winner_lists();

        let by_pairs = score_value(&pairs, &official);
        assert_eq!(by_pairs, score_value(&winners, &official));

        // a bracket scored against its own outcome gets every point
        let own: AuthoritativeResult = serde_json::from_value(winners.clone()).unwrap();
        let perfect = 32 * 1 + 16 * 2 + 8 * 4 + 4 * 8 + 2 * 16 + 32;
        assert_eq!(score_value(&pairs, &own), perfect);
    }

    #[test]
    fn test_unknown_rounds_in_results_are_skipped() {
        let mut official = AuthoritativeResult::new();
        official.set(RoundId::Regional(Region::Midwest, RegionalRound::R32), 1, "Purdue");
        let candidate = json!({ "midwest_r32": [null, "Purdue"], "first_four": ["Texas"] });
        assert_eq!(score_value(&candidate, &official), 2);
    }

    proptest! {
        #[test]
        fn prop_scoring_is_pure(seed_a in any::<u64>(), seed_b in any::<u64>(), holes in prop::collection::vec(any::<bool>(), 8)) {
            let registry = sample_registry();
            let bracket = run(&registry, &Strategy::SeedOdds, &mut ChaCha8Rng::seed_from_u64(seed_a));
            let truth = run(&registry, &Strategy::SeedOdds, &mut ChaCha8Rng::seed_from_u64(seed_b));

            let mut official = AuthoritativeResult::new();
            for id in RoundId::matchup_rounds() {
                let winners = truth
                    .winners(id)
                    .into_iter()
                    .enumerate()
                    .map(|(slot, w)| if holes[slot % holes.len()] { None } else { w })
                    .collect();
                official.insert_round(id, winners);
            }

            let value = serde_json::to_value(&bracket).unwrap();
            let first = score_value(&value, &official);
            let second = score_value(&value, &official);
            prop_assert_eq!(first, second);

            let flat = CandidateBracket::from_result(&bracket).to_winner_lists();
            prop_assert_eq!(first, score_value(&flat, &official));
        }
    }
}
