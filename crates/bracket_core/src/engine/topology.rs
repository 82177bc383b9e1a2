//! Fixed single-elimination bracket structure.
//!
//! Four regions of 16 seeds play four rounds each (r64, r32, s16, e8), the
//! regional winners meet in two Final-Four slots and the slot winners play
//! the championship. Round container ids and the seeding order are shared
//! with the rendering layer and must not change.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::BracketError;
use crate::models::{Half, Region};

/// Round-of-64 seed order; adjacent pairs form the first-round matchups
/// (1v16, 8v9, 5v12, 4v13, 6v11, 3v14, 7v10, 2v15).
pub const SEEDING_ORDER: [u8; 16] = [1, 16, 8, 9, 5, 12, 4, 13, 6, 11, 3, 14, 7, 10, 2, 15];

/// Teams entering each region.
pub const REGION_SIZE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionalRound {
    R64,
    R32,
    S16,
    E8,
}

impl RegionalRound {
    pub const ALL: [RegionalRound; 4] =
        [RegionalRound::R64, RegionalRound::R32, RegionalRound::S16, RegionalRound::E8];

    pub fn code(self) -> &'static str {
        match self {
            RegionalRound::R64 => "r64",
            RegionalRound::R32 => "r32",
            RegionalRound::S16 => "s16",
            RegionalRound::E8 => "e8",
        }
    }

    /// Zero-based position within the regional rounds.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Option<RegionalRound> {
        match self {
            RegionalRound::R64 => Some(RegionalRound::R32),
            RegionalRound::R32 => Some(RegionalRound::S16),
            RegionalRound::S16 => Some(RegionalRound::E8),
            RegionalRound::E8 => None,
        }
    }

    pub fn points(self) -> u32 {
        1 << self.index()
    }

    /// Competitors entering this round in one region.
    pub fn entrants(self) -> usize {
        REGION_SIZE >> self.index()
    }

    fn from_code(code: &str) -> Option<RegionalRound> {
        RegionalRound::ALL.into_iter().find(|r| r.code() == code)
    }
}

/// Identifier of one round container (`west_r64`, `ff_left`, `championship`, `champion`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoundId {
    Regional(Region, RegionalRound),
    FinalFour(Half),
    Championship,
    /// Synthetic single-name field; never scored.
    Champion,
}

impl RoundId {
    /// Every container holding matchups, in rendering order.
    pub fn matchup_rounds() -> Vec<RoundId> {
        let mut ids: Vec<RoundId> = Region::ALL
            .into_iter()
            .flat_map(|region| {
                RegionalRound::ALL.into_iter().map(move |round| RoundId::Regional(region, round))
            })
            .collect();
        ids.extend(Half::ALL.into_iter().map(RoundId::FinalFour));
        ids.push(RoundId::Championship);
        ids
    }

    pub fn points(self) -> u32 {
        match self {
            RoundId::Regional(_, round) => round.points(),
            RoundId::FinalFour(_) => 16,
            RoundId::Championship => 32,
            RoundId::Champion => 0,
        }
    }

    /// Number of competitors recorded in this container.
    pub fn entrants(self) -> usize {
        match self {
            RoundId::Regional(_, round) => round.entrants(),
            RoundId::FinalFour(_) | RoundId::Championship => 2,
            RoundId::Champion => 1,
        }
    }

    /// Number of games (winner slots) decided in this container.
    pub fn slots(self) -> usize {
        match self {
            RoundId::Champion => 0,
            other => other.entrants() / 2,
        }
    }

    /// Container that receives this round's winners.
    pub fn successor(self) -> Option<RoundId> {
        match self {
            RoundId::Regional(region, round) => Some(match round.next() {
                Some(next) => RoundId::Regional(region, next),
                None => RoundId::FinalFour(region.half()),
            }),
            RoundId::FinalFour(_) => Some(RoundId::Championship),
            RoundId::Championship => Some(RoundId::Champion),
            RoundId::Champion => None,
        }
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RoundId::Regional(region, round) => write!(f, "{}_{}", region.key(), round.code()),
            RoundId::FinalFour(Half::Left) => f.write_str("ff_left"),
            RoundId::FinalFour(Half::Right) => f.write_str("ff_right"),
            RoundId::Championship => f.write_str("championship"),
            RoundId::Champion => f.write_str("champion"),
        }
    }
}

impl FromStr for RoundId {
    type Err = BracketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ff_left" => return Ok(RoundId::FinalFour(Half::Left)),
            "ff_right" => return Ok(RoundId::FinalFour(Half::Right)),
            "championship" => return Ok(RoundId::Championship),
            "champion" => return Ok(RoundId::Champion),
            _ => {}
        }

        let unknown = || BracketError::UnknownRound(s.to_string());
        let (region_key, code) = s.split_once('_').ok_or_else(unknown)?;
        let region = Region::ALL.into_iter().find(|r| r.key() == region_key).ok_or_else(unknown)?;
        let round = RegionalRound::from_code(code).ok_or_else(unknown)?;
        Ok(RoundId::Regional(region, round))
    }
}

impl Serialize for RoundId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RoundId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_id_round_trips_every_container() {
        let mut all = RoundId::matchup_rounds();
        all.push(RoundId::Champion);
        assert_eq!(all.len(), 20);
        for id in all {
            assert_eq!(id.to_string().parse::<RoundId>().unwrap(), id);
        }
        assert!("north_r64".parse::<RoundId>().is_err());
        assert!("west_r128".parse::<RoundId>().is_err());
        assert!("final".parse::<RoundId>().is_err());
    }

    #[test]
    fn test_points_and_sizes() {
        let west = |r| RoundId::Regional(Region::West, r);
        assert_eq!(west(RegionalRound::R64).points(), 1);
        assert_eq!(west(RegionalRound::R32).points(), 2);
        assert_eq!(west(RegionalRound::S16).points(), 4);
        assert_eq!(west(RegionalRound::E8).points(), 8);
        assert_eq!(RoundId::FinalFour(Half::Right).points(), 16);
        assert_eq!(RoundId::Championship.points(), 32);
        assert_eq!(RoundId::Champion.points(), 0);

        assert_eq!(west(RegionalRound::R64).entrants(), 16);
        assert_eq!(west(RegionalRound::R64).slots(), 8);
        assert_eq!(west(RegionalRound::E8).slots(), 1);
        assert_eq!(RoundId::Championship.slots(), 1);
        assert_eq!(RoundId::Champion.slots(), 0);
    }

    #[test]
    fn test_successor_chain_reaches_champion() {
        let mut id = RoundId::Regional(Region::East, RegionalRound::R64);
        let mut chain = vec![id.to_string()];
        while let Some(next) = id.successor() {
            chain.push(next.to_string());
            id = next;
        }
        assert_eq!(
            chain,
            ["east_r64", "east_r32", "east_s16", "east_e8", "ff_right", "championship", "champion"]
        );
        assert_eq!(
            RoundId::Regional(Region::South, RegionalRound::E8).successor(),
            Some(RoundId::FinalFour(Half::Left))
        );
    }

    #[test]
    fn test_seeding_order_pairs_sum_to_17() {
        for pair in SEEDING_ORDER.chunks(2) {
            assert_eq!(pair[0] + pair[1], 17);
        }
    }
}
