use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BracketError;

/// One of the four 16-team regions.
///
/// Variant order is bracket order; the left semifinal is fed by
/// West/South and the right one by East/Midwest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    West,
    South,
    East,
    Midwest,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::West, Region::South, Region::East, Region::Midwest];

    /// Lowercase prefix used in round container ids (`west_r64`).
    pub fn key(self) -> &'static str {
        match self {
            Region::West => "west",
            Region::South => "south",
            Region::East => "east",
            Region::Midwest => "midwest",
        }
    }

    pub fn half(self) -> Half {
        match self {
            Region::West | Region::South => Half::Left,
            Region::East | Region::Midwest => Half::Right,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Region::West => "West",
            Region::South => "South",
            Region::East => "East",
            Region::Midwest => "Midwest",
        };
        f.pad(name)
    }
}

impl FromStr for Region {
    type Err = BracketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "west" => Ok(Region::West),
            "south" => Ok(Region::South),
            "east" => Ok(Region::East),
            "midwest" => Ok(Region::Midwest),
            other => Err(BracketError::InvalidData(format!("unknown region '{other}'"))),
        }
    }
}

/// Semifinal half of the bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Half {
    Left,
    Right,
}

impl Half {
    pub const ALL: [Half; 2] = [Half::Left, Half::Right];

    /// Regions feeding this half, in entrant order.
    pub fn regions(self) -> [Region; 2] {
        match self {
            Half::Left => [Region::West, Region::South],
            Half::Right => [Region::East, Region::Midwest],
        }
    }
}

/// Immutable reference record for one tournament team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub seed: u8,
    pub region: Region,
    /// Skill estimate, expected in [0, 1]
    pub strength: f64,
    /// Standard deviation used for stochastic form draws
    pub uncertainty: f64,
}

impl Team {
    pub fn new(
        name: impl Into<String>,
        seed: u8,
        region: Region,
        strength: f64,
        uncertainty: f64,
    ) -> Self {
        Self { name: name.into(), seed, region, strength, uncertainty }
    }

    pub fn entry(&self) -> TeamEntry {
        TeamEntry { seed: self.seed, name: self.name.clone() }
    }
}

/// Display shape of a competitor inside a round container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamEntry {
    pub seed: u8,
    pub name: String,
}
