//! Game resolution policies.
//!
//! Every policy answers one question: given two teams and the game context,
//! which side wins. Deterministic policies ignore the RNG; stochastic ones
//! draw from the caller's generator only, so a seeded generator reproduces
//! a whole bracket.

use rand::{Rng, RngCore};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::engine::topology::RegionalRound;
use crate::error::{BracketError, Result};
use crate::models::Team;

/// Blended values are clipped to this margin before taking log-odds.
pub const PROB_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn pick<'t>(self, a: &'t Team, b: &'t Team) -> (&'t Team, &'t Team) {
        match self {
            Side::A => (a, b),
            Side::B => (b, a),
        }
    }
}

/// Where in the tournament a game is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    PlayIn,
    Regional(RegionalRound),
    FinalFour,
    Championship,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameContext {
    pub stage: Stage,
    /// Historical seed probability for (A, B) at this stage.
    pub seed_odds: (f64, f64),
}

pub trait GameResolver {
    fn decide(&self, a: &Team, b: &Team, ctx: &GameContext, rng: &mut dyn RngCore) -> Side;
}

/// Lower seed number wins; equal seeds go to the first-listed team.
#[derive(Debug, Clone, Copy, Default)]
pub struct Chalk;

impl GameResolver for Chalk {
    fn decide(&self, a: &Team, b: &Team, _ctx: &GameContext, _rng: &mut dyn RngCore) -> Side {
        if a.seed <= b.seed {
            Side::A
        } else {
            Side::B
        }
    }
}

/// Higher strength wins; ties go to the first-listed team.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ranking;

impl GameResolver for Ranking {
    fn decide(&self, a: &Team, b: &Team, _ctx: &GameContext, _rng: &mut dyn RngCore) -> Side {
        if a.strength >= b.strength {
            Side::A
        } else {
            Side::B
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CoinFlip;

impl GameResolver for CoinFlip {
    fn decide(&self, _a: &Team, _b: &Team, _ctx: &GameContext, rng: &mut dyn RngCore) -> Side {
        if rng.gen_bool(0.5) {
            Side::A
        } else {
            Side::B
        }
    }
}

/// Win chance proportional to the two historical seed probabilities.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedOdds;

impl GameResolver for SeedOdds {
    fn decide(&self, _a: &Team, _b: &Team, ctx: &GameContext, rng: &mut dyn RngCore) -> Side {
        let (pa, pb) = ctx.seed_odds;
        let total = pa + pb;
        let p = if total > 0.0 { pa / total } else { 0.5 };
        if rng.gen::<f64>() < p {
            Side::A
        } else {
            Side::B
        }
    }
}

/// Sampled form blended with historical seed odds through log-odds.
#[derive(Debug, Clone, Copy)]
pub struct Blended {
    /// 0 = seed history only, 1 = sampled strength only
    pub weight: f64,
}

impl GameResolver for Blended {
    fn decide(&self, a: &Team, b: &Team, ctx: &GameContext, rng: &mut dyn RngCore) -> Side {
        let form_a = sample_form(a, rng);
        let form_b = sample_form(b, rng);
        let p = blended_win_probability(form_a, form_b, ctx.seed_odds.0, ctx.seed_odds.1, self.weight);
        if rng.gen::<f64>() < p {
            Side::A
        } else {
            Side::B
        }
    }
}

/// One "recent form" draw: Normal(strength, uncertainty) clipped to [0, 1].
///
/// A non-positive or invalid uncertainty yields the strength itself.
pub fn sample_form(team: &Team, rng: &mut dyn RngCore) -> f64 {
    let draw = match Normal::new(team.strength, team.uncertainty) {
        Ok(normal) if team.uncertainty > 0.0 => normal.sample(rng),
        _ => team.strength,
    };
    draw.clamp(0.0, 1.0)
}

/// Probability that A beats B given both form samples and seed odds.
pub fn blended_win_probability(form_a: f64, form_b: f64, seed_a: f64, seed_b: f64, weight: f64) -> f64 {
    let blend = |form: f64, seed: f64| {
        (weight * form + (1.0 - weight) * seed).clamp(PROB_EPSILON, 1.0 - PROB_EPSILON)
    };
    let log_odds = |p: f64| (p / (1.0 - p)).ln();

    let lo_a = log_odds(blend(form_a, seed_a));
    let lo_b = log_odds(blend(form_b, seed_b));
    1.0 / (1.0 + (lo_b - lo_a).exp())
}

/// Policy selector as requested by callers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Strategy {
    Chalk,
    Ranking,
    Random,
    SeedOdds,
    Blended { weight: f64 },
}

impl Strategy {
    /// Parse a selector string (case-insensitive).
    ///
    /// `weight` only matters for the blended model and must lie in [0, 1].
    pub fn parse(selector: &str, weight: f64) -> Result<Self> {
        let strategy = match selector.trim().to_ascii_lowercase().as_str() {
            "chalk" => Strategy::Chalk,
            "ranking" | "rank" | "strength" => Strategy::Ranking,
            "random" | "coin" | "uniform" => Strategy::Random,
            "seed_odds" | "historical" | "history" => Strategy::SeedOdds,
            "simulate" | "simulation" | "blended" | "model" => {
                if !(0.0..=1.0).contains(&weight) {
                    return Err(BracketError::InvalidWeight(weight));
                }
                Strategy::Blended { weight }
            }
            _ => return Err(BracketError::UnknownStrategy(selector.to_string())),
        };
        Ok(strategy)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Chalk => "chalk",
            Strategy::Ranking => "ranking",
            Strategy::Random => "random",
            Strategy::SeedOdds => "seed_odds",
            Strategy::Blended { .. } => "simulate",
        }
    }

    /// Chalk and Ranking never touch the RNG.
    pub fn is_deterministic(&self) -> bool {
        matches!(self, Strategy::Chalk | Strategy::Ranking)
    }
}

impl GameResolver for Strategy {
    fn decide(&self, a: &Team, b: &Team, ctx: &GameContext, rng: &mut dyn RngCore) -> Side {
        match *self {
            Strategy::Chalk => Chalk.decide(a, b, ctx, rng),
            Strategy::Ranking => Ranking.decide(a, b, ctx, rng),
            Strategy::Random => CoinFlip.decide(a, b, ctx, rng),
            Strategy::SeedOdds => SeedOdds.decide(a, b, ctx, rng),
            Strategy::Blended { weight } => Blended { weight }.decide(a, b, ctx, rng),
        }
    }
}
