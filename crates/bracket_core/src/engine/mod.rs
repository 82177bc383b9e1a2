//! Bracket engine: topology, per-game resolvers and the tournament runner.

pub mod resolver;
pub mod runner;
pub mod topology;

pub use resolver::{
    blended_win_probability, sample_form, Blended, Chalk, CoinFlip, GameContext, GameResolver, Ranking,
    SeedOdds, Side, Stage, Strategy,
};
pub use runner::{run, Matchup, TournamentRun, TournamentRunner};
pub use topology::{RegionalRound, RoundId, REGION_SIZE, SEEDING_ORDER};
