//! # bracket_core - Tournament Bracket Simulation and Scoring
//!
//! Fills a 68-team single-elimination bracket with one of several pick
//! policies and scores saved brackets against official results.
//!
//! ## Features
//! - Five pick policies, from pure chalk to a strength/history blend
//! - Reproducible runs (same seed = same bracket)
//! - Scoring of both stored bracket shapes
//! - JSON API for easy integration

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod registry;
pub mod scoring;

#[cfg(test)]
mod test_support;

// Re-export main API functions
pub use api::{autofill_bracket_json, rescore_json, score_bracket_json, simulate};
pub use config::{DataPaths, SimConfig};
pub use error::{BracketError, ErrorKind, Result};

pub use engine::{GameResolver, RoundId, Strategy, TournamentRunner};
pub use models::{AuthoritativeResult, Region, Team, TournamentResult};
pub use registry::{resolve_teams, shared_registry, TeamRegistry};
pub use scoring::{rescore_all, score, score_value, standings, CandidateBracket, GameCall, ResultLog};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
