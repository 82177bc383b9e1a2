pub mod bracket;
pub mod team;

pub use bracket::{AuthoritativeResult, TournamentResult};
pub use team::{Half, Region, Team, TeamEntry};
