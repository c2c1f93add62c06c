//! Engine services.

pub mod league;
pub mod pack_import;

pub use league::{LeagueService, RoundStart};
