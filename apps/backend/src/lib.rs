#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod clients;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod errors;
pub mod infra;
pub mod logging;
pub mod repos;
pub mod services;
pub mod telemetry;


// Re-exports for public API
pub use clients::{CardLookup, CardMatch, GeneratedCard, PackGeneratorClient, PackSource, ScryfallClient};
pub use config::db::{db_url, DbOwner, DbProfile};
pub use config::league::{ClientConfig, LeagueConfig, RejoinPolicy};
pub use domain::{Balance, CardCopy, CardPoolEntry, MatchResult, Pairing, Player, PlayerId};
pub use errors::{DomainError, DomainResultExt};
pub use infra::db::{bootstrap_db, connect_db, orchestrate_migration};
pub use repos::{LeagueStore, MemoryStore, SeaStore};
pub use services::{LeagueService, RoundStart};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
