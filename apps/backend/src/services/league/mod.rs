//! League engine - business rules on top of the store.
//!
//! The service is stateless: every call reads what it needs from the store
//! and relies on the store's conditional writes for anything that can race.
//! Errors keep their kind and gain an operation prefix, so callers can both
//! match on `err.is_conflict(..)` and show a readable detail.

mod admin;
mod matches;
mod membership;
mod queries;
mod rounds;
mod wilds;

use std::sync::Arc;

pub use rounds::RoundStart;

use crate::clients::{CardLookup, PackSource};
use crate::config::league::LeagueConfig;
use crate::repos::LeagueStore;

pub struct LeagueService {
    store: Arc<dyn LeagueStore>,
    packs: Arc<dyn PackSource>,
    lookup: Arc<dyn CardLookup>,
    config: LeagueConfig,
}

impl LeagueService {
    pub fn new(
        store: Arc<dyn LeagueStore>,
        packs: Arc<dyn PackSource>,
        lookup: Arc<dyn CardLookup>,
        config: LeagueConfig,
    ) -> Self {
        Self {
            store,
            packs,
            lookup,
            config,
        }
    }

    pub fn store(&self) -> &Arc<dyn LeagueStore> {
        &self.store
    }
}
