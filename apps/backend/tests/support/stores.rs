// Store construction for tests that run against every backend.

use std::sync::Arc;

use league::config::db::DbProfile;
use league::repos::{LeagueStore, MemoryStore, SeaStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    Sqlite,
}

pub const ALL_STORES: [StoreKind; 2] = [StoreKind::Memory, StoreKind::Sqlite];

/// A fresh, migrated SQLite in-memory store. Every call gets its own database.
pub async fn sqlite_store() -> SeaStore {
    SeaStore::connect(&DbProfile::SqliteMemory)
        .await
        .expect("sqlite in-memory store should bootstrap")
}

pub async fn build_store(kind: StoreKind) -> Arc<dyn LeagueStore> {
    match kind {
        StoreKind::Memory => Arc::new(MemoryStore::new()),
        StoreKind::Sqlite => Arc::new(sqlite_store().await),
    }
}
