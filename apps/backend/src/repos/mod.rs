//! Persistent store for league state.
//!
//! [`LeagueStore`] is the seam the engine talks to. [`SeaStore`] keeps the
//! state in Postgres or SQLite through SeaORM; [`MemoryStore`] keeps it in
//! process for tests. Both give the same atomicity guarantees:
//! multi-row writes are all-or-nothing and the safety-critical transitions
//! (pairing report, league activation, balance debits) are conditional.

pub mod card_pool;
pub mod league;
pub mod memory;
pub mod moderation;
pub mod pairings;
pub mod players;
pub mod sea;

use async_trait::async_trait;

pub use memory::MemoryStore;
pub use sea::SeaStore;

use crate::domain::cards::{CardCopy, CardPoolEntry};
use crate::domain::pairing::Pairing;
use crate::domain::player::Player;
use crate::errors::domain::DomainError;

#[async_trait]
pub trait LeagueStore: Send + Sync {
    /// `NotFound(Player)` when unknown.
    async fn get_player(&self, player_id: &str) -> Result<Player, DomainError>;

    /// Insert if absent, else overwrite balances and the dropped flag.
    async fn upsert_player(&self, player: &Player) -> Result<(), DomainError>;

    /// Creates the player with empty balances.
    /// `Conflict(PlayerAlreadyJoined)` when the id is taken.
    async fn insert_player(&self, player_id: &str) -> Result<Player, DomainError>;

    /// Clears the dropped flag in one conditional write, keeping balances.
    /// `Conflict(PlayerAlreadyJoined)` when the player is not dropped.
    async fn reactivate_player(&self, player_id: &str) -> Result<Player, DomainError>;

    /// Every player, dropped or not, ordered by id.
    async fn get_all_players(&self) -> Result<Vec<Player>, DomainError>;

    /// `Conflict(PlayerAlreadyDropped)` when the player has already dropped.
    async fn drop_player(&self, player_id: &str) -> Result<(), DomainError>;

    async fn get_cards(&self, player_id: &str) -> Result<Vec<CardPoolEntry>, DomainError>;

    /// Adds the copies to the pool, all-or-nothing.
    async fn store_cards(&self, player_id: &str, copies: &[CardCopy]) -> Result<(), DomainError>;

    /// Current-round pairing with the player on either side.
    /// `NotFound(Pairing)` when there is none or no league is active.
    async fn get_pairing(&self, player_id: &str) -> Result<Pairing, DomainError>;

    async fn store_pairings(&self, pairings: &[Pairing]) -> Result<(), DomainError>;

    /// Compare-and-set on an unreported pairing.
    /// `Conflict(PairingAlreadyReported)` when already reported or absent.
    async fn update_pairing(&self, pairing: &Pairing) -> Result<(), DomainError>;

    /// Activates a new league. The first league opens at round 1; later ones
    /// continue after the highest round any league reached.
    async fn start_league(&self) -> Result<(), DomainError>;

    async fn end_league(&self) -> Result<(), DomainError>;

    /// `Conflict(NoActiveLeague)` when no league is active.
    async fn get_round(&self) -> Result<i32, DomainError>;

    /// Increments the active league's round and returns the new value.
    async fn advance_round(&self) -> Result<i32, DomainError>;

    async fn unlock_set(&self, set_code: &str) -> Result<(), DomainError>;

    /// Sets unlocked in the active league, in unlock order.
    async fn get_sets(&self) -> Result<Vec<String>, DomainError>;

    async fn is_admin(&self, player_id: &str) -> Result<bool, DomainError>;

    async fn make_admin(&self, player_id: &str) -> Result<(), DomainError>;

    async fn get_banned_cards(&self) -> Result<Vec<String>, DomainError>;

    async fn ban_card(&self, card_name: &str) -> Result<(), DomainError>;

    /// `NotFound(Card)` when the card was not banned.
    async fn unban_card(&self, card_name: &str) -> Result<(), DomainError>;

    async fn credit_player(
        &self,
        player_id: &str,
        wild_cards: i32,
        wild_packs: i32,
    ) -> Result<(), DomainError>;

    /// Spends one wild card and adds `copy` to the pool in one transaction.
    async fn redeem_wild_card(&self, player_id: &str, copy: &CardCopy) -> Result<(), DomainError>;

    /// Spends `packs` wild packs and adds `copies` to the pool in one transaction.
    async fn redeem_wild_packs(
        &self,
        player_id: &str,
        packs: i32,
        copies: &[CardCopy],
    ) -> Result<(), DomainError>;
}
