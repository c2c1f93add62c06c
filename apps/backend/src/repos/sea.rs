use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tracing::{debug, info};

use super::{card_pool, league, moderation, pairings, players, LeagueStore};
use crate::config::db::{DbOwner, DbProfile};
use crate::db::txn::with_txn;
use crate::domain::cards::{CardCopy, CardPoolEntry};
use crate::domain::pairing::Pairing;
use crate::domain::player::Player;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::infra::db::bootstrap_db;

/// Relational store over a SeaORM connection pool.
#[derive(Clone)]
pub struct SeaStore {
    db: DatabaseConnection,
}

impl SeaStore {
    /// Connects with application credentials and applies pending migrations.
    pub async fn connect(profile: &DbProfile) -> Result<Self, DomainError> {
        let db = bootstrap_db(profile, DbOwner::App).await?;
        info!(?profile, "league store connected");
        Ok(Self { db })
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl LeagueStore for SeaStore {
    async fn get_player(&self, player_id: &str) -> Result<Player, DomainError> {
        players::require_player(&self.db, player_id).await
    }

    async fn upsert_player(&self, player: &Player) -> Result<(), DomainError> {
        players::upsert_player(&self.db, player).await
    }

    async fn insert_player(&self, player_id: &str) -> Result<Player, DomainError> {
        players::insert_new(&self.db, player_id).await
    }

    async fn reactivate_player(&self, player_id: &str) -> Result<Player, DomainError> {
        let player_id = player_id.to_string();
        with_txn(&self.db, move |txn| {
            Box::pin(async move { players::reactivate(txn, &player_id).await })
        })
        .await
    }

    async fn get_all_players(&self) -> Result<Vec<Player>, DomainError> {
        players::list_players(&self.db).await
    }

    async fn drop_player(&self, player_id: &str) -> Result<(), DomainError> {
        players::mark_dropped(&self.db, player_id).await
    }

    async fn get_cards(&self, player_id: &str) -> Result<Vec<CardPoolEntry>, DomainError> {
        card_pool::list_pool(&self.db, player_id).await
    }

    async fn store_cards(&self, player_id: &str, copies: &[CardCopy]) -> Result<(), DomainError> {
        let player_id = player_id.to_string();
        let copies = copies.to_vec();
        debug!(copies = copies.len(), "storing cards");
        with_txn(&self.db, move |txn| {
            Box::pin(async move { card_pool::add_copies(txn, &player_id, &copies).await })
        })
        .await
    }

    async fn get_pairing(&self, player_id: &str) -> Result<Pairing, DomainError> {
        let Some(active) = league::find_active(&self.db).await? else {
            return Err(DomainError::not_found(
                NotFoundKind::Pairing,
                "no pairing: no league is active",
            ));
        };
        pairings::require_for_player(&self.db, active.round, player_id).await
    }

    async fn store_pairings(&self, scheduled: &[Pairing]) -> Result<(), DomainError> {
        let scheduled = scheduled.to_vec();
        with_txn(&self.db, move |txn| {
            Box::pin(async move { pairings::insert_pairings(txn, &scheduled).await })
        })
        .await
    }

    async fn update_pairing(&self, pairing: &Pairing) -> Result<(), DomainError> {
        pairings::report_result(&self.db, pairing).await
    }

    async fn start_league(&self) -> Result<(), DomainError> {
        let round = with_txn(&self.db, |txn| Box::pin(async move { league::start(txn).await }))
            .await?;
        info!(round, "league started");
        Ok(())
    }

    async fn end_league(&self) -> Result<(), DomainError> {
        league::end(&self.db).await?;
        info!("league ended");
        Ok(())
    }

    async fn get_round(&self) -> Result<i32, DomainError> {
        Ok(league::require_active(&self.db).await?.round)
    }

    async fn advance_round(&self) -> Result<i32, DomainError> {
        with_txn(&self.db, |txn| {
            Box::pin(async move { league::advance_round(txn).await })
        })
        .await
    }

    async fn unlock_set(&self, set_code: &str) -> Result<(), DomainError> {
        let set_code = set_code.to_string();
        with_txn(&self.db, move |txn| {
            Box::pin(async move { league::unlock_set(txn, &set_code).await })
        })
        .await
    }

    async fn get_sets(&self) -> Result<Vec<String>, DomainError> {
        league::unlocked_sets(&self.db).await
    }

    async fn is_admin(&self, player_id: &str) -> Result<bool, DomainError> {
        moderation::is_admin(&self.db, player_id).await
    }

    async fn make_admin(&self, player_id: &str) -> Result<(), DomainError> {
        moderation::grant_admin(&self.db, player_id).await
    }

    async fn get_banned_cards(&self) -> Result<Vec<String>, DomainError> {
        moderation::banned_cards(&self.db).await
    }

    async fn ban_card(&self, card_name: &str) -> Result<(), DomainError> {
        moderation::ban(&self.db, card_name).await
    }

    async fn unban_card(&self, card_name: &str) -> Result<(), DomainError> {
        moderation::unban(&self.db, card_name).await
    }

    async fn credit_player(
        &self,
        player_id: &str,
        wild_cards: i32,
        wild_packs: i32,
    ) -> Result<(), DomainError> {
        players::credit(&self.db, player_id, wild_cards, wild_packs).await
    }

    async fn redeem_wild_card(&self, player_id: &str, copy: &CardCopy) -> Result<(), DomainError> {
        let player_id = player_id.to_string();
        let copy = copy.clone();
        with_txn(&self.db, move |txn| {
            Box::pin(async move {
                players::spend_wild_cards(txn, &player_id, 1).await?;
                card_pool::add_copies(txn, &player_id, std::slice::from_ref(&copy)).await
            })
        })
        .await
    }

    async fn redeem_wild_packs(
        &self,
        player_id: &str,
        packs: i32,
        copies: &[CardCopy],
    ) -> Result<(), DomainError> {
        let player_id = player_id.to_string();
        let copies = copies.to_vec();
        with_txn(&self.db, move |txn| {
            Box::pin(async move {
                players::spend_wild_packs(txn, &player_id, packs).await?;
                card_pool::add_copies(txn, &player_id, &copies).await
            })
        })
        .await
    }
}
