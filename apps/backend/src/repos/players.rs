//! Player repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::players_sea::{self as players_adapter, Currency, PlayerUpsert};
use crate::domain::player::Player;
use crate::errors::domain::DomainError;

pub async fn require_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: &str,
) -> Result<Player, DomainError> {
    let model = players_adapter::require_player(conn, player_id).await?;
    Ok(Player::from(model))
}

pub async fn list_players<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Player>, DomainError> {
    let models = players_adapter::list_all(conn).await?;
    Ok(models.into_iter().map(Player::from).collect())
}

pub async fn upsert_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player: &Player,
) -> Result<(), DomainError> {
    players_adapter::upsert(
        conn,
        PlayerUpsert {
            id: player.id.clone(),
            wild_cards: player.wild_cards,
            wild_packs: player.wild_packs,
            dropped: player.dropped,
        },
    )
    .await?;
    Ok(())
}

/// Creates a fresh player; `Conflict(PlayerAlreadyJoined)` if the id exists.
pub async fn insert_new<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: &str,
) -> Result<Player, DomainError> {
    let player = Player::new(player_id);
    players_adapter::insert_if_absent(
        conn,
        PlayerUpsert {
            id: player.id.clone(),
            wild_cards: player.wild_cards,
            wild_packs: player.wild_packs,
            dropped: player.dropped,
        },
    )
    .await?;
    Ok(player)
}

/// Clears the dropped flag of a dropped player and returns the row as it
/// now stands.
pub async fn reactivate<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: &str,
) -> Result<Player, DomainError> {
    players_adapter::set_dropped(conn, player_id, false).await?;
    require_player(conn, player_id).await
}

pub async fn mark_dropped<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: &str,
) -> Result<(), DomainError> {
    players_adapter::set_dropped(conn, player_id, true).await?;
    Ok(())
}

pub async fn credit<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: &str,
    wild_cards: i32,
    wild_packs: i32,
) -> Result<(), DomainError> {
    players_adapter::credit(conn, player_id, wild_cards, wild_packs).await?;
    Ok(())
}

pub async fn spend_wild_cards<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: &str,
    amount: i32,
) -> Result<(), DomainError> {
    players_adapter::debit(conn, player_id, Currency::WildCards, amount).await?;
    Ok(())
}

pub async fn spend_wild_packs<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: &str,
    amount: i32,
) -> Result<(), DomainError> {
    players_adapter::debit(conn, player_id, Currency::WildPacks, amount).await?;
    Ok(())
}

impl From<crate::entities::players::Model> for Player {
    fn from(model: crate::entities::players::Model) -> Self {
        Self {
            id: model.id,
            wild_cards: model.wild_card_count,
            wild_packs: model.wild_pack_count,
            dropped: model.dropped,
        }
    }
}
