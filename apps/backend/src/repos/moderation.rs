//! Ban list and admin flag repository functions (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::moderation_sea as moderation_adapter;
use crate::errors::domain::DomainError;

pub async fn banned_cards<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<String>, DomainError> {
    let rows = moderation_adapter::list_bans(conn).await?;
    Ok(rows.into_iter().map(|row| row.card_name).collect())
}

pub async fn ban<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card_name: &str,
) -> Result<(), DomainError> {
    Ok(moderation_adapter::insert_ban(conn, card_name).await?)
}

pub async fn unban<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card_name: &str,
) -> Result<(), DomainError> {
    Ok(moderation_adapter::delete_ban(conn, card_name).await?)
}

pub async fn is_admin<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: &str,
) -> Result<bool, DomainError> {
    Ok(moderation_adapter::is_admin(conn, player_id).await?)
}

pub async fn grant_admin<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: &str,
) -> Result<(), DomainError> {
    Ok(moderation_adapter::grant_admin(conn, player_id).await?)
}
