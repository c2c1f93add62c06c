//! League lifecycle repository functions (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::league_sea as league_adapter;
use crate::entities::leagues;
use crate::errors::domain::DomainError;

pub async fn find_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Option<leagues::Model>, DomainError> {
    Ok(league_adapter::find_active(conn).await?)
}

pub async fn require_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<leagues::Model, DomainError> {
    Ok(league_adapter::require_active(conn).await?)
}

pub async fn start<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<i32, DomainError> {
    let league = league_adapter::create_active(conn).await?;
    Ok(league.round)
}

pub async fn end<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<(), DomainError> {
    Ok(league_adapter::deactivate(conn).await?)
}

pub async fn advance_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<i32, DomainError> {
    Ok(league_adapter::advance_round(conn).await?)
}

pub async fn unlock_set<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    set_code: &str,
) -> Result<(), DomainError> {
    let league = league_adapter::require_active(conn).await?;
    league_adapter::unlock_set(conn, league.id, set_code).await?;
    Ok(())
}

pub async fn unlocked_sets<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<String>, DomainError> {
    let league = league_adapter::require_active(conn).await?;
    let rows = league_adapter::list_sets(conn, league.id).await?;
    Ok(rows.into_iter().map(|row| row.set_code).collect())
}
