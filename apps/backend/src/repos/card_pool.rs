//! Card pool repository functions (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::card_pool_sea::{self as pool_adapter, PoolIncrement};
use crate::domain::cards::{group_copies, CardCopy, CardPoolEntry};
use crate::errors::domain::DomainError;

pub async fn list_pool<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: &str,
) -> Result<Vec<CardPoolEntry>, DomainError> {
    let rows = pool_adapter::list_for_player(conn, player_id).await?;
    Ok(rows.into_iter().map(CardPoolEntry::from).collect())
}

/// Groups `copies` by (set, collector number) and adds the counts in one upsert.
pub async fn add_copies<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: &str,
    copies: &[CardCopy],
) -> Result<(), DomainError> {
    let increments = group_copies(copies)
        .into_iter()
        .map(|entry| PoolIncrement {
            name: entry.name,
            set_code: entry.set_code,
            collector_number: entry.collector_number,
            count: entry.count,
        })
        .collect();

    pool_adapter::add_counts(conn, player_id, increments).await?;
    Ok(())
}

impl From<crate::entities::player_card_pool::Model> for CardPoolEntry {
    fn from(model: crate::entities::player_card_pool::Model) -> Self {
        Self {
            name: model.name,
            set_code: model.set_code,
            collector_number: model.collector_number,
            count: model.count,
        }
    }
}
