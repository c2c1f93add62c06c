//! SeaORM adapter for per-player card pools - generic over ConnectionTrait.

use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entities::player_card_pool;

pub mod dto;

pub use dto::PoolIncrement;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn list_for_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: &str,
) -> Result<Vec<player_card_pool::Model>, sea_orm::DbErr> {
    player_card_pool::Entity::find()
        .filter(player_card_pool::Column::PlayerId.eq(player_id))
        .order_by_asc(player_card_pool::Column::SetCode)
        .order_by_asc(player_card_pool::Column::CollectorNumber)
        .all(conn)
        .await
}

/// Upsert a batch of pool rows in one statement.
///
/// New keys are inserted with their count; existing keys get
/// `count = count + excluded.count`. Keys within `rows` must be unique.
pub async fn add_counts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: &str,
    rows: Vec<PoolIncrement>,
) -> Result<u64, sea_orm::DbErr> {
    if rows.is_empty() {
        return Ok(0);
    }

    let models = rows.into_iter().map(|row| player_card_pool::ActiveModel {
        player_id: Set(player_id.to_string()),
        set_code: Set(row.set_code),
        collector_number: Set(row.collector_number),
        name: Set(row.name),
        count: Set(row.count),
    });

    player_card_pool::Entity::insert_many(models)
        .on_conflict(
            OnConflict::columns([
                player_card_pool::Column::PlayerId,
                player_card_pool::Column::SetCode,
                player_card_pool::Column::CollectorNumber,
            ])
            .value(
                player_card_pool::Column::Count,
                Expr::col((player_card_pool::Entity, player_card_pool::Column::Count))
                    .add(Expr::cust("excluded.count")),
            )
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await
}
