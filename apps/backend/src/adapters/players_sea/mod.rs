//! SeaORM adapter for the player table - generic over ConnectionTrait.

use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entities::players;
use crate::infra::db_errors::{
    INSUFFICIENT_BALANCE, PLAYER_ALREADY_DROPPED, PLAYER_ALREADY_JOINED, PLAYER_NOT_FOUND,
};

pub mod dto;

pub use dto::PlayerUpsert;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

fn player_not_found(player_id: &str) -> sea_orm::DbErr {
    sea_orm::DbErr::Custom(format!("{PLAYER_NOT_FOUND}{player_id}"))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: &str,
) -> Result<Option<players::Model>, sea_orm::DbErr> {
    players::Entity::find_by_id(player_id.to_string())
        .one(conn)
        .await
}

/// Find player by id or return the `PLAYER_NOT_FOUND` payload.
pub async fn require_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: &str,
) -> Result<players::Model, sea_orm::DbErr> {
    find_by_id(conn, player_id)
        .await?
        .ok_or_else(|| player_not_found(player_id))
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<players::Model>, sea_orm::DbErr> {
    players::Entity::find()
        .order_by_asc(players::Column::Id)
        .all(conn)
        .await
}

/// Insert the player, or overwrite every mutable column if the id exists.
pub async fn upsert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PlayerUpsert,
) -> Result<(), sea_orm::DbErr> {
    let active = players::ActiveModel {
        id: Set(dto.id),
        wild_card_count: Set(dto.wild_cards),
        wild_pack_count: Set(dto.wild_packs),
        dropped: Set(dto.dropped),
    };

    players::Entity::insert(active)
        .on_conflict(
            OnConflict::column(players::Column::Id)
                .update_columns([
                    players::Column::WildCardCount,
                    players::Column::WildPackCount,
                    players::Column::Dropped,
                ])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

/// Insert the player only if the id is free; an existing row yields the
/// `PLAYER_ALREADY_JOINED` payload.
pub async fn insert_if_absent<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PlayerUpsert,
) -> Result<(), sea_orm::DbErr> {
    let player_id = dto.id.clone();
    let active = players::ActiveModel {
        id: Set(dto.id),
        wild_card_count: Set(dto.wild_cards),
        wild_pack_count: Set(dto.wild_packs),
        dropped: Set(dto.dropped),
    };

    let inserted = players::Entity::insert(active)
        .on_conflict(
            OnConflict::column(players::Column::Id)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    if inserted == 0 {
        return Err(sea_orm::DbErr::Custom(format!(
            "{PLAYER_ALREADY_JOINED}{player_id}"
        )));
    }
    Ok(())
}

/// Flip the dropped flag, but only from the opposite state. When no row
/// changes the player is either unknown or already in the target state.
pub async fn set_dropped<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: &str,
    dropped: bool,
) -> Result<(), sea_orm::DbErr> {
    let result = players::Entity::update_many()
        .col_expr(players::Column::Dropped, Expr::value(dropped))
        .filter(players::Column::Id.eq(player_id))
        .filter(players::Column::Dropped.eq(!dropped))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        require_player(conn, player_id).await?;
        let payload = if dropped {
            PLAYER_ALREADY_DROPPED
        } else {
            PLAYER_ALREADY_JOINED
        };
        return Err(sea_orm::DbErr::Custom(format!("{payload}{player_id}")));
    }
    Ok(())
}

/// Atomically add to both balances.
pub async fn credit<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: &str,
    wild_cards: i32,
    wild_packs: i32,
) -> Result<(), sea_orm::DbErr> {
    let result = players::Entity::update_many()
        .col_expr(
            players::Column::WildCardCount,
            Expr::col(players::Column::WildCardCount).add(wild_cards),
        )
        .col_expr(
            players::Column::WildPackCount,
            Expr::col(players::Column::WildPackCount).add(wild_packs),
        )
        .filter(players::Column::Id.eq(player_id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(player_not_found(player_id));
    }
    Ok(())
}

/// Which balance column a debit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    WildCards,
    WildPacks,
}

impl Currency {
    fn column(self) -> players::Column {
        match self {
            Currency::WildCards => players::Column::WildCardCount,
            Currency::WildPacks => players::Column::WildPackCount,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Currency::WildCards => "wild cards",
            Currency::WildPacks => "wild packs",
        }
    }
}

/// Conditionally subtract `amount`: the row only changes while the balance
/// covers it, so two concurrent redemptions can never overdraw.
pub async fn debit<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: &str,
    currency: Currency,
    amount: i32,
) -> Result<(), sea_orm::DbErr> {
    let column = currency.column();
    let result = players::Entity::update_many()
        .col_expr(column, Expr::col(column).sub(amount))
        .filter(players::Column::Id.eq(player_id))
        .filter(column.gte(amount))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        // Distinguish unknown player from an empty wallet
        require_player(conn, player_id).await?;
        return Err(sea_orm::DbErr::Custom(format!(
            "{INSUFFICIENT_BALANCE}{}",
            currency.label()
        )));
    }
    Ok(())
}
