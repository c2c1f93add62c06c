//! SeaORM adapter for the league row and its unlocked sets.

use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::entities::{league_sets, leagues};
use crate::infra::db_errors::NO_ACTIVE_LEAGUE;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

fn no_active_league() -> sea_orm::DbErr {
    sea_orm::DbErr::Custom(NO_ACTIVE_LEAGUE.to_string())
}

pub async fn find_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Option<leagues::Model>, sea_orm::DbErr> {
    leagues::Entity::find()
        .filter(leagues::Column::Active.eq(true))
        .one(conn)
        .await
}

pub async fn require_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<leagues::Model, sea_orm::DbErr> {
    find_active(conn).await?.ok_or_else(no_active_league)
}

/// Highest round reached by any league, active or ended.
pub async fn max_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Option<i32>, sea_orm::DbErr> {
    let max = leagues::Entity::find()
        .select_only()
        .column_as(Expr::col(leagues::Column::Round).max(), "max_round")
        .into_tuple::<Option<i32>>()
        .one(conn)
        .await?;
    Ok(max.flatten())
}

/// Inserts an active league one round past every earlier league, so
/// pairings keyed by round never cross leagues. A concurrent winner trips
/// the `ux_league_single_active` partial index.
pub async fn create_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<leagues::Model, sea_orm::DbErr> {
    let round = max_round(conn).await?.unwrap_or(0) + 1;
    leagues::ActiveModel {
        id: NotSet,
        round: Set(round),
        active: Set(true),
        started_at: Set(OffsetDateTime::now_utc()),
        ended_at: Set(None),
    }
    .insert(conn)
    .await
}

pub async fn deactivate<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<(), sea_orm::DbErr> {
    let result = leagues::Entity::update_many()
        .col_expr(leagues::Column::Active, Expr::value(false))
        .col_expr(
            leagues::Column::EndedAt,
            Expr::value(Some(OffsetDateTime::now_utc())),
        )
        .filter(leagues::Column::Active.eq(true))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(no_active_league());
    }
    Ok(())
}

/// `round = round + 1` on the active league, returning the new round.
/// Run inside a transaction so the read-back sees this write.
pub async fn advance_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<i32, sea_orm::DbErr> {
    let result = leagues::Entity::update_many()
        .col_expr(
            leagues::Column::Round,
            Expr::col(leagues::Column::Round).add(1),
        )
        .filter(leagues::Column::Active.eq(true))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(no_active_league());
    }
    Ok(require_active(conn).await?.round)
}

pub async fn list_sets<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    league_id: i64,
) -> Result<Vec<league_sets::Model>, sea_orm::DbErr> {
    league_sets::Entity::find()
        .filter(league_sets::Column::LeagueId.eq(league_id))
        .order_by_asc(league_sets::Column::UnlockedAt)
        .order_by_asc(league_sets::Column::SetCode)
        .all(conn)
        .await
}

/// Idempotent: unlocking an already unlocked set changes nothing.
pub async fn unlock_set<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    league_id: i64,
    set_code: &str,
) -> Result<(), sea_orm::DbErr> {
    let row = league_sets::ActiveModel {
        league_id: Set(league_id),
        set_code: Set(set_code.to_string()),
        unlocked_at: Set(OffsetDateTime::now_utc()),
    };

    league_sets::Entity::insert(row)
        .on_conflict(
            OnConflict::columns([league_sets::Column::LeagueId, league_sets::Column::SetCode])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    Ok(())
}
