//! SeaORM adapter for card bans and league admins.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use time::OffsetDateTime;

use crate::entities::{banned_cards, league_admins};
use crate::infra::db_errors::CARD_NOT_BANNED;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn list_bans<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<banned_cards::Model>, sea_orm::DbErr> {
    banned_cards::Entity::find()
        .order_by_asc(banned_cards::Column::CardName)
        .all(conn)
        .await
}

pub async fn insert_ban<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card_name: &str,
) -> Result<(), sea_orm::DbErr> {
    let row = banned_cards::ActiveModel {
        card_name: Set(card_name.to_string()),
        banned_at: Set(OffsetDateTime::now_utc()),
    };
    banned_cards::Entity::insert(row)
        .on_conflict(
            OnConflict::column(banned_cards::Column::CardName)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

pub async fn delete_ban<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card_name: &str,
) -> Result<(), sea_orm::DbErr> {
    let result = banned_cards::Entity::delete_many()
        .filter(banned_cards::Column::CardName.eq(card_name))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(sea_orm::DbErr::Custom(format!("{CARD_NOT_BANNED}{card_name}")));
    }
    Ok(())
}

pub async fn is_admin<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: &str,
) -> Result<bool, sea_orm::DbErr> {
    Ok(league_admins::Entity::find_by_id(player_id.to_string())
        .one(conn)
        .await?
        .is_some())
}

pub async fn grant_admin<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: &str,
) -> Result<(), sea_orm::DbErr> {
    let row = league_admins::ActiveModel {
        player_id: Set(player_id.to_string()),
        granted_at: Set(OffsetDateTime::now_utc()),
    };
    league_admins::Entity::insert(row)
        .on_conflict(
            OnConflict::column(league_admins::Column::PlayerId)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    Ok(())
}
