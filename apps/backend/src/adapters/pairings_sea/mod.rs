//! SeaORM adapter for pairings - generic over ConnectionTrait.

use sea_orm::sea_query::{Condition, Expr};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::entities::pairings;
use crate::infra::db_errors::PAIRING_ALREADY_REPORTED;

pub mod dto;

pub use dto::{PairingInsert, PairingResult};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

/// Pairing of `round` in which the player sits on either side.
pub async fn find_for_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round: i32,
    player_id: &str,
) -> Result<Option<pairings::Model>, sea_orm::DbErr> {
    pairings::Entity::find()
        .filter(pairings::Column::Round.eq(round))
        .filter(
            Condition::any()
                .add(pairings::Column::Player1.eq(player_id))
                .add(pairings::Column::Player2.eq(player_id)),
        )
        .one(conn)
        .await
}

pub async fn insert_many<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rows: Vec<PairingInsert>,
) -> Result<u64, sea_orm::DbErr> {
    if rows.is_empty() {
        return Ok(0);
    }

    let models = rows.into_iter().map(|row| pairings::ActiveModel {
        round: Set(row.round),
        player1: Set(row.player1),
        player2: Set(row.player2),
        wins1: Set(row.wins1),
        wins2: Set(row.wins2),
        draws: Set(row.draws),
    });

    pairings::Entity::insert_many(models)
        .exec_without_returning(conn)
        .await
}

/// Compare-and-set: writes the result only while the stored row is still
/// 0-0-0. Zero affected rows means the row is reported or absent.
pub async fn report_if_unreported<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    result: PairingResult,
) -> Result<(), sea_orm::DbErr> {
    let outcome = pairings::Entity::update_many()
        .col_expr(pairings::Column::Wins1, Expr::value(result.wins1))
        .col_expr(pairings::Column::Wins2, Expr::value(result.wins2))
        .col_expr(pairings::Column::Draws, Expr::value(result.draws))
        .filter(pairings::Column::Round.eq(result.round))
        .filter(pairings::Column::Player1.eq(result.player1.as_str()))
        .filter(pairings::Column::Player2.eq(result.player2.as_str()))
        .filter(pairings::Column::Wins1.eq(0))
        .filter(pairings::Column::Wins2.eq(0))
        .filter(pairings::Column::Draws.eq(0))
        .exec(conn)
        .await?;

    if outcome.rows_affected == 0 {
        return Err(sea_orm::DbErr::Custom(format!(
            "{PAIRING_ALREADY_REPORTED}{}:{}:{}",
            result.round, result.player1, result.player2
        )));
    }
    Ok(())
}
