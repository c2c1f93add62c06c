//! Pairing repository functions (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::pairings_sea::{self as pairings_adapter, PairingInsert, PairingResult};
use crate::domain::pairing::Pairing;
use crate::errors::domain::{DomainError, NotFoundKind};

pub async fn require_for_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round: i32,
    player_id: &str,
) -> Result<Pairing, DomainError> {
    pairings_adapter::find_for_player(conn, round, player_id)
        .await?
        .map(Pairing::from)
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Pairing,
                format!("no pairing in round {round}"),
            )
        })
}

pub async fn insert_pairings<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    pairings: &[Pairing],
) -> Result<(), DomainError> {
    let rows = pairings
        .iter()
        .map(|p| PairingInsert {
            round: p.round,
            player1: p.player1.clone(),
            player2: p.player2.clone(),
            wins1: p.wins1,
            wins2: p.wins2,
            draws: p.draws,
        })
        .collect();
    pairings_adapter::insert_many(conn, rows).await?;
    Ok(())
}

pub async fn report_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    pairing: &Pairing,
) -> Result<(), DomainError> {
    pairings_adapter::report_if_unreported(
        conn,
        PairingResult {
            round: pairing.round,
            player1: pairing.player1.clone(),
            player2: pairing.player2.clone(),
            wins1: pairing.wins1,
            wins2: pairing.wins2,
            draws: pairing.draws,
        },
    )
    .await?;
    Ok(())
}

impl From<crate::entities::pairings::Model> for Pairing {
    fn from(model: crate::entities::pairings::Model) -> Self {
        Self {
            round: model.round,
            player1: model.player1,
            player2: model.player2,
            wins1: model.wins1,
            wins2: model.wins2,
            draws: model.draws,
        }
    }
}
