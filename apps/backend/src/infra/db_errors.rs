//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`, using structured `DbErr::Custom`
//! payloads for domain outcomes they detect themselves (a compare-and-set
//! that matched no row, a missing active league). This module turns both
//! those payloads and raw driver errors into `DomainError`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;

/// Custom payload prefixes produced by the adapters.
pub const PAIRING_ALREADY_REPORTED: &str = "PAIRING_ALREADY_REPORTED:";
pub const NO_ACTIVE_LEAGUE: &str = "NO_ACTIVE_LEAGUE";
pub const PLAYER_NOT_FOUND: &str = "PLAYER_NOT_FOUND:";
pub const PLAYER_ALREADY_JOINED: &str = "PLAYER_ALREADY_JOINED:";
pub const PLAYER_ALREADY_DROPPED: &str = "PLAYER_ALREADY_DROPPED:";
pub const INSUFFICIENT_BALANCE: &str = "INSUFFICIENT_BALANCE:";
pub const CARD_NOT_BANNED: &str = "CARD_NOT_BANNED:";

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract table.column from SQLite "UNIQUE constraint failed: table.column" error messages.
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    let marker = "UNIQUE constraint failed: ";
    let start = error_msg.find(marker)? + marker.len();
    error_msg[start..]
        .split(|c: char| c.is_whitespace() || c == ',' || c == '"')
        .next()
        .filter(|s| !s.is_empty())
}

/// Map SQLite table.column format to domain-specific conflict errors.
fn map_sqlite_table_column_to_conflict(table_column: &str) -> Option<(ConflictKind, &'static str)> {
    match table_column {
        "league.active" => Some((
            ConflictKind::LeagueAlreadyOngoing,
            "a league is already ongoing",
        )),
        "pairing.round" => Some((
            ConflictKind::Unique("pairing".into()),
            "pairing already scheduled for this round",
        )),
        "player.id" => Some((ConflictKind::Unique("player".into()), "player already exists")),
        _ => None,
    }
}

/// Map PostgreSQL constraint names to domain-specific conflict errors.
fn map_postgres_constraint_to_conflict(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    if error_msg.contains("ux_league_single_active") {
        return Some((
            ConflictKind::LeagueAlreadyOngoing,
            "a league is already ongoing",
        ));
    }
    if error_msg.contains("pk_pairing") {
        return Some((
            ConflictKind::Unique("pairing".into()),
            "pairing already scheduled for this round",
        ));
    }
    if error_msg.contains("player_pkey") {
        return Some((ConflictKind::Unique("player".into()), "player already exists"));
    }
    None
}

fn map_custom(msg: &str) -> Option<DomainError> {
    if let Some(key) = msg.strip_prefix(PAIRING_ALREADY_REPORTED) {
        warn!(pairing = %Redacted(key), "Pairing compare-and-set did not apply");
        return Some(DomainError::conflict(
            ConflictKind::PairingAlreadyReported,
            format!("pairing {key} is already reported or does not exist"),
        ));
    }
    if msg == NO_ACTIVE_LEAGUE {
        return Some(DomainError::conflict(
            ConflictKind::NoActiveLeague,
            "no active league",
        ));
    }
    if let Some(player_id) = msg.strip_prefix(PLAYER_NOT_FOUND) {
        return Some(DomainError::not_found(
            NotFoundKind::Player,
            format!("player {player_id} not found"),
        ));
    }
    if let Some(player_id) = msg.strip_prefix(PLAYER_ALREADY_JOINED) {
        return Some(DomainError::conflict(
            ConflictKind::PlayerAlreadyJoined,
            format!("player {player_id} is already in the league"),
        ));
    }
    if let Some(player_id) = msg.strip_prefix(PLAYER_ALREADY_DROPPED) {
        return Some(DomainError::conflict(
            ConflictKind::PlayerAlreadyDropped,
            format!("player {player_id} has already dropped"),
        ));
    }
    if let Some(what) = msg.strip_prefix(INSUFFICIENT_BALANCE) {
        return Some(DomainError::conflict(
            ConflictKind::InsufficientBalance,
            format!("not enough {what}"),
        ));
    }
    if let Some(card) = msg.strip_prefix(CARD_NOT_BANNED) {
        return Some(DomainError::not_found(
            NotFoundKind::Card,
            format!("card {card:?} is not banned"),
        ));
    }
    None
}

/// Translate a `DbErr` into a `DomainError` with sanitized, PII-safe detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        sea_orm::DbErr::RecordNotFound(what) => {
            return DomainError::not_found(
                NotFoundKind::Other("Record".into()),
                format!("record not found: {what}"),
            );
        }
        sea_orm::DbErr::Custom(msg) => {
            if let Some(mapped) = map_custom(msg) {
                return mapped;
            }
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(raw_error = %Redacted(&error_msg), "Unique constraint violation");

        if let Some(table_column) = extract_sqlite_table_column(&error_msg) {
            if let Some((kind, detail)) = map_sqlite_table_column_to_conflict(table_column) {
                return DomainError::conflict(kind, detail);
            }
        }

        if let Some((kind, detail)) = map_postgres_constraint_to_conflict(&error_msg) {
            return DomainError::conflict(kind, detail);
        }

        return DomainError::conflict(
            ConflictKind::Unique("Unique".into()),
            "unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(raw_error = %Redacted(&error_msg), "Foreign key constraint violation");
        return DomainError::validation_other("foreign key constraint violation");
    }

    if error_msg.contains("timeout")
        || error_msg.contains("pool timed out")
        || error_msg.contains("unavailable")
        || error_msg.contains("database is locked")
    {
        warn!(raw_error = %Redacted(&error_msg), "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "database timeout");
    }

    error!(raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "database operation failed",
    )
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}
