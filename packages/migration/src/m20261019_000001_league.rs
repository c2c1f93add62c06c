use sea_orm::Statement;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Player {
    Table,
    Id,
    WildCardCount,
    WildPackCount,
    Dropped,
}

#[derive(Iden)]
enum PlayerCardPool {
    Table,
    PlayerId,
    SetCode,
    CollectorNumber,
    Name,
    Count,
}

#[derive(Iden)]
enum Pairing {
    Table,
    Round,
    Player1,
    Player2,
    Wins1,
    Wins2,
    Draws,
}

#[derive(Iden)]
enum League {
    Table,
    Id,
    Round,
    Active,
    StartedAt,
    EndedAt,
}

#[derive(Iden)]
enum LeagueSet {
    Table,
    LeagueId,
    SetCode,
    UnlockedAt,
}

#[derive(Iden)]
enum BannedCard {
    Table,
    CardName,
    BannedAt,
}

#[derive(Iden)]
enum LeagueAdmin {
    Table,
    PlayerId,
    GrantedAt,
}

/// Partial unique index: at most one row may have `active = true`.
/// Expressed in raw SQL because both Postgres and SQLite accept the same form.
const CREATE_SINGLE_ACTIVE_LEAGUE: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_league_single_active ON league (active) WHERE active";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // player
        manager
            .create_table(
                Table::create()
                    .table(Player::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Player::Id).string().not_null().primary_key())
                    .col(
                        ColumnDef::new(Player::WildCardCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Player::WildPackCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Player::Dropped)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        // player_card_pool: one row per (player, set, collector number)
        manager
            .create_table(
                Table::create()
                    .table(PlayerCardPool::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PlayerCardPool::PlayerId).string().not_null())
                    .col(ColumnDef::new(PlayerCardPool::SetCode).string().not_null())
                    .col(
                        ColumnDef::new(PlayerCardPool::CollectorNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PlayerCardPool::Name).string().not_null())
                    .col(
                        ColumnDef::new(PlayerCardPool::Count)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .primary_key(
                        Index::create()
                            .name("pk_player_card_pool")
                            .col(PlayerCardPool::PlayerId)
                            .col(PlayerCardPool::SetCode)
                            .col(PlayerCardPool::CollectorNumber),
                    )
                    .to_owned(),
            )
            .await?;

        // pairing
        manager
            .create_table(
                Table::create()
                    .table(Pairing::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Pairing::Round).integer().not_null())
                    .col(ColumnDef::new(Pairing::Player1).string().not_null())
                    .col(ColumnDef::new(Pairing::Player2).string().not_null())
                    .col(ColumnDef::new(Pairing::Wins1).integer().not_null().default(0))
                    .col(ColumnDef::new(Pairing::Wins2).integer().not_null().default(0))
                    .col(ColumnDef::new(Pairing::Draws).integer().not_null().default(0))
                    .primary_key(
                        Index::create()
                            .name("pk_pairing")
                            .col(Pairing::Round)
                            .col(Pairing::Player1)
                            .col(Pairing::Player2),
                    )
                    .to_owned(),
            )
            .await?;

        // lookups by the second seat; the PK already covers (round, player1)
        manager
            .create_index(
                Index::create()
                    .name("ix_pairing_round_player2")
                    .table(Pairing::Table)
                    .col(Pairing::Round)
                    .col(Pairing::Player2)
                    .to_owned(),
            )
            .await?;

        // league
        manager
            .create_table(
                Table::create()
                    .table(League::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(League::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(League::Round).integer().not_null().default(1))
                    .col(ColumnDef::new(League::Active).boolean().not_null())
                    .col(
                        ColumnDef::new(League::StartedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(League::EndedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        let backend = manager.get_database_backend();
        manager
            .get_connection()
            .execute(Statement::from_string(backend, CREATE_SINGLE_ACTIVE_LEAGUE))
            .await?;

        // league_set
        manager
            .create_table(
                Table::create()
                    .table(LeagueSet::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(LeagueSet::LeagueId).big_integer().not_null())
                    .col(ColumnDef::new(LeagueSet::SetCode).string().not_null())
                    .col(
                        ColumnDef::new(LeagueSet::UnlockedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .name("pk_league_set")
                            .col(LeagueSet::LeagueId)
                            .col(LeagueSet::SetCode),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_league_set_league_id")
                            .from(LeagueSet::Table, LeagueSet::LeagueId)
                            .to(League::Table, League::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // banned_card
        manager
            .create_table(
                Table::create()
                    .table(BannedCard::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BannedCard::CardName)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BannedCard::BannedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // league_admin
        manager
            .create_table(
                Table::create()
                    .table(LeagueAdmin::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LeagueAdmin::PlayerId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(LeagueAdmin::GrantedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order + drop index before table
        manager
            .drop_table(Table::drop().table(LeagueAdmin::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BannedCard::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LeagueSet::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ux_league_single_active")
                    .table(League::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(League::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ix_pairing_round_player2")
                    .table(Pairing::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Pairing::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(PlayerCardPool::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Player::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
