use league::config::db::DbProfile;
use league::domain::player::Player;
use league::errors::domain::{DomainError, NotFoundKind};
use league::infra::db::orchestrate_migration;
use league::repos::{LeagueStore, SeaStore};
use migration::MigrationCommand;
use tempfile::TempDir;

fn file_profile(dir: &TempDir) -> DbProfile {
    DbProfile::SqliteFile {
        file: Some(dir.path().join("league.sqlite").display().to_string()),
    }
}

#[tokio::test]
async fn state_survives_reconnecting() -> Result<(), DomainError> {
    let dir = tempfile::tempdir().expect("temp dir");
    let profile = file_profile(&dir);

    {
        let store = SeaStore::connect(&profile).await?;
        store.upsert_player(&Player::new("u1")).await?;
        store.start_league().await?;
        store.unlock_set("xln").await?;
    }

    let store = SeaStore::connect(&profile).await?;
    assert_eq!(store.get_player("u1").await?, Player::new("u1"));
    assert_eq!(store.get_round().await?, 1);
    assert_eq!(store.get_sets().await?, ["xln"]);
    Ok(())
}

#[tokio::test]
async fn migration_cli_path_is_repeatable() -> Result<(), DomainError> {
    let dir = tempfile::tempdir().expect("temp dir");
    let profile = file_profile(&dir);

    orchestrate_migration(&profile, MigrationCommand::Up).await?;
    orchestrate_migration(&profile, MigrationCommand::Up).await?;
    orchestrate_migration(&profile, MigrationCommand::Status).await?;

    let store = SeaStore::connect(&profile).await?;
    store.upsert_player(&Player::new("u1")).await?;

    // Fresh drops and recreates every table
    drop(store);
    orchestrate_migration(&profile, MigrationCommand::Fresh).await?;
    let store = SeaStore::connect(&profile).await?;
    let err = store.get_player("u1").await.unwrap_err();
    assert!(err.is_not_found(NotFoundKind::Player), "{err}");
    Ok(())
}
