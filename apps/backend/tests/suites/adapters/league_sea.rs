use league::adapters::league_sea;
use league::errors::domain::{ConflictKind, DomainError};
use league::repos::league as league_repo;

use crate::support::sqlite_store;

#[tokio::test]
async fn only_one_league_can_be_active() -> Result<(), DomainError> {
    let store = sqlite_store().await;
    let db = store.connection();

    assert_eq!(league_repo::start(db).await?, 1);

    // Bypass the preflight: the partial unique index is the guard
    let raw = league_sea::create_active(db).await.unwrap_err();
    let err = DomainError::from(raw);
    assert!(err.is_conflict(ConflictKind::LeagueAlreadyOngoing), "{err}");

    league_repo::end(db).await?;
    assert!(league_repo::find_active(db).await?.is_none());
    assert_eq!(league_repo::start(db).await?, 2);
    Ok(())
}

#[tokio::test]
async fn guarded_updates_need_an_active_league() {
    let store = sqlite_store().await;
    let db = store.connection();

    for err in [
        league_repo::end(db).await.unwrap_err(),
        league_repo::advance_round(db).await.map(|_| ()).unwrap_err(),
        league_repo::unlock_set(db, "xln").await.unwrap_err(),
        league_repo::unlocked_sets(db).await.map(|_| ()).unwrap_err(),
    ] {
        assert!(err.is_conflict(ConflictKind::NoActiveLeague), "{err}");
    }
}

#[tokio::test]
async fn rounds_advance_and_sets_accumulate() -> Result<(), DomainError> {
    let store = sqlite_store().await;
    let db = store.connection();
    league_repo::start(db).await?;

    league_repo::unlock_set(db, "xln").await?;
    assert_eq!(league_repo::advance_round(db).await?, 2);
    league_repo::unlock_set(db, "rix").await?;
    league_repo::unlock_set(db, "xln").await?;
    assert_eq!(league_repo::advance_round(db).await?, 3);

    let mut sets = league_repo::unlocked_sets(db).await?;
    sets.sort();
    assert_eq!(sets, ["rix", "xln"]);
    assert_eq!(league_repo::require_active(db).await?.round, 3);
    Ok(())
}

#[tokio::test]
async fn next_league_starts_after_the_highest_round() -> Result<(), DomainError> {
    let store = sqlite_store().await;
    let db = store.connection();
    assert_eq!(league_sea::max_round(db).await?, None);

    league_repo::start(db).await?;
    league_repo::advance_round(db).await?;
    league_repo::advance_round(db).await?;
    league_repo::end(db).await?;
    assert_eq!(league_sea::max_round(db).await?, Some(3));

    assert_eq!(league_repo::start(db).await?, 4);
    assert_eq!(league_repo::require_active(db).await?.round, 4);
    Ok(())
}

#[tokio::test]
async fn ended_league_sets_do_not_leak_into_the_next() -> Result<(), DomainError> {
    let store = sqlite_store().await;
    let db = store.connection();
    league_repo::start(db).await?;
    league_repo::unlock_set(db, "xln").await?;
    league_repo::end(db).await?;

    league_repo::start(db).await?;
    assert!(league_repo::unlocked_sets(db).await?.is_empty());
    Ok(())
}
