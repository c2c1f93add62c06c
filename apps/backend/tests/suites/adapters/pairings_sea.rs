use league::domain::pairing::Pairing;
use league::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use league::repos::pairings;

use crate::support::sqlite_store;

#[tokio::test]
async fn pairing_is_found_from_either_side() -> Result<(), DomainError> {
    let store = sqlite_store().await;
    let db = store.connection();
    let scheduled = vec![
        Pairing::scheduled(1, "u1", "u2"),
        Pairing::scheduled(1, "u3", "u4"),
        Pairing::scheduled(2, "u1", "u3"),
    ];
    pairings::insert_pairings(db, &scheduled).await?;

    assert_eq!(pairings::require_for_player(db, 1, "u2").await?, scheduled[0]);
    assert_eq!(pairings::require_for_player(db, 1, "u1").await?, scheduled[0]);
    assert_eq!(pairings::require_for_player(db, 2, "u3").await?, scheduled[2]);

    let err = pairings::require_for_player(db, 2, "u4").await.unwrap_err();
    assert!(err.is_not_found(NotFoundKind::Pairing), "{err}");
    Ok(())
}

#[tokio::test]
async fn result_write_is_compare_and_set() -> Result<(), DomainError> {
    let store = sqlite_store().await;
    let db = store.connection();
    let scheduled = Pairing::scheduled(1, "u1", "u2");
    pairings::insert_pairings(db, std::slice::from_ref(&scheduled)).await?;

    let first = Pairing {
        wins1: 2,
        wins2: 1,
        ..scheduled.clone()
    };
    pairings::report_result(db, &first).await?;

    let second = Pairing {
        wins1: 0,
        wins2: 2,
        ..scheduled.clone()
    };
    let err = pairings::report_result(db, &second).await.unwrap_err();
    assert!(err.is_conflict(ConflictKind::PairingAlreadyReported), "{err}");
    assert_eq!(pairings::require_for_player(db, 1, "u1").await?, first);

    // Absent pairings fail the same way
    let err = pairings::report_result(db, &Pairing { round: 9, ..first })
        .await
        .unwrap_err();
    assert!(err.is_conflict(ConflictKind::PairingAlreadyReported), "{err}");
    Ok(())
}

#[tokio::test]
async fn duplicate_pairing_maps_to_unique_conflict() -> Result<(), DomainError> {
    let store = sqlite_store().await;
    let db = store.connection();
    pairings::insert_pairings(db, &[Pairing::scheduled(1, "u1", "u2")]).await?;

    let err = pairings::insert_pairings(db, &[Pairing::scheduled(1, "u1", "u2")])
        .await
        .unwrap_err();
    assert!(err.is_conflict(ConflictKind::Unique("pairing".into())), "{err}");
    Ok(())
}
