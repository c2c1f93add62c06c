// Behaviour both LeagueStore implementations must agree on.

use backend_test_support::unique_helpers::{unique_card_name, unique_str};
use league::domain::cards::CardCopy;
use league::domain::pairing::Pairing;
use league::domain::player::Player;
use league::errors::domain::{ConflictKind, DomainError, NotFoundKind};

use crate::support::{build_store, ALL_STORES};

#[tokio::test]
async fn store_cards_groups_and_accumulates() -> Result<(), DomainError> {
    for kind in ALL_STORES {
        let store = build_store(kind).await;
        let a = CardCopy::new("Opt", "xln", 65);
        let b = CardCopy::new("Shock", "xln", 156);

        store.store_cards("p1", &[a.clone(), a.clone(), b]).await?;
        let pool = store.get_cards("p1").await?;
        assert_eq!(pool.len(), 2, "{kind:?}");
        assert_eq!((pool[0].name.as_str(), pool[0].count), ("Opt", 2), "{kind:?}");
        assert_eq!((pool[1].name.as_str(), pool[1].count), ("Shock", 1), "{kind:?}");

        store.store_cards("p1", &[a]).await?;
        let pool = store.get_cards("p1").await?;
        assert_eq!(pool.len(), 2, "{kind:?}");
        assert_eq!(pool[0].count, 3, "{kind:?}");

        store.store_cards("p1", &[]).await?;
        assert_eq!(store.get_cards("p1").await?, pool, "{kind:?}");
    }
    Ok(())
}

#[tokio::test]
async fn league_lifecycle_is_guarded() -> Result<(), DomainError> {
    for kind in ALL_STORES {
        let store = build_store(kind).await;

        let err = store.end_league().await.unwrap_err();
        assert!(err.is_conflict(ConflictKind::NoActiveLeague), "{kind:?}: {err}");
        let err = store.get_round().await.unwrap_err();
        assert!(err.is_conflict(ConflictKind::NoActiveLeague), "{kind:?}: {err}");

        store.start_league().await?;
        let err = store.start_league().await.unwrap_err();
        assert!(err.is_conflict(ConflictKind::LeagueAlreadyOngoing), "{kind:?}: {err}");

        assert_eq!(store.get_round().await?, 1, "{kind:?}");
        assert_eq!(store.advance_round().await?, 2, "{kind:?}");
        assert_eq!(store.get_round().await?, 2, "{kind:?}");

        store.unlock_set("xln").await?;
        store.unlock_set("xln").await?;
        assert_eq!(store.get_sets().await?, ["xln"], "{kind:?}");

        store.end_league().await?;
        let err = store.advance_round().await.unwrap_err();
        assert!(err.is_conflict(ConflictKind::NoActiveLeague), "{kind:?}: {err}");

        // Rounds continue across leagues
        store.start_league().await?;
        assert_eq!(store.get_round().await?, 3, "{kind:?}");
        assert!(store.get_sets().await?.is_empty(), "{kind:?}");
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_advances_each_see_their_own_round() -> Result<(), DomainError> {
    for kind in ALL_STORES {
        let store = build_store(kind).await;
        store.start_league().await?;

        let advances: Vec<_> = (0..5)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.advance_round().await })
            })
            .collect();

        let mut rounds = Vec::new();
        for task in advances {
            rounds.push(task.await.expect("advance task panicked")?);
        }
        rounds.sort();
        assert_eq!(rounds, vec![2, 3, 4, 5, 6], "{kind:?}");
        assert_eq!(store.get_round().await?, 6, "{kind:?}");
    }
    Ok(())
}

#[tokio::test]
async fn pairings_follow_the_current_round() -> Result<(), DomainError> {
    for kind in ALL_STORES {
        let store = build_store(kind).await;
        store
            .store_pairings(&[Pairing::scheduled(1, "u1", "u2")])
            .await?;

        // No league yet: nothing is current
        let err = store.get_pairing("u1").await.unwrap_err();
        assert!(err.is_not_found(NotFoundKind::Pairing), "{kind:?}: {err}");

        store.start_league().await?;
        assert_eq!(store.get_pairing("u2").await?.round, 1, "{kind:?}");

        store.advance_round().await?;
        let err = store.get_pairing("u1").await.unwrap_err();
        assert!(err.is_not_found(NotFoundKind::Pairing), "{kind:?}: {err}");
    }
    Ok(())
}

#[tokio::test]
async fn pairing_batches_are_all_or_nothing() -> Result<(), DomainError> {
    for kind in ALL_STORES {
        let store = build_store(kind).await;
        store.start_league().await?;
        store
            .store_pairings(&[Pairing::scheduled(1, "u1", "u2")])
            .await?;

        let err = store
            .store_pairings(&[
                Pairing::scheduled(1, "u3", "u4"),
                Pairing::scheduled(1, "u1", "u2"),
            ])
            .await
            .unwrap_err();
        assert!(err.is_conflict(ConflictKind::Unique("pairing".into())), "{kind:?}: {err}");

        let err = store.get_pairing("u3").await.unwrap_err();
        assert!(err.is_not_found(NotFoundKind::Pairing), "{kind:?}: {err}");
    }
    Ok(())
}

#[tokio::test]
async fn update_pairing_is_compare_and_set() -> Result<(), DomainError> {
    for kind in ALL_STORES {
        let store = build_store(kind).await;
        store.start_league().await?;
        let scheduled = Pairing::scheduled(1, "u1", "u2");
        store.store_pairings(std::slice::from_ref(&scheduled)).await?;

        let first = Pairing {
            wins1: 2,
            draws: 1,
            ..scheduled.clone()
        };
        store.update_pairing(&first).await?;

        let second = Pairing {
            wins2: 2,
            ..scheduled.clone()
        };
        let err = store.update_pairing(&second).await.unwrap_err();
        assert!(err.is_conflict(ConflictKind::PairingAlreadyReported), "{kind:?}: {err}");
        assert_eq!(store.get_pairing("u1").await?, first, "{kind:?}");

        let absent = Pairing::scheduled(1, "u8", "u9");
        let err = store.update_pairing(&Pairing { wins1: 1, ..absent }).await.unwrap_err();
        assert!(err.is_conflict(ConflictKind::PairingAlreadyReported), "{kind:?}: {err}");
    }
    Ok(())
}

#[tokio::test]
async fn players_keep_their_fields() -> Result<(), DomainError> {
    for kind in ALL_STORES {
        let store = build_store(kind).await;
        store.upsert_player(&Player::new("u1")).await?;
        store.upsert_player(&Player::new("u2")).await?;
        store.drop_player("u2").await?;
        store.credit_player("u1", 2, 3).await?;

        let mut all = store.get_all_players().await?;
        all.sort_by(|a, b| a.id.cmp(&b.id));
        assert_eq!(all.len(), 2, "{kind:?}");
        assert_eq!((all[0].wild_cards, all[0].wild_packs), (2, 3), "{kind:?}");
        assert!(all[1].dropped, "{kind:?}");

        let err = store.drop_player("ghost").await.unwrap_err();
        assert!(err.is_not_found(NotFoundKind::Player), "{kind:?}: {err}");
        let err = store.credit_player("ghost", 1, 0).await.unwrap_err();
        assert!(err.is_not_found(NotFoundKind::Player), "{kind:?}: {err}");
    }
    Ok(())
}

#[tokio::test]
async fn membership_writes_are_conditional() -> Result<(), DomainError> {
    for kind in ALL_STORES {
        let store = build_store(kind).await;

        let fresh = store.insert_player("u1").await?;
        assert_eq!(fresh, Player::new("u1"), "{kind:?}");
        let err = store.insert_player("u1").await.unwrap_err();
        assert!(err.is_conflict(ConflictKind::PlayerAlreadyJoined), "{kind:?}: {err}");

        let err = store.reactivate_player("u1").await.unwrap_err();
        assert!(err.is_conflict(ConflictKind::PlayerAlreadyJoined), "{kind:?}: {err}");
        let err = store.reactivate_player("ghost").await.unwrap_err();
        assert!(err.is_not_found(NotFoundKind::Player), "{kind:?}: {err}");

        store.credit_player("u1", 2, 1).await?;
        store.drop_player("u1").await?;
        let err = store.drop_player("u1").await.unwrap_err();
        assert!(err.is_conflict(ConflictKind::PlayerAlreadyDropped), "{kind:?}: {err}");

        // A credit while dropped is visible after reactivation
        store.credit_player("u1", 1, 0).await?;
        let back = store.reactivate_player("u1").await?;
        assert!(!back.dropped, "{kind:?}");
        assert_eq!((back.wild_cards, back.wild_packs), (3, 1), "{kind:?}");
        assert_eq!(store.get_player("u1").await?, back, "{kind:?}");
    }
    Ok(())
}

#[tokio::test]
async fn redemption_spends_and_stores_together() -> Result<(), DomainError> {
    for kind in ALL_STORES {
        let store = build_store(kind).await;
        store.upsert_player(&Player::new("u1")).await?;
        store.credit_player("u1", 1, 0).await?;
        let opt = CardCopy::new("Opt", "xln", 65);

        store.redeem_wild_card("u1", &opt).await?;
        assert_eq!(store.get_player("u1").await?.wild_cards, 0, "{kind:?}");
        assert_eq!(store.get_cards("u1").await?[0].count, 1, "{kind:?}");

        let err = store.redeem_wild_card("u1", &opt).await.unwrap_err();
        assert!(err.is_conflict(ConflictKind::InsufficientBalance), "{kind:?}: {err}");
        assert_eq!(store.get_cards("u1").await?[0].count, 1, "{kind:?}");

        let err = store.redeem_wild_card("ghost", &opt).await.unwrap_err();
        assert!(err.is_not_found(NotFoundKind::Player), "{kind:?}: {err}");
    }
    Ok(())
}

#[tokio::test]
async fn moderation_lists() -> Result<(), DomainError> {
    for kind in ALL_STORES {
        let store = build_store(kind).await;
        let card = unique_card_name("Opt");
        let admin = unique_str("admin");

        store.ban_card(&card).await?;
        store.ban_card(&card).await?;
        assert_eq!(store.get_banned_cards().await?, [card.clone()], "{kind:?}");

        store.unban_card(&card).await?;
        let err = store.unban_card(&card).await.unwrap_err();
        assert!(err.is_not_found(NotFoundKind::Card), "{kind:?}: {err}");

        store.make_admin(&admin).await?;
        store.make_admin(&admin).await?;
        assert!(store.is_admin(&admin).await?, "{kind:?}");
        assert!(!store.is_admin(&unique_str("player")).await?, "{kind:?}");
    }
    Ok(())
}
