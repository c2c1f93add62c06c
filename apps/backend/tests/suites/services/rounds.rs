use league::config::league::LeagueConfig;
use league::domain::pairing::Pairing;
use league::errors::domain::{
    ConflictKind, DomainError, ForbiddenKind, InfraErrorKind, NotFoundKind,
};

use crate::support::{harness, harness_with, FakeLookup, FakePacks, ALL_STORES};

#[tokio::test]
async fn start_round_hands_packs_to_active_players() -> Result<(), DomainError> {
    for kind in ALL_STORES {
        let h = harness(kind).await;
        h.service.join_league("u1").await?;
        h.service.join_league("u2").await?;
        h.service.join_league("gone").await?;
        h.service.drop_player("gone").await?;

        let start = h.service.start_round("m19").await?;

        assert_eq!(start.round, 1, "{kind:?}");
        assert_eq!(
            start.pools.keys().cloned().collect::<Vec<_>>(),
            vec!["u1".to_string(), "u2".to_string()],
            "{kind:?}"
        );
        assert_eq!(start.pools["u1"].len(), 2 * h.packs.pack_size(), "{kind:?}");
        assert_eq!(
            h.packs.requests(),
            vec![("m19".to_string(), 2), ("m19".to_string(), 2)],
            "{kind:?}"
        );

        // Two packs of [Opt, Shock, Opt]
        let pool = h.service.get_player_cards("u1").await?;
        let counts: Vec<(&str, i32, i32)> = pool
            .iter()
            .map(|e| (e.name.as_str(), e.collector_number, e.count))
            .collect();
        assert_eq!(counts, vec![("Opt", 65, 4), ("Shock", 156, 2)], "{kind:?}");
        assert!(h.service.get_player_cards("gone").await?.is_empty(), "{kind:?}");

        assert_eq!(h.service.get_sets().await?, vec!["m19".to_string()], "{kind:?}");
        assert_eq!(h.store.get_round().await?, 1, "{kind:?}");
    }
    Ok(())
}

#[tokio::test]
async fn second_start_fails_before_any_import() -> Result<(), DomainError> {
    for kind in ALL_STORES {
        let h = harness(kind).await;
        h.service.join_league("u1").await?;
        h.service.start_round("m19").await?;
        let requests = h.packs.requests().len();

        let err = h.service.start_round("m20").await.unwrap_err();
        assert!(err.is_conflict(ConflictKind::LeagueAlreadyOngoing), "{kind:?}: {err}");
        assert_eq!(h.packs.requests().len(), requests, "{kind:?}");
        assert_eq!(h.service.get_sets().await?, vec!["m19".to_string()], "{kind:?}");
    }
    Ok(())
}

#[tokio::test]
async fn unknown_set_aborts_start_without_a_league() -> Result<(), DomainError> {
    for kind in ALL_STORES {
        let h = harness_with(
            kind,
            LeagueConfig::default(),
            FakePacks::standard().with_unknown_set("zzz"),
            FakeLookup::default(),
        )
        .await;
        h.service.join_league("u1").await?;

        let err = h.service.start_round("zzz").await.unwrap_err();
        assert!(err.is_not_found(NotFoundKind::Set), "{kind:?}: {err}");
        assert!(err.detail().starts_with("failed to start round: "), "{kind:?}");

        let err = h.store.get_round().await.unwrap_err();
        assert!(err.is_conflict(ConflictKind::NoActiveLeague), "{kind:?}: {err}");
    }
    Ok(())
}

#[tokio::test]
async fn malformed_pack_keeps_earlier_imports_and_no_league() -> Result<(), DomainError> {
    for kind in ALL_STORES {
        let config = LeagueConfig {
            packs_per_round: 1,
            ..LeagueConfig::default()
        };
        let packs = FakePacks::standard().malformed_after(1);
        let h = harness_with(kind, config, packs, FakeLookup::default()).await;
        h.service.join_league("u1").await?;
        h.service.join_league("u2").await?;

        let err = h.service.start_round("m19").await.unwrap_err();
        assert!(
            matches!(err, DomainError::Infra(InfraErrorKind::MalformedUpstream, _)),
            "{kind:?}: {err}"
        );
        assert_eq!(h.packs.requests().len(), 2, "{kind:?}");

        // u1 was served before u2's pack failed to convert
        let pool = h.service.get_player_cards("u1").await?;
        let counts: Vec<(&str, i32, i32)> = pool
            .iter()
            .map(|e| (e.name.as_str(), e.collector_number, e.count))
            .collect();
        assert_eq!(counts, vec![("Opt", 65, 2), ("Shock", 156, 1)], "{kind:?}");
        assert!(h.service.get_player_cards("u2").await?.is_empty(), "{kind:?}");

        let err = h.store.get_round().await.unwrap_err();
        assert!(err.is_conflict(ConflictKind::NoActiveLeague), "{kind:?}: {err}");
    }
    Ok(())
}

#[tokio::test]
async fn restarted_league_does_not_reuse_old_pairings() -> Result<(), DomainError> {
    for kind in ALL_STORES {
        let h = harness(kind).await;
        h.store.make_admin("boss").await?;
        h.service.join_league("u1").await?;
        h.service.join_league("u2").await?;

        let first = h.service.start_round("m19").await?;
        h.service
            .store_pairings("boss", &[Pairing::scheduled(first.round, "u1", "u2")])
            .await?;
        h.service.report_match("u1", 2, 1, 0).await?;
        h.service.end_league("boss").await?;

        let second = h.service.start_round("dom").await?;
        assert!(second.round > first.round, "{kind:?}");
        assert_eq!(h.store.get_round().await?, second.round, "{kind:?}");

        let err = h.store.get_pairing("u1").await.unwrap_err();
        assert!(err.is_not_found(NotFoundKind::Pairing), "{kind:?}: {err}");

        h.service
            .store_pairings("boss", &[Pairing::scheduled(second.round, "u1", "u2")])
            .await?;
        let reported = h.service.report_match("u2", 2, 0, 1).await?;
        assert_eq!(reported.round, second.round, "{kind:?}");
        assert_eq!(
            (reported.wins1, reported.wins2, reported.draws),
            (0, 2, 1),
            "{kind:?}"
        );
    }
    Ok(())
}

#[tokio::test]
async fn advance_round_imports_and_unlocks() -> Result<(), DomainError> {
    for kind in ALL_STORES {
        let h = harness(kind).await;
        h.service.join_league("u1").await?;
        h.service.start_round("m19").await?;

        let next = h.service.advance_round("grn").await?;
        assert_eq!(next.round, 2, "{kind:?}");
        assert_eq!(next.pools["u1"].len(), 2 * h.packs.pack_size(), "{kind:?}");
        assert_eq!(h.store.get_round().await?, 2, "{kind:?}");
        let mut sets = h.service.get_sets().await?;
        sets.sort();
        assert_eq!(sets, vec!["grn".to_string(), "m19".to_string()], "{kind:?}");

        // Re-unlocking an already unlocked set is a no-op
        h.service.advance_round("m19").await?;
        assert_eq!(h.service.get_sets().await?.len(), 2, "{kind:?}");

        // Two printings in each of two sets
        let pool = h.service.get_player_cards("u1").await?;
        assert_eq!(pool.len(), 4, "{kind:?}");
        assert_eq!(pool.iter().map(|e| e.count).sum::<i32>(), 18, "{kind:?}");
    }
    Ok(())
}

#[tokio::test]
async fn advance_without_league_is_no_active_league() -> Result<(), DomainError> {
    for kind in ALL_STORES {
        let h = harness(kind).await;
        h.service.join_league("u1").await?;

        let err = h.service.advance_round("m19").await.unwrap_err();
        assert!(err.is_conflict(ConflictKind::NoActiveLeague), "{kind:?}: {err}");
        assert!(h.packs.requests().is_empty(), "{kind:?}");
    }
    Ok(())
}

#[tokio::test]
async fn end_league_is_admin_only_and_guarded() -> Result<(), DomainError> {
    for kind in ALL_STORES {
        let h = harness(kind).await;
        h.service.join_league("u1").await?;
        h.service.start_round("m19").await?;

        let err = h.service.end_league("u1").await.unwrap_err();
        assert!(err.is_forbidden(ForbiddenKind::NotAdmin), "{kind:?}: {err}");

        h.store.make_admin("boss").await?;
        h.service.end_league("boss").await?;

        let err = h.service.end_league("boss").await.unwrap_err();
        assert!(err.is_conflict(ConflictKind::NoActiveLeague), "{kind:?}: {err}");

        // A new league can start once the old one has ended, after its rounds
        let restarted = h.service.start_round("dom").await?;
        assert_eq!(restarted.round, 2, "{kind:?}");
        assert_eq!(h.service.get_sets().await?, vec!["dom".to_string()], "{kind:?}");
    }
    Ok(())
}
