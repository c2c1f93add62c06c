use league::errors::domain::{DomainError, ForbiddenKind, NotFoundKind, ValidationKind};

use crate::support::{harness, ALL_STORES};

#[tokio::test]
async fn moderation_requires_admin() -> Result<(), DomainError> {
    for kind in ALL_STORES {
        let h = harness(kind).await;
        h.service.join_league("u1").await?;

        for err in [
            h.service.ban_card("u1", "Opt").await.unwrap_err(),
            h.service.unban_card("u1", "Opt").await.unwrap_err(),
            h.service.make_admin("u1", "u1").await.unwrap_err(),
            h.service.grant_wilds("u1", "u1", 1, 1).await.unwrap_err(),
        ] {
            assert!(err.is_forbidden(ForbiddenKind::NotAdmin), "{kind:?}: {err}");
        }
        assert!(h.service.get_banned_cards().await?.is_empty(), "{kind:?}");
        assert_eq!(h.service.get_player_balance("u1").await?.wild_cards, 0, "{kind:?}");
    }
    Ok(())
}

#[tokio::test]
async fn ban_is_idempotent_and_unban_needs_a_ban() -> Result<(), DomainError> {
    for kind in ALL_STORES {
        let h = harness(kind).await;
        h.store.make_admin("boss").await?;

        h.service.ban_card("boss", "Oko, Thief of Crowns").await?;
        h.service.ban_card("boss", "Oko, Thief of Crowns").await?;
        h.service.ban_card("boss", "Field of the Dead").await?;

        let mut banned = h.service.get_banned_cards().await?;
        banned.sort();
        assert_eq!(
            banned,
            vec!["Field of the Dead".to_string(), "Oko, Thief of Crowns".to_string()],
            "{kind:?}"
        );

        h.service.unban_card("boss", "Field of the Dead").await?;
        let err = h.service.unban_card("boss", "Field of the Dead").await.unwrap_err();
        assert!(err.is_not_found(NotFoundKind::Card), "{kind:?}: {err}");
        assert!(err.detail().starts_with("failed to unban card: "), "{kind:?}");
    }
    Ok(())
}

#[tokio::test]
async fn admins_can_promote_others() -> Result<(), DomainError> {
    for kind in ALL_STORES {
        let h = harness(kind).await;
        h.store.make_admin("boss").await?;

        h.service.make_admin("boss", "deputy").await?;
        h.service.make_admin("boss", "deputy").await?;
        assert!(h.store.is_admin("deputy").await?, "{kind:?}");

        h.service.ban_card("deputy", "Opt").await?;
        assert_eq!(h.service.get_banned_cards().await?, vec!["Opt".to_string()], "{kind:?}");
    }
    Ok(())
}

#[tokio::test]
async fn grant_wilds_credits_balances() -> Result<(), DomainError> {
    for kind in ALL_STORES {
        let h = harness(kind).await;
        h.store.make_admin("boss").await?;
        h.service.join_league("u1").await?;

        h.service.grant_wilds("boss", "u1", 2, 1).await?;
        h.service.grant_wilds("boss", "u1", 1, 0).await?;
        let balance = h.service.get_player_balance("u1").await?;
        assert_eq!((balance.wild_cards, balance.wild_packs), (3, 1), "{kind:?}");

        let err = h.service.grant_wilds("boss", "u1", -1, 0).await.unwrap_err();
        assert!(
            err.is_validation(ValidationKind::Other("NEGATIVE_GRANT".into())),
            "{kind:?}: {err}"
        );

        let err = h.service.grant_wilds("boss", "ghost", 1, 1).await.unwrap_err();
        assert!(err.is_not_found(NotFoundKind::Player), "{kind:?}: {err}");
    }
    Ok(())
}
