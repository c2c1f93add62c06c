use league::errors::domain::{DomainError, NotFoundKind};
use league::repos::moderation;

use crate::support::sqlite_store;

#[tokio::test]
async fn bans_are_idempotent_and_sorted() -> Result<(), DomainError> {
    let store = sqlite_store().await;
    let db = store.connection();

    moderation::ban(db, "Oko, Thief of Crowns").await?;
    moderation::ban(db, "Field of the Dead").await?;
    moderation::ban(db, "Oko, Thief of Crowns").await?;

    assert_eq!(
        moderation::banned_cards(db).await?,
        ["Field of the Dead", "Oko, Thief of Crowns"]
    );

    moderation::unban(db, "Oko, Thief of Crowns").await?;
    let err = moderation::unban(db, "Oko, Thief of Crowns").await.unwrap_err();
    assert!(err.is_not_found(NotFoundKind::Card), "{err}");
    assert_eq!(moderation::banned_cards(db).await?, ["Field of the Dead"]);
    Ok(())
}

#[tokio::test]
async fn admin_grants_are_idempotent() -> Result<(), DomainError> {
    let store = sqlite_store().await;
    let db = store.connection();

    assert!(!moderation::is_admin(db, "boss").await?);
    moderation::grant_admin(db, "boss").await?;
    moderation::grant_admin(db, "boss").await?;
    assert!(moderation::is_admin(db, "boss").await?);
    assert!(!moderation::is_admin(db, "u1").await?);
    Ok(())
}
