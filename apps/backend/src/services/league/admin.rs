use tracing::info;

use super::LeagueService;
use crate::errors::domain::{DomainError, DomainResultExt, ForbiddenKind, ValidationKind};

impl LeagueService {
    pub(super) async fn require_admin(&self, requester_id: &str) -> Result<(), DomainError> {
        if self.store.is_admin(requester_id).await? {
            Ok(())
        } else {
            Err(DomainError::forbidden(
                ForbiddenKind::NotAdmin,
                format!("player {requester_id} is not a league admin"),
            ))
        }
    }

    pub async fn ban_card(&self, requester_id: &str, card_name: &str) -> Result<(), DomainError> {
        const OP: &str = "failed to ban card";

        self.require_admin(requester_id).await.op_context(OP)?;
        self.store.ban_card(card_name).await.op_context(OP)?;

        info!(requester_id, card_name, "card banned");
        Ok(())
    }

    pub async fn unban_card(&self, requester_id: &str, card_name: &str) -> Result<(), DomainError> {
        const OP: &str = "failed to unban card";

        self.require_admin(requester_id).await.op_context(OP)?;
        self.store.unban_card(card_name).await.op_context(OP)?;

        info!(requester_id, card_name, "card unbanned");
        Ok(())
    }

    pub async fn make_admin(&self, requester_id: &str, target_id: &str) -> Result<(), DomainError> {
        const OP: &str = "failed to grant admin";

        self.require_admin(requester_id).await.op_context(OP)?;
        self.store.make_admin(target_id).await.op_context(OP)?;

        info!(requester_id, target_id, "admin granted");
        Ok(())
    }

    /// Admin-only credit of wild cards and wild packs.
    pub async fn grant_wilds(
        &self,
        requester_id: &str,
        player_id: &str,
        wild_cards: i32,
        wild_packs: i32,
    ) -> Result<(), DomainError> {
        const OP: &str = "failed to grant wilds";

        self.require_admin(requester_id).await.op_context(OP)?;
        if wild_cards < 0 || wild_packs < 0 {
            return Err(DomainError::validation(
                ValidationKind::Other("NEGATIVE_GRANT".into()),
                "grants cannot be negative",
            )
            .context(OP));
        }
        self.store
            .credit_player(player_id, wild_cards, wild_packs)
            .await
            .op_context(OP)?;

        info!(requester_id, player_id, wild_cards, wild_packs, "wilds granted");
        Ok(())
    }
}
