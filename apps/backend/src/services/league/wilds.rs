use tracing::info;

use super::LeagueService;
use crate::domain::cards::CardCopy;
use crate::errors::domain::{
    ConflictKind, DomainError, DomainResultExt, NotFoundKind, ValidationKind,
};
use crate::services::pack_import::convert_cards;

impl LeagueService {
    /// Spends one wild card on a chosen card from an unlocked set.
    pub async fn redeem_wild_card(
        &self,
        player_id: &str,
        card_name: &str,
    ) -> Result<CardCopy, DomainError> {
        const OP: &str = "failed to redeem wild card";

        let found = self.find_card(card_name).await.op_context(OP)?;
        let collector_number = found.collector_number.parse::<i32>().map_err(|_| {
            DomainError::validation(
                ValidationKind::Other("UNSUPPORTED_PRINTING".into()),
                format!(
                    "{} ({} #{}) cannot be redeemed",
                    found.name, found.set_code, found.collector_number
                ),
            )
            .context(OP)
        })?;

        let exists = self
            .packs
            .check_card(&found.set_code, collector_number)
            .await
            .op_context(OP)?;
        if !exists {
            return Err(DomainError::not_found(
                NotFoundKind::Card,
                format!("{} #{collector_number} is unknown to the pack generator", found.set_code),
            )
            .context(OP));
        }

        let copy = CardCopy::new(found.name, found.set_code, collector_number);
        self.store
            .redeem_wild_card(player_id, &copy)
            .await
            .op_context(OP)?;

        info!(player_id, card = %copy.name, set_code = %copy.set_code, "wild card redeemed");
        Ok(copy)
    }

    /// Spends `count` wild packs on packs of an unlocked set.
    pub async fn redeem_wild_packs(
        &self,
        player_id: &str,
        set_code: &str,
        count: i32,
    ) -> Result<Vec<CardCopy>, DomainError> {
        const OP: &str = "failed to redeem wild packs";

        if count < 1 {
            return Err(DomainError::validation(
                ValidationKind::InvalidPackCount,
                format!("pack count must be at least 1, got {count}"),
            )
            .context(OP));
        }

        let unlocked = self.require_unlocked(set_code).await.op_context(OP)?;
        let set_code = unlocked.as_str();

        // Cheap early exit before asking the generator; the store re-checks atomically.
        let balance = self.store.get_player(player_id).await.op_context(OP)?.balance();
        if balance.wild_packs < count {
            return Err(DomainError::conflict(
                ConflictKind::InsufficientBalance,
                format!("{} wild packs available, {count} requested", balance.wild_packs),
            )
            .context(OP));
        }

        let generated = self
            .packs
            .get_packs(set_code, count.unsigned_abs())
            .await
            .op_context(OP)?;
        let copies = convert_cards(&generated).op_context(OP)?;
        self.store
            .redeem_wild_packs(player_id, count, &copies)
            .await
            .op_context(OP)?;

        info!(player_id, set_code, count, cards = copies.len(), "wild packs redeemed");
        Ok(copies)
    }

    /// The unlocked set's code as stored, matched case-insensitively.
    async fn require_unlocked(&self, set_code: &str) -> Result<String, DomainError> {
        let sets = self.store.get_sets().await?;
        sets.into_iter()
            .find(|s| s.eq_ignore_ascii_case(set_code))
            .ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::SetNotUnlocked,
                    format!("set {set_code:?} is not unlocked in this league"),
                )
            })
    }
}
