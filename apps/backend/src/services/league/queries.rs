use super::LeagueService;
use crate::clients::CardMatch;
use crate::domain::cards::CardPoolEntry;
use crate::domain::player::Balance;
use crate::errors::domain::{DomainError, DomainResultExt, NotFoundKind, ValidationKind};

impl LeagueService {
    /// Looks a card up by name within the sets unlocked so far.
    ///
    /// The lookup matches substrings, so a result whose name equals `name`
    /// (ignoring case) wins over the longer names that merely contain it.
    pub async fn find_card(&self, name: &str) -> Result<CardMatch, DomainError> {
        const OP: &str = "failed to find card";

        let sets = self.store.get_sets().await.op_context(OP)?;
        let mut matches = self
            .lookup
            .search_in_sets(name, &sets)
            .await
            .op_context(OP)?;

        if let Some(exact) = matches
            .iter()
            .position(|m| m.name.eq_ignore_ascii_case(name.trim()))
        {
            return Ok(matches.swap_remove(exact));
        }

        match matches.len() {
            0 => Err(DomainError::not_found(
                NotFoundKind::Card,
                format!("no card named {name:?} in the unlocked sets"),
            )
            .context(OP)),
            1 => Ok(matches.remove(0)),
            n => Err(DomainError::validation(
                ValidationKind::AmbiguousCardName,
                format!("{n} cards match {name:?}"),
            )
            .context(OP)),
        }
    }

    pub async fn get_player_balance(&self, player_id: &str) -> Result<Balance, DomainError> {
        let player = self
            .store
            .get_player(player_id)
            .await
            .op_context("failed to get balance")?;
        Ok(player.balance())
    }

    /// The player's pool; `NotFound(Player)` for someone who never joined.
    pub async fn get_player_cards(
        &self,
        player_id: &str,
    ) -> Result<Vec<CardPoolEntry>, DomainError> {
        const OP: &str = "failed to get card pool";

        self.store.get_player(player_id).await.op_context(OP)?;
        self.store.get_cards(player_id).await.op_context(OP)
    }

    pub async fn get_sets(&self) -> Result<Vec<String>, DomainError> {
        self.store.get_sets().await.op_context("failed to get sets")
    }

    pub async fn get_banned_cards(&self) -> Result<Vec<String>, DomainError> {
        self.store
            .get_banned_cards()
            .await
            .op_context("failed to get banned cards")
    }
}
