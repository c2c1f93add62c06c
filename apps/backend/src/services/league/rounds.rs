use std::collections::BTreeMap;

use tracing::{info, warn};

use super::LeagueService;
use crate::domain::cards::CardCopy;
use crate::domain::player::PlayerId;
use crate::errors::domain::{ConflictKind, DomainError, DomainResultExt};
use crate::services::pack_import::convert_cards;

/// Outcome of opening a round: its number and what each player received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundStart {
    pub round: i32,
    pub pools: BTreeMap<PlayerId, Vec<CardCopy>>,
}

impl LeagueService {
    /// Hands out packs of `set_code` to every active player and activates a
    /// new league at its first round.
    ///
    /// A per-player failure aborts the call; players served before it keep
    /// their cards.
    pub async fn start_round(&self, set_code: &str) -> Result<RoundStart, DomainError> {
        const OP: &str = "failed to start round";

        match self.store.get_round().await {
            Ok(round) => {
                return Err(DomainError::conflict(
                    ConflictKind::LeagueAlreadyOngoing,
                    format!("a league is already running at round {round}"),
                )
                .context(OP));
            }
            Err(e) if e.is_conflict(ConflictKind::NoActiveLeague) => {}
            Err(e) => return Err(e.context(OP)),
        }

        let pools = self.import_packs(set_code).await.op_context(OP)?;
        self.store.start_league().await.op_context(OP)?;
        self.store.unlock_set(set_code).await.op_context(OP)?;
        let round = self.store.get_round().await.op_context(OP)?;

        info!(set_code, round, players = pools.len(), "league started");
        Ok(RoundStart { round, pools })
    }

    /// Hands out packs of `set_code` for the next round of the active league.
    pub async fn advance_round(&self, set_code: &str) -> Result<RoundStart, DomainError> {
        const OP: &str = "failed to advance round";

        let current = self.store.get_round().await.op_context(OP)?;
        let pools = self.import_packs(set_code).await.op_context(OP)?;
        let round = self.store.advance_round().await.op_context(OP)?;
        self.store.unlock_set(set_code).await.op_context(OP)?;

        if round != current + 1 {
            warn!(current, round, "round advanced concurrently");
        }
        info!(set_code, round, players = pools.len(), "round advanced");
        Ok(RoundStart { round, pools })
    }

    /// Admin-only: closes the active league.
    pub async fn end_league(&self, requester_id: &str) -> Result<(), DomainError> {
        const OP: &str = "failed to end league";

        self.require_admin(requester_id).await.op_context(OP)?;
        self.store.end_league().await.op_context(OP)?;

        info!(requester_id, "league ended");
        Ok(())
    }

    async fn import_packs(
        &self,
        set_code: &str,
    ) -> Result<BTreeMap<PlayerId, Vec<CardCopy>>, DomainError> {
        let players = self.store.get_all_players().await?;
        let mut pools = BTreeMap::new();

        for player in players.into_iter().filter(|p| !p.dropped) {
            let generated = self
                .packs
                .get_packs(set_code, self.config.packs_per_round)
                .await?;
            let copies = convert_cards(&generated)?;
            self.store.store_cards(&player.id, &copies).await?;

            info!(player_id = %player.id, set_code, cards = copies.len(), "packs imported");
            pools.insert(player.id, copies);
        }

        Ok(pools)
    }
}
