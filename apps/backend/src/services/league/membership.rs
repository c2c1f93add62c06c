use tracing::{debug, info};

use super::LeagueService;
use crate::config::league::RejoinPolicy;
use crate::domain::pairing::Pairing;
use crate::domain::player::Player;
use crate::errors::domain::{ConflictKind, DomainError, DomainResultExt, NotFoundKind};

impl LeagueService {
    /// Adds a new player with empty balances, or reactivates a dropped one
    /// with balances intact. Both paths are single conditional writes, so a
    /// concurrent credit is never overwritten and concurrent joins of the
    /// same id admit exactly one.
    pub async fn join_league(&self, player_id: &str) -> Result<Player, DomainError> {
        const OP: &str = "failed to join league";

        let (player, rejoining) = match self.store.reactivate_player(player_id).await {
            Ok(player) => (player, true),
            Err(e) if e.is_not_found(NotFoundKind::Player) => {
                let player = self.store.insert_player(player_id).await.op_context(OP)?;
                (player, false)
            }
            Err(e) => return Err(e.context(OP)),
        };

        if rejoining && self.config.rejoin_policy == RejoinPolicy::ForfeitPendingPairing {
            self.forfeit_pending_pairing(player_id).await.op_context(OP)?;
        }

        info!(player_id, rejoining, "player joined league");
        Ok(player)
    }

    /// Marks the player dropped; an unreported current pairing is first
    /// awarded 2-0 to the opponent. Of two concurrent drops the store lets
    /// only one through.
    pub async fn drop_player(&self, player_id: &str) -> Result<(), DomainError> {
        const OP: &str = "failed to drop player";

        let player = self.store.get_player(player_id).await.op_context(OP)?;
        if player.dropped {
            return Err(DomainError::conflict(
                ConflictKind::PlayerAlreadyDropped,
                format!("player {player_id} has already dropped"),
            )
            .context(OP));
        }

        let forfeited = self.forfeit_pending_pairing(player_id).await.op_context(OP)?;
        self.store.drop_player(player_id).await.op_context(OP)?;

        info!(player_id, forfeited = forfeited.is_some(), "player dropped");
        Ok(())
    }

    /// Writes a forfeit loss for `player_id` into its unreported current
    /// pairing. Returns the forfeited pairing, or `None` when there was
    /// nothing to forfeit or another writer reported first.
    pub(super) async fn forfeit_pending_pairing(
        &self,
        player_id: &str,
    ) -> Result<Option<Pairing>, DomainError> {
        let pairing = match self.store.get_pairing(player_id).await {
            Ok(pairing) => pairing,
            Err(e)
                if e.is_not_found(NotFoundKind::Pairing)
                    || e.is_conflict(ConflictKind::NoActiveLeague) =>
            {
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        if pairing.is_reported() {
            return Ok(None);
        }
        let Some(forfeit) = pairing.forfeited_by(player_id) else {
            return Ok(None);
        };

        match self.store.update_pairing(&forfeit).await {
            Ok(()) => Ok(Some(forfeit)),
            Err(e) if e.is_conflict(ConflictKind::PairingAlreadyReported) => {
                debug!(player_id, round = pairing.round, "pairing reported before forfeit");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
