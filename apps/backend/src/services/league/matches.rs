use tracing::{info, warn};

use super::LeagueService;
use crate::domain::pairing::{MatchResult, Pairing};
use crate::errors::domain::{
    ConflictKind, DomainError, DomainResultExt, InfraErrorKind, ValidationKind,
};

impl LeagueService {
    /// Records the reporter's wins, losses and draws on their current pairing.
    pub async fn report_match(
        &self,
        player_id: &str,
        wins: i32,
        losses: i32,
        draws: i32,
    ) -> Result<Pairing, DomainError> {
        const OP: &str = "failed to report match";

        let result = MatchResult::new(wins, losses, draws).op_context(OP)?;
        let pairing = self.store.get_pairing(player_id).await.op_context(OP)?;

        if pairing.is_reported() {
            return Err(already_reported(&pairing).context(OP));
        }

        let reported = pairing.with_result(player_id, result).ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("pairing of round {} does not seat the reporter", pairing.round),
            )
            .context(OP)
        })?;

        match self.store.update_pairing(&reported).await {
            Ok(()) => {
                info!(
                    player_id,
                    round = reported.round,
                    wins1 = reported.wins1,
                    wins2 = reported.wins2,
                    draws = reported.draws,
                    "match reported"
                );
                Ok(reported)
            }
            Err(e) if e.is_conflict(ConflictKind::PairingAlreadyReported) => {
                warn!(player_id, round = reported.round, "lost match report race");
                Err(already_reported(&reported).context(OP))
            }
            Err(e) => Err(e.context(OP)),
        }
    }

    /// Admin-only bulk insert of scheduled pairings.
    pub async fn store_pairings(
        &self,
        requester_id: &str,
        pairings: &[Pairing],
    ) -> Result<(), DomainError> {
        const OP: &str = "failed to store pairings";

        self.require_admin(requester_id).await.op_context(OP)?;
        if let Some(bad) = pairings.iter().find(|p| p.player1 == p.player2) {
            return Err(DomainError::validation(
                ValidationKind::Other("SELF_PAIRING".into()),
                format!("player {} cannot be paired with themselves", bad.player1),
            )
            .context(OP));
        }
        self.store.store_pairings(pairings).await.op_context(OP)?;

        info!(count = pairings.len(), "pairings stored");
        Ok(())
    }
}

fn already_reported(pairing: &Pairing) -> DomainError {
    DomainError::conflict(
        ConflictKind::MatchAlreadyReported,
        format!("the match of round {} has already been reported", pairing.round),
    )
}
