use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::LeagueStore;
use crate::domain::cards::{group_copies, CardCopy, CardPoolEntry};
use crate::domain::pairing::Pairing;
use crate::domain::player::{Player, PlayerId};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

#[derive(Debug)]
struct ActiveLeague {
    round: i32,
    sets: Vec<String>,
}

#[derive(Debug, Default)]
struct State {
    players: BTreeMap<PlayerId, Player>,
    pools: BTreeMap<PlayerId, BTreeMap<(String, i32), CardPoolEntry>>,
    pairings: Vec<Pairing>,
    league: Option<ActiveLeague>,
    /// Highest round reached by an ended league.
    last_round: i32,
    bans: BTreeSet<String>,
    admins: BTreeSet<PlayerId>,
}

impl State {
    fn player_mut(&mut self, player_id: &str) -> Result<&mut Player, DomainError> {
        self.players
            .get_mut(player_id)
            .ok_or_else(|| player_not_found(player_id))
    }

    fn active_league(&self) -> Result<&ActiveLeague, DomainError> {
        self.league.as_ref().ok_or_else(no_active_league)
    }

    fn add_copies(&mut self, player_id: &str, copies: &[CardCopy]) {
        let pool = self.pools.entry(player_id.to_string()).or_default();
        for entry in group_copies(copies) {
            let key = (entry.set_code.clone(), entry.collector_number);
            pool.entry(key)
                .and_modify(|existing| existing.count += entry.count)
                .or_insert(entry);
        }
    }
}

fn player_not_found(player_id: &str) -> DomainError {
    DomainError::not_found(NotFoundKind::Player, format!("player {player_id} not found"))
}

fn no_active_league() -> DomainError {
    DomainError::conflict(ConflictKind::NoActiveLeague, "no active league")
}

/// Process-local store. Every operation runs under one mutex, so each is
/// atomic with respect to every other.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LeagueStore for MemoryStore {
    async fn get_player(&self, player_id: &str) -> Result<Player, DomainError> {
        self.state
            .lock()
            .players
            .get(player_id)
            .cloned()
            .ok_or_else(|| player_not_found(player_id))
    }

    async fn upsert_player(&self, player: &Player) -> Result<(), DomainError> {
        self.state
            .lock()
            .players
            .insert(player.id.clone(), player.clone());
        Ok(())
    }

    async fn insert_player(&self, player_id: &str) -> Result<Player, DomainError> {
        let mut state = self.state.lock();
        if state.players.contains_key(player_id) {
            return Err(DomainError::conflict(
                ConflictKind::PlayerAlreadyJoined,
                format!("player {player_id} is already in the league"),
            ));
        }
        let player = Player::new(player_id);
        state.players.insert(player.id.clone(), player.clone());
        Ok(player)
    }

    async fn reactivate_player(&self, player_id: &str) -> Result<Player, DomainError> {
        let mut state = self.state.lock();
        let player = state.player_mut(player_id)?;
        if !player.dropped {
            return Err(DomainError::conflict(
                ConflictKind::PlayerAlreadyJoined,
                format!("player {player_id} is already in the league"),
            ));
        }
        player.dropped = false;
        Ok(player.clone())
    }

    async fn get_all_players(&self) -> Result<Vec<Player>, DomainError> {
        Ok(self.state.lock().players.values().cloned().collect())
    }

    async fn drop_player(&self, player_id: &str) -> Result<(), DomainError> {
        let mut state = self.state.lock();
        let player = state.player_mut(player_id)?;
        if player.dropped {
            return Err(DomainError::conflict(
                ConflictKind::PlayerAlreadyDropped,
                format!("player {player_id} has already dropped"),
            ));
        }
        player.dropped = true;
        Ok(())
    }

    async fn get_cards(&self, player_id: &str) -> Result<Vec<CardPoolEntry>, DomainError> {
        Ok(self
            .state
            .lock()
            .pools
            .get(player_id)
            .map(|pool| pool.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn store_cards(&self, player_id: &str, copies: &[CardCopy]) -> Result<(), DomainError> {
        self.state.lock().add_copies(player_id, copies);
        Ok(())
    }

    async fn get_pairing(&self, player_id: &str) -> Result<Pairing, DomainError> {
        let state = self.state.lock();
        let Some(league) = state.league.as_ref() else {
            return Err(DomainError::not_found(
                NotFoundKind::Pairing,
                "no pairing: no league is active",
            ));
        };
        state
            .pairings
            .iter()
            .find(|p| p.round == league.round && p.side_of(player_id).is_some())
            .cloned()
            .ok_or_else(|| {
                DomainError::not_found(
                    NotFoundKind::Pairing,
                    format!("no pairing in round {}", league.round),
                )
            })
    }

    async fn store_pairings(&self, pairings: &[Pairing]) -> Result<(), DomainError> {
        let mut state = self.state.lock();
        let mut batch_keys = BTreeSet::new();
        for p in pairings {
            let key = (p.round, p.player1.as_str(), p.player2.as_str());
            let exists = state
                .pairings
                .iter()
                .any(|q| (q.round, q.player1.as_str(), q.player2.as_str()) == key);
            if exists || !batch_keys.insert(key) {
                return Err(DomainError::conflict(
                    ConflictKind::Unique("pairing".into()),
                    "pairing already scheduled for this round",
                ));
            }
        }
        state.pairings.extend_from_slice(pairings);
        Ok(())
    }

    async fn update_pairing(&self, pairing: &Pairing) -> Result<(), DomainError> {
        let mut state = self.state.lock();
        let stored = state.pairings.iter_mut().find(|p| {
            p.round == pairing.round
                && p.player1 == pairing.player1
                && p.player2 == pairing.player2
                && !p.is_reported()
        });
        match stored {
            Some(stored) => {
                stored.wins1 = pairing.wins1;
                stored.wins2 = pairing.wins2;
                stored.draws = pairing.draws;
                Ok(())
            }
            None => Err(DomainError::conflict(
                ConflictKind::PairingAlreadyReported,
                format!(
                    "pairing {}:{}:{} is already reported or does not exist",
                    pairing.round, pairing.player1, pairing.player2
                ),
            )),
        }
    }

    async fn start_league(&self) -> Result<(), DomainError> {
        let mut state = self.state.lock();
        if state.league.is_some() {
            return Err(DomainError::conflict(
                ConflictKind::LeagueAlreadyOngoing,
                "a league is already ongoing",
            ));
        }
        state.league = Some(ActiveLeague {
            round: state.last_round + 1,
            sets: Vec::new(),
        });
        Ok(())
    }

    async fn end_league(&self) -> Result<(), DomainError> {
        let mut state = self.state.lock();
        let ended = state.league.take().ok_or_else(no_active_league)?;
        state.last_round = state.last_round.max(ended.round);
        Ok(())
    }

    async fn get_round(&self) -> Result<i32, DomainError> {
        Ok(self.state.lock().active_league()?.round)
    }

    async fn advance_round(&self) -> Result<i32, DomainError> {
        let mut state = self.state.lock();
        let league = state.league.as_mut().ok_or_else(no_active_league)?;
        league.round += 1;
        Ok(league.round)
    }

    async fn unlock_set(&self, set_code: &str) -> Result<(), DomainError> {
        let mut state = self.state.lock();
        let league = state.league.as_mut().ok_or_else(no_active_league)?;
        if !league.sets.iter().any(|s| s == set_code) {
            league.sets.push(set_code.to_string());
        }
        Ok(())
    }

    async fn get_sets(&self) -> Result<Vec<String>, DomainError> {
        Ok(self.state.lock().active_league()?.sets.clone())
    }

    async fn is_admin(&self, player_id: &str) -> Result<bool, DomainError> {
        Ok(self.state.lock().admins.contains(player_id))
    }

    async fn make_admin(&self, player_id: &str) -> Result<(), DomainError> {
        self.state.lock().admins.insert(player_id.to_string());
        Ok(())
    }

    async fn get_banned_cards(&self) -> Result<Vec<String>, DomainError> {
        Ok(self.state.lock().bans.iter().cloned().collect())
    }

    async fn ban_card(&self, card_name: &str) -> Result<(), DomainError> {
        self.state.lock().bans.insert(card_name.to_string());
        Ok(())
    }

    async fn unban_card(&self, card_name: &str) -> Result<(), DomainError> {
        if self.state.lock().bans.remove(card_name) {
            Ok(())
        } else {
            Err(DomainError::not_found(
                NotFoundKind::Card,
                format!("card {card_name:?} is not banned"),
            ))
        }
    }

    async fn credit_player(
        &self,
        player_id: &str,
        wild_cards: i32,
        wild_packs: i32,
    ) -> Result<(), DomainError> {
        let mut state = self.state.lock();
        let player = state.player_mut(player_id)?;
        player.wild_cards += wild_cards;
        player.wild_packs += wild_packs;
        Ok(())
    }

    async fn redeem_wild_card(&self, player_id: &str, copy: &CardCopy) -> Result<(), DomainError> {
        let mut state = self.state.lock();
        let player = state.player_mut(player_id)?;
        if player.wild_cards < 1 {
            return Err(DomainError::conflict(
                ConflictKind::InsufficientBalance,
                "not enough wild cards",
            ));
        }
        player.wild_cards -= 1;
        state.add_copies(player_id, std::slice::from_ref(copy));
        Ok(())
    }

    async fn redeem_wild_packs(
        &self,
        player_id: &str,
        packs: i32,
        copies: &[CardCopy],
    ) -> Result<(), DomainError> {
        let mut state = self.state.lock();
        let player = state.player_mut(player_id)?;
        if player.wild_packs < packs {
            return Err(DomainError::conflict(
                ConflictKind::InsufficientBalance,
                "not enough wild packs",
            ));
        }
        player.wild_packs -= packs;
        state.add_copies(player_id, copies);
        Ok(())
    }
}
