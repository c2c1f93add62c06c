//! League participants and their currency balances.

use serde::{Deserialize, Serialize};

/// Opaque, stable identifier handed to us by the command layer.
pub type PlayerId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub wild_cards: i32,
    pub wild_packs: i32,
    pub dropped: bool,
}

impl Player {
    /// A freshly joined player: no currency, active.
    pub fn new(id: impl Into<PlayerId>) -> Self {
        Self {
            id: id.into(),
            wild_cards: 0,
            wild_packs: 0,
            dropped: false,
        }
    }

    pub fn balance(&self) -> Balance {
        Balance {
            wild_cards: self.wild_cards,
            wild_packs: self.wild_packs,
        }
    }
}

/// Redeemable currency held by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Balance {
    pub wild_cards: i32,
    pub wild_packs: i32,
}
