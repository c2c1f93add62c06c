//! Pairings between two players within a round and their reported outcome.

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

/// Games awarded to the opponent when a player drops mid-round.
pub const FORFEIT_WINS: i32 = 2;

/// Which column pair of the pairing row a player occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player1,
    Player2,
}

/// A scheduled match. A pairing is unreported while all three tallies are zero;
/// once any tally is non-zero the result is final.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub round: i32,
    pub player1: String,
    pub player2: String,
    pub wins1: i32,
    pub wins2: i32,
    pub draws: i32,
}

impl Pairing {
    /// An unreported pairing for `round`.
    pub fn scheduled(round: i32, player1: impl Into<String>, player2: impl Into<String>) -> Self {
        Self {
            round,
            player1: player1.into(),
            player2: player2.into(),
            wins1: 0,
            wins2: 0,
            draws: 0,
        }
    }

    pub fn is_reported(&self) -> bool {
        !(self.wins1 == 0 && self.wins2 == 0 && self.draws == 0)
    }

    pub fn side_of(&self, player_id: &str) -> Option<Side> {
        if self.player1 == player_id {
            Some(Side::Player1)
        } else if self.player2 == player_id {
            Some(Side::Player2)
        } else {
            None
        }
    }

    pub fn opponent_of(&self, player_id: &str) -> Option<&str> {
        match self.side_of(player_id)? {
            Side::Player1 => Some(&self.player2),
            Side::Player2 => Some(&self.player1),
        }
    }

    /// The same pairing with `result` written from `reporter`'s perspective.
    ///
    /// Player 1 keeps their wins as `wins1`; for player 2 wins and losses swap.
    /// Returns `None` if `reporter` is not part of this pairing.
    pub fn with_result(&self, reporter: &str, result: MatchResult) -> Option<Pairing> {
        let (wins1, wins2) = match self.side_of(reporter)? {
            Side::Player1 => (result.wins, result.losses),
            Side::Player2 => (result.losses, result.wins),
        };
        Some(Pairing {
            wins1,
            wins2,
            draws: result.draws,
            ..self.clone()
        })
    }

    /// The outcome recorded when `dropping` leaves: the opponent wins 2-0.
    pub fn forfeited_by(&self, dropping: &str) -> Option<Pairing> {
        self.with_result(
            dropping,
            MatchResult {
                wins: 0,
                losses: FORFEIT_WINS,
                draws: 0,
            },
        )
    }
}

/// Games won, lost and drawn from the reporting player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub wins: i32,
    pub losses: i32,
    pub draws: i32,
}

impl MatchResult {
    /// Validate a reported result.
    ///
    /// A 0-0-0 result would be indistinguishable from "not reported" and is
    /// rejected, as are negative tallies.
    pub fn new(wins: i32, losses: i32, draws: i32) -> Result<Self, DomainError> {
        if wins < 0 || losses < 0 || draws < 0 {
            return Err(DomainError::validation(
                ValidationKind::InvalidMatchResult,
                format!("negative game count in {wins}-{losses}-{draws}"),
            ));
        }
        if wins == 0 && losses == 0 && draws == 0 {
            return Err(DomainError::validation(
                ValidationKind::InvalidMatchResult,
                "a match result needs at least one game",
            ));
        }
        Ok(Self {
            wins,
            losses,
            draws,
        })
    }
}
