//! Domain layer: plain league types and the rules that need no storage.

pub mod cards;
pub mod pairing;
pub mod player;

pub use cards::{group_copies, CardCopy, CardPoolEntry};
pub use pairing::{MatchResult, Pairing, Side, FORFEIT_WINS};
pub use player::{Balance, Player, PlayerId};
