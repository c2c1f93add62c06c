pub mod banned_cards;
pub mod league_admins;
pub mod league_sets;
pub mod leagues;
pub mod pairings;
pub mod player_card_pool;
pub mod players;

pub use banned_cards::Entity as BannedCards;
pub use league_admins::Entity as LeagueAdmins;
pub use league_sets::Entity as LeagueSets;
pub use leagues::Entity as Leagues;
pub use leagues::Model as League;
pub use pairings::Entity as Pairings;
pub use player_card_pool::Entity as PlayerCardPool;
pub use players::Entity as Players;
